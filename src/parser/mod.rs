//! テキスト解析モジュール - サンプルコードの抽出

mod normalize;

pub use normalize::{SUB_ID_RANGE, normalize_sub_id};

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

/// サンプルコードのパターン
///
/// `E` または `C` + 数字9桁、任意で `-NNN` の枝番。
/// `\d` はUnicode数字にもマッチするため `[0-9]` を使う。
pub const CODE_PATTERN: &str = r"\b[EC][0-9]{9}(?:-[0-9]{3})?\b";

static CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(CODE_PATTERN).expect("CODE_PATTERN is a valid regex"));

/// 正規化済みのサンプルコード
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SampleCode(String);

impl SampleCode {
    /// マッチした文字列から正規化済みコードを作る
    fn from_match(raw: &str) -> Self {
        let normalized = normalize_sub_id(raw);
        if normalized != raw {
            tracing::debug!(raw, normalized = %normalized, "サブ番号を正規化");
        }
        Self(normalized)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SampleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SampleCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// テキストから最初のサンプルコードを抽出
pub fn extract_code(text: &str) -> Option<SampleCode> {
    CODE_RE.find(text).map(|m| SampleCode::from_match(m.as_str()))
}

/// ページ順に走査し、最初に見つかったコードを返す
pub fn extract_code_from_pages<S: AsRef<str>>(pages: &[S]) -> Option<SampleCode> {
    pages.iter().enumerate().find_map(|(i, page)| {
        let code = extract_code(page.as_ref())?;
        tracing::debug!(page = i + 1, code = %code, "サンプルコードを検出");
        Some(code)
    })
}
