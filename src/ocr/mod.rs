//! OCRモジュール - テキストレイヤーのないPDFにOCRをかける

use crate::error::{RenamerError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// 既定のOCRコマンド名
pub const DEFAULT_OCR_COMMAND: &str = "ocrmypdf";

/// OCRエンジン
///
/// 指定されたファイルにその場でテキストレイヤーを追加する。
pub trait OcrEngine {
    fn ocr_in_place(&self, path: &Path) -> Result<()>;
}

/// ocrmypdf コマンドによるOCR
#[derive(Debug, Clone)]
pub struct OcrMyPdf {
    binary_path: PathBuf,
    language: Option<String>,
}

impl OcrMyPdf {
    pub fn new(binary_path: impl Into<PathBuf>) -> Self {
        Self {
            binary_path: binary_path.into(),
            language: None,
        }
    }

    /// コマンド名またはパスから解決する
    pub fn resolve(command: &str) -> Result<Self> {
        which::which(command)
            .map(Self::new)
            .map_err(|e| RenamerError::OcrUnavailable(format!("{command}: {e}")))
    }

    /// 認識言語を指定 (例: "eng", "eng+jpn")
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    /// 入力と出力に同じパスを渡し、テキスト済みのページは飛ばす
    fn build_command(&self, path: &Path) -> Command {
        let mut cmd = Command::new(&self.binary_path);
        cmd.arg("--skip-text");
        if let Some(ref lang) = self.language {
            cmd.args(["-l", lang]);
        }
        cmd.arg(path).arg(path);

        #[cfg(windows)]
        cmd.creation_flags(0x08000000); // CREATE_NO_WINDOW

        cmd
    }
}

impl OcrEngine for OcrMyPdf {
    fn ocr_in_place(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(RenamerError::FileNotFound(path.to_path_buf()));
        }

        tracing::info!(path = %path.display(), binary = %self.binary_path.display(), "OCRを実行");

        let output = self
            .build_command(path)
            .output()
            .map_err(|e| RenamerError::Ocr(format!("{} の実行に失敗: {e}", self.binary_path.display())))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RenamerError::Ocr(format!(
                "終了コード {:?}: {}",
                output.status.code(),
                stderr.trim()
            )));
        }

        Ok(())
    }
}

#[cfg(windows)]
trait CommandExt {
    fn creation_flags(&mut self, flags: u32) -> &mut Self;
}

#[cfg(windows)]
impl CommandExt for Command {
    fn creation_flags(&mut self, flags: u32) -> &mut Self {
        use std::os::windows::process::CommandExt as WinCommandExt;
        WinCommandExt::creation_flags(self, flags)
    }
}
