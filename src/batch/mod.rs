//! バッチ処理 - 抽出・OCR再試行・重複検出・リネームの制御

mod payload;

pub use payload::parse_drop_payload;

use crate::config::Config;
use crate::error::Result;
use crate::ocr::{OcrEngine, OcrMyPdf};
use crate::parser::{SampleCode, extract_code_from_pages};
use crate::pdf::{DocumentReader, PdfTextReader, is_pdf};
use crate::rename::rename_to_code;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// 1ファイルの処理結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "new_name", rename_all = "snake_case")]
pub enum ProcessingResult {
    /// サンプルコード名にリネームした
    Renamed(String),
    /// OCR後もコードが見つからない
    NotFound,
    /// 既出のコードのため接頭辞付きでリネームした
    Duplicate(String),
}

impl ProcessingResult {
    pub fn new_name(&self) -> Option<&str> {
        match self {
            Self::Renamed(name) | Self::Duplicate(name) => Some(name),
            Self::NotFound => None,
        }
    }

    /// リネームできたか（重複も成功扱い）
    pub fn is_success(&self) -> bool {
        self.new_name().is_some()
    }
}

/// ファイルごとのレポート
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub original: PathBuf,
    pub result: Option<ProcessingResult>,
    pub error: Option<String>,
}

impl FileReport {
    fn new(original: &Path, outcome: Result<ProcessingResult>) -> Self {
        let (result, error) = match outcome {
            Ok(result) => (Some(result), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            original: original.to_path_buf(),
            result,
            error,
        }
    }

    pub fn success(&self) -> bool {
        self.result.as_ref().is_some_and(ProcessingResult::is_success)
    }

    /// 画面表示用の失敗理由
    pub fn failure_reason(&self) -> Option<String> {
        match (&self.result, &self.error) {
            (_, Some(error)) => Some(error.clone()),
            (Some(ProcessingResult::NotFound), None) => {
                Some("サンプルコードが見つかりません".to_string())
            }
            _ => None,
        }
    }
}

/// バッチ全体の集計
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    /// ドロップされたパスの数（PDF以外も含む）
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// PDF以外で処理しなかった数
    pub skipped: usize,
    pub reports: Vec<FileReport>,
}

impl BatchSummary {
    pub fn push(&mut self, report: FileReport) {
        if report.success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
        self.reports.push(report);
    }

    /// 結果ダイアログの本文
    pub fn message(&self) -> String {
        format!(
            "{} 件のファイルを処理しました:\n成功: {}\n失敗: {}",
            self.total, self.succeeded, self.failed
        )
    }
}

/// バッチ処理の制御
///
/// 既出コードの集合を保持する。GUIセッション中は複数回のドロップにまたがって使い回す。
pub struct BatchController {
    reader: Box<dyn DocumentReader + Send>,
    ocr: Option<Box<dyn OcrEngine + Send>>,
    seen: HashSet<String>,
    duplicate_marker: String,
}

impl BatchController {
    pub fn new(reader: Box<dyn DocumentReader + Send>, ocr: Option<Box<dyn OcrEngine + Send>>) -> Self {
        Self {
            reader,
            ocr,
            seen: HashSet::new(),
            duplicate_marker: crate::config::DEFAULT_DUPLICATE_MARKER.to_string(),
        }
    }

    /// 設定から PDF リーダーと ocrmypdf を組み立てる
    ///
    /// OCRコマンドが見つからない場合はOCRなしで動作する。
    pub fn from_config(config: &Config) -> Self {
        let ocr: Option<Box<dyn OcrEngine + Send>> = if config.ocr_enabled {
            match OcrMyPdf::resolve(&config.ocr_command) {
                Ok(engine) => {
                    tracing::info!(binary = %engine.binary_path().display(), "OCRを有効化");
                    let engine = match config.ocr_language {
                        Some(ref lang) => engine.with_language(lang),
                        None => engine,
                    };
                    Some(Box::new(engine))
                }
                Err(e) => {
                    tracing::warn!("{e} - OCRなしで処理します");
                    None
                }
            }
        } else {
            None
        };

        Self::new(Box::new(PdfTextReader), ocr).with_duplicate_marker(&config.duplicate_marker)
    }

    pub fn with_duplicate_marker(mut self, marker: impl Into<String>) -> Self {
        self.duplicate_marker = marker.into();
        self
    }

    pub fn has_ocr(&self) -> bool {
        self.ocr.is_some()
    }

    /// これまでに検出したコード
    pub fn seen_codes(&self) -> &HashSet<String> {
        &self.seen
    }

    fn extract(&self, path: &Path) -> Result<Option<SampleCode>> {
        let pages = self.reader.read_pages(path)?;
        Ok(extract_code_from_pages(&pages))
    }

    /// 抽出し、見つからなければOCRをかけて1回だけ再試行
    ///
    /// ファイルが存在しない場合はOCRしない。
    fn extract_with_ocr(&self, path: &Path) -> Result<Option<SampleCode>> {
        let first = match self.extract(path) {
            Ok(Some(code)) => return Ok(Some(code)),
            Err(e) if e.is_missing_file() => return Err(e),
            other => other,
        };

        let Some(ref ocr) = self.ocr else {
            return first;
        };

        match &first {
            Ok(None) => tracing::info!(path = %path.display(), "コード未検出、OCRで再試行"),
            Err(e) => tracing::warn!(path = %path.display(), "{e}、OCRで再試行"),
            Ok(Some(_)) => {}
        }

        if let Err(e) = ocr.ocr_in_place(path) {
            tracing::warn!(path = %path.display(), "{e}");
            return first;
        }

        self.extract(path)
    }

    /// 1ファイルを処理
    pub fn process_file(&mut self, path: &Path) -> Result<ProcessingResult> {
        let Some(code) = self.extract_with_ocr(path)? else {
            tracing::warn!(path = %path.display(), "サンプルコードが見つかりません");
            return Ok(ProcessingResult::NotFound);
        };

        let code = code.into_string();
        // 既出集合へは実際にリネームできたコードだけを登録する
        let duplicate = self.seen.contains(&code);
        let target = if duplicate {
            tracing::warn!(code = %code, "重複したサンプルコード");
            format!("{}{}", self.duplicate_marker, code)
        } else {
            code.clone()
        };

        let name = rename_to_code(&target, path)?;
        self.seen.insert(code);

        Ok(if duplicate {
            ProcessingResult::Duplicate(name)
        } else {
            ProcessingResult::Renamed(name)
        })
    }

    /// ファイル群を順番に処理する。PDF以外は数えるだけで処理しない
    pub fn process_batch<I, P>(&mut self, paths: I) -> BatchSummary
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut summary = BatchSummary::default();

        for path in paths {
            let path = path.as_ref();
            summary.total += 1;

            if !is_pdf(path) {
                tracing::debug!(path = %path.display(), "PDF以外のためスキップ");
                summary.skipped += 1;
                continue;
            }

            let outcome = self.process_file(path);
            if let Err(ref e) = outcome {
                tracing::warn!(path = %path.display(), "処理失敗: {e}");
            }
            summary.push(FileReport::new(path, outcome));
        }

        tracing::info!(
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "バッチ処理完了"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenamerError;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// パスごとの固定テキストを返すリーダー
    struct MapReader(HashMap<PathBuf, Vec<String>>);

    impl DocumentReader for MapReader {
        fn read_pages(&self, path: &Path) -> Result<Vec<String>> {
            self.0
                .get(path)
                .cloned()
                .ok_or_else(|| RenamerError::FileNotFound(path.to_path_buf()))
        }
    }

    fn reader(entries: &[(&str, &str)]) -> Box<MapReader> {
        Box::new(MapReader(
            entries
                .iter()
                .map(|(p, t)| (PathBuf::from(p), vec![t.to_string()]))
                .collect(),
        ))
    }

    #[test]
    fn processing_result_success_flags() {
        assert!(ProcessingResult::Renamed("a.pdf".into()).is_success());
        assert!(ProcessingResult::Duplicate("Error_a.pdf".into()).is_success());
        assert!(!ProcessingResult::NotFound.is_success());
        assert_eq!(ProcessingResult::NotFound.new_name(), None);
    }

    /// 呼び出し回数を数えるだけのOCR
    struct CountingOcr(Arc<AtomicU32>);

    impl OcrEngine for CountingOcr {
        fn ocr_in_place(&self, _path: &Path) -> Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn missing_file_is_an_error_without_ocr_attempt() {
        let calls = Arc::new(AtomicU32::new(0));
        let mut controller =
            BatchController::new(reader(&[]), Some(Box::new(CountingOcr(Arc::clone(&calls)))));

        let err = controller.process_file(Path::new("gone.pdf")).unwrap_err();
        assert!(err.is_missing_file());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn no_code_retries_extraction_once_after_ocr() {
        let calls = Arc::new(AtomicU32::new(0));
        let mut controller = BatchController::new(
            reader(&[("a.pdf", "no code")]),
            Some(Box::new(CountingOcr(Arc::clone(&calls)))),
        );

        let result = controller.process_file(Path::new("a.pdf")).unwrap();
        assert_eq!(result, ProcessingResult::NotFound);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn no_code_without_ocr_is_not_found() {
        let mut controller = BatchController::new(reader(&[("a.pdf", "nothing")]), None);
        let result = controller.process_file(Path::new("a.pdf")).unwrap();
        assert_eq!(result, ProcessingResult::NotFound);
        assert!(controller.seen_codes().is_empty());
    }

    #[test]
    fn summary_message_counts() {
        let summary = BatchSummary {
            total: 3,
            succeeded: 1,
            failed: 1,
            skipped: 1,
            reports: Vec::new(),
        };
        assert_eq!(summary.message(), "3 件のファイルを処理しました:\n成功: 1\n失敗: 1");
    }

    #[test]
    fn failure_reason_for_not_found() {
        let report = FileReport::new(Path::new("a.pdf"), Ok(ProcessingResult::NotFound));
        assert!(!report.success());
        assert!(report.failure_reason().is_some());

        let report = FileReport::new(
            Path::new("b.pdf"),
            Err(RenamerError::FileNotFound(PathBuf::from("b.pdf"))),
        );
        assert!(report.failure_reason().unwrap().contains("b.pdf"));
    }
}
