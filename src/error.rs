//! エラー型

use std::path::PathBuf;
use thiserror::Error;

/// ライブラリ共通の Result
pub type Result<T> = std::result::Result<T, RenamerError>;

/// 1ファイルの処理で発生するエラー
///
/// コード未検出・重複コードはエラーではなく
/// [`ProcessingResult`](crate::batch::ProcessingResult) として扱う。
#[derive(Debug, Error)]
pub enum RenamerError {
    /// ファイルが存在しない
    #[error("ファイルが見つかりません: {}", .0.display())]
    FileNotFound(PathBuf),

    /// PDFとして読み込めない
    #[error("PDFを読み込めません: {}: {message}", .path.display())]
    Unreadable { path: PathBuf, message: String },

    /// OCRの実行に失敗
    #[error("OCR処理に失敗: {0}")]
    Ocr(String),

    /// OCRコマンドが見つからない
    #[error("OCRコマンドが見つかりません: {0}")]
    OcrUnavailable(String),

    /// 空き番号が見つからない
    #[error("{code} の空きファイル名が見つかりません (上限 {limit})")]
    SuffixExhausted { code: String, limit: u32 },

    /// 設定値が不正
    #[error("設定エラー: {key}: {message}")]
    Config { key: String, message: String },

    #[error("I/Oエラー: {0}")]
    Io(#[from] std::io::Error),
}

impl RenamerError {
    /// ファイル自体が存在しないエラーか
    pub fn is_missing_file(&self) -> bool {
        matches!(self, Self::FileNotFound(_))
    }
}
