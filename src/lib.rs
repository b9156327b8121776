//! サンプルコード リネーマー - PDF内のサンプルコードでファイル名を変更するツール
//!
//! # 機能
//! - PDFのテキストレイヤーからサンプルコード（`E`/`C` + 数字9桁、任意で `-NNN`）を抽出
//! - サブ番号（5〜6文字目）の "00" への正規化
//! - テキストがない場合は ocrmypdf でOCRして再試行
//! - 同名ファイルを上書きしない連番付きリネーム
//! - 同一セッション内の重複コードに接頭辞を付与
//! - ドラッグ＆ドロップ対応GUI / コマンドライン

pub mod batch;
pub mod config;
pub mod error;
pub mod gui;
pub mod ocr;
pub mod parser;
pub mod pdf;
pub mod rename;

pub use batch::{BatchController, BatchSummary, ProcessingResult};
pub use config::Config;
pub use error::{RenamerError, Result};
pub use parser::{SampleCode, extract_code};
