//! PDF処理モジュール - PDFからページ単位のテキストを取得

use crate::error::{RenamerError, Result};
use std::io::ErrorKind;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

/// 文書リーダー
///
/// ファイルが存在しない場合は [`RenamerError::FileNotFound`]、
/// 開けるが解析できない場合は [`RenamerError::Unreadable`] を返すこと。
pub trait DocumentReader {
    /// ページ順のテキストを返す
    fn read_pages(&self, path: &Path) -> Result<Vec<String>>;
}

/// pdf-extract によるテキストレイヤーの読み取り
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextReader;

impl DocumentReader for PdfTextReader {
    fn read_pages(&self, path: &Path) -> Result<Vec<String>> {
        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => RenamerError::FileNotFound(path.to_path_buf()),
            _ => RenamerError::Io(e),
        })?;

        extract_pages_from_mem(&bytes).map_err(|message| RenamerError::Unreadable {
            path: path.to_path_buf(),
            message,
        })
    }
}

/// メモリ上のPDFからページごとのテキストを取得
///
/// pdf-extract は壊れたフォント等で panic することがあるため捕捉してエラーにする。
fn extract_pages_from_mem(bytes: &[u8]) -> std::result::Result<Vec<String>, String> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }));

    match outcome {
        Ok(Ok(pages)) => Ok(pages),
        Ok(Err(e)) => Err(e.to_string()),
        Err(_) => Err("PDF解析中に内部エラーが発生しました".to_string()),
    }
}

/// 拡張子がPDFか（大文字小文字を区別しない）
pub fn is_pdf(path: &Path) -> bool {
    path.extension().is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}


#[cfg(test)]
mod tests {
    use super::test_support::make_text_pdf;
    use super::*;
    use crate::parser::extract_code_from_pages;
    use tempfile::TempDir;

    #[test]
    fn reads_code_from_text_layer() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scan.pdf");
        std::fs::write(&path, make_text_pdf("Sample E241120030")).unwrap();

        let pages = PdfTextReader.read_pages(&path).unwrap();
        assert_eq!(pages.len(), 1);

        let code = extract_code_from_pages(&pages).unwrap();
        assert_eq!(code.as_str(), "E241000030");
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let dir = TempDir::new().unwrap();
        let err = PdfTextReader
            .read_pages(&dir.path().join("nope.pdf"))
            .unwrap_err();
        assert!(err.is_missing_file(), "unexpected error: {err}");
    }

    #[test]
    fn garbage_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"not a pdf").unwrap();

        let err = PdfTextReader.read_pages(&path).unwrap_err();
        assert!(matches!(err, RenamerError::Unreadable { .. }), "unexpected error: {err}");
    }

    #[test]
    fn pdf_extension_check_ignores_case() {
        assert!(is_pdf(Path::new("a/b.PDF")));
        assert!(is_pdf(Path::new("b.pdf")));
        assert!(!is_pdf(Path::new("b.txt")));
        assert!(!is_pdf(Path::new("pdf")));
    }
}
