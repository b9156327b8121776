//! リネーム処理 - 同名ファイルを上書きしない一意なファイル名の決定

use crate::error::{RenamerError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// 連番の上限
pub const MAX_SUFFIX: u32 = 10_000;

/// 連番 `n` に対応するファイル名（0 は連番なし）
fn candidate_name(code: &str, n: u32) -> String {
    if n == 0 {
        format!("{code}.pdf")
    } else {
        format!("{code}_{n}.pdf")
    }
}

/// ユニークなファイル名を取得（同名ファイルがある場合は連番を付与）
///
/// 実際のリネームは [`rename_to_code`] を使うこと。
pub fn unique_filename(directory: &Path, code: &str) -> Result<String> {
    unique_filename_within(directory, code, MAX_SUFFIX)
}

fn unique_filename_within(directory: &Path, code: &str, limit: u32) -> Result<String> {
    (0..=limit)
        .map(|n| candidate_name(code, n))
        .find(|name| !directory.join(name).exists())
        .ok_or_else(|| RenamerError::SuffixExhausted {
            code: code.to_string(),
            limit,
        })
}

/// `src` を `dest` に移動する。`dest` が既に存在すれば `Ok(false)`
///
/// ハードリンクは既存ファイルがあると失敗するため、確保と移動を原子的に行える。
/// ハードリンク非対応のファイルシステムでは [`claim_by_rename`] にフォールバックする。
fn claim(src: &Path, dest: &Path) -> Result<bool> {
    match fs::hard_link(src, dest) {
        Ok(()) => {
            finish_link(dest, fs::remove_file(src))?;
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(RenamerError::FileNotFound(src.to_path_buf()))
        }
        Err(e) => {
            tracing::debug!(error = %e, "ハードリンク不可、rename にフォールバック");
            claim_by_rename(src, dest)
        }
    }
}

/// リンク後の元ファイル削除の結果を確定する
///
/// 削除に失敗した場合（Windowsの読み取り専用ファイル等）はリンクを戻し、二重に残さない。
fn finish_link(dest: &Path, removed: std::io::Result<()>) -> Result<()> {
    if let Err(e) = removed {
        if let Err(undo) = fs::remove_file(dest) {
            tracing::warn!(dest = %dest.display(), error = %undo, "リンクの取り消しに失敗");
        }
        return Err(e.into());
    }
    Ok(())
}

/// 存在確認してから rename する
fn claim_by_rename(src: &Path, dest: &Path) -> Result<bool> {
    if dest.exists() {
        return Ok(false);
    }
    fs::rename(src, dest)?;
    Ok(true)
}

/// サンプルコードでファイルをリネームし、新しいファイル名を返す
pub fn rename_to_code(code: &str, file_path: &Path) -> Result<String> {
    rename_to_code_within(code, file_path, MAX_SUFFIX)
}

fn rename_to_code_within(code: &str, file_path: &Path, limit: u32) -> Result<String> {
    if !file_path.exists() {
        return Err(RenamerError::FileNotFound(file_path.to_path_buf()));
    }

    let directory = file_path.parent().unwrap_or(Path::new("."));

    for n in 0..=limit {
        let name = candidate_name(code, n);
        if claim(file_path, &directory.join(&name))? {
            tracing::info!(from = %file_path.display(), to = %name, "リネーム完了");
            return Ok(name);
        }
    }

    Err(RenamerError::SuffixExhausted {
        code: code.to_string(),
        limit,
    })
}

/// コードがあればリネームする
///
/// コードがない場合は `Ok(None)`。成功時は新しいファイル名を返す。
pub fn rename_with_code(code: Option<&str>, file_path: &Path) -> Result<Option<String>> {
    let Some(code) = code else {
        tracing::warn!(path = %file_path.display(), "コードが見つからないためリネームしません");
        return Ok(None);
    };
    rename_to_code(code, file_path).map(Some)
}
