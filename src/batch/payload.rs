//! ドロップイベントのパス一覧の分解

use std::path::PathBuf;

/// 波括弧区切りのパス一覧を分解する
///
/// 空白を含むパスは `{C:/My Files/a.pdf}` のように波括弧で囲まれる。
/// 囲みの中の空白は区切りとして扱わない。
pub fn parse_drop_payload(payload: &str) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for c in payload.chars() {
        match c {
            '{' => {
                if depth > 0 {
                    current.push(c);
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth > 0 {
                    current.push(c);
                } else {
                    paths.push(PathBuf::from(std::mem::take(&mut current)));
                }
            }
            c if c.is_whitespace() && depth == 0 => {
                if !current.is_empty() {
                    paths.push(PathBuf::from(std::mem::take(&mut current)));
                }
            }
            _ => current.push(c),
        }
    }

    // 閉じ括弧のない末尾もパスとして扱う
    if !current.is_empty() {
        paths.push(PathBuf::from(current));
    }

    paths.retain(|p| !p.as_os_str().is_empty());
    paths
}
