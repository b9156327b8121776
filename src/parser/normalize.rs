//! サブ番号の正規化

use std::ops::Range;

/// サブ番号の位置（先頭の英字を1文字目として5〜6文字目）
pub const SUB_ID_RANGE: Range<usize> = 4..6;

/// サブ番号が "00" 以外なら "00" に置き換える
///
/// 100以上のサブサンプル番号は管理対象外のため切り捨てる。
/// 入力はパターンにマッチ済み（ASCIIのみ）であること。
pub fn normalize_sub_id(code: &str) -> String {
    match code.get(SUB_ID_RANGE) {
        Some(sub) if sub != "00" => {
            let mut fixed = String::with_capacity(code.len());
            fixed.push_str(&code[..SUB_ID_RANGE.start]);
            fixed.push_str("00");
            fixed.push_str(&code[SUB_ID_RANGE.end..]);
            fixed
        }
        _ => code.to_string(),
    }
}
