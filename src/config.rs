//! 設定 - 環境変数（.env）からの読み込み

use crate::error::{RenamerError, Result};
use crate::ocr::DEFAULT_OCR_COMMAND;

/// 重複コードに付ける既定の接頭辞
pub const DEFAULT_DUPLICATE_MARKER: &str = "Error_";

pub const ENV_OCR_ENABLED: &str = "RENAMER_OCR_ENABLED";
pub const ENV_OCR_COMMAND: &str = "RENAMER_OCR_COMMAND";
pub const ENV_OCR_LANGUAGE: &str = "RENAMER_OCR_LANGUAGE";
pub const ENV_DUPLICATE_MARKER: &str = "RENAMER_DUPLICATE_MARKER";

/// アプリケーション設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// コード未検出時にOCRを試すか
    pub ocr_enabled: bool,
    /// OCRコマンド（名前またはパス）
    pub ocr_command: String,
    /// OCR認識言語
    pub ocr_language: Option<String>,
    /// 重複コードの接頭辞
    pub duplicate_marker: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ocr_enabled: true,
            ocr_command: DEFAULT_OCR_COMMAND.to_string(),
            ocr_language: None,
            duplicate_marker: DEFAULT_DUPLICATE_MARKER.to_string(),
        }
    }
}

impl Config {
    /// プロセスの環境変数から読み込む
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意の取得関数から読み込む（未設定・空文字は既定値）
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(value) = get(ENV_OCR_ENABLED) {
            config.ocr_enabled = parse_bool(ENV_OCR_ENABLED, &value)?;
        }
        if let Some(value) = get(ENV_OCR_COMMAND) {
            config.ocr_command = value;
        }
        config.ocr_language = get(ENV_OCR_LANGUAGE);
        if let Some(value) = get(ENV_DUPLICATE_MARKER) {
            config.duplicate_marker = value;
        }

        Ok(config)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(RenamerError::Config {
            key: key.to_string(),
            message: format!("真偽値ではありません: {value}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.ocr_enabled);
        assert_eq!(config.ocr_command, "ocrmypdf");
        assert_eq!(config.duplicate_marker, "Error_");
    }

    #[test]
    fn reads_all_keys() {
        let config = Config::from_lookup(lookup(&[
            (ENV_OCR_ENABLED, "off"),
            (ENV_OCR_COMMAND, "/opt/ocr/bin/ocrmypdf"),
            (ENV_OCR_LANGUAGE, "eng+jpn"),
            (ENV_DUPLICATE_MARKER, "DUP_"),
        ]))
        .unwrap();

        assert!(!config.ocr_enabled);
        assert_eq!(config.ocr_command, "/opt/ocr/bin/ocrmypdf");
        assert_eq!(config.ocr_language.as_deref(), Some("eng+jpn"));
        assert_eq!(config.duplicate_marker, "DUP_");
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup(&[(ENV_DUPLICATE_MARKER, "  ")])).unwrap();
        assert_eq!(config.duplicate_marker, DEFAULT_DUPLICATE_MARKER);
    }

    #[test]
    fn invalid_bool_is_config_error() {
        let err = Config::from_lookup(lookup(&[(ENV_OCR_ENABLED, "maybe")])).unwrap_err();
        assert!(matches!(err, RenamerError::Config { ref key, .. } if key == ENV_OCR_ENABLED));
    }
}
