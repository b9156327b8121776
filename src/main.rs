//! サンプルコード リネーマー - メインエントリポイント

use anyhow::{Context, Result};
use clap::Parser;
use sample_code_renamer::batch::{BatchController, BatchSummary, parse_drop_payload};
use sample_code_renamer::config::Config;
use std::path::PathBuf;

/// PDF内のサンプルコードでファイル名を変更する
///
/// パスを指定しない場合はGUIを起動する。
#[derive(Debug, Parser)]
#[command(name = "sample_code_renamer", version, about)]
struct Cli {
    /// 処理するPDFファイル
    paths: Vec<PathBuf>,

    /// ドロップ形式のパス一覧 (例: "{C:/a b.pdf} C:/c.pdf")
    #[arg(long)]
    payload: Option<String>,

    /// OCRによる再試行を行わない
    #[arg(long)]
    no_ocr: bool,

    /// OCRコマンド（名前またはパス）
    #[arg(long)]
    ocr_command: Option<String>,

    /// OCR認識言語 (例: eng+jpn)
    #[arg(long)]
    ocr_language: Option<String>,

    /// 重複コードに付ける接頭辞
    #[arg(long)]
    marker: Option<String>,

    /// 結果をJSONで出力
    #[arg(long)]
    json: bool,

    /// 詳細ログ
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// 環境変数の設定にコマンドライン引数を上書き
    fn apply(&self, mut config: Config) -> Config {
        if self.no_ocr {
            config.ocr_enabled = false;
        }
        if let Some(ref command) = self.ocr_command {
            config.ocr_command = command.clone();
        }
        if let Some(ref language) = self.ocr_language {
            config.ocr_language = Some(language.clone());
        }
        if let Some(ref marker) = self.marker {
            config.duplicate_marker = marker.clone();
        }
        config
    }

    fn input_paths(&self) -> Vec<PathBuf> {
        let mut paths = self.paths.clone();
        if let Some(ref payload) = self.payload {
            paths.extend(parse_drop_payload(payload));
        }
        paths
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ロギング初期化
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    // 環境変数の読み込み
    dotenvy::dotenv().ok();
    let config = cli.apply(Config::from_env().context("設定の読み込みに失敗")?);

    let paths = cli.input_paths();
    if paths.is_empty() {
        return sample_code_renamer::gui::run(config);
    }

    let mut controller = BatchController::from_config(&config);
    let summary = controller.process_batch(&paths);

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("結果のJSON変換に失敗")?
        );
    } else {
        print_summary(&summary);
    }

    if summary.failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn print_summary(summary: &BatchSummary) {
    for report in &summary.reports {
        let original = report.original.display();
        match report.result.as_ref().and_then(|r| r.new_name()) {
            Some(new_name) => println!("✓ {original} → {new_name}"),
            None => println!(
                "✗ {original}: {}",
                report.failure_reason().unwrap_or_default()
            ),
        }
    }
    println!("{}", summary.message());
}
