//! メインアプリケーションウィンドウ

use crate::batch::{BatchController, BatchSummary, FileReport};
use crate::config::Config;
use crate::pdf::is_pdf;
use anyhow::Result;
use eframe::egui;
use egui::{CentralPanel, RichText, Vec2};
use rfd::{MessageButtons, MessageDialog, MessageLevel};
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;

use super::theme::{Colors, dark_theme};

/// ワーカーからの通知
enum WorkerEvent {
    /// 1バッチ分の処理完了
    Finished(BatchSummary),
}

/// バッチ処理ワーカーを起動
///
/// コントローラーはワーカーが保持し続けるため、既出コードはドロップをまたいで共有される。
fn spawn_worker(mut controller: BatchController) -> (Sender<Vec<PathBuf>>, Receiver<WorkerEvent>) {
    let (job_tx, job_rx) = channel::<Vec<PathBuf>>();
    let (event_tx, event_rx) = channel();

    thread::spawn(move || {
        for files in job_rx {
            let summary = controller.process_batch(&files);
            if event_tx.send(WorkerEvent::Finished(summary)).is_err() {
                break;
            }
        }
    });

    (job_tx, event_rx)
}

/// アプリケーション状態
pub struct RenamerApp {
    /// ジョブ送信チャンネル
    job_tx: Sender<Vec<PathBuf>>,
    /// 結果受信チャンネル
    event_rx: Receiver<WorkerEvent>,
    /// OCRが有効なのにコマンドが見つからない
    ocr_missing: bool,
    /// 直近バッチの結果
    results: Vec<FileReport>,
    /// 処理中かどうか
    is_processing: bool,
    /// ステータスメッセージ
    status: String,
    /// 最後に処理したフォルダ
    last_folder: Option<PathBuf>,
}

impl RenamerApp {
    pub fn new(config: &Config) -> Self {
        let controller = BatchController::from_config(config);
        let ocr_missing = config.ocr_enabled && !controller.has_ocr();
        let (job_tx, event_rx) = spawn_worker(controller);

        Self {
            job_tx,
            event_rx,
            ocr_missing,
            results: Vec::new(),
            is_processing: false,
            status: "PDFファイルをドロップして開始".to_string(),
            last_folder: None,
        }
    }

    /// ファイルをワーカーへ送る
    fn process_files(&mut self, files: Vec<PathBuf>) {
        let pdf_count = files.iter().filter(|p| is_pdf(p)).count();
        if pdf_count == 0 {
            self.status = "PDFファイルが見つかりません".to_string();
            return;
        }

        if let Some(first) = files.iter().find(|p| is_pdf(p)) {
            self.last_folder = first.parent().map(|p| p.to_path_buf());
        }

        if self.job_tx.send(files).is_err() {
            self.status = "処理スレッドが停止しています".to_string();
            return;
        }

        self.results.clear();
        self.is_processing = true;
        self.status = format!("{pdf_count} 個のファイルを処理中...");
    }

    /// 結果を受信
    fn receive_results(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                WorkerEvent::Finished(summary) => {
                    self.is_processing = false;
                    self.status = format!(
                        "完了: {} 件成功, {} 件失敗",
                        summary.succeeded, summary.failed
                    );
                    show_summary_dialog(&summary);
                    self.results = summary.reports;
                }
            }
        }
    }
}

/// 結果をモーダルダイアログで表示
fn show_summary_dialog(summary: &BatchSummary) {
    let level = if summary.failed == 0 {
        MessageLevel::Info
    } else {
        MessageLevel::Warning
    };

    MessageDialog::new()
        .set_level(level)
        .set_title("結果")
        .set_description(summary.message())
        .set_buttons(MessageButtons::Ok)
        .show();
}

impl eframe::App for RenamerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.receive_results();

        // ドロップされたファイルを処理
        if !ctx.input(|i| i.raw.dropped_files.is_empty()) {
            let files: Vec<PathBuf> = ctx.input(|i| {
                i.raw.dropped_files
                    .iter()
                    .filter_map(|f| f.path.clone())
                    .collect()
            });

            if !files.is_empty() && !self.is_processing {
                self.process_files(files);
            }
        }

        // 処理中は再描画を要求
        if self.is_processing {
            ctx.request_repaint();
        }

        CentralPanel::default().show(ctx, |ui| {
            ui.spacing_mut().item_spacing = Vec2::new(8.0, 12.0);

            ui.horizontal(|ui| {
                ui.heading(RichText::new("サンプルコード リネーマー")
                    .size(28.0)
                    .color(Colors::TEXT_PRIMARY));

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.add_enabled(
                        self.last_folder.is_some(),
                        egui::Button::new("📁 フォルダを開く")
                    ).clicked() {
                        if let Some(ref folder) = self.last_folder {
                            let _ = open::that(folder);
                        }
                    }
                });
            });

            ui.label(RichText::new("PDFをドロップ → サンプルコードを検出 → ファイル名を変更")
                .size(14.0)
                .color(Colors::TEXT_SECONDARY));

            ui.add_space(10.0);

            if self.ocr_missing {
                ui.group(|ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("⚠").size(24.0).color(Colors::ERROR));
                        ui.label(RichText::new("ocrmypdf が見つかりません。スキャンPDFは処理できません")
                            .color(Colors::ERROR));
                    });
                });
                ui.add_space(10.0);
            }

            // ドロップゾーン
            let is_hovering = !ui.ctx().input(|i| i.raw.hovered_files.is_empty());
            let frame_color = if is_hovering { Colors::ACCENT } else { Colors::BORDER };
            let bg_color = if is_hovering { Colors::BG_HOVER } else { Colors::BG_CARD };

            let drop_zone_response = egui::Frame::new()
                .fill(bg_color)
                .stroke(egui::Stroke::new(2.0, frame_color))
                .corner_radius(16.0)
                .inner_margin(40.0)
                .show(ui, |ui| {
                    ui.set_min_size(Vec2::new(ui.available_width(), 140.0));
                    ui.vertical_centered(|ui| {
                        let icon = if is_hovering { "📥" } else { "📄" };
                        ui.label(RichText::new(icon).size(48.0));

                        ui.label(RichText::new("PDFファイルをここにドロップ")
                            .size(20.0)
                            .color(Colors::TEXT_PRIMARY));

                        ui.label(RichText::new("または、クリックしてファイルを選択")
                            .size(14.0)
                            .color(Colors::TEXT_SECONDARY));
                    });
                });

            // クリックでファイル選択
            if drop_zone_response.response.interact(egui::Sense::click()).clicked()
                && !self.is_processing
            {
                if let Some(files) = rfd::FileDialog::new()
                    .add_filter("PDF files", &["pdf"])
                    .pick_files()
                {
                    self.process_files(files);
                }
            }

            if self.is_processing {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(RichText::new(&self.status).color(Colors::ACCENT));
                });
            }

            ui.add_space(10.0);

            ui.horizontal(|ui| {
                ui.label(RichText::new("処理結果")
                    .size(16.0)
                    .color(Colors::TEXT_PRIMARY));

                if !self.results.is_empty() {
                    let success_count = self.results.iter().filter(|r| r.success()).count();
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(RichText::new(format!("{}/{} 件成功", success_count, self.results.len()))
                            .size(13.0)
                            .color(Colors::TEXT_SECONDARY));
                    });
                }
            });

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .max_height(ui.available_height() - 60.0)
                .show(ui, |ui| {
                    for report in &self.results {
                        ui.add_space(4.0);
                        result_row(ui, report);
                    }
                });

            // ステータスバー
            ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
                egui::Frame::new()
                    .fill(Colors::BG_CARD)
                    .inner_margin(egui::Margin::symmetric(20, 15))
                    .show(ui, |ui| {
                        ui.label(RichText::new(&self.status)
                            .size(13.0)
                            .color(Colors::TEXT_SECONDARY));
                    });
            });
        });
    }
}

/// 結果1件の表示
fn result_row(ui: &mut egui::Ui, report: &FileReport) {
    let original = report
        .original
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| report.original.display().to_string());

    egui::Frame::new()
        .fill(Colors::BG_CARD)
        .corner_radius(12.0)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                let is_duplicate = matches!(
                    report.result,
                    Some(crate::batch::ProcessingResult::Duplicate(_))
                );
                let (icon, color) = match (report.success(), is_duplicate) {
                    (true, false) => ("✓", Colors::SUCCESS),
                    (true, true) => ("!", Colors::WARNING),
                    (false, _) => ("✗", Colors::ERROR),
                };
                ui.label(RichText::new(icon).size(16.0).color(color));

                ui.vertical(|ui| {
                    ui.label(RichText::new(original)
                        .size(13.0)
                        .color(Colors::TEXT_SECONDARY));

                    if let Some(new_name) = report.result.as_ref().and_then(|r| r.new_name()) {
                        ui.label(RichText::new(format!("→ {new_name}"))
                            .size(14.0)
                            .color(Colors::TEXT_PRIMARY));
                    } else if let Some(reason) = report.failure_reason() {
                        ui.label(RichText::new(format!("エラー: {reason}"))
                            .size(13.0)
                            .color(Colors::ERROR));
                    }
                });
            });
        });
}

/// アプリケーションを起動
pub fn run(config: Config) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([560.0, 520.0])
            .with_min_inner_size([400.0, 360.0])
            .with_title("Multi PDF Renamer")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Multi PDF Renamer",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_style(dark_theme());

            // 日本語フォントを設定
            #[cfg(windows)]
            {
                let mut fonts = egui::FontDefinitions::default();
                if let Ok(font_data) = std::fs::read("C:\\Windows\\Fonts\\YuGothM.ttc") {
                    fonts.font_data.insert(
                        "yu_gothic".to_owned(),
                        egui::FontData::from_owned(font_data).into(),
                    );
                    fonts.families
                        .entry(egui::FontFamily::Proportional)
                        .or_default()
                        .insert(0, "yu_gothic".to_owned());
                }
                cc.egui_ctx.set_fonts(fonts);
            }

            Ok(Box::new(RenamerApp::new(&config)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("アプリケーションエラー: {}", e))
}
