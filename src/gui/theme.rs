//! テーマ設定 - ダークテーマ

use egui::{Color32, CornerRadius, Stroke, Style, Visuals};

/// カラーパレット
pub struct Colors;

impl Colors {
    pub const BG_DARK: Color32 = Color32::from_rgb(14, 18, 24);
    pub const BG_CARD: Color32 = Color32::from_rgb(24, 30, 40);
    pub const BG_HOVER: Color32 = Color32::from_rgb(34, 44, 60);
    pub const ACCENT: Color32 = Color32::from_rgb(86, 156, 214);
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 240);
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(150, 160, 180);
    pub const SUCCESS: Color32 = Color32::from_rgb(74, 222, 128);
    /// 重複コードで接頭辞付きリネームしたもの
    pub const WARNING: Color32 = Color32::from_rgb(250, 204, 21);
    pub const ERROR: Color32 = Color32::from_rgb(248, 113, 113);
    pub const BORDER: Color32 = Color32::from_rgb(52, 64, 84);
}

/// ダークテーマのスタイルを作成
pub fn dark_theme() -> Style {
    let mut visuals = Visuals::dark();

    visuals.panel_fill = Colors::BG_DARK;
    visuals.window_fill = Colors::BG_CARD;
    visuals.extreme_bg_color = Colors::BG_DARK;
    visuals.faint_bg_color = Colors::BG_CARD;

    let rounded = CornerRadius::same(6);
    for (widget, fill) in [
        (&mut visuals.widgets.noninteractive, Colors::BG_CARD),
        (&mut visuals.widgets.inactive, Colors::BG_CARD),
        (&mut visuals.widgets.hovered, Colors::BG_HOVER),
        (&mut visuals.widgets.active, Colors::ACCENT),
    ] {
        widget.bg_fill = fill;
        widget.fg_stroke = Stroke::new(1.0, Colors::TEXT_PRIMARY);
        widget.corner_radius = rounded;
    }
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, Colors::TEXT_SECONDARY);

    visuals.selection.bg_fill = Colors::ACCENT.gamma_multiply(0.5);
    visuals.selection.stroke = Stroke::new(1.0, Colors::ACCENT);

    Style {
        visuals,
        ..Style::default()
    }
}
