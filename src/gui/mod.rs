//! GUIモジュール - ドラッグ＆ドロップ対応ウィンドウ

mod app;
mod theme;

pub use app::{RenamerApp, run};
