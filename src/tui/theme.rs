//! 主题色定义，全局统一使用

use crate::package_manager::Source;
use ratatui::style::{Color, Modifier, Style};

/// 标题
pub const TITLE: Color = Color::Cyan;
/// 成功
pub const OK: Color = Color::Green;
/// 部分失败的汇总行
pub const WARN: Color = Color::Yellow;
/// 失败
pub const FAIL: Color = Color::Red;
/// 不可用按钮 / 次要信息
pub const DIM: Color = Color::DarkGray;

/// 来源标记的颜色
pub fn source_color(source: Source) -> Color {
    match source {
        Source::Repo => Color::Green,
        Source::Aur => Color::Yellow,
        Source::Flatpak => Color::Blue,
    }
}

pub fn badge_style(source: Source) -> Style {
    Style::default().fg(source_color(source))
}

pub fn focused_button() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}
