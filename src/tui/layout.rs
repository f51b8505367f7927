use super::state::Button;
use super::theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub const TITLE: &str = "PACKAGE UPDATER";

/// 页面以外固定占用的行数：header(3) + 状态行 + 空行 + 滚动指示 + 空行 + 按钮栏(3)
pub const RESERVED_ROWS: u16 = 10;

/// 列表一页可见的条目数
pub fn page_size(term_height: u16) -> usize {
    term_height.saturating_sub(RESERVED_ROWS).max(1) as usize
}

/// 各模式共用的区域划分
pub struct FrameAreas {
    pub header: Rect,
    pub status: Rect,
    pub page: Rect,
    pub indicator: Rect,
    pub buttons: Rect,
}

pub fn frame_areas(area: Rect) -> FrameAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(area);

    FrameAreas {
        header: chunks[0],
        status: chunks[1],
        page: chunks[3],
        indicator: chunks[4],
        buttons: chunks[6],
    }
}

/// 渲染通用 header
pub fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(TITLE)
        .style(Style::default().fg(theme::TITLE).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    f.render_widget(header, area);
}

/// 单行居中文本
pub fn render_centered<'a>(f: &mut Frame, line: impl Into<Line<'a>>, area: Rect) {
    f.render_widget(Paragraph::new(line.into()).alignment(Alignment::Center), area);
}

/// 按钮栏：聚焦的按钮反色，不可用的按钮置灰
pub fn render_buttons(
    f: &mut Frame,
    buttons: &[Button],
    focused: Option<usize>,
    enabled: impl Fn(Button) -> bool,
    area: Rect,
) {
    let mut spans = Vec::new();
    for (i, button) in buttons.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        let style = if focused == Some(i) {
            theme::focused_button()
        } else if !enabled(*button) {
            Style::default().fg(theme::DIM)
        } else {
            Style::default()
        };
        spans.push(Span::raw("["));
        spans.push(Span::styled(button.label(), style));
        spans.push(Span::raw("]"));
    }

    let bar = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(theme::DIM)))
        .alignment(Alignment::Center);
    f.render_widget(bar, area);
}

/// 按字符数截断
pub fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
