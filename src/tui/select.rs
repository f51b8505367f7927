use super::layout;
use super::state::App;
use super::theme;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// 名称列以外每行占用的宽度
const ROW_CHROME: usize = 25;

/// 渲染浏览视图
pub fn render_select(f: &mut Frame, app: &App) {
    let areas = layout::frame_areas(f.area());
    layout::render_header(f, areas.header);

    let status = format!(
        "Selected: {}/{}",
        app.catalog.selected_count(),
        app.catalog.len()
    );
    layout::render_centered(f, status, areas.status);

    let max_name = (areas.page.width as usize).saturating_sub(ROW_CHROME).max(1);
    let list_focused = app.phase().list_focused();
    let rows: Vec<Line> = app
        .catalog
        .items()
        .iter()
        .enumerate()
        .skip(app.scroll())
        .take(app.page_size())
        .map(|(idx, item)| {
            let is_cursor = list_focused && idx == app.cursor();
            let arrow = if is_cursor { ">" } else { " " };
            let checkbox = if item.selected { "[x]" } else { "[ ]" };
            let name_style = if is_cursor {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::raw(format!(" {arrow} {checkbox} ")),
                Span::styled(
                    format!("{:<4}", item.source.label()),
                    theme::badge_style(item.source),
                ),
                Span::raw(" "),
                Span::styled(layout::truncate(&item.name, max_name), name_style),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(rows), areas.page);

    layout::render_centered(f, scroll_indicator(app), areas.indicator);

    layout::render_buttons(
        f,
        app.phase().buttons(),
        app.phase().button_cursor(),
        |b| app.button_enabled(b),
        areas.buttons,
    );
}

/// 列表超过一页时显示滚动百分比
fn scroll_indicator(app: &App) -> String {
    let total = app.catalog.len();
    let page = app.page_size();
    if total > page {
        let pct = app.scroll() as f64 / (total - page).max(1) as f64 * 100.0;
        format!("─── {:.0}% ───", pct)
    } else {
        "─".repeat(20)
    }
}
