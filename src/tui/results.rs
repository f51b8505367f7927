use super::layout;
use super::state::App;
use super::theme;
use crate::package_manager::ResultItem;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// 错误信息之外每行占用的宽度（另加包名长度）
const ERROR_CHROME: usize = 20;

/// 渲染结果视图：成功在前，失败在后
pub fn render_results(f: &mut Frame, app: &App) {
    let areas = layout::frame_areas(f.area());
    layout::render_header(f, areas.header);

    let (successes, failures): (Vec<&ResultItem>, Vec<&ResultItem>) =
        app.results().iter().partition(|r| r.success);

    let summary = if failures.is_empty() {
        Span::styled(
            format!("All {} packages updated!", successes.len()),
            Style::default().fg(theme::OK).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            format!("{} succeeded, {} failed", successes.len(), failures.len()),
            Style::default().fg(theme::WARN).add_modifier(Modifier::BOLD),
        )
    };
    layout::render_centered(f, summary, areas.status);

    let width = areas.page.width as usize;
    let lines: Vec<Line> = successes
        .iter()
        .map(|r| success_line(r))
        .chain(failures.iter().map(|r| failure_line(r, width)))
        .take(app.page_size())
        .collect();
    f.render_widget(Paragraph::new(lines), areas.page);

    layout::render_buttons(
        f,
        app.phase().buttons(),
        app.phase().button_cursor(),
        |b| app.button_enabled(b),
        areas.buttons,
    );
}

fn success_line(r: &ResultItem) -> Line<'static> {
    Line::from(vec![
        Span::raw(" "),
        Span::styled("✓", Style::default().fg(theme::OK)),
        Span::raw(format!(" [{}] {}", r.source.label(), r.name)),
    ])
}

fn failure_line(r: &ResultItem, width: usize) -> Line<'static> {
    let max_error = width.saturating_sub(r.name.chars().count() + ERROR_CHROME);
    Line::from(vec![
        Span::raw(" "),
        Span::styled("✗", Style::default().fg(theme::FAIL)),
        Span::raw(format!(
            " [{}] {}: {}",
            r.source.label(),
            r.name,
            layout::truncate(&r.error, max_error)
        )),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::UpdateCatalog;
    use crate::package_manager::Source;
    use crate::tui::test_support::buffer_lines;
    use ratatui::{backend::TestBackend, Terminal};

    fn result(name: &str, source: Source, error: Option<&str>) -> ResultItem {
        ResultItem {
            name: name.to_string(),
            source,
            success: error.is_none(),
            error: error.unwrap_or_default().to_string(),
        }
    }

    fn draw(results: Vec<ResultItem>, width: u16) -> Vec<String> {
        let mut app = App::new(UpdateCatalog::default(), 5);
        app.finish_execution(results);
        let mut term = Terminal::new(TestBackend::new(width, 15)).unwrap();
        term.draw(|f| render_results(f, &app)).unwrap();
        buffer_lines(&term)
    }

    #[test]
    fn all_successful_summary() {
        let lines = draw(
            vec![
                result("linux", Source::Repo, None),
                result("paru-bin", Source::Aur, None),
            ],
            60,
        );
        assert!(lines[3].contains("All 2 packages updated!"));
        assert!(lines[5].starts_with(" ✓ [repo] linux"));
        assert!(lines[6].starts_with(" ✓ [AUR] paru-bin"));
        assert!(lines[13].contains("[Exit]"));
    }

    #[test]
    fn failures_render_after_successes() {
        let lines = draw(
            vec![
                result("linux", Source::Repo, Some("error: failed to commit transaction")),
                result("mesa", Source::Repo, None),
                result("org.example.App", Source::Flatpak, Some("error: network unreachable")),
            ],
            80,
        );
        assert!(lines[3].contains("1 succeeded, 2 failed"));
        assert!(lines[5].starts_with(" ✓ [repo] mesa"));
        assert!(lines[6].starts_with(" ✗ [repo] linux: error: failed to commit transaction"));
        assert!(lines[7].starts_with(" ✗ [flat] org.example.App: error: network unreachable"));
    }

    #[test]
    fn long_errors_are_truncated_to_width() {
        let lines = draw(
            vec![result("pkg", Source::Aur, Some("error: this message is far too long to fit"))],
            40,
        );
        // 40 - 3 - 20 = 17
        assert!(lines[5].starts_with(" ✗ [AUR] pkg: error: this messa "));
    }

    #[test]
    fn results_are_capped_at_page_height() {
        let results = (0..8)
            .map(|i| result(&format!("pkg{i}"), Source::Repo, None))
            .collect();
        let lines = draw(results, 60);
        assert!(lines[9].contains("pkg4"));
        assert!(!lines.iter().any(|l| l.contains("pkg5")));
    }
}
