use super::layout;
use super::state::App;
use super::theme;
use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// 渲染确认视图：列出将要更新的包，放不下时以 "... and N more" 结尾
pub fn render_confirm(f: &mut Frame, app: &App) {
    let areas = layout::frame_areas(f.area());
    layout::render_header(f, areas.header);

    let selected = app.catalog.selected_items();
    layout::render_centered(
        f,
        format!("Update {} package(s)?", selected.len()),
        areas.status,
    );

    let page = app.page_size();
    // 至少列出一个包名
    let shown = if selected.len() > page {
        page.saturating_sub(1).max(1)
    } else {
        selected.len()
    };

    let mut lines: Vec<Line> = selected
        .iter()
        .take(shown)
        .map(|item| {
            Line::from(vec![
                Span::styled(item.source.label(), theme::badge_style(item.source)),
                Span::raw(" "),
                Span::raw(item.name.clone()),
            ])
        })
        .collect();
    if selected.len() > shown {
        lines.push(Line::from(format!("... and {} more", selected.len() - shown)));
    }
    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        areas.page,
    );

    layout::render_buttons(
        f,
        app.phase().buttons(),
        app.phase().button_cursor(),
        |b| app.button_enabled(b),
        areas.buttons,
    );
}

/// 执行期间只绘制一次的等待画面
pub fn render_executing(f: &mut Frame, _app: &App) {
    let areas = layout::frame_areas(f.area());
    layout::render_header(f, areas.header);
    layout::render_centered(f, "Updating packages...", areas.status);
    layout::render_centered(f, "Please wait...", areas.page);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::UpdateCatalog;
    use crate::package_manager::{Source, UpdateItem};
    use crate::tui::input::Action;
    use crate::tui::test_support::buffer_lines;
    use ratatui::{backend::TestBackend, Terminal};

    fn confirming(n: usize) -> App {
        let flatpak = (0..n)
            .map(|i| UpdateItem::new(format!("org.app{i}"), "installed", "2", Source::Flatpak))
            .collect();
        let mut app = App::new(UpdateCatalog::aggregate(vec![], vec![], flatpak), 5);
        app.handle(Action::End);
        app.handle(Action::Down);
        app.handle(Action::Right);
        app.handle(Action::Right);
        app.handle(Action::Activate);
        app
    }

    fn draw(app: &App, render: fn(&mut Frame, &App)) -> Vec<String> {
        let mut term = Terminal::new(TestBackend::new(60, 15)).unwrap();
        term.draw(|f| render(f, app)).unwrap();
        buffer_lines(&term)
    }

    #[test]
    fn lists_all_selected_when_they_fit() {
        let app = confirming(3);
        let lines = draw(&app, render_confirm);

        assert!(lines[3].contains("Update 3 package(s)?"));
        assert!(lines[5].contains("flat org.app0"));
        assert!(lines[7].contains("flat org.app2"));
        assert!(!lines.iter().any(|l| l.contains("more")));
        assert!(lines[13].contains("[Yes, Update]  [Go Back]"));
    }

    #[test]
    fn overflow_ends_with_more_line() {
        let app = confirming(9);
        let lines = draw(&app, render_confirm);

        assert!(lines[8].contains("flat org.app3"));
        assert!(lines[9].contains("... and 5 more"));
        assert!(!lines.iter().any(|l| l.contains("org.app4")));
    }

    #[test]
    fn single_row_page_still_names_a_package() {
        let mut app = confirming(4);
        app.set_page_size(1);
        let mut term = Terminal::new(TestBackend::new(60, 11)).unwrap();
        term.draw(|f| render_confirm(f, &app)).unwrap();
        let lines = buffer_lines(&term);

        assert!(lines[3].contains("Update 4 package(s)?"));
        assert!(lines[5].contains("flat org.app0"));
    }

    #[test]
    fn executing_screen_has_no_buttons() {
        let mut app = confirming(1);
        app.begin_execution();
        let lines = draw(&app, render_executing);

        assert!(lines[3].contains("Updating packages..."));
        assert!(lines[5].contains("Please wait..."));
        assert!(!lines.iter().any(|l| l.contains('[')));
    }
}
