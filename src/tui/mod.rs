mod confirm;
pub mod input;
pub mod layout;
mod results;
mod select;
pub mod state;
mod theme;

use crate::catalog::UpdateCatalog;
use crate::executor::{Executor, Runner};
use crate::report::ReportSaver;
use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use state::{App, Mode, Outcome};
use std::io;
use std::path::PathBuf;

type Term = Terminal<CrosstermBackend<io::Stdout>>;

pub fn run<R: Runner>(
    catalog: UpdateCatalog,
    executor: &Executor<R>,
    report_dir: Option<PathBuf>,
) -> Result<()> {
    // 终端初始化
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let page_size = layout::page_size(terminal.size()?.height);
    let mut app = App::new(catalog, page_size);

    let result = event_loop(&mut terminal, &mut app, executor, report_dir.as_ref());

    // 无论循环是否出错都恢复终端
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop<R: Runner>(
    terminal: &mut Term,
    app: &mut App,
    executor: &Executor<R>,
    report_dir: Option<&PathBuf>,
) -> Result<()> {
    loop {
        let size = terminal.size()?;
        app.set_page_size(layout::page_size(size.height));
        terminal.draw(|f| ui(f, app))?;

        // 阻塞等待下一个按键
        let Event::Key(key) = event::read()? else {
            continue;
        };
        let Some(action) = input::map_key(key) else {
            continue;
        };

        match app.handle(action) {
            Outcome::Continue => {}
            Outcome::Quit => return Ok(()),
            Outcome::Execute => {
                app.begin_execution();
                terminal.draw(|f| ui(f, app))?;

                suspend(terminal)?;
                let selected = app.catalog.selected_items();
                log::info!("开始更新 {} 个包", selected.len());
                let results = executor.execute(&selected);
                finish_banner();
                resume(terminal)?;

                if let Some(dir) = report_dir {
                    match ReportSaver::new(dir.clone()).save(&results) {
                        Ok(path) => log::info!("报告已保存: {}", path.display()),
                        Err(e) => log::error!("保存报告失败: {}", e),
                    }
                }
                app.finish_execution(results);
            }
        }
    }
}

/// 临时退出 TUI，让包管理器的输出直接打印到终端
fn suspend(terminal: &mut Term) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let rule = "=".repeat(60);
    println!("\n{rule}");
    println!("Starting package updates...");
    println!("{rule}\n");
    Ok(())
}

fn finish_banner() {
    let rule = "=".repeat(60);
    println!("\n{rule}");
    println!("Updates complete! Returning to results view...");
    println!("{rule}");
    std::thread::sleep(std::time::Duration::from_secs(1));
}

/// 恢复 TUI
fn resume(terminal: &mut Term) -> Result<()> {
    enable_raw_mode()?;
    execute!(terminal.backend_mut(), EnterAlternateScreen)?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    Ok(())
}

fn ui(f: &mut Frame, app: &App) {
    match app.mode() {
        Mode::Browsing => select::render_select(f, app),
        Mode::Confirming => confirm::render_confirm(f, app),
        Mode::Executing => confirm::render_executing(f, app),
        Mode::Reporting => results::render_results(f, app),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use ratatui::{backend::TestBackend, Terminal};

    /// 把 TestBackend 的缓冲区按行转成字符串
    pub fn buffer_lines(term: &Terminal<TestBackend>) -> Vec<String> {
        let buffer = term.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect()
            })
            .collect()
    }
}
