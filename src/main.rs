mod catalog;
mod config;
mod executor;
mod package_manager;
mod report;
mod tui;

use anyhow::Result;
use executor::{DuctRunner, Executor};
use package_manager::PackageManager;
use std::io::{self, BufRead};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();

    let config = config::Config::load_or_default();

    println!("Package Updater");
    println!();
    println!("Checking for updates...");

    // 检测 AUR 助手，找不到只提示，不退出
    let package_manager = match PackageManager::detect(&config.aur_helpers) {
        Ok(pm) => {
            log::info!("使用 AUR 助手: {}", pm.name());
            Some(pm)
        }
        Err(e) => {
            println!("Warning: {}", e);
            None
        }
    };

    println!("  Checking official repos...");
    if package_manager.is_some() {
        println!("  Checking AUR...");
    }
    println!("  Checking Flatpak...");
    let catalog = package_manager::sources::discover(
        package_manager.as_ref(),
        config.discovery_timeout(),
    )
    .await;

    let executor = Executor::new(DuctRunner, package_manager, config.notify.clone());

    if catalog.is_empty() {
        println!();
        println!("No updates available!");
        println!();
        println!("Press Enter to exit...");
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        executor.notify_status_bar();
        return Ok(());
    }

    println!("  Found {} updates.", catalog.len());
    println!();

    tui::run(catalog, &executor, config.report_dir.clone())?;

    Ok(())
}
