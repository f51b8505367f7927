//! 按来源分批执行更新，逐个记录结果

use crate::config::NotifyConfig;
use crate::package_manager::parser::last_error_line;
use crate::package_manager::{CommandOutcome, PackageManager, ResultItem, Source, UpdateItem};

/// 外部命令执行接口
pub trait Runner {
    /// stdout 直接输出到终端，捕获 stderr
    fn run(&self, program: &str, args: &[&str]) -> CommandOutcome;
    /// 丢弃全部输出，只关心是否成功
    fn run_quiet(&self, program: &str, args: &[&str]) -> bool;
}

/// 基于 duct 的实际命令执行
pub struct DuctRunner;

impl Runner for DuctRunner {
    fn run(&self, program: &str, args: &[&str]) -> CommandOutcome {
        match duct::cmd(program, args).stderr_capture().unchecked().run() {
            Ok(output) => CommandOutcome {
                success: output.status.success(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            },
            Err(e) => CommandOutcome {
                success: false,
                stderr: e.to_string(),
            },
        }
    }

    fn run_quiet(&self, program: &str, args: &[&str]) -> bool {
        duct::cmd(program, args)
            .stdout_null()
            .stderr_null()
            .unchecked()
            .run()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

pub struct Executor<R: Runner> {
    runner: R,
    package_manager: Option<PackageManager>,
    notify: NotifyConfig,
}

impl<R: Runner> Executor<R> {
    pub fn new(runner: R, package_manager: Option<PackageManager>, notify: NotifyConfig) -> Self {
        Self {
            runner,
            package_manager,
            notify,
        }
    }

    /// 顺序执行所有选中条目的更新
    ///
    /// repo 与 AUR 合并为一批交给 AUR 助手（repo 在前），flatpak 单独一批。
    /// 没有 AUR 助手时第一批整体跳过，不产生任何结果。
    pub fn execute(&self, selected: &[&UpdateItem]) -> Vec<ResultItem> {
        let pacman_batch: Vec<&UpdateItem> = selected
            .iter()
            .filter(|i| i.source == Source::Repo)
            .chain(selected.iter().filter(|i| i.source == Source::Aur))
            .copied()
            .collect();
        let flatpak_batch: Vec<&UpdateItem> = selected
            .iter()
            .filter(|i| i.source == Source::Flatpak)
            .copied()
            .collect();

        let mut results = Vec::with_capacity(selected.len());

        if !pacman_batch.is_empty() {
            match &self.package_manager {
                Some(pm) => {
                    println!("\n[Syncing package database...]\n");
                    if !self.runner.run_quiet(pm.name(), &pm.sync_args()) {
                        log::warn!("{} -Sy 失败，继续逐个更新", pm.name());
                    }
                    self.run_batch(&pacman_batch, &mut results, |item| {
                        (pm.name().to_string(), pm.upgrade_args(&item.name).map(str::to_string).to_vec())
                    });
                }
                None => {
                    log::warn!("未检测到 AUR 助手，跳过 {} 个 repo/AUR 包", pacman_batch.len());
                }
            }
        }

        if !flatpak_batch.is_empty() {
            self.run_batch(&flatpak_batch, &mut results, |item| {
                (
                    "flatpak".to_string(),
                    vec!["update".to_string(), "-y".to_string(), item.name.clone()],
                )
            });
        }

        self.notify_status_bar();
        results
    }

    fn run_batch(
        &self,
        batch: &[&UpdateItem],
        results: &mut Vec<ResultItem>,
        command_for: impl Fn(&UpdateItem) -> (String, Vec<String>),
    ) {
        let total = batch.len();
        for (i, &item) in batch.iter().enumerate() {
            println!("\n[{}/{}] Updating {} ({})...\n", i + 1, total, item.name, item.source);
            log::debug!("{}: {} -> {}", item.name, item.current_version, item.new_version);

            let (program, args) = command_for(item);
            let args: Vec<&str> = args.iter().map(String::as_str).collect();
            let outcome = self.runner.run(&program, &args);

            if outcome.success {
                results.push(ResultItem::succeeded(item));
            } else {
                let error = last_error_line(&outcome.stderr);
                println!("  FAILED: {}", error);
                log::info!("{} 更新失败: {}", item.name, error);
                results.push(ResultItem::failed(item, error));
            }
        }
    }

    /// 通知状态栏刷新，失败忽略
    pub fn notify_status_bar(&self) {
        notify_status_bar(&self.runner, &self.notify);
    }
}

pub fn notify_status_bar(runner: &impl Runner, notify: &NotifyConfig) {
    if !notify.enabled {
        return;
    }
    let signal = format!("-{}", notify.signal);
    if !runner.run_quiet("pkill", &[signal.as_str(), notify.process.as_str()]) {
        log::debug!("pkill {} {} 未生效", signal, notify.process);
    }
}
