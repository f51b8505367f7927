//! 各来源的更新检测
//!
//! 任何失败（命令不存在、超时、无法解析）都当作“该来源没有更新”，
//! 只记录日志，不向上传播。

use super::parser::{parse_aur_output, parse_flatpak_output, parse_repo_output};
use super::types::UpdateItem;
use super::{CommandError, PackageManager};
use crate::catalog::UpdateCatalog;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// 在超时限制内执行列表命令，返回 stdout
///
/// 非零退出码不算错误：checkupdates / paru 在没有更新时会以非零码退出，
/// 是否有内容交给解析器判断。
pub async fn run_listing(
    program: &str,
    args: &[&str],
    timeout: Duration,
) -> Result<String, CommandError> {
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CommandError::NotFound(program.to_string()),
            _ => CommandError::Io(e),
        })?;

    let output = tokio::time::timeout(timeout, child.wait_with_output())
        .await
        .map_err(|_| CommandError::Timeout {
            program: program.to_string(),
            timeout,
        })??;

    if !output.status.success() {
        log::debug!("{} {:?} 退出码 {:?}", program, args, output.status.code());
    }
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

fn or_empty(label: &str, result: Result<Vec<UpdateItem>, CommandError>) -> Vec<UpdateItem> {
    match result {
        Ok(items) => {
            log::info!("{}: {} 个可用更新", label, items.len());
            items
        }
        Err(e) => {
            log::debug!("{} 检测失败，视为无更新: {}", label, e);
            Vec::new()
        }
    }
}

/// 官方仓库更新（checkupdates）
pub async fn fetch_repo(timeout: Duration) -> Vec<UpdateItem> {
    let result = run_listing("checkupdates", &[], timeout)
        .await
        .map(|out| parse_repo_output(&out));
    or_empty("repo", result)
}

/// AUR 更新（<helper> -Qum）
pub async fn fetch_aur(pm: &PackageManager, timeout: Duration) -> Vec<UpdateItem> {
    let result = run_listing(&pm.command, &pm.list_updates_args(), timeout)
        .await
        .map(|out| parse_aur_output(&out));
    or_empty("aur", result)
}

/// Flatpak 更新
pub async fn fetch_flatpak(timeout: Duration) -> Vec<UpdateItem> {
    if which::which("flatpak").is_err() {
        return Vec::new();
    }
    let result = run_listing(
        "flatpak",
        &["remote-ls", "--updates", "--columns=application,version"],
        timeout,
    )
    .await
    .map(|out| parse_flatpak_output(&out));
    or_empty("flatpak", result)
}

/// 没有 AUR 助手时不执行任何命令
async fn fetch_aur_if_detected(pm: Option<&PackageManager>, timeout: Duration) -> Vec<UpdateItem> {
    match pm {
        Some(pm) => fetch_aur(pm, timeout).await,
        None => Vec::new(),
    }
}

/// 同时检测三个来源，按 repo → AUR → flatpak 的顺序汇总
pub async fn discover(pm: Option<&PackageManager>, timeout: Duration) -> UpdateCatalog {
    let (repo, aur, flatpak) = tokio::join!(
        fetch_repo(timeout),
        fetch_aur_if_detected(pm, timeout),
        fetch_flatpak(timeout)
    );
    UpdateCatalog::aggregate(repo, aur, flatpak)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package_manager::Source;

    #[tokio::test]
    async fn missing_program_is_not_found() {
        let err = run_listing("lian-update-no-such-binary", &[], Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::NotFound(_)));
    }

    #[tokio::test]
    async fn slow_program_times_out() {
        let err = run_listing("sleep", &["5"], Duration::from_millis(100))
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Timeout { .. }));
    }

    #[tokio::test]
    async fn non_zero_exit_still_returns_stdout() {
        let out = run_listing(
            "sh",
            &["-c", "echo 'pkgA 1.0 -> 1.1'; exit 2"],
            Duration::from_secs(5),
        )
        .await
        .unwrap();
        assert_eq!(parse_repo_output(&out).len(), 1);
    }

    fn helper(command: &str) -> PackageManager {
        PackageManager {
            command: command.to_string(),
        }
    }

    #[tokio::test]
    async fn missing_helper_yields_no_items() {
        let items = fetch_aur(&helper("lian-update-no-such-binary"), Duration::from_secs(5)).await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn failed_listing_yields_no_items() {
        // sleep 不认识 -Qum，立即失败
        let items = fetch_aur(&helper("sleep"), Duration::from_millis(100)).await;
        assert!(items.is_empty());
    }

    #[test]
    fn listing_errors_become_empty() {
        let timeout = CommandError::Timeout {
            program: "checkupdates".to_string(),
            timeout: Duration::from_millis(100),
        };
        assert!(or_empty("repo", Err(timeout)).is_empty());
        assert!(or_empty("aur", Err(CommandError::NotFound("paru".to_string()))).is_empty());

        let ok = vec![UpdateItem::new("linux", "1", "2", Source::Repo)];
        assert_eq!(or_empty("repo", Ok(ok)).len(), 1);
    }

    #[tokio::test]
    async fn aur_is_skipped_without_helper() {
        let items = fetch_aur_if_detected(None, Duration::from_secs(5)).await;
        assert!(items.is_empty());

        let catalog = discover(None, Duration::from_millis(100)).await;
        assert!(catalog
            .items()
            .iter()
            .all(|item| item.source != Source::Aur));
    }
}
