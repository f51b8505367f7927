//! 包管理器模块：对 checkupdates / paru / yay / flatpak 的封装

pub mod parser;
pub mod sources;
pub mod types;

pub use types::{CommandOutcome, ResultItem, Source, UpdateItem};

use anyhow::{anyhow, Result};
use std::time::Duration;
use thiserror::Error;

/// 外部命令执行失败的原因
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("找不到命令: {0}")]
    NotFound(String),
    #[error("{program} 超时（{}s）", .timeout.as_secs())]
    Timeout { program: String, timeout: Duration },
    #[error("执行失败: {0}")]
    Io(#[from] std::io::Error),
}

/// 检测到的 AUR 助手，整个会话只使用这一个
#[derive(Debug, Clone, PartialEq)]
pub struct PackageManager {
    pub command: String,
}

impl PackageManager {
    /// 按优先级在 PATH 中查找 AUR 助手
    pub fn detect(candidates: &[String]) -> Result<Self> {
        Self::detect_with(candidates, |name| which::which(name).is_ok())
    }

    fn detect_with(candidates: &[String], exists: impl Fn(&str) -> bool) -> Result<Self> {
        candidates
            .iter()
            .find(|name| exists(name))
            .map(|name| PackageManager {
                command: name.clone(),
            })
            .ok_or_else(|| anyhow!("No AUR helper found ({})", candidates.join("/")))
    }

    pub fn name(&self) -> &str {
        &self.command
    }

    /// 列出 AUR 更新
    pub fn list_updates_args(&self) -> [&'static str; 1] {
        ["-Qum"]
    }

    /// 同步数据库
    pub fn sync_args(&self) -> [&'static str; 1] {
        ["-Sy"]
    }

    /// 更新单个包
    pub fn upgrade_args<'a>(&self, name: &'a str) -> [&'a str; 4] {
        ["-S", "--needed", "--noconfirm", name]
    }
}
