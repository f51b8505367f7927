//! PackageManager 相关数据类型定义

use std::fmt;

/// 更新来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Repo,
    Aur,
    Flatpak,
}

impl Source {
    /// 列表中显示的来源标记
    pub fn label(self) -> &'static str {
        match self {
            Source::Repo => "repo",
            Source::Aur => "AUR",
            Source::Flatpak => "flat",
        }
    }
}

/// 进度输出用的完整来源名
impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Source::Repo => "repo",
            Source::Aur => "AUR",
            Source::Flatpak => "flatpak",
        })
    }
}

/// 一条可用更新
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateItem {
    pub name: String,
    pub current_version: String,
    pub new_version: String,
    pub source: Source,
    pub selected: bool,
}

impl UpdateItem {
    pub fn new(
        name: impl Into<String>,
        current_version: impl Into<String>,
        new_version: impl Into<String>,
        source: Source,
    ) -> Self {
        Self {
            name: name.into(),
            current_version: current_version.into(),
            new_version: new_version.into(),
            source,
            selected: true,
        }
    }
}

/// 单个包的更新结果
#[derive(Debug, Clone, PartialEq)]
pub struct ResultItem {
    pub name: String,
    pub source: Source,
    pub success: bool,
    /// 成功时为空
    pub error: String,
}

impl ResultItem {
    pub fn succeeded(item: &UpdateItem) -> Self {
        Self {
            name: item.name.clone(),
            source: item.source,
            success: true,
            error: String::new(),
        }
    }

    pub fn failed(item: &UpdateItem, error: String) -> Self {
        Self {
            name: item.name.clone(),
            source: item.source,
            success: false,
            error,
        }
    }
}

/// 更新命令的执行结果（stdout 直接输出到终端，只保留 stderr）
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutcome {
    pub success: bool,
    pub stderr: String,
}
