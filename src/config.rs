use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 更新完成后通知状态栏刷新（pkill -<signal> <process>）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    pub enabled: bool,
    pub process: String,
    pub signal: String,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            process: "waybar".to_string(),
            signal: "RTMIN+1".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// AUR 助手候选列表，按优先级排列
    pub aur_helpers: Vec<String>,
    /// 检测更新命令的超时（秒）
    pub discovery_timeout_secs: u64,
    pub notify: NotifyConfig,
    /// 设置后每次更新结束都会写一份结果报告
    pub report_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            aur_helpers: vec!["paru".to_string(), "yay".to_string()],
            discovery_timeout_secs: 60,
            notify: NotifyConfig::default(),
            report_dir: None,
        }
    }
}

impl Config {
    pub fn config_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".config/lian-update/config.toml")
    }

    /// 读取配置文件；文件不存在或解析失败时回退到默认配置
    pub fn load_or_default() -> Self {
        let path = Self::config_path();
        match Self::load_from(&path) {
            Ok(Some(config)) => config,
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("读取配置 {} 失败，使用默认配置: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(Some(config))
    }

    pub fn discovery_timeout(&self) -> Duration {
        Duration::from_secs(self.discovery_timeout_secs)
    }
}
