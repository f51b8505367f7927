use crate::package_manager::ResultItem;
use anyhow::Result;
use chrono::{DateTime, Local};
use std::fs;
use std::path::PathBuf;

/// 将一次更新的结果写成纯文本报告
pub struct ReportSaver {
    base_dir: PathBuf,
}

impl ReportSaver {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn save(&self, results: &[ResultItem]) -> Result<PathBuf> {
        self.save_at(results, Local::now())
    }

    fn save_at(&self, results: &[ResultItem], now: DateTime<Local>) -> Result<PathBuf> {
        // 目录结构: YYYY/MM/DD/
        let dir = self
            .base_dir
            .join(now.format("%Y").to_string())
            .join(now.format("%m").to_string())
            .join(now.format("%d").to_string());
        fs::create_dir_all(&dir)?;

        // 文件名: HH-MM.txt
        let filepath = dir.join(now.format("%H-%M.txt").to_string());
        fs::write(&filepath, render_report(results, now))?;

        Ok(filepath)
    }
}

fn render_report(results: &[ResultItem], now: DateTime<Local>) -> String {
    let failed = results.iter().filter(|r| !r.success).count();
    let mut content = format!(
        "Update report\nGenerated: {}\n{} succeeded, {} failed\n\n",
        now.format("%Y-%m-%d %H:%M:%S"),
        results.len() - failed,
        failed
    );
    for r in results {
        if r.success {
            content.push_str(&format!("ok    [{}] {}\n", r.source, r.name));
        } else {
            content.push_str(&format!("fail  [{}] {}: {}\n", r.source, r.name, r.error));
        }
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package_manager::Source;
    use chrono::TimeZone;

    #[test]
    fn report_lands_in_dated_directory() {
        let dir = tempfile::tempdir().unwrap();
        let saver = ReportSaver::new(dir.path().to_path_buf());
        let now = Local.with_ymd_and_hms(2026, 3, 7, 9, 5, 0).unwrap();
        let results = vec![
            ResultItem {
                name: "linux".to_string(),
                source: Source::Repo,
                success: true,
                error: String::new(),
            },
            ResultItem {
                name: "org.example.App".to_string(),
                source: Source::Flatpak,
                success: false,
                error: "error: network unreachable".to_string(),
            },
        ];

        let path = saver.save_at(&results, now).unwrap();

        assert_eq!(path, dir.path().join("2026/03/07/09-05.txt"));
        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("1 succeeded, 1 failed"));
        assert!(content.contains("ok    [repo] linux"));
        assert!(content.contains("fail  [flat] org.example.App: error: network unreachable"));
    }
}
