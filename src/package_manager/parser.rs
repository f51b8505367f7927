//! 输出解析函数
//!
//! 每个来源的输出先解码成 [`Record`]，再统一转换为 [`UpdateItem`]，
//! 对外部工具输出格式的假设都集中在这里。

use super::types::{Source, UpdateItem};

/// 版本未知时的占位符
pub const UNKNOWN_VERSION: &str = "?";
/// flatpak 不报告当前版本
pub const INSTALLED_VERSION: &str = "installed";
/// 失败但没有任何 stderr 输出
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// 单行输出解码后的记录
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// `name old -> new`
    Upgrade {
        name: String,
        current: String,
        new: String,
    },
    /// 字段不全的 AUR 行，只保证有包名
    Partial { name: String, current: Option<String> },
    /// flatpak `application\tversion`
    Application { id: String, version: Option<String> },
}

impl Record {
    pub fn into_item(self, source: Source) -> UpdateItem {
        match self {
            Record::Upgrade { name, current, new } => UpdateItem::new(name, current, new, source),
            Record::Partial { name, current } => UpdateItem::new(
                name,
                current.unwrap_or_else(|| UNKNOWN_VERSION.to_string()),
                UNKNOWN_VERSION,
                source,
            ),
            Record::Application { id, version } => UpdateItem::new(
                id,
                INSTALLED_VERSION,
                version.unwrap_or_else(|| UNKNOWN_VERSION.to_string()),
                source,
            ),
        }
    }
}

/// checkupdates: 四个字段缺一不可，否则整行丢弃
pub fn decode_repo_line(line: &str) -> Option<Record> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 4 {
        return None;
    }
    Some(Record::Upgrade {
        name: parts[0].to_string(),
        current: parts[1].to_string(),
        new: parts[3].to_string(),
    })
}

/// paru/yay -Qum: 字段不全时只要有包名就保留
pub fn decode_aur_line(line: &str) -> Option<Record> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.len() {
        0 => None,
        n if n >= 4 => Some(Record::Upgrade {
            name: parts[0].to_string(),
            current: parts[1].to_string(),
            new: parts[3].to_string(),
        }),
        _ => Some(Record::Partial {
            name: parts[0].to_string(),
            current: parts.get(1).map(|s| s.to_string()),
        }),
    }
}

/// flatpak remote-ls --columns=application,version（制表符分隔）
pub fn decode_flatpak_line(line: &str) -> Option<Record> {
    let mut columns = line.split('\t');
    let id = columns.next().map(str::trim).unwrap_or("");
    if id.is_empty() {
        return None;
    }
    let version = columns
        .next()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string);
    Some(Record::Application {
        id: id.to_string(),
        version,
    })
}

fn parse_lines(
    output: &str,
    source: Source,
    decode: fn(&str) -> Option<Record>,
) -> Vec<UpdateItem> {
    output
        .lines()
        .filter_map(decode)
        .map(|record| record.into_item(source))
        .collect()
}

pub fn parse_repo_output(output: &str) -> Vec<UpdateItem> {
    parse_lines(output, Source::Repo, decode_repo_line)
}

pub fn parse_aur_output(output: &str) -> Vec<UpdateItem> {
    parse_lines(output, Source::Aur, decode_aur_line)
}

pub fn parse_flatpak_output(output: &str) -> Vec<UpdateItem> {
    parse_lines(output, Source::Flatpak, decode_flatpak_line)
}

/// 清理终端输出中的 ANSI 转义序列和控制字符
pub fn clean_terminal_output(input: &str) -> String {
    let mut result = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\x1b' => match chars.peek() {
                Some('[') => {
                    chars.next();
                    for next in chars.by_ref() {
                        if next.is_ascii_alphabetic() {
                            break;
                        }
                    }
                }
                // OSC：以 BEL 或 ESC \ 结束
                Some(']') => {
                    chars.next();
                    while let Some(next) = chars.next() {
                        if next == '\x07' {
                            break;
                        }
                        if next == '\x1b' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            },
            '\r' => {
                if chars.peek() != Some(&'\n') && !result.ends_with('\n') {
                    result.push('\n');
                }
            }
            c if c.is_control() && c != '\n' && c != '\t' => {}
            _ => result.push(c),
        }
    }

    result
}

/// 取 stderr 中最后一行非空内容作为失败原因
pub fn last_error_line(stderr: &str) -> String {
    clean_terminal_output(stderr)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
}
