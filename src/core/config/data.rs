use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::constants::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::core::store::DuplicatePolicy;

/// Settings read from `config.toml`. The API key is deliberately absent: it
/// is entered at runtime and never written to disk.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    /// API root, e.g. `https://generativelanguage.googleapis.com/v1beta`
    pub base_url: Option<String>,
    /// Model addressed by every request
    pub model: Option<String>,
    /// Per-request timeout; absent means wait indefinitely
    pub timeout_secs: Option<u64>,
    /// Ring the terminal bell whenever a bubble is added
    pub bell: Option<bool>,
    /// Behavior when a new tab reuses an open tab's name
    pub duplicate_tabs: Option<DuplicatePolicy>,
    /// Write tracing output to this file
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn base_url(&self) -> String {
        self.base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
            .to_string()
    }

    pub fn model(&self) -> String {
        self.model
            .as_deref()
            .filter(|model| !model.trim().is_empty())
            .unwrap_or(DEFAULT_MODEL)
            .to_string()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn bell_enabled(&self) -> bool {
        self.bell.unwrap_or(true)
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_tabs.unwrap_or_default()
    }

    pub fn print_all(&self) {
        println!("base-url: {}", self.base_url());
        println!("model: {}", self.model());
        match self.timeout() {
            Some(timeout) => println!("timeout: {}s", timeout.as_secs()),
            None => println!("timeout: none"),
        }
        println!("bell: {}", self.bell_enabled());
        let policy = match self.duplicate_policy() {
            DuplicatePolicy::Reject => "reject",
            DuplicatePolicy::Merge => "merge",
            DuplicatePolicy::Overwrite => "overwrite",
        };
        println!("duplicate-tabs: {policy}");
        match &self.log_file {
            Some(path) => println!("log-file: {}", path_display(path)),
            None => println!("log-file: none"),
        }
    }
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}

/// Keys accepted by `tabchat set` / `tabchat unset`.
pub const SETTING_KEYS: &[&str] = &[
    "base-url",
    "model",
    "timeout",
    "bell",
    "duplicate-tabs",
    "log-file",
];

impl Config {
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), String> {
        let value = value.trim();
        if value.is_empty() {
            return Err(format!("A value is required for {key}"));
        }
        match key {
            "base-url" => self.base_url = Some(value.to_string()),
            "model" => self.model = Some(value.to_string()),
            "timeout" => {
                let secs = value
                    .trim_end_matches('s')
                    .parse::<u64>()
                    .map_err(|_| format!("Invalid timeout '{value}': expected whole seconds"))?;
                self.timeout_secs = Some(secs);
            }
            "bell" => {
                self.bell = Some(match value.to_ascii_lowercase().as_str() {
                    "on" | "true" | "yes" => true,
                    "off" | "false" | "no" => false,
                    _ => return Err(format!("Invalid bell value '{value}': use on or off")),
                })
            }
            "duplicate-tabs" => {
                self.duplicate_tabs = Some(match value.to_ascii_lowercase().as_str() {
                    "reject" => DuplicatePolicy::Reject,
                    "merge" => DuplicatePolicy::Merge,
                    "overwrite" => DuplicatePolicy::Overwrite,
                    _ => {
                        return Err(format!(
                            "Invalid duplicate-tabs value '{value}': use reject, merge or overwrite"
                        ))
                    }
                })
            }
            "log-file" => self.log_file = Some(PathBuf::from(value)),
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }

    pub fn unset_value(&mut self, key: &str) -> Result<(), String> {
        match key {
            "base-url" => self.base_url = None,
            "model" => self.model = None,
            "timeout" => self.timeout_secs = None,
            "bell" => self.bell = None,
            "duplicate-tabs" => self.duplicate_tabs = None,
            "log-file" => self.log_file = None,
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> String {
    format!(
        "Unknown config key: {key} (expected one of: {})",
        SETTING_KEYS.join(", ")
    )
}
