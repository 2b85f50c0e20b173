use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ui::theme::{Theme, THEME_NAMES};
use crate::utils::url::normalize_base_url;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root URL of the chat backend (serves `/get_history` and `/chat`)
    pub base_url: Option<String>,
    /// Bubble theme name ("dark", "light", "monochrome")
    pub theme: Option<String>,
    /// Give up on a request after this many seconds; unset means wait forever
    pub request_timeout_secs: Option<u64>,
}

/// Keys accepted by `chatbox set` / `chatbox unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    BaseUrl,
    Theme,
    RequestTimeout,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 3] = [ConfigKey::BaseUrl, ConfigKey::Theme, ConfigKey::RequestTimeout];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::BaseUrl => "base-url",
            ConfigKey::Theme => "theme",
            ConfigKey::RequestTimeout => "request-timeout",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|candidate| candidate.as_str() == key)
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
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

impl Config {
    /// Backend URL to talk to, normalized, falling back to the default.
    pub fn resolved_base_url(&self) -> String {
        self.base_url
            .as_deref()
            .map(normalize_base_url)
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Unknown theme names fall back to the dark theme.
    pub fn resolved_theme(&self) -> Theme {
        self.theme
            .as_deref()
            .and_then(Theme::from_name)
            .unwrap_or_default()
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Validate and store a value. Returns the value as stored.
    pub fn set_value(&mut self, key: ConfigKey, value: &str) -> Result<String, String> {
        let value = value.trim();
        match key {
            ConfigKey::BaseUrl => {
                let normalized = normalize_base_url(value);
                if normalized.is_empty() {
                    return Err("base-url cannot be empty".to_string());
                }
                self.base_url = Some(normalized.clone());
                Ok(normalized)
            }
            ConfigKey::Theme => {
                if Theme::from_name(value).is_none() {
                    return Err(format!(
                        "unknown theme '{value}' (expected one of: {})",
                        THEME_NAMES.join(", ")
                    ));
                }
                let name = value.to_ascii_lowercase();
                self.theme = Some(name.clone());
                Ok(name)
            }
            ConfigKey::RequestTimeout => {
                let secs = value
                    .parse::<u64>()
                    .map_err(|_| format!("request-timeout must be a whole number of seconds, got '{value}'"))?;
                self.request_timeout_secs = Some(secs);
                Ok(secs.to_string())
            }
        }
    }

    pub fn unset_value(&mut self, key: ConfigKey) {
        match key {
            ConfigKey::BaseUrl => self.base_url = None,
            ConfigKey::Theme => self.theme = None,
            ConfigKey::RequestTimeout => self.request_timeout_secs = None,
        }
    }
}
