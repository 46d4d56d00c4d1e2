//! Application settings shared by the binaries

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable overriding the log file location
pub const LOG_FILE_ENV: &str = "STOCKDASH_LOG_FILE";

/// Process-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Application name, used as the dashboard title
    pub app_name: String,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
    /// Where the interactive dashboard writes its logs
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "Sector Stock Comparison Dashboard".to_string(),
            log_filter: "warn,stockdash_core=info,stockdash_cli=info".to_string(),
            log_file: PathBuf::from("stockdash.log"),
        }
    }
}

impl Settings {
    /// Defaults with environment overrides applied
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Ok(path) = std::env::var(LOG_FILE_ENV) {
            if !path.trim().is_empty() {
                settings.log_file = PathBuf::from(path);
            }
        }
        settings
    }

    /// Override the log file path
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.log_file, PathBuf::from("stockdash.log"));
        assert!(settings.log_filter.contains("stockdash_core=info"));
        assert!(!settings.app_name.is_empty());
    }

    #[test]
    fn test_with_log_file() {
        let settings = Settings::default().with_log_file("/tmp/dash.log");
        assert_eq!(settings.log_file, PathBuf::from("/tmp/dash.log"));
    }

    #[test]
    fn test_settings_serialize() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["log_file"], "stockdash.log");
    }
}
