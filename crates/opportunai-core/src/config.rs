use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;

/// Top-level configuration for OpportunAI.
///
/// Loaded from `~/.opportunai/config.toml` by default. Every section falls
/// back to its defaults when missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpportunaiConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

impl OpportunaiConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: OpportunaiConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Directory holding persisted credentials.
    pub data_dir: String,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: "~/.opportunai/data".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Chat assistant configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Whether the assistant is available.
    pub enabled: bool,
    /// Artificial delay before each bot reply, in milliseconds.
    pub reply_delay_ms: u64,
    /// Minimum compatibility counted as "high" in the totals summary.
    pub high_compatibility: u8,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            reply_delay_ms: 800,
            high_compatibility: 90,
        }
    }
}

/// Backend API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the backend, without a trailing slash.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
            timeout_secs: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = OpportunaiConfig::default();
        assert_eq!(config.general.data_dir, "~/.opportunai/data");
        assert_eq!(config.general.log_level, "info");
        assert!(config.chat.enabled);
        assert_eq!(config.chat.reply_delay_ms, 800);
        assert_eq!(config.chat.high_compatibility, 90);
        assert_eq!(config.api.base_url, "http://localhost:3000/api");
        assert_eq!(config.api.timeout_secs, 10);
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
[general]
data_dir = "/custom/data"
log_level = "debug"

[chat]
enabled = false
reply_delay_ms = 250
high_compatibility = 85

[api]
base_url = "https://api.example.com"
timeout_secs = 3
"#;
        let file = create_temp_config(content);
        let config = OpportunaiConfig::load(file.path()).unwrap();
        assert_eq!(config.general.data_dir, "/custom/data");
        assert_eq!(config.general.log_level, "debug");
        assert!(!config.chat.enabled);
        assert_eq!(config.chat.reply_delay_ms, 250);
        assert_eq!(config.chat.high_compatibility, 85);
        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.api.timeout_secs, 3);
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let content = r#"
[chat]
reply_delay_ms = 0
"#;
        let file = create_temp_config(content);
        let config = OpportunaiConfig::load(file.path()).unwrap();
        assert_eq!(config.chat.reply_delay_ms, 0);
        // Remaining fields use defaults
        assert_eq!(config.chat.high_compatibility, 90);
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.api.timeout_secs, 10);
    }

    #[test]
    fn test_load_empty_file_uses_defaults() {
        let file = create_temp_config("");
        let config = OpportunaiConfig::load(file.path()).unwrap();
        assert_eq!(config.chat.reply_delay_ms, 800);
    }

    #[test]
    fn test_load_invalid_toml_is_config_error() {
        let file = create_temp_config("[chat\nreply_delay_ms = ");
        let err = OpportunaiConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = OpportunaiConfig::load(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(err, CoreError::Io(_)));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = OpportunaiConfig::load_or_default(Path::new("/nonexistent/config.toml"));
        assert_eq!(config.general.data_dir, "~/.opportunai/data");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = OpportunaiConfig::default();
        config.chat.reply_delay_ms = 42;
        config.api.base_url = "http://127.0.0.1:9999/api".to_string();
        config.save(&path).unwrap();

        let reloaded = OpportunaiConfig::load(&path).unwrap();
        assert_eq!(reloaded.chat.reply_delay_ms, 42);
        assert_eq!(reloaded.api.base_url, "http://127.0.0.1:9999/api");
        assert_eq!(reloaded.general.data_dir, config.general.data_dir);
    }
}
