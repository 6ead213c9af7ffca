use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "duplicator.toml";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub schema: SchemaConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path or `sqlite:` URL
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://duplicator.db?mode=rwc".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory stored filenames are relative to
    pub root: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("upload"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Schema document; the built-in application schema when unset
    pub path: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid configuration")
    }

    /// Load `path`, falling back to defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Failed to load {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::get_database_url;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.database.url, "sqlite://duplicator.db?mode=rwc");
        assert_eq!(config.storage.root, PathBuf::from("upload"));
        assert_eq!(config.schema.path, None);
        assert_eq!(config.logging.level, "info");
        assert_eq!(
            get_database_url(Some(&config.database.url)),
            "sqlite://duplicator.db?mode=rwc"
        );
    }

    #[test]
    fn test_partial_override() {
        let config = AppConfig::from_toml(
            r#"
[storage]
root = "/var/lib/app/upload"

[schema]
path = "schema.yaml"
"#,
        )
        .unwrap();
        assert_eq!(config.storage.root, PathBuf::from("/var/lib/app/upload"));
        assert_eq!(config.schema.path, Some(PathBuf::from("schema.yaml")));
        assert_eq!(config.database.url, "sqlite://duplicator.db?mode=rwc");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = AppConfig::load(Path::new("does/not/exist.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_invalid_config() {
        assert!(AppConfig::from_toml("[database]\nurl = 42").is_err());
    }
}
