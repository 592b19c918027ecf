use media_shelf_models::{SortMode, TypeFilter};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Key the collection is stored under in the library document.
pub const DEFAULT_COLLECTION_KEY: &str = "media-reviews";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_collection_key")]
    pub collection_key: String,
    /// Override for the library document. Relative paths are resolved
    /// against the config directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library_file: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct DisplayConfig {
    #[serde(default)]
    pub default_sort: SortMode,
    #[serde(default)]
    pub default_type: TypeFilter,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Force JSON logs on or off; unset means "JSON unless stdout is a terminal"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_collection_key() -> String {
    DEFAULT_COLLECTION_KEY.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            collection_key: default_collection_key(),
            library_file: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: None,
            file: None,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let key = &self.storage.collection_key;
        if key.is_empty() {
            return Err(anyhow::anyhow!("storage.collection_key cannot be empty"));
        }
        if key.chars().any(char::is_whitespace) {
            return Err(anyhow::anyhow!(
                "storage.collection_key must not contain whitespace: {:?}",
                key
            ));
        }

        if self.logging.level.trim().is_empty() {
            return Err(anyhow::anyhow!("logging.level cannot be empty"));
        }

        if let Some(ref file) = self.storage.library_file {
            if file.as_os_str().is_empty() {
                return Err(anyhow::anyhow!("storage.library_file cannot be an empty path"));
            }
        }

        Ok(())
    }
}
