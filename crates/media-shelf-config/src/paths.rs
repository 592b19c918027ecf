use crate::config::Config;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Get the container base path from environment variable, defaulting to "/app"
pub fn container_base_path() -> PathBuf {
    std::env::var("MEDIASHELF_BASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/app"))
}

pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("mediashelf");

        Ok(Self::from_base(base_dir))
    }

    /// Config files at base level, data and logs in subdirectories.
    pub fn from_base(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            config_dir: base.clone(),
            data_dir: base.join("data"),
            log_dir: base.join("logs"),
        }
    }

    pub fn from_docker_env() -> Self {
        Self::from_base(container_base_path())
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn default_library_file(&self) -> PathBuf {
        self.data_dir.join("library.json")
    }

    /// Library document to use: the configured override, or the default in the data dir.
    /// Relative overrides are resolved against the config directory.
    pub fn library_file(&self, config: &Config) -> PathBuf {
        match &config.storage.library_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => self.config_dir.join(path),
            None => self.default_library_file(),
        }
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join("mediashelf.log")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        // The container base directory only exists inside the image
        let base = container_base_path();
        if base.exists() {
            return Self::from_docker_env();
        }

        // Otherwise, use platform-specific paths (e.g., ~/.config/mediashelf on Linux)
        Self::new().unwrap_or_else(|_| Self::from_docker_env())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_layout_under_base() {
        let paths = PathManager::from_base("/srv/shelf");
        assert_eq!(paths.config_file(), PathBuf::from("/srv/shelf/config.toml"));
        assert_eq!(paths.default_library_file(), PathBuf::from("/srv/shelf/data/library.json"));
        assert_eq!(paths.log_file(), PathBuf::from("/srv/shelf/logs/mediashelf.log"));
    }

    #[test]
    fn test_library_file_override() {
        let paths = PathManager::from_base("/srv/shelf");
        let mut config = Config::default();
        assert_eq!(paths.library_file(&config), paths.default_library_file());

        config.storage.library_file = Some(PathBuf::from("/mnt/media/reviews.json"));
        assert_eq!(paths.library_file(&config), PathBuf::from("/mnt/media/reviews.json"));

        config.storage.library_file = Some(PathBuf::from("alt/reviews.json"));
        assert_eq!(paths.library_file(&config), PathBuf::from("/srv/shelf/alt/reviews.json"));
    }

    #[test]
    fn test_ensure_directories() {
        let dir = TempDir::new().unwrap();
        let paths = PathManager::from_base(dir.path().join("shelf"));
        paths.ensure_directories().unwrap();

        assert!(paths.config_dir().is_dir());
        assert!(paths.data_dir().is_dir());
        assert!(paths.log_dir().is_dir());
    }
}
