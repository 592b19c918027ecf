pub mod config;
pub mod paths;

pub use config::{Config, DisplayConfig, LoggingConfig, StorageConfig, DEFAULT_COLLECTION_KEY};
pub use paths::{PathManager, container_base_path};
