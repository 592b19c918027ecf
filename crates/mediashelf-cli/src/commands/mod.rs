pub mod add;
pub mod clear;
pub mod config;
pub mod edit;
pub mod exchange;
pub mod list;
pub mod prompts;
pub mod remove;
pub mod show;
pub mod stats;

use crate::output::Output;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use media_shelf_config::{Config, PathManager};
use media_shelf_core::{find_by_id_prefix, FileKeyValueStore, IdLookup, MediaStore, ReviewLifecycle};
use media_shelf_models::MediaItem;
use std::path::PathBuf;

pub type LibraryLifecycle = ReviewLifecycle<MediaStore<FileKeyValueStore>>;

/// Everything a command needs: resolved paths, loaded config and the output handler.
pub struct AppContext {
    pub paths: PathManager,
    pub config: Config,
    pub config_path: PathBuf,
    pub output: Output,
}

impl AppContext {
    pub fn new(paths: PathManager, config: Config, config_path: PathBuf, output: Output) -> Self {
        Self {
            paths,
            config,
            config_path,
            output,
        }
    }

    pub fn library_file(&self) -> PathBuf {
        self.paths.library_file(&self.config)
    }

    pub fn open_store(&self) -> MediaStore<FileKeyValueStore> {
        MediaStore::open(&self.paths, &self.config)
    }

    /// Lifecycle over the library file. Human output gets lifecycle feedback
    /// lines; JSON modes print results themselves and only trace events.
    pub fn open_lifecycle(&self) -> LibraryLifecycle {
        let lifecycle = ReviewLifecycle::new(self.open_store());
        if self.output.is_human() {
            lifecycle.with_notifier(self.output)
        } else {
            lifecycle
        }
    }
}

/// Resolve an id or unique prefix to an item, with a readable error otherwise.
pub fn resolve_item(items: &[MediaItem], id: &str) -> Result<MediaItem> {
    match find_by_id_prefix(items, id) {
        IdLookup::Found(item) => Ok(item.clone()),
        IdLookup::NotFound => Err(color_eyre::eyre::eyre!("No review matches id '{}'", id)),
        IdLookup::Ambiguous(candidates) => {
            let ids: Vec<&str> = candidates.iter().map(|item| item.id.as_str()).collect();
            Err(color_eyre::eyre::eyre!(
                "Id prefix '{}' is ambiguous, it matches: {}",
                id,
                ids.join(", ")
            ))
        }
    }
}

pub fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

pub fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(comfy_table::Attribute::Bold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use crate::output::OutputFormat;
    use media_shelf_core::CollectionStore;
    use media_shelf_models::{MediaFields, MediaType, Rating};
    use tempfile::TempDir;

    fn item(id: &str) -> MediaItem {
        let fields = MediaFields::new(MediaType::Book, "Dune", Rating::new(5).unwrap());
        MediaItem::new(id.to_string(), Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(), fields)
    }

    #[test]
    fn test_resolve_item_by_prefix() {
        let items = vec![item("abc123"), item("abd456")];
        assert_eq!(resolve_item(&items, "abc").unwrap().id, "abc123");
        assert!(resolve_item(&items, "ab").is_err());
        assert!(resolve_item(&items, "zzz").is_err());
    }

    #[test]
    fn test_context_uses_configured_library() {
        let dir = TempDir::new().unwrap();
        let paths = PathManager::from_base(dir.path());
        let mut config = Config::default();
        config.storage.library_file = Some(PathBuf::from("shelf.json"));
        config.storage.collection_key = "my-shelf".to_string();
        let ctx = AppContext::new(
            paths,
            config,
            dir.path().join("config.toml"),
            Output::new(OutputFormat::Json, true),
        );

        assert_eq!(ctx.library_file(), dir.path().join("shelf.json"));

        let fields = MediaFields::new(MediaType::Podcast, "Radiolab", Rating::new(4).unwrap());
        let created = ctx.open_lifecycle().create(fields).unwrap();

        let store = ctx.open_store();
        assert_eq!(store.key(), "my-shelf");
        let items = store.read().unwrap();
        assert_eq!(items, vec![created.clone()]);
        assert_eq!(resolve_item(&items, &created.id[..6]).unwrap(), created);
        assert!(dir.path().join("shelf.json").exists());
    }
}
