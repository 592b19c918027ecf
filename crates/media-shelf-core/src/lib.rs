pub mod catalog;
pub mod error;
pub mod exchange;
pub mod lifecycle;
pub mod notify;
pub mod provider;
pub mod storage;
pub mod store;

pub use catalog::{aggregate, filter_items, find_by_id, find_by_id_prefix, sort_items, view, CatalogQuery, IdLookup};
pub use error::{ExchangeError, StoreError};
pub use exchange::{export_items, parse_import, ExchangeFormat, ImportBatch, RejectedRow};
pub use lifecycle::{CommandKind, CommandOutcome, ReviewCommand, ReviewLifecycle};
pub use notify::{LifecycleEvent, Notifier, TracingNotifier};
pub use provider::{Clock, IdGenerator, SystemClock, UuidGenerator};
pub use storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use store::{CollectionStore, MediaStore, DEFAULT_COLLECTION_KEY};
