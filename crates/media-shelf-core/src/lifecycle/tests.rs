use super::*;
use crate::storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
use crate::store::MediaStore;
use chrono::{DateTime, Duration, TimeZone, Utc};
use media_shelf_models::{MediaType, Rating};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Clock that advances one hour per call, starting at 2024-01-01.
struct SteppingClock {
    calls: AtomicUsize,
}

impl SteppingClock {
    fn new() -> Self {
        Self { calls: AtomicUsize::new(0) }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let step = self.calls.fetch_add(1, Ordering::SeqCst) as i64;
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::hours(step)
    }
}

struct SequentialIds {
    next: AtomicUsize,
}

impl SequentialIds {
    fn new() -> Self {
        Self { next: AtomicUsize::new(1) }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        format!("item-{}", self.next.fetch_add(1, Ordering::SeqCst))
    }
}

#[derive(Default)]
struct RecordingNotifier {
    events: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, event: &LifecycleEvent<'_>) {
        let line = match event {
            LifecycleEvent::Succeeded(CommandOutcome::Created(item)) => format!("created {}", item.id),
            LifecycleEvent::Succeeded(CommandOutcome::Updated(item)) => format!("updated {}", item.id),
            LifecycleEvent::Succeeded(CommandOutcome::Deleted(item)) => format!("deleted {}", item.id),
            LifecycleEvent::Succeeded(CommandOutcome::Unchanged { id }) => format!("unchanged {}", id),
            LifecycleEvent::Failed { action, .. } => format!("failed {}", action),
        };
        self.events.lock().unwrap().push(line);
    }
}

fn lifecycle() -> ReviewLifecycle<MediaStore<MemoryKeyValueStore>> {
    ReviewLifecycle::new(MediaStore::with_default_key(MemoryKeyValueStore::new()))
        .with_id_generator(SequentialIds::new())
        .with_clock(SteppingClock::new())
}

fn fields(media_type: MediaType, title: &str, rating: i64) -> MediaFields {
    MediaFields::new(media_type, title, Rating::new(rating).unwrap())
}

#[test]
fn test_create_on_empty_store() {
    let manager = ReviewLifecycle::new(MediaStore::with_default_key(MemoryKeyValueStore::new()));

    let item = manager.create(fields(MediaType::Podcast, "X", 3)).unwrap();
    let items = manager.items().unwrap();

    assert_eq!(items.len(), 1);
    assert!(!items[0].id.is_empty());
    assert!(!items[0].date_added.to_rfc3339().is_empty());
    assert_eq!(items[0], item);
}

#[test]
fn test_create_appends_in_insertion_order() {
    let manager = lifecycle();
    manager.create(fields(MediaType::Book, "Dune", 5)).unwrap();
    manager.create(fields(MediaType::Movie, "Arrival", 4)).unwrap();
    manager.create(fields(MediaType::Podcast, "Radiolab", 3)).unwrap();

    let titles: Vec<String> = manager.items().unwrap().into_iter().map(|i| i.title).collect();
    assert_eq!(titles, vec!["Dune", "Arrival", "Radiolab"]);

    let items = manager.items().unwrap();
    assert_eq!(items[0].id, "item-1");
    assert!(items[0].date_added < items[1].date_added);
    assert!(items[1].date_added < items[2].date_added);
}

#[test]
fn test_update_replaces_fields_but_keeps_identity() {
    let manager = lifecycle();
    let first = manager
        .create(fields(MediaType::Book, "Dune", 5).with_creator("Frank Herbert").with_review("Sand."))
        .unwrap();
    manager.create(fields(MediaType::Movie, "Arrival", 4)).unwrap();

    let updated = manager
        .update(&first.id, fields(MediaType::Movie, "Dune: Part One", 4))
        .unwrap()
        .expect("item exists");

    assert_eq!(updated.id, first.id);
    assert_eq!(updated.date_added, first.date_added);
    // Type is replaceable on edit
    assert_eq!(updated.media_type, MediaType::Movie);
    assert_eq!(updated.title, "Dune: Part One");
    // Full replacement: omitted optionals are cleared
    assert_eq!(updated.creator, None);
    assert_eq!(updated.review, None);

    let items = manager.items().unwrap();
    assert_eq!(items[0], updated, "position is preserved");
    assert_eq!(items[1].title, "Arrival");
}

#[test]
fn test_update_absent_id_is_noop() {
    let manager = lifecycle();
    manager.create(fields(MediaType::Book, "Dune", 5)).unwrap();
    let before = manager.items().unwrap();

    let outcome = manager
        .apply(ReviewCommand::Update {
            id: "missing".to_string(),
            fields: fields(MediaType::Movie, "Other", 1),
        })
        .unwrap();

    assert_eq!(outcome, CommandOutcome::Unchanged { id: "missing".to_string() });
    assert!(!outcome.changed());
    assert_eq!(manager.items().unwrap(), before);
}

#[test]
fn test_delete_removes_only_target() {
    let manager = lifecycle();
    let dune = manager.create(fields(MediaType::Book, "Dune", 5)).unwrap();
    manager.create(fields(MediaType::Movie, "Arrival", 4)).unwrap();

    let removed = manager.delete(&dune.id).unwrap();
    assert_eq!(removed, Some(dune));

    let items = manager.items().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Arrival");

    assert_eq!(manager.delete("item-1").unwrap(), None, "second delete is a no-op");
}

#[test]
fn test_create_then_delete_restores_collection() {
    let manager = lifecycle();
    manager.create(fields(MediaType::Book, "Dune", 5)).unwrap();
    manager.create(fields(MediaType::Movie, "Arrival", 4)).unwrap();
    let before = manager.items().unwrap();

    let created = manager.create(fields(MediaType::Podcast, "Temporary", 2)).unwrap();
    manager.delete(&created.id).unwrap();

    assert_eq!(manager.items().unwrap(), before);
}

#[test]
fn test_notifier_sees_every_command() {
    let notifier = Arc::new(RecordingNotifier::default());
    let manager = lifecycle().with_notifier(Arc::clone(&notifier));

    let item = manager.create(fields(MediaType::Book, "Dune", 5)).unwrap();
    manager.update(&item.id, fields(MediaType::Book, "Dune", 4)).unwrap();
    manager.update("ghost", fields(MediaType::Book, "Ghost", 1)).unwrap();
    manager.delete(&item.id).unwrap();

    assert_eq!(
        notifier.events(),
        vec!["created item-1", "updated item-1", "unchanged ghost", "deleted item-1"]
    );
}

#[test]
fn test_store_failure_is_reported_and_returned() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("library.json");
    std::fs::write(&path, "{ broken").unwrap();

    let notifier = Arc::new(RecordingNotifier::default());
    let manager = ReviewLifecycle::new(MediaStore::with_default_key(FileKeyValueStore::new(&path)))
    .with_notifier(Arc::clone(&notifier));

    let err = manager.create(fields(MediaType::Book, "Dune", 5)).unwrap_err();
    assert!(matches!(err, StoreError::CorruptDocument { .. }));
    assert_eq!(notifier.events(), vec!["failed create"]);

    // Nothing was written over the corrupt document
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ broken");
}

/// Backend whose writes always fail; reads see whatever was seeded.
#[derive(Default)]
struct ReadOnlyBackend {
    inner: MemoryKeyValueStore,
}

impl KeyValueStore for ReadOnlyBackend {
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        self.inner.get(key)
    }

    fn set(&self, _key: &str, _value: serde_json::Value) -> Result<(), StoreError> {
        Err(StoreError::Io {
            path: "library.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    }

    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        self.inner.remove(key)
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        self.inner.keys()
    }
}

#[test]
fn test_create_many_appends_batch_in_order() {
    let notifier = Arc::new(RecordingNotifier::default());
    let manager = lifecycle().with_notifier(Arc::clone(&notifier));
    let existing = manager.create(fields(MediaType::Movie, "Arrival", 4)).unwrap();

    let created = manager
        .create_many(vec![
            fields(MediaType::Book, "Dune", 5),
            fields(MediaType::Podcast, "Radiolab", 3),
        ])
        .unwrap();

    assert_eq!(created.len(), 2);
    assert_eq!(created[0].id, "item-2");
    assert_eq!(created[1].id, "item-3");
    assert!(created[0].date_added < created[1].date_added);

    let items = manager.items().unwrap();
    let titles: Vec<&str> = items.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(titles, vec!["Arrival", "Dune", "Radiolab"]);
    assert_eq!(items[0], existing);
    assert_eq!(
        notifier.events(),
        vec!["created item-1", "created item-2", "created item-3"]
    );
}

#[test]
fn test_create_many_empty_batch_is_noop() {
    let notifier = Arc::new(RecordingNotifier::default());
    let manager = lifecycle().with_notifier(Arc::clone(&notifier));

    assert!(manager.create_many(Vec::new()).unwrap().is_empty());
    assert!(manager.items().unwrap().is_empty());
    assert!(notifier.events().is_empty());
}

#[test]
fn test_create_many_saves_nothing_when_store_fails() {
    let backend = ReadOnlyBackend::default();
    let seeded = MediaItem::new(
        "seed".to_string(),
        Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap(),
        fields(MediaType::Book, "Villette", 4),
    );
    backend
        .inner
        .set(crate::store::DEFAULT_COLLECTION_KEY, serde_json::to_value(vec![&seeded]).unwrap())
        .unwrap();

    let notifier = Arc::new(RecordingNotifier::default());
    let manager = ReviewLifecycle::new(MediaStore::with_default_key(backend))
        .with_id_generator(SequentialIds::new())
        .with_clock(SteppingClock::new())
        .with_notifier(Arc::clone(&notifier));

    let err = manager
        .create_many(vec![
            fields(MediaType::Book, "Dune", 5),
            fields(MediaType::Movie, "Arrival", 4),
        ])
        .unwrap_err();

    assert!(matches!(err, StoreError::Io { .. }));
    assert_eq!(manager.items().unwrap(), vec![seeded]);
    assert_eq!(notifier.events(), vec!["failed create"]);
}

#[test]
fn test_noop_commands_do_not_create_library_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("library.json");
    let manager = ReviewLifecycle::new(MediaStore::with_default_key(FileKeyValueStore::new(&path)));

    assert_eq!(manager.update("ghost", fields(MediaType::Book, "Ghost", 1)).unwrap(), None);
    assert_eq!(manager.delete("ghost").unwrap(), None);
    assert!(!path.exists());
}

#[test]
fn test_pure_transforms() {
    let base = lifecycle();
    let a = base.create(fields(MediaType::Book, "A", 1)).unwrap();
    let b = base.create(fields(MediaType::Book, "B", 2)).unwrap();
    let items = vec![a.clone(), b.clone()];

    assert_eq!(replace_item(items.clone(), "absent", fields(MediaType::Movie, "Z", 5)), items);
    assert_eq!(remove_item(items.clone(), "absent"), items);
    assert_eq!(remove_item(items.clone(), &a.id), vec![b.clone()]);

    let c = MediaItem::new("c".to_string(), Utc::now(), fields(MediaType::Movie, "C", 3));
    let appended = append_item(items.clone(), c.clone());
    assert_eq!(appended.last(), Some(&c));
    assert_eq!(remove_item(appended, "c"), items);
}

#[test]
fn test_outcome_serializes_with_tag() {
    let json = serde_json::to_value(CommandOutcome::Unchanged { id: "x".to_string() }).unwrap();
    assert_eq!(json["outcome"], "unchanged");
    assert_eq!(json["item"]["id"], "x");
}
