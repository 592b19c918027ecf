// Review lifecycle: create, update and delete intents applied to the store

use crate::error::StoreError;
use crate::notify::{LifecycleEvent, Notifier, TracingNotifier};
use crate::provider::{Clock, IdGenerator, SystemClock, UuidGenerator};
use crate::store::CollectionStore;
use media_shelf_models::{MediaFields, MediaItem};
use serde::Serialize;
use std::fmt;
use tracing::{debug, instrument};

/// A user intent against the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewCommand {
    Create(MediaFields),
    /// Full replacement of the editable fields. There are no partial updates.
    Update { id: String, fields: MediaFields },
    Delete { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "item", rename_all = "lowercase")]
pub enum CommandOutcome {
    Created(MediaItem),
    Updated(MediaItem),
    Deleted(MediaItem),
    /// Update or delete named an id that is not in the collection.
    Unchanged { id: String },
}

impl ReviewCommand {
    pub fn kind(&self) -> CommandKind {
        match self {
            ReviewCommand::Create(_) => CommandKind::Create,
            ReviewCommand::Update { .. } => CommandKind::Update,
            ReviewCommand::Delete { .. } => CommandKind::Delete,
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandKind::Create => f.write_str("create"),
            CommandKind::Update => f.write_str("update"),
            CommandKind::Delete => f.write_str("delete"),
        }
    }
}

impl CommandOutcome {
    /// The item the command produced, replaced or removed.
    pub fn item(&self) -> Option<&MediaItem> {
        match self {
            CommandOutcome::Created(item)
            | CommandOutcome::Updated(item)
            | CommandOutcome::Deleted(item) => Some(item),
            CommandOutcome::Unchanged { .. } => None,
        }
    }

    pub fn changed(&self) -> bool {
        !matches!(self, CommandOutcome::Unchanged { .. })
    }
}

/// Append `item` at the end of the collection.
pub fn append_item(mut items: Vec<MediaItem>, item: MediaItem) -> Vec<MediaItem> {
    items.push(item);
    items
}

/// Replace the editable fields of the item with `id`, keeping its position,
/// id and `date_added`. Absent id leaves the collection untouched.
pub fn replace_item(mut items: Vec<MediaItem>, id: &str, fields: MediaFields) -> Vec<MediaItem> {
    if let Some(item) = items.iter_mut().find(|item| item.id == id) {
        item.replace_fields(fields);
    }
    items
}

/// Remove the item with `id`. Absent id leaves the collection untouched.
pub fn remove_item(mut items: Vec<MediaItem>, id: &str) -> Vec<MediaItem> {
    items.retain(|item| item.id != id);
    items
}

/// Applies review commands to a [`CollectionStore`].
///
/// Every mutation runs as a transform inside [`CollectionStore::update`], so it
/// always works on the freshest persisted collection. Input is trusted: field
/// validation belongs to whoever builds the [`MediaFields`].
pub struct ReviewLifecycle<S: CollectionStore> {
    store: S,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
    notifier: Box<dyn Notifier>,
}

impl<S: CollectionStore> ReviewLifecycle<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            ids: Box::new(UuidGenerator),
            clock: Box::new(SystemClock),
            notifier: Box::new(TracingNotifier),
        }
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Current collection, in insertion order.
    pub fn items(&self) -> Result<Vec<MediaItem>, StoreError> {
        self.store.read()
    }

    #[instrument(skip(self, command), fields(action = %command.kind()))]
    pub fn apply(&self, command: ReviewCommand) -> Result<CommandOutcome, StoreError> {
        match command {
            ReviewCommand::Create(fields) => self.create(fields).map(CommandOutcome::Created),
            ReviewCommand::Update { id, fields } => {
                let result = self.apply_update(id, fields);
                self.report(CommandKind::Update, result)
            }
            ReviewCommand::Delete { id } => {
                let result = self.apply_delete(id);
                self.report(CommandKind::Delete, result)
            }
        }
    }

    pub fn create(&self, fields: MediaFields) -> Result<MediaItem, StoreError> {
        match self.apply_create(fields) {
            Ok(item) => {
                self.notifier
                    .notify(&LifecycleEvent::Succeeded(&CommandOutcome::Created(item.clone())));
                Ok(item)
            }
            Err(error) => {
                self.notifier.notify(&LifecycleEvent::Failed {
                    action: CommandKind::Create,
                    error: &error,
                });
                Err(error)
            }
        }
    }

    /// Create every field set in one store update: either all of them are
    /// appended, in order, or none are. Each created item is notified.
    pub fn create_many(&self, batch: Vec<MediaFields>) -> Result<Vec<MediaItem>, StoreError> {
        if batch.is_empty() {
            return Ok(Vec::new());
        }

        let created: Vec<MediaItem> = batch
            .into_iter()
            .map(|fields| MediaItem::new(self.ids.next_id(), self.clock.now(), fields))
            .collect();
        let appended = created.clone();

        match self.store.update(move |mut items| {
            items.extend(appended);
            items
        }) {
            Ok(items) => {
                debug!(count = created.len(), total = items.len(), "Appended review batch");
                for item in &created {
                    self.notifier
                        .notify(&LifecycleEvent::Succeeded(&CommandOutcome::Created(item.clone())));
                }
                Ok(created)
            }
            Err(error) => {
                self.notifier.notify(&LifecycleEvent::Failed {
                    action: CommandKind::Create,
                    error: &error,
                });
                Err(error)
            }
        }
    }

    /// Returns the updated item, or `None` when no item has this id.
    pub fn update(&self, id: impl Into<String>, fields: MediaFields) -> Result<Option<MediaItem>, StoreError> {
        let outcome = self.apply(ReviewCommand::Update { id: id.into(), fields })?;
        Ok(outcome.item().cloned())
    }

    /// Returns the removed item, or `None` when no item has this id.
    pub fn delete(&self, id: impl Into<String>) -> Result<Option<MediaItem>, StoreError> {
        let outcome = self.apply(ReviewCommand::Delete { id: id.into() })?;
        Ok(outcome.item().cloned())
    }

    fn report(
        &self,
        action: CommandKind,
        result: Result<CommandOutcome, StoreError>,
    ) -> Result<CommandOutcome, StoreError> {
        match &result {
            Ok(outcome) => self.notifier.notify(&LifecycleEvent::Succeeded(outcome)),
            Err(error) => self.notifier.notify(&LifecycleEvent::Failed { action, error }),
        }
        result
    }

    fn apply_create(&self, fields: MediaFields) -> Result<MediaItem, StoreError> {
        let item = MediaItem::new(self.ids.next_id(), self.clock.now(), fields);
        let appended = item.clone();
        let items = self.store.update(move |items| append_item(items, appended))?;
        debug!(id = %item.id, total = items.len(), "Appended review");
        Ok(item)
    }

    fn apply_update(&self, id: String, fields: MediaFields) -> Result<CommandOutcome, StoreError> {
        let items = self.store.update(|items| replace_item(items, &id, fields))?;
        match items.into_iter().find(|item| item.id == id) {
            Some(item) => Ok(CommandOutcome::Updated(item)),
            None => {
                debug!(id = %id, "Update target not found");
                Ok(CommandOutcome::Unchanged { id })
            }
        }
    }

    fn apply_delete(&self, id: String) -> Result<CommandOutcome, StoreError> {
        let mut removed = None;
        self.store.update(|items| {
            removed = items.iter().find(|item| item.id == id).cloned();
            remove_item(items, &id)
        })?;
        match removed {
            Some(item) => Ok(CommandOutcome::Deleted(item)),
            None => {
                debug!(id = %id, "Delete target not found");
                Ok(CommandOutcome::Unchanged { id })
            }
        }
    }
}

#[cfg(test)]
mod tests;
