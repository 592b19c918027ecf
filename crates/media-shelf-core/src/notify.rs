use crate::error::StoreError;
use crate::lifecycle::{CommandKind, CommandOutcome};
use std::sync::Arc;
use tracing::{info, warn};

/// What the lifecycle manager reports after each command.
#[derive(Debug)]
pub enum LifecycleEvent<'a> {
    Succeeded(&'a CommandOutcome),
    Failed {
        action: CommandKind,
        error: &'a StoreError,
    },
}

/// Observer for user feedback. Purely observational: it cannot change the
/// outcome of a command.
pub trait Notifier: Send + Sync {
    fn notify(&self, event: &LifecycleEvent<'_>);
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn notify(&self, event: &LifecycleEvent<'_>) {
        (**self).notify(event)
    }
}

/// Default notifier: records every lifecycle event in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, event: &LifecycleEvent<'_>) {
        match event {
            LifecycleEvent::Succeeded(CommandOutcome::Created(item)) => {
                info!(id = %item.id, title = %item.title, "Review added");
            }
            LifecycleEvent::Succeeded(CommandOutcome::Updated(item)) => {
                info!(id = %item.id, title = %item.title, "Review updated");
            }
            LifecycleEvent::Succeeded(CommandOutcome::Deleted(item)) => {
                info!(id = %item.id, title = %item.title, "Review deleted");
            }
            LifecycleEvent::Succeeded(CommandOutcome::Unchanged { id }) => {
                info!(id = %id, "No review with this id, nothing changed");
            }
            LifecycleEvent::Failed { action, error } => {
                warn!(action = %action, "Review {} failed: {}", action, error);
            }
        }
    }
}
