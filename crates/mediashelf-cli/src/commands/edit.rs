use super::{resolve_item, AppContext};
use color_eyre::Result;
use media_shelf_models::{MediaFields, MediaType, Rating};
use serde_json::json;
use tracing::debug;

/// What to do with an optional text field during an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    Keep,
    Set(String),
    Clear,
}

impl FieldChange {
    pub fn from_flags(value: Option<String>, clear: bool) -> Self {
        match (value, clear) {
            (_, true) => FieldChange::Clear,
            (Some(value), false) => FieldChange::Set(value),
            (None, false) => FieldChange::Keep,
        }
    }

    fn apply(self, current: Option<String>) -> Option<String> {
        match self {
            FieldChange::Keep => current,
            FieldChange::Set(value) => Some(value),
            FieldChange::Clear => None,
        }
    }
}

/// Flags given to `edit`. Unset flags keep the stored value.
#[derive(Debug, Clone)]
pub struct EditChanges {
    pub media_type: Option<MediaType>,
    pub title: Option<String>,
    pub rating: Option<Rating>,
    pub creator: FieldChange,
    pub review: FieldChange,
}

impl EditChanges {
    pub fn is_empty(&self) -> bool {
        self.media_type.is_none()
            && self.title.is_none()
            && self.rating.is_none()
            && self.creator == FieldChange::Keep
            && self.review == FieldChange::Keep
    }

    /// Merge over the current fields, producing the full replacement set.
    pub fn merge(self, current: MediaFields) -> MediaFields {
        MediaFields {
            media_type: self.media_type.unwrap_or(current.media_type),
            title: self.title.unwrap_or(current.title),
            creator: self.creator.apply(current.creator),
            rating: self.rating.unwrap_or(current.rating),
            review: self.review.apply(current.review),
        }
        .normalized()
    }
}

pub async fn run_edit(ctx: &AppContext, id: &str, changes: EditChanges) -> Result<()> {
    let output = &ctx.output;
    if changes.is_empty() {
        output.warn("Nothing to change. Pass at least one of --type, --title, --rating, --creator, --review");
        return Ok(());
    }

    let lifecycle = ctx.open_lifecycle();
    let items = lifecycle.items()?;
    let current = resolve_item(&items, id)?;

    let fields = changes.merge(current.fields());
    fields.validate()?;

    debug!("Editing {}", current.id);
    let updated = lifecycle.update(current.id.clone(), fields)?;

    if !output.is_human() {
        let kind = if updated.is_some() { "updated" } else { "unchanged" };
        output.json(&json!({
            "type": kind,
            "id": current.id,
            "item": updated
        }));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current() -> MediaFields {
        MediaFields::new(MediaType::Movie, "Arrival", Rating::new(4).unwrap())
            .with_creator("Denis Villeneuve")
            .with_review("Quiet and huge")
    }

    fn no_changes() -> EditChanges {
        EditChanges {
            media_type: None,
            title: None,
            rating: None,
            creator: FieldChange::Keep,
            review: FieldChange::Keep,
        }
    }

    #[test]
    fn test_from_flags() {
        assert_eq!(FieldChange::from_flags(None, false), FieldChange::Keep);
        assert_eq!(FieldChange::from_flags(Some("x".into()), false), FieldChange::Set("x".into()));
        assert_eq!(FieldChange::from_flags(None, true), FieldChange::Clear);
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let mut changes = no_changes();
        assert!(changes.is_empty());
        changes.rating = Some(Rating::new(5).unwrap());

        let merged = changes.merge(current());
        assert_eq!(merged.rating.value(), 5);
        assert_eq!(merged.title, "Arrival");
        assert_eq!(merged.creator.as_deref(), Some("Denis Villeneuve"));
        assert_eq!(merged.review.as_deref(), Some("Quiet and huge"));
    }

    #[test]
    fn test_merge_can_change_type_and_clear_optionals() {
        let changes = EditChanges {
            media_type: Some(MediaType::Book),
            title: Some("  Story of Your Life ".into()),
            creator: FieldChange::Set("Ted Chiang".into()),
            review: FieldChange::Clear,
            ..no_changes()
        };

        let merged = changes.merge(current());
        assert_eq!(merged.media_type, MediaType::Book);
        assert_eq!(merged.title, "Story of Your Life");
        assert_eq!(merged.creator.as_deref(), Some("Ted Chiang"));
        assert_eq!(merged.review, None);
    }
}
