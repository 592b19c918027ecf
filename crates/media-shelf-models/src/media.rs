use crate::error::ModelError;
use crate::rating::Rating;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One cataloged review record.
///
/// Field names on the wire are camelCase (`dateAdded`) and the media type is
/// stored under `type`, so the persisted collection stays readable by other
/// tools that share the same library document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>, // Director, author or host
    pub rating: Rating,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
    pub date_added: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Book,
    Podcast,
}

/// The editable part of a [`MediaItem`]: everything except `id` and `dateAdded`.
///
/// Create and Update both carry a full `MediaFields`; there are no partial
/// updates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MediaFields {
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    pub rating: Rating,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
}

impl MediaItem {
    pub fn new(id: String, date_added: DateTime<Utc>, fields: MediaFields) -> Self {
        Self {
            id,
            media_type: fields.media_type,
            title: fields.title,
            creator: fields.creator,
            rating: fields.rating,
            review: fields.review,
            date_added,
        }
    }

    pub fn fields(&self) -> MediaFields {
        MediaFields {
            media_type: self.media_type,
            title: self.title.clone(),
            creator: self.creator.clone(),
            rating: self.rating,
            review: self.review.clone(),
        }
    }

    /// Replace every editable field. `id` and `date_added` are left untouched.
    pub fn replace_fields(&mut self, fields: MediaFields) {
        self.media_type = fields.media_type;
        self.title = fields.title;
        self.creator = fields.creator;
        self.rating = fields.rating;
        self.review = fields.review;
    }
}

impl MediaFields {
    pub fn new(media_type: MediaType, title: impl Into<String>, rating: Rating) -> Self {
        Self {
            media_type,
            title: title.into(),
            creator: None,
            rating,
            review: None,
        }
    }

    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    pub fn with_review(mut self, review: impl Into<String>) -> Self {
        self.review = Some(review.into());
        self
    }

    /// Form-level check. The lifecycle manager trusts its input and never calls this.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.title.trim().is_empty() {
            return Err(ModelError::EmptyTitle);
        }
        Ok(())
    }

    /// Trim text fields and turn blank optionals into `None`.
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.creator = normalize_optional(self.creator);
        self.review = normalize_optional(self.review);
        self
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl MediaType {
    pub const ALL: [MediaType; 3] = [MediaType::Movie, MediaType::Book, MediaType::Podcast];

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Book => "book",
            MediaType::Podcast => "podcast",
        }
    }

    /// What the `creator` field means for this type.
    pub fn creator_label(&self) -> &'static str {
        match self {
            MediaType::Movie => "Director",
            MediaType::Book => "Author",
            MediaType::Podcast => "Host",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movie" => Ok(MediaType::Movie),
            "book" => Ok(MediaType::Book),
            "podcast" => Ok(MediaType::Podcast),
            _ => Err(ModelError::UnknownMediaType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_item() -> MediaItem {
        MediaItem::new(
            "abc".to_string(),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            MediaFields::new(MediaType::Book, "Dune", Rating::new(5).unwrap())
                .with_creator("Frank Herbert"),
        )
    }

    #[test]
    fn test_media_item_wire_format() {
        let json = serde_json::to_value(sample_item()).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["type"], "book");
        assert_eq!(json["title"], "Dune");
        assert_eq!(json["creator"], "Frank Herbert");
        assert_eq!(json["rating"], 5);
        assert_eq!(json["dateAdded"], "2024-01-01T00:00:00Z");
        // Absent optionals are omitted, not written as null
        assert!(json.get("review").is_none());
    }

    #[test]
    fn test_media_item_accepts_null_optionals() {
        let json = r#"{"id":"1","type":"podcast","title":"X","creator":null,"rating":3,"dateAdded":"2024-03-01T10:00:00.000Z"}"#;
        let item: MediaItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.media_type, MediaType::Podcast);
        assert_eq!(item.creator, None);
        assert_eq!(item.review, None);
    }

    #[test]
    fn test_media_item_rejects_bad_rating() {
        let json = r#"{"id":"1","type":"movie","title":"X","rating":11,"dateAdded":"2024-03-01T10:00:00Z"}"#;
        assert!(serde_json::from_str::<MediaItem>(json).is_err());
    }

    #[test]
    fn test_replace_fields_keeps_identity() {
        let mut item = sample_item();
        let original_date = item.date_added;
        item.replace_fields(MediaFields::new(MediaType::Movie, "Dune (2021)", Rating::new(4).unwrap()));

        assert_eq!(item.id, "abc");
        assert_eq!(item.date_added, original_date);
        assert_eq!(item.media_type, MediaType::Movie);
        assert_eq!(item.title, "Dune (2021)");
        assert_eq!(item.creator, None);
    }

    #[test]
    fn test_fields_validate_and_normalize() {
        let blank = MediaFields::new(MediaType::Movie, "   ", Rating::new(2).unwrap());
        assert_eq!(blank.validate(), Err(ModelError::EmptyTitle));

        let fields = MediaFields::new(MediaType::Movie, "  Arrival ", Rating::new(4).unwrap())
            .with_creator(" ")
            .with_review(" Quiet and strange. ")
            .normalized();
        assert!(fields.validate().is_ok());
        assert_eq!(fields.title, "Arrival");
        assert_eq!(fields.creator, None);
        assert_eq!(fields.review.as_deref(), Some("Quiet and strange."));
    }

    #[test]
    fn test_media_type_parse() {
        assert_eq!("Movie".parse::<MediaType>().unwrap(), MediaType::Movie);
        assert_eq!("podcast".parse::<MediaType>().unwrap(), MediaType::Podcast);
        assert!("album".parse::<MediaType>().is_err());
    }
}
