use crate::error::ModelError;
use crate::media::MediaType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordering applied to a catalog view. Never changes storage order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Newest `dateAdded` first
    #[default]
    Recent,
    /// Highest rating first
    Rating,
    /// Alphabetical by title
    Title,
}

/// Type selector for the catalog view: everything, or one media type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(try_from = "String", into = "String")]
pub enum TypeFilter {
    #[default]
    All,
    Only(MediaType),
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Recent => "recent",
            SortMode::Rating => "rating",
            SortMode::Title => "title",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "recent" => Ok(SortMode::Recent),
            "rating" => Ok(SortMode::Rating),
            "title" => Ok(SortMode::Title),
            _ => Err(ModelError::UnknownSortMode(s.to_string())),
        }
    }
}

impl TypeFilter {
    pub fn matches(&self, media_type: MediaType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(selected) => *selected == media_type,
        }
    }
}

impl From<MediaType> for TypeFilter {
    fn from(media_type: MediaType) -> Self {
        TypeFilter::Only(media_type)
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::All => f.write_str("all"),
            TypeFilter::Only(media_type) => write!(f, "{}", media_type),
        }
    }
}

impl FromStr for TypeFilter {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(TypeFilter::All);
        }
        s.parse::<MediaType>()
            .map(TypeFilter::Only)
            .map_err(|_| ModelError::UnknownTypeFilter(s.to_string()))
    }
}

impl TryFrom<String> for TypeFilter {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeFilter> for String {
    fn from(filter: TypeFilter) -> Self {
        filter.to_string()
    }
}
