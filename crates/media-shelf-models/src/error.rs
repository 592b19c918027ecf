use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("rating {0} is outside the 1-5 scale")]
    RatingOutOfRange(i64),

    #[error("rating '{0}' is not a whole number")]
    InvalidRating(String),

    #[error("unknown media type '{0}' (expected movie, book or podcast)")]
    UnknownMediaType(String),

    #[error("unknown sort mode '{0}' (expected recent, rating or title)")]
    UnknownSortMode(String),

    #[error("unknown type filter '{0}' (expected all, movie, book or podcast)")]
    UnknownTypeFilter(String),

    #[error("title must not be empty")]
    EmptyTitle,
}
