pub mod error;
pub mod media;
pub mod query;
pub mod rating;
pub mod stats;

pub use error::ModelError;
pub use media::{MediaFields, MediaItem, MediaType};
pub use query::{SortMode, TypeFilter};
pub use rating::Rating;
pub use stats::{MediaStats, StatsByType, TypeStats};
