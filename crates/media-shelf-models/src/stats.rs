use crate::media::{MediaItem, MediaType};
use serde::{Deserialize, Serialize};

/// Aggregate view over the whole collection. Always recomputed, never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MediaStats {
    pub total_reviews: usize,
    pub average_rating: f64, // 0.0 when the collection is empty
    pub by_type: StatsByType,
    pub recent_activity: Vec<MediaItem>, // Full collection, newest first
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TypeStats {
    pub count: usize,
    pub average_rating: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct StatsByType {
    pub movie: TypeStats,
    pub book: TypeStats,
    pub podcast: TypeStats,
}

impl StatsByType {
    pub fn get(&self, media_type: MediaType) -> &TypeStats {
        match media_type {
            MediaType::Movie => &self.movie,
            MediaType::Book => &self.book,
            MediaType::Podcast => &self.podcast,
        }
    }

    pub fn get_mut(&mut self, media_type: MediaType) -> &mut TypeStats {
        match media_type {
            MediaType::Movie => &mut self.movie,
            MediaType::Book => &mut self.book,
            MediaType::Podcast => &mut self.podcast,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (MediaType, &TypeStats)> {
        MediaType::ALL.into_iter().map(move |t| (t, self.get(t)))
    }
}
