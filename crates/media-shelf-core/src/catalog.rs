// Derived views over the collection: filtering, sorting and statistics.
//
// Everything here is a pure function of its input slice. Nothing is cached and
// the input is never mutated; callers get fresh vectors back.

use media_shelf_models::{MediaItem, MediaStats, MediaType, SortMode, StatsByType, TypeFilter};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::trace;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Search text, type selector and ordering for one catalog view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub text: String,
    pub type_filter: TypeFilter,
    pub sort: SortMode,
}

/// Result of addressing an item by a (possibly abbreviated) id.
#[derive(Debug, PartialEq)]
pub enum IdLookup<'a> {
    Found(&'a MediaItem),
    NotFound,
    Ambiguous(Vec<&'a MediaItem>),
}

/// Keep items matching `query` (case-insensitive substring of title or
/// creator) and `type_filter`. An empty query matches everything.
pub fn filter_items(items: &[MediaItem], query: &str, type_filter: TypeFilter) -> Vec<MediaItem> {
    let needle = query.to_lowercase();

    let filtered: Vec<MediaItem> = items
        .iter()
        .filter(|item| type_filter.matches(item.media_type))
        .filter(|item| matches_text(item, &needle))
        .cloned()
        .collect();

    trace!(
        "filter_items: query={:?}, type={}, input_count={}, result_count={}",
        query,
        type_filter,
        items.len(),
        filtered.len()
    );
    filtered
}

fn matches_text(item: &MediaItem, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    if item.title.to_lowercase().contains(needle) {
        return true;
    }
    // Items without a creator never match on creator
    item.creator
        .as_deref()
        .map(|creator| creator.to_lowercase().contains(needle))
        .unwrap_or(false)
}

/// Return a sorted copy. The sort is stable, so ties keep their input order.
pub fn sort_items(items: &[MediaItem], mode: SortMode) -> Vec<MediaItem> {
    let mut sorted = items.to_vec();
    match mode {
        SortMode::Recent => sorted.sort_by(|a, b| b.date_added.cmp(&a.date_added)),
        SortMode::Rating => sorted.sort_by(|a, b| b.rating.cmp(&a.rating)),
        SortMode::Title => sorted.sort_by(|a, b| compare_titles(&a.title, &b.title)),
    }
    sorted
}

/// Title order that ignores case and accents ("Émile" sorts with the E's),
/// falling back to the lowercase and then the raw text so that "apple" and
/// "Apple" still have a fixed relative order.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// Canonical decomposition with combining marks dropped, then lowercased.
fn collation_key(title: &str) -> String {
    title
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Filter then sort, as one view.
pub fn view(items: &[MediaItem], query: &CatalogQuery) -> Vec<MediaItem> {
    let filtered = filter_items(items, &query.text, query.type_filter);
    sort_items(&filtered, query.sort)
}

/// Aggregate statistics over the full collection.
///
/// Averages of empty buckets are 0.0, never NaN.
pub fn aggregate(items: &[MediaItem]) -> MediaStats {
    let mut by_type = StatsByType::default();
    let mut sums = [0u64; 3];
    let mut total_sum = 0u64;

    for item in items {
        let rating = item.rating.value() as u64;
        total_sum += rating;
        by_type.get_mut(item.media_type).count += 1;
        sums[item.media_type as usize] += rating;
    }

    for item_type in MediaType::ALL {
        let stats = by_type.get_mut(item_type);
        stats.average_rating = average(sums[item_type as usize], stats.count);
    }

    MediaStats {
        total_reviews: items.len(),
        average_rating: average(total_sum, items.len()),
        by_type,
        recent_activity: sort_items(items, SortMode::Recent),
    }
}

fn average(sum: u64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

pub fn find_by_id<'a>(items: &'a [MediaItem], id: &str) -> Option<&'a MediaItem> {
    items.iter().find(|item| item.id == id)
}

/// Resolve an id or a unique id prefix. An exact match always wins.
pub fn find_by_id_prefix<'a>(items: &'a [MediaItem], prefix: &str) -> IdLookup<'a> {
    let prefix = prefix.trim();
    if prefix.is_empty() {
        return IdLookup::NotFound;
    }
    if let Some(item) = find_by_id(items, prefix) {
        return IdLookup::Found(item);
    }

    let mut candidates: Vec<&MediaItem> = items
        .iter()
        .filter(|item| item.id.starts_with(prefix))
        .collect();

    match candidates.len() {
        0 => IdLookup::NotFound,
        1 => IdLookup::Found(candidates.remove(0)),
        _ => IdLookup::Ambiguous(candidates),
    }
}
