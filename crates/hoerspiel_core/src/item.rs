use chrono::{DateTime, Utc};

/// Upstream release identifier (`collectionId`).
pub type CatalogId = u64;

/// One searchable release, already validated at the fetch boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    pub id: CatalogId,
    pub title: String,
    pub artist: String,
    pub artwork_ref: Option<String>,
    pub detail_ref: Option<String>,
    pub release_date: DateTime<Utc>,
    pub genre: Option<String>,
}

impl CatalogItem {
    pub fn genre_is(&self, label: &str) -> bool {
        self.genre.as_deref() == Some(label)
    }
}

/// Stable sort, newest release first. Ties keep their incoming order.
pub fn sort_newest_first(items: &mut [CatalogItem]) {
    items.sort_by(|a, b| b.release_date.cmp(&a.release_date));
}
