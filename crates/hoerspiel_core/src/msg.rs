use crate::{CatalogItem, FilterMode, Layout, RequestId};

/// Result of one search as seen by the UI: whatever was accumulated, plus
/// whether the fetch stopped on a failure.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchOutcome {
    pub items: Vec<CatalogItem>,
    pub failed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Navigate to the landing page.
    OpenLanding,
    /// Navigate to the catalog page of one series.
    OpenSeries { term: String },
    /// Navigate to the free-text search page.
    OpenSearch,
    /// User edited the search box.
    QueryChanged(String),
    /// User submitted the search box.
    QuerySubmitted,
    /// User picked a filter on the series page.
    FilterChanged(FilterMode),
    /// User toggled grid/table.
    LayoutChanged(Layout),
    /// Engine finished a single search.
    SearchCompleted {
        request_id: RequestId,
        outcome: FetchOutcome,
    },
    /// Engine finished all landing sections.
    LandingCompleted {
        request_id: RequestId,
        sections: Vec<FetchOutcome>,
    },
}
