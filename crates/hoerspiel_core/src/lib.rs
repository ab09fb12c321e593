//! Hoerspiel core: catalog reconciliation and the pure UI state machine.
mod effect;
mod item;
mod msg;
mod reconcile;
mod rules;
mod state;
mod update;
mod view_model;

/// Identifies one outstanding fetch; results carrying another id are stale.
pub type RequestId = u64;

pub use effect::{Effect, SearchRequest};
pub use item::{sort_newest_first, CatalogId, CatalogItem};
pub use msg::{FetchOutcome, Msg};
pub use reconcile::{apply_filter, dedupe_by_id, reconcile, reconcile_with, CatalogView, FilterMode};
pub use rules::{
    Classification, ClassificationRules, CANONICAL_GENRE, EPISODE_PATTERN, SPECIAL_MARKERS,
    UNKNOWN_EPISODE,
};
pub use state::{
    AppState, BrowserSettings, LandingSection, Layout, Page, SectionOrder, SectionState,
    DEFAULT_SEARCH_TARGET, DEFAULT_SERIES_TARGET, DEFAULT_SERIES_TERM,
};
pub use update::update;
pub use view_model::{
    AppViewModel, CatalogRowView, PageKind, SectionView, FAILURE_MESSAGE, LANDING_HEADING,
    NO_RESULTS_MESSAGE, SEARCH_HEADING,
};
