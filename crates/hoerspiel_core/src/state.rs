use crate::item::sort_newest_first;
use crate::{
    CatalogItem, CatalogView, ClassificationRules, FetchOutcome, FilterMode, RequestId,
    SearchRequest,
};

pub const DEFAULT_SERIES_TERM: &str = "Benjamin Blümchen";
pub const DEFAULT_SERIES_TARGET: usize = 600;
pub const DEFAULT_SEARCH_TARGET: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    #[default]
    Grid,
    Table,
}

/// How a landing section orders what its search returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionOrder {
    Upstream,
    NewestFirst { keep: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandingSection {
    pub title: String,
    pub term: String,
    pub target: usize,
    pub order: SectionOrder,
    /// Series page term offered as "show all" link, if any.
    pub series_link: Option<String>,
}

impl LandingSection {
    fn arrange(&self, mut items: Vec<CatalogItem>) -> Vec<CatalogItem> {
        match self.order {
            SectionOrder::Upstream => items,
            SectionOrder::NewestFirst { keep } => {
                sort_newest_first(&mut items);
                items.truncate(keep);
                items
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserSettings {
    pub series_target: usize,
    pub search_target: usize,
    pub landing: Vec<LandingSection>,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            series_target: DEFAULT_SERIES_TARGET,
            search_target: DEFAULT_SEARCH_TARGET,
            landing: vec![
                LandingSection {
                    title: "TKKG".to_string(),
                    term: "TKKG".to_string(),
                    target: 20,
                    order: SectionOrder::Upstream,
                    series_link: None,
                },
                LandingSection {
                    title: DEFAULT_SERIES_TERM.to_string(),
                    term: DEFAULT_SERIES_TERM.to_string(),
                    target: 100,
                    order: SectionOrder::NewestFirst { keep: 20 },
                    series_link: Some(DEFAULT_SERIES_TERM.to_string()),
                },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Landing,
    Series {
        term: String,
    },
    Search,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SectionState {
    pub title: String,
    pub items: Vec<CatalogItem>,
    pub series_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    settings: BrowserSettings,
    page: Page,
    next_request_id: RequestId,
    pending: Option<RequestId>,
    query: String,
    submitted_query: Option<String>,
    catalog: CatalogView,
    results: Vec<CatalogItem>,
    sections: Vec<SectionState>,
    filter: FilterMode,
    layout: Layout,
    failed: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: BrowserSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> &BrowserSettings {
        &self.settings
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_request(&self) -> Option<RequestId> {
        self.pending
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn submitted_query(&self) -> Option<&str> {
        self.submitted_query.as_deref()
    }

    pub fn catalog(&self) -> &CatalogView {
        &self.catalog
    }

    pub fn results(&self) -> &[CatalogItem] {
        &self.results
    }

    pub fn sections(&self) -> &[SectionState] {
        &self.sections
    }

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn failed(&self) -> bool {
        self.failed
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Switches page and drops everything fetched for the previous one. Any
    /// request still in flight becomes stale.
    pub(crate) fn navigate(&mut self, page: Page) {
        self.page = page;
        self.pending = None;
        self.submitted_query = None;
        self.catalog = CatalogView::default();
        self.results.clear();
        self.sections.clear();
        self.filter = FilterMode::default();
        self.failed = false;
        self.mark_dirty();
    }

    pub(crate) fn begin_request(&mut self) -> RequestId {
        self.next_request_id += 1;
        self.pending = Some(self.next_request_id);
        self.failed = false;
        self.mark_dirty();
        self.next_request_id
    }

    /// Clears the pending slot when `request_id` is the one awaited.
    pub(crate) fn finish_request(&mut self, request_id: RequestId) -> bool {
        if self.pending != Some(request_id) {
            return false;
        }
        self.pending = None;
        self.mark_dirty();
        true
    }

    pub(crate) fn set_query(&mut self, query: String) {
        self.query = query;
        self.mark_dirty();
    }

    pub(crate) fn set_submitted_query(&mut self, query: String) {
        self.submitted_query = Some(query);
        self.results.clear();
    }

    pub(crate) fn set_filter(&mut self, filter: FilterMode) {
        if self.filter != filter {
            self.filter = filter;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_layout(&mut self, layout: Layout) {
        if self.layout != layout {
            self.layout = layout;
            self.mark_dirty();
        }
    }

    pub(crate) fn landing_requests(&self) -> Vec<SearchRequest> {
        self.settings
            .landing
            .iter()
            .map(|section| SearchRequest {
                term: section.term.clone(),
                target: section.target,
            })
            .collect()
    }

    pub(crate) fn apply_catalog(&mut self, outcome: FetchOutcome) {
        self.catalog = CatalogView::build(&outcome.items, ClassificationRules::standard());
        self.failed = outcome.failed && self.catalog.is_empty();
    }

    pub(crate) fn apply_results(&mut self, outcome: FetchOutcome) {
        self.results = crate::dedupe_by_id(&outcome.items);
        self.failed = outcome.failed && self.results.is_empty();
    }

    pub(crate) fn apply_sections(&mut self, outcomes: Vec<FetchOutcome>) {
        let any_failed = outcomes.iter().any(|outcome| outcome.failed);
        self.sections = self
            .settings
            .landing
            .iter()
            .zip(outcomes)
            .map(|(section, outcome)| SectionState {
                title: section.title.clone(),
                items: section.arrange(crate::dedupe_by_id(&outcome.items)),
                series_link: section.series_link.clone(),
            })
            .collect();
        let all_empty = self.sections.iter().all(|section| section.items.is_empty());
        self.failed = any_failed && all_empty;
    }
}
