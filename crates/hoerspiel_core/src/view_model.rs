use chrono::Datelike;

use crate::{AppState, CatalogId, CatalogItem, ClassificationRules, FilterMode, Layout, Page};

pub const LANDING_HEADING: &str = "Hörspiele entdecken";
pub const SEARCH_HEADING: &str = "Suche";
pub const FAILURE_MESSAGE: &str =
    "Ein Fehler ist aufgetreten. Bitte versuchen Sie es später erneut.";
pub const NO_RESULTS_MESSAGE: &str = "Keine Ergebnisse gefunden.";

const ARTWORK_THUMB_SIZE: &str = "100x100";
const ARTWORK_CARD_SIZE: &str = "400x400";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Landing,
    Series,
    Search,
}

/// Immutable snapshot handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub page: PageKind,
    pub heading: String,
    pub loading: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub count_label: Option<String>,
    /// Active filter; only the series page offers one.
    pub filter: Option<FilterMode>,
    pub layout: Layout,
    pub query: String,
    pub rows: Vec<CatalogRowView>,
    pub sections: Vec<SectionView>,
}

/// One card or table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRowView {
    pub id: CatalogId,
    pub title: String,
    pub artist: String,
    pub artwork_url: Option<String>,
    pub release_year: i32,
    pub link: Option<String>,
}

impl From<&CatalogItem> for CatalogRowView {
    fn from(item: &CatalogItem) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            artist: item.artist.clone(),
            artwork_url: item
                .artwork_ref
                .as_deref()
                .map(|url| url.replace(ARTWORK_THUMB_SIZE, ARTWORK_CARD_SIZE)),
            release_year: item.release_date.year(),
            link: item.detail_ref.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub title: String,
    pub cards: Vec<CatalogRowView>,
    pub series_link: Option<String>,
}

impl AppState {
    pub fn view(&self) -> AppViewModel {
        let loading = self.is_loading();
        let error = self.failed().then(|| FAILURE_MESSAGE.to_string());
        let rows_of = |items: &[CatalogItem]| -> Vec<CatalogRowView> {
            items.iter().map(CatalogRowView::from).collect()
        };

        match self.page() {
            Page::Landing => AppViewModel {
                page: PageKind::Landing,
                heading: LANDING_HEADING.to_string(),
                loading,
                error,
                notice: None,
                count_label: None,
                filter: None,
                layout: self.layout(),
                query: self.query().to_string(),
                rows: Vec::new(),
                sections: self
                    .sections()
                    .iter()
                    .filter(|section| !section.items.is_empty())
                    .map(|section| SectionView {
                        title: section.title.clone(),
                        cards: rows_of(&section.items),
                        series_link: section.series_link.clone(),
                    })
                    .collect(),
            },
            Page::Series { term } => {
                let items = self
                    .catalog()
                    .filtered(self.filter(), ClassificationRules::standard());
                AppViewModel {
                    page: PageKind::Series,
                    heading: term.clone(),
                    loading,
                    error,
                    notice: None,
                    count_label: (!loading).then(|| format!("{} Folgen gefunden", items.len())),
                    filter: Some(self.filter()),
                    layout: self.layout(),
                    query: self.query().to_string(),
                    rows: rows_of(&items),
                    sections: Vec::new(),
                }
            }
            Page::Search => {
                let submitted = self.submitted_query();
                let finished = submitted.is_some() && !loading;
                let empty = self.results().is_empty();
                let sections = match submitted {
                    Some(query) if finished && !empty => vec![SectionView {
                        title: format!("Ergebnisse für \"{query}\""),
                        cards: rows_of(self.results()),
                        series_link: None,
                    }],
                    _ => Vec::new(),
                };
                AppViewModel {
                    page: PageKind::Search,
                    heading: SEARCH_HEADING.to_string(),
                    loading,
                    notice: (finished && empty && error.is_none())
                        .then(|| NO_RESULTS_MESSAGE.to_string()),
                    error,
                    count_label: None,
                    filter: None,
                    layout: self.layout(),
                    query: self.query().to_string(),
                    rows: Vec::new(),
                    sections,
                }
            }
        }
    }
}
