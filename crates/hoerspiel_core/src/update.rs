use engine_logging::engine_debug;

use crate::{AppState, Effect, Msg, Page, SearchRequest};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::OpenLanding => {
            state.navigate(Page::Landing);
            let requests = state.landing_requests();
            if requests.is_empty() {
                return (state, Vec::new());
            }
            let request_id = state.begin_request();
            vec![Effect::FetchAll {
                request_id,
                requests,
            }]
        }
        Msg::OpenSeries { term } => {
            let term = term.trim().to_string();
            if term.is_empty() {
                return (state, Vec::new());
            }
            let target = state.settings().series_target;
            state.navigate(Page::Series { term: term.clone() });
            let request_id = state.begin_request();
            vec![Effect::Fetch {
                request_id,
                request: SearchRequest { term, target },
            }]
        }
        Msg::OpenSearch => {
            state.navigate(Page::Search);
            Vec::new()
        }
        Msg::QueryChanged(query) => {
            state.set_query(query);
            Vec::new()
        }
        Msg::QuerySubmitted => {
            let term = state.query().trim().to_string();
            if term.is_empty() || *state.page() != Page::Search {
                return (state, Vec::new());
            }
            let target = state.settings().search_target;
            state.set_submitted_query(term.clone());
            let request_id = state.begin_request();
            vec![Effect::Fetch {
                request_id,
                request: SearchRequest { term, target },
            }]
        }
        Msg::FilterChanged(filter) => {
            state.set_filter(filter);
            Vec::new()
        }
        Msg::LayoutChanged(layout) => {
            state.set_layout(layout);
            Vec::new()
        }
        Msg::SearchCompleted {
            request_id,
            outcome,
        } => {
            if !state.finish_request(request_id) {
                engine_debug!("Dropping stale search result request_id={}", request_id);
                return (state, Vec::new());
            }
            match state.page() {
                Page::Series { .. } => state.apply_catalog(outcome),
                Page::Search => state.apply_results(outcome),
                Page::Landing => {}
            }
            Vec::new()
        }
        Msg::LandingCompleted {
            request_id,
            sections,
        } => {
            if !state.finish_request(request_id) {
                engine_debug!("Dropping stale landing result request_id={}", request_id);
                return (state, Vec::new());
            }
            if *state.page() == Page::Landing {
                state.apply_sections(sections);
            }
            Vec::new()
        }
    };

    (state, effects)
}
