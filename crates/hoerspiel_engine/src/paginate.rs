use std::collections::HashSet;

use engine_logging::{engine_debug, engine_info, engine_warn};
use hoerspiel_core::{CatalogId, CatalogItem};

use crate::fetch::SearchSource;
use crate::{FailureKind, FetchError, FetchReport, PageQuery, Termination};

/// Accumulates pages from a [`SearchSource`] until the target is met, the
/// source runs dry, a page brings nothing new, or a request fails.
///
/// Pages of one session are requested one after another. A failure keeps
/// everything accumulated so far; callers never see an error.
pub struct PaginatedFetcher<S> {
    source: S,
    page_size: usize,
}

impl<S: SearchSource> PaginatedFetcher<S> {
    pub fn new(source: S) -> Self {
        let page_size = source.page_size_cap().max(1);
        Self { source, page_size }
    }

    /// Requests smaller pages than the source allows. Clamped to the cap.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.clamp(1, self.source.page_size_cap().max(1));
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub async fn fetch(&self, term: &str, target: usize) -> FetchReport {
        let mut session = FetchSession::new(target);

        if term.trim().is_empty() {
            engine_warn!("Refusing to search for a blank term");
            return session.finish(
                term,
                Termination::Failed(FetchError::new(
                    FailureKind::InvalidQuery,
                    "blank search term",
                )),
            );
        }
        if target == 0 {
            return session.finish(term, Termination::TargetReached);
        }

        let termination = loop {
            let query = PageQuery {
                term: term.to_string(),
                limit: self.page_size.min(session.remaining()),
                offset: session.offset,
            };
            engine_debug!(
                "Requesting page term={:?} offset={} limit={}",
                query.term,
                query.offset,
                query.limit
            );

            let page = match self.source.page(&query).await {
                Ok(page) => page,
                Err(err) => {
                    engine_warn!(
                        "Search {:?} failed at offset {}: {}; keeping {} items",
                        term,
                        session.offset,
                        err,
                        session.items.len()
                    );
                    break Termination::Failed(err);
                }
            };
            session.pages += 1;

            if page.record_count == 0 {
                break Termination::SourceExhausted;
            }
            session.offset += page.record_count;

            if session.absorb(page.items) == 0 {
                break Termination::Stalled;
            }
            if session.remaining() == 0 {
                break Termination::TargetReached;
            }
        };

        session.finish(term, termination)
    }
}

struct FetchSession {
    target: usize,
    items: Vec<CatalogItem>,
    seen: HashSet<CatalogId>,
    offset: usize,
    pages: usize,
}

impl FetchSession {
    fn new(target: usize) -> Self {
        Self {
            target,
            items: Vec::new(),
            seen: HashSet::new(),
            offset: 0,
            pages: 0,
        }
    }

    fn remaining(&self) -> usize {
        self.target.saturating_sub(self.items.len())
    }

    /// Appends unseen items up to the target; returns how many were added.
    fn absorb(&mut self, page: Vec<CatalogItem>) -> usize {
        let before = self.items.len();
        for item in page {
            if self.remaining() == 0 {
                break;
            }
            if self.seen.insert(item.id) {
                self.items.push(item);
            }
        }
        self.items.len() - before
    }

    fn finish(self, term: &str, termination: Termination) -> FetchReport {
        engine_info!(
            "Search {:?} finished: {} items in {} pages, {}",
            term,
            self.items.len(),
            self.pages,
            termination
        );
        FetchReport {
            items: self.items,
            termination,
            pages: self.pages,
        }
    }
}
