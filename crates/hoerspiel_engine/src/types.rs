use std::fmt;

use hoerspiel_core::{CatalogItem, FetchOutcome, RequestId};

/// One page request against the upstream search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub term: String,
    pub limit: usize,
    pub offset: usize,
}

/// One decoded page.
///
/// `record_count` is the number of records upstream sent, including records
/// dropped by validation; the pagination cursor advances by it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchPage {
    pub items: Vec<CatalogItem>,
    pub record_count: usize,
}

impl SearchPage {
    pub fn from_items(items: Vec<CatalogItem>) -> Self {
        let record_count = items.len();
        Self {
            items,
            record_count,
        }
    }
}

/// Why a fetch session stopped accumulating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination {
    TargetReached,
    SourceExhausted,
    /// A non-empty page brought nothing new.
    Stalled,
    Failed(FetchError),
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::TargetReached => write!(f, "target reached"),
            Termination::SourceExhausted => write!(f, "source exhausted"),
            Termination::Stalled => write!(f, "stalled on duplicates"),
            Termination::Failed(err) => write!(f, "failed: {err}"),
        }
    }
}

/// Everything one `fetch` call produced. Items are unique by id, in arrival
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchReport {
    pub items: Vec<CatalogItem>,
    pub termination: Termination,
    pub pages: usize,
}

impl FetchReport {
    pub fn failed(&self) -> bool {
        matches!(self.termination, Termination::Failed(_))
    }

    pub fn into_outcome(self) -> FetchOutcome {
        let failed = self.failed();
        FetchOutcome {
            items: self.items,
            failed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    SearchCompleted {
        request_id: RequestId,
        report: FetchReport,
    },
    /// Reports in the order the searches were requested.
    SearchAllCompleted {
        request_id: RequestId,
        reports: Vec<FetchReport>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidQuery,
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    MalformedBody,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidQuery => write!(f, "invalid query"),
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::MalformedBody => write!(f, "malformed response body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
