//! Hoerspiel engine: upstream search, pagination and background execution.
mod decode;
mod engine;
mod fetch;
mod paginate;
mod types;

pub use decode::{decode_page, decode_record, RecordError};
pub use engine::EngineHandle;
pub use fetch::{FetchSettings, ItunesSource, SearchSource, ITUNES_BASE_URL, MAX_PAGE_SIZE};
pub use paginate::PaginatedFetcher;
pub use types::{
    EngineEvent, FailureKind, FetchError, FetchReport, PageQuery, SearchPage, Termination,
};
