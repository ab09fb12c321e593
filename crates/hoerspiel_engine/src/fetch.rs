use std::sync::Arc;
use std::time::Duration;

use engine_logging::engine_trace;
use futures_util::StreamExt;
use url::Url;

use crate::decode::decode_page;
use crate::{FailureKind, FetchError, PageQuery, SearchPage};

pub const ITUNES_BASE_URL: &str = "https://itunes.apple.com";
/// Largest `limit` the iTunes search accepts.
pub const MAX_PAGE_SIZE: usize = 200;

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub base_url: String,
    pub country: String,
    pub media: String,
    pub entity: String,
    pub page_size: usize,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: ITUNES_BASE_URL.to_string(),
            country: "DE".to_string(),
            media: "music".to_string(),
            entity: "album".to_string(),
            page_size: MAX_PAGE_SIZE,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// One upstream catalog search, one page per call.
#[async_trait::async_trait]
pub trait SearchSource: Send + Sync {
    async fn page(&self, query: &PageQuery) -> Result<SearchPage, FetchError>;

    /// Upper bound for `PageQuery::limit`.
    fn page_size_cap(&self) -> usize {
        MAX_PAGE_SIZE
    }
}

#[async_trait::async_trait]
impl<S: SearchSource + ?Sized> SearchSource for Arc<S> {
    async fn page(&self, query: &PageQuery) -> Result<SearchPage, FetchError> {
        self.as_ref().page(query).await
    }

    fn page_size_cap(&self) -> usize {
        self.as_ref().page_size_cap()
    }
}

#[derive(Debug, Clone)]
pub struct ItunesSource {
    settings: FetchSettings,
    client: reqwest::Client,
}

impl ItunesSource {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    pub fn page_url(&self, query: &PageQuery) -> Result<Url, FetchError> {
        let endpoint = format!("{}/search", self.settings.base_url.trim_end_matches('/'));
        let limit = query.limit.to_string();
        let offset = query.offset.to_string();
        Url::parse_with_params(
            &endpoint,
            [
                ("term", query.term.as_str()),
                ("country", self.settings.country.as_str()),
                ("media", self.settings.media.as_str()),
                ("entity", self.settings.entity.as_str()),
                ("limit", limit.as_str()),
                ("offset", offset.as_str()),
            ],
        )
        .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))
    }
}

#[async_trait::async_trait]
impl SearchSource for ItunesSource {
    async fn page(&self, query: &PageQuery) -> Result<SearchPage, FetchError> {
        let url = self.page_url(query)?;
        engine_trace!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }

        decode_page(&body)
    }

    fn page_size_cap(&self) -> usize {
        self.settings.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
