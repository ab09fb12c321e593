use chrono::{DateTime, Utc};
use engine_logging::engine_warn;
use hoerspiel_core::CatalogItem;
use serde::Deserialize;
use thiserror::Error;

use crate::{FailureKind, FetchError, SearchPage};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResponse {
    #[serde(default)]
    result_count: Option<u64>,
    results: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCollection {
    collection_id: Option<u64>,
    collection_name: Option<String>,
    artist_name: Option<String>,
    artwork_url100: Option<String>,
    collection_view_url: Option<String>,
    release_date: Option<String>,
    primary_genre_name: Option<String>,
}

/// Why a single record was dropped at the boundary.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("unexpected record shape: {0}")]
    Shape(#[from] serde_json::Error),
    #[error("missing field {0}")]
    MissingField(&'static str),
    #[error("unparseable release date {value:?}: {source}")]
    ReleaseDate {
        value: String,
        source: chrono::ParseError,
    },
}

/// Parses one search response body. Records that do not conform are dropped
/// and logged; a body that is not a search response at all is an error.
pub fn decode_page(body: &[u8]) -> Result<SearchPage, FetchError> {
    let raw: RawResponse = serde_json::from_slice(body)
        .map_err(|err| FetchError::new(FailureKind::MalformedBody, err.to_string()))?;

    if let Some(declared) = raw.result_count {
        if declared != raw.results.len() as u64 {
            engine_warn!(
                "resultCount {} disagrees with {} records received",
                declared,
                raw.results.len()
            );
        }
    }

    let record_count = raw.results.len();
    let mut items = Vec::with_capacity(record_count);
    for (index, value) in raw.results.into_iter().enumerate() {
        match decode_record(value) {
            Ok(item) => items.push(item),
            Err(err) => engine_warn!("Dropping record {}: {}", index, err),
        }
    }

    Ok(SearchPage {
        items,
        record_count,
    })
}

/// Validates one upstream record into a [`CatalogItem`].
pub fn decode_record(value: serde_json::Value) -> Result<CatalogItem, RecordError> {
    let raw: RawCollection = serde_json::from_value(value)?;

    let id = raw
        .collection_id
        .ok_or(RecordError::MissingField("collectionId"))?;
    let title = non_blank(raw.collection_name).ok_or(RecordError::MissingField("collectionName"))?;
    let artist = non_blank(raw.artist_name).ok_or(RecordError::MissingField("artistName"))?;
    let release_date = raw
        .release_date
        .ok_or(RecordError::MissingField("releaseDate"))
        .and_then(|value| parse_release_date(&value))?;

    Ok(CatalogItem {
        id,
        title,
        artist,
        artwork_ref: non_blank(raw.artwork_url100),
        detail_ref: non_blank(raw.collection_view_url),
        release_date,
        genre: non_blank(raw.primary_genre_name),
    })
}

fn parse_release_date(value: &str) -> Result<DateTime<Utc>, RecordError> {
    DateTime::parse_from_rfc3339(value)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|source| RecordError::ReleaseDate {
            value: value.to_string(),
            source,
        })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
