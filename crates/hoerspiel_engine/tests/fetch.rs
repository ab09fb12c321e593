use std::time::Duration;

use hoerspiel_engine::{
    FailureKind, FetchSettings, ItunesSource, PageQuery, PaginatedFetcher, SearchSource,
    Termination,
};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> FetchSettings {
    FetchSettings {
        base_url: server.uri(),
        ..FetchSettings::default()
    }
}

fn record(id: u64, title: &str) -> Value {
    json!({
        "wrapperType": "collection",
        "collectionType": "Album",
        "collectionId": id,
        "collectionName": title,
        "artistName": "Benjamin Blümchen",
        "artworkUrl100": format!("https://is1-ssl.mzstatic.com/{id}/100x100bb.jpg"),
        "collectionViewUrl": format!("https://music.apple.com/de/album/{id}"),
        "releaseDate": "1990-02-01T08:00:00Z",
        "primaryGenreName": "Hörspiele"
    })
}

fn body(records: Vec<Value>) -> Value {
    json!({ "resultCount": records.len(), "results": records })
}

fn query(term: &str, limit: usize, offset: usize) -> PageQuery {
    PageQuery {
        term: term.to_string(),
        limit,
        offset,
    }
}

#[tokio::test]
async fn source_sends_search_parameters_and_decodes_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("term", "Benjamin Blümchen"))
        .and(query_param("country", "DE"))
        .and(query_param("media", "music"))
        .and(query_param("entity", "album"))
        .and(query_param("limit", "2"))
        .and(query_param("offset", "40"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body(vec![
            record(1, "Folge 1"),
            record(2, "Folge 2"),
        ])))
        .mount(&server)
        .await;

    let source = ItunesSource::new(settings_for(&server)).expect("client");
    let page = source
        .page(&query("Benjamin Blümchen", 2, 40))
        .await
        .expect("page ok");

    assert_eq!(page.record_count, 2);
    let titles: Vec<&str> = page.items.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(titles, vec!["Folge 1", "Folge 2"]);
}

#[tokio::test]
async fn source_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let source = ItunesSource::new(settings_for(&server)).expect("client");
    let err = source.page(&query("TKKG", 20, 0)).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(403));
}

#[tokio::test]
async fn source_fails_on_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>Wartung</html>"))
        .mount(&server)
        .await;

    let source = ItunesSource::new(settings_for(&server)).expect("client");
    let err = source.page(&query("TKKG", 20, 0)).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedBody);
}

#[tokio::test]
async fn source_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(body(Vec::new())),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..settings_for(&server)
    };
    let source = ItunesSource::new(settings).expect("client");
    let err = source.page(&query("TKKG", 20, 0)).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn source_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body(vec![record(1, "Folge 1")])))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 16,
        ..settings_for(&server)
    };
    let source = ItunesSource::new(settings).expect("client");
    let err = source.page(&query("TKKG", 20, 0)).await.unwrap_err();
    assert!(matches!(
        err.kind,
        FailureKind::TooLarge { max_bytes: 16, .. }
    ));
}

#[tokio::test]
async fn fetcher_keeps_first_page_when_second_fails() {
    let server = MockServer::start().await;
    let first_page: Vec<Value> = (1..=10)
        .map(|id| record(id, &format!("Folge {id}")))
        .collect();
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body(first_page)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("offset", "10"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let source = ItunesSource::new(settings_for(&server)).expect("client");
    let fetcher = PaginatedFetcher::new(source).with_page_size(10);
    let report = fetcher.fetch("x", 50).await;

    assert_eq!(report.items.len(), 10);
    assert!(matches!(
        report.termination,
        Termination::Failed(ref err) if err.kind == FailureKind::HttpStatus(500)
    ));
}

#[tokio::test]
async fn fetcher_stops_when_offset_is_ignored() {
    let server = MockServer::start().await;
    let same_five: Vec<Value> = (1..=5)
        .map(|id| record(id, &format!("Folge {id}")))
        .collect();
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body(same_five)))
        .expect(2)
        .mount(&server)
        .await;

    let source = ItunesSource::new(settings_for(&server)).expect("client");
    let report = PaginatedFetcher::new(source).fetch("x", 100).await;

    assert_eq!(report.items.len(), 5);
    assert_eq!(report.termination, Termination::Stalled);
}

#[test]
fn page_url_encodes_term() {
    let source = ItunesSource::new(FetchSettings::default()).expect("client");
    let url = source
        .page_url(&query("Die drei ??? & Co", 200, 0))
        .expect("url");

    assert_eq!(url.path(), "/search");
    let term = url
        .query_pairs()
        .find(|(key, _)| key == "term")
        .map(|(_, value)| value.into_owned());
    assert_eq!(term.as_deref(), Some("Die drei ??? & Co"));
}
