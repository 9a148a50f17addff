//! Integration tests for `HttpFeedSource`.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no real
//! network traffic is made. `wiremock` serves plain HTTP, so these tests
//! exercise `fetch` on an already-parsed URL directly; the HTTPS-only rule
//! is enforced one layer up and covered by the `run_import` test at the end.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pdsync_core::NewListing;
use pdsync_feed::{
    run_import, FeedError, FeedSource, HttpFeedSource, ImportError, ListingStore,
};

const FEED_BODY: &str = "\
centre_id,product_name,center_status,address_line1,suite_numbers,city,zip_or_postal_code,building_description,local_area_description,min_cost,total_building_size
a1,Long Term Office - 1 Workstation,ACTIVE,5201 Blue Lagoon Drive,,Miami,33126,,,335,30159.00";

fn test_source() -> HttpFeedSource {
    HttpFeedSource::new(5, "pdsync-test/0.1").expect("failed to build HttpFeedSource")
}

fn feed_url(server: &MockServer) -> reqwest::Url {
    reqwest::Url::parse(&format!("{}/pdsfeed.csv", server.uri())).expect("mock server URL")
}

#[tokio::test]
async fn fetch_returns_the_feed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pdsfeed.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FEED_BODY))
        .mount(&server)
        .await;

    let body = test_source()
        .fetch(&feed_url(&server))
        .await
        .expect("fetch should succeed");

    assert_eq!(body, FEED_BODY);
}

#[tokio::test]
async fn fetch_maps_missing_feed_to_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = test_source().fetch(&feed_url(&server)).await.unwrap_err();

    assert!(
        matches!(err, FeedError::UnexpectedStatus { status: 404, .. }),
        "expected UnexpectedStatus(404), got: {err:?}"
    );
}

#[tokio::test]
async fn fetch_maps_server_error_to_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = test_source().fetch(&feed_url(&server)).await.unwrap_err();

    assert!(matches!(
        err,
        FeedError::UnexpectedStatus { status: 500, .. }
    ));
}

#[tokio::test]
async fn fetch_maps_connection_failure_to_unavailable() {
    // Nothing listens on the discard port; the connection is refused before
    // any HTTP exchange happens.
    let url = reqwest::Url::parse("https://127.0.0.1:9/pdsfeed.csv").expect("static URL");

    let err = test_source().fetch(&url).await.unwrap_err();

    assert!(
        matches!(err, FeedError::Unavailable { .. }),
        "expected Unavailable, got: {err:?}"
    );
}

/// Store fake for the end-to-end scheme check below.
#[derive(Default)]
struct NullStore;

impl ListingStore for NullStore {
    type Error = std::convert::Infallible;

    async fn upsert_all(&self, _listings: &[NewListing]) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[tokio::test]
async fn run_import_refuses_the_mock_servers_http_scheme() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FEED_BODY))
        .expect(0)
        .mount(&server)
        .await;

    let url = format!("{}/pdsfeed.csv", server.uri());
    let err = run_import(&url, &test_source(), &NullStore)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ImportError::Feed(FeedError::InvalidFeedUrl { .. })
    ));
    // Mock expect(0) verifies on drop that the server was never hit.
}
