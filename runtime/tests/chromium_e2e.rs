//! End-to-end runs against a real Chromium. Run with `cargo test -- --ignored`.

use hn_front::{ExtractError, Extractor, ExtractorConfig};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FRONT_PAGE: &str = include_str!("fixtures/front_page.html");

fn config_for(url: String) -> ExtractorConfig {
    ExtractorConfig {
        url,
        no_sandbox: std::env::var("HN_FRONT_CHROMIUM_NO_SANDBOX").is_ok(),
        ..Default::default()
    }
}

#[tokio::test]
#[ignore = "requires Chromium"]
async fn test_extracts_from_served_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(FRONT_PAGE, "text/html"))
        .mount(&server)
        .await;

    let extractor = Extractor::with_chromium(config_for(format!("{}/", server.uri()))).unwrap();
    let page = extractor.extract_front_page().await.unwrap();

    assert_eq!(page.total_rows, 10);
    assert_eq!(page.stories.len(), 5);
    assert_eq!(page.stories[0].rank, 1);
    assert_eq!(
        page.stories[0].title,
        "Show HN: A tiny SQLite clone in 500 lines"
    );
    assert_eq!(
        page.stories[2].discussion_url,
        Some(format!("{}/item?id=41000003", server.uri()))
    );
}

#[tokio::test]
#[ignore = "requires Chromium"]
async fn test_slow_page_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(FRONT_PAGE, "text/html")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = ExtractorConfig {
        navigation_timeout_secs: 1,
        ..config_for(format!("{}/", server.uri()))
    };
    let extractor = Extractor::with_chromium(config).unwrap();
    let err = extractor.extract_top_stories(5).await.unwrap_err();
    assert!(matches!(err, ExtractError::NavigationTimeout { .. }));
}
