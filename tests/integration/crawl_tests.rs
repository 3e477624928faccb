//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use link_census::config::{build_config, Config, HttpConfig};
use link_census::{crawl, render_report, ConfigError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration seeded at the mock server
fn create_test_config(seed: &str, max_concurrency: u32, max_pages: u32) -> Config {
    let http = HttpConfig {
        user_agent: "TestBot/1.0".to_string(),
        request_timeout: 5,
        connect_timeout: 2,
        ..HttpConfig::default()
    };
    build_config(seed, max_concurrency, max_pages, http).expect("valid test config")
}

fn html_page(hrefs: &[&str]) -> ResponseTemplate {
    let anchors: String = hrefs
        .iter()
        .map(|href| format!(r#"<a href="{}">link</a>"#, href))
        .collect();
    // The MIME type passed here is what ends up in the Content-Type header
    ResponseTemplate::new(200).set_body_raw(
        format!(
            "<html><head><title>Test</title></head><body>{}</body></html>",
            anchors
        ),
        "text/html; charset=utf-8",
    )
}

/// Host and port of the mock server, which is what page keys start with
fn host_key(server: &MockServer) -> String {
    server.uri().trim_start_matches("http://").to_string()
}

#[tokio::test]
async fn test_full_crawl_single_site() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(&["/about", "/about", "https://example.com/x"]))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html_page(&["/"]))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), 3, 10);
    let result = crawl(&config).await.expect("crawl should run");

    let host = host_key(&mock_server);
    let rows: Vec<(String, u32)> = result
        .pages
        .iter()
        .map(|visit| (visit.key.to_string(), visit.count))
        .collect();

    assert_eq!(
        rows,
        vec![(host.clone(), 2), (format!("{}/about", host), 2)]
    );
    assert_eq!(result.stats.pages_crawled, 2);
    assert_eq!(result.stats.scope_rejected, 1);
    assert_eq!(result.stats.already_claimed, 2);
}

#[tokio::test]
async fn test_crawl_respects_page_budget() {
    let mock_server = MockServer::start().await;

    let children: Vec<String> = (0..10).map(|i| format!("/page{}", i)).collect();
    let hrefs: Vec<&str> = children.iter().map(String::as_str).collect();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(&hrefs))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .respond_with(html_page(&hrefs))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), 4, 3);
    let result = crawl(&config).await.expect("crawl should run");

    assert_eq!(result.pages.len(), 3);
    assert!(result.stats.pages_crawled <= 3);
    assert!(result.stats.budget_rejected > 0);

    let requests = mock_server.received_requests().await.unwrap_or_default();
    assert!(requests.len() <= 3, "fetched {} pages", requests.len());
}

#[tokio::test]
async fn test_failed_pages_are_still_counted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(&["/data.json", "/missing"]))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"links": ["/secret"]}"#, "application/json"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).insert_header("content-type", "text/html"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), 2, 10);
    let result = crawl(&config).await.expect("crawl should run");

    assert_eq!(result.pages.len(), 3);
    assert!(result.pages.iter().all(|visit| visit.count == 1));
    assert_eq!(result.stats.pages_crawled, 1);
    assert_eq!(result.stats.fetch_failed, 2);
}

#[tokio::test]
async fn test_unreachable_seed_is_not_fatal() {
    // Nothing listens on the discard port
    let config = create_test_config("http://127.0.0.1:9", 1, 5);
    let result = crawl(&config).await.expect("crawl should run");

    assert_eq!(result.pages.len(), 1);
    assert_eq!(result.stats.fetch_failed, 1);
}

#[tokio::test]
async fn test_report_output() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(&["/b", "#top"]))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(html_page(&["/"]))
        .mount(&mock_server)
        .await;

    let seed = mock_server.uri();
    let config = create_test_config(&seed, 2, 10);
    let result = crawl(&config).await.expect("crawl should run");

    let host = host_key(&mock_server);
    let expected = format!(
        "=============================\n  REPORT for {seed}\n=============================\n\
         Found 2 internal links to {host}\n\
         Found 1 internal link to {host}/b\n"
    );
    assert_eq!(render_report(&result.pages, &seed), expected);
}

#[test]
fn test_invalid_arguments_rejected() {
    let http = HttpConfig::default();

    assert!(matches!(
        build_config("https://a.test", 0, 10, http.clone()),
        Err(ConfigError::Validation(_))
    ));
    assert!(matches!(
        build_config("https://a.test", 2, 0, http.clone()),
        Err(ConfigError::Validation(_))
    ));
    assert!(matches!(
        build_config("not a url", 2, 10, http),
        Err(ConfigError::InvalidUrl(_))
    ));
}
