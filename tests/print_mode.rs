//! Integration tests for print mode: paging a search against a mock API and
//! writing the table.

use hnstories::preferences::{PreferenceCell, SEARCH_KEY};
use hnstories::print::{fetch_pages, write_table};
use hnstories::search::build_client;
use hnstories::stories::{SearchSession, SortKey};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn hit(id: u64, title: &str, comments: u64) -> serde_json::Value {
    json!({
        "objectID": id.to_string(),
        "title": title,
        "url": null,
        "author": "tester",
        "num_comments": comments,
        "points": id
    })
}

async fn mount_page(server: &MockServer, page: u32, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("query", "rust"))
        .and(query_param("page", page.to_string()))
        .respond_with(response)
        .mount(server)
        .await;
}

fn page_body(page: u32, hits: Vec<serde_json::Value>) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "hits": hits, "page": page }))
}

fn session_for(server: &MockServer) -> SearchSession {
    SearchSession::new(server.uri(), PreferenceCell::in_memory(SEARCH_KEY, "rust"))
}

fn render(session: &SearchSession) -> String {
    let mut out = Vec::new();
    write_table(session, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[tokio::test]
async fn test_fetches_requested_pages() {
    let server = MockServer::start().await;
    mount_page(&server, 0, page_body(0, vec![hit(1, "first", 4)])).await;
    mount_page(&server, 1, page_body(1, vec![hit(2, "second", 6)])).await;

    let client = build_client(Duration::from_secs(5)).unwrap();
    let mut session = session_for(&server);

    assert!(fetch_pages(&mut session, &client, 2).await);

    let output = render(&session);
    assert!(output.contains("first"));
    assert!(output.contains("second"));
    assert!(output.ends_with("Total comments: 10\n"));
}

#[tokio::test]
async fn test_failed_continuation_keeps_earlier_pages() {
    let server = MockServer::start().await;
    mount_page(&server, 0, page_body(0, vec![hit(1, "first", 4)])).await;
    mount_page(&server, 1, ResponseTemplate::new(500)).await;

    let client = build_client(Duration::from_secs(5)).unwrap();
    let mut session = session_for(&server);

    assert!(!fetch_pages(&mut session, &client, 3).await);
    assert!(session.stories().is_error);
    assert_eq!(session.stories().items.len(), 1);

    let output = render(&session);
    assert!(output.contains("first"));
    assert!(output.ends_with("Total comments: 4\n"));
}

#[tokio::test]
async fn test_empty_page_stops_paging() {
    let server = MockServer::start().await;
    mount_page(&server, 0, page_body(0, vec![hit(1, "only", 1)])).await;
    mount_page(&server, 1, page_body(1, vec![])).await;

    let client = build_client(Duration::from_secs(5)).unwrap();
    let mut session = session_for(&server);

    assert!(fetch_pages(&mut session, &client, 5).await);
    // Page 2 is never requested
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
    assert_eq!(session.stories().page, 1);
}

#[tokio::test]
async fn test_table_follows_sort() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        0,
        page_body(0, vec![hit(1, "low", 1), hit(3, "high", 1), hit(2, "mid", 1)]),
    )
    .await;

    let client = build_client(Duration::from_secs(5)).unwrap();
    let mut session = session_for(&server);
    session.set_sort_key(SortKey::Point);
    assert!(fetch_pages(&mut session, &client, 1).await);

    let output = render(&session);
    let titles: Vec<&str> = output
        .lines()
        .skip(1)
        .take(3)
        .map(|l| l.split_whitespace().next().unwrap())
        .collect();
    assert_eq!(titles, vec!["high", "mid", "low"]);
}
