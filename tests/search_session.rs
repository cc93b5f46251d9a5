//! Integration tests for the search session against a mock search API.
//!
//! Each test starts its own wiremock server and points the session's API
//! base at it, then drives the fetch protocol the way the UI loop does:
//! intent, `begin_fetch`, `fetch_page`, `complete_fetch`.

use hnstories::preferences::{PreferenceCell, SEARCH_KEY};
use hnstories::search::{build_client, fetch_page};
use hnstories::storage::Database;
use hnstories::stories::{SearchSession, SortKey};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn hit(id: u64, title: &str, author: &str, comments: u64, points: u64) -> serde_json::Value {
    json!({
        "objectID": id.to_string(),
        "title": title,
        "url": format!("https://example.com/{}", id),
        "author": author,
        "num_comments": comments,
        "points": points,
        "created_at_i": 1_700_000_000
    })
}

async fn mount_page(server: &MockServer, term: &str, page: u32, hits: Vec<serde_json::Value>) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("query", term))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": hits,
            "page": page,
            "nbPages": 50
        })))
        .mount(server)
        .await;
}

/// Run the pending fetch, if any, to completion.
async fn drive(session: &mut SearchSession, client: &reqwest::Client) {
    let pending = session.begin_fetch().expect("a fetch should be pending");
    let result = fetch_page(client, &pending.locator).await;
    assert!(session.complete_fetch(pending.generation, result));
}

fn client() -> reqwest::Client {
    build_client(Duration::from_secs(5)).unwrap()
}

fn titles(session: &SearchSession) -> Vec<String> {
    session
        .stories()
        .items
        .iter()
        .map(|s| s.title.clone())
        .collect()
}

// ============================================================================
// Search Flow
// ============================================================================

#[tokio::test]
async fn test_seed_then_new_search_replaces_results() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "React",
        0,
        vec![hit(1, "React 19", "dan", 10, 100), hit(2, "Hooks", "sophie", 5, 50)],
    )
    .await;
    mount_page(&server, "JavaScript", 0, vec![hit(3, "JS turns 30", "brendan", 7, 70)]).await;

    let client = client();
    let mut session = SearchSession::new(
        server.uri(),
        PreferenceCell::in_memory(SEARCH_KEY, "React"),
    );

    drive(&mut session, &client).await;
    assert_eq!(titles(&session), vec!["React 19", "Hooks"]);
    assert_eq!(session.total_comments(), 15);
    assert!(session.recent_searches().is_empty());

    session.set_search_input("JavaScript").await;
    session.submit_search();
    drive(&mut session, &client).await;

    assert_eq!(titles(&session), vec!["JS turns 30"]);
    assert_eq!(session.total_comments(), 7);
    assert_eq!(session.recent_searches(), vec!["React".to_string()]);
    assert!(!session.stories().is_loading);
    assert!(!session.stories().is_error);
}

#[tokio::test]
async fn test_load_more_appends_next_page() {
    let server = MockServer::start().await;
    mount_page(&server, "rust", 0, vec![hit(1, "first", "a", 1, 1)]).await;
    mount_page(&server, "rust", 1, vec![hit(2, "second", "b", 2, 2)]).await;

    let client = client();
    let mut session =
        SearchSession::new(server.uri(), PreferenceCell::in_memory(SEARCH_KEY, "rust"));

    drive(&mut session, &client).await;
    assert!(session.load_more());
    drive(&mut session, &client).await;

    assert_eq!(titles(&session), vec!["first", "second"]);
    assert_eq!(session.stories().page, 1);
    // Paging does not add a recent search
    assert!(session.recent_searches().is_empty());
}

#[tokio::test]
async fn test_failed_page_keeps_prior_items() {
    let server = MockServer::start().await;
    mount_page(&server, "rust", 0, vec![hit(1, "first", "a", 1, 1)]).await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client();
    let mut session =
        SearchSession::new(server.uri(), PreferenceCell::in_memory(SEARCH_KEY, "rust"));

    drive(&mut session, &client).await;
    assert!(session.load_more());
    drive(&mut session, &client).await;

    assert!(session.stories().is_error);
    assert!(!session.stories().is_loading);
    assert_eq!(titles(&session), vec!["first"]);
    assert_eq!(session.stories().page, 0);
}

#[tokio::test]
async fn test_term_with_delimiters_round_trips() {
    let server = MockServer::start().await;
    mount_page(&server, "C&C ? yes", 0, vec![hit(9, "Command", "westwood", 3, 4)]).await;

    let client = client();
    let mut session = SearchSession::new(
        server.uri(),
        PreferenceCell::in_memory(SEARCH_KEY, "C&C ? yes"),
    );

    drive(&mut session, &client).await;
    assert_eq!(titles(&session), vec!["Command"]);
    assert_eq!(session.history().active().search_term(), "C&C ? yes");
}

#[tokio::test]
async fn test_replay_recent_search() {
    let server = MockServer::start().await;
    mount_page(&server, "React", 0, vec![hit(1, "React", "a", 1, 1)]).await;
    mount_page(&server, "Vue", 0, vec![hit(2, "Vue", "b", 2, 2)]).await;

    let client = client();
    let mut session =
        SearchSession::new(server.uri(), PreferenceCell::in_memory(SEARCH_KEY, "React"));
    drive(&mut session, &client).await;

    session.set_search_input("Vue").await;
    session.submit_search();
    drive(&mut session, &client).await;

    let recent = session.recent_searches();
    session.replay_search(&recent[0]).await;
    drive(&mut session, &client).await;

    assert_eq!(titles(&session), vec!["React"]);
    assert_eq!(session.search_term(), "React");
    assert_eq!(session.recent_searches(), vec!["React".to_string(), "Vue".to_string()]);
}

// ============================================================================
// Ordering and Stale Completions
// ============================================================================

#[tokio::test]
async fn test_stale_completion_is_discarded() {
    let server = MockServer::start().await;
    mount_page(&server, "slow", 0, vec![hit(1, "slow result", "a", 1, 1)]).await;
    mount_page(&server, "fast", 0, vec![hit(2, "fast result", "b", 2, 2)]).await;

    let client = client();
    let mut session =
        SearchSession::new(server.uri(), PreferenceCell::in_memory(SEARCH_KEY, "slow"));

    let first = session.begin_fetch().unwrap();

    session.set_search_input("fast").await;
    session.submit_search();
    let second = session.begin_fetch().unwrap();

    let fast = fetch_page(&client, &second.locator).await;
    assert!(session.complete_fetch(second.generation, fast));

    // The older request resolves last and must not overwrite the newer one
    let slow = fetch_page(&client, &first.locator).await;
    assert!(!session.complete_fetch(first.generation, slow));

    assert_eq!(titles(&session), vec!["fast result"]);
}

#[tokio::test]
async fn test_sort_and_dismiss_over_fetched_results() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "rust",
        0,
        vec![
            hit(1, "b", "x", 5, 10),
            hit(2, "a", "y", 50, 1),
            hit(3, "c", "z", 0, 100),
        ],
    )
    .await;

    let client = client();
    let mut session =
        SearchSession::new(server.uri(), PreferenceCell::in_memory(SEARCH_KEY, "rust"));
    drive(&mut session, &client).await;

    session.set_sort_key(SortKey::Point);
    let order: Vec<&str> = session
        .sorted_stories()
        .iter()
        .map(|s| s.object_id.as_str())
        .collect();
    assert_eq!(order, vec!["3", "1", "2"]);

    session.remove_story("3");
    assert_eq!(session.total_comments(), 55);
    assert_eq!(session.sorted_stories().len(), 2);
}

// ============================================================================
// Persistence
// ============================================================================

#[tokio::test]
async fn test_search_term_persists_across_sessions() {
    let db = Database::open(":memory:").await.unwrap();

    let cell = PreferenceCell::load(Some(db.clone()), SEARCH_KEY, "React").await;
    let mut session = SearchSession::new("http://127.0.0.1:1", cell);
    assert_eq!(session.search_term(), "React");
    session.set_search_input("Svelte").await;
    drop(session);

    let cell = PreferenceCell::load(Some(db), SEARCH_KEY, "React").await;
    let session = SearchSession::new("http://127.0.0.1:1", cell);
    assert_eq!(session.search_term(), "Svelte");
    assert_eq!(session.history().active().search_term(), "Svelte");
}
