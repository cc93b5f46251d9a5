use crate::search::Locator;
use crate::stories::SearchPage;
use futures::StreamExt;
use std::time::Duration;
use thiserror::Error;

const MAX_RESPONSE_SIZE: usize = 5 * 1024 * 1024; // 5MB

/// Errors that can occur while fetching a page of search results.
///
/// Every variant maps to the same user-visible failure; the detail is only
/// logged.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, timeout, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Response body exceeded the size limit
    #[error("Response too large")]
    ResponseTooLarge,
    /// Body was not the expected `{ hits, page }` JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Build the shared HTTP client used for all search requests.
///
/// `timeout` is the transport-level request timeout; no other deadline is
/// imposed on a fetch.
pub fn build_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .pool_max_idle_per_host(2)
        .pool_idle_timeout(Duration::from_secs(30))
        .tcp_keepalive(Duration::from_secs(60))
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Fetch one page of results for `locator`.
///
/// Exactly one request is made; there is no retry on any failure.
///
/// # Errors
///
/// - [`FetchError::Network`] - Connection, TLS or timeout errors
/// - [`FetchError::HttpStatus`] - Non-2xx HTTP response
/// - [`FetchError::ResponseTooLarge`] - Body exceeded 5MB
/// - [`FetchError::Parse`] - Body was not valid search JSON
pub async fn fetch_page(
    client: &reqwest::Client,
    locator: &Locator,
) -> Result<SearchPage, FetchError> {
    tracing::debug!(url = %locator, "Fetching search page");

    let response = client.get(locator.as_str()).send().await?;

    if !response.status().is_success() {
        return Err(FetchError::HttpStatus(response.status().as_u16()));
    }

    let bytes = read_limited_bytes(response, MAX_RESPONSE_SIZE).await?;
    let page: SearchPage = serde_json::from_slice(&bytes)?;

    tracing::debug!(
        term = %locator.search_term(),
        page = page.page,
        hits = page.hits.len(),
        "Search page received"
    );
    Ok(page)
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(FetchError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TWO_HITS: &str = r#"{
        "hits": [
            {"objectID": "0", "title": "React", "url": "https://reactjs.org/",
             "author": "Jordan Walke", "num_comments": 3, "points": 4},
            {"objectID": "1", "title": "Redux", "url": "https://redux.js.org/",
             "author": "Dan Abramov, Andrew Clark", "num_comments": 2, "points": 5}
        ],
        "page": 0
    }"#;

    fn client() -> reqwest::Client {
        build_client(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("query", "React"))
            .and(query_param("page", "0"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(TWO_HITS)
                    .insert_header("Content-Type", "application/json"),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let locator = Locator::new(&mock_server.uri(), "React", 0);
        let page = fetch_page(&client(), &locator).await.unwrap();

        assert_eq!(page.page, 0);
        assert_eq!(page.hits.len(), 2);
        assert_eq!(page.hits[0].title, "React");
        assert_eq!(page.hits[1].author, "Dan Abramov, Andrew Clark");
    }

    #[tokio::test]
    async fn test_encoded_term_reaches_server_decoded() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("query", "rust & go"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"hits": [], "page": 0}"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        let locator = Locator::new(&mock_server.uri(), "rust & go", 0);
        let page = fetch_page(&client(), &locator).await.unwrap();
        assert!(page.hits.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_500_is_not_retried() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&mock_server)
            .await;

        let locator = Locator::new(&mock_server.uri(), "React", 0);
        match fetch_page(&client(), &locator).await {
            Err(FetchError::HttpStatus(500)) => {}
            other => panic!("Expected HttpStatus(500), got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_invalid_json_is_parse_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let locator = Locator::new(&mock_server.uri(), "React", 0);
        match fetch_page(&client(), &locator).await {
            Err(FetchError::Parse(_)) => {}
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }
}
