//! Request locators for the story search endpoint.
//!
//! A locator is the full request URL for one page of one search:
//! `{api_base}/search?query={term}&page={page}`. The term is form-encoded so
//! the `?` and `&` delimiters can always be found again, which makes
//! [`extract_search_term`] an exact inverse of [`Locator::new`].
use std::fmt;
use thiserror::Error;
use url::form_urlencoded;

/// Public Algolia endpoint for Hacker News.
pub const API_BASE: &str = "https://hn.algolia.com/api/v1";
const API_SEARCH: &str = "/search";
const PARAM_SEARCH: &str = "query=";
const PARAM_PAGE: &str = "page=";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocatorError {
    #[error("Locator has no '?' before its query string: {0}")]
    MissingQuery(String),
    #[error("Locator has no '&' page delimiter: {0}")]
    MissingPage(String),
    #[error("Locator query segment does not start with 'query=': {0}")]
    MissingSearchParam(String),
    #[error("Locator page segment is not a page number: {0}")]
    InvalidPage(String),
}

/// An immutable request target for one page of one search.
///
/// Constructed either by [`Locator::new`] or by parsing a string that the
/// builder produced. The term and page are kept alongside the rendered URL so
/// reading them back never fails.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    url: String,
    term: String,
    page: u32,
}

impl Locator {
    /// Build the locator for `term` at `page`.
    ///
    /// No validation is done on `term`: an empty term yields a well-formed
    /// locator with an empty query. Rejecting empty searches is the caller's
    /// job.
    pub fn new(api_base: &str, term: &str, page: u32) -> Self {
        let encoded: String = form_urlencoded::byte_serialize(term.as_bytes()).collect();
        let url = format!(
            "{}{}?{}{}&{}{}",
            api_base.trim_end_matches('/'),
            API_SEARCH,
            PARAM_SEARCH,
            encoded,
            PARAM_PAGE,
            page
        );
        Self {
            url,
            term: term.to_string(),
            page,
        }
    }

    /// Recover a locator from its rendered URL.
    pub fn parse(url: &str) -> Result<Self, LocatorError> {
        let term = extract_search_term(url)?;

        // extract_search_term already proved both delimiters exist
        let amp = url
            .rfind('&')
            .ok_or_else(|| LocatorError::MissingPage(url.to_string()))?;
        let page = url[amp + 1..]
            .strip_prefix(PARAM_PAGE)
            .and_then(|p| p.parse::<u32>().ok())
            .ok_or_else(|| LocatorError::InvalidPage(url.to_string()))?;

        Ok(Self {
            url: url.to_string(),
            term,
            page,
        })
    }

    pub fn search_term(&self) -> &str {
        &self.term
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Extract the decoded search term from a rendered locator.
///
/// Takes the segment between the last `?` and the last `&`, strips the
/// `query=` marker and form-decodes what is left.
pub fn extract_search_term(url: &str) -> Result<String, LocatorError> {
    let question = url
        .rfind('?')
        .ok_or_else(|| LocatorError::MissingQuery(url.to_string()))?;
    let amp = url
        .rfind('&')
        .filter(|&amp| amp > question)
        .ok_or_else(|| LocatorError::MissingPage(url.to_string()))?;

    let segment = &url[question + 1..amp];
    let encoded = segment
        .strip_prefix(PARAM_SEARCH)
        .ok_or_else(|| LocatorError::MissingSearchParam(url.to_string()))?;

    Ok(decode_component(encoded))
}

fn decode_component(encoded: &str) -> String {
    // form_urlencoded only decodes whole key=value pairs; a bare key holds the
    // decoded component and an empty value.
    form_urlencoded::parse(encoded.as_bytes())
        .next()
        .map(|(key, _)| key.into_owned())
        .unwrap_or_default()
}
