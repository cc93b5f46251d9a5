//! Access to the story search API.
//!
//! - [`locator`] - Building and parsing request locators (search URL + page)
//! - [`client`] - Fetching one page of results over HTTP

mod client;
mod locator;

pub use client::{build_client, fetch_page, FetchError};
pub use locator::{extract_search_term, Locator, LocatorError, API_BASE};
