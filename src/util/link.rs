use thiserror::Error;
use url::Url;

use crate::stories::Story;

/// Discussion page used when a story has no external URL (Ask HN etc.).
const ITEM_URL: &str = "https://news.ycombinator.com/item?id=";

#[derive(Error, Debug)]
pub enum LinkError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
}

/// The page a story points to, falling back to its discussion thread.
pub fn story_link(story: &Story) -> String {
    let url = story.url.trim();
    if url.is_empty() {
        format!("{}{}", ITEM_URL, story.object_id)
    } else {
        url.to_string()
    }
}

/// Check a link before handing it to the system opener.
///
/// Only http(s) is allowed so that a crafted `url` field cannot launch
/// `file:` or custom-scheme handlers.
pub fn validate_link_for_open(link: &str) -> Result<Url, LinkError> {
    let url = Url::parse(link)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(LinkError::UnsupportedScheme(scheme.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story(id: &str, url: &str) -> Story {
        Story {
            object_id: id.to_string(),
            title: "t".to_string(),
            url: url.to_string(),
            author: "a".to_string(),
            num_comments: 0,
            points: 0,
            created_at_i: None,
        }
    }

    #[test]
    fn test_story_link_prefers_url() {
        assert_eq!(
            story_link(&story("1", "https://reactjs.org/")),
            "https://reactjs.org/"
        );
    }

    #[test]
    fn test_story_link_falls_back_to_item_page() {
        assert_eq!(
            story_link(&story("8863", "")),
            "https://news.ycombinator.com/item?id=8863"
        );
        assert_eq!(
            story_link(&story("8863", "   ")),
            "https://news.ycombinator.com/item?id=8863"
        );
    }

    #[test]
    fn test_validate_accepts_http_and_https() {
        assert!(validate_link_for_open("https://example.com/a").is_ok());
        assert!(validate_link_for_open("http://localhost:3000").is_ok());
    }

    #[test]
    fn test_validate_rejects_other_schemes() {
        assert!(matches!(
            validate_link_for_open("file:///etc/passwd"),
            Err(LinkError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            validate_link_for_open("javascript:alert(1)"),
            Err(LinkError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            validate_link_for_open("not a url"),
            Err(LinkError::InvalidUrl(_))
        ));
    }
}
