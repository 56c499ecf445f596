//! # Video Reference Parser
//!
//! This module parses user-supplied YouTube URLs or raw IDs into canonical
//! 11-character video identifiers, and extracts the `ytInitialPlayerResponse`
//! script data embedded in a watch page.

use std::{ops::Deref, sync::LazyLock};

use regex::Regex;
use serde::de::DeserializeOwned;

use crate::error::Error;

static VIDEO_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:v=|/v/|youtu\.be/|/embed/|/shorts/)([\w-]{11})").unwrap()
});

static RAW_ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\w-]{11}$").unwrap());

static PLAYER_RESPONSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)var\s+ytInitialPlayerResponse\s*=\s*(\{.*?\});").unwrap()
});

/// Parses a watch/share/embed/shorts URL or a bare 11-character ID into the
/// canonical video identifier.
///
/// # Returns
/// * `Ok(String)` holding exactly the 11-character ID.
/// * `Err(Error::InvalidVideoRef)` when no recognized form matches.
pub fn extract_video_id(reference: &str) -> Result<String, Error> {
    let trimmed = reference.trim();

    if let Some(id) = VIDEO_ID_RE.captures(trimmed).and_then(|cap| cap.get(1)) {
        return Ok(id.as_str().to_string());
    }
    if RAW_ID_RE.is_match(trimmed) {
        return Ok(trimmed.to_string());
    }

    Err(Error::InvalidVideoRef(reference.to_string()))
}

/// Raw HTML of a YouTube watch page
pub struct WatchPage(String);

impl Deref for WatchPage {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl WatchPage {
    /// Deserializes the `ytInitialPlayerResponse` blob from the page's
    /// script tag.
    pub fn player_response<T>(&self) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        PLAYER_RESPONSE_RE
            .captures(self)
            .and_then(|cap| cap.get(1))
            .and_then(|m| serde_json::from_str(m.as_str()).ok())
            .ok_or(Error::ParseError(
                "Failed to extract ytInitialPlayerResponse from the page's script tag",
            ))
    }
}

impl From<String> for WatchPage {
    fn from(value: String) -> Self {
        WatchPage(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_id_from_recognized_url_forms() {
        let cases = [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "https://www.youtube.com/v/dQw4w9WgXcQ",
            "dQw4w9WgXcQ",
            "  dQw4w9WgXcQ  ",
        ];
        for case in cases {
            assert_eq!(
                extract_video_id(case).unwrap(),
                "dQw4w9WgXcQ",
                "failed for {case}"
            );
        }
    }

    #[test]
    fn rejects_unrecognized_references() {
        for case in ["", "not a url", "https://example.com/watch", "short-id"] {
            assert!(
                matches!(extract_video_id(case), Err(Error::InvalidVideoRef(_))),
                "should reject {case:?}"
            );
        }
    }

    #[test]
    fn extracts_player_response_from_watch_page() {
        let html = r#"
            <html>
                <head>
                    <script nonce="abc">
                        var ytInitialPlayerResponse = {"key": "value", "number": 42};
                    </script>
                </head>
                <body><p>Some content</p></body>
            </html>
        "#;

        let page = WatchPage::from(html.to_string());
        let json: serde_json::Value = page.player_response().unwrap();
        assert_eq!(json["key"], "value");
        assert_eq!(json["number"], 42);
    }

    #[test]
    fn missing_player_response_is_a_parse_error() {
        let page = WatchPage::from("<html><body>nothing here</body></html>".to_string());
        let result: Result<serde_json::Value, _> = page.player_response();
        assert!(matches!(result, Err(Error::ParseError(_))));
    }
}
