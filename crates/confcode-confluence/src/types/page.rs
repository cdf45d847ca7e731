//! Confluence page types.

use serde::{Deserialize, Serialize};

/// Confluence page.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Page {
    /// Page ID.
    pub id: String,
    /// Content type (always "page").
    #[serde(rename = "type")]
    pub content_type: String,
    /// Page status (e.g. "current").
    #[serde(default)]
    pub status: String,
    /// Page title.
    pub title: String,
    /// Version information.
    pub version: Version,
    /// Page body content.
    #[serde(default)]
    pub body: Option<Body>,
}

impl Page {
    /// Storage format markup of the page body, empty if not expanded.
    #[must_use]
    pub fn body_storage(&self) -> &str {
        self.body
            .as_ref()
            .and_then(|b| b.storage.as_ref())
            .map_or("", |s| s.value.as_str())
    }
}

/// Page version.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Version {
    /// Version number.
    pub number: u32,
}

/// Page body content.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Body {
    /// Storage format content.
    #[serde(default)]
    pub storage: Option<Storage>,
}

/// Storage format representation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Storage {
    /// Markup content in Confluence storage format.
    pub value: String,
    /// Content representation (always "storage").
    pub representation: String,
}

/// Content search API response.
#[derive(Debug, Clone, Deserialize)]
pub struct PageResults {
    /// Matching pages.
    pub results: Vec<Page>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deserialize_search_response() {
        let json = r#"{
            "results": [{
                "id": "12345",
                "type": "page",
                "status": "current",
                "title": "API Reference",
                "version": {"number": 7, "when": "2024-01-01T00:00:00Z"},
                "body": {"storage": {"value": "<p>hi</p>", "representation": "storage"}}
            }]
        }"#;

        let parsed: PageResults = serde_json::from_str(json).unwrap();
        let page = &parsed.results[0];
        assert_eq!(page.id, "12345");
        assert_eq!(page.content_type, "page");
        assert_eq!(page.status, "current");
        assert_eq!(page.version.number, 7);
        assert_eq!(page.body_storage(), "<p>hi</p>");
    }

    #[test]
    fn test_body_storage_missing_body() {
        let json = r#"{
            "id": "1",
            "type": "page",
            "title": "Empty",
            "version": {"number": 1}
        }"#;
        let page: Page = serde_json::from_str(json).unwrap();
        assert_eq!(page.body_storage(), "");
    }
}
