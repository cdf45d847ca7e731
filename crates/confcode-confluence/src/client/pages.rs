//! Page operations for Confluence API.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::{Value, json};
use tracing::info;

use super::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::types::{Page, PageResults};

impl ConfluenceClient {
    /// Find the unique page matching space key + title.
    ///
    /// Fetches with `body.storage` and `version` expanded. The API is
    /// trusted to return at most one match per title + space.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::PageNotFound`] if the result set is empty.
    pub fn find_page(&self, space_key: &str, title: &str) -> Result<Page, ConfluenceError> {
        let url = format!(
            "{}?spaceKey={}&title={}&expand=body.storage,version",
            self.endpoint("content"),
            utf8_percent_encode(space_key, NON_ALPHANUMERIC),
            utf8_percent_encode(title, NON_ALPHANUMERIC),
        );

        info!("Fetching page \"{}\" in space {}", title, space_key);

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .call()
            .map_err(|e| ConfluenceError::Http {
                status: 0,
                body: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(ConfluenceError::Http {
                status,
                body: error_body,
            });
        }

        let page_set: PageResults = body_reader.read_json()?;

        page_set
            .results
            .into_iter()
            .next()
            .ok_or_else(|| ConfluenceError::PageNotFound {
                title: title.to_owned(),
                space_key: space_key.to_owned(),
            })
    }

    /// Upload a new body for an existing page, incrementing its version.
    ///
    /// The payload retains only the id/title/type/status of the fetched
    /// page plus a freshly constructed `version.number = old + 1`; all
    /// other version metadata is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::UploadRejected`] if the response carries
    /// an explicit `success: false` field.
    pub fn update_page(&self, page: &Page, new_body: &str) -> Result<Page, ConfluenceError> {
        let url = format!("{}/{}", self.endpoint("content"), page.id);
        let payload = build_update_payload(page, new_body);

        info!(
            "Updating page {} from version {} to {}",
            page.id,
            page.version.number,
            page.version.number + 1
        );

        let payload_bytes = serde_json::to_vec(&payload)?;

        let response = self
            .agent
            .put(&url)
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload_bytes[..])
            .map_err(|e| ConfluenceError::Http {
                status: 0,
                body: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(ConfluenceError::Http {
                status,
                body: error_body,
            });
        }

        let result: Value = body_reader.read_json()?;
        let updated = check_upload_response(result)?;

        info!("Updated page {} to version {}", page.id, updated.version.number);
        Ok(updated)
    }
}

/// Interpret an upload response, rejecting an explicit `success: false`.
///
/// Any other response shape is treated as a successful update and parsed
/// as the new page representation.
fn check_upload_response(result: Value) -> Result<Page, ConfluenceError> {
    if result.get("success").and_then(Value::as_bool) == Some(false) {
        return Err(ConfluenceError::UploadRejected {
            body: result.to_string(),
        });
    }

    Ok(serde_json::from_value(result)?)
}

/// Construct the upload payload for a page update.
fn build_update_payload(page: &Page, new_body: &str) -> Value {
    json!({
        "id": page.id,
        "type": page.content_type,
        "status": page.status,
        "title": page.title,
        "body": {
            "storage": {
                "value": new_body,
                "representation": "storage"
            }
        },
        "version": {"number": page.version.number + 1}
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Version;
    use pretty_assertions::assert_eq;

    fn sample_page() -> Page {
        Page {
            id: "12345".to_owned(),
            content_type: "page".to_owned(),
            status: "current".to_owned(),
            title: "API Reference".to_owned(),
            version: Version { number: 7 },
            body: None,
        }
    }

    #[test]
    fn test_payload_increments_version() {
        let payload = build_update_payload(&sample_page(), "<p>new</p>");
        assert_eq!(payload["version"]["number"], 8);
    }

    #[test]
    fn test_payload_retains_only_required_keys() {
        let payload = build_update_payload(&sample_page(), "<p>new</p>");
        let keys: Vec<&str> = payload
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["body", "id", "status", "title", "type", "version"]);
        // Version carries the number and nothing else
        assert_eq!(payload["version"].as_object().unwrap().len(), 1);
    }

    #[test]
    fn test_payload_body_representation() {
        let payload = build_update_payload(&sample_page(), "<p>x &amp; y</p>");
        assert_eq!(payload["body"]["storage"]["value"], "<p>x &amp; y</p>");
        assert_eq!(payload["body"]["storage"]["representation"], "storage");
    }

    #[test]
    fn test_rejected_upload_carries_full_response() {
        let response = serde_json::json!({"success": false, "message": "conflict"});
        let err = check_upload_response(response).unwrap_err();

        match err {
            ConfluenceError::UploadRejected { body } => {
                assert!(body.contains("\"success\":false"));
                assert!(body.contains("conflict"));
            }
            other => panic!("expected UploadRejected, got {other:?}"),
        }
    }

    #[test]
    fn test_successful_upload_response_parses_page() {
        let response = serde_json::json!({
            "id": "12345",
            "type": "page",
            "status": "current",
            "title": "API Reference",
            "version": {"number": 8}
        });
        let page = check_upload_response(response).unwrap();
        assert_eq!(page.version.number, 8);
    }

    #[test]
    fn test_explicit_success_true_is_not_rejected() {
        // Only an explicit false trips the rejection path
        let response = serde_json::json!({
            "id": "1",
            "type": "page",
            "title": "T",
            "version": {"number": 2},
            "success": true
        });
        assert!(check_upload_response(response).is_ok());
    }
}
