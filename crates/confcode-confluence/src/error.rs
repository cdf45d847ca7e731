//! Error types for Confluence integration.

use std::str::Utf8Error;

/// Error while parsing or serializing storage format markup.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// XML parsing error.
    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] Utf8Error),

    /// XML attribute error.
    #[error("XML attribute error: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    /// Encoding error during XML parsing.
    #[error("Encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),
}

/// Error from Confluence API operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfluenceError {
    /// HTTP request error.
    #[error("HTTP error: {status} - {body}")]
    Http { status: u16, body: String },

    /// Space display name not present in the server's space list.
    #[error("Space not found: \"{name}\"")]
    SpaceNotFound { name: String },

    /// No page with the given title exists in the space.
    #[error("Page not found: \"{title}\" in space {space_key}")]
    PageNotFound { title: String, space_key: String },

    /// The server rejected an upload with an explicit `success: false`.
    #[error("Upload rejected by server: {body}")]
    UploadRejected { body: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage format error.
    #[error("Storage format error: {0}")]
    Storage(#[from] StorageError),
}

impl From<serde_json::Error> for ConfluenceError {
    fn from(e: serde_json::Error) -> Self {
        ConfluenceError::Json(e.to_string())
    }
}

impl From<ureq::Error> for ConfluenceError {
    fn from(e: ureq::Error) -> Self {
        ConfluenceError::Http {
            status: 0,
            body: e.to_string(),
        }
    }
}
