//! Error types for page sync operations.

use crate::error::{ConfluenceError, StorageError};

/// Error during a page sync operation.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Confluence API error.
    #[error("Confluence API error: {0}")]
    Confluence(#[from] ConfluenceError),

    /// Storage format parsing error.
    #[error("Storage format error: {0}")]
    Storage(#[from] StorageError),
}
