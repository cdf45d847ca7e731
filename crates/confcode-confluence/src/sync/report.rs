//! Per-page sync results.

use std::path::PathBuf;

use crate::types::Page;

/// Outcome of processing one matched heading.
#[derive(Debug)]
pub enum HeadingOutcome {
    /// Heading matched a mapping entry and the file was injected.
    Updated {
        /// Heading text.
        heading: String,
        /// File synced into the code macro.
        path: PathBuf,
    },
    /// Heading text has no entry in the file mapping; skipped.
    Unmatched {
        /// Heading text.
        heading: String,
    },
    /// Mapped file could not be read; skipped.
    FileError {
        /// Heading text.
        heading: String,
        /// File that failed to read.
        path: PathBuf,
        /// Underlying read error.
        error: std::io::Error,
    },
}

impl HeadingOutcome {
    /// Whether this outcome mutated the page.
    #[must_use]
    pub fn is_updated(&self) -> bool {
        matches!(self, HeadingOutcome::Updated { .. })
    }
}

/// Result of syncing one page.
#[derive(Debug)]
pub struct SyncResult {
    /// The updated page as returned by the server.
    pub page: Page,
    /// Per-heading outcomes, in document order.
    pub outcomes: Vec<HeadingOutcome>,
}

impl SyncResult {
    /// Version number the server assigned to the upload.
    #[must_use]
    pub fn new_version(&self) -> u32 {
        self.page.version.number
    }
}

/// Result of a dry run (no upload performed).
#[derive(Debug)]
pub struct DryRunResult {
    /// Title of the page as currently stored.
    pub current_title: String,
    /// Version currently stored; an upload would write `current + 1`.
    pub current_version: u32,
    /// The body that would be uploaded.
    pub body: String,
    /// Per-heading outcomes, in document order.
    pub outcomes: Vec<HeadingOutcome>,
}
