//! Page sync implementation.

use confcode_config::FileMapping;

use crate::client::ConfluenceClient;
use crate::storage;

use super::error::SyncError;
use super::matcher::sync_code_blocks;
use super::report::{DryRunResult, SyncResult};

/// Syncs local files into a page's code macros and re-uploads it.
pub struct PageSyncer<'a> {
    client: &'a ConfluenceClient,
    space_key: String,
}

impl<'a> PageSyncer<'a> {
    /// Create a new syncer bound to a resolved space key.
    #[must_use]
    pub fn new(client: &'a ConfluenceClient, space_key: impl Into<String>) -> Self {
        Self {
            client,
            space_key: space_key.into(),
        }
    }

    /// Sync one page: fetch, parse, match and mutate each heading,
    /// serialize, upload with `version.number + 1`.
    ///
    /// File and heading mismatches are collected as outcomes and never
    /// abort the page; the upload happens regardless of how many headings
    /// matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be resolved, its body cannot
    /// be parsed, or the upload fails (including an explicit
    /// `success: false` response).
    pub fn sync(&self, title: &str, files: &FileMapping) -> Result<SyncResult, SyncError> {
        let page = self.client.find_page(&self.space_key, title)?;

        let mut tree = storage::parse(page.body_storage())?;
        let outcomes = sync_code_blocks(&mut tree, files);
        let new_body = storage::serialize(&tree);

        let updated = self.client.update_page(&page, &new_body)?;

        Ok(SyncResult {
            page: updated,
            outcomes,
        })
    }

    /// Perform everything except the upload and return the would-be body.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be resolved or parsed.
    pub fn dry_run(&self, title: &str, files: &FileMapping) -> Result<DryRunResult, SyncError> {
        let page = self.client.find_page(&self.space_key, title)?;

        let mut tree = storage::parse(page.body_storage())?;
        let outcomes = sync_code_blocks(&mut tree, files);
        let body = storage::serialize(&tree);

        Ok(DryRunResult {
            current_title: page.title,
            current_version: page.version.number,
            body,
            outcomes,
        })
    }
}
