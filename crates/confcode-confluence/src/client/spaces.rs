//! Space operations for Confluence API.

use tracing::info;

use super::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::types::{Space, SpaceResults};

impl ConfluenceClient {
    /// List all spaces visible to the authenticated user.
    pub fn spaces(&self) -> Result<Vec<Space>, ConfluenceError> {
        let url = self.endpoint("space");

        info!("Listing spaces");

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

        let listing: SpaceResults = body_reader.read_json()?;
        Ok(listing.results)
    }

    /// Resolve a space display name to its key.
    ///
    /// The key is required to disambiguate pages sharing a title across
    /// spaces.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::SpaceNotFound`] if no space carries the
    /// given display name.
    pub fn resolve_space_key(&self, name: &str) -> Result<String, ConfluenceError> {
        let spaces = self.spaces()?;

        spaces
            .into_iter()
            .find(|sp| sp.name == name)
            .map(|sp| sp.key)
            .ok_or_else(|| ConfluenceError::SpaceNotFound {
                name: name.to_owned(),
            })
    }
}
