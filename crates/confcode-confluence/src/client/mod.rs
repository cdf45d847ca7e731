//! Confluence REST API client.
//!
//! Provides a sync HTTP client for the Confluence REST API with HTTP basic
//! authentication (user + API token).

mod pages;
mod spaces;

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use ureq::Agent;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Confluence REST API client.
///
/// Holds the HTTP agent, API root URL and the precomputed basic-auth
/// header; constructed once per run and passed by reference to every
/// operation.
pub struct ConfluenceClient {
    agent: Agent,
    base_url: String,
    auth_header: String,
}

impl ConfluenceClient {
    /// Create client from config values.
    ///
    /// # Arguments
    /// * `base_url` - REST API root URL (e.g. `https://wiki.example.com/rest/api`)
    /// * `user` - account name for basic authentication
    /// * `token` - API token for basic authentication
    #[must_use]
    pub fn new(base_url: &str, user: &str, token: &str) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        let credentials = BASE64.encode(format!("{user}:{token}"));

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            auth_header: format!("Basic {credentials}"),
        }
    }

    /// Build a full endpoint URL under the API root.
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}
