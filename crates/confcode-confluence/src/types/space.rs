//! Confluence space types.

use serde::Deserialize;

/// Confluence space.
#[derive(Debug, Clone, Deserialize)]
pub struct Space {
    /// Short stable space identifier.
    pub key: String,
    /// Human-readable display name.
    pub name: String,
}

/// Space listing API response.
#[derive(Debug, Clone, Deserialize)]
pub struct SpaceResults {
    /// List of spaces.
    pub results: Vec<Space>,
}
