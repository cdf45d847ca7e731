//! Page sync workflow.
//!
//! This module provides the [`PageSyncer`] struct that encapsulates the
//! per-page workflow:
//!
//! 1. Fetch the page with `body.storage` and `version` expanded
//! 2. Parse the body into a storage format tree
//! 3. Match each heading to its code macro and inject the mapped file
//! 4. Serialize the mutated tree
//! 5. Upload the new body with `version.number + 1`
//!
//! Each heading's fate is collected as a [`HeadingOutcome`] rather than
//! decided by side effects, so callers can report per-heading diagnostics
//! from the aggregate.
//!
//! # Example
//!
//! ```ignore
//! use confcode_confluence::{ConfluenceClient, PageSyncer};
//!
//! let client = ConfluenceClient::new(base_url, user, token);
//! let space_key = client.resolve_space_key("Engineering")?;
//! let syncer = PageSyncer::new(&client, space_key);
//!
//! let result = syncer.sync("API Reference", &files)?;
//! println!("New version: {}", result.new_version());
//! ```

mod error;
mod executor;
mod matcher;
mod report;

pub use error::SyncError;
pub use executor::PageSyncer;
pub use report::{DryRunResult, HeadingOutcome, SyncResult};
