//! Confluence integration for confcode.
//!
//! This crate provides:
//! - [`ConfluenceClient`]: REST API client with HTTP basic authentication
//! - [`PageSyncer`](sync::PageSyncer): syncs local source files into a
//!   page's code macros and re-uploads the page
//! - [`storage`]: storage format parsing, mutation and serialization
//!
//! # API Client
//!
//! ```ignore
//! use confcode_confluence::ConfluenceClient;
//!
//! let client = ConfluenceClient::new(
//!     "https://wiki.example.com/rest/api",
//!     "alice",
//!     "api-token",
//! );
//!
//! let space_key = client.resolve_space_key("Engineering")?;
//! let page = client.find_page(&space_key, "API Reference")?;
//! println!("Page version: {}", page.version.number);
//! ```

// API client
mod client;
pub use client::ConfluenceClient;

// Storage format tree
pub mod storage;

// Page sync workflow
pub mod sync;
pub use sync::{HeadingOutcome, PageSyncer, SyncError, SyncResult};

// Types
mod types;
pub use types::{Body, Page, Space, Storage, Version};

// Errors
pub mod error;
pub use error::ConfluenceError;
