//! Confluence storage format parsing and serialization.
//!
//! The storage format is an HTML-like dialect with `ac:`-namespaced macro
//! elements and CDATA payloads. Bodies are parsed into an owned
//! [`TreeNode`] tree, mutated in place, and serialized back as a fragment
//! so the uploaded body contains only the page's original inner content.

mod entities;
mod parser;
mod serializer;
mod tree;

pub use parser::parse;
pub use serializer::serialize;
pub use tree::{PLAIN_TEXT_BODY_TAG, STRUCTURED_MACRO_TAG, TreeNode};
