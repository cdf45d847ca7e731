//! Confluence API types.

mod page;
mod space;

pub use page::{Body, Page, PageResults, Storage, Version};
pub use space::{Space, SpaceResults};
