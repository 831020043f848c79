//! Timeline pagination.
//!
//! This module provides:
//! - The [`TimelineSource`] seam the crawl loop fetches pages through
//! - Resolution of one raw page into ordered tweets and cursors

pub mod resolver;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub use resolver::{resolve_page, CursorType, TimelinePage};

/// Anything that can fetch raw media timeline pages.
#[async_trait]
pub trait TimelineSource: Send + Sync {
    /// Fetch one page for `user_id`, starting at `cursor` or at the newest
    /// content when `cursor` is `None`.
    async fn fetch_page(&self, user_id: &str, cursor: Option<&str>) -> Result<Value>;
}
