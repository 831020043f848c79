//! Download module for timeline crawling.
//!
//! This module provides:
//! - Crawl state tracking
//! - The media timeline crawl loop
//! - Media file downloading

pub mod crawl;
pub mod media;
pub mod state;

pub use crawl::crawl_timeline;
pub use media::{Downloader, HttpDownloader};
pub use state::CrawlState;
