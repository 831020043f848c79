//! twimg-dump - download the media timeline of a Twitter account
//!
//! This library walks an account's media timeline through the guest-accessible
//! web API and saves the original-quality file of every attachment.
//!
//! # Features
//!
//! - Guest session bootstrap (guest token, CSRF token)
//! - Cursor-based pagination with resume support
//! - Original-resolution photos and highest-bitrate videos and GIFs
//! - Templated output paths
//!
//! # Example
//!
//! ```no_run
//! use twimg_dump::config::validate_config;
//! use twimg_dump::{crawl_timeline, Config, CrawlState, HttpDownloader, TwitterApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let template = validate_config(&config)?;
//!     let api = TwitterApi::new(
//!         config.client.bearer_token.clone(),
//!         &config.client.user_agent,
//!         config.options.page_size,
//!     )?;
//!
//!     let user_id = api.user_id("jack").await?;
//!     let downloader = HttpDownloader::new(&config.client.user_agent, false, true)?;
//!     let mut state = CrawlState::new("jack".to_string(), user_id, None);
//!
//!     crawl_timeline(&api, &downloader, &config, &template, &mut state).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod json;
pub mod media;
pub mod output;
pub mod timeline;

// Re-exports for convenience
pub use api::TwitterApi;
pub use config::Config;
pub use download::{crawl_timeline, CrawlState, Downloader, HttpDownloader};
pub use error::{Error, Result};
pub use json::JsonNode;
pub use media::{MediaKind, TweetMedia};
pub use timeline::{resolve_page, TimelinePage, TimelineSource};
