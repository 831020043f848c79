//! Twitter API module.
//!
//! This module provides:
//! - HTTP client for the guest-accessible REST and GraphQL endpoints
//! - Guest session bootstrap (guest token and CSRF token)

pub mod client;
pub mod session;

pub use client::{TwitterApi, DEFAULT_BEARER_TOKEN, DEFAULT_PAGE_SIZE, DEFAULT_USER_AGENT};
pub use session::Session;
