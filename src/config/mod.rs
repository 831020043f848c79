//! Configuration module for twimg-dump.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Configuration validation

pub mod loader;
pub mod validation;

pub use loader::{ClientConfig, Config, OptionsConfig};
pub use validation::{parse_screen_name, validate_config};
