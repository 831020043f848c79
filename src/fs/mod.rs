//! Filesystem module.
//!
//! Provides:
//! - Output path templates
//! - Path component sanitization
//! - Download path resolution

pub mod naming;
pub mod paths;
pub mod template;

pub use naming::sanitize_component;
pub use paths::{get_download_path, partial_path};
pub use template::{OutputTemplate, DEFAULT_TEMPLATE};
