//! Lenient navigation over parsed JSON documents.
//!
//! The timeline API returns loosely structured payloads whose shape drifts
//! between response variants. [`JsonNode`] lets callers chain lookups such as
//! `root.get("timeline").get("instructions").at(0)` without checking every
//! intermediate step; any mismatch produces an absent node.

pub mod node;

pub use node::{JsonKind, JsonNode};
