//! Media module for item representation and extraction.

pub mod extractor;
pub mod item;

pub use extractor::{extract_media, original_photo_url, select_best_variant};
pub use item::{MediaKind, TweetMedia};
