//! Crawl state tracking.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::media::MediaKind;

/// Per-run crawl state.
#[derive(Debug, Default)]
pub struct CrawlState {
    // Account info
    pub screen_name: String,
    pub user_id: String,

    // Pagination
    pub cursor: Option<String>,
    requested_cursors: HashSet<String>,

    // Statistics
    pub pages_fetched: u64,
    pub tweets_seen: u64,
    pub media_found: u64,
    pub photo_count: u64,
    pub video_count: u64,
    pub gif_count: u64,
    pub skipped_count: u64,
}

impl CrawlState {
    /// Create a new crawl state, optionally starting from a known cursor.
    pub fn new(screen_name: String, user_id: String, cursor: Option<String>) -> Self {
        let mut requested_cursors = HashSet::new();
        if let Some(cursor) = &cursor {
            requested_cursors.insert(cursor.clone());
        }

        Self {
            screen_name,
            user_id,
            cursor,
            requested_cursors,
            ..Default::default()
        }
    }

    /// Move to the next page's cursor.
    ///
    /// Fails if the cursor was already requested during this run, which would
    /// otherwise make the crawl loop forever.
    pub fn advance(&mut self, next: String) -> Result<()> {
        if !self.requested_cursors.insert(next.clone()) {
            return Err(Error::CursorCycle(next));
        }

        self.cursor = Some(next);
        Ok(())
    }

    /// Record a completed download.
    pub fn record_download(&mut self, kind: MediaKind) {
        match kind {
            MediaKind::Photo => self.photo_count += 1,
            MediaKind::Video => self.video_count += 1,
            MediaKind::AnimatedImage => self.gif_count += 1,
        }
    }

    /// Increment skipped count.
    pub fn increment_skipped(&mut self) {
        self.skipped_count += 1;
    }

    /// Get total downloaded count.
    pub fn total_downloaded(&self) -> u64 {
        self.photo_count + self.video_count + self.gif_count
    }
}
