//! Media item representation.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};

/// Kind of media attached to a tweet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Video,
    AnimatedImage,
}

impl MediaKind {
    /// Classify the `type` string of a media entity.
    pub fn from_type(type_name: &str) -> Result<Self> {
        match type_name {
            "photo" => Ok(MediaKind::Photo),
            "video" => Ok(MediaKind::Video),
            "animated_gif" => Ok(MediaKind::AnimatedImage),
            other => Err(Error::UnknownMediaType(other.to_string())),
        }
    }

    /// Short label used in output templates.
    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Photo => "photo",
            MediaKind::Video => "video",
            MediaKind::AnimatedImage => "gif",
        }
    }

    /// Whether the URL comes from a list of encoded variants.
    pub fn has_variants(&self) -> bool {
        !matches!(self, MediaKind::Photo)
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One downloadable media attachment of a tweet.
#[derive(Debug, Clone, PartialEq)]
pub struct TweetMedia {
    /// Download URL, already resolved to the best available rendition.
    pub url: String,

    pub kind: MediaKind,

    /// Owning account.
    pub user_id: String,
    pub username: String,

    pub tweet_id: String,

    /// Tweet creation time.
    pub created_at: DateTime<Utc>,

    /// Number of media attached to the tweet.
    pub count: usize,

    pub media_id: String,

    /// 1-based position within the tweet's media.
    pub index: usize,

    /// File name without extension, taken from the source URL.
    pub stem: String,

    /// File extension (without dot), taken from the source URL.
    pub extension: String,

    /// Original width in pixels.
    pub width: u32,

    /// Original height in pixels.
    pub height: u32,
}

impl TweetMedia {
    /// Creation time as `yyyyMMddHHmmss`.
    pub fn created_compact(&self) -> String {
        self.created_at.format("%Y%m%d%H%M%S").to_string()
    }
}
