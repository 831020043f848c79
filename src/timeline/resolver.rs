//! Timeline page resolution.
//!
//! A media timeline response has two top level regions:
//!
//! - `globalObjects.tweets`, a flat map from tweet id to tweet object;
//! - `timeline.instructions`, the instructions telling the client which
//!   entries to show and in what order, including the `Top` and `Bottom`
//!   cursors bounding the page.

use std::collections::HashSet;
use std::fmt;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::json::JsonNode;

/// Which edge of the page a cursor points past.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorType {
    /// Towards newer content.
    Top,
    /// Towards older content; the crawl continues from here.
    Bottom,
}

impl CursorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CursorType::Top => "Top",
            CursorType::Bottom => "Bottom",
        }
    }
}

impl fmt::Display for CursorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One resolved timeline page.
#[derive(Debug)]
pub struct TimelinePage<'a> {
    /// Tweet objects in timeline order, newest first.
    pub tweets: Vec<JsonNode<'a>>,
    pub cursor_top: String,
    pub cursor_bottom: String,
}

/// An entry of the `addEntries` instruction.
struct Entry<'a> {
    sort_key: Option<&'a str>,
    tweet_id: Option<&'a str>,
}

impl<'a> Entry<'a> {
    fn read(node: JsonNode<'a>) -> Self {
        Self {
            sort_key: node.get("sortIndex").as_str(),
            tweet_id: node
                .path(&["content", "item", "content", "tweet", "id"])
                .as_str(),
        }
    }
}

/// Resolve a raw timeline page into ordered tweet objects and its cursors.
pub fn resolve_page(payload: &Value) -> Result<TimelinePage<'_>> {
    let root = JsonNode::new(payload);

    let tweets = root.path(&["globalObjects", "tweets"]);
    if !tweets.is_object() {
        return Err(Error::Protocol(
            "timeline page has no globalObjects.tweets object".into(),
        ));
    }

    let instructions = root.path(&["timeline", "instructions"]);
    if !instructions.is_array() {
        return Err(Error::Protocol(
            "timeline page has no timeline.instructions array".into(),
        ));
    }

    let entries = instructions
        .elements()
        .map(|instruction| instruction.path(&["addEntries", "entries"]))
        .find(JsonNode::is_array)
        .ok_or_else(|| Error::Protocol("timeline page has no addEntries instruction".into()))?;

    let mut ordered: Vec<Entry<'_>> = entries.elements().map(Entry::read).collect();
    sort_entries(&mut ordered);

    let mut seen = HashSet::new();
    let resolved: Vec<JsonNode<'_>> = ordered
        .iter()
        .filter_map(|entry| {
            let id = entry.tweet_id?;
            let tweet = tweets.get(id);
            (tweet.is_object() && seen.insert(id)).then_some(tweet)
        })
        .collect();

    let cursor_top = find_cursor(entries, CursorType::Top)?;
    let cursor_bottom = find_cursor(entries, CursorType::Bottom)?;

    tracing::debug!(
        "Resolved {} of {} entries to tweets",
        resolved.len(),
        ordered.len()
    );

    Ok(TimelinePage {
        tweets: resolved,
        cursor_top,
        cursor_bottom,
    })
}

/// Order entries by sort key, descending, comparing keys byte-wise.
///
/// Keys are fixed-width digit strings today; they are never parsed as
/// integers. Entries without a key go last. The sort is stable.
fn sort_entries(entries: &mut [Entry<'_>]) {
    entries.sort_by(|a, b| b.sort_key.cmp(&a.sort_key));
}

/// Find the first non-empty cursor value of the given type.
fn find_cursor(entries: JsonNode<'_>, cursor_type: CursorType) -> Result<String> {
    entries
        .elements()
        .map(|entry| entry.path(&["content", "operation", "cursor"]))
        .filter(|cursor| cursor.get("cursorType").as_str() == Some(cursor_type.as_str()))
        .filter_map(|cursor| cursor.get("value").as_str())
        .find(|value| !value.is_empty())
        .map(str::to_owned)
        .ok_or(Error::MissingCursor(cursor_type.as_str()))
}
