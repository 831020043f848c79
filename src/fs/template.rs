//! Output path templates.
//!
//! A template is a relative path with `{name}` placeholders, for example
//! `{username}/{created}_{tweet_id}_{index}.{ext}`. Literal braces are written
//! `{{` and `}}`. Every substituted value goes through
//! [`sanitize_component`](crate::fs::naming::sanitize_component).

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{Datelike, Timelike};

use crate::error::{Error, Result};
use crate::fs::naming::sanitize_component;
use crate::media::TweetMedia;

/// Template used when none is configured.
pub const DEFAULT_TEMPLATE: &str = "{username}/{created}_{tweet_id}_{index}.{ext}";

/// A placeholder that can appear in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    UserId,
    Username,
    TweetId,
    Created,
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    MediaId,
    Index,
    Count,
    Stem,
    Ext,
    Width,
    Height,
    Kind,
}

impl Field {
    const ALL: [Field; 18] = [
        Field::UserId,
        Field::Username,
        Field::TweetId,
        Field::Created,
        Field::Year,
        Field::Month,
        Field::Day,
        Field::Hour,
        Field::Minute,
        Field::Second,
        Field::MediaId,
        Field::Index,
        Field::Count,
        Field::Stem,
        Field::Ext,
        Field::Width,
        Field::Height,
        Field::Kind,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Field::UserId => "user_id",
            Field::Username => "username",
            Field::TweetId => "tweet_id",
            Field::Created => "created",
            Field::Year => "year",
            Field::Month => "month",
            Field::Day => "day",
            Field::Hour => "hour",
            Field::Minute => "minute",
            Field::Second => "second",
            Field::MediaId => "media_id",
            Field::Index => "index",
            Field::Count => "count",
            Field::Stem => "stem",
            Field::Ext => "ext",
            Field::Width => "width",
            Field::Height => "height",
            Field::Kind => "kind",
        }
    }

    /// Raw (unsanitized) value of this field for a media item.
    fn value(&self, item: &TweetMedia) -> String {
        let created = &item.created_at;
        match self {
            Field::UserId => item.user_id.clone(),
            Field::Username => item.username.clone(),
            Field::TweetId => item.tweet_id.clone(),
            Field::Created => item.created_compact(),
            Field::Year => format!("{:04}", created.year()),
            Field::Month => format!("{:02}", created.month()),
            Field::Day => format!("{:02}", created.day()),
            Field::Hour => format!("{:02}", created.hour()),
            Field::Minute => format!("{:02}", created.minute()),
            Field::Second => format!("{:02}", created.second()),
            Field::MediaId => item.media_id.clone(),
            Field::Index => item.index.to_string(),
            Field::Count => item.count.to_string(),
            Field::Stem => item.stem.clone(),
            Field::Ext => item.extension.clone(),
            Field::Width => item.width.to_string(),
            Field::Height => item.height.to_string(),
            Field::Kind => item.kind.label().to_string(),
        }
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.name() == s)
            .ok_or_else(|| Error::Template(format!("unknown placeholder '{{{}}}'", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Field),
}

/// A parsed output path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl OutputTemplate {
    /// Parse a template, rejecting unknown placeholders and unbalanced braces.
    pub fn parse(source: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(c) => name.push(c),
                            None => {
                                return Err(Error::Template(format!(
                                    "unterminated placeholder '{{{}'",
                                    name
                                )))
                            }
                        }
                    }

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(name.parse()?));
                }
                '}' => {
                    return Err(Error::Template("unmatched '}'".to_string()));
                }
                c => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        if segments.is_empty() {
            return Err(Error::Template("template is empty".to_string()));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// Render the relative output path for a media item.
    pub fn render(&self, item: &TweetMedia) -> PathBuf {
        let rendered: String = self
            .segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.clone(),
                Segment::Field(field) => sanitize_component(&field.value(item)),
            })
            .collect();

        PathBuf::from(rendered)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl FromStr for OutputTemplate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        OutputTemplate::parse(s)
    }
}

impl Default for OutputTemplate {
    fn default() -> Self {
        Self {
            source: DEFAULT_TEMPLATE.to_string(),
            segments: vec![
                Segment::Field(Field::Username),
                Segment::Literal("/".to_string()),
                Segment::Field(Field::Created),
                Segment::Literal("_".to_string()),
                Segment::Field(Field::TweetId),
                Segment::Literal("_".to_string()),
                Segment::Field(Field::Index),
                Segment::Literal(".".to_string()),
                Segment::Field(Field::Ext),
            ],
        }
    }
}

impl fmt::Display for OutputTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaKind;
    use chrono::{TimeZone, Utc};

    fn sample() -> TweetMedia {
        TweetMedia {
            url: "https://pbs.twimg.com/media/ABC123?format=jpg&name=orig".to_string(),
            kind: MediaKind::Photo,
            user_id: "783214".to_string(),
            username: "Twitter".to_string(),
            tweet_id: "1050118621198921728".to_string(),
            created_at: Utc.with_ymd_and_hms(2018, 10, 10, 20, 19, 24).unwrap(),
            count: 2,
            media_id: "1050118610000000000".to_string(),
            index: 1,
            stem: "ABC123".to_string(),
            extension: "jpg".to_string(),
            width: 1200,
            height: 800,
        }
    }

    #[test]
    fn test_default_template_matches_its_source() {
        assert_eq!(
            OutputTemplate::parse(DEFAULT_TEMPLATE).unwrap(),
            OutputTemplate::default()
        );
    }

    #[test]
    fn test_render_default() {
        let path = OutputTemplate::default().render(&sample());
        assert_eq!(
            path,
            PathBuf::from("Twitter/20181010201924_1050118621198921728_1.jpg")
        );
    }

    #[test]
    fn test_render_every_field() {
        let template = OutputTemplate::parse(
            "{user_id}-{username}-{tweet_id}-{created}-{year}{month}{day}{hour}{minute}{second}-\
             {media_id}-{index}of{count}-{stem}.{ext}-{width}x{height}-{kind}",
        )
        .unwrap();

        let rendered = template.render(&sample());
        assert_eq!(
            rendered,
            PathBuf::from(
                "783214-Twitter-1050118621198921728-20181010201924-20181010201924-\
                 1050118610000000000-1of2-ABC123.jpg-1200x800-photo"
            )
        );
    }

    #[test]
    fn test_render_sanitizes_values() {
        let mut item = sample();
        item.username = "../../etc".to_string();
        item.stem = "a/b".to_string();

        let path = OutputTemplate::parse("{username}/{stem}.{ext}")
            .unwrap()
            .render(&item);
        assert_eq!(path, PathBuf::from(".._.._etc/a_b.jpg"));
    }

    #[test]
    fn test_escaped_braces() {
        let template = OutputTemplate::parse("{{{tweet_id}}}.{ext}").unwrap();
        assert_eq!(
            template.render(&sample()),
            PathBuf::from("{1050118621198921728}.jpg")
        );
    }

    #[test]
    fn test_invalid_templates() {
        assert!(OutputTemplate::parse("").is_err());
        assert!(OutputTemplate::parse("{nope}").is_err());
        assert!(OutputTemplate::parse("{tweet_id").is_err());
        assert!(OutputTemplate::parse("tweet_id}").is_err());
    }
}
