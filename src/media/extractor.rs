//! Media extraction from tweet objects.

use chrono::{DateTime, Utc};
use url::Url;

use crate::error::{Error, Result};
use crate::json::JsonNode;
use crate::media::item::{MediaKind, TweetMedia};

/// Layout of the `created_at` field, e.g. `Wed Oct 10 20:19:24 +0000 2018`.
const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Extract every media attachment of a tweet, in attachment order.
///
/// Tweets without `extended_entities.media` yield no items.
pub fn extract_media(
    user_id: &str,
    username: &str,
    tweet: JsonNode<'_>,
) -> Result<Vec<TweetMedia>> {
    let tweet_id = tweet
        .get("id_str")
        .as_str()
        .ok_or_else(|| Error::Protocol("tweet has no id_str".into()))?;

    let created_raw = tweet
        .get("created_at")
        .as_str()
        .ok_or_else(|| Error::Protocol(format!("tweet {} has no created_at", tweet_id)))?;
    let created_at = parse_created_at(created_raw)?;

    let media_list = tweet.path(&["extended_entities", "media"]);
    let count = media_list.len().unwrap_or(0);

    media_list
        .elements()
        .enumerate()
        .map(|(position, media)| -> Result<TweetMedia> {
            let media_id = media
                .get("id_str")
                .as_str()
                .ok_or_else(|| Error::Protocol(format!("media of tweet {} has no id_str", tweet_id)))?;

            let type_name = media.get("type").as_str().ok_or_else(|| {
                Error::Protocol(format!("media {} has no type", media_id))
            })?;
            let kind = MediaKind::from_type(type_name)?;

            let (url, stem, extension) = if kind.has_variants() {
                resolve_variant_url(media, media_id)?
            } else {
                resolve_photo_url(media, media_id)?
            };

            let original = media.get("original_info");
            let width = original.get("width").as_u32().ok_or_else(|| {
                Error::Protocol(format!("media {} has no original width", media_id))
            })?;
            let height = original.get("height").as_u32().ok_or_else(|| {
                Error::Protocol(format!("media {} has no original height", media_id))
            })?;

            Ok(TweetMedia {
                url,
                kind,
                user_id: user_id.to_string(),
                username: username.to_string(),
                tweet_id: tweet_id.to_string(),
                created_at,
                count,
                media_id: media_id.to_string(),
                index: position + 1,
                stem,
                extension,
                width,
                height,
            })
        })
        .collect()
}

/// Parse a tweet's `created_at` into UTC.
pub fn parse_created_at(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_str(raw, CREATED_AT_FORMAT)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Protocol(format!("invalid created_at '{}': {}", raw, e)))
}

/// Resolve a photo to its original-resolution URL.
fn resolve_photo_url(media: JsonNode<'_>, media_id: &str) -> Result<(String, String, String)> {
    let raw = media
        .get("media_url_https")
        .as_str()
        .ok_or_else(|| Error::Protocol(format!("photo {} has no media_url_https", media_id)))?;

    let url = original_photo_url(raw)?;
    let (stem, extension) = split_filename(raw)?;

    Ok((url, stem, extension))
}

/// Resolve a video or animated image to its highest-bitrate variant.
fn resolve_variant_url(media: JsonNode<'_>, media_id: &str) -> Result<(String, String, String)> {
    let url = select_best_variant(media.path(&["video_info", "variants"]))
        .ok_or_else(|| Error::Protocol(format!("media {} has no playable variant", media_id)))?;

    let (stem, extension) = split_filename(url)?;

    Ok((url.to_string(), stem, extension))
}

/// Rewrite `<base>.<ext>` to `<base>?format=<ext>&name=orig`.
///
/// The image host serves every size of a photo from the extension-less path,
/// selected by query parameters.
pub fn original_photo_url(raw: &str) -> Result<String> {
    let mut url = Url::parse(raw)?;

    let (_, extension) = split_filename(raw)?;
    if extension.is_empty() {
        return Err(Error::Protocol(format!(
            "photo URL has no file extension: {}",
            raw
        )));
    }

    let base_path = url
        .path()
        .strip_suffix(&format!(".{}", extension))
        .unwrap_or(url.path())
        .to_string();
    url.set_path(&base_path);
    url.set_query(Some(&format!("format={}&name=orig", extension)));

    Ok(url.to_string())
}

/// Pick the URL of the variant with the highest bitrate.
///
/// Ties keep the earliest variant. Variants without a bitrate (HLS playlists)
/// only win when no variant declares one. Variants without a URL are ignored.
pub fn select_best_variant<'a>(variants: JsonNode<'a>) -> Option<&'a str> {
    let mut best: Option<(Option<u64>, &'a str)> = None;

    for variant in variants.elements() {
        let Some(url) = variant.get("url").as_str() else {
            continue;
        };
        let bitrate = variant.get("bitrate").as_u64();

        match best {
            Some((best_bitrate, _)) if bitrate <= best_bitrate => {}
            _ => best = Some((bitrate, url)),
        }
    }

    best.map(|(_, url)| url)
}

/// Split the last path segment of a URL into stem and extension.
///
/// The query string is ignored. A segment without a dot has an empty
/// extension.
pub fn split_filename(raw: &str) -> Result<(String, String)> {
    let url = Url::parse(raw)?;
    let filename = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| Error::Protocol(format!("URL has no file name: {}", raw)))?;

    Ok(match filename.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => (stem.to_string(), extension.to_string()),
        _ => (filename.to_string(), String::new()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::{json, Value};

    fn photo(id: &str, url: &str) -> Value {
        json!({
            "id_str": id,
            "type": "photo",
            "media_url_https": url,
            "original_info": { "width": 1200, "height": 800 }
        })
    }

    fn video(id: &str, kind: &str, variants: Value) -> Value {
        json!({
            "id_str": id,
            "type": kind,
            "media_url_https": "https://pbs.twimg.com/ext_tw_video_thumb/1/pu/img/thumb.jpg",
            "video_info": { "variants": variants },
            "original_info": { "width": 1280, "height": 720 }
        })
    }

    fn tweet(media: Vec<Value>) -> Value {
        json!({
            "id_str": "1050118621198921728",
            "created_at": "Wed Oct 10 20:19:24 +0000 2018",
            "full_text": "text",
            "extended_entities": { "media": media }
        })
    }

    #[test]
    fn test_photo_url_requests_original() {
        let url = original_photo_url("https://pbs.twimg.com/media/ABC123.jpg").unwrap();
        assert_eq!(url, "https://pbs.twimg.com/media/ABC123?format=jpg&name=orig");
        assert!(url.ends_with("?format=jpg&name=orig"));
    }

    #[test]
    fn test_photo_stem_and_extension_come_from_original_url() {
        let doc = tweet(vec![photo("1", "https://pbs.twimg.com/media/ABC123.jpg")]);
        let items = extract_media("7", "someone", JsonNode::new(&doc)).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, MediaKind::Photo);
        assert_eq!(items[0].stem, "ABC123");
        assert_eq!(items[0].extension, "jpg");
        assert_eq!(items[0].width, 1200);
        assert_eq!(items[0].height, 800);
    }

    #[test]
    fn test_photo_without_extension_is_rejected() {
        assert!(original_photo_url("https://pbs.twimg.com/media/ABC123").is_err());
    }

    #[test]
    fn test_video_selects_highest_bitrate() {
        let variants = json!([
            { "bitrate": 320000, "content_type": "video/mp4", "url": "A" },
            { "bitrate": 2176000, "content_type": "video/mp4", "url": "B" },
            { "bitrate": 832000, "content_type": "video/mp4", "url": "C" }
        ]);
        assert_eq!(select_best_variant(JsonNode::new(&variants)), Some("B"));
    }

    #[test]
    fn test_variant_ties_keep_first_and_playlists_rank_last() {
        let variants = json!([
            { "content_type": "application/x-mpegURL", "url": "playlist" },
            { "bitrate": 832000, "url": "first" },
            { "bitrate": 832000, "url": "second" },
            { "bitrate": 2176000 }
        ]);
        assert_eq!(select_best_variant(JsonNode::new(&variants)), Some("first"));

        let only_playlist = json!([{ "content_type": "application/x-mpegURL", "url": "playlist" }]);
        assert_eq!(
            select_best_variant(JsonNode::new(&only_playlist)),
            Some("playlist")
        );

        assert_eq!(select_best_variant(JsonNode::absent()), None);
    }

    #[test]
    fn test_video_and_gif_extraction() {
        let doc = tweet(vec![
            video(
                "10",
                "video",
                json!([
                    { "bitrate": 256000, "url": "https://video.twimg.com/ext_tw_video/1/pu/vid/480x270/low.mp4?tag=10" },
                    { "bitrate": 2176000, "url": "https://video.twimg.com/ext_tw_video/1/pu/vid/1280x720/high.mp4?tag=10" }
                ]),
            ),
            video(
                "11",
                "animated_gif",
                json!([{ "bitrate": 0, "url": "https://video.twimg.com/tweet_video/GIF42.mp4" }]),
            ),
        ]);

        let items = extract_media("7", "someone", JsonNode::new(&doc)).unwrap();
        assert_eq!(items.len(), 2);

        assert_eq!(items[0].kind, MediaKind::Video);
        assert_eq!(
            items[0].url,
            "https://video.twimg.com/ext_tw_video/1/pu/vid/1280x720/high.mp4?tag=10"
        );
        assert_eq!(items[0].stem, "high");
        assert_eq!(items[0].extension, "mp4");

        assert_eq!(items[1].kind, MediaKind::AnimatedImage);
        assert_eq!(items[1].stem, "GIF42");
    }

    #[test]
    fn test_index_and_count() {
        let doc = tweet(vec![
            photo("1", "https://pbs.twimg.com/media/A.jpg"),
            photo("2", "https://pbs.twimg.com/media/B.png"),
            photo("3", "https://pbs.twimg.com/media/C.jpg"),
        ]);

        let items = extract_media("7", "someone", JsonNode::new(&doc)).unwrap();
        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|m| m.count == 3));
        assert_eq!(
            items.iter().map(|m| m.index).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(
            items.iter().map(|m| m.media_id.as_str()).collect::<Vec<_>>(),
            vec!["1", "2", "3"]
        );
        assert_eq!(items[1].extension, "png");
    }

    #[test]
    fn test_tweet_metadata_is_copied() {
        let doc = tweet(vec![photo("1", "https://pbs.twimg.com/media/A.jpg")]);
        let items = extract_media("783214", "Twitter", JsonNode::new(&doc)).unwrap();

        let item = &items[0];
        assert_eq!(item.user_id, "783214");
        assert_eq!(item.username, "Twitter");
        assert_eq!(item.tweet_id, "1050118621198921728");
        assert_eq!(item.created_at, Utc.with_ymd_and_hms(2018, 10, 10, 20, 19, 24).unwrap());
        assert_eq!(item.created_compact(), "20181010201924");
    }

    #[test]
    fn test_created_at_is_converted_to_utc() {
        let created = parse_created_at("Wed Oct 10 22:19:24 +0200 2018").unwrap();
        assert_eq!(created, Utc.with_ymd_and_hms(2018, 10, 10, 20, 19, 24).unwrap());
        assert!(parse_created_at("2018-10-10T20:19:24Z").is_err());
    }

    #[test]
    fn test_tweet_without_media_yields_nothing() {
        let doc = json!({
            "id_str": "1",
            "created_at": "Wed Oct 10 20:19:24 +0000 2018",
            "full_text": "just text"
        });
        assert!(extract_media("7", "someone", JsonNode::new(&doc))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_missing_required_fields_are_errors() {
        let no_id = json!({ "created_at": "Wed Oct 10 20:19:24 +0000 2018" });
        assert!(extract_media("7", "someone", JsonNode::new(&no_id)).is_err());

        let no_created = json!({ "id_str": "1" });
        assert!(extract_media("7", "someone", JsonNode::new(&no_created)).is_err());

        let mut no_size = photo("1", "https://pbs.twimg.com/media/A.jpg");
        no_size["original_info"] = json!({});
        let doc = tweet(vec![no_size]);
        assert!(extract_media("7", "someone", JsonNode::new(&doc)).is_err());
    }

    #[test]
    fn test_unknown_media_type_is_an_error() {
        let mut media = photo("1", "https://pbs.twimg.com/media/A.jpg");
        media["type"] = json!("hologram");
        let doc = tweet(vec![media]);

        assert!(matches!(
            extract_media("7", "someone", JsonNode::new(&doc)),
            Err(Error::UnknownMediaType(_))
        ));
    }

    #[test]
    fn test_split_filename() {
        assert_eq!(
            split_filename("https://video.twimg.com/a/b/clip.mp4?tag=12").unwrap(),
            ("clip".to_string(), "mp4".to_string())
        );
        assert_eq!(
            split_filename("https://example.com/path/noext").unwrap(),
            ("noext".to_string(), String::new())
        );
        assert!(split_filename("https://example.com/").is_err());
    }
}
