//! Twitter API HTTP client.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::{header, Client, Response};
use serde_json::Value;
use tokio::sync::RwLock;
use url::Url;

use crate::api::session::{parse_guest_token, Session};
use crate::error::{Error, Result};
use crate::json::JsonNode;
use crate::timeline::TimelineSource;

/// Twitter API base URL.
const API_BASE: &str = "https://api.twitter.com";

/// GraphQL operation resolving a screen name to an account.
const USER_BY_SCREEN_NAME: &str = "/graphql/P8ph10GzBbdMqWZxulqCfA/UserByScreenName";

/// Bearer token of the public web client.
pub const DEFAULT_BEARER_TOKEN: &str = "AAAAAAAAAAAAAAAAAAAAANRILgAAAAAAnNwIzUejRCOuH5E6I8xnZz4puTs%3D1Zv7ttfk8LF81IUq16cHjhLTvJu4FA33AGWWjCpTnA";

/// Browser user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:74.0) Gecko/20100101 Firefox/74.0";

/// Default number of tweets requested per timeline page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Fixed query parameters of the media timeline endpoint.
const TIMELINE_PARAMS: &[(&str, &str)] = &[
    ("include_profile_interstitial_type", "1"),
    ("include_blocking", "1"),
    ("include_blocked_by", "1"),
    ("include_followed_by", "1"),
    ("include_want_retweets", "1"),
    ("include_mute_edge", "1"),
    ("include_can_dm", "1"),
    ("include_can_media_tag", "1"),
    ("skip_status", "1"),
    ("cards_platform", "Web-12"),
    ("include_cards", "1"),
    ("include_composer_source", "true"),
    ("include_ext_alt_text", "true"),
    ("include_reply_count", "1"),
    ("tweet_mode", "extended"),
    ("include_entities", "true"),
    ("include_user_entities", "true"),
    ("include_ext_media_color", "true"),
    ("include_ext_media_availability", "true"),
    ("send_error_codes", "true"),
    ("simple_quoted_tweets", "true"),
];

/// Twitter API client holding the guest session.
pub struct TwitterApi {
    client: Client,
    bearer_token: String,
    page_size: u32,
    session: Session,
    known_user_ids: RwLock<HashMap<String, String>>,
}

impl TwitterApi {
    /// Create a new API client. No request is made until the first call.
    pub fn new(bearer_token: String, user_agent: &str, page_size: u32) -> Result<Self> {
        let jar = Arc::new(Jar::default());

        let client = Client::builder()
            .user_agent(user_agent)
            .cookie_provider(jar.clone())
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            bearer_token,
            page_size,
            session: Session::new(jar),
            known_user_ids: RwLock::new(HashMap::new()),
        })
    }

    /// Build the browser-like header set shared by all API requests.
    fn base_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();

        headers.insert(header::ACCEPT, header::HeaderValue::from_static("*/*"));
        headers.insert(
            header::ACCEPT_LANGUAGE,
            header::HeaderValue::from_static("en-US,en;q=0.5"),
        );
        headers.insert(header::DNT, header::HeaderValue::from_static("1"));
        headers.insert(
            header::ORIGIN,
            header::HeaderValue::from_static("https://twitter.com"),
        );
        headers.insert(
            header::REFERER,
            header::HeaderValue::from_static("https://twitter.com/"),
        );
        headers.insert(
            header::AUTHORIZATION,
            header_value(&format!("Bearer {}", self.bearer_token))?,
        );
        headers.insert(
            "x-twitter-client-language",
            header::HeaderValue::from_static("en"),
        );
        headers.insert(
            "x-twitter-active-user",
            header::HeaderValue::from_static("yes"),
        );

        Ok(headers)
    }

    /// Headers for requests made on behalf of the guest session.
    async fn session_headers(&self) -> Result<header::HeaderMap> {
        let guest_token = self
            .session
            .ensure_guest_token(|| self.activate_guest())
            .await?;
        let csrf_token = self.session.ensure_csrf_token().await?;

        self.guest_headers(&guest_token, &csrf_token)
    }

    /// Add the guest and CSRF tokens to the base header set.
    fn guest_headers(&self, guest_token: &str, csrf_token: &str) -> Result<header::HeaderMap> {
        let mut headers = self.base_headers()?;
        headers.insert("x-guest-token", header_value(guest_token)?);
        headers.insert("x-csrf-token", header_value(csrf_token)?);

        Ok(headers)
    }

    /// Activate a new guest session and return its token.
    async fn activate_guest(&self) -> Result<String> {
        let url = format!("{}/1.1/guest/activate.json", API_BASE);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .headers(self.base_headers()?)
            .send()
            .await?;
        let body = read_json(check_status(response).await?, "guest activation").await?;

        parse_guest_token(&body)
    }

    /// Make a GET request within the guest session and parse the JSON body.
    async fn get_json(&self, url: Url, what: &str) -> Result<Value> {
        let headers = self.session_headers().await?;

        tracing::debug!("GET {}", url);

        let response = self.client.get(url).headers(headers).send().await?;
        read_json(check_status(response).await?, what).await
    }

    /// Resolve a screen name to the account's numeric id.
    ///
    /// Lookups are cached for the lifetime of the client, ignoring case.
    pub async fn user_id(&self, screen_name: &str) -> Result<String> {
        let key = screen_name.to_lowercase();
        if let Some(id) = self.known_user_ids.read().await.get(&key) {
            return Ok(id.clone());
        }

        let url = user_lookup_url(screen_name)?;
        let body = self.get_json(url, "user lookup").await?;

        let id = parse_user_id(&body)
            .ok_or_else(|| Error::AccountNotFound(screen_name.to_string()))?;
        tracing::debug!("Resolved @{} to account {}", screen_name, id);

        self.known_user_ids.write().await.insert(key, id.clone());
        Ok(id)
    }
}

#[async_trait]
impl TimelineSource for TwitterApi {
    async fn fetch_page(&self, user_id: &str, cursor: Option<&str>) -> Result<Value> {
        let url = timeline_url(user_id, cursor, self.page_size)?;
        self.get_json(url, "timeline page").await
    }
}

/// Build the media timeline URL for one page.
pub fn timeline_url(user_id: &str, cursor: Option<&str>, page_size: u32) -> Result<Url> {
    let mut url = Url::parse(&format!("{}/2/timeline/media/{}.json", API_BASE, user_id))?;

    {
        let mut query = url.query_pairs_mut();
        query.extend_pairs(TIMELINE_PARAMS);
        query.append_pair("count", &page_size.to_string());
        if let Some(cursor) = cursor {
            query.append_pair("cursor", cursor);
        }
        query.append_pair("ext", "mediaStats,cameraMoment");
    }

    Ok(url)
}

/// Build the account lookup URL for a screen name.
pub fn user_lookup_url(screen_name: &str) -> Result<Url> {
    let variables = serde_json::json!({
        "screen_name": screen_name,
        "withHighlightedLabel": false,
    });

    Ok(Url::parse_with_params(
        &format!("{}{}", API_BASE, USER_BY_SCREEN_NAME),
        &[("variables", variables.to_string())],
    )?)
}

/// Extract `data.user.rest_id` from a user lookup response.
pub fn parse_user_id(body: &Value) -> Option<String> {
    JsonNode::new(body)
        .path(&["data", "user", "rest_id"])
        .as_str()
        .map(str::to_owned)
}

fn header_value(value: &str) -> Result<header::HeaderValue> {
    header::HeaderValue::from_str(value)
        .map_err(|e| Error::Api(format!("Invalid header value: {}", e)))
}

/// Map non-success statuses to errors.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    tracing::debug!("Response status: {}", status);

    if status.is_success() {
        return Ok(response);
    }

    if status == 429 {
        return Err(Error::RateLimited);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::debug!("Error response body: {}", body);

    if status == 401 || status == 403 {
        return Err(Error::Authentication(format!("HTTP {}", status)));
    }

    Err(Error::Api(format!("HTTP {}", status)))
}

async fn read_json(response: Response, what: &str) -> Result<Value> {
    let text = response.text().await?;
    tracing::debug!("{} response length: {} bytes", what, text.len());

    serde_json::from_str(&text).map_err(|e| {
        tracing::debug!(
            "Failed to parse {}: {} - Response: {}",
            what,
            e,
            text.chars().take(500).collect::<String>()
        );
        Error::Json(e)
    })
}
