//! Guest session bootstrap.
//!
//! The unauthenticated API surface needs two credentials on every request:
//! a server-issued guest token and a client-generated CSRF token that is sent
//! both as the `ct0` cookie and as the `x-csrf-token` header. Both are
//! established at most once per process and never refreshed.

use std::future::Future;
use std::sync::Arc;

use reqwest::cookie::Jar;
use tokio::sync::RwLock;
use url::Url;

use crate::error::{Error, Result};
use crate::json::JsonNode;

/// Origin the session cookies are scoped to.
const COOKIE_ORIGIN: &str = "https://twitter.com/";

/// Lazily established guest session shared by all API requests.
pub struct Session {
    jar: Arc<Jar>,
    guest_token: RwLock<Option<String>>,
    csrf_token: RwLock<Option<String>>,
}

impl Session {
    /// Create an empty session that seeds its cookies into `jar`.
    pub fn new(jar: Arc<Jar>) -> Self {
        Self {
            jar,
            guest_token: RwLock::new(None),
            csrf_token: RwLock::new(None),
        }
    }

    /// Return the guest token, calling `fetch` to obtain it on first use.
    ///
    /// The write lock is held across the fetch so concurrent callers never
    /// activate a second guest session.
    pub async fn ensure_guest_token<F, Fut>(&self, fetch: F) -> Result<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        if let Some(token) = self.guest_token.read().await.as_ref() {
            return Ok(token.clone());
        }

        let mut slot = self.guest_token.write().await;
        if let Some(token) = slot.as_ref() {
            return Ok(token.clone());
        }

        let token = fetch().await?;
        self.seed_cookie(&format!(
            "gt={}; Max-Age=10800; Domain=.twitter.com; Path=/; Secure",
            token
        ))?;
        tracing::debug!("Guest token established");

        *slot = Some(token.clone());
        Ok(token)
    }

    /// Return the CSRF token, generating it on first use.
    pub async fn ensure_csrf_token(&self) -> Result<String> {
        if let Some(token) = self.csrf_token.read().await.as_ref() {
            return Ok(token.clone());
        }

        let mut slot = self.csrf_token.write().await;
        if let Some(token) = slot.as_ref() {
            return Ok(token.clone());
        }

        let token = generate_csrf_token();
        self.seed_cookie(&format!(
            "ct0={}; Max-Age=21600; Domain=.twitter.com; Path=/; Secure",
            token
        ))?;
        tracing::debug!("CSRF token generated");

        *slot = Some(token.clone());
        Ok(token)
    }

    fn seed_cookie(&self, cookie: &str) -> Result<()> {
        let origin = Url::parse(COOKIE_ORIGIN)?;
        self.jar.add_cookie_str(cookie, &origin);
        Ok(())
    }
}

/// Generate a random 128-bit CSRF token as 32 lowercase hex digits.
pub fn generate_csrf_token() -> String {
    format!("{:032x}", rand::random::<u128>())
}

/// Extract the guest token from a `guest/activate.json` response body.
pub fn parse_guest_token(body: &serde_json::Value) -> Result<String> {
    JsonNode::new(body)
        .get("guest_token")
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| Error::Protocol("guest activation response has no guest_token".into()))
}
