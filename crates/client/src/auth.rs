//! OAuth2 client-credentials token acquisition and caching.
//!
//! Token handling is transparent to callers: the transport asks
//! [`TokenManager::bearer`] before each request and gets either the cached
//! token or the result of a fresh exchange. The cache sits behind an async
//! mutex, so when the token has expired, concurrent requests wait on the one
//! in-flight exchange instead of racing their own.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::OAuthConfig;
use crate::error::{ClientError, Result};

/// Tokens within this many seconds of expiry are treated as expired, so a
/// request never goes out with a token that dies in flight.
const EXPIRY_SKEW_SECS: i64 = 30;

/// A bearer token and when it stops being valid.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,

    /// `None` means the endpoint did not report a lifetime; the token is
    /// then kept until explicitly invalidated.
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    fn is_fresh(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                Utc::now() + chrono::Duration::seconds(EXPIRY_SKEW_SECS) < expires_at
            }
            None => true,
        }
    }
}

/// Capability seam for obtaining access tokens.
///
/// Injected into [`TokenManager`] so transports and tests can swap the
/// exchange without touching the caching logic.
pub trait TokenSource: Send + Sync {
    fn fetch(&self) -> BoxFuture<'_, Result<AccessToken>>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// [`TokenSource`] that performs the OAuth2 client-credentials exchange
/// against the configured token endpoint.
pub struct ClientCredentialsSource {
    http: reqwest::Client,
    config: OAuthConfig,
}

impl ClientCredentialsSource {
    pub fn new(http: reqwest::Client, config: OAuthConfig) -> Self {
        Self { http, config }
    }
}

impl TokenSource for ClientCredentialsSource {
    fn fetch(&self) -> BoxFuture<'_, Result<AccessToken>> {
        Box::pin(async move {
            let mut form = vec![
                ("grant_type", "client_credentials"),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
            ];
            if let Some(scope) = self.config.scope.as_deref() {
                form.push(("scope", scope));
            }

            debug!(token_url = %self.config.token_url, "exchanging client credentials");
            let response = self
                .http
                .post(&self.config.token_url)
                .form(&form)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                warn!(%status, "token endpoint rejected the credential exchange");
                return Err(ClientError::Authentication(format!(
                    "token endpoint returned {status}: {body}"
                )));
            }

            let token: TokenResponse = response
                .json()
                .await
                .map_err(|err| ClientError::Authentication(format!("bad token response: {err}")))?;

            Ok(AccessToken {
                token: token.access_token,
                expires_at: token
                    .expires_in
                    .map(|secs| Utc::now() + chrono::Duration::seconds(secs)),
            })
        })
    }
}

/// Caches the access token and coordinates refreshes.
///
/// The fetch runs while the cache lock is held: a request that finds a
/// refresh already in progress waits for it rather than starting a second
/// exchange.
pub struct TokenManager {
    source: Arc<dyn TokenSource>,
    cached: tokio::sync::Mutex<Option<AccessToken>>,
}

impl TokenManager {
    pub fn new(source: Arc<dyn TokenSource>) -> Self {
        Self {
            source,
            cached: tokio::sync::Mutex::new(None),
        }
    }

    /// The current bearer token, fetching a new one if the cache is empty
    /// or about to expire.
    pub async fn bearer(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.is_fresh() {
                return Ok(token.token.clone());
            }
        }

        debug!("access token missing or expiring, fetching a fresh one");
        let token = self.source.fetch().await?;
        let bearer = token.token.clone();
        *cached = Some(token);
        Ok(bearer)
    }

    /// Drop the cached token so the next request performs a fresh exchange.
    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }
}
