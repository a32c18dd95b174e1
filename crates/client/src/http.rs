//! Authenticated HTTP transport for the merchant API.
//!
//! One [`HttpClient`] owns the connection pool and the token cache and is
//! cheap to clone; all clones share both, so many in-flight requests reuse
//! one pool. Dropping the last clone releases the pool — there is no
//! separate close step to forget on an exit path.

use std::sync::Arc;

use reqwest::Method;
use reqwest::header::HeaderMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use acp_types::ApiError;

use crate::auth::{ClientCredentialsSource, TokenManager, TokenSource};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// Async HTTP client carrying bearer auth on every call.
#[derive(Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    config: Arc<ClientConfig>,
    tokens: Arc<TokenManager>,
}

impl HttpClient {
    /// Build a client from the configuration, using the OAuth2
    /// client-credentials exchange as the token source.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        let source = ClientCredentialsSource::new(inner.clone(), config.oauth.clone());
        Ok(Self {
            inner,
            config: Arc::new(config),
            tokens: Arc::new(TokenManager::new(Arc::new(source))),
        })
    }

    /// Build a client with an injected token source (tests, pre-issued
    /// tokens, alternative grant types).
    pub fn with_token_source(config: ClientConfig, source: Arc<dyn TokenSource>) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            inner,
            config: Arc::new(config),
            tokens: Arc::new(TokenManager::new(source)),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Access the token manager, e.g. to invalidate a token the merchant
    /// has started rejecting.
    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    /// `GET {base_url}{path}`.
    pub async fn get(
        &self,
        path: &str,
        params: Option<&[(&str, &str)]>,
        headers: HeaderMap,
    ) -> Result<Value> {
        self.send(Method::GET, path, params, None::<&()>, headers)
            .await
    }

    /// `POST {base_url}{path}` with a JSON body.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        json: &B,
        headers: HeaderMap,
    ) -> Result<Value> {
        self.send(Method::POST, path, None, Some(json), headers)
            .await
    }

    /// `PATCH {base_url}{path}` with a JSON body.
    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        json: &B,
        headers: HeaderMap,
    ) -> Result<Value> {
        self.send(Method::PATCH, path, None, Some(json), headers)
            .await
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        params: Option<&[(&str, &str)]>,
        json: Option<&B>,
        headers: HeaderMap,
    ) -> Result<Value> {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        let bearer = self.tokens.bearer().await?;

        let mut request = self
            .inner
            .request(method.clone(), &url)
            .bearer_auth(bearer)
            .headers(headers);
        if let Some(params) = params {
            request = request.query(params);
        }
        if let Some(json) = json {
            request = request.json(json);
        }

        debug!(%method, %url, "sending merchant api request");
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(%method, %url, %status, "merchant api request failed");
            return Err(error_from_response(status.as_u16(), &body));
        }
        if body.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|err| {
            ClientError::UnexpectedSchema(format!("response body is not json: {err}"))
        })
    }
}

/// Map a non-2xx response to the structured error when the body parses as
/// the protocol error schema, otherwise carry the raw status and body.
pub(crate) fn error_from_response(status: u16, body: &str) -> ClientError {
    match serde_json::from_str::<ApiError>(body) {
        Ok(err) => ClientError::Api(err),
        Err(_) => ClientError::Transport {
            status,
            body: body.to_string(),
        },
    }
}

/// Decode a 2xx body into the operation's response schema. Drift between
/// the merchant and this layer is fatal, not swallowed.
pub(crate) fn decode_body<T: DeserializeOwned>(body: Value) -> Result<T> {
    serde_json::from_value(body).map_err(|err| ClientError::UnexpectedSchema(err.to_string()))
}

#[cfg(test)]
mod tests {
    use acp_types::ErrorType;

    use super::*;

    #[test]
    fn test_structured_error_body_surfaces_as_api_error() {
        let err = error_from_response(
            402,
            r#"{"type":"invalid_request","code":"invalid_card","message":"Card was declined"}"#,
        );
        match err {
            ClientError::Api(api) => {
                assert_eq!(api.error_type, ErrorType::InvalidRequest);
                assert_eq!(api.code, "invalid_card");
            }
            other => panic!("expected ClientError::Api, got {other:?}"),
        }
    }

    #[test]
    fn test_unparseable_error_body_stays_opaque() {
        let err = error_from_response(502, "<html>Bad Gateway</html>");
        match err {
            ClientError::Transport { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "<html>Bad Gateway</html>");
            }
            other => panic!("expected ClientError::Transport, got {other:?}"),
        }
    }

    #[test]
    fn test_error_body_with_wrong_shape_stays_opaque() {
        // Valid json, but not the error schema
        let err = error_from_response(500, r#"{"message":"oops"}"#);
        assert!(matches!(err, ClientError::Transport { status: 500, .. }));
    }

    #[test]
    fn test_decode_body_flags_schema_drift() {
        let result: Result<acp_types::CheckoutSession> =
            decode_body(serde_json::json!({ "id": "checkout_session_123" }));
        assert!(matches!(result, Err(ClientError::UnexpectedSchema(_))));
    }
}
