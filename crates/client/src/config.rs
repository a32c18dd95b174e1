use std::time::Duration;

/// Protocol version sent as the `API-Version` header.
pub const API_VERSION: &str = "2025-09-29";

/// Default `User-Agent` header value.
pub const DEFAULT_USER_AGENT: &str = "acp-client";

/// Default `Accept-Language` header value.
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US";

/// Default per-call deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// OAuth2 client-credentials configuration for the merchant API.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    /// Token endpoint URL
    pub token_url: String,

    /// Client identifier
    pub client_id: String,

    /// Client secret
    pub client_secret: String,

    /// Requested scope, if the merchant requires one
    pub scope: Option<String>,
}

impl OAuthConfig {
    /// Create a new OAuth configuration.
    pub fn new(
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scope: None,
        }
    }

    /// Set the requested scope.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }
}

/// Configuration for the merchant API client.
///
/// Settings *loading* (files, environment) is the caller's concern; this is
/// the constructed boundary object the services receive.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL all request paths are appended to
    pub base_url: String,

    /// OAuth2 client-credentials settings
    pub oauth: OAuthConfig,

    /// Per-call deadline; elapsed deadlines surface as transport failures
    pub timeout: Duration,

    /// Value of the `API-Version` header
    pub api_version: String,

    /// Value of the `User-Agent` header
    pub user_agent: String,

    /// Value of the `Accept-Language` header
    pub accept_language: String,
}

impl ClientConfig {
    /// Create a configuration with the given base URL and OAuth settings.
    pub fn new(base_url: impl Into<String>, oauth: OAuthConfig) -> Self {
        Self {
            base_url: base_url.into(),
            oauth,
            timeout: DEFAULT_TIMEOUT,
            api_version: API_VERSION.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
        }
    }

    /// Set the per-call deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the protocol version header.
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Override the user agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Override the accept-language header.
    pub fn with_accept_language(mut self, accept_language: impl Into<String>) -> Self {
        self.accept_language = accept_language.into();
        self
    }
}
