use acp_types::ApiError;
use thiserror::Error;

/// Errors surfaced by the Agentic Commerce client.
///
/// A non-2xx response whose body parses as the protocol error schema becomes
/// [`ClientError::Api`]; anything else stays an opaque transport failure so
/// callers can tell the two apart. The client never retries on its own.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Structured error returned by the merchant endpoint
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// Non-2xx response whose body did not parse as the error schema
    #[error("transport error: status {status}: {body}")]
    Transport { status: u16, body: String },

    /// Connection, TLS, or timeout failure from reqwest
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Token endpoint failure or unusable credentials
    #[error("authentication error: {0}")]
    Authentication(String),

    /// 2xx response that did not match the expected schema (schema drift
    /// is a fatal integration error, not a business error)
    #[error("unexpected response schema: {0}")]
    UnexpectedSchema(String),

    /// Request rejected locally before any network call
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// The structured error, when this failure carries one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            ClientError::Api(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
