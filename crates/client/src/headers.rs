//! Protocol header set shared by every merchant API call.
//!
//! Mutating calls carry an idempotency key (generated when the caller does
//! not supply one) and a timestamp; `Request-Id` and `Signature` are opaque
//! pass-throughs this layer never generates. An idempotency key identifies
//! one logical request: the caller supplies the same key only for a true
//! retry, and a fresh key is generated per new intent, never reused.

use chrono::{SecondsFormat, Utc};
use reqwest::header::{
    ACCEPT_LANGUAGE, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT,
};
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

pub(crate) const API_VERSION_HEADER: &str = "API-Version";
pub(crate) const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";
pub(crate) const REQUEST_ID_HEADER: &str = "Request-Id";
pub(crate) const SIGNATURE_HEADER: &str = "Signature";
pub(crate) const TIMESTAMP_HEADER: &str = "Timestamp";

/// Per-request protocol options.
///
/// All fields are optional; see the module docs for which ones are
/// defaulted on mutating calls.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Caller-chosen idempotency key; supply the same key only when
    /// retrying the identical logical request.
    pub idempotency_key: Option<String>,

    /// Opaque correlation id, passed through unmodified.
    pub request_id: Option<String>,

    /// Payload signature computed by the caller; this layer never signs.
    pub signature: Option<String>,

    /// RFC 3339 UTC timestamp; generated for mutating calls when absent.
    pub timestamp: Option<String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the idempotency key for a deliberate retry.
    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }

    /// Set the correlation id.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Set the caller-computed payload signature.
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    /// Set an explicit timestamp instead of the generated one.
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Fill the fields a mutating call must always carry. A caller-supplied
    /// idempotency key is kept verbatim; only absent values are generated.
    pub(crate) fn for_mutation(mut self) -> Self {
        if self.idempotency_key.as_deref().is_none_or(str::is_empty) {
            self.idempotency_key = Some(new_idempotency_key());
        }
        if self.timestamp.as_deref().is_none_or(str::is_empty) {
            self.timestamp = Some(now_rfc3339());
        }
        self
    }

    /// Strip everything a read-only call must not send.
    pub(crate) fn for_read(self) -> Self {
        Self {
            request_id: self.request_id,
            ..Self::default()
        }
    }
}

/// Fresh random idempotency key.
pub(crate) fn new_idempotency_key() -> String {
    Uuid::new_v4().to_string()
}

/// Current time as RFC 3339 UTC, second precision, `Z` suffix.
pub(crate) fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| ClientError::InvalidRequest(format!("invalid value for {name} header")))
}

/// Build the full header set for one request. Pure aside from nothing:
/// defaulting happens in [`RequestOptions::for_mutation`], not here.
pub(crate) fn protocol_headers(config: &ClientConfig, opts: &RequestOptions) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static("api-version"),
        header_value(API_VERSION_HEADER, &config.api_version)?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        ACCEPT_LANGUAGE,
        header_value("Accept-Language", &config.accept_language)?,
    );
    headers.insert(USER_AGENT, header_value("User-Agent", &config.user_agent)?);

    let optional = [
        (IDEMPOTENCY_KEY_HEADER, "idempotency-key", &opts.idempotency_key),
        (REQUEST_ID_HEADER, "request-id", &opts.request_id),
        (SIGNATURE_HEADER, "signature", &opts.signature),
        (TIMESTAMP_HEADER, "timestamp", &opts.timestamp),
    ];
    for (display_name, wire_name, value) in optional {
        if let Some(value) = value.as_deref() {
            if !value.is_empty() {
                headers.insert(
                    HeaderName::from_static(wire_name),
                    header_value(display_name, value)?,
                );
            }
        }
    }

    Ok(headers)
}
