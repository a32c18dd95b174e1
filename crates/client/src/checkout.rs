//! Checkout session service.
//!
//! Create, read, update, and complete checkout sessions against the
//! merchant's Agentic Checkout API. The merchant is authoritative for
//! status transitions; this client validates response shape only.

use tracing::debug;

use acp_types::{
    CheckoutSession, CheckoutSessionCompleteRequest, CheckoutSessionCreateRequest,
    CheckoutSessionUpdateRequest, CheckoutSessionWithOrder,
};

use crate::error::Result;
use crate::headers::{RequestOptions, protocol_headers};
use crate::http::{HttpClient, decode_body};

/// Base path of the checkout sessions resource.
pub const CHECKOUT_SESSIONS_PATH: &str = "/agentic_checkout/sessions";

/// Client for the checkout session lifecycle.
#[derive(Clone)]
pub struct CheckoutClient {
    http: HttpClient,
}

impl CheckoutClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// `POST /agentic_checkout/sessions`
    ///
    /// Session creation is a financial-intent operation: an idempotency key
    /// and timestamp are always attached (generated when not supplied) so a
    /// verbatim retry is safe.
    pub async fn create_session(
        &self,
        request: &CheckoutSessionCreateRequest,
        opts: RequestOptions,
    ) -> Result<CheckoutSession> {
        let opts = opts.for_mutation();
        let headers = protocol_headers(self.http.config(), &opts)?;
        debug!(items = request.items.len(), "creating checkout session");
        let body = self.http.post(CHECKOUT_SESSIONS_PATH, request, headers).await?;
        decode_body(body)
    }

    /// `GET /agentic_checkout/sessions/{id}`
    ///
    /// Read-only, naturally idempotent: no idempotency key, signature, or
    /// timestamp is sent. Also the reconciliation primitive after an
    /// abandoned create/complete call.
    pub async fn get_session(
        &self,
        checkout_session_id: &str,
        opts: RequestOptions,
    ) -> Result<CheckoutSession> {
        let opts = opts.for_read();
        let headers = protocol_headers(self.http.config(), &opts)?;
        let path = format!("{CHECKOUT_SESSIONS_PATH}/{checkout_session_id}");
        let body = self.http.get(&path, None, headers).await?;
        decode_body(body)
    }

    /// `PATCH /agentic_checkout/sessions/{id}`
    ///
    /// Only explicitly-set fields are serialized; omitted fields never
    /// reach the wire as nulls.
    pub async fn update_session(
        &self,
        checkout_session_id: &str,
        request: &CheckoutSessionUpdateRequest,
        opts: RequestOptions,
    ) -> Result<CheckoutSession> {
        let opts = opts.for_mutation();
        let headers = protocol_headers(self.http.config(), &opts)?;
        let path = format!("{CHECKOUT_SESSIONS_PATH}/{checkout_session_id}");
        debug!(checkout_session_id, "updating checkout session");
        let body = self.http.patch(&path, request, headers).await?;
        decode_body(body)
    }

    /// `POST /agentic_checkout/sessions/{id}/complete`
    ///
    /// Finalizes the purchase. This layer never retries and never swaps in
    /// a new idempotency key; retry-with-same-key is the caller's call.
    /// After a timeout, reconcile with [`Self::get_session`] instead of
    /// blindly retrying under a fresh key.
    pub async fn complete_session(
        &self,
        checkout_session_id: &str,
        request: &CheckoutSessionCompleteRequest,
        opts: RequestOptions,
    ) -> Result<CheckoutSessionWithOrder> {
        let opts = opts.for_mutation();
        let headers = protocol_headers(self.http.config(), &opts)?;
        let path = format!("{CHECKOUT_SESSIONS_PATH}/{checkout_session_id}/complete");
        debug!(checkout_session_id, "completing checkout session");
        let body = self.http.post(&path, request, headers).await?;
        decode_body(body)
    }
}
