//! Payment delegation service.
//!
//! A single exchange: hand the merchant a one-time payment authorization
//! bounded by an allowance, and receive an opaque vault token. Replay
//! outside the allowance's scope is for the merchant to reject; this layer
//! only transports the request faithfully and validates the schema.

use tracing::debug;

use acp_types::{DelegatePaymentRequest, DelegatePaymentResponse};

use crate::error::{ClientError, Result};
use crate::headers::{RequestOptions, protocol_headers};
use crate::http::{HttpClient, decode_body};

/// Path of the delegate-payment endpoint.
pub const DELEGATE_PAYMENT_PATH: &str = "/agentic_commerce/delegate_payment";

/// Client for the delegate-payment exchange.
#[derive(Clone)]
pub struct PaymentsClient {
    http: HttpClient,
}

impl PaymentsClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// `POST /agentic_commerce/delegate_payment`
    ///
    /// Same header and idempotency discipline as the checkout calls. A
    /// request without risk signals is rejected before any network call.
    pub async fn delegate_payment(
        &self,
        request: &DelegatePaymentRequest,
        opts: RequestOptions,
    ) -> Result<DelegatePaymentResponse> {
        if request.risk_signals.is_empty() {
            return Err(ClientError::InvalidRequest(
                "risk_signals must contain at least one entry".to_string(),
            ));
        }

        let opts = opts.for_mutation();
        let headers = protocol_headers(self.http.config(), &opts)?;
        debug!(
            checkout_session_id = %request.allowance.checkout_session_id,
            merchant_id = %request.allowance.merchant_id,
            "delegating payment"
        );
        let body = self.http.post(DELEGATE_PAYMENT_PATH, request, headers).await?;
        decode_body(body)
    }
}
