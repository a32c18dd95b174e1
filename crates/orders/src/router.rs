//! Inbound order webhook routing.
//!
//! One invocation is a pure function of `(raw_body, headers)`: verify the
//! payload came from the merchant, parse it, map the event to a subscriber
//! message, hand it to the broadcast sink, acknowledge. Every failure is
//! converted to the protocol error schema at this boundary so the HTTP
//! listener in front always has well-formed JSON to return.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use acp_types::{ApiError, OrderChannelMessage, WebhookAcceptedResponse, WebhookEvent};

use crate::sink::BroadcastSink;

/// Error code returned when the authenticity check fails.
pub const CODE_INVALID_SIGNATURE: &str = "invalid_signature";

/// Error code returned when the body does not parse as a webhook event.
pub const CODE_INVALID_PAYLOAD: &str = "invalid_payload";

const REQUEST_ID_HEADER: &str = "request-id";

/// Failure reported by a [`WebhookVerifier`].
#[derive(Error, Debug)]
#[error("{0}")]
pub struct VerifyError(pub String);

/// Authenticity check for inbound webhook payloads.
///
/// How the merchant signs payloads is its own concern; the router only
/// needs accept/reject. Any rejection is reported to the webhook sender as
/// `invalid_request/invalid_signature` — the verifier's own error never
/// crosses the router boundary.
pub trait WebhookVerifier: Send + Sync {
    fn verify(
        &self,
        raw_body: &[u8],
        headers: &HashMap<String, String>,
    ) -> Result<(), VerifyError>;
}

/// Routes order lifecycle events from the webhook interface to subscriber
/// channels. Stateless per invocation; safe to call concurrently for
/// distinct deliveries. Deliveries for the same session may arrive out of
/// order and are forwarded as-is.
pub struct OrderRouter {
    verifier: Arc<dyn WebhookVerifier>,
    sink: Arc<dyn BroadcastSink>,
}

impl OrderRouter {
    pub fn new(verifier: Arc<dyn WebhookVerifier>, sink: Arc<dyn BroadcastSink>) -> Self {
        Self { verifier, sink }
    }

    /// Handle one webhook delivery.
    ///
    /// Returns the acknowledgement to send back with a 200, or the
    /// [`ApiError`] to serialize on a 4xx. Broadcast is fire-and-forget:
    /// the router's contract ends at handing the message to the sink.
    pub fn handle_webhook(
        &self,
        raw_body: &[u8],
        headers: &HashMap<String, String>,
    ) -> Result<WebhookAcceptedResponse, ApiError> {
        if let Err(err) = self.verifier.verify(raw_body, headers) {
            warn!(%err, "webhook rejected: signature verification failed");
            return Err(ApiError::invalid_request(
                CODE_INVALID_SIGNATURE,
                err.to_string(),
            ));
        }

        let event: WebhookEvent = match serde_json::from_slice(raw_body) {
            Ok(event) => event,
            Err(err) => {
                warn!(%err, "webhook rejected: body is not a valid event");
                return Err(ApiError::invalid_request(
                    CODE_INVALID_PAYLOAD,
                    err.to_string(),
                ));
            }
        };

        let channel = channel_for(&event.order().checkout_session_id);
        let message = OrderChannelMessage {
            message_type: event.event_type.into(),
            data: event.data,
        };
        debug!(%channel, message_type = ?message.message_type, "broadcasting order event");
        self.sink.broadcast(&channel, message);

        Ok(WebhookAcceptedResponse {
            received: true,
            request_id: request_id_from(headers),
        })
    }
}

/// Subscriber channel name for a checkout session. One channel per session;
/// the sink tracks membership, not the router.
pub fn channel_for(checkout_session_id: &str) -> String {
    format!("checkout_session:{checkout_session_id}")
}

fn request_id_from(headers: &HashMap<String, String>) -> Option<String> {
    headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(REQUEST_ID_HEADER))
        .map(|(_, value)| value.clone())
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use acp_types::{ErrorType, OrderMessageType, OrderStatus};

    use super::*;

    struct AllowAll;

    impl WebhookVerifier for AllowAll {
        fn verify(
            &self,
            _raw_body: &[u8],
            _headers: &HashMap<String, String>,
        ) -> Result<(), VerifyError> {
            Ok(())
        }
    }

    struct RejectAll;

    impl WebhookVerifier for RejectAll {
        fn verify(
            &self,
            _raw_body: &[u8],
            _headers: &HashMap<String, String>,
        ) -> Result<(), VerifyError> {
            Err(VerifyError("signature mismatch".to_string()))
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        sent: Mutex<Vec<(String, OrderChannelMessage)>>,
    }

    impl BroadcastSink for RecordingSink {
        fn broadcast(&self, channel: &str, message: OrderChannelMessage) {
            self.sent.lock().push((channel.to_string(), message));
        }
    }

    fn order_create_body() -> Vec<u8> {
        serde_json::json!({
            "type": "order_create",
            "data": {
                "type": "order",
                "checkout_session_id": "checkout_session_123",
                "permalink_url": "https://merchant.example/orders/1",
                "status": "created",
                "refunds": []
            }
        })
        .to_string()
        .into_bytes()
    }

    #[test]
    fn test_invalid_signature_never_reaches_the_sink() {
        let sink = Arc::new(RecordingSink::default());
        let router = OrderRouter::new(Arc::new(RejectAll), sink.clone());

        let err = router
            .handle_webhook(&order_create_body(), &HashMap::new())
            .unwrap_err();
        assert_eq!(err.error_type, ErrorType::InvalidRequest);
        assert_eq!(err.code, CODE_INVALID_SIGNATURE);
        assert_eq!(err.message, "signature mismatch");
        assert!(sink.sent.lock().is_empty());
    }

    #[test]
    fn test_malformed_payload_yields_invalid_payload() {
        let sink = Arc::new(RecordingSink::default());
        let router = OrderRouter::new(Arc::new(AllowAll), sink.clone());

        let err = router
            .handle_webhook(b"{\"type\":\"order_create\"}", &HashMap::new())
            .unwrap_err();
        assert_eq!(err.error_type, ErrorType::InvalidRequest);
        assert_eq!(err.code, CODE_INVALID_PAYLOAD);
        assert!(sink.sent.lock().is_empty());
    }

    #[test]
    fn test_order_create_maps_to_order_created_on_session_channel() {
        let sink = Arc::new(RecordingSink::default());
        let router = OrderRouter::new(Arc::new(AllowAll), sink.clone());

        let ack = router
            .handle_webhook(&order_create_body(), &HashMap::new())
            .unwrap();
        assert!(ack.received);
        assert_eq!(ack.request_id, None);

        let sent = sink.sent.lock();
        let (channel, message) = &sent[0];
        assert_eq!(channel, "checkout_session:checkout_session_123");
        assert_eq!(message.message_type, OrderMessageType::OrderCreated);
        let acp_types::EventData::Order(order) = &message.data;
        assert_eq!(order.status, OrderStatus::Created);
    }

    #[test]
    fn test_order_update_maps_to_order_updated() {
        let sink = Arc::new(RecordingSink::default());
        let router = OrderRouter::new(Arc::new(AllowAll), sink.clone());

        let body = serde_json::json!({
            "type": "order_update",
            "data": {
                "type": "order",
                "checkout_session_id": "checkout_session_123",
                "permalink_url": "https://merchant.example/orders/1",
                "status": "shipped",
                "refunds": []
            }
        })
        .to_string();
        router.handle_webhook(body.as_bytes(), &HashMap::new()).unwrap();

        let sent = sink.sent.lock();
        assert_eq!(sent[0].1.message_type, OrderMessageType::OrderUpdated);
    }

    #[test]
    fn test_request_id_is_echoed_case_insensitively() {
        let router = OrderRouter::new(Arc::new(AllowAll), Arc::new(RecordingSink::default()));

        let headers = HashMap::from([("Request-Id".to_string(), "req-42".to_string())]);
        let ack = router.handle_webhook(&order_create_body(), &headers).unwrap();
        assert_eq!(ack.request_id.as_deref(), Some("req-42"));

        let lower = HashMap::from([("request-id".to_string(), "req-43".to_string())]);
        let ack = router.handle_webhook(&order_create_body(), &lower).unwrap();
        assert_eq!(ack.request_id.as_deref(), Some("req-43"));
    }

    #[test]
    fn test_channel_name_is_pure_function_of_session_id() {
        assert_eq!(channel_for("abc"), "checkout_session:abc");
        assert_eq!(channel_for("abc"), channel_for("abc"));
    }
}
