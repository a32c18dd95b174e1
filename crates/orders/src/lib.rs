//! Order webhook routing for the Agentic Commerce protocol.
//!
//! The merchant pushes order lifecycle events (`order_create`,
//! `order_update`) to a webhook endpoint; this crate verifies each
//! delivery, maps it to a subscriber message (`order.created`,
//! `order.updated`), and broadcasts it on the session's channel
//! (`checkout_session:{id}`).
//!
//! The HTTP listener itself is out of scope: it feeds the raw body and
//! headers to [`OrderRouter::handle_webhook`] and serializes whichever of
//! the two well-formed JSON outcomes comes back.
//!
//! ```ignore
//! use std::sync::Arc;
//! use acp_orders::{ChannelHub, OrderRouter, channel_for};
//!
//! let hub = Arc::new(ChannelHub::new());
//! let router = OrderRouter::new(verifier, hub.clone());
//!
//! let mut events = hub.subscribe(&channel_for("checkout_session_123"));
//! // listener: router.handle_webhook(&body, &headers)
//! ```

pub mod router;
pub mod sink;

pub use router::{
    CODE_INVALID_PAYLOAD, CODE_INVALID_SIGNATURE, OrderRouter, VerifyError, WebhookVerifier,
    channel_for,
};
pub use sink::{BroadcastSink, ChannelHub};
