//! Order lifecycle webhook events and their channel-message mapping.
//!
//! Webhook deliveries for the same checkout session are not ordered; an
//! `order_update` can arrive before the `order_create` it logically follows,
//! and consumers must tolerate that.

use serde::{Deserialize, Serialize};

/// Refund recorded against an order, in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refund {
    #[serde(rename = "type")]
    pub refund_type: RefundType,
    pub amount: i64,
}

/// Where a refund is credited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefundType {
    StoreCredit,
    OriginalPayment,
}

/// Merchant-side order status carried by webhook events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Created,
    ManualReview,
    Confirmed,
    Canceled,
    Shipped,
    Fulfilled,
}

/// Order payload of a webhook event. The `type` discriminant is always
/// `"order"` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventData {
    Order(EventDataOrder),
}

/// The order snapshot inside a webhook event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDataOrder {
    pub checkout_session_id: String,
    pub permalink_url: String,
    pub status: OrderStatus,
    pub refunds: Vec<Refund>,
}

/// Inbound webhook event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookEventType {
    OrderCreate,
    OrderUpdate,
}

/// A raw webhook notification as POSTed by the merchant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: WebhookEventType,
    pub data: EventData,
}

impl WebhookEvent {
    /// The order payload, whatever the event type.
    pub fn order(&self) -> &EventDataOrder {
        match &self.data {
            EventData::Order(order) => order,
        }
    }
}

/// Acknowledgement returned to the webhook sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookAcceptedResponse {
    pub received: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Subscriber-facing message type, derived from [`WebhookEventType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderMessageType {
    #[serde(rename = "order.created")]
    OrderCreated,
    #[serde(rename = "order.updated")]
    OrderUpdated,
}

impl From<WebhookEventType> for OrderMessageType {
    fn from(event_type: WebhookEventType) -> Self {
        match event_type {
            WebhookEventType::OrderCreate => OrderMessageType::OrderCreated,
            WebhookEventType::OrderUpdate => OrderMessageType::OrderUpdated,
        }
    }
}

/// Message broadcast to the checkout session's subscriber channel. Carries
/// the event's order data unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderChannelMessage {
    #[serde(rename = "type")]
    pub message_type: OrderMessageType,
    pub data: EventData,
}
