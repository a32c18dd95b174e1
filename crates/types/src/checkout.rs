//! Checkout session resource and its request bodies.
//!
//! A checkout session is created by the merchant, mutated in place by
//! `PATCH`, and finalized into an order by the complete call. Status
//! transitions are decided server-side; clients observe them through the
//! [`CheckoutSessionStatus`] enum and never enforce transition legality.

use serde::{Deserialize, Serialize};

/// Postal address used for fulfillment and billing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub name: String,
    pub line_one: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_two: Option<String>,
    pub city: String,
    pub state: String,
    /// ISO-3166-1 alpha-2 country code
    pub country: String,
    pub postal_code: String,
}

/// The person making the purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buyer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// A product reference with a quantity, as sent in create/update requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub quantity: u32,
}

/// Payment provider advertised by the merchant for this session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentProvider {
    pub provider: String,
    pub supported_payment_methods: Vec<String>,
}

/// Payment token handed to the merchant when completing a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentData {
    pub token: String,
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<Address>,
}

/// A priced line in the session. All amounts are minor currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    pub item: Item,
    pub base_amount: i64,
    pub discount: i64,
    pub subtotal: i64,
    pub tax: i64,
    pub total: i64,
}

/// Category of a [`Total`] entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TotalType {
    ItemsBaseAmount,
    ItemsDiscount,
    Subtotal,
    Discount,
    Fulfillment,
    Tax,
    Fee,
    Total,
}

/// One entry in the session's totals breakdown, denominated in the
/// session currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Total {
    #[serde(rename = "type")]
    pub total_type: TotalType,
    pub display_text: String,
    pub amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Physical shipping option with an optional delivery window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentOptionShipping {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earliest_delivery_time: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_delivery_time: Option<chrono::DateTime<chrono::Utc>>,
    pub subtotal: i64,
    pub tax: i64,
    pub total: i64,
}

/// Digital delivery option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentOptionDigital {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub subtotal: i64,
    pub tax: i64,
    pub total: i64,
}

/// How the purchase can be delivered to the buyer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FulfillmentOption {
    Shipping(FulfillmentOptionShipping),
    Digital(FulfillmentOptionDigital),
}

impl FulfillmentOption {
    /// Identifier referenced by `CheckoutSession::fulfillment_option_id`.
    pub fn id(&self) -> &str {
        match self {
            FulfillmentOption::Shipping(opt) => &opt.id,
            FulfillmentOption::Digital(opt) => &opt.id,
        }
    }
}

/// Error codes the merchant can attach to a session message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageErrorCode {
    Missing,
    Invalid,
    OutOfStock,
    PaymentDeclined,
    RequiresSignIn,
    Requires3ds,
}

/// Informational message displayed alongside the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    pub content_type: String,
    pub content: String,
}

/// Error message attached to the session by the merchant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageError {
    pub code: MessageErrorCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    pub content_type: String,
    pub content: String,
}

/// Session message, either informational or an error. `content` is plain
/// text or markdown depending on `content_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    Info(MessageInfo),
    Error(MessageError),
}

/// Kind of policy document linked from the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkType {
    TermsOfUse,
    PrivacyPolicy,
    SellerShopPolicies,
}

/// Policy link shown to the buyer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    #[serde(rename = "type")]
    pub link_type: LinkType,
    pub url: String,
}

/// Order created by a successful session completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub checkout_session_id: String,
    pub permalink_url: String,
}

/// Lifecycle state of a checkout session. `canceled` is a terminal status,
/// not a resource deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutSessionStatus {
    NotReadyForPayment,
    ReadyForPayment,
    Completed,
    Canceled,
    InProgress,
}

/// The checkout session resource as returned by the merchant.
///
/// Invariant (server-enforced, observed here): `fulfillment_option_id`, if
/// set, references an id present in `fulfillment_options`, and `totals`
/// amounts are denominated in `currency`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub status: CheckoutSessionStatus,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer: Option<Buyer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_provider: Option<PaymentProvider>,
    pub line_items: Vec<LineItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fulfillment_address: Option<Address>,
    pub fulfillment_options: Vec<FulfillmentOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fulfillment_option_id: Option<String>,
    pub totals: Vec<Total>,
    pub messages: Vec<Message>,
    pub links: Vec<Link>,
}

/// Session plus the order minted by a successful completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSessionWithOrder {
    #[serde(flatten)]
    pub session: CheckoutSession,
    pub order: Order,
}

/// Body for `POST /agentic_checkout/sessions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSessionCreateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer: Option<Buyer>,
    pub items: Vec<Item>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fulfillment_address: Option<Address>,
}

/// Body for `PATCH /agentic_checkout/sessions/{id}`.
///
/// Every field is optional and omitted fields are not serialized, so a
/// partial update never overwrites server state with explicit nulls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSessionUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer: Option<Buyer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Item>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fulfillment_address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fulfillment_option_id: Option<String>,
}

/// Body for `POST /agentic_checkout/sessions/{id}/complete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSessionCompleteRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer: Option<Buyer>,
    pub payment_data: PaymentData,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_json() -> serde_json::Value {
        serde_json::json!({
            "id": "checkout_session_123",
            "status": "ready_for_payment",
            "currency": "usd",
            "buyer": {
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "ada@example.com"
            },
            "payment_provider": {
                "provider": "stripe",
                "supported_payment_methods": ["card"]
            },
            "line_items": [{
                "id": "li_1",
                "item": { "id": "prod_1", "quantity": 2 },
                "base_amount": 2000,
                "discount": 200,
                "subtotal": 1800,
                "tax": 180,
                "total": 1980
            }],
            "fulfillment_options": [
                {
                    "type": "shipping",
                    "id": "ship_standard",
                    "title": "Standard",
                    "carrier": "usps",
                    "subtotal": 500,
                    "tax": 0,
                    "total": 500
                },
                {
                    "type": "digital",
                    "id": "digital_1",
                    "title": "Download",
                    "subtotal": 0,
                    "tax": 0,
                    "total": 0
                }
            ],
            "fulfillment_option_id": "ship_standard",
            "totals": [
                { "type": "subtotal", "display_text": "Subtotal", "amount": 1800 },
                { "type": "total", "display_text": "Total", "amount": 2480 }
            ],
            "messages": [
                { "type": "info", "content_type": "plain", "content": "Ships in 2 days" },
                {
                    "type": "error",
                    "code": "out_of_stock",
                    "param": "$.line_items[0]",
                    "content_type": "plain",
                    "content": "Item is back-ordered"
                }
            ],
            "links": [
                { "type": "terms_of_use", "url": "https://merchant.example/terms" }
            ]
        })
    }

    #[test]
    fn test_session_round_trip_is_field_for_field() {
        let json = session_json();
        let session: CheckoutSession = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(session.status, CheckoutSessionStatus::ReadyForPayment);
        assert_eq!(session.line_items[0].total, 1980);
        assert_eq!(session.fulfillment_options[0].id(), "ship_standard");
        assert_eq!(session.fulfillment_option_id.as_deref(), Some("ship_standard"));

        let reserialized = serde_json::to_value(&session).unwrap();
        assert_eq!(reserialized, json);

        let reparsed: CheckoutSession = serde_json::from_value(reserialized).unwrap();
        assert_eq!(reparsed, session);
    }

    #[test]
    fn test_session_with_order_flattens_order_alongside_session() {
        let mut json = session_json();
        json["status"] = serde_json::json!("completed");
        json["order"] = serde_json::json!({
            "id": "order_1",
            "checkout_session_id": "checkout_session_123",
            "permalink_url": "https://merchant.example/orders/order_1"
        });

        let with_order: CheckoutSessionWithOrder = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(with_order.session.status, CheckoutSessionStatus::Completed);
        assert_eq!(with_order.order.id, "order_1");
        assert_eq!(serde_json::to_value(&with_order).unwrap(), json);
    }

    #[test]
    fn test_status_parses_every_defined_value() {
        for (raw, expected) in [
            ("not_ready_for_payment", CheckoutSessionStatus::NotReadyForPayment),
            ("ready_for_payment", CheckoutSessionStatus::ReadyForPayment),
            ("completed", CheckoutSessionStatus::Completed),
            ("canceled", CheckoutSessionStatus::Canceled),
            ("in_progress", CheckoutSessionStatus::InProgress),
        ] {
            let status: CheckoutSessionStatus =
                serde_json::from_value(serde_json::json!(raw)).unwrap();
            assert_eq!(status, expected);
        }
        assert!(
            serde_json::from_value::<CheckoutSessionStatus>(serde_json::json!("refunded")).is_err()
        );
    }

    #[test]
    fn test_update_request_omits_unset_fields() {
        let request = CheckoutSessionUpdateRequest {
            fulfillment_option_id: Some("ship_express".to_string()),
            ..Default::default()
        };
        let serialized = serde_json::to_value(&request).unwrap();
        assert_eq!(
            serialized,
            serde_json::json!({ "fulfillment_option_id": "ship_express" })
        );

        let empty = CheckoutSessionUpdateRequest::default();
        assert_eq!(serde_json::to_value(&empty).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn test_create_request_serializes_items() {
        let request = CheckoutSessionCreateRequest {
            buyer: None,
            items: vec![Item { id: "prod_1".to_string(), quantity: 1 }],
            fulfillment_address: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({ "items": [{ "id": "prod_1", "quantity": 1 }] })
        );
    }
}
