//! Delegated payment exchange types.
//!
//! A delegated payment hands the merchant a one-time-use authorization for a
//! card-like instrument, bounded by an [`Allowance`] scoped to one checkout
//! session and one merchant. The response is an opaque vault token; replay
//! outside the allowance scope is the merchant's problem to reject.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether `number` on the card descriptor is a raw PAN or a network token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardNumberType {
    Fpan,
    NetworkToken,
}

/// Verification checks already performed against the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardCheck {
    Avs,
    Cvv,
    Ani,
    Auth0,
}

/// Card-like payment method descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodCard {
    #[serde(rename = "type")]
    pub method_type: String,
    pub card_number_type: CardNumberType,
    pub number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp_month: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvc: Option<String>,
    /// Network token cryptogram, only meaningful with `NetworkToken`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cryptogram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eci_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks_performed: Option<Vec<CardCheck>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iin: Option<String>,
    pub display_card_funding_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_wallet_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_last4: Option<String>,
    pub metadata: HashMap<String, String>,
}

impl PaymentMethodCard {
    /// Minimal card descriptor; the optional display/verification fields
    /// start empty.
    pub fn new(
        card_number_type: CardNumberType,
        number: impl Into<String>,
        display_card_funding_type: impl Into<String>,
    ) -> Self {
        Self {
            method_type: "card".to_string(),
            card_number_type,
            number: number.into(),
            exp_month: None,
            exp_year: None,
            name: None,
            cvc: None,
            cryptogram: None,
            eci_value: None,
            checks_performed: None,
            iin: None,
            display_card_funding_type: display_card_funding_type.into(),
            display_wallet_type: None,
            display_brand: None,
            display_last4: None,
            metadata: HashMap::new(),
        }
    }
}

/// Why the allowance exists. Only one-time grants are defined today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowanceReason {
    OneTime,
}

/// Scope and ceiling of a delegated payment authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allowance {
    pub reason: AllowanceReason,
    /// Minor units (e.g. $20 → 2000)
    pub max_amount: i64,
    /// ISO-4217, lowercase (e.g. "usd")
    pub currency: String,
    pub checkout_session_id: String,
    pub merchant_id: String,
    pub expires_at: DateTime<Utc>,
}

/// Risk signal category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskSignalType {
    CardTesting,
}

/// Recommended action for a risk signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskSignalAction {
    Blocked,
    ManualReview,
    Authorized,
}

/// A single fraud/risk observation attached to the delegation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskSignal {
    #[serde(rename = "type")]
    pub signal_type: RiskSignalType,
    pub score: i64,
    pub action: RiskSignalAction,
}

/// Body for `POST /agentic_commerce/delegate_payment`.
///
/// `risk_signals` must be non-empty; the client rejects the request before
/// any network call when it is not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegatePaymentRequest {
    pub payment_method: PaymentMethodCard,
    pub allowance: Allowance,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<crate::checkout::Address>,
    pub risk_signals: Vec<RiskSignal>,
    pub metadata: HashMap<String, String>,
}

/// Vault token minted by the merchant. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegatePaymentResponse {
    /// Unique vault token identifier (vt_...)
    pub id: String,
    pub created: DateTime<Utc>,
    pub metadata: HashMap<String, String>,
}
