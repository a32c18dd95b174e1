//! Wire schemas for the Agentic Commerce APIs.
//!
//! This crate holds the request/response types shared by the checkout,
//! delegated-payment, and order-webhook flows, plus the structured error
//! taxonomy every merchant endpoint speaks. All amounts are integer minor
//! currency units (e.g. $20.00 → 2000) and all timestamps are RFC 3339 UTC.
//!
//! The merchant server is authoritative for these resources; the types here
//! only need to round-trip the wire format faithfully.

pub mod checkout;
pub mod error;
pub mod order;
pub mod payment;

pub use checkout::{
    Address, Buyer, CheckoutSession, CheckoutSessionCompleteRequest,
    CheckoutSessionCreateRequest, CheckoutSessionStatus, CheckoutSessionUpdateRequest,
    CheckoutSessionWithOrder, FulfillmentOption, FulfillmentOptionDigital,
    FulfillmentOptionShipping, Item, LineItem, Link, LinkType, Message, MessageError,
    MessageErrorCode, MessageInfo, Order, PaymentData, PaymentProvider, Total, TotalType,
};
pub use error::{ApiError, ErrorType};
pub use order::{
    EventData, EventDataOrder, OrderChannelMessage, OrderMessageType, OrderStatus, Refund,
    RefundType, WebhookAcceptedResponse, WebhookEvent, WebhookEventType,
};
pub use payment::{
    Allowance, AllowanceReason, CardCheck, CardNumberType, DelegatePaymentRequest,
    DelegatePaymentResponse, PaymentMethodCard, RiskSignal, RiskSignalAction, RiskSignalType,
};
