//! Async client for the Agentic Commerce merchant APIs.
//!
//! Covers the checkout-session lifecycle and the delegate-payment exchange,
//! over an authenticated transport that handles the OAuth2
//! client-credentials token transparently (one in-flight refresh at a time,
//! however many requests are waiting on it).
//!
//! # Quick start
//!
//! ```ignore
//! use acp_client::{CheckoutClient, ClientConfig, HttpClient, OAuthConfig, RequestOptions};
//! use acp_types::{CheckoutSessionCreateRequest, Item};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new(
//!         "https://merchant.example",
//!         OAuthConfig::new("https://auth.example/token", "client-id", "client-secret"),
//!     );
//!     let http = HttpClient::new(config)?;
//!     let checkout = CheckoutClient::new(http.clone());
//!
//!     let session = checkout
//!         .create_session(
//!             &CheckoutSessionCreateRequest {
//!                 buyer: None,
//!                 items: vec![Item { id: "prod_1".into(), quantity: 1 }],
//!                 fulfillment_address: None,
//!             },
//!             RequestOptions::new(),
//!         )
//!         .await?;
//!     println!("session {} is {:?}", session.id, session.status);
//!     Ok(())
//! }
//! ```
//!
//! Errors split into the structured protocol taxonomy
//! ([`ClientError::Api`]) and opaque transport failures; the client never
//! retries on its own — retry policy, and reusing an idempotency key for a
//! deliberate retry, belong to the caller.

pub mod auth;
pub mod checkout;
pub mod config;
pub mod error;
pub mod headers;
pub mod http;
pub mod payments;

pub use auth::{AccessToken, ClientCredentialsSource, TokenManager, TokenSource};
pub use checkout::{CHECKOUT_SESSIONS_PATH, CheckoutClient};
pub use config::{API_VERSION, ClientConfig, OAuthConfig};
pub use error::{ClientError, Result};
pub use headers::RequestOptions;
pub use http::HttpClient;
pub use payments::{DELEGATE_PAYMENT_PATH, PaymentsClient};
