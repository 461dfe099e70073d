//! # btnl-rs
//!
//! A Rust client library for the Bitnomial exchange.
//!
//! Three surfaces:
//!
//! - [`btp`] — the framed binary order-entry / pricefeed protocol over TCP,
//!   including the [`btp::OrderEntrySession`] engine
//! - [`client`] — the REST API ([`client::BitnomialClient`] for public
//!   product endpoints, [`client::AuthBitnomialClient`] for HMAC-signed
//!   history endpoints)
//! - [`ws`] — the public market-data WebSocket feed
//!
//! ## Quick start
//!
//! ```no_run
//! use btnl_rs::client::BitnomialClient;
//! use btnl_rs::types::enums::Env;
//! use btnl_rs::types::products::ProductQuery;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), btnl_rs::error::RestError> {
//!     let client = BitnomialClient::new(Env::Prod);
//!     let data = client.get_product_data(&ProductQuery::default()).await?;
//!     println!("{data:#?}");
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod btp;
pub mod client;
pub mod constants;
pub mod error;
pub mod types;
pub mod ws;

/// Re-export the main client types at crate root for convenience.
pub use client::{AuthBitnomialClient, BitnomialClient};
/// Re-export the session engine at crate root for convenience.
pub use btp::OrderEntrySession;
