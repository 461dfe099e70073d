//! Request and response types for the Bitnomial REST API.
//!
//! - [`enums`] — shared enumerations (environment, product types, orderings)
//! - [`products`] — product spec/data responses and their query filters
//! - [`orders`] — order, fill, and block-trade history types and queries
//!
//! All enums are re-exported at the module root via `pub use enums::*`.

pub mod enums;
pub mod orders;
pub mod products;

pub use enums::*;
