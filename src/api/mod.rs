//! API endpoint implementations.
//!
//! Each sub-module adds high-level methods to
//! [`crate::client::BitnomialClient`] or
//! [`crate::client::AuthBitnomialClient`].

pub mod orders;
pub mod products;
