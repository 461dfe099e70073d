//! WebSocket module for the public market-data feed.
//!
//! - [`feed`] — subscribe/dispatch stream of JSON market-data events.

pub mod feed;
