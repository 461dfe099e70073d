//! Constants for the Bitnomial exchange APIs.
//!
//! Contains base URLs, the WebSocket endpoint, and BTP protocol literals.
//! These are used internally by [`BitnomialClient`](crate::client::BitnomialClient)
//! and the session/feed types, but are also exported for advanced usage.

// ---------------------------------------------------------------------------
// Base URLs
// ---------------------------------------------------------------------------

/// Base URL for the Bitnomial REST API.
pub const API_BASE_URL: &str = "https://bitnomial.com/exchange/api/v1";

/// WebSocket endpoint for the public market-data feed (JSON).
pub const WS_FEED_URL: &str = "wss://bitnomial.com/exchange/ws";

// ---------------------------------------------------------------------------
// BTP protocol literals
// ---------------------------------------------------------------------------

/// Two-byte magic at the start of every BTP frame header.
pub const BTP_PROTOCOL_ID: [u8; 2] = *b"BT";

/// BTP protocol version carried in every frame header.
pub const BTP_VERSION: u16 = 2;

/// Size of the fixed frame header in bytes.
pub const BTP_HEADER_LEN: usize = 12;

/// Default heartbeat interval agreed at login, in seconds.
pub const DEFAULT_HEARTBEAT_INTERVAL_SECS: u8 = 30;

// ---------------------------------------------------------------------------
// Signed-request header names
// ---------------------------------------------------------------------------

/// Header carrying the decimal connection id on signed REST requests.
pub const CONNECTION_ID_HEADER: &str = "BTNL-CONNECTION-ID";

/// Header carrying the signing timestamp on signed REST requests.
pub const TIMESTAMP_HEADER: &str = "BTNL-AUTH-TIMESTAMP";

/// Header carrying the base64 HMAC-SHA256 signature on signed REST requests.
pub const SIGNATURE_HEADER: &str = "BTNL-SIGNATURE";
