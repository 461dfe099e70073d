//! Error types for the `btnl-rs` crate.
//!
//! Errors are split by surface rather than pooled into one enum:
//!
//! - [`ParseError`] — pure BTP codec failures; never retried
//! - [`SessionError`] — terminal order-entry session failures; the caller
//!   reconnects if desired
//! - [`AuthError`] — credential problems raised before any network contact
//! - [`RestError`] — per-call REST failures, surfaced without retry
//! - [`FeedError`] — WebSocket market-data feed failures

use crate::btp::BodyEncoding;
use crate::btp::login::LoginRejectReason;

// ---------------------------------------------------------------------------
// ParseError
// ---------------------------------------------------------------------------

/// A failure while decoding BTP bytes.
///
/// These are pure codec faults: the bytes on hand cannot be a well-formed
/// message. The session layer treats any of them as fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The buffer ended before the fixed layout was satisfied.
    #[error("short buffer: needed {needed} bytes, only {available} available")]
    ShortBuffer {
        /// Bytes the layout still required.
        needed: usize,
        /// Bytes actually remaining.
        available: usize,
    },

    /// An enum-coded field carried a value outside its listed set.
    #[error("unknown {field} code: 0x{value:02x}")]
    UnknownEnum {
        /// Which wire field carried the value.
        field: &'static str,
        /// The offending byte.
        value: u8,
    },

    /// The sub-type byte disagrees with the expected message variant.
    #[error("wrong message type byte: expected 0x{expected:02x}, found 0x{found:02x}")]
    WrongTag {
        /// The sub-type byte the decoder was dispatched for.
        expected: u8,
        /// The sub-type byte actually present.
        found: u8,
    },

    /// The 12-byte frame header is not a valid BTP v2 header.
    #[error("bad frame: {0}")]
    BadFrame(&'static str),
}

// ---------------------------------------------------------------------------
// SessionError
// ---------------------------------------------------------------------------

/// A terminal failure of an order-entry session.
///
/// Every variant closes the session; no frame is retried. Reconnecting is
/// the caller's decision.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The exchange rejected the login request.
    #[error("login rejected: {0:?}")]
    LoginRejected(LoginRejectReason),

    /// A non-login frame arrived while awaiting the login response.
    #[error("unexpected {0:?} frame during login")]
    UnexpectedDuringLogin(BodyEncoding),

    /// An inbound frame failed to parse.
    #[error("protocol fault: {0}")]
    Protocol(#[from] ParseError),

    /// The underlying TCP transport failed.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// No frame arrived within twice the heartbeat interval.
    #[error("peer silent for more than twice the heartbeat interval")]
    PeerTimeout,

    /// `send` was called while the session was not open.
    #[error("session is not open")]
    NotOpen,
}

// ---------------------------------------------------------------------------
// AuthError
// ---------------------------------------------------------------------------

/// A credential problem detected before any network contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The auth token text was not valid hexadecimal.
    #[error("auth token is not valid hex")]
    BadTokenEncoding,

    /// The auth token did not decode to exactly 32 bytes (64 hex
    /// characters).
    #[error("auth token must be 32 bytes (64 hex characters), got {actual} bytes")]
    BadTokenLength {
        /// Decoded length of the supplied token, in bytes.
        actual: usize,
    },

    /// The HMAC implementation refused the key.
    #[error("failed to initialize HMAC signer")]
    SigningFailed,
}

// ---------------------------------------------------------------------------
// RestError
// ---------------------------------------------------------------------------

/// A failure of one REST call.
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// The server answered with a non-success status code.
    #[error("HTTP {status}: {body}")]
    Http {
        /// The HTTP status code.
        status: reqwest::StatusCode,
        /// The response body text.
        body: String,
    },

    /// The response body did not match the expected JSON shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A network or TLS-level failure from `reqwest`.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Signing the request failed before it was sent.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

// ---------------------------------------------------------------------------
// FeedError
// ---------------------------------------------------------------------------

/// A failure of the WebSocket market-data feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// A WebSocket-level error.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// An inbound feed message did not match any known event shape.
    #[error("failed to decode feed message: {0}")]
    Decode(#[from] serde_json::Error),

    /// An error building or parsing the feed URL.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}
