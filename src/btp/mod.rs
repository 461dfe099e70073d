//! BTP — the framed binary order-entry and market-data protocol.
//!
//! Every unit on the wire is a 12-byte header followed by a typed body. The
//! header carries the `"BT"` magic, protocol version 2, a per-session
//! sequence id, a two-byte ASCII body-encoding tag, and the body length.
//! All multi-byte integers are little-endian.
//!
//! Module map:
//!
//! - [`message`] — [`Header`], the [`Body`] union, [`Message`] framing,
//!   heartbeat and disconnect bodies
//! - [`login`] — login handshake bodies and the [`login::AuthToken`] secret
//! - [`order_entry`] — order entry bodies (open, modify, ack, reject, close,
//!   fill)
//! - [`market_state`] — market state updates
//! - [`pricefeed`] — pricefeed bodies (trade, level, book, block)
//! - [`session`] — the [`OrderEntrySession`] engine driving a live
//!   connection
//!
//! The codec is pure: encoding produces bytes, decoding consumes a slice,
//! and neither touches the network. Framed I/O lives on
//! [`Message::read_from`] and the session engine.

pub mod login;
pub mod market_state;
pub mod message;
pub mod order_entry;
pub mod pricefeed;
pub mod session;
pub(crate) mod wire;

use crate::error::ParseError;

pub use message::{Body, Disconnect, DisconnectReason, Header, Message};
pub use session::{
    OrderEntrySession, SessionConfig, SessionEvent, SessionHandle, SessionState,
};

// ---------------------------------------------------------------------------
// Side
// ---------------------------------------------------------------------------

/// Side of the book: bid (buy) or ask (sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Buy side, wire code `'B'`.
    Bid,
    /// Sell side, wire code `'A'`.
    Ask,
}

impl Side {
    pub(crate) fn code(self) -> u8 {
        match self {
            Self::Bid => b'B',
            Self::Ask => b'A',
        }
    }

    pub(crate) fn from_code(code: u8) -> Option<Self> {
        match code {
            b'B' => Some(Self::Bid),
            b'A' => Some(Self::Ask),
            _ => None,
        }
    }

    pub(crate) fn decode(code: u8) -> Result<Self, ParseError> {
        Self::from_code(code).ok_or(ParseError::UnknownEnum {
            field: "side",
            value: code,
        })
    }
}

// ---------------------------------------------------------------------------
// Body encoding
// ---------------------------------------------------------------------------

/// The two-byte ASCII body-encoding tag carried in every frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyEncoding {
    /// `OE` — order entry traffic.
    OrderEntry,
    /// `LG` — login handshake traffic.
    Login,
    /// `MS` — market state updates.
    MarketState,
    /// `HB` — heartbeats (empty body, sequence id 0).
    Heartbeat,
    /// `DN` — server-initiated disconnect.
    Disconnect,
    /// `PF` — pricefeed market data.
    Pricefeed,
}

impl BodyEncoding {
    /// The ASCII tag as it appears on the wire.
    pub fn tag(self) -> [u8; 2] {
        match self {
            Self::OrderEntry => *b"OE",
            Self::Login => *b"LG",
            Self::MarketState => *b"MS",
            Self::Heartbeat => *b"HB",
            Self::Disconnect => *b"DN",
            Self::Pricefeed => *b"PF",
        }
    }

    /// Parse a wire tag. Unknown tags are a frame fault, left to the caller.
    pub fn from_tag(tag: [u8; 2]) -> Option<Self> {
        match &tag {
            b"OE" => Some(Self::OrderEntry),
            b"LG" => Some(Self::Login),
            b"MS" => Some(Self::MarketState),
            b"HB" => Some(Self::Heartbeat),
            b"DN" => Some(Self::Disconnect),
            b"PF" => Some(Self::Pricefeed),
            _ => None,
        }
    }
}
