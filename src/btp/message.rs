//! Frame header, the body union, and framed message I/O.
//!
//! A wire unit is `header ‖ body`: the 12-byte [`Header`] declares the body
//! encoding and byte length, and [`Body`] is the tagged union of every body
//! class. [`Message`] pairs them and knows how to encode itself, decode from
//! a buffer, and read itself off an async byte stream.

use bytes::{BufMut, Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::constants::{BTP_HEADER_LEN, BTP_PROTOCOL_ID, BTP_VERSION};
use crate::error::{ParseError, SessionError};

use super::BodyEncoding;
use super::login::Login;
use super::market_state::MarketStateUpdate;
use super::order_entry::OrderEntry;
use super::pricefeed::Pricefeed;
use super::wire::WireReader;

// ---------------------------------------------------------------------------
// Disconnect
// ---------------------------------------------------------------------------

/// Reason byte of a [`Disconnect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisconnectReason {
    /// An outbound sequence id did not match the one the server expected.
    SequenceIdFault = 0x01,
    /// The client missed its heartbeat obligation.
    HeartbeatFault = 0x02,
    /// No successful login on this connection.
    FailedToLogin = 0x03,
    /// The client exceeded its messaging rate.
    MessagingRateExceeded = 0x04,
    /// The server could not parse a client frame.
    ParseFailure = 0x05,
}

impl DisconnectReason {
    fn from_code(code: u8) -> Option<Self> {
        match code {
            0x01 => Some(Self::SequenceIdFault),
            0x02 => Some(Self::HeartbeatFault),
            0x03 => Some(Self::FailedToLogin),
            0x04 => Some(Self::MessagingRateExceeded),
            0x05 => Some(Self::ParseFailure),
            _ => None,
        }
    }
}

/// `DN` — the server is closing the session.
///
/// The sequence fields only apply to [`DisconnectReason::SequenceIdFault`];
/// `0` on the wire means "not applicable" and maps to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Disconnect {
    /// Why the server is disconnecting.
    pub reason: DisconnectReason,
    /// The sequence id the server expected, if applicable.
    pub expected_sequence_id: Option<u32>,
    /// The sequence id it actually saw, if applicable.
    pub actual_sequence_id: Option<u32>,
}

impl Disconnect {
    const LEN: usize = 9;

    pub(crate) fn encoded_len(&self) -> usize {
        Self::LEN
    }

    pub(crate) fn encode_into(&self, buf: &mut BytesMut) {
        buf.put_u8(self.reason as u8);
        buf.put_u32_le(self.expected_sequence_id.unwrap_or(0));
        buf.put_u32_le(self.actual_sequence_id.unwrap_or(0));
    }

    /// Encode this body to its wire bytes (without the frame header).
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(Self::LEN);
        self.encode_into(&mut buf);
        buf.freeze()
    }

    /// Decode a `DN` body. The reason is a numeric byte.
    pub fn decode(data: &[u8]) -> Result<Self, ParseError> {
        let mut r = WireReader::new(data);
        let code = r.u8()?;
        let reason = DisconnectReason::from_code(code).ok_or(ParseError::UnknownEnum {
            field: "disconnect reason",
            value: code,
        })?;
        let expected = r.u32_le()?;
        let actual = r.u32_le()?;
        r.finish()?;
        Ok(Self {
            reason,
            expected_sequence_id: (expected != 0).then_some(expected),
            actual_sequence_id: (actual != 0).then_some(actual),
        })
    }
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// The fixed 12-byte frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Per-session sequence id; `0` for heartbeats.
    pub sequence_id: u32,
    /// Which body class follows.
    pub body_encoding: BodyEncoding,
    /// Exact byte length of the serialized body.
    pub body_length: u16,
}

impl Header {
    pub(crate) fn encode_into(&self, buf: &mut BytesMut) {
        buf.put_slice(&BTP_PROTOCOL_ID);
        buf.put_u16_le(BTP_VERSION);
        buf.put_u32_le(self.sequence_id);
        buf.put_slice(&self.body_encoding.tag());
        buf.put_u16_le(self.body_length);
    }

    /// Encode the header to its 12 wire bytes.
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(BTP_HEADER_LEN);
        self.encode_into(&mut buf);
        buf.freeze()
    }

    /// Decode a 12-byte header, validating magic, version, and encoding tag.
    pub fn decode(data: &[u8]) -> Result<Self, ParseError> {
        let mut r = WireReader::new(data);
        if r.array::<2>()? != BTP_PROTOCOL_ID {
            return Err(ParseError::BadFrame("protocol id is not \"BT\""));
        }
        if r.u16_le()? != BTP_VERSION {
            return Err(ParseError::BadFrame("unsupported protocol version"));
        }
        let sequence_id = r.u32_le()?;
        let body_encoding = BodyEncoding::from_tag(r.array::<2>()?)
            .ok_or(ParseError::BadFrame("unknown body encoding tag"))?;
        let body_length = r.u16_le()?;
        Ok(Self {
            sequence_id,
            body_encoding,
            body_length,
        })
    }
}

// ---------------------------------------------------------------------------
// Body
// ---------------------------------------------------------------------------

/// The tagged union of every BTP body class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Login handshake traffic.
    Login(Login),
    /// Order entry traffic.
    OrderEntry(OrderEntry),
    /// A market state transition.
    MarketState(MarketStateUpdate),
    /// Liveness heartbeat; the body is empty.
    Heartbeat,
    /// Server-initiated disconnect.
    Disconnect(Disconnect),
    /// Pricefeed market data.
    Pricefeed(Pricefeed),
}

impl Body {
    /// The encoding tag this body travels under.
    pub fn body_encoding(&self) -> BodyEncoding {
        match self {
            Self::Login(_) => BodyEncoding::Login,
            Self::OrderEntry(_) => BodyEncoding::OrderEntry,
            Self::MarketState(_) => BodyEncoding::MarketState,
            Self::Heartbeat => BodyEncoding::Heartbeat,
            Self::Disconnect(_) => BodyEncoding::Disconnect,
            Self::Pricefeed(_) => BodyEncoding::Pricefeed,
        }
    }

    /// Byte length of the encoded body.
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::Login(b) => b.encoded_len(),
            Self::OrderEntry(b) => b.encoded_len(),
            Self::MarketState(b) => b.encoded_len(),
            Self::Heartbeat => 0,
            Self::Disconnect(b) => b.encoded_len(),
            Self::Pricefeed(b) => b.encoded_len(),
        }
    }

    pub(crate) fn encode_into(&self, buf: &mut BytesMut) {
        match self {
            Self::Login(b) => b.encode_into(buf),
            Self::OrderEntry(b) => b.encode_into(buf),
            Self::MarketState(b) => b.encode_into(buf),
            Self::Heartbeat => {}
            Self::Disconnect(b) => b.encode_into(buf),
            Self::Pricefeed(b) => b.encode_into(buf),
        }
    }

    /// Encode this body to its wire bytes (without the frame header).
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.encode_into(&mut buf);
        buf.freeze()
    }

    /// Decode a body of the declared encoding.
    pub fn decode(encoding: BodyEncoding, data: &[u8]) -> Result<Self, ParseError> {
        match encoding {
            BodyEncoding::Login => Ok(Self::Login(Login::decode(data)?)),
            BodyEncoding::OrderEntry => Ok(Self::OrderEntry(OrderEntry::decode(data)?)),
            BodyEncoding::MarketState => Ok(Self::MarketState(MarketStateUpdate::decode(data)?)),
            BodyEncoding::Heartbeat => Ok(Self::Heartbeat),
            BodyEncoding::Disconnect => Ok(Self::Disconnect(Disconnect::decode(data)?)),
            BodyEncoding::Pricefeed => Ok(Self::Pricefeed(Pricefeed::decode(data)?)),
        }
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// One framed unit: header plus body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// The frame header.
    pub header: Header,
    /// The typed body.
    pub body: Body,
}

impl Message {
    /// Frame a body at the given sequence id.
    ///
    /// Heartbeats always serialize at sequence 0 regardless of the argument;
    /// `body_length` is computed from the body.
    ///
    /// # Panics
    ///
    /// If the body exceeds the 65 535-byte frame limit. No fixed-layout body
    /// can; only a pathological [`Pricefeed::Book`] could.
    pub fn new(sequence_id: u32, body: Body) -> Self {
        let body_encoding = body.body_encoding();
        let sequence_id = if body_encoding == BodyEncoding::Heartbeat {
            0
        } else {
            sequence_id
        };
        let body_length =
            u16::try_from(body.encoded_len()).expect("body exceeds the BTP frame limit");
        let header = Header {
            sequence_id,
            body_encoding,
            body_length,
        };
        Self { header, body }
    }

    /// Encode `header ‖ body` into one contiguous buffer.
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(BTP_HEADER_LEN + self.body.encoded_len());
        self.header.encode_into(&mut buf);
        self.body.encode_into(&mut buf);
        buf.freeze()
    }

    /// Decode one frame from a buffer that starts at a frame boundary.
    pub fn decode(data: &[u8]) -> Result<Self, ParseError> {
        if data.len() < BTP_HEADER_LEN {
            return Err(ParseError::ShortBuffer {
                needed: BTP_HEADER_LEN,
                available: data.len(),
            });
        }
        let header = Header::decode(&data[..BTP_HEADER_LEN])?;
        if header.body_encoding == BodyEncoding::Heartbeat {
            return Ok(Self {
                header,
                body: Body::Heartbeat,
            });
        }
        let body_len = usize::from(header.body_length);
        let rest = &data[BTP_HEADER_LEN..];
        if rest.len() < body_len {
            return Err(ParseError::ShortBuffer {
                needed: body_len,
                available: rest.len(),
            });
        }
        let body = Body::decode(header.body_encoding, &rest[..body_len])?;
        Ok(Self { header, body })
    }

    /// Read exactly one frame off an async byte stream.
    ///
    /// Reads the 12-byte header, then — except for heartbeats — exactly
    /// `body_length` more bytes, and decodes the declared body class.
    pub async fn read_from<R>(reader: &mut R) -> Result<Self, SessionError>
    where
        R: AsyncRead + Unpin,
    {
        let mut header_buf = [0u8; BTP_HEADER_LEN];
        reader.read_exact(&mut header_buf).await?;
        let header = Header::decode(&header_buf).map_err(SessionError::Protocol)?;

        if header.body_encoding == BodyEncoding::Heartbeat {
            return Ok(Self {
                header,
                body: Body::Heartbeat,
            });
        }

        let mut body_buf = vec![0u8; usize::from(header.body_length)];
        reader.read_exact(&mut body_buf).await?;
        let body =
            Body::decode(header.body_encoding, &body_buf).map_err(SessionError::Protocol)?;
        Ok(Self { header, body })
    }
}
