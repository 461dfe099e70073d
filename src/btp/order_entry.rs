//! Order entry bodies (`OE` encoding).
//!
//! The first byte of every `OE` body is a message-type tag: `'O'` open,
//! `'M'` modify, `'A'` ack, `'R'` reject, `'C'` close, `'F'` fill. Open and
//! modify flow client → exchange; the rest flow back.
//!
//! `modify_id` uses `0` on the wire to mean "not applicable"; the decoder
//! translates that to `None` and the encoder back to `0`.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::ParseError;

use super::Side;
use super::wire::WireReader;

// ---------------------------------------------------------------------------
// Field enums
// ---------------------------------------------------------------------------

/// Time-in-force of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeInForce {
    /// Rest until the market closes, wire code `'D'`.
    Day,
    /// Immediate-or-cancel, wire code `'I'`.
    Ioc,
}

impl TimeInForce {
    fn code(self) -> u8 {
        match self {
            Self::Day => b'D',
            Self::Ioc => b'I',
        }
    }

    fn from_code(code: u8) -> Option<Self> {
        match code {
            b'D' => Some(Self::Day),
            b'I' => Some(Self::Ioc),
            _ => None,
        }
    }
}

/// Why the exchange closed a resting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CloseReason {
    /// An IOC order finished trading, wire code `'I'`.
    IocFinished,
    /// Cancelled outside this connection, wire code `'G'`.
    NonConnectionCancel,
    /// Cancelled by self-match prevention, wire code `'S'`.
    SelfMatchPreventionCanceled,
}

impl CloseReason {
    fn code(self) -> u8 {
        match self {
            Self::IocFinished => b'I',
            Self::NonConnectionCancel => b'G',
            Self::SelfMatchPreventionCanceled => b'S',
        }
    }

    fn from_code(code: u8) -> Option<Self> {
        match code {
            b'I' => Some(Self::IocFinished),
            b'G' => Some(Self::NonConnectionCancel),
            b'S' => Some(Self::SelfMatchPreventionCanceled),
            _ => None,
        }
    }
}

/// Whether a fill added liquidity, removed it, or matched a spread leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Liquidity {
    /// Added to the book, wire code `'A'`.
    Add,
    /// Removed from the book, wire code `'R'`.
    Remove,
    /// Spread-leg match, wire code `'S'`.
    SpreadLegMatch,
}

impl Liquidity {
    fn code(self) -> u8 {
        match self {
            Self::Add => b'A',
            Self::Remove => b'R',
            Self::SpreadLegMatch => b'S',
        }
    }

    fn from_code(code: u8) -> Option<Self> {
        match code {
            b'A' => Some(Self::Add),
            b'R' => Some(Self::Remove),
            b'S' => Some(Self::SpreadLegMatch),
            _ => None,
        }
    }
}

/// Reason byte of a [`Reject`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    AccountNotFound = 0x01,
    ProductNotFound = 0x02,
    OrderNotFound = 0x03,
    OrderAlreadyExists = 0x04,
    OrderAlreadyClosed = 0x05,
    OrderNotChangedByModify = 0x06,
    QuantityGreaterThanMaxOrderSize = 0x07,
    QuantityLessThanMinOrderSize = 0x08,
    PriceOutsidePriceBands = 0x09,
    PriceOutsidePriceLimits = 0x0A,
    PriceNotTickAligned = 0x0B,
    MarketHalted = 0x0C,
    MarketClosed = 0x0D,
    GiveUpAccountNotFound = 0x0E,
    GiveUpUnauthorized = 0x0F,
    MessagingRateExceeded = 0x10,
    PositionLimitExceeded = 0x11,
    ConnectionDisabled = 0x12,
}

impl RejectReason {
    fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0x01 => Self::AccountNotFound,
            0x02 => Self::ProductNotFound,
            0x03 => Self::OrderNotFound,
            0x04 => Self::OrderAlreadyExists,
            0x05 => Self::OrderAlreadyClosed,
            0x06 => Self::OrderNotChangedByModify,
            0x07 => Self::QuantityGreaterThanMaxOrderSize,
            0x08 => Self::QuantityLessThanMinOrderSize,
            0x09 => Self::PriceOutsidePriceBands,
            0x0A => Self::PriceOutsidePriceLimits,
            0x0B => Self::PriceNotTickAligned,
            0x0C => Self::MarketHalted,
            0x0D => Self::MarketClosed,
            0x0E => Self::GiveUpAccountNotFound,
            0x0F => Self::GiveUpUnauthorized,
            0x10 => Self::MessagingRateExceeded,
            0x11 => Self::PositionLimitExceeded,
            0x12 => Self::ConnectionDisabled,
            _ => return None,
        })
    }
}

// ---------------------------------------------------------------------------
// Bodies
// ---------------------------------------------------------------------------

/// `'O'` — open a new order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Open {
    /// Client-chosen order id, unique per connection.
    pub order_id: u64,
    /// Product to trade.
    pub product_id: u64,
    /// Bid or ask.
    pub side: Side,
    /// Limit price in product ticks.
    pub price: i64,
    /// Order quantity in contracts.
    pub quantity: u32,
    /// Day or immediate-or-cancel.
    pub time_in_force: TimeInForce,
}

impl Open {
    pub(crate) const MSG_TYPE: u8 = b'O';
    const LEN: usize = 31;

    fn encode_into(&self, buf: &mut BytesMut) {
        buf.put_u8(Self::MSG_TYPE);
        buf.put_u64_le(self.order_id);
        buf.put_u64_le(self.product_id);
        buf.put_u8(self.side.code());
        buf.put_i64_le(self.price);
        buf.put_u32_le(self.quantity);
        buf.put_u8(self.time_in_force.code());
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(Self::LEN);
        self.encode_into(&mut buf);
        buf.freeze()
    }

    pub fn decode(data: &[u8]) -> Result<Self, ParseError> {
        let mut r = WireReader::new(data);
        r.tag(Self::MSG_TYPE)?;
        let order_id = r.u64_le()?;
        let product_id = r.u64_le()?;
        let side = Side::decode(r.u8()?)?;
        let price = r.i64_le()?;
        let quantity = r.u32_le()?;
        let tif_code = r.u8()?;
        let time_in_force =
            TimeInForce::from_code(tif_code).ok_or(ParseError::UnknownEnum {
                field: "time_in_force",
                value: tif_code,
            })?;
        r.finish()?;
        Ok(Self {
            order_id,
            product_id,
            side,
            price,
            quantity,
            time_in_force,
        })
    }
}

/// `'M'` — modify a resting order's price and/or quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modify {
    /// The order being modified.
    pub order_id: u64,
    /// Client-chosen id for this modification.
    pub modify_id: u64,
    /// New limit price.
    pub price: i64,
    /// New quantity.
    pub quantity: u32,
}

impl Modify {
    pub(crate) const MSG_TYPE: u8 = b'M';
    const LEN: usize = 29;

    fn encode_into(&self, buf: &mut BytesMut) {
        buf.put_u8(Self::MSG_TYPE);
        buf.put_u64_le(self.order_id);
        buf.put_u64_le(self.modify_id);
        buf.put_i64_le(self.price);
        buf.put_u32_le(self.quantity);
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(Self::LEN);
        self.encode_into(&mut buf);
        buf.freeze()
    }

    pub fn decode(data: &[u8]) -> Result<Self, ParseError> {
        let mut r = WireReader::new(data);
        r.tag(Self::MSG_TYPE)?;
        let order_id = r.u64_le()?;
        let modify_id = r.u64_le()?;
        let price = r.i64_le()?;
        let quantity = r.u32_le()?;
        r.finish()?;
        Ok(Self {
            order_id,
            modify_id,
            price,
            quantity,
        })
    }
}

/// `'A'` — the exchange accepted an open or modify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ack {
    /// Server-assigned monotonic event id.
    pub ack_id: u64,
    /// The order acknowledged.
    pub order_id: u64,
    /// The modify acknowledged, if this acks a modify (`0` on the wire means
    /// absent).
    pub modify_id: Option<u64>,
}

impl Ack {
    pub(crate) const MSG_TYPE: u8 = b'A';
    const LEN: usize = 25;

    fn encode_into(&self, buf: &mut BytesMut) {
        buf.put_u8(Self::MSG_TYPE);
        buf.put_u64_le(self.ack_id);
        buf.put_u64_le(self.order_id);
        buf.put_u64_le(self.modify_id.unwrap_or(0));
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(Self::LEN);
        self.encode_into(&mut buf);
        buf.freeze()
    }

    pub fn decode(data: &[u8]) -> Result<Self, ParseError> {
        let mut r = WireReader::new(data);
        r.tag(Self::MSG_TYPE)?;
        let ack_id = r.u64_le()?;
        let order_id = r.u64_le()?;
        let modify_id = optional_id(r.u64_le()?);
        r.finish()?;
        Ok(Self {
            ack_id,
            order_id,
            modify_id,
        })
    }
}

/// `'R'` — the exchange refused an open or modify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reject {
    /// The order refused.
    pub order_id: u64,
    /// The modify refused, if a modify was the subject.
    pub modify_id: Option<u64>,
    /// Why it was refused.
    pub reason: RejectReason,
}

impl Reject {
    pub(crate) const MSG_TYPE: u8 = b'R';
    const LEN: usize = 18;

    fn encode_into(&self, buf: &mut BytesMut) {
        buf.put_u8(Self::MSG_TYPE);
        buf.put_u64_le(self.order_id);
        buf.put_u64_le(self.modify_id.unwrap_or(0));
        buf.put_u8(self.reason as u8);
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(Self::LEN);
        self.encode_into(&mut buf);
        buf.freeze()
    }

    pub fn decode(data: &[u8]) -> Result<Self, ParseError> {
        let mut r = WireReader::new(data);
        r.tag(Self::MSG_TYPE)?;
        let order_id = r.u64_le()?;
        let modify_id = optional_id(r.u64_le()?);
        let code = r.u8()?;
        let reason = RejectReason::from_code(code).ok_or(ParseError::UnknownEnum {
            field: "reject reason",
            value: code,
        })?;
        r.finish()?;
        Ok(Self {
            order_id,
            modify_id,
            reason,
        })
    }
}

/// `'C'` — the exchange closed a resting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Close {
    /// Server-assigned monotonic event id.
    pub ack_id: u64,
    /// The order closed.
    pub order_id: u64,
    /// Why it was closed.
    pub reason: CloseReason,
}

impl Close {
    pub(crate) const MSG_TYPE: u8 = b'C';
    const LEN: usize = 18;

    fn encode_into(&self, buf: &mut BytesMut) {
        buf.put_u8(Self::MSG_TYPE);
        buf.put_u64_le(self.ack_id);
        buf.put_u64_le(self.order_id);
        buf.put_u8(self.reason.code());
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(Self::LEN);
        self.encode_into(&mut buf);
        buf.freeze()
    }

    pub fn decode(data: &[u8]) -> Result<Self, ParseError> {
        let mut r = WireReader::new(data);
        r.tag(Self::MSG_TYPE)?;
        let ack_id = r.u64_le()?;
        let order_id = r.u64_le()?;
        let code = r.u8()?;
        let reason = CloseReason::from_code(code).ok_or(ParseError::UnknownEnum {
            field: "close reason",
            value: code,
        })?;
        r.finish()?;
        Ok(Self {
            ack_id,
            order_id,
            reason,
        })
    }
}

/// `'F'` — part or all of an order traded.
///
/// `price` is a 4-byte unsigned field on this body, unlike the 8-byte signed
/// price everywhere else. The widths must not be unified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fill {
    /// Server-assigned monotonic event id.
    pub ack_id: u64,
    /// The order that traded.
    pub order_id: u64,
    /// Trade price (u32 on this body).
    pub price: u32,
    /// Quantity traded.
    pub quantity: u32,
    /// Maker/taker/spread-leg classification.
    pub liquidity: Liquidity,
}

impl Fill {
    pub(crate) const MSG_TYPE: u8 = b'F';
    const LEN: usize = 26;

    fn encode_into(&self, buf: &mut BytesMut) {
        buf.put_u8(Self::MSG_TYPE);
        buf.put_u64_le(self.ack_id);
        buf.put_u64_le(self.order_id);
        buf.put_u32_le(self.price);
        buf.put_u32_le(self.quantity);
        buf.put_u8(self.liquidity.code());
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(Self::LEN);
        self.encode_into(&mut buf);
        buf.freeze()
    }

    pub fn decode(data: &[u8]) -> Result<Self, ParseError> {
        let mut r = WireReader::new(data);
        r.tag(Self::MSG_TYPE)?;
        let ack_id = r.u64_le()?;
        let order_id = r.u64_le()?;
        let price = r.u32_le()?;
        let quantity = r.u32_le()?;
        let code = r.u8()?;
        let liquidity = Liquidity::from_code(code).ok_or(ParseError::UnknownEnum {
            field: "liquidity",
            value: code,
        })?;
        r.finish()?;
        Ok(Self {
            ack_id,
            order_id,
            price,
            quantity,
            liquidity,
        })
    }
}

// ---------------------------------------------------------------------------
// OE dispatch
// ---------------------------------------------------------------------------

/// Any body carried under the `OE` encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderEntry {
    Open(Open),
    Modify(Modify),
    Ack(Ack),
    Reject(Reject),
    Close(Close),
    Fill(Fill),
}

impl OrderEntry {
    pub(crate) fn encoded_len(&self) -> usize {
        match self {
            Self::Open(_) => Open::LEN,
            Self::Modify(_) => Modify::LEN,
            Self::Ack(_) => Ack::LEN,
            Self::Reject(_) => Reject::LEN,
            Self::Close(_) => Close::LEN,
            Self::Fill(_) => Fill::LEN,
        }
    }

    pub(crate) fn encode_into(&self, buf: &mut BytesMut) {
        match self {
            Self::Open(b) => b.encode_into(buf),
            Self::Modify(b) => b.encode_into(buf),
            Self::Ack(b) => b.encode_into(buf),
            Self::Reject(b) => b.encode_into(buf),
            Self::Close(b) => b.encode_into(buf),
            Self::Fill(b) => b.encode_into(buf),
        }
    }

    /// Encode this body to its wire bytes (without the frame header).
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.encode_into(&mut buf);
        buf.freeze()
    }

    /// Decode an `OE` body, dispatching on its message-type byte.
    pub fn decode(data: &[u8]) -> Result<Self, ParseError> {
        let mut r = WireReader::new(data);
        match r.u8()? {
            Open::MSG_TYPE => Ok(Self::Open(Open::decode(data)?)),
            Modify::MSG_TYPE => Ok(Self::Modify(Modify::decode(data)?)),
            Ack::MSG_TYPE => Ok(Self::Ack(Ack::decode(data)?)),
            Reject::MSG_TYPE => Ok(Self::Reject(Reject::decode(data)?)),
            Close::MSG_TYPE => Ok(Self::Close(Close::decode(data)?)),
            Fill::MSG_TYPE => Ok(Self::Fill(Fill::decode(data)?)),
            value => Err(ParseError::UnknownEnum {
                field: "order entry message type",
                value,
            }),
        }
    }
}

fn optional_id(raw: u64) -> Option<u64> {
    if raw == 0 { None } else { Some(raw) }
}
