//! Pricefeed bodies (`PF` encoding).
//!
//! The first byte of every `PF` body is a message-type tag: `'T'` trade,
//! `'L'` level, `'B'` book snapshot, `'X'` block trade. All flow
//! exchange → client.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::ParseError;

use super::Side;
use super::wire::WireReader;

// ---------------------------------------------------------------------------
// Bodies
// ---------------------------------------------------------------------------

/// `'T'` — a trade printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trade {
    /// Server-assigned monotonic event id.
    pub ack_id: u64,
    /// The product that traded.
    pub product_id: u64,
    /// The aggressing side.
    pub taker_side: Side,
    /// Trade price.
    pub price: i64,
    /// Quantity traded.
    pub quantity: u32,
}

impl Trade {
    pub(crate) const MSG_TYPE: u8 = b'T';
    const LEN: usize = 30;

    fn encode_into(&self, buf: &mut BytesMut) {
        buf.put_u8(Self::MSG_TYPE);
        buf.put_u64_le(self.ack_id);
        buf.put_u64_le(self.product_id);
        buf.put_u8(self.taker_side.code());
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
        let ack_id = r.u64_le()?;
        let product_id = r.u64_le()?;
        let taker_side = Side::decode(r.u8()?)?;
        let price = r.i64_le()?;
        let quantity = r.u32_le()?;
        r.finish()?;
        Ok(Self {
            ack_id,
            product_id,
            taker_side,
            price,
            quantity,
        })
    }
}

/// `'L'` — the aggregate quantity at one price level changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    /// Server-assigned monotonic event id.
    pub ack_id: u64,
    /// The product whose book changed.
    pub product_id: u64,
    /// Which side of the book.
    pub side: Side,
    /// The price level.
    pub price: i64,
    /// New aggregate quantity at the level (0 removes it).
    pub quantity: u32,
}

impl Level {
    pub(crate) const MSG_TYPE: u8 = b'L';
    const LEN: usize = 30;

    fn encode_into(&self, buf: &mut BytesMut) {
        buf.put_u8(Self::MSG_TYPE);
        buf.put_u64_le(self.ack_id);
        buf.put_u64_le(self.product_id);
        buf.put_u8(self.side.code());
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
        let ack_id = r.u64_le()?;
        let product_id = r.u64_le()?;
        let side = Side::decode(r.u8()?)?;
        let price = r.i64_le()?;
        let quantity = r.u32_le()?;
        r.finish()?;
        Ok(Self {
            ack_id,
            product_id,
            side,
            price,
            quantity,
        })
    }
}

/// One price level inside a [`Book`] snapshot: 12 bytes on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookLevel {
    /// The price level.
    pub price: i64,
    /// Aggregate quantity at the level.
    pub quantity: u32,
}

impl BookLevel {
    const LEN: usize = 12;
}

/// `'B'` — a full book snapshot for one product.
///
/// Bid and ask arrays are length-prefixed in **bytes**, not elements; each
/// level is 12 bytes and either array may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    /// Event id of the last update folded into this snapshot.
    pub last_ack_id: u64,
    /// The product snapshotted.
    pub product_id: u64,
    /// Bid levels.
    pub bids: Vec<BookLevel>,
    /// Ask levels.
    pub asks: Vec<BookLevel>,
}

impl Book {
    pub(crate) const MSG_TYPE: u8 = b'B';

    fn encoded_len(&self) -> usize {
        1 + 8 + 8 + 4 + self.bids.len() * BookLevel::LEN + 4 + self.asks.len() * BookLevel::LEN
    }

    fn encode_into(&self, buf: &mut BytesMut) {
        buf.put_u8(Self::MSG_TYPE);
        buf.put_u64_le(self.last_ack_id);
        buf.put_u64_le(self.product_id);
        buf.put_u32_le((self.bids.len() * BookLevel::LEN) as u32);
        for level in &self.bids {
            buf.put_i64_le(level.price);
            buf.put_u32_le(level.quantity);
        }
        buf.put_u32_le((self.asks.len() * BookLevel::LEN) as u32);
        for level in &self.asks {
            buf.put_i64_le(level.price);
            buf.put_u32_le(level.quantity);
        }
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.encode_into(&mut buf);
        buf.freeze()
    }

    pub fn decode(data: &[u8]) -> Result<Self, ParseError> {
        let mut r = WireReader::new(data);
        r.tag(Self::MSG_TYPE)?;
        let last_ack_id = r.u64_le()?;
        let product_id = r.u64_le()?;
        let bids = Self::decode_levels(&mut r)?;
        let asks = Self::decode_levels(&mut r)?;
        r.finish()?;
        Ok(Self {
            last_ack_id,
            product_id,
            bids,
            asks,
        })
    }

    /// Read a byte-count prefix, then consume exactly that many bytes as
    /// 12-byte levels. The prefix must be bounds-checked before it sizes
    /// any allocation.
    fn decode_levels(r: &mut WireReader<'_>) -> Result<Vec<BookLevel>, ParseError> {
        let len_bytes = r.u32_le()? as usize;
        let raw = r.take(len_bytes)?;
        let mut levels = Vec::with_capacity(raw.len() / BookLevel::LEN);
        let mut inner = WireReader::new(raw);
        while inner.remaining() > 0 {
            let price = inner.i64_le()?;
            let quantity = inner.u32_le()?;
            levels.push(BookLevel { price, quantity });
        }
        Ok(levels)
    }
}

/// `'X'` — a block trade printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    /// Server-assigned monotonic event id.
    pub ack_id: u64,
    /// The product traded.
    pub product_id: u64,
    /// Negotiated price.
    pub price: i64,
    /// Quantity traded.
    pub quantity: u32,
}

impl Block {
    pub(crate) const MSG_TYPE: u8 = b'X';
    const LEN: usize = 29;

    fn encode_into(&self, buf: &mut BytesMut) {
        buf.put_u8(Self::MSG_TYPE);
        buf.put_u64_le(self.ack_id);
        buf.put_u64_le(self.product_id);
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
        let ack_id = r.u64_le()?;
        let product_id = r.u64_le()?;
        let price = r.i64_le()?;
        let quantity = r.u32_le()?;
        r.finish()?;
        Ok(Self {
            ack_id,
            product_id,
            price,
            quantity,
        })
    }
}

// ---------------------------------------------------------------------------
// PF dispatch
// ---------------------------------------------------------------------------

/// Any body carried under the `PF` encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pricefeed {
    Trade(Trade),
    Level(Level),
    Book(Book),
    Block(Block),
}

impl Pricefeed {
    pub(crate) fn encoded_len(&self) -> usize {
        match self {
            Self::Trade(_) => Trade::LEN,
            Self::Level(_) => Level::LEN,
            Self::Book(b) => b.encoded_len(),
            Self::Block(_) => Block::LEN,
        }
    }

    pub(crate) fn encode_into(&self, buf: &mut BytesMut) {
        match self {
            Self::Trade(b) => b.encode_into(buf),
            Self::Level(b) => b.encode_into(buf),
            Self::Book(b) => b.encode_into(buf),
            Self::Block(b) => b.encode_into(buf),
        }
    }

    /// Encode this body to its wire bytes (without the frame header).
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.encode_into(&mut buf);
        buf.freeze()
    }

    /// Decode a `PF` body, dispatching on its message-type byte.
    pub fn decode(data: &[u8]) -> Result<Self, ParseError> {
        let mut r = WireReader::new(data);
        match r.u8()? {
            Trade::MSG_TYPE => Ok(Self::Trade(Trade::decode(data)?)),
            Level::MSG_TYPE => Ok(Self::Level(Level::decode(data)?)),
            Book::MSG_TYPE => Ok(Self::Book(Book::decode(data)?)),
            Block::MSG_TYPE => Ok(Self::Block(Block::decode(data)?)),
            value => Err(ParseError::UnknownEnum {
                field: "pricefeed message type",
                value,
            }),
        }
    }
}
