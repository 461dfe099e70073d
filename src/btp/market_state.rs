//! Market state updates (`MS` encoding).
//!
//! Unlike the other encodings, `MS` bodies carry no message-type byte: the
//! first byte is the state code itself.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::ParseError;

use super::wire::WireReader;

/// Trading state of a product's market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarketState {
    /// Trading is open, wire code `'O'`.
    Open,
    /// Trading is halted, wire code `'H'`.
    Halt,
    /// The market is closed, wire code `'C'`.
    Closed,
}

impl MarketState {
    fn code(self) -> u8 {
        match self {
            Self::Open => b'O',
            Self::Halt => b'H',
            Self::Closed => b'C',
        }
    }

    fn from_code(code: u8) -> Option<Self> {
        match code {
            b'O' => Some(Self::Open),
            b'H' => Some(Self::Halt),
            b'C' => Some(Self::Closed),
            _ => None,
        }
    }
}

/// A market state transition for one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketStateUpdate {
    /// The new trading state.
    pub state: MarketState,
    /// Server-assigned monotonic event id.
    pub ack_id: u64,
    /// The product whose market changed state.
    pub product_id: u64,
}

impl MarketStateUpdate {
    const LEN: usize = 17;

    pub(crate) fn encoded_len(&self) -> usize {
        Self::LEN
    }

    pub(crate) fn encode_into(&self, buf: &mut BytesMut) {
        buf.put_u8(self.state.code());
        buf.put_u64_le(self.ack_id);
        buf.put_u64_le(self.product_id);
    }

    /// Encode this body to its wire bytes (without the frame header).
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(Self::LEN);
        self.encode_into(&mut buf);
        buf.freeze()
    }

    /// Decode an `MS` body.
    pub fn decode(data: &[u8]) -> Result<Self, ParseError> {
        let mut r = WireReader::new(data);
        let code = r.u8()?;
        let state = MarketState::from_code(code).ok_or(ParseError::UnknownEnum {
            field: "market state",
            value: code,
        })?;
        let ack_id = r.u64_le()?;
        let product_id = r.u64_le()?;
        r.finish()?;
        Ok(Self {
            state,
            ack_id,
            product_id,
        })
    }
}
