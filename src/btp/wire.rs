//! Checked little-endian reader for BTP body layouts.
//!
//! Every body decoder drives one [`WireReader`] over its input slice. Reads
//! never panic: running past the end of the buffer yields
//! [`ParseError::ShortBuffer`] instead.

use crate::error::ParseError;

/// Cursor over a byte slice with checked little-endian reads.
pub(crate) struct WireReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes not yet consumed.
    pub(crate) fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Consume exactly `n` bytes.
    pub(crate) fn take(&mut self, n: usize) -> Result<&'a [u8], ParseError> {
        if self.remaining() < n {
            return Err(ParseError::ShortBuffer {
                needed: n,
                available: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub(crate) fn u8(&mut self) -> Result<u8, ParseError> {
        Ok(self.take(1)?[0])
    }

    pub(crate) fn u16_le(&mut self) -> Result<u16, ParseError> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub(crate) fn u32_le(&mut self) -> Result<u32, ParseError> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub(crate) fn u64_le(&mut self) -> Result<u64, ParseError> {
        let b = self.take(8)?;
        Ok(u64::from_le_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    pub(crate) fn i64_le(&mut self) -> Result<i64, ParseError> {
        Ok(self.u64_le()? as i64)
    }

    /// Consume a fixed-size byte array (e.g. the 32-byte auth token).
    pub(crate) fn array<const N: usize>(&mut self) -> Result<[u8; N], ParseError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Consume the message-type byte, which must equal `expected`.
    pub(crate) fn tag(&mut self, expected: u8) -> Result<(), ParseError> {
        let found = self.u8()?;
        if found != expected {
            return Err(ParseError::WrongTag { expected, found });
        }
        Ok(())
    }

    /// Require that the whole buffer was consumed.
    pub(crate) fn finish(&self) -> Result<(), ParseError> {
        if self.remaining() != 0 {
            return Err(ParseError::BadFrame("trailing bytes after body"));
        }
        Ok(())
    }
}
