use bytes::Buf;

use crate::errors::{PqMetaError, Result};

/// Max number of 7-bit groups for a 32-bit varint.
pub const MAX_VARINT32_BYTES: usize = 5;

/// Max number of 7-bit groups for a 64-bit varint.
pub const MAX_VARINT64_BYTES: usize = 10;

/// Bounds-checked sequential reader over a borrowed byte slice.
///
/// Every read either advances the position by exactly the number of bytes it
/// consumed, or returns an error and leaves the position untouched.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    position: usize,
    /// Offset of `buf` within some larger buffer. Only used when reporting
    /// errors.
    base_offset: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_base_offset(buf, 0)
    }

    /// Create a cursor for a slice that starts at `base_offset` of some larger
    /// buffer (e.g. the metadata blob inside a file).
    pub fn with_base_offset(buf: &'a [u8], base_offset: usize) -> Self {
        ByteCursor {
            buf,
            position: 0,
            base_offset,
        }
    }

    /// Position relative to the start of the cursor's slice.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn limit(&self) -> usize {
        self.buf.len()
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.position
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Absolute offset of the current position, used in errors.
    pub fn offset(&self) -> usize {
        self.base_offset + self.position
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        if self.remaining() < needed {
            return Err(PqMetaError::Truncated {
                offset: self.offset(),
                needed,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    pub fn read_byte(&mut self) -> Result<u8> {
        self.ensure(1)?;
        Ok(self.get_u8())
    }

    /// Read exactly `n` bytes, returning a slice borrowed from the underlying
    /// buffer.
    pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
        self.ensure(n)?;
        let out = &self.buf[self.position..self.position + n];
        self.position += n;
        Ok(out)
    }

    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.ensure(n)?;
        self.position += n;
        Ok(())
    }

    pub fn read_u32_le(&mut self) -> Result<u32> {
        self.ensure(4)?;
        Ok(self.get_u32_le())
    }

    pub fn read_f64_le(&mut self) -> Result<f64> {
        self.ensure(8)?;
        Ok(self.get_f64_le())
    }

    pub fn read_varuint32(&mut self) -> Result<u32> {
        // Fifth group may only carry bits 28..=31.
        let v = self.read_varuint(MAX_VARINT32_BYTES, 0x0F)?;
        Ok(v as u32)
    }

    pub fn read_varuint64(&mut self) -> Result<u64> {
        // Tenth group may only carry bit 63.
        self.read_varuint(MAX_VARINT64_BYTES, 0x01)
    }

    pub fn read_zigzag32(&mut self) -> Result<i32> {
        Ok(zigzag_decode32(self.read_varuint32()?))
    }

    pub fn read_zigzag64(&mut self) -> Result<i64> {
        Ok(zigzag_decode64(self.read_varuint64()?))
    }

    /// Reads an unsigned little-endian base-128 integer.
    ///
    /// The most-significant bit of each byte is the continuation flag, the
    /// lower 7 bits are accumulated least significant group first. The
    /// position is only committed once the full integer has been read.
    fn read_varuint(&mut self, max_groups: usize, last_group_mask: u8) -> Result<u64> {
        let start = self.position;
        let mut result = 0u64;

        for group in 0..max_groups {
            let byte = match self.buf.get(start + group) {
                Some(&b) => b,
                None => {
                    return Err(PqMetaError::Truncated {
                        offset: self.offset(),
                        needed: group + 1,
                        available: self.remaining(),
                    });
                }
            };

            let data = byte & 0x7F;
            let last = group == max_groups - 1;
            if last && (byte & 0x80 != 0 || data & !last_group_mask != 0) {
                return Err(PqMetaError::VarintOverflow {
                    offset: self.offset(),
                });
            }

            result |= (data as u64) << (7 * group);
            if byte & 0x80 == 0 {
                self.position = start + group + 1;
                return Ok(result);
            }
        }

        Err(PqMetaError::VarintOverflow {
            offset: self.offset(),
        })
    }
}

impl Buf for ByteCursor<'_> {
    fn remaining(&self) -> usize {
        self.buf.len() - self.position
    }

    fn chunk(&self) -> &[u8] {
        &self.buf[self.position..]
    }

    fn advance(&mut self, cnt: usize) {
        assert!(
            cnt <= Buf::remaining(self),
            "cannot advance past the end of the buffer"
        );
        self.position += cnt;
    }
}

/// Decodes a ZigZag-encoded 32-bit unsigned integer into a signed value.
pub fn zigzag_decode32(n: u32) -> i32 {
    ((n >> 1) as i32) ^ (-((n & 1) as i32))
}

/// Decodes a ZigZag-encoded 64-bit unsigned integer into a signed value.
pub fn zigzag_decode64(n: u64) -> i64 {
    ((n >> 1) as i64) ^ (-((n & 1) as i64))
}
