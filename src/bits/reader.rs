use super::{BitString, TRAILER_LEN};
use crate::error::{Error, Result};
use crate::huffman::{decode, DecoderRing};
use tracing::trace;

/// Bit-level reader over an in-memory byte slice
///
/// Reads bits MSB-first within each byte, matching [`super::BitWriter`].
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Position of the next bit to read
    bit_pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, bit_pos: 0 }
    }

    /// Read a single bit
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        let byte = *self.data.get(self.bit_pos / 8).ok_or(Error::UnexpectedEof)?;
        let bit = (byte >> (7 - self.bit_pos % 8)) & 1 != 0;
        self.bit_pos += 1;
        Ok(bit)
    }

    /// Read `n` bits into a new bit string
    pub fn read_bits(&mut self, n: usize) -> Result<BitString> {
        if n > self.bits_remaining() {
            return Err(Error::UnexpectedEof);
        }
        let mut bits = BitString::with_capacity(n);
        for _ in 0..n {
            bits.push(self.read_bit()?);
        }
        Ok(bits)
    }

    /// Append `n` bits to an existing bit string
    pub fn read_bits_into(&mut self, n: usize, bits: &mut BitString) -> Result<()> {
        if n > self.bits_remaining() {
            return Err(Error::UnexpectedEof);
        }
        for _ in 0..n {
            bits.push(self.read_bit()?);
        }
        Ok(())
    }

    /// Bits left before the end of the slice
    pub fn bits_remaining(&self) -> usize {
        (self.data.len() * 8).saturating_sub(self.bit_pos)
    }
}

/// Rebuild the logical bit sequence from a packed array.
///
/// Reads the padding count from the second-to-last byte, keeps the first
/// `8 - p` bits of the last byte, and prepends all full bytes before the
/// trailer. Filler bits are ignored whatever their value.
pub fn unpack_bits(packed: &[u8]) -> Result<BitString> {
    if packed.len() < TRAILER_LEN {
        return Err(Error::CorruptPadding {
            count: packed.first().copied().unwrap_or(0),
            len: packed.len(),
        });
    }

    let body_len = packed.len() - TRAILER_LEN;
    let padding = packed[body_len];
    if padding > 8 {
        return Err(Error::CorruptPadding { count: padding, len: packed.len() });
    }

    let tail_bits = 8 - padding as usize;
    let mut bits = BitString::with_capacity(body_len * 8 + tail_bits);

    let mut body = BitReader::new(&packed[..body_len]);
    body.read_bits_into(body_len * 8, &mut bits)?;

    let mut tail = BitReader::new(&packed[body_len + 1..]);
    tail.read_bits_into(tail_bits, &mut bits)?;

    trace!(packed = packed.len(), padding, bits = bits.len(), "unpacked bit string");
    Ok(bits)
}

/// Unpack a packed array and decode it with `ring`
pub fn unpack(packed: &[u8], ring: &DecoderRing) -> Result<Vec<u8>> {
    let bits = unpack_bits(packed)?;
    decode(&bits, ring)
}
