use super::BitString;
use tracing::trace;

/// Padding count stored when there are no encoded bits at all:
/// the whole final byte is filler.
pub const EMPTY_PADDING: u8 = 8;

/// Bit-level writer for packed output
///
/// Writes bits MSB-first: the first bit written lands in the most
/// significant bit of the first byte.
pub struct BitWriter {
    /// Completed output bytes
    output: Vec<u8>,
    /// Current byte being built
    current_byte: u8,
    /// Bits written to current byte (0-7)
    bits_in_byte: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self { output: Vec::new(), current_byte: 0, bits_in_byte: 0 }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { output: Vec::with_capacity(capacity), current_byte: 0, bits_in_byte: 0 }
    }

    /// Write a single bit
    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        if bit {
            self.current_byte |= 1 << (7 - self.bits_in_byte);
        }
        self.bits_in_byte += 1;

        if self.bits_in_byte == 8 {
            self.output.push(self.current_byte);
            self.current_byte = 0;
            self.bits_in_byte = 0;
        }
    }

    /// Write every bit of `bits` in order
    pub fn write_bit_string(&mut self, bits: &BitString) {
        for bit in bits.iter() {
            self.write_bit(bit);
        }
    }

    /// Pad to byte boundary with zero bits
    pub fn align_to_byte(&mut self) {
        if self.bits_in_byte > 0 {
            self.output.push(self.current_byte);
            self.current_byte = 0;
            self.bits_in_byte = 0;
        }
    }

    /// Finish and return the output bytes, zero-padding the last byte
    pub fn finish(mut self) -> Vec<u8> {
        self.align_to_byte();
        self.output
    }

    /// Split into the completed bytes and the partial byte, if any.
    ///
    /// The partial byte is returned with its filler bits already zero,
    /// together with the number of real bits it holds (1-7).
    pub fn into_parts(self) -> (Vec<u8>, Option<(u8, u8)>) {
        let partial = (self.bits_in_byte > 0).then_some((self.current_byte, self.bits_in_byte));
        (self.output, partial)
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Pack a logical bit sequence into bytes with a two-byte trailer.
///
/// Layout: `[full bytes ...] [padding count] [final data byte]`.
///
/// - Partial final group: padded with zero bits, count is `8 - remainder` (1-7).
/// - Length an exact multiple of 8: the last full byte is the final data byte
///   and the count is 0.
/// - No bits at all: `[8, 0]`.
pub fn pack(bits: &BitString) -> Vec<u8> {
    let mut writer = BitWriter::with_capacity(bits.len() / 8 + super::TRAILER_LEN);
    writer.write_bit_string(bits);

    let (mut bytes, partial) = writer.into_parts();
    let (padding, last) = match partial {
        Some((byte, filled)) => (8 - filled, byte),
        None => match bytes.pop() {
            Some(byte) => (0, byte),
            None => (EMPTY_PADDING, 0),
        },
    };
    bytes.push(padding);
    bytes.push(last);

    trace!(bits = bits.len(), packed = bytes.len(), padding, "packed bit string");
    bytes
}
