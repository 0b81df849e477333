pub mod bits;
pub mod container;
pub mod error;
pub mod huffman;

pub use bits::{pack, unpack, unpack_bits, BitString};
pub use container::Container;
pub use error::{Error, Result};
pub use huffman::{derive, CodeBook, DecoderRing, FrequencyTable, HuffmanTree};

use tracing::debug;

/// How a container stores its payload
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum PayloadFormat {
    /// Packed bytes with the padding trailer (`compress` output)
    #[default]
    Packed = 0,
    /// ASCII `0`/`1` bit string (`encode_only` output)
    BitString = 1,
}

impl PayloadFormat {
    /// Parse the on-disk tag
    pub fn from_tag(tag: u8) -> Result<Self> {
        match tag {
            0 => Ok(Self::Packed),
            1 => Ok(Self::BitString),
            other => Err(Error::UnknownPayloadFormat(other)),
        }
    }

    /// On-disk tag
    pub fn tag(&self) -> u8 {
        *self as u8
    }
}

/// Configuration for reading containers
#[derive(Clone, Debug)]
pub struct ContainerConfig {
    /// Check the payload CRC32 when reading
    pub verify_checksum: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self { verify_checksum: true }
    }
}

/// Statistics from a compression run
#[derive(Clone, Debug, Default)]
pub struct CompressionStats {
    pub input_bytes: u64,
    pub distinct_symbols: usize,
    pub tree_depth: usize,
    pub encoded_bits: u64,
    pub output_bytes: u64,
    pub max_code_length: usize,
}

impl CompressionStats {
    /// Average code length in bits per input byte
    pub fn avg_code_length(&self) -> f64 {
        if self.input_bytes == 0 {
            return 0.0;
        }
        self.encoded_bits as f64 / self.input_bytes as f64
    }

    /// Output size divided by input size
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            return 0.0;
        }
        self.output_bytes as f64 / self.input_bytes as f64
    }
}

/// Build the code book and decoder ring for `message`
fn build_codes(message: &[u8]) -> Result<(HuffmanTree, CodeBook, DecoderRing)> {
    let table = FrequencyTable::analyze(message);
    let tree = HuffmanTree::build(&table)?;
    let (book, ring) = derive(&tree);
    Ok((tree, book, ring))
}

/// Compress `message` into packed bytes plus the decoder ring needed to reverse it.
///
/// Fails with [`Error::EmptyInput`] for an empty message.
pub fn compress(message: &[u8]) -> Result<(Vec<u8>, DecoderRing)> {
    compress_with_stats(message).map(|(packed, ring, _)| (packed, ring))
}

/// Like [`compress`], also reporting statistics
pub fn compress_with_stats(message: &[u8]) -> Result<(Vec<u8>, DecoderRing, CompressionStats)> {
    let (tree, book, ring) = build_codes(message)?;
    let bits = huffman::encode(message, &book)?;
    let packed = pack(&bits);

    let stats = CompressionStats {
        input_bytes: message.len() as u64,
        distinct_symbols: book.len(),
        tree_depth: tree.depth(),
        encoded_bits: bits.len() as u64,
        output_bytes: packed.len() as u64,
        max_code_length: book.max_code_length(),
    };
    debug!(
        input = stats.input_bytes,
        output = stats.output_bytes,
        symbols = stats.distinct_symbols,
        "compressed message"
    );
    Ok((packed, ring, stats))
}

/// Reverse [`compress`]
pub fn decompress(packed: &[u8], ring: &DecoderRing) -> Result<Vec<u8>> {
    unpack(packed, ring)
}

/// Encode `message` to a textual bit string, skipping byte packing
pub fn encode_only(message: &[u8]) -> Result<(String, DecoderRing)> {
    let (_, book, ring) = build_codes(message)?;
    let bits = huffman::encode(message, &book)?;
    Ok((bits.to_string(), ring))
}

/// Reverse [`encode_only`]
pub fn decode_only(bits: &str, ring: &DecoderRing) -> Result<Vec<u8>> {
    let bits: BitString = bits.parse()?;
    huffman::decode(&bits, ring)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compress_single_symbol() {
        let (packed, ring) = compress(b"AAAA").unwrap();
        assert_eq!(packed, vec![4, 0x00]);
        assert_eq!(decompress(&packed, &ring).unwrap(), b"AAAA");
    }

    #[test]
    fn test_compress_empty_fails() {
        assert!(matches!(compress(b""), Err(Error::EmptyInput)));
        assert!(matches!(encode_only(b""), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_encode_only_aabc() {
        let (bits, ring) = encode_only(b"AABC").unwrap();
        assert_eq!(bits.len(), 6);
        assert_eq!(decode_only(&bits, &ring).unwrap(), b"AABC");
    }

    #[test]
    fn test_decode_only_rejects_non_bits() {
        let (_, ring) = encode_only(b"AABC").unwrap();
        assert!(matches!(decode_only("10x", &ring), Err(Error::InvalidBitSymbol('x'))));
    }

    #[test]
    fn test_stats() {
        let (packed, _, stats) = compress_with_stats(b"AABC").unwrap();
        assert_eq!(stats.input_bytes, 4);
        assert_eq!(stats.distinct_symbols, 3);
        assert_eq!(stats.tree_depth, 2);
        assert_eq!(stats.encoded_bits, 6);
        assert_eq!(stats.output_bytes, packed.len() as u64);
        assert_eq!(stats.max_code_length, 2);
        assert!((stats.avg_code_length() - 1.5).abs() < 1e-9);
        assert!((stats.ratio() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_payload_format_tags() {
        assert_eq!(PayloadFormat::from_tag(0).unwrap(), PayloadFormat::Packed);
        assert_eq!(PayloadFormat::from_tag(1).unwrap(), PayloadFormat::BitString);
        assert_eq!(PayloadFormat::BitString.tag(), 1);
        assert!(matches!(PayloadFormat::from_tag(7), Err(Error::UnknownPayloadFormat(7))));
    }
}
