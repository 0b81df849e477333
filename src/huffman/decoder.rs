use super::codebook::DecoderRing;
use crate::bits::BitString;
use crate::error::{Error, Result};
use tracing::debug;

/// Decode a bit sequence with a prefix-free decoder ring.
///
/// Bits accumulate until they form a complete code, which is emitted and
/// the accumulator cleared. Leftover bits at the end of input fail with
/// [`Error::IncompleteCode`].
pub fn decode(bits: &BitString, ring: &DecoderRing) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(bits.len() / ring.max_code_length().max(1));
    let mut current = BitString::with_capacity(ring.max_code_length());

    for bit in bits.iter() {
        current.push(bit);
        if let Some(byte) = ring.get(&current) {
            output.push(byte);
            current.clear();
        }
    }

    if !current.is_empty() {
        return Err(Error::IncompleteCode { pending_bits: current.len() });
    }

    debug!(bits = bits.len(), output = output.len(), "decoded message");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> BitString {
        s.parse().unwrap()
    }

    fn aabc_ring() -> DecoderRing {
        DecoderRing::from_codes(vec![(code("1"), b'A'), (code("01"), b'B'), (code("00"), b'C')])
            .unwrap()
    }

    #[test]
    fn test_decode_aabc() {
        assert_eq!(decode(&code("110100"), &aabc_ring()).unwrap(), b"AABC");
    }

    #[test]
    fn test_decode_empty() {
        assert!(decode(&BitString::new(), &aabc_ring()).unwrap().is_empty());
    }

    #[test]
    fn test_decode_trailing_bits() {
        let err = decode(&code("110"), &aabc_ring()).unwrap_err();
        assert!(matches!(err, Error::IncompleteCode { pending_bits: 1 }));

        let err = decode(&code("11000"), &aabc_ring()).unwrap_err();
        assert!(matches!(err, Error::IncompleteCode { pending_bits: 1 }));
    }

    #[test]
    fn test_decode_missing_code() {
        // Ring lacks "00", so the trailing pair never matches
        let ring = DecoderRing::from_codes(vec![(code("1"), b'A'), (code("01"), b'B')]).unwrap();
        let err = decode(&code("10100"), &ring).unwrap_err();
        assert!(matches!(err, Error::IncompleteCode { pending_bits: 2 }));
    }
}
