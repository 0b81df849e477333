//! Property-based tests for the Huffman pipeline.
//!
//! - compress/decompress and encode_only/decode_only round-trip
//! - derived code books are prefix-free
//! - frequency tables conserve the input
//! - rarer bytes never get shorter codes than more frequent ones
//! - packed padding counts stay in range

use proptest::prelude::*;

use huffpack::{
    compress, decode_only, decompress, derive, encode_only, pack, unpack_bits, BitString,
    FrequencyTable, HuffmanTree,
};

/// Non-empty messages, half drawn from a small alphabet to force ties and repeats
fn message_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 1..2048),
        prop::collection::vec(prop::sample::select(b"abcde".to_vec()), 1..512),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        max_shrink_iters: 200,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_compress_roundtrip(message in message_strategy()) {
        let (packed, ring) = compress(&message).unwrap();
        prop_assert_eq!(decompress(&packed, &ring).unwrap(), message);
    }

    #[test]
    fn prop_encode_only_roundtrip(message in message_strategy()) {
        let (bits, ring) = encode_only(&message).unwrap();
        prop_assert!(bits.chars().all(|c| c == '0' || c == '1'));
        prop_assert_eq!(decode_only(&bits, &ring).unwrap(), message);
    }

    #[test]
    fn prop_code_book_prefix_free(message in message_strategy()) {
        let tree = HuffmanTree::build(&FrequencyTable::analyze(&message)).unwrap();
        let (book, _) = derive(&tree);
        let codes: Vec<&BitString> = book.iter().map(|(_, code)| code).collect();
        for (i, a) in codes.iter().enumerate() {
            prop_assert!(!a.is_empty());
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    prop_assert!(!a.is_prefix_of(b), "{} is a prefix of {}", a, b);
                }
            }
        }
    }

    #[test]
    fn prop_frequency_conservation(message in prop::collection::vec(any::<u8>(), 0..2048)) {
        let table = FrequencyTable::analyze(&message);
        prop_assert_eq!(table.total(), message.len() as u64);
        for &byte in &message {
            prop_assert!(table.contains(byte));
        }
        for (byte, count) in table.iter() {
            prop_assert!(count >= 1);
            prop_assert!(message.contains(&byte));
        }
    }

    #[test]
    fn prop_code_length_monotonic(message in message_strategy()) {
        let table = FrequencyTable::analyze(&message);
        let (book, _) = derive(&HuffmanTree::build(&table).unwrap());
        let lengths: Vec<(u64, usize)> = table
            .iter()
            .map(|(byte, count)| (count, book.get(byte).unwrap().len()))
            .collect();
        for &(freq_a, len_a) in &lengths {
            for &(freq_b, len_b) in &lengths {
                if freq_a < freq_b {
                    prop_assert!(len_a >= len_b);
                }
            }
        }
    }

    #[test]
    fn prop_padding_bound(bits in prop::collection::vec(any::<bool>(), 1..300)) {
        let bits = BitString::from(bits);
        let packed = pack(&bits);
        let padding = packed[packed.len() - 2] as usize;
        prop_assert!(padding <= 7);
        prop_assert_eq!(8 * (packed.len() - 2) + (8 - padding), bits.len());
        prop_assert_eq!(unpack_bits(&packed).unwrap(), bits);
    }
}
