use super::tree::{HuffmanTree, TreeNode};
use crate::bits::BitString;
use crate::error::{Error, Result};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Bit appended when descending into a left child
const LEFT_BIT: bool = true;
/// Bit appended when descending into a right child
const RIGHT_BIT: bool = false;
/// Code assigned to the only symbol of a single-leaf tree
const SINGLE_SYMBOL_CODE: bool = false;

/// Encode-direction mapping: byte to code
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeBook {
    codes: BTreeMap<u8, BitString>,
}

impl CodeBook {
    pub fn get(&self, byte: u8) -> Option<&BitString> {
        self.codes.get(&byte)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// `(byte, code)` pairs in ascending byte order
    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitString)> {
        self.codes.iter().map(|(&b, code)| (b, code))
    }

    pub fn max_code_length(&self) -> usize {
        self.codes.values().map(BitString::len).max().unwrap_or(0)
    }

    /// Whether no code is a prefix of another
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<&BitString> = self.codes.values().collect();
        codes.sort();
        codes.windows(2).all(|w| !w[0].is_prefix_of(w[1]))
    }
}

/// Decode-direction mapping: code to byte
///
/// Self-sufficient: decoding needs only this ring, not the tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecoderRing {
    codes: HashMap<BitString, u8>,
    max_code_length: usize,
}

impl DecoderRing {
    /// Invert a code book
    pub fn from_code_book(book: &CodeBook) -> Self {
        let codes: HashMap<BitString, u8> =
            book.iter().map(|(byte, code)| (code.clone(), byte)).collect();
        Self { codes, max_code_length: book.max_code_length() }
    }

    /// Rebuild a ring from externally supplied `(code, byte)` pairs.
    ///
    /// Rejects empty codes, repeated codes or symbols, and any pair of
    /// codes where one is a prefix of the other.
    pub fn from_codes<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (BitString, u8)>,
    {
        let mut codes = HashMap::new();
        let mut seen = [false; 256];

        for (code, byte) in entries {
            if code.is_empty() {
                return Err(Error::DegenerateTree(byte));
            }
            if std::mem::replace(&mut seen[byte as usize], true) {
                return Err(Error::InvalidDecoderRing(format!(
                    "symbol 0x{byte:02x} appears more than once"
                )));
            }
            if codes.contains_key(&code) {
                return Err(Error::InvalidDecoderRing(format!("code {code} appears more than once")));
            }
            codes.insert(code, byte);
        }

        let mut sorted: Vec<&BitString> = codes.keys().collect();
        sorted.sort();
        if let Some(w) = sorted.windows(2).find(|w| w[0].is_prefix_of(w[1])) {
            return Err(Error::InvalidDecoderRing(format!(
                "code {} is a prefix of code {}",
                w[0], w[1]
            )));
        }

        let max_code_length = codes.keys().map(BitString::len).max().unwrap_or(0);
        Ok(Self { codes, max_code_length })
    }

    /// Exact lookup of a complete code
    pub fn get(&self, code: &BitString) -> Option<u8> {
        self.codes.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn max_code_length(&self) -> usize {
        self.max_code_length
    }

    /// `(code, byte)` pairs sorted by byte
    pub fn entries(&self) -> Vec<(&BitString, u8)> {
        let mut entries: Vec<(&BitString, u8)> =
            self.codes.iter().map(|(code, &byte)| (code, byte)).collect();
        entries.sort_by_key(|&(_, byte)| byte);
        entries
    }

    /// The inverse code book
    pub fn to_code_book(&self) -> CodeBook {
        CodeBook { codes: self.codes.iter().map(|(code, &byte)| (byte, code.clone())).collect() }
    }
}

/// Walk the tree and assign each leaf its root-to-leaf path.
///
/// A bare leaf root has no path, so its symbol gets the one-bit code `0`.
pub fn derive(tree: &HuffmanTree) -> (CodeBook, DecoderRing) {
    let mut codes = BTreeMap::new();

    match tree.root() {
        TreeNode::Leaf { byte, .. } => {
            codes.insert(*byte, BitString::from(vec![SINGLE_SYMBOL_CODE]));
        }
        root => {
            let mut path = BitString::with_capacity(tree.depth());
            traverse(root, &mut path, &mut codes);
        }
    }

    let book = CodeBook { codes };
    let ring = DecoderRing::from_code_book(&book);
    debug!(symbols = book.len(), max_code_length = book.max_code_length(), "derived code book");
    (book, ring)
}

fn traverse(node: &TreeNode, path: &mut BitString, codes: &mut BTreeMap<u8, BitString>) {
    match node {
        TreeNode::Leaf { byte, .. } => {
            codes.insert(*byte, path.clone());
        }
        TreeNode::Internal { left, right, .. } => {
            path.push(LEFT_BIT);
            traverse(left, path, codes);
            path.pop();

            path.push(RIGHT_BIT);
            traverse(right, path, codes);
            path.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::huffman::FrequencyTable;

    fn book_for(data: &[u8]) -> (CodeBook, DecoderRing) {
        derive(&HuffmanTree::build(&FrequencyTable::analyze(data)).unwrap())
    }

    fn code(s: &str) -> BitString {
        s.parse().unwrap()
    }

    #[test]
    fn test_single_symbol_code() {
        let (book, ring) = book_for(b"AAAA");
        assert_eq!(book.len(), 1);
        assert_eq!(book.get(b'A'), Some(&code("0")));
        assert_eq!(ring.get(&code("0")), Some(b'A'));
    }

    #[test]
    fn test_left_is_one_right_is_zero() {
        let (book, _) = book_for(b"AABC");
        assert_eq!(book.get(b'A'), Some(&code("1")));
        assert_eq!(book.get(b'B'), Some(&code("01")));
        assert_eq!(book.get(b'C'), Some(&code("00")));
        assert_eq!(book.max_code_length(), 2);
    }

    #[test]
    fn test_ring_inverts_book() {
        let (book, ring) = book_for(b"mississippi river");
        assert_eq!(book.len(), ring.len());
        for (byte, c) in book.iter() {
            assert_eq!(ring.get(c), Some(byte));
        }
        assert_eq!(ring.to_code_book(), book);
        assert_eq!(ring.max_code_length(), book.max_code_length());
    }

    #[test]
    fn test_derived_book_is_prefix_free() {
        let data: Vec<u8> = (0..2000u32).map(|i| ((i * i) % 97) as u8).collect();
        let (book, _) = book_for(&data);
        assert!(book.is_prefix_free());
    }

    #[test]
    fn test_entries_sorted_by_byte() {
        let (_, ring) = book_for(b"zyxzyz");
        let bytes: Vec<u8> = ring.entries().iter().map(|&(_, b)| b).collect();
        assert_eq!(bytes, vec![b'x', b'y', b'z']);
    }

    #[test]
    fn test_from_codes_valid() {
        let ring = DecoderRing::from_codes(vec![(code("1"), b'A'), (code("01"), b'B')]).unwrap();
        assert_eq!(ring.get(&code("01")), Some(b'B'));
        assert_eq!(ring.max_code_length(), 2);
    }

    #[test]
    fn test_from_codes_rejects_empty_code() {
        let err = DecoderRing::from_codes(vec![(BitString::new(), b'A')]).unwrap_err();
        assert!(matches!(err, Error::DegenerateTree(b'A')));
    }

    #[test]
    fn test_from_codes_rejects_prefix() {
        let err = DecoderRing::from_codes(vec![(code("0"), b'A'), (code("01"), b'B')]).unwrap_err();
        assert!(matches!(err, Error::InvalidDecoderRing(_)));
    }

    #[test]
    fn test_from_codes_rejects_duplicates() {
        let dup_code = DecoderRing::from_codes(vec![(code("0"), b'A'), (code("0"), b'B')]);
        assert!(matches!(dup_code, Err(Error::InvalidDecoderRing(_))));

        let dup_symbol = DecoderRing::from_codes(vec![(code("0"), b'A'), (code("1"), b'A')]);
        assert!(matches!(dup_symbol, Err(Error::InvalidDecoderRing(_))));
    }
}
