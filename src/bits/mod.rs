pub mod reader;
pub mod writer;

pub use reader::{unpack, unpack_bits, BitReader};
pub use writer::{pack, BitWriter};

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Number of trailer bytes at the end of every packed array
/// (padding count followed by the final data byte)
pub const TRAILER_LEN: usize = 2;

/// A logical sequence of bits, first bit first.
///
/// Used both for individual Huffman codes and for a whole encoded message.
/// The textual form is a string of `'0'` and `'1'` characters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitString {
    bits: Vec<bool>,
}

impl BitString {
    pub fn new() -> Self {
        Self { bits: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { bits: Vec::with_capacity(capacity) }
    }

    /// Append a single bit
    #[inline]
    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Remove and return the last bit
    #[inline]
    pub fn pop(&mut self) -> Option<bool> {
        self.bits.pop()
    }

    /// Append every bit of `other`
    pub fn extend_from(&mut self, other: &BitString) {
        self.bits.extend_from_slice(&other.bits);
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn clear(&mut self) {
        self.bits.clear();
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// Whether `self` is a (not necessarily proper) prefix of `other`
    pub fn is_prefix_of(&self, other: &BitString) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: String = self.bits.iter().map(|&b| if b { '1' } else { '0' }).collect();
        f.write_str(&text)
    }
}

impl FromStr for BitString {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(Error::InvalidBitSymbol(other)),
            })
            .collect()
    }
}

impl From<Vec<bool>> for BitString {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl FromIterator<bool> for BitString {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self { bits: iter.into_iter().collect() }
    }
}
