use super::codebook::CodeBook;
use crate::bits::BitString;
use crate::error::{Error, Result};
use tracing::debug;

/// Concatenate the code of every input byte, in input order.
///
/// Fails with [`Error::UnknownSymbol`] on the first byte the code book
/// does not cover.
pub fn encode(bytes: &[u8], book: &CodeBook) -> Result<BitString> {
    let mut bits = BitString::with_capacity(bytes.len() * book.max_code_length().min(8));
    for &byte in bytes {
        let code = book.get(byte).ok_or(Error::UnknownSymbol(byte))?;
        bits.extend_from(code);
    }
    debug!(input = bytes.len(), bits = bits.len(), "encoded message");
    Ok(bits)
}
