//! On-disk container pairing a decoder ring with its payload.
//!
//! Layout (integers little-endian):
//!
//! ```text
//! magic    "HUFP"
//! version  u8
//! format   u8        0 = packed bytes, 1 = ASCII bit string
//! count    u16       number of ring entries (1-256)
//! entries  count x { symbol u8, code_len u8, code bits MSB-first, zero-padded }
//! length   u64       payload length in bytes
//! payload
//! crc32    u32       CRC-32 of the payload
//! ```

use crate::bits::{BitReader, BitString, BitWriter};
use crate::error::{Error, Result};
use crate::huffman::{decode, DecoderRing};
use crate::{decompress, ContainerConfig, PayloadFormat};
use std::io::{ErrorKind, Read, Write};
use tracing::{debug, warn};

pub const MAGIC: [u8; 4] = *b"HUFP";
pub const VERSION: u8 = 1;

/// Largest code a ring entry can describe
const MAX_CODE_LEN: usize = u8::MAX as usize;

/// A decoder ring together with the data it decodes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Container {
    pub format: PayloadFormat,
    pub ring: DecoderRing,
    pub payload: Vec<u8>,
}

impl Container {
    pub fn new(format: PayloadFormat, ring: DecoderRing, payload: Vec<u8>) -> Self {
        Self { format, ring, payload }
    }

    /// Serialize to `writer`, returning the number of bytes written
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<u64> {
        if self.ring.is_empty() || self.ring.len() > 256 {
            return Err(Error::InvalidDecoderRing(format!(
                "cannot store a ring with {} entries",
                self.ring.len()
            )));
        }

        let mut header = Vec::with_capacity(8 + self.ring.len() * 4);
        header.extend_from_slice(&MAGIC);
        header.push(VERSION);
        header.push(self.format.tag());
        header.extend_from_slice(&(self.ring.len() as u16).to_le_bytes());

        for (code, symbol) in self.ring.entries() {
            if code.len() > MAX_CODE_LEN {
                return Err(Error::InvalidDecoderRing(format!(
                    "code for symbol 0x{symbol:02x} is {} bits long",
                    code.len()
                )));
            }
            header.push(symbol);
            header.push(code.len() as u8);
            let mut bits = BitWriter::with_capacity(code.len().div_ceil(8));
            bits.write_bit_string(code);
            header.extend_from_slice(&bits.finish());
        }
        header.extend_from_slice(&(self.payload.len() as u64).to_le_bytes());

        let crc = crc32fast::hash(&self.payload);

        writer.write_all(&header)?;
        writer.write_all(&self.payload)?;
        writer.write_all(&crc.to_le_bytes())?;
        writer.flush()?;

        let written = (header.len() + self.payload.len() + 4) as u64;
        debug!(
            entries = self.ring.len(),
            payload = self.payload.len(),
            bytes = written,
            "wrote container"
        );
        Ok(written)
    }

    /// Parse a container from `reader`
    pub fn read_from<R: Read>(mut reader: R, config: &ContainerConfig) -> Result<Self> {
        let mut magic = [0u8; 4];
        read_exact(&mut reader, &mut magic)?;
        if magic != MAGIC {
            return Err(Error::InvalidMagic(magic));
        }

        let mut fixed = [0u8; 4];
        read_exact(&mut reader, &mut fixed)?;
        let [version, format_tag, count_lo, count_hi] = fixed;
        if version != VERSION {
            return Err(Error::UnsupportedVersion(version));
        }
        let format = PayloadFormat::from_tag(format_tag)?;

        let count = u16::from_le_bytes([count_lo, count_hi]) as usize;
        if count == 0 || count > 256 {
            return Err(Error::InvalidDecoderRing(format!("entry count {count} out of range")));
        }

        let mut entries = Vec::with_capacity(count);
        for _ in 0..count {
            let mut entry = [0u8; 2];
            read_exact(&mut reader, &mut entry)?;
            let [symbol, code_len] = entry;

            let mut code_bytes = vec![0u8; (code_len as usize).div_ceil(8)];
            read_exact(&mut reader, &mut code_bytes)?;
            let code: BitString = BitReader::new(&code_bytes).read_bits(code_len as usize)?;
            entries.push((code, symbol));
        }
        let ring = DecoderRing::from_codes(entries)?;

        let mut len_bytes = [0u8; 8];
        read_exact(&mut reader, &mut len_bytes)?;
        let payload_len = u64::from_le_bytes(len_bytes);

        let mut payload = Vec::new();
        reader.by_ref().take(payload_len).read_to_end(&mut payload)?;
        if (payload.len() as u64) < payload_len {
            return Err(Error::UnexpectedEof);
        }

        let mut crc_bytes = [0u8; 4];
        read_exact(&mut reader, &mut crc_bytes)?;
        let expected = u32::from_le_bytes(crc_bytes);
        if config.verify_checksum {
            let found = crc32fast::hash(&payload);
            if found != expected {
                return Err(Error::ChecksumMismatch { expected, found });
            }
        } else {
            warn!("skipping container checksum verification");
        }

        debug!(entries = ring.len(), payload = payload.len(), ?format, "read container");
        Ok(Self { format, ring, payload })
    }

    /// Recover the original message from the payload
    pub fn decode(&self) -> Result<Vec<u8>> {
        match self.format {
            PayloadFormat::Packed => decompress(&self.payload, &self.ring),
            PayloadFormat::BitString => decode(&parse_bit_bytes(&self.payload)?, &self.ring),
        }
    }
}

/// Parse an ASCII `0`/`1` payload, reporting the first byte that is neither
fn parse_bit_bytes(payload: &[u8]) -> Result<BitString> {
    payload
        .iter()
        .enumerate()
        .map(|(offset, &byte)| match byte {
            b'0' => Ok(false),
            b'1' => Ok(true),
            byte => Err(Error::InvalidBitByte { byte, offset }),
        })
        .collect()
}

/// `read_exact` that reports truncation as [`Error::UnexpectedEof`]
fn read_exact<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => Error::UnexpectedEof,
        _ => Error::Io(e),
    })
}
