use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Tree construction errors
    #[error("Cannot build a Huffman tree from empty input")]
    EmptyInput,

    // Code book / decoder ring errors
    #[error("Decoder ring contains an empty code for symbol 0x{0:02x}")]
    DegenerateTree(u8),

    #[error("Invalid decoder ring: {0}")]
    InvalidDecoderRing(String),

    // Bit-level encode/decode errors
    #[error("Symbol 0x{0:02x} has no entry in the code book")]
    UnknownSymbol(u8),

    #[error("Encoded data ended with {pending_bits} undecodable bits")]
    IncompleteCode { pending_bits: usize },

    #[error("Invalid bit symbol {0:?}: expected '0' or '1'")]
    InvalidBitSymbol(char),

    #[error("Invalid bit-string byte 0x{byte:02x} at offset {offset}: expected '0' or '1'")]
    InvalidBitByte { byte: u8, offset: usize },

    // Packing errors
    #[error("Corrupt padding: count {count} with {len} packed bytes")]
    CorruptPadding { count: u8, len: usize },

    // Container errors
    #[error("Invalid container magic: expected \"HUFP\", got {0:02x?}")]
    InvalidMagic([u8; 4]),

    #[error("Unsupported container version: {0}")]
    UnsupportedVersion(u8),

    #[error("Unknown payload format: {0}")]
    UnknownPayloadFormat(u8),

    #[error("CRC32 mismatch: expected 0x{expected:08x}, got 0x{found:08x}")]
    ChecksumMismatch { expected: u32, found: u32 },

    #[error("Unexpected end of input")]
    UnexpectedEof,
}

pub type Result<T> = std::result::Result<T, Error>;
