pub mod codebook;
pub mod decoder;
pub mod encoder;
pub mod frequency;
pub mod tree;

pub use codebook::{derive, CodeBook, DecoderRing};
pub use decoder::decode;
pub use encoder::encode;
pub use frequency::FrequencyTable;
pub use tree::{HuffmanTree, TreeNode};
