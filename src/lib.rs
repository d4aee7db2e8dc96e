//! Lossless Huffman compression with a tree-headed stream format.
//!
//! The compressed stream carries everything a decoder needs: a 32-bit magic
//! tag, a pre-order serialization of the Huffman tree, and the variable-length
//! codewords for the input bytes, terminated by the codeword of a synthetic
//! end-of-stream symbol. No frequency table or length field is stored.
//!
//! # Example
//!
//! ```
//! use huffpack::{compress, decompress};
//!
//! let data = b"so it goes, so it goes, so it goes";
//! let packed = compress(data);
//! assert_eq!(decompress(&packed).unwrap(), data);
//! ```

pub mod bitio;
pub mod codec;
pub mod error;
pub mod tree;

pub use codec::{compress, decompress, read_tree, write_tree, Huffman};
pub use error::{Error, Result};
pub use tree::{build_code_table, build_tree, count_frequencies, CodeTable, HuffNode};

/// Number of bits in one input symbol (one byte).
pub const BITS_PER_WORD: usize = 8;

/// Width of the magic tag at the head of a compressed stream.
pub const BITS_PER_INT: usize = 32;

/// Number of distinct input symbols.
pub const ALPH_SIZE: usize = 1 << BITS_PER_WORD;

/// Synthetic end-of-stream symbol, one past the real alphabet.
pub const PSEUDO_EOF: u16 = ALPH_SIZE as u16;

/// Total symbol space: the alphabet plus the end-of-stream symbol.
pub const SYMBOL_COUNT: usize = ALPH_SIZE + 1;

/// Magic tag identifying a tree-headed Huffman stream.
pub const MAGIC: u32 = 0xface_8201;

/// Trait for compression algorithms.
pub trait Compression {
    /// Compress the input data.
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Decompress the compressed data.
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>>;
}
