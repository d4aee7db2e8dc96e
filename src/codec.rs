//! Compressed stream format: magic tag, tree header, then codewords.
//!
//! A compressed stream is, most-significant-bit-first:
//!
//! 1. a 32-bit magic tag ([`crate::MAGIC`]),
//! 2. the Huffman tree in pre-order — bit `0` for an internal node followed
//!    by its left and right subtrees, bit `1` for a leaf followed by its
//!    9-bit symbol (one bit wider than a byte, to fit the end-of-stream
//!    symbol),
//! 3. one codeword per input byte, terminated by the end-of-stream codeword.
//!
//! Any bits after the end-of-stream codeword are padding and are never read,
//! so decoding does not depend on the total bit count.

use crate::bitio::{BitReader, BitWriter};
use crate::error::{Error, Result};
use crate::tree::{build_code_table, build_tree, count_frequencies, CodeTable, HuffNode};
use crate::{Compression, BITS_PER_INT, BITS_PER_WORD, MAGIC, PSEUDO_EOF};

/// Compresses `data` into a self-describing Huffman stream.
///
/// # Parameters
///
/// - `data`: the raw bytes to compress.
///
/// # Returns
///
/// The compressed stream, including the magic tag and tree header. Rare or
/// incompressible input can come out larger than it went in; the result still
/// decompresses exactly.
///
/// # Example
///
/// ```
/// use huffpack::{compress, decompress};
///
/// let packed = compress(b"abracadabra");
/// assert_eq!(decompress(&packed).unwrap(), b"abracadabra");
/// ```
pub fn compress(data: &[u8]) -> Vec<u8> {
    let mut input = BitReader::new(data);
    let counts = count_frequencies(&mut input);
    let root =
        build_tree(&counts).expect("end-of-stream symbol guarantees a non-empty frequency table");
    let codes = build_code_table(&root);

    let mut output = BitWriter::new();
    output.write_bits(BITS_PER_INT, MAGIC);
    write_tree(&root, &mut output);

    input.reset();
    encode_stream(&codes, &mut input, &mut output);

    log::debug!(
        "compressed {} bits to {} bits",
        input.bits_read(),
        output.bits_written()
    );
    output.into_bytes()
}

/// Decompresses a stream produced by [`compress`].
///
/// # Parameters
///
/// - `data`: a complete compressed stream, starting at the magic tag.
///
/// # Returns
///
/// The original bytes, or an error if the stream is not a Huffman stream
/// ([`Error::InvalidFormat`]) or ends early ([`Error::TruncatedHeader`],
/// [`Error::TruncatedStream`]).
///
/// # Example
///
/// ```
/// use huffpack::{decompress, Error};
///
/// assert!(matches!(
///     decompress(b"plainly not compressed"),
///     Err(Error::InvalidFormat(_))
/// ));
/// ```
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut input = BitReader::new(data);
    match input.read_bits(BITS_PER_INT) {
        Some(tag) if tag == MAGIC => {}
        tag => return Err(Error::InvalidFormat(tag.unwrap_or(0))),
    }

    let root = read_tree(&mut input)?;
    let mut output = BitWriter::new();
    decode_stream(&root, &mut input, &mut output)?;

    log::debug!(
        "decompressed {} bits to {} bits",
        input.bits_read(),
        output.bits_written()
    );
    Ok(output.into_bytes())
}

/// Serializes the tree in pre-order: `0` + left + right for internal nodes,
/// `1` + 9-bit symbol for leaves.
pub fn write_tree(node: &HuffNode, out: &mut BitWriter) {
    match node {
        HuffNode::Internal { left, right, .. } => {
            out.write_bits(1, 0);
            write_tree(left, out);
            write_tree(right, out);
        }
        HuffNode::Leaf { symbol, .. } => {
            out.write_bits(1, 1);
            out.write_bits(BITS_PER_WORD + 1, u32::from(*symbol));
        }
    }
}

/// Reconstructs a tree serialized by [`write_tree`], consuming exactly the
/// bits the writer produced. Reconstructed weights are 0; decoding only needs
/// the shape and the leaf symbols.
pub fn read_tree(input: &mut BitReader) -> Result<HuffNode> {
    match input.read_bit() {
        None => Err(Error::TruncatedHeader),
        Some(false) => {
            let left = read_tree(input)?;
            let right = read_tree(input)?;
            Ok(HuffNode::Internal {
                weight: 0,
                left: Box::new(left),
                right: Box::new(right),
            })
        }
        Some(true) => {
            let symbol = input
                .read_bits(BITS_PER_WORD + 1)
                .ok_or(Error::TruncatedHeader)?;
            Ok(HuffNode::Leaf {
                symbol: symbol as u16,
                weight: 0,
            })
        }
    }
}

/// Re-reads the input byte by byte, emitting each byte's codeword, then the
/// end-of-stream codeword.
fn encode_stream(codes: &CodeTable, input: &mut BitReader, out: &mut BitWriter) {
    loop {
        match input.read_bits(BITS_PER_WORD) {
            Some(chunk) => {
                let code = codes[chunk as usize]
                    .as_ref()
                    .expect("scanned symbol missing from code table");
                out.write_code(code);
            }
            None => {
                let code = codes[PSEUDO_EOF as usize]
                    .as_ref()
                    .expect("end-of-stream symbol missing from code table");
                out.write_code(code);
                break;
            }
        }
    }
}

/// Walks the tree one bit at a time, emitting a byte at each leaf and
/// restarting from the root, until the end-of-stream leaf is reached.
fn decode_stream(root: &HuffNode, input: &mut BitReader, out: &mut BitWriter) -> Result<()> {
    let mut current = root;
    loop {
        let bit = input.read_bit().ok_or(Error::TruncatedStream)?;
        if let HuffNode::Internal { left, right, .. } = current {
            current = if bit { right } else { left };
        }
        if let HuffNode::Leaf { symbol, .. } = current {
            if *symbol == PSEUDO_EOF {
                return Ok(());
            }
            out.write_bits(BITS_PER_WORD, u32::from(*symbol));
            current = root;
        }
    }
}

/// Huffman coder exposing the [`Compression`] trait.
#[derive(Debug, Default, Clone, Copy)]
pub struct Huffman;

impl Compression for Huffman {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(compress(data))
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        decompress(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn round_trip(data: &[u8]) {
        let packed = compress(data);
        let unpacked = decompress(&packed).expect("stream must decode");
        assert_eq!(unpacked, data);
    }

    #[test]
    fn test_round_trip_text() {
        round_trip(b"huffman coding in rust is fun!");
    }

    #[test]
    fn test_round_trip_empty_input() {
        round_trip(b"");
        // Magic (32) + lone end-of-stream leaf (1 + 9) + its codeword (1)
        // is 43 bits, padded to 6 bytes.
        assert_eq!(compress(b"").len(), 6);
    }

    #[test]
    fn test_round_trip_one_distinct_byte() {
        round_trip(b"xxxxxxxxxxxxxxxxxxxxxxxx");
    }

    #[test]
    fn test_round_trip_all_byte_values() {
        let data: Vec<u8> = (0..=255u8).collect();
        round_trip(&data);
    }

    #[test]
    fn test_round_trip_random_payloads() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let uniform: Vec<u8> = (0..4096).map(|_| rng.gen()).collect();
        round_trip(&uniform);
        let skewed: Vec<u8> = (0..4096).map(|_| rng.gen_range(0..4u8)).collect();
        round_trip(&skewed);
    }

    #[test]
    fn test_round_trip_mixed_frequencies() {
        round_trip(b"AAABBC");
    }

    #[test]
    fn test_stream_starts_with_magic() {
        let packed = compress(b"anything");
        assert_eq!(&packed[..4], &[0xfa, 0xce, 0x82, 0x01]);
    }

    #[test]
    fn test_bad_magic_is_rejected() {
        let err = decompress(b"not a huffman stream").unwrap_err();
        assert_eq!(err, Error::InvalidFormat(u32::from_be_bytes(*b"not ")));
    }

    #[test]
    fn test_short_input_is_rejected() {
        assert_eq!(decompress(&[0x12]), Err(Error::InvalidFormat(0)));
        assert_eq!(decompress(&[]), Err(Error::InvalidFormat(0)));
    }

    #[test]
    fn test_truncated_header_is_detected() {
        let packed = compress(b"a reasonably long sentence with many distinct letters");
        // Five bytes is the magic plus eight header bits, never a whole tree.
        let err = decompress(&packed[..5]).unwrap_err();
        assert_eq!(err, Error::TruncatedHeader);
    }

    #[test]
    fn test_truncated_stream_is_detected() {
        let packed = compress(b"a reasonably long sentence with many distinct letters");
        // Dropping the last byte always removes part of the end-of-stream
        // codeword, since the final byte holds at least one real bit.
        let err = decompress(&packed[..packed.len() - 1]).unwrap_err();
        assert_eq!(err, Error::TruncatedStream);
    }

    #[test]
    fn test_header_round_trip_preserves_leaf_paths() {
        let mut reader = BitReader::new(b"header symmetry check");
        let counts = count_frequencies(&mut reader);
        let root = build_tree(&counts).unwrap();

        let mut writer = BitWriter::new();
        write_tree(&root, &mut writer);
        let written = writer.bits_written();
        let bytes = writer.into_bytes();

        let mut header = BitReader::new(&bytes);
        let rebuilt = read_tree(&mut header).unwrap();
        assert_eq!(header.bits_read(), written);
        // Equal code tables mean equal leaf symbols at equal paths.
        assert_eq!(build_code_table(&rebuilt), build_code_table(&root));
    }

    #[test]
    fn test_compression_trait() {
        let coder = Huffman;
        let data = b"trait object round trip";
        let packed = coder.compress(data).unwrap();
        assert_eq!(coder.decompress(&packed).unwrap(), data);
    }

    #[test]
    fn test_repetitive_input_shrinks() {
        let data = vec![b'z'; 8192];
        let packed = compress(&data);
        assert!(packed.len() < data.len() / 4);
    }
}
