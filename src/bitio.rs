//! Bit-oriented reader and writer over in-memory byte buffers.
//!
//! Both sides are most-significant-bit-first: the first bit written lands in
//! the high bit of the first output byte, and `read_bits`/`write_bits` treat
//! the requested group as a big-endian field. This is the only bit order the
//! stream format uses.

use bitvec::prelude::*;

/// Reads individual bits or fixed-width groups from a byte slice.
///
/// Exhaustion is signalled by returning `None`; the reader never panics on a
/// short source. `reset` rewinds to the first bit, which the compressor uses
/// between its counting and encoding passes.
#[derive(Debug)]
pub struct BitReader<'a> {
    bits: &'a BitSlice<u8, Msb0>,
    pos: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a reader positioned at the first bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        BitReader {
            bits: data.view_bits::<Msb0>(),
            pos: 0,
        }
    }

    /// Reads a single bit, or `None` if the source is exhausted.
    pub fn read_bit(&mut self) -> Option<bool> {
        let bit = *self.bits.get(self.pos)?;
        self.pos += 1;
        Some(bit)
    }

    /// Reads `count` bits (at most 32) as a big-endian value.
    ///
    /// Returns `None` without consuming anything if fewer than `count` bits
    /// remain.
    pub fn read_bits(&mut self, count: usize) -> Option<u32> {
        debug_assert!(count >= 1 && count <= 32);
        if self.pos + count > self.bits.len() {
            return None;
        }
        let value = self.bits[self.pos..self.pos + count].load_be::<u32>();
        self.pos += count;
        Some(value)
    }

    /// Rewinds the reader to the first bit.
    pub fn reset(&mut self) {
        self.pos = 0;
    }

    /// Number of bits consumed so far.
    pub fn bits_read(&self) -> usize {
        self.pos
    }
}

/// Accumulates bits into a growable buffer, most-significant-bit-first.
#[derive(Debug, Default)]
pub struct BitWriter {
    bits: BitVec<u8, Msb0>,
}

impl BitWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        BitWriter::default()
    }

    /// Appends the low `count` bits of `value` (at most 32), high bit first.
    pub fn write_bits(&mut self, count: usize, value: u32) {
        debug_assert!(count <= 32);
        for shift in (0..count).rev() {
            self.bits.push((value >> shift) & 1 == 1);
        }
    }

    /// Appends a pre-built codeword verbatim.
    pub fn write_code(&mut self, code: &BitSlice<u8, Msb0>) {
        self.bits.extend_from_bitslice(code);
    }

    /// Number of bits written so far.
    pub fn bits_written(&self) -> usize {
        self.bits.len()
    }

    /// Finalizes the stream, padding any trailing partial byte with zero bits.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bits.into_vec()
    }
}
