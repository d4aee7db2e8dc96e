//! Frequency counting, Huffman tree construction, and codeword generation.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use bitvec::prelude::*;

use crate::bitio::BitReader;
use crate::{BITS_PER_WORD, PSEUDO_EOF, SYMBOL_COUNT};

/// A node of the Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    /// A leaf holds a symbol and its frequency.
    Leaf { symbol: u16, weight: u64 },
    /// An internal node owns two children; its weight is their sum.
    Internal {
        weight: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    /// Returns the aggregate weight of the node.
    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    /// Returns true for leaf nodes.
    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }
}

/// Heap entry ordering nodes by ascending weight.
///
/// `BinaryHeap` gives no guarantee for equal weights, so each entry carries an
/// insertion sequence number as a secondary ascending key: leaves are pushed
/// in ascending symbol order and merged nodes are numbered afterwards in
/// creation order. The same frequency table therefore always yields the same
/// tree shape.
#[derive(Debug, PartialEq, Eq)]
struct HeapEntry {
    weight: u64,
    seq: u32,
    node: HuffNode,
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the lowest (weight, seq) pair pops first.
        (other.weight, other.seq).cmp(&(self.weight, self.seq))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Table of codewords indexed by symbol; `None` for symbols absent from the
/// tree.
pub type CodeTable = Vec<Option<BitVec<u8, Msb0>>>;

/// Tallies the frequency of every 8-bit chunk in `input`.
///
/// Returns a table with one slot per symbol, including the end-of-stream
/// symbol, which is pre-seeded with a count of 1 so it always earns a leaf.
/// The reader is consumed; callers must `reset` it before re-reading.
pub fn count_frequencies(input: &mut BitReader) -> Vec<u64> {
    let mut counts = vec![0u64; SYMBOL_COUNT];
    counts[PSEUDO_EOF as usize] = 1;
    while let Some(chunk) = input.read_bits(BITS_PER_WORD) {
        counts[chunk as usize] += 1;
    }
    counts
}

/// Builds the Huffman tree for a frequency table.
///
/// Every symbol with a positive count becomes a leaf; the two lowest-weight
/// nodes are repeatedly merged (first popped becomes the left child) until a
/// single root remains. Returns `None` if no count is positive, which cannot
/// happen for tables produced by [`count_frequencies`].
pub fn build_tree(counts: &[u64]) -> Option<HuffNode> {
    let mut heap = BinaryHeap::new();
    let mut seq = 0u32;
    for (symbol, &weight) in counts.iter().enumerate() {
        if weight == 0 {
            continue;
        }
        heap.push(HeapEntry {
            weight,
            seq,
            node: HuffNode::Leaf {
                symbol: symbol as u16,
                weight,
            },
        });
        seq += 1;
    }
    if heap.is_empty() {
        return None;
    }
    while heap.len() > 1 {
        let first = heap.pop().unwrap();
        let second = heap.pop().unwrap();
        let weight = first.weight + second.weight;
        heap.push(HeapEntry {
            weight,
            seq,
            node: HuffNode::Internal {
                weight,
                left: Box::new(first.node),
                right: Box::new(second.node),
            },
        });
        seq += 1;
    }
    Some(heap.pop().unwrap().node)
}

/// Walks the tree and records each leaf's root-to-leaf path as its codeword
/// (left = 0, right = 1).
///
/// A tree that is a single leaf gets the one-bit code `0`, so even a stream
/// holding nothing but the end-of-stream symbol has bits to walk.
pub fn build_code_table(root: &HuffNode) -> CodeTable {
    let mut table: CodeTable = vec![None; SYMBOL_COUNT];
    assign_codes(root, BitVec::new(), &mut table);
    table
}

fn assign_codes(node: &HuffNode, prefix: BitVec<u8, Msb0>, table: &mut CodeTable) {
    match node {
        HuffNode::Leaf { symbol, .. } => {
            let code = if prefix.is_empty() {
                bitvec![u8, Msb0; 0]
            } else {
                prefix
            };
            table[*symbol as usize] = Some(code);
        }
        HuffNode::Internal { left, right, .. } => {
            let mut left_prefix = prefix.clone();
            left_prefix.push(false);
            assign_codes(left, left_prefix, table);
            let mut right_prefix = prefix;
            right_prefix.push(true);
            assign_codes(right, right_prefix, table);
        }
    }
}
