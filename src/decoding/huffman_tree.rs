//! Huffman coding assigns shorter codes to more frequent symbols. The code of a
//! symbol is the path from the root of the tree to its leaf, a left edge being a `0`
//! and a right edge being a `1`.
//!
//! The tree is rebuilt from a [`FrequencyTable`] with the exact merge order the
//! encoder used, so both sides end up with the same codes.

use super::frequency_table::FrequencyTable;
use super::min_heap::{MinHeap, Weighted};
use alloc::vec::Vec;
use core::fmt::{self, Write};

/// Index of a node in the tree's arena.
pub type NodeIdx = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: NodeIdx,
        right: NodeIdx,
    },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// The child reached by reading `bit`. Leaves have no children.
    pub fn child(&self, bit: bool) -> Option<NodeIdx> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some(if bit { *right } else { *left }),
        }
    }
}

/// What the heap orders: a node in the arena plus its weight.
#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    weight: u64,
    node: NodeIdx,
}

impl Weighted for HeapEntry {
    fn weight(&self) -> u64 {
        self.weight
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum TreeError {
    #[error("Can't build a huffman tree without any symbols")]
    EmptyTable,
}

/// Longest possible code. A tree over at most 256 distinct symbols is at most
/// 255 levels deep.
const MAX_CODE_BITS: usize = 256;

/// The code of one symbol: the path from the root to its leaf, MSB first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code {
    pub symbol: u8,
    path: [u64; MAX_CODE_BITS / 64],
    num_bits: u16,
}

impl Code {
    fn new(symbol: u8) -> Code {
        Code {
            symbol,
            path: [0; MAX_CODE_BITS / 64],
            num_bits: 0,
        }
    }

    /// The code extended by one edge.
    fn push(mut self, bit: bool) -> Code {
        let idx = usize::from(self.num_bits);
        debug_assert!(idx < MAX_CODE_BITS);
        if bit {
            self.path[idx / 64] |= 1 << (63 - idx % 64);
        }
        self.num_bits += 1;
        self
    }

    /// Number of bits in the code.
    pub fn len(&self) -> usize {
        usize::from(self.num_bits)
    }

    pub fn is_empty(&self) -> bool {
        self.num_bits == 0
    }

    /// The `idx`-th bit of the code, counted from the root.
    pub fn bit(&self, idx: usize) -> bool {
        debug_assert!(idx < self.len());
        self.path[idx / 64] & (1 << (63 - idx % 64)) != 0
    }

    /// All bits of the code, starting at the root.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len()).map(|idx| self.bit(idx))
    }
}

impl fmt::Display for Code {
    /// Writes the code as a string of `0` and `1`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits() {
            f.write_char(if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeIdx,
}

impl HuffmanTree {
    /// Builds the tree by pushing every table entry as a leaf, in table order, and
    /// then merging the two lightest nodes until one is left. The lighter node of
    /// each pair becomes the left child.
    pub fn build(table: &FrequencyTable) -> Result<HuffmanTree, TreeError> {
        if table.is_empty() {
            return Err(TreeError::EmptyTable);
        }

        let mut nodes = Vec::with_capacity(2 * table.len() - 1);
        let mut heap = MinHeap::with_capacity(table.len());
        for (symbol, weight) in table.iter() {
            heap.push(HeapEntry {
                weight,
                node: nodes.len(),
            });
            nodes.push(Node::Leaf { symbol, weight });
        }

        let root = loop {
            let n1 = heap.pop().ok_or(TreeError::EmptyTable)?;
            let Some(n2) = heap.pop() else {
                break n1.node;
            };
            let weight = n1.weight.saturating_add(n2.weight);
            heap.push(HeapEntry {
                weight,
                node: nodes.len(),
            });
            nodes.push(Node::Internal {
                weight,
                left: n1.node,
                right: n2.node,
            });
        };

        vprintln!(
            "Built huffman tree with {} nodes, root weight {}",
            nodes.len(),
            nodes[root].weight()
        );
        Ok(HuffmanTree { nodes, root })
    }

    pub fn root(&self) -> NodeIdx {
        self.root
    }

    pub fn node(&self, idx: NodeIdx) -> &Node {
        &self.nodes[idx]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn total_weight(&self) -> u64 {
        self.nodes[self.root].weight()
    }

    /// Codes of all leaves, from the leftmost to the rightmost leaf.
    ///
    /// A tree made of a single leaf reports that leaf with a zero bit code.
    pub fn codes(&self) -> Vec<Code> {
        let mut codes = Vec::with_capacity(self.nodes.len() / 2 + 1);
        let mut stack = alloc::vec![(self.root, Code::new(0))];

        while let Some((idx, code)) = stack.pop() {
            match self.nodes[idx] {
                Node::Leaf { symbol, .. } => codes.push(Code { symbol, ..code }),
                Node::Internal { left, right, .. } => {
                    // right first so the left subtree is popped first
                    stack.push((right, code.push(true)));
                    stack.push((left, code.push(false)));
                }
            }
        }

        codes
    }
}
