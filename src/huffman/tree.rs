use super::frequency::FrequencyTable;
use crate::error::{Error, Result};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt;
use tracing::debug;

/// Node of a Huffman tree
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeNode {
    Leaf { byte: u8, weight: u64 },
    Internal { left: Box<TreeNode>, right: Box<TreeNode>, weight: u64 },
}

impl TreeNode {
    /// Total frequency of all leaves beneath this node
    pub fn weight(&self) -> u64 {
        match self {
            TreeNode::Leaf { weight, .. } | TreeNode::Internal { weight, .. } => *weight,
        }
    }

    /// Join two subtrees under a new internal node
    pub fn merge(left: TreeNode, right: TreeNode) -> Self {
        let weight = left.weight() + right.weight();
        TreeNode::Internal { left: Box::new(left), right: Box::new(right), weight }
    }

    fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 0,
            TreeNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize, label: &str) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self {
            TreeNode::Leaf { byte, weight } => {
                writeln!(f, "{indent}{label}: leaf 0x{byte:02x} [weight {weight}]")
            }
            TreeNode::Internal { left, right, weight } => {
                writeln!(f, "{indent}{label}: internal [weight {weight}]")?;
                left.fmt_indented(f, depth + 1, "L")?;
                right.fmt_indented(f, depth + 1, "R")
            }
        }
    }
}

/// Heap entry ordered by weight, then by creation sequence.
///
/// Leaves are numbered in frequency-table order and every merged node takes
/// the next number, so equal weights always pop in a reproducible order.
struct HeapNode {
    weight: u64,
    seq: usize,
    node: TreeNode,
}

impl PartialEq for HeapNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for HeapNode {}
impl PartialOrd for HeapNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for HeapNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight.cmp(&other.weight).then(self.seq.cmp(&other.seq))
    }
}

/// A Huffman tree built from a frequency table
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HuffmanTree {
    root: TreeNode,
}

impl HuffmanTree {
    /// Build a tree by repeatedly merging the two lightest nodes.
    ///
    /// The first node popped becomes the left child. A table with a single
    /// entry yields a bare leaf root.
    pub fn build(table: &FrequencyTable) -> Result<Self> {
        if table.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut heap: BinaryHeap<Reverse<HeapNode>> = table
            .iter()
            .enumerate()
            .map(|(seq, (byte, weight))| {
                Reverse(HeapNode { weight, seq, node: TreeNode::Leaf { byte, weight } })
            })
            .collect();
        let mut next_seq = heap.len();

        while heap.len() > 1 {
            let (Some(Reverse(left)), Some(Reverse(right))) = (heap.pop(), heap.pop()) else {
                break;
            };
            let node = TreeNode::merge(left.node, right.node);
            heap.push(Reverse(HeapNode { weight: node.weight(), seq: next_seq, node }));
            next_seq += 1;
        }

        let Reverse(root) = heap.pop().ok_or(Error::EmptyInput)?;
        let tree = Self { root: root.node };

        debug!(
            symbols = table.len(),
            depth = tree.depth(),
            weight = tree.weight(),
            "built huffman tree"
        );
        Ok(tree)
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Total weight (equals the input length)
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// Length of the longest root-to-leaf path (0 for a bare leaf)
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }
}

impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.fmt_indented(f, 0, "root")
    }
}
