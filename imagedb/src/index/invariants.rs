//! Structural invariant checking for the image index.
//!
//! Walks the whole tree and reports the first broken invariant. Used by the
//! tests after every operation and by the randomized workload runner.

use crate::index::node::NodeId;
use crate::index::{ImageIndex, LEAF_DEPTH};

/// A broken structural invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The root has a sibling or a non-empty value.
    MalformedRoot,
    /// A node below the root holds an empty value.
    EmptyValue { depth: usize },
    /// Two adjacent siblings are out of order or equal.
    SiblingsOutOfOrder {
        depth: usize,
        left: String,
        right: String,
    },
    /// An attribute node has no children.
    MissingChildren { depth: usize, value: String },
    /// A filename node has children.
    TooDeep { value: String },
    /// The stored record count disagrees with the number of leaves.
    RecordCountMismatch { counted: usize, leaves: usize },
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedRoot => write!(f, "root node has a sibling or a value"),
            Self::EmptyValue { depth } => write!(f, "empty value at depth {depth}"),
            Self::SiblingsOutOfOrder { depth, left, right } => {
                write!(f, "siblings out of order at depth {depth}: '{left}' before '{right}'")
            }
            Self::MissingChildren { depth, value } => {
                write!(f, "attribute '{value}' at depth {depth} has no children")
            }
            Self::TooDeep { value } => write!(f, "filename '{value}' has children"),
            Self::RecordCountMismatch { counted, leaves } => {
                write!(f, "index counts {counted} records but holds {leaves} leaves")
            }
        }
    }
}

impl std::error::Error for InvariantViolation {}

impl ImageIndex {
    /// Verify every structural invariant of the tree.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let root = self.arena.get(NodeId::ROOT);
        if root.sibling().is_some() || !root.value().is_empty() {
            return Err(InvariantViolation::MalformedRoot);
        }

        let leaves = self.check_level(NodeId::ROOT, 1)?;
        if leaves != self.len() {
            return Err(InvariantViolation::RecordCountMismatch {
                counted: self.len(),
                leaves,
            });
        }
        Ok(())
    }

    /// Check the children of `parent`, which sit at `depth`. Returns the
    /// number of leaves below `parent`.
    fn check_level(&self, parent: NodeId, depth: usize) -> Result<usize, InvariantViolation> {
        let mut leaves = 0;
        let mut previous: Option<&str> = None;

        for id in self.arena.children(parent) {
            let node = self.arena.get(id);
            let value = node.value();

            if value.is_empty() {
                return Err(InvariantViolation::EmptyValue { depth });
            }
            if let Some(left) = previous
                && left.as_bytes() >= value.as_bytes()
            {
                return Err(InvariantViolation::SiblingsOutOfOrder {
                    depth,
                    left: left.to_string(),
                    right: value.to_string(),
                });
            }
            previous = Some(value);

            if depth == LEAF_DEPTH {
                if node.child().is_some() {
                    return Err(InvariantViolation::TooDeep {
                        value: value.to_string(),
                    });
                }
                leaves += 1;
            } else if node.child().is_none() {
                return Err(InvariantViolation::MissingChildren {
                    depth,
                    value: value.to_string(),
                });
            } else {
                leaves += self.check_level(id, depth + 1)?;
            }
        }

        Ok(leaves)
    }
}
