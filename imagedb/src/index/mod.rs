//! In-memory image index.
//!
//! Images are filed under three ordered attributes. Each level of the tree
//! holds one kind of value:
//!
//! - Depth 0: sentinel root (empty value)
//! - Depth 1: attribute 1
//! - Depth 2: attribute 2
//! - Depth 3: attribute 3
//! - Depth 4: filenames (leaves)
//!
//! Every sibling chain is kept in ascending byte-wise order, so both queries
//! and full listings come out sorted without any extra work.
//!
//! # Usage
//!
//! ```
//! use imagedb::index::ImageIndex;
//!
//! let mut index = ImageIndex::new();
//! index.insert(["b", "x", "1", "f2.jpg"]).unwrap();
//! index.insert(["a", "x", "1", "f1.jpg"]).unwrap();
//!
//! let mut out = Vec::new();
//! index.print(&mut out).unwrap();
//! assert_eq!(out, b"a x 1 f1.jpg\nb x 1 f2.jpg\n");
//! ```

mod invariants;
mod node;
mod tree;

pub use invariants::InvariantViolation;
pub use node::{Node, NodeArena, NodeId, SiblingIter};
pub use tree::{ImageIndex, Insertion, Record};

/// Number of attribute levels between the root and the filenames.
pub const ATTRIBUTE_COUNT: usize = 3;

/// Depth of the filename leaves below the root.
pub const LEAF_DEPTH: usize = ATTRIBUTE_COUNT + 1;

/// Printed when a query or listing has nothing to show.
pub const NO_MATCH_MARKER: &str = "(NULL)";

/// Errors that can occur while operating on the index.
#[derive(Debug)]
pub enum IndexError {
    /// The node arena could not grow.
    AllocationFailed,
    /// Writing query or listing output failed.
    Output(std::io::Error),
}

impl std::fmt::Display for IndexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AllocationFailed => write!(f, "failed to allocate index node"),
            Self::Output(e) => write!(f, "output error: {e}"),
        }
    }
}

impl std::error::Error for IndexError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::AllocationFailed => None,
            Self::Output(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for IndexError {
    fn from(e: std::io::Error) -> Self {
        Self::Output(e)
    }
}
