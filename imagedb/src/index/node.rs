//! Node storage for the image index.
//!
//! Nodes live in a single arena and refer to each other by index:
//! - `child`: the first node of the next depth level
//! - `sibling`: the next node at the same depth under the same parent
//!
//! Slot 0 always holds the sentinel root, whose value is the empty string.

use crate::index::IndexError;

/// Stable handle to a node in a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The sentinel root of every arena.
    pub const ROOT: Self = Self(0);

    /// Position of the node inside the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A single tree node.
///
/// INVARIANT: `value` is never modified after allocation. Only the links are
/// rewired when sibling chains are reordered.
#[derive(Debug)]
pub struct Node {
    value: String,
    pub(crate) child: Option<NodeId>,
    pub(crate) sibling: Option<NodeId>,
}

impl Node {
    /// The attribute or filename stored in this node.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// First node of the next depth level, if any.
    #[must_use]
    pub const fn child(&self) -> Option<NodeId> {
        self.child
    }

    /// Next node at the same depth, if any.
    #[must_use]
    pub const fn sibling(&self) -> Option<NodeId> {
        self.sibling
    }
}

/// Owns every node of one index.
///
/// Nodes are never freed individually; the whole arena is released when it
/// is dropped.
#[derive(Debug)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    /// Create an arena holding only the sentinel root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                value: String::new(),
                child: None,
                sibling: None,
            }],
        }
    }

    /// Allocate a detached node holding a copy of `value`.
    ///
    /// Capacity is reserved fallibly so that running out of memory surfaces
    /// as [`IndexError::AllocationFailed`] instead of an abort.
    pub fn allocate(&mut self, value: &str) -> Result<NodeId, IndexError> {
        self.nodes
            .try_reserve(1)
            .map_err(|_| IndexError::AllocationFailed)?;

        let mut owned = String::new();
        owned
            .try_reserve_exact(value.len())
            .map_err(|_| IndexError::AllocationFailed)?;
        owned.push_str(value);

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            value: owned,
            child: None,
            sibling: None,
        });
        Ok(id)
    }

    /// Borrow a node.
    ///
    /// Ids are only ever handed out by this arena, so every id is in bounds.
    #[must_use]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Iterate over the sibling chain that starts at `first`.
    #[must_use]
    pub const fn chain(&self, first: Option<NodeId>) -> SiblingIter<'_> {
        SiblingIter {
            arena: self,
            next: first,
        }
    }

    /// Iterate over the children of `parent`, in link order.
    #[must_use]
    pub fn children(&self, parent: NodeId) -> SiblingIter<'_> {
        self.chain(self.get(parent).child)
    }

    /// Number of nodes, including the root.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root is allocated up front.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a sibling chain, yielding node ids.
pub struct SiblingIter<'a> {
    arena: &'a NodeArena,
    next: Option<NodeId>,
}

impl Iterator for SiblingIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.arena.get(current).sibling;
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_arena_has_root() {
        let arena = NodeArena::new();
        assert_eq!(arena.len(), 1);
        let root = arena.get(NodeId::ROOT);
        assert_eq!(root.value(), "");
        assert!(root.child().is_none());
        assert!(root.sibling().is_none());
    }

    #[test]
    fn test_allocate_copies_value() {
        let mut arena = NodeArena::new();
        let value = String::from("cat");
        let id = arena.allocate(&value).expect("allocate");
        drop(value);

        assert_eq!(id.index(), 1);
        assert_eq!(arena.get(id).value(), "cat");
        assert!(arena.get(id).child().is_none());
        assert!(arena.get(id).sibling().is_none());
    }

    #[test]
    fn test_chain_follows_sibling_links() {
        let mut arena = NodeArena::new();
        let a = arena.allocate("a").expect("allocate");
        let b = arena.allocate("b").expect("allocate");
        let c = arena.allocate("c").expect("allocate");
        arena.get_mut(NodeId::ROOT).child = Some(a);
        arena.get_mut(a).sibling = Some(b);
        arena.get_mut(b).sibling = Some(c);

        let ids: Vec<NodeId> = arena.children(NodeId::ROOT).collect();
        assert_eq!(ids, vec![a, b, c]);
        assert_eq!(arena.chain(None).count(), 0);
    }
}
