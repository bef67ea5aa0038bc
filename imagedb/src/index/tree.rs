//! Insertion, ordering and traversal over the node arena.

use std::io::Write;

use crate::index::node::{NodeArena, NodeId};
use crate::index::{ATTRIBUTE_COUNT, IndexError, LEAF_DEPTH, NO_MATCH_MARKER};

/// Outcome of [`ImageIndex::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// At least one node was created; the record is new.
    Inserted,
    /// All four values were already present on one path.
    AlreadyIndexed,
}

/// One stored image together with the attributes leading to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Record<'a> {
    pub attributes: [&'a str; ATTRIBUTE_COUNT],
    pub filename: &'a str,
}

impl std::fmt::Display for Record<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [first, second, third] = self.attributes;
        write!(f, "{first} {second} {third} {}", self.filename)
    }
}

/// Result of scanning one sibling chain for a value.
enum ChildScan {
    Found(NodeId),
    /// Not present; `last` is the tail of the chain, `None` if it is empty.
    Missing { last: Option<NodeId> },
}

/// The image index: a four-level tree of attributes and filenames.
///
/// INVARIANT: after every public operation returns, each sibling chain is
/// strictly ascending by byte-wise comparison of node values.
#[derive(Debug, Default)]
pub struct ImageIndex {
    pub(super) arena: NodeArena,
    records: usize,
}

impl ImageIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct records stored.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records
    }

    /// True when nothing has been inserted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records == 0
    }

    /// Number of nodes in the tree, including the root.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Read-only access to the underlying nodes.
    #[must_use]
    pub const fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// File `values` (attribute 1, attribute 2, attribute 3, filename).
    ///
    /// Existing nodes are reused level by level. At the first level where
    /// the value is missing, the rest of the path is allocated as a fresh
    /// branch and appended to that level's sibling chain, then the tree is
    /// re-sorted.
    ///
    /// Inserting a record that is already present changes nothing.
    pub fn insert(&mut self, values: [&str; LEAF_DEPTH]) -> Result<Insertion, IndexError> {
        let mut parent = NodeId::ROOT;

        for (depth, value) in values.iter().enumerate() {
            match self.scan_children(parent, value) {
                ChildScan::Found(existing) => parent = existing,
                ChildScan::Missing { last } => {
                    let branch = self.allocate_branch(value, &values[depth + 1..])?;
                    match last {
                        None => self.arena.get_mut(parent).child = Some(branch),
                        Some(tail) => self.arena.get_mut(tail).sibling = Some(branch),
                    }
                    self.records += 1;
                    self.sort_siblings(NodeId::ROOT);

                    tracing::trace!(
                        depth = depth + 1,
                        nodes = self.arena.len(),
                        "inserted {values:?}"
                    );
                    return Ok(Insertion::Inserted);
                }
            }
        }

        Ok(Insertion::AlreadyIndexed)
    }

    /// Filenames filed under `attributes`, in ascending order.
    ///
    /// Returns `None` as soon as one attribute level has no matching node.
    #[must_use]
    pub fn lookup(&self, attributes: [&str; ATTRIBUTE_COUNT]) -> Option<Vec<&str>> {
        let mut node = NodeId::ROOT;
        for attribute in attributes {
            match self.scan_children(node, attribute) {
                ChildScan::Found(next) => node = next,
                ChildScan::Missing { .. } => return None,
            }
        }

        Some(
            self.arena
                .children(node)
                .map(|id| self.arena.get(id).value())
                .collect(),
        )
    }

    /// Write the filenames filed under `attributes` as one space-separated
    /// line, or the no-match marker when any attribute level misses.
    pub fn search<W: Write>(
        &self,
        attributes: [&str; ATTRIBUTE_COUNT],
        out: &mut W,
    ) -> Result<(), IndexError> {
        match self.lookup(attributes) {
            Some(filenames) if !filenames.is_empty() => {
                writeln!(out, "{}", filenames.join(" "))?;
            }
            _ => writeln!(out, "{NO_MATCH_MARKER}")?,
        }
        Ok(())
    }

    /// Every stored record, ordered by attribute 1 first and filename last.
    #[must_use]
    pub fn records(&self) -> Vec<Record<'_>> {
        let mut records = Vec::with_capacity(self.records);
        let mut path = Vec::with_capacity(ATTRIBUTE_COUNT);
        self.collect_records(NodeId::ROOT, &mut path, &mut records);
        records
    }

    /// Write one `attr1 attr2 attr3 filename` line per record, or the
    /// no-match marker when the index is empty.
    pub fn print<W: Write>(&self, out: &mut W) -> Result<(), IndexError> {
        if self.arena.get(NodeId::ROOT).child().is_none() {
            writeln!(out, "{NO_MATCH_MARKER}")?;
            return Ok(());
        }

        for record in self.records() {
            writeln!(out, "{record}")?;
        }
        Ok(())
    }

    /// Reorder the children of `parent` by value, then do the same for every
    /// level below it.
    ///
    /// Only links are rewritten; node values stay where they were allocated.
    pub(crate) fn sort_siblings(&mut self, parent: NodeId) {
        let mut order: Vec<NodeId> = self.arena.children(parent).collect();
        if order.is_empty() {
            return;
        }

        let arena = &self.arena;
        order.sort_unstable_by(|a, b| {
            arena
                .get(*a)
                .value()
                .as_bytes()
                .cmp(arena.get(*b).value().as_bytes())
        });

        self.arena.get_mut(parent).child = order.first().copied();
        for pair in order.windows(2) {
            self.arena.get_mut(pair[0]).sibling = Some(pair[1]);
        }
        if let Some(&last) = order.last() {
            self.arena.get_mut(last).sibling = None;
        }

        for child in order {
            self.sort_siblings(child);
        }
    }

    fn scan_children(&self, parent: NodeId, value: &str) -> ChildScan {
        let mut last = None;
        for id in self.arena.children(parent) {
            if self.arena.get(id).value() == value {
                return ChildScan::Found(id);
            }
            last = Some(id);
        }
        ChildScan::Missing { last }
    }

    /// Allocate a single-file chain of nodes holding `first` followed by
    /// `rest`, each the only child of the previous one. Returns the top of
    /// the chain.
    fn allocate_branch(&mut self, first: &str, rest: &[&str]) -> Result<NodeId, IndexError> {
        let head = self.arena.allocate(first)?;
        let mut tail = head;
        for value in rest {
            let id = self.arena.allocate(value)?;
            self.arena.get_mut(tail).child = Some(id);
            tail = id;
        }
        Ok(head)
    }

    fn collect_records<'a>(
        &'a self,
        parent: NodeId,
        path: &mut Vec<&'a str>,
        records: &mut Vec<Record<'a>>,
    ) {
        for id in self.arena.children(parent) {
            let value = self.arena.get(id).value();
            if let [first, second, third] = path[..] {
                records.push(Record {
                    attributes: [first, second, third],
                    filename: value,
                });
            } else {
                path.push(value);
                self.collect_records(id, path, records);
                path.pop();
            }
        }
    }
}
