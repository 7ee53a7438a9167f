//! Persistent placement history with structural sharing.
//!
//! Every applied move produces a new [`PackingState`](crate::PackingState),
//! so a naive `Vec` history would be copied in full on every move. The log
//! here is an `Arc`-linked chain instead: extending it is O(1) and the tail
//! is shared with every descendant state, which is what makes deep search
//! trees affordable.

use crate::placement::Placement;
use std::sync::Arc;

#[derive(Debug)]
struct LogNode {
    placement: Placement,
    prev: Option<Arc<LogNode>>,
}

/// Append-only, structurally shared list of placements.
///
/// Cloning a log is an `Arc` bump; [`PlacementLog::push`] returns a new log
/// that shares its entire tail with the original.
#[derive(Debug, Clone, Default)]
pub struct PlacementLog {
    head: Option<Arc<LogNode>>,
    len: usize,
}

impl PlacementLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of placements recorded.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no placement has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a new log with `placement` appended. The receiver is
    /// unchanged and shares its nodes with the result.
    pub fn push(&self, placement: Placement) -> Self {
        Self {
            head: Some(Arc::new(LogNode {
                placement,
                prev: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    /// The most recent placement, if any.
    pub fn last(&self) -> Option<&Placement> {
        self.head.as_deref().map(|node| &node.placement)
    }

    /// Iterates placements newest-first.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    /// Collects the placements oldest-first.
    pub fn to_vec(&self) -> Vec<Placement> {
        let mut out: Vec<Placement> = self.iter().copied().collect();
        out.reverse();
        out
    }
}

/// Iterator over a [`PlacementLog`], newest placement first.
pub struct Iter<'a> {
    next: Option<&'a LogNode>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Placement;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.prev.as_deref();
        Some(&node.placement)
    }
}

impl<'a> IntoIterator for &'a PlacementLog {
    type Item = &'a Placement;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
