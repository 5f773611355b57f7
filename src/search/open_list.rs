//! Indexed binary min-heap — the open list.
//!
//! An implicit-array heap ordered by node weight, with an auxiliary
//! key→index map kept in lockstep with every structural mutation so any
//! cell can be found in O(1). The two structures must never disagree;
//! when they do, the heap has been corrupted by an inconsistent update
//! and the owning session aborts (see [`MargaError::Desync`]).
//!
//! Only four operations are exposed and raw slot access never is, so the
//! invariant cannot be violated from outside.

use std::collections::HashMap;

use crate::core::NodeKey;
use crate::error::{MargaError, Result};

use super::node::SearchNode;

/// Priority queue of discovered-but-not-yet-expanded nodes.
#[derive(Default)]
pub struct OpenList {
    heap: Vec<SearchNode>,
    index: HashMap<NodeKey, usize>,
}

impl OpenList {
    /// Create an empty open list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queued nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// True when no nodes remain.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Queue a newly discovered node.
    ///
    /// Each cell key may be queued at most once; rerouting an already
    /// queued node goes through [`OpenList::decrease_key`] instead.
    pub fn insert(&mut self, node: SearchNode) {
        debug_assert!(
            !self.index.contains_key(&node.key()),
            "duplicate open-list insert for key ({},{})",
            node.key().x,
            node.key().z
        );
        let slot = self.heap.len();
        self.index.insert(node.key(), slot);
        self.heap.push(node);
        self.sift_up(slot);
    }

    /// Remove and return the minimum-weight node, or `None` when empty.
    pub fn extract_min(&mut self) -> Option<SearchNode> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let root = self.heap.pop()?;
        self.index.remove(&root.key());
        if !self.heap.is_empty() {
            self.index.insert(self.heap[0].key(), 0);
            self.sift_down(0);
        }
        Some(root)
    }

    /// Find a queued node by cell key.
    ///
    /// Fails with [`MargaError::Desync`] when the index map points at a
    /// slot holding a different key.
    pub fn lookup(&self, key: NodeKey) -> Result<Option<&SearchNode>> {
        match self.index.get(&key) {
            Some(&slot) => {
                let node = &self.heap[slot];
                if node.key() != key {
                    return Err(MargaError::Desync { key });
                }
                Ok(Some(node))
            }
            None => Ok(None),
        }
    }

    /// Lower a queued node's origin cost and switch its parent.
    ///
    /// The node's weight can only have decreased, so its subtree is still
    /// heap-ordered downward and a single upward sift restores order.
    pub fn decrease_key(
        &mut self,
        key: NodeKey,
        origin_cost: f32,
        parent: NodeKey,
    ) -> Result<()> {
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => return Err(MargaError::Desync { key }),
        };
        if self.heap[slot].key() != key {
            return Err(MargaError::Desync { key });
        }
        self.heap[slot].reroute(origin_cost, parent);
        self.sift_up(slot);
        Ok(())
    }

    /// Bubble a node toward the root while its weight is less than or
    /// equal to its parent's. The `<=` lets a freshly updated node pass
    /// equal-weight ancestors.
    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.heap[slot].weight() <= self.heap[parent].weight() {
                self.swap_slots(slot, parent);
                slot = parent;
            } else {
                break;
            }
        }
    }

    /// Push the root node down, at each level taking the left child first
    /// and letting the right child replace it only when its weight is no
    /// greater, until neither child is smaller.
    fn sift_down(&mut self, mut slot: usize) {
        loop {
            let left = 2 * slot + 1;
            let right = 2 * slot + 2;
            let mut candidate = slot;
            if left < self.heap.len() && self.heap[candidate].weight() >= self.heap[left].weight()
            {
                candidate = left;
            }
            if right < self.heap.len()
                && self.heap[candidate].weight() >= self.heap[right].weight()
            {
                candidate = right;
            }
            if candidate == slot {
                break;
            }
            self.swap_slots(slot, candidate);
            slot = candidate;
        }
    }

    fn swap_slots(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.index.insert(self.heap[a].key(), a);
        self.index.insert(self.heap[b].key(), b);
    }

    /// Verify both invariants: every index entry matches the key actually
    /// stored at that slot, and every non-root weight is >= its parent's.
    #[cfg(test)]
    fn assert_consistent(&self) {
        assert_eq!(self.index.len(), self.heap.len());
        for (key, &slot) in &self.index {
            assert_eq!(self.heap[slot].key(), *key, "index out of lockstep");
        }
        for slot in 1..self.heap.len() {
            let parent = (slot - 1) / 2;
            assert!(
                self.heap[slot].weight() >= self.heap[parent].weight(),
                "heap order violated at slot {}",
                slot
            );
        }
    }
}
