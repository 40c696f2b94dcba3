/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Metric tree implementation.
//!
//! The implementation is split into sub-modules by concern:
//! - [`balance`]: rotations and the AVL rebalance policy
//! - [`insert`]: write path (insertion with duplicate-key perturbation)
//! - [`delete`]: removal with successor promotion
//! - [`find`]: the search family
//! - [`analytics`]: full scans over the yearly series
//! - [`invariants`]: structural consistency checks

mod analytics;
mod balance;
mod delete;
mod find;
mod insert;
mod invariants;

pub use analytics::{ThresholdMatch, YearComparison};
pub use find::MetricLookup;

use crate::arena::{NodeArena, NodeIndex};
use crate::{MetricNode, NodeView, PreOrderIter};

/// A height-balanced binary search tree of [`Record`](crate::Record)s keyed by their metric.
///
/// # Arena Storage
///
/// All nodes are stored in a [`NodeArena`]. Children and parents are
/// referenced by [`NodeIndex`] instead of pointers, which keeps the parent
/// back-references free of aliasing and makes rotations a handful of index
/// swaps.
///
/// # Keys
///
/// Keys are strictly ordered: an insertion whose metric collides with a
/// stored key is shifted by [`Self::PERTURBATION_EPSILON`]. See
/// [`MetricTree::insert`].
///
/// # Balancing
///
/// After every insertion and deletion each ancestor of the changed position
/// is rebalanced with AVL single and double rotations, so that the heights of
/// any node's subtrees differ by at most one.
#[derive(Debug, Default)]
pub struct MetricTree {
    /// The root node index, `None` for an empty tree.
    root: Option<NodeIndex>,
    /// Arena holding all tree nodes.
    nodes: NodeArena,
    /// Incremented on every structural change (insert, successful delete).
    revision_id: u32,
}

impl MetricTree {
    /// Offset added to a colliding key on insertion.
    pub const PERTURBATION_EPSILON: f64 = 1e-9;

    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            root: None,
            nodes: NodeArena::new(),
            revision_id: 0,
        }
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` when the tree holds no nodes.
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the whole tree, 0 when empty.
    pub fn height(&self) -> u32 {
        height(&self.nodes, self.root)
    }

    /// Get the root node index.
    pub const fn root_index(&self) -> Option<NodeIndex> {
        self.root
    }

    /// A read-only view of the root.
    pub fn root(&self) -> Option<NodeView<'_>> {
        self.root.map(|idx| NodeView::new(self, idx))
    }

    /// Resolve a [`NodeIndex`] to the node, or `None` if the handle is stale.
    pub fn node(&self, idx: NodeIndex) -> Option<&MetricNode> {
        self.nodes.get(idx)
    }

    /// A read-only view of the node behind `idx`, or `None` if the handle is stale.
    pub fn view(&self, idx: NodeIndex) -> Option<NodeView<'_>> {
        self.nodes.get(idx).map(|_| NodeView::new(self, idx))
    }

    /// Revision ID, incremented whenever the tree structure changes.
    ///
    /// A [`NodeIndex`] obtained before the revision changed may now point to a
    /// node at a different position in the tree, or to no node at all.
    pub const fn revision_id(&self) -> u32 {
        self.revision_id
    }

    /// Returns an iterator over all nodes in pre-order, left before right.
    pub fn iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }

    /// Balance factor (right height minus left height) of the node behind `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is stale.
    pub fn balance_factor(&self, idx: NodeIndex) -> i32 {
        balance_factor(&self.nodes, idx)
    }

    /// Depth of the node behind `idx`, 0 for the root.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is stale.
    pub fn level(&self, idx: NodeIndex) -> usize {
        let mut level = 0;
        let mut current = self.nodes[idx].parent;
        while let Some(parent) = current {
            level += 1;
            current = self.nodes[parent].parent;
        }
        level
    }

    /// The identifiers stored at each depth, left to right.
    ///
    /// Produced by a single depth-first visit appending each node to the
    /// bucket of its depth: the left subtree is exhausted before the right
    /// one, so every bucket fills in left-to-right order.
    pub fn level_groups(&self) -> Vec<Vec<&str>> {
        fn visit<'a>(
            nodes: &'a NodeArena,
            idx: Option<NodeIndex>,
            depth: usize,
            groups: &mut Vec<Vec<&'a str>>,
        ) {
            let Some(idx) = idx else {
                return;
            };
            let node = &nodes[idx];
            if groups.len() == depth {
                groups.push(Vec::new());
            }
            groups[depth].push(node.record.identifier.as_str());
            visit(nodes, node.left, depth + 1, groups);
            visit(nodes, node.right, depth + 1, groups);
        }

        let mut groups = Vec::new();
        visit(&self.nodes, self.root, 0, &mut groups);
        groups
    }

    /// Keys in ascending order.
    pub fn keys_in_order(&self) -> Vec<f64> {
        let mut keys = Vec::with_capacity(self.len());
        let mut stack = Vec::new();
        let mut current = self.root;
        while current.is_some() || !stack.is_empty() {
            while let Some(idx) = current {
                stack.push(idx);
                current = self.nodes[idx].left;
            }
            if let Some(idx) = stack.pop() {
                keys.push(self.nodes[idx].key);
                current = self.nodes[idx].right;
            }
        }
        keys
    }

    /// The node arena, for read-only helpers outside this module.
    pub(crate) const fn nodes(&self) -> &NodeArena {
        &self.nodes
    }

    fn bump_revision(&mut self) {
        self.revision_id = self.revision_id.wrapping_add(1);
    }
}

/// Height of an optional subtree, 0 when absent.
fn height(nodes: &NodeArena, idx: Option<NodeIndex>) -> u32 {
    idx.map_or(0, |idx| nodes[idx].height)
}

fn balance_factor(nodes: &NodeArena, idx: NodeIndex) -> i32 {
    let node = &nodes[idx];
    height(nodes, node.right) as i32 - height(nodes, node.left) as i32
}

/// Recompute the cached height of `idx` from its children.
fn update_height(nodes: &mut NodeArena, idx: NodeIndex) {
    let node = &nodes[idx];
    let new_height = 1 + height(nodes, node.left).max(height(nodes, node.right));
    nodes[idx].height = new_height;
}

/// Canonical form used for bit-for-bit key comparison.
///
/// Adding zero folds `-0.0` into `0.0`, every other value is unchanged.
fn normalize_key(key: f64) -> f64 {
    key + 0.0
}
