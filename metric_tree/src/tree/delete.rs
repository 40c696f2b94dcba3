/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Removal path.
//!
//! Nodes with at most one child are spliced out. Nodes with two children take
//! over the key and record of their in-order successor, whose own cell is then
//! spliced out of the right subtree. Every ancestor is rebalanced on the way
//! back up.

use tracing::debug;

use super::{MetricTree, normalize_key};
use crate::Record;
use crate::arena::{NodeArena, NodeIndex};

impl MetricTree {
    /// Remove the node stored under `key` and return its record.
    ///
    /// `key` must be the stored key, which differs from [`Record::metric`]
    /// for records that were perturbed on insertion; obtain it from a lookup
    /// such as [`Self::find_approx`]. Deleting an absent key is a no-op and
    /// returns `None`.
    pub fn delete(&mut self, key: f64) -> Option<Record> {
        let key = normalize_key(key);
        let mut removed = None;
        self.root = Self::node_delete(&mut self.nodes, self.root, key, &mut removed);

        if let Some(record) = &removed {
            debug!(identifier = %record.identifier, key, "removed node");
            self.bump_revision();
        }

        #[cfg(feature = "unittest")]
        self.check_tree_invariants();

        removed
    }

    /// Remove every node whose record carries `identifier`.
    ///
    /// The tree is ordered by metric, so each round resolves the identifier
    /// with a full scan and then deletes by the stored key it found. Returns
    /// the number of removed nodes.
    pub fn delete_by_identifier(&mut self, identifier: &str) -> usize {
        let mut removed = 0;
        while let Some(key) = self.find_by_identifier(identifier).map(|view| view.key()) {
            self.delete(key);
            removed += 1;
        }
        removed
    }

    /// Remove the node found by [`Self::find_approx`] for `key` and `tolerance`.
    pub fn delete_approx(&mut self, key: f64, tolerance: f64) -> Option<Record> {
        let stored = self.find_approx(key, tolerance)?.key();
        self.delete(stored)
    }

    /// Recursive delete implementation.
    ///
    /// Returns the new root of the subtree, `None` when it became empty.
    /// `removed` receives the record of the node whose key matched.
    fn node_delete(
        nodes: &mut NodeArena,
        node: Option<NodeIndex>,
        key: f64,
        removed: &mut Option<Record>,
    ) -> Option<NodeIndex> {
        let node_idx = node?;
        let node_key = nodes[node_idx].key;

        if key < node_key {
            let left = nodes[node_idx].left;
            let new_left = Self::node_delete(nodes, left, key, removed);
            Self::set_left(nodes, node_idx, new_left);
        } else if key > node_key {
            let right = nodes[node_idx].right;
            let new_right = Self::node_delete(nodes, right, key, removed);
            Self::set_right(nodes, node_idx, new_right);
        } else if key == node_key {
            match (nodes[node_idx].left, nodes[node_idx].right) {
                (Some(_), Some(right)) => {
                    // Successor promotion: move the successor's key and record
                    // here, then splice out its now redundant cell.
                    let successor = Self::leftmost(nodes, right);
                    let successor_key = nodes[successor].key;
                    let successor_record = std::mem::take(&mut nodes[successor].record);

                    let node = &mut nodes[node_idx];
                    node.key = successor_key;
                    *removed = Some(std::mem::replace(&mut node.record, successor_record));

                    let new_right = Self::node_delete(nodes, Some(right), successor_key, &mut None);
                    Self::set_right(nodes, node_idx, new_right);
                }
                (child, None) | (None, child) => {
                    let parent = nodes[node_idx].parent;
                    if let Some(child) = child {
                        nodes[child].parent = parent;
                    }
                    *removed = Some(nodes.remove(node_idx).record);
                    return child;
                }
            }
        } else {
            // NaN matches nothing.
            return Some(node_idx);
        }

        Some(Self::balance_node(nodes, node_idx))
    }

    fn set_left(nodes: &mut NodeArena, node_idx: NodeIndex, child: Option<NodeIndex>) {
        nodes[node_idx].left = child;
        if let Some(child) = child {
            nodes[child].parent = Some(node_idx);
        }
    }

    fn set_right(nodes: &mut NodeArena, node_idx: NodeIndex, child: Option<NodeIndex>) {
        nodes[node_idx].right = child;
        if let Some(child) = child {
            nodes[child].parent = Some(node_idx);
        }
    }

    /// The leftmost node of the subtree rooted at `node_idx`.
    fn leftmost(nodes: &NodeArena, mut node_idx: NodeIndex) -> NodeIndex {
        while let Some(left) = nodes[node_idx].left {
            node_idx = left;
        }
        node_idx
    }
}
