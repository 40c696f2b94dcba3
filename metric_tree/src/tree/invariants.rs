/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Structural invariant checks for the metric tree.
//!
//! With the `unittest` feature enabled these run after every mutation
//! (`insert`, `delete`) to catch violations early. Tests may also call
//! [`MetricTree::check_tree_invariants`] directly.

use std::collections::HashSet;

use super::MetricTree;
use crate::arena::NodeIndex;

impl MetricTree {
    /// Verify all structural invariants of the tree.
    ///
    /// Checks that keys are strictly ordered, that cached heights are exact,
    /// that every balance factor is within `-1..=1`, that child and parent
    /// links agree, and that every node stored in the arena is reachable from
    /// the root exactly once.
    ///
    /// # Panics
    ///
    /// Panics with a descriptive message if any invariant is violated.
    pub fn check_tree_invariants(&self) {
        let mut reachable = HashSet::with_capacity(self.len());

        if let Some(root) = self.root {
            assert_eq!(
                self.nodes[root].parent, None,
                "root {root:?} has a parent link"
            );
            self.check_node_invariants(root, None, None, &mut reachable);
        }

        assert_eq!(
            reachable.len(),
            self.nodes.len(),
            "arena holds {} nodes but {} are reachable from the root",
            self.nodes.len(),
            reachable.len(),
        );
        for (idx, node) in self.nodes.iter() {
            assert!(
                reachable.contains(&idx),
                "node {idx:?} (key {}) is not reachable from the root",
                node.key,
            );
        }
    }

    /// Recursively check the subtree rooted at `node_idx`, whose keys must lie
    /// strictly between `lower` and `upper`.
    ///
    /// Returns the height of the subtree.
    fn check_node_invariants(
        &self,
        node_idx: NodeIndex,
        lower: Option<f64>,
        upper: Option<f64>,
        reachable: &mut HashSet<NodeIndex>,
    ) -> u32 {
        assert!(
            reachable.insert(node_idx),
            "node {node_idx:?} is reachable twice"
        );
        let node = &self.nodes[node_idx];
        let key = node.key;

        // --- Invariant 1: strict key ordering ---
        if let Some(lower) = lower {
            assert!(
                key > lower,
                "key {key} at node {node_idx:?} must be > {lower} (left ancestor bound)"
            );
        }
        if let Some(upper) = upper {
            assert!(
                key < upper,
                "key {key} at node {node_idx:?} must be < {upper} (right ancestor bound)"
            );
        }

        // --- Invariant 2: parent links ---
        for child in [node.left, node.right].into_iter().flatten() {
            assert_eq!(
                self.nodes[child].parent,
                Some(node_idx),
                "child {child:?} of node {node_idx:?} does not link back to it"
            );
        }

        let left_height = match node.left {
            Some(left) => self.check_node_invariants(left, lower, Some(key), reachable),
            None => 0,
        };
        let right_height = match node.right {
            Some(right) => self.check_node_invariants(right, Some(key), upper, reachable),
            None => 0,
        };

        // --- Invariant 3: cached height ---
        let expected_height = left_height.max(right_height) + 1;
        assert_eq!(
            node.height, expected_height,
            "height mismatch at node {node_idx:?}: stored {}, expected {expected_height} \
             (left={left_height}, right={right_height})",
            node.height,
        );

        // --- Invariant 4: AVL balance ---
        let balance = right_height as i64 - left_height as i64;
        assert!(
            (-1..=1).contains(&balance),
            "balance factor {balance} out of range at node {node_idx:?} \
             (left={left_height}, right={right_height})"
        );

        expected_height
    }
}
