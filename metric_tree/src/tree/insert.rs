/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Write path: insertion.
//!
//! Adding a record resolves a unique key for it, descends to the empty slot
//! where that key belongs, and rebalances every ancestor on the way back up.

use tracing::debug;

use super::{MetricTree, normalize_key};
use crate::arena::{NodeArena, NodeIndex};
use crate::{MetricNode, Record};

impl MetricTree {
    /// Insert `record` under `metric`, returning the handle of the new node.
    ///
    /// Insertion never fails. When `metric` collides with a stored key the new
    /// node is stored under a slightly larger key instead, see
    /// [`Self::resolve_key`]. The record itself is not modified, so the true
    /// value stays available as [`Record::metric`].
    ///
    /// The returned handle stays valid through the rotations performed by this
    /// and later insertions, until the node is removed.
    ///
    /// # Panics
    ///
    /// Panics if `metric` is NaN or infinite. Records without a well-defined
    /// metric must be filtered out before they reach the tree.
    pub fn insert(&mut self, metric: f64, record: Record) -> NodeIndex {
        assert!(metric.is_finite(), "cannot index a non-finite metric: {metric}");

        let key = self.resolve_key(metric);
        if key != metric {
            debug!(
                identifier = %record.identifier,
                metric,
                key,
                "metric collides with a stored key, perturbed"
            );
        }

        let mut inserted = None;
        let root = Self::node_insert(&mut self.nodes, self.root, None, key, record, &mut inserted);
        self.root = Some(root);
        self.bump_revision();

        #[cfg(feature = "unittest")]
        self.check_tree_invariants();

        inserted.expect("insertion always creates a node")
    }

    /// Find the key a new node for `metric` will be stored under.
    ///
    /// The `n`-th collision yields `metric + n * PERTURBATION_EPSILON`. The
    /// offset is always derived from the original metric rather than from the
    /// previous candidate, so repeated collisions don't accumulate rounding.
    /// Where the epsilon is below the float resolution at `metric`, the next
    /// representable value above the previous candidate is used instead.
    ///
    /// The key is fixed before the structural descent, so the descent never
    /// meets an equal key and the BST ordering stays strict even when a
    /// nearby key sits on the path.
    fn resolve_key(&self, metric: f64) -> f64 {
        let metric = normalize_key(metric);
        let mut candidate = metric;
        let mut collisions = 0u32;
        while self.find_index(candidate).is_some() {
            collisions += 1;
            let next = metric + f64::from(collisions) * Self::PERTURBATION_EPSILON;
            candidate = if next > candidate {
                next
            } else {
                candidate.next_up()
            };
            assert!(
                candidate.is_finite(),
                "no finite key left above {metric}"
            );
        }
        candidate
    }

    /// Recursive insert implementation.
    ///
    /// Returns the root of the rebalanced subtree, which the caller stores in
    /// the slot it descended through. `inserted` receives the new node's index.
    fn node_insert(
        nodes: &mut NodeArena,
        node: Option<NodeIndex>,
        parent: Option<NodeIndex>,
        key: f64,
        record: Record,
        inserted: &mut Option<NodeIndex>,
    ) -> NodeIndex {
        let Some(node_idx) = node else {
            let idx = nodes.insert(MetricNode::new(key, record, parent));
            *inserted = Some(idx);
            return idx;
        };

        let node_key = nodes[node_idx].key;
        debug_assert_ne!(key, node_key, "insertion key must be unique");
        if key < node_key {
            let left = nodes[node_idx].left;
            let new_left = Self::node_insert(nodes, left, Some(node_idx), key, record, inserted);
            nodes[node_idx].left = Some(new_left);
            nodes[new_left].parent = Some(node_idx);
        } else {
            let right = nodes[node_idx].right;
            let new_right = Self::node_insert(nodes, right, Some(node_idx), key, record, inserted);
            nodes[node_idx].right = Some(new_right);
            nodes[new_right].parent = Some(node_idx);
        }

        Self::balance_node(nodes, node_idx)
    }
}
