/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Rotations and the AVL rebalance policy.
//!
//! These functions operate on the arena directly. Each returns the index of
//! the (possibly new) subtree root; the caller is responsible for storing it
//! in the parent's child slot, or as the tree root.

use tracing::trace;

use super::{MetricTree, balance_factor, update_height};
use crate::arena::{NodeArena, NodeIndex};

impl MetricTree {
    /// Left rotation around `x`.
    ///
    /// ```text
    ///     x                y
    ///    / \              / \
    ///   a   y     =>     x   c
    ///      / \          / \
    ///     b   c        a   b
    /// ```
    ///
    /// `y` inherits `x`'s parent link, `b` becomes `x`'s right subtree. Heights
    /// are recomputed for `x`, then `y`.
    ///
    /// # Panics
    ///
    /// Panics if `x` has no right child.
    pub(super) fn rotate_left(nodes: &mut NodeArena, x: NodeIndex) -> NodeIndex {
        let y = nodes[x]
            .right
            .expect("Cannot rotate left without right child");
        let b = nodes[y].left;

        nodes[y].left = Some(x);
        nodes[y].parent = nodes[x].parent;
        nodes[x].parent = Some(y);
        nodes[x].right = b;
        if let Some(b) = b {
            nodes[b].parent = Some(x);
        }

        update_height(nodes, x);
        update_height(nodes, y);
        y
    }

    /// Right rotation around `y`, the mirror of [`Self::rotate_left`].
    ///
    /// # Panics
    ///
    /// Panics if `y` has no left child.
    pub(super) fn rotate_right(nodes: &mut NodeArena, y: NodeIndex) -> NodeIndex {
        let x = nodes[y]
            .left
            .expect("Cannot rotate right without left child");
        let b = nodes[x].right;

        nodes[x].right = Some(y);
        nodes[x].parent = nodes[y].parent;
        nodes[y].parent = Some(x);
        nodes[y].left = b;
        if let Some(b) = b {
            nodes[b].parent = Some(y);
        }

        update_height(nodes, y);
        update_height(nodes, x);
        x
    }

    /// Restore the AVL balance of the subtree rooted at `node_idx`.
    ///
    /// Called on every ancestor of a changed position, bottom-up. The height of
    /// the node is recomputed first, then:
    ///
    /// - **Right-heavy** (balance factor > 1): a right-left shape is first
    ///   turned into a right-right one by rotating the right child right, then
    ///   the node is rotated left.
    /// - **Left-heavy** (balance factor < -1): the mirror image.
    ///
    /// Returns the new root of the subtree.
    #[must_use]
    pub(super) fn balance_node(nodes: &mut NodeArena, node_idx: NodeIndex) -> NodeIndex {
        update_height(nodes, node_idx);
        let balance = balance_factor(nodes, node_idx);

        if balance > 1 {
            let right = nodes[node_idx].right.expect("right-heavy node has a right child");
            if balance_factor(nodes, right) < 0 {
                trace!(key = nodes[node_idx].key, "right-left rotation");
                let new_right = Self::rotate_right(nodes, right);
                nodes[node_idx].right = Some(new_right);
                nodes[new_right].parent = Some(node_idx);
            } else {
                trace!(key = nodes[node_idx].key, "left rotation");
            }
            return Self::rotate_left(nodes, node_idx);
        }

        if balance < -1 {
            let left = nodes[node_idx].left.expect("left-heavy node has a left child");
            if balance_factor(nodes, left) > 0 {
                trace!(key = nodes[node_idx].key, "left-right rotation");
                let new_left = Self::rotate_left(nodes, left);
                nodes[node_idx].left = Some(new_left);
                nodes[new_left].parent = Some(node_idx);
            } else {
                trace!(key = nodes[node_idx].key, "right rotation");
            }
            return Self::rotate_right(nodes, node_idx);
        }

        node_idx
    }
}
