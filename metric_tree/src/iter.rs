/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Iterator for traversing the metric tree.
//!
//! The full-scan operations (rounded and identifier searches, analytics) and
//! renderers all walk the tree through this iterator.

use crate::arena::NodeIndex;
use crate::{MetricTree, NodeView};

/// A pre-order depth-first traversal of the metric tree.
///
/// The traversal uses an explicit stack instead of recursion. Nodes are
/// visited parent first, then the left subtree, then the right subtree.
#[derive(Debug)]
pub struct PreOrderIter<'a> {
    /// Reference to the tree (used to resolve node indices).
    tree: &'a MetricTree,
    /// Stack of node indices to visit. Right children are pushed first so
    /// the left one is processed first.
    stack: Vec<NodeIndex>,
}

impl<'a> PreOrderIter<'a> {
    /// Create a new iterator starting from the root of the given tree.
    pub fn new(tree: &'a MetricTree) -> Self {
        let mut stack = Vec::with_capacity(tree.height() as usize + 1);
        stack.extend(tree.root_index());
        Self { tree, stack }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = NodeView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let node = &self.tree.nodes()[idx];
        self.stack.extend(node.right);
        self.stack.extend(node.left);
        Some(NodeView::new(self.tree, idx))
    }
}

impl<'a> IntoIterator for &'a MetricTree {
    type Item = NodeView<'a>;
    type IntoIter = PreOrderIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        PreOrderIter::new(self)
    }
}
