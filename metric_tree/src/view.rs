/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Read-only views of tree nodes.

use std::fmt;

use crate::arena::NodeIndex;
use crate::{MetricNode, MetricTree, Record};

/// A read-only handle to a node, borrowing the tree.
///
/// Views are what searches return and what renderers walk. Because a view
/// borrows the tree, none can be held across a structural mutation; use
/// [`NodeView::index`] together with [`MetricTree::view`] to come back to a
/// node later.
#[derive(Clone, Copy)]
pub struct NodeView<'a> {
    tree: &'a MetricTree,
    idx: NodeIndex,
}

impl<'a> NodeView<'a> {
    pub(crate) const fn new(tree: &'a MetricTree, idx: NodeIndex) -> Self {
        Self { tree, idx }
    }

    fn at(&self, idx: Option<NodeIndex>) -> Option<NodeView<'a>> {
        idx.map(|idx| NodeView::new(self.tree, idx))
    }

    /// The arena handle of this node.
    pub const fn index(&self) -> NodeIndex {
        self.idx
    }

    /// The underlying node.
    pub fn node(&self) -> &'a MetricNode {
        &self.tree.nodes()[self.idx]
    }

    /// The stored key. May differ from [`Record::metric`] after perturbation.
    pub fn key(&self) -> f64 {
        self.node().key
    }

    /// The attached record.
    pub fn record(&self) -> &'a Record {
        &self.node().record
    }

    /// The record's identifier, e.g. an ISO3 country code.
    pub fn identifier(&self) -> &'a str {
        &self.node().record.identifier
    }

    /// The record's display name.
    pub fn name(&self) -> &'a str {
        &self.node().record.name
    }

    /// Height of the subtree rooted here, 1 for a leaf.
    pub fn height(&self) -> u32 {
        self.node().height
    }

    /// Right subtree height minus left subtree height.
    pub fn balance_factor(&self) -> i32 {
        self.tree.balance_factor(self.idx)
    }

    /// Number of edges between this node and the root.
    pub fn level(&self) -> usize {
        self.tree.level(self.idx)
    }

    /// The left child.
    pub fn left(&self) -> Option<NodeView<'a>> {
        self.at(self.node().left)
    }

    /// The right child.
    pub fn right(&self) -> Option<NodeView<'a>> {
        self.at(self.node().right)
    }

    /// The parent, `None` for the root.
    pub fn parent(&self) -> Option<NodeView<'a>> {
        self.at(self.node().parent)
    }

    /// The parent's parent.
    pub fn grandparent(&self) -> Option<NodeView<'a>> {
        self.parent()?.parent()
    }

    /// The sibling of this node's parent.
    pub fn uncle(&self) -> Option<NodeView<'a>> {
        let parent = self.parent()?;
        let grandparent = parent.parent()?.node();
        let uncle = if grandparent.left == Some(parent.idx) {
            grandparent.right
        } else {
            grandparent.left
        };
        self.at(uncle)
    }
}

impl PartialEq for NodeView<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.idx == other.idx
    }
}

impl fmt::Debug for NodeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeView")
            .field("index", &self.idx)
            .field("identifier", &self.identifier())
            .field("key", &self.key())
            .field("height", &self.height())
            .finish()
    }
}
