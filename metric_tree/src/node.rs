/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! MetricNode - A cell of the metric tree.

use crate::Record;
use crate::arena::NodeIndex;

/// A node in the metric tree.
///
/// Links are [`NodeIndex`] handles into the tree's arena. The key is the
/// record's metric, possibly perturbed to keep keys strictly ordered, so it
/// can differ from [`Record::metric`].
#[derive(Debug)]
pub struct MetricNode {
    pub(crate) key: f64,
    pub(crate) record: Record,
    pub(crate) left: Option<NodeIndex>,
    pub(crate) right: Option<NodeIndex>,
    pub(crate) parent: Option<NodeIndex>,
    /// Height of the subtree rooted here. 1 for a leaf.
    pub(crate) height: u32,
}

impl MetricNode {
    pub(crate) const fn new(key: f64, record: Record, parent: Option<NodeIndex>) -> Self {
        Self {
            key,
            record,
            left: None,
            right: None,
            parent,
            height: 1,
        }
    }

    /// The stored key.
    pub const fn key(&self) -> f64 {
        self.key
    }

    /// The attached record.
    pub const fn record(&self) -> &Record {
        &self.record
    }

    /// Index of the left child, if any.
    pub const fn left_index(&self) -> Option<NodeIndex> {
        self.left
    }

    /// Index of the right child, if any.
    pub const fn right_index(&self) -> Option<NodeIndex> {
        self.right
    }

    /// Index of the parent, `None` for the root.
    pub const fn parent_index(&self) -> Option<NodeIndex> {
        self.parent
    }

    /// Cached height of the subtree rooted at this node.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Returns `true` if the node has no children.
    pub const fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}
