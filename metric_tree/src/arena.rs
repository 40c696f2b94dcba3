/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Arena storage for metric tree nodes.
//!
//! Nodes refer to each other through [`NodeIndex`] handles instead of owning
//! pointers, so parent back-references are plain indices and rotations
//! become index reassignments. Slot reuse and generation tracking are
//! delegated to [`slotmap`].

use std::ops::{Index, IndexMut};

use slotmap::{DefaultKey, SlotMap};

use crate::MetricNode;

/// Handle to a node stored in the arena.
///
/// Wraps a [`slotmap::DefaultKey`]. It stays valid across rotations and
/// across the removal of other nodes, and becomes stale once the node it
/// points to is removed, even if a later insertion reuses the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct NodeIndex(DefaultKey);

impl NodeIndex {
    /// Return the underlying [`DefaultKey`].
    pub const fn key(self) -> DefaultKey {
        self.0
    }
}

impl From<DefaultKey> for NodeIndex {
    fn from(key: DefaultKey) -> Self {
        Self(key)
    }
}

/// Arena storage for [`MetricNode`]s.
///
/// A newtype around [`SlotMap<DefaultKey, MetricNode>`] indexed by
/// [`NodeIndex`].
#[derive(Debug, Default)]
pub(crate) struct NodeArena {
    nodes: SlotMap<DefaultKey, MetricNode>,
}

impl NodeArena {
    /// Create a new empty arena.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::new(),
        }
    }

    /// Number of nodes currently stored.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Insert a node, returning its index.
    ///
    /// # Panics
    ///
    /// Panics if the arena exceeds its maximum capacity.
    pub fn insert(&mut self, node: MetricNode) -> NodeIndex {
        NodeIndex(self.nodes.insert(node))
    }

    /// Remove a node, returning it.
    ///
    /// # Panics
    ///
    /// Panics if the index is stale.
    pub fn remove(&mut self, idx: NodeIndex) -> MetricNode {
        self.nodes.remove(idx.key()).expect("stale node index")
    }

    /// Get a reference to a node, if the handle is still live.
    pub fn get(&self, idx: NodeIndex) -> Option<&MetricNode> {
        self.nodes.get(idx.key())
    }

    /// Iterate over all nodes in slot order (not tree order).
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &MetricNode)> {
        self.nodes.iter().map(|(key, node)| (NodeIndex(key), node))
    }
}

impl Index<NodeIndex> for NodeArena {
    type Output = MetricNode;

    fn index(&self, idx: NodeIndex) -> &Self::Output {
        &self.nodes[idx.key()]
    }
}

impl IndexMut<NodeIndex> for NodeArena {
    fn index_mut(&mut self, idx: NodeIndex) -> &mut Self::Output {
        &mut self.nodes[idx.key()]
    }
}
