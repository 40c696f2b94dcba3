/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Read path: the search family.
//!
//! Exact, tolerance-bounded and nearest searches descend the tree by key.
//! Rounded and identifier searches are full pre-order scans: rounding breaks
//! the monotonicity pruning relies on, and identifiers are not the ordering
//! key at all.

use super::{MetricTree, normalize_key};
use crate::NodeView;
use crate::arena::{NodeArena, NodeIndex};

/// Outcome of [`MetricTree::lookup_metric`].
#[derive(Debug, Clone, Copy)]
pub enum MetricLookup<'a> {
    /// A node matched within tolerance or after rounding.
    Found(NodeView<'a>),
    /// Nothing matched; this is the closest node on the search path.
    Nearest(NodeView<'a>),
    /// No node can be offered: the tree is empty or the key is NaN.
    Empty,
}

impl MetricTree {
    /// Tolerance used by [`Self::lookup_metric`] when none is configured.
    pub const DEFAULT_TOLERANCE: f64 = 1e-6;

    /// Decimal places compared by the rounded fallback of [`Self::lookup_metric`].
    pub const LOOKUP_ROUNDING_DIGITS: u32 = 6;

    /// Find the node whose stored key equals `key` exactly.
    pub fn find_exact(&self, key: f64) -> Option<NodeView<'_>> {
        self.find_index(key).map(|idx| NodeView::new(self, idx))
    }

    /// Exact descent, returning the index of the matching node.
    pub(crate) fn find_index(&self, key: f64) -> Option<NodeIndex> {
        let key = normalize_key(key);
        let mut current = self.root;
        while let Some(idx) = current {
            let node = &self.nodes[idx];
            if key < node.key {
                current = node.left;
            } else if key > node.key {
                current = node.right;
            } else if normalize_key(node.key).to_bits() == key.to_bits() {
                return Some(idx);
            } else {
                return None;
            }
        }
        None
    }

    /// Find a node whose key lies within `tolerance` of `key`.
    ///
    /// An exact match wins. Otherwise the tree is descended against the band
    /// `[key - tolerance, key + tolerance]`: a node inside the band is
    /// accepted, a band entirely on one side of the node's key continues into
    /// that subtree only, and a band straddling the key searches the left
    /// subtree, then the right one. Perturbed duplicates sit a few epsilons
    /// away from their original metric, so this finds them where an exact
    /// search cannot.
    ///
    /// A negative or NaN tolerance is treated as zero.
    pub fn find_approx(&self, key: f64, tolerance: f64) -> Option<NodeView<'_>> {
        if let Some(idx) = self.find_index(key) {
            return Some(NodeView::new(self, idx));
        }

        let tolerance = if tolerance > 0.0 { tolerance } else { 0.0 };
        Self::find_in_band(&self.nodes, self.root, key, tolerance).map(|idx| NodeView::new(self, idx))
    }

    fn find_in_band(
        nodes: &NodeArena,
        node: Option<NodeIndex>,
        key: f64,
        tolerance: f64,
    ) -> Option<NodeIndex> {
        let node_idx = node?;
        let node = &nodes[node_idx];

        if (node.key - key).abs() <= tolerance {
            return Some(node_idx);
        }
        if key < node.key - tolerance {
            return Self::find_in_band(nodes, node.left, key, tolerance);
        }
        if key > node.key + tolerance {
            return Self::find_in_band(nodes, node.right, key, tolerance);
        }

        Self::find_in_band(nodes, node.left, key, tolerance)
            .or_else(|| Self::find_in_band(nodes, node.right, key, tolerance))
    }

    /// Find the first node, in pre-order, whose key rounded to `digits`
    /// decimal places equals `key` rounded the same way.
    ///
    /// This scans the whole tree.
    pub fn find_rounded(&self, key: f64, digits: u32) -> Option<NodeView<'_>> {
        let target = round_to(key, digits);
        self.iter().find(|view| round_to(view.key(), digits) == target)
    }

    /// Find the closest node along the exact-search path for `key`.
    ///
    /// Every node visited by the descent is a candidate and the one with the
    /// smallest `|node.key - key|` is returned, the earliest on ties. Nodes off
    /// the path are never considered. Since keys are strictly ordered, the
    /// in-order neighbours of `key` both lie on that path.
    ///
    /// A NaN `key` has no distance to any node and yields `None`.
    pub fn find_nearest(&self, key: f64) -> Option<NodeView<'_>> {
        if key.is_nan() {
            return None;
        }
        let mut best: Option<(NodeIndex, f64)> = None;
        let mut current = self.root;
        while let Some(idx) = current {
            let node = &self.nodes[idx];
            let distance = (node.key - key).abs();
            if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                best = Some((idx, distance));
            }
            current = if key < node.key { node.left } else { node.right };
        }
        best.map(|(idx, _)| NodeView::new(self, idx))
    }

    /// Find the first node, in pre-order, whose record identifier matches.
    ///
    /// Identifiers are compared trimmed and ASCII case-insensitively. This
    /// scans the whole tree.
    pub fn find_by_identifier(&self, identifier: &str) -> Option<NodeView<'_>> {
        self.iter()
            .find(|view| view.record().matches_identifier(identifier))
    }

    /// Resolve a user-supplied metric the way an interactive lookup does.
    ///
    /// Tries [`Self::find_approx`] with `tolerance`, then
    /// [`Self::find_rounded`] with [`Self::LOOKUP_ROUNDING_DIGITS`], and falls
    /// back to [`Self::find_nearest`].
    pub fn lookup_metric(&self, key: f64, tolerance: f64) -> MetricLookup<'_> {
        if let Some(view) = self
            .find_approx(key, tolerance)
            .or_else(|| self.find_rounded(key, Self::LOOKUP_ROUNDING_DIGITS))
        {
            return MetricLookup::Found(view);
        }
        match self.find_nearest(key) {
            Some(view) => MetricLookup::Nearest(view),
            None => MetricLookup::Empty,
        }
    }
}

/// Round `value` to `digits` decimal places, halves away from zero.
///
/// Beyond 15 digits an `f64` carries no further decimal precision and the
/// value is returned unchanged.
fn round_to(value: f64, digits: u32) -> f64 {
    if digits > 15 {
        return value;
    }
    let factor = 10f64.powi(digits as i32);
    let rounded = (value * factor).round() / factor;
    if rounded.is_finite() { rounded } else { value }
}
