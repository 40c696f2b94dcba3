/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! MetricTree - An AVL tree indexing climate records by a scalar metric.
//!
//! Each node holds one [`Record`] keyed by its metric, the mean temperature
//! change across the record's yearly series. Nodes live in an arena and link
//! to their children and parent through [`NodeIndex`] handles.
//!
//! # Overview
//!
//! The [`MetricTree`] provides:
//!
//! - Insertion that never fails: colliding metrics are nudged by
//!   [`MetricTree::PERTURBATION_EPSILON`] so keys stay strictly ordered
//! - Deletion by stored key, with in-order successor promotion
//! - Exact, tolerance-bounded, rounded, nearest and identifier searches
//! - Structural introspection through [`NodeView`] (level, balance factor,
//!   parent, grandparent, uncle)
//! - Level-grouped traversal and whole-collection filters over the yearly
//!   series
//!
//! # Example
//!
//! ```
//! use metric_tree::{MetricTree, Record};
//!
//! let mut tree = MetricTree::new();
//! tree.insert(0.8, Record::new("ARG", "Argentina", 0.8));
//! tree.insert(1.2, Record::new("BEL", "Belgium", 1.2));
//! tree.insert(1.2, Record::new("CHE", "Switzerland", 1.2));
//!
//! // The second 1.2 was stored slightly above the first one.
//! assert_eq!(tree.find_exact(1.2).unwrap().identifier(), "BEL");
//! let che = tree.find_by_identifier("che").unwrap();
//! assert!(che.key() > 1.2);
//! assert_eq!(che.record().metric, 1.2);
//! let che_key = che.key();
//!
//! assert_eq!(tree.level_groups(), vec![vec!["BEL"], vec!["ARG", "CHE"]]);
//!
//! let removed = tree.delete(che_key).unwrap();
//! assert_eq!(removed.identifier, "CHE");
//! ```

mod arena;
mod error;
mod iter;
mod node;
mod record;
mod tree;
mod view;

pub use arena::NodeIndex;
pub use error::{AnalyticsError, Result};
pub use iter::PreOrderIter;
pub use node::MetricNode;
pub use record::{Record, SUPPORTED_YEARS, normalize_identifier};
pub use tree::{MetricLookup, MetricTree, ThresholdMatch, YearComparison};
pub use view::NodeView;
