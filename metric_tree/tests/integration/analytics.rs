/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Tests for the full-scan filters over the yearly series.

use metric_tree::{AnalyticsError, MetricTree};

use crate::helpers::{perfect_tree, record};

/// ```text
///      B(2)
///     /    \
///   A(1)   C(3)
///             \
///             D(4)
/// ```
///
/// | node | 1990 | 2000 | 2010    |
/// |------|------|------|---------|
/// | A    | 1.0  |      | missing |
/// | B    | 2.0  |      |         |
/// | C    | 3.0  | 5.0  |         |
/// | D    |      | 1.0  |         |
fn series_tree() -> MetricTree {
    let mut tree = MetricTree::new();
    tree.insert(1.0, record("A", 1.0).with_series([(1990, Some(1.0)), (2010, None)]));
    tree.insert(2.0, record("B", 2.0).with_series([(1990, Some(2.0))]));
    tree.insert(3.0, record("C", 3.0).with_series([(1990, Some(3.0)), (2000, Some(5.0))]));
    tree.insert(4.0, record("D", 4.0).with_series([(2000, Some(1.0))]));
    tree
}

#[test]
fn test_above_year_average() {
    let tree = series_tree();

    let above = tree.above_year_average(1990).unwrap();
    assert_eq!(above.len(), 1);
    assert_eq!(above[0].node.identifier(), "C");
    assert_eq!(above[0].value, 3.0);
    assert_eq!(above[0].reference, 2.0);

    let above = tree.above_year_average(2000).unwrap();
    assert_eq!(above.len(), 1);
    assert_eq!(above[0].node.identifier(), "C");
    assert_eq!(above[0].reference, 3.0);
}

#[test]
fn test_above_year_average_without_measurements() {
    let tree = series_tree();
    assert!(tree.above_year_average(2010).unwrap().is_empty());
    assert!(tree.above_year_average(1961).unwrap().is_empty());
    assert!(MetricTree::new().above_year_average(1990).unwrap().is_empty());
}

#[test]
fn test_year_out_of_range() {
    let tree = series_tree();
    for year in [1960, 2023, -5, 70_000] {
        assert_eq!(
            tree.above_year_average(year).unwrap_err(),
            AnalyticsError::YearOutOfRange {
                year,
                min: 1961,
                max: 2022
            }
        );
        assert!(tree.below_global_average(year).is_err());
    }

    // The range is checked even when the tree is empty.
    assert!(MetricTree::new().above_year_average(1900).is_err());
}

#[test]
fn test_year_out_of_range_message() {
    let err = series_tree().below_global_average(1960).unwrap_err();
    assert_eq!(
        err.to_string(),
        "year 1960 is outside the supported range 1961..=2022"
    );
}

#[test]
fn test_global_mean() {
    assert_eq!(series_tree().global_mean(), Some(12.0 / 5.0));
    assert_eq!(MetricTree::new().global_mean(), None);
    // Records without any series contribute nothing.
    assert_eq!(perfect_tree().global_mean(), None);
}

#[test]
fn test_below_global_average() {
    let tree = series_tree();

    // Global mean is 2.4; results come in pre-order.
    let below = tree.below_global_average(1990).unwrap();
    let identifiers: Vec<_> = below.iter().map(|hit| hit.node.identifier()).collect();
    assert_eq!(identifiers, ["B", "A"]);
    assert!(below.iter().all(|hit| hit.reference == 12.0 / 5.0));

    let below = tree.below_global_average(2000).unwrap();
    assert_eq!(below.len(), 1);
    assert_eq!(below[0].node.identifier(), "D");
    assert_eq!(below[0].value, 1.0);

    assert!(tree.below_global_average(2010).unwrap().is_empty());
}

#[test]
fn test_at_least() {
    let tree = perfect_tree();

    let matches = tree.at_least(7.0);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].node.identifier(), "G");
    assert_eq!(matches[0].key, 7.0);

    let identifiers: Vec<_> = tree
        .at_least(4.5)
        .iter()
        .map(|hit| hit.node.identifier())
        .collect();
    assert_eq!(identifiers, ["F", "E", "G"]);

    assert_eq!(tree.at_least(f64::NEG_INFINITY).len(), 7);
    assert!(tree.at_least(7.5).is_empty());
}
