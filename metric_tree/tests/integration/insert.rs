/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Tests for insertion, rebalancing and duplicate-key perturbation.

use metric_tree::MetricTree;

use crate::helpers::{build_tree, record};

const EPSILON: f64 = MetricTree::PERTURBATION_EPSILON;

#[test]
fn test_new_tree() {
    let tree = MetricTree::new();
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.height(), 0);
    assert!(tree.root().is_none());
    assert_eq!(tree.revision_id(), 0);
    tree.check_tree_invariants();
}

#[test]
fn test_insert_single() {
    let mut tree = MetricTree::new();
    let idx = tree.insert(0.5, record("ARG", 0.5));

    assert_eq!(tree.len(), 1);
    assert_eq!(tree.height(), 1);
    assert_eq!(tree.root_index(), Some(idx));
    assert_eq!(tree.revision_id(), 1);

    let root = tree.root().unwrap();
    assert_eq!(root.key(), 0.5);
    assert_eq!(root.identifier(), "ARG");
    assert_eq!(root.level(), 0);
    assert!(root.parent().is_none());
}

#[test]
fn test_ascending_inserts_stay_balanced() {
    let keys: Vec<f64> = (1..=7).map(f64::from).collect();
    let tree = build_tree(&keys);

    assert_eq!(tree.height(), 3);
    assert_eq!(tree.root().unwrap().key(), 4.0);
    assert_eq!(tree.keys_in_order(), keys);
}

#[test]
fn test_descending_inserts_stay_balanced() {
    let keys: Vec<f64> = (1..=15).rev().map(f64::from).collect();
    let tree = build_tree(&keys);

    assert_eq!(tree.height(), 4);
    assert_eq!(tree.root().unwrap().key(), 8.0);
}

#[test]
fn test_rotation_cases() {
    // Left-left, right-right, left-right, right-left.
    for keys in [[3.0, 2.0, 1.0], [1.0, 2.0, 3.0], [3.0, 1.0, 2.0], [1.0, 3.0, 2.0]] {
        let tree = build_tree(&keys);
        let root = tree.root().unwrap();
        assert_eq!(root.key(), 2.0, "insertion order {keys:?}");
        assert_eq!(root.left().unwrap().key(), 1.0, "insertion order {keys:?}");
        assert_eq!(root.right().unwrap().key(), 3.0, "insertion order {keys:?}");
        assert_eq!(tree.height(), 2);
    }
}

#[test]
fn test_handle_survives_rotations() {
    let mut tree = MetricTree::new();
    let first = tree.insert(1.0, record("A", 1.0));
    tree.insert(2.0, record("B", 2.0));
    tree.insert(3.0, record("C", 3.0));

    // The rotation made B the root, A keeps its slot.
    assert_eq!(tree.root().unwrap().identifier(), "B");
    let view = tree.view(first).unwrap();
    assert_eq!(view.identifier(), "A");
    assert_eq!(view.parent().unwrap().identifier(), "B");
}

#[test]
fn test_duplicate_metric_is_perturbed() {
    let mut tree = MetricTree::new();
    let first = tree.insert(12.345, record("AAA", 12.345));
    let second = tree.insert(12.345, record("BBB", 12.345));
    tree.check_tree_invariants();

    assert_eq!(tree.len(), 2);
    assert_ne!(first, second);
    assert_eq!(tree.node(first).unwrap().key(), 12.345);
    assert_eq!(tree.node(second).unwrap().key(), 12.345 + EPSILON);

    // The record keeps the true metric.
    assert_eq!(tree.node(second).unwrap().record().metric, 12.345);

    // Only the first one is reachable by exact search on the unperturbed value.
    assert_eq!(tree.find_exact(12.345).unwrap().identifier(), "AAA");
    assert_eq!(tree.find_exact(12.345 + EPSILON).unwrap().identifier(), "BBB");

    // Both are reachable by tolerance search.
    assert!(tree.find_approx(12.345, 1e-6).is_some());
    assert_eq!(
        tree.find_approx(12.345 + EPSILON, 1e-6).unwrap().identifier(),
        "BBB"
    );
}

#[test]
fn test_repeated_duplicates_are_offset_from_original_metric() {
    let mut tree = MetricTree::new();
    for identifier in ["A", "B", "C", "D"] {
        tree.insert(0.75, record(identifier, 0.75));
    }
    tree.check_tree_invariants();

    assert_eq!(
        tree.keys_in_order(),
        vec![0.75, 0.75 + EPSILON, 0.75 + 2.0 * EPSILON, 0.75 + 3.0 * EPSILON]
    );
}

#[test]
fn test_perturbation_reuses_freed_offsets() {
    let mut tree = MetricTree::new();
    tree.insert(1.0, record("A", 1.0));
    tree.insert(1.0, record("B", 1.0));
    assert_eq!(tree.delete(1.0).unwrap().identifier, "A");

    // The original key is free again, so no perturbation is needed.
    let c = tree.insert(1.0, record("C", 1.0));
    assert_eq!(tree.node(c).unwrap().key(), 1.0);

    // 1.0 and 1.0 + eps are both taken now.
    let d = tree.insert(1.0, record("D", 1.0));
    assert_eq!(tree.node(d).unwrap().key(), 1.0 + 2.0 * EPSILON);
    tree.check_tree_invariants();
}

#[test]
fn test_perturbation_keeps_order_with_nearby_ancestor() {
    // The root sits between 1.0 and 1.0 + eps. A perturbed 1.0 must still
    // land in the root's right subtree.
    let mut tree = MetricTree::new();
    tree.insert(1.0 + EPSILON / 2.0, record("ROOT", 1.0 + EPSILON / 2.0));
    tree.insert(1.0, record("A", 1.0));
    let b = tree.insert(1.0, record("B", 1.0));
    tree.check_tree_invariants();

    let b = tree.view(b).unwrap();
    assert!(b.key() > 1.0 + EPSILON / 2.0);
    let keys = tree.keys_in_order();
    assert!(keys.windows(2).all(|pair| pair[0] < pair[1]), "{keys:?}");
}

#[test]
fn test_perturbation_below_float_resolution() {
    // At 1e9 an epsilon of 1e-9 is lost to rounding; the next representable
    // value is used instead.
    let metric = 1e9;
    let mut tree = MetricTree::new();
    tree.insert(metric, record("A", metric));
    tree.insert(metric, record("B", metric));
    tree.insert(metric, record("C", metric));
    tree.check_tree_invariants();

    let keys = tree.keys_in_order();
    assert_eq!(keys[0], metric);
    assert_eq!(keys[1], metric.next_up());
    assert_eq!(keys[2], metric.next_up().next_up());
}

#[test]
fn test_negative_zero_collides_with_zero() {
    let mut tree = MetricTree::new();
    tree.insert(0.0, record("A", 0.0));
    tree.insert(-0.0, record("B", -0.0));
    tree.check_tree_invariants();

    assert_eq!(tree.keys_in_order(), vec![0.0, EPSILON]);
}

#[test]
#[should_panic(expected = "non-finite metric")]
fn test_nan_metric_panics() {
    let mut tree = MetricTree::new();
    tree.insert(f64::NAN, record("NAN", f64::NAN));
}

#[test]
fn test_revision_id_counts_structural_changes() {
    let mut tree = build_tree(&[1.0, 2.0, 3.0]);
    assert_eq!(tree.revision_id(), 3);

    tree.delete(42.0);
    assert_eq!(tree.revision_id(), 3);

    tree.delete(2.0);
    assert_eq!(tree.revision_id(), 4);
}
