/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Property-based tests for the metric tree using `proptest`.

#[cfg(not(miri))]
mod proptests {
    use itertools::Itertools;
    use metric_tree::{MetricTree, Record};
    use proptest::prelude::*;

    /// Metrics drawn from a small grid so that collisions are frequent.
    fn colliding_metrics(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
        proptest::collection::vec((0u8..24).prop_map(|v| f64::from(v) * 0.25 - 3.0), 1..max_len)
    }

    fn insert_all(tree: &mut MetricTree, metrics: &[f64]) -> Vec<f64> {
        metrics
            .iter()
            .enumerate()
            .map(|(i, metric)| {
                let idx = tree.insert(*metric, Record::new(format!("R{i}"), "", *metric));
                tree.check_tree_invariants();
                tree.node(idx).unwrap().key()
            })
            .collect()
    }

    proptest! {
        #[test]
        fn prop_invariants_hold_after_every_insert(
            metrics in colliding_metrics(300)
        ) {
            let mut tree = MetricTree::new();
            insert_all(&mut tree, &metrics);

            prop_assert_eq!(tree.len(), metrics.len());
            let keys = tree.keys_in_order();
            prop_assert!(keys.iter().tuple_windows().all(|(a, b)| a < b));
        }

        #[test]
        fn prop_keys_stay_close_to_their_metric(
            metrics in colliding_metrics(200)
        ) {
            let mut tree = MetricTree::new();
            let keys = insert_all(&mut tree, &metrics);

            for (metric, key) in metrics.iter().zip(&keys) {
                prop_assert!(key >= metric);
                prop_assert!(key - metric < 1e-6, "key {} drifted from {}", key, metric);
                prop_assert_eq!(tree.find_exact(*key).unwrap().record().metric, *metric);
            }
        }

        #[test]
        fn prop_delete_everything_in_any_order(
            (metrics, order) in colliding_metrics(200).prop_flat_map(|metrics| {
                let len = metrics.len();
                (Just(metrics), Just((0..len).collect::<Vec<_>>()).prop_shuffle())
            })
        ) {
            let mut tree = MetricTree::new();
            let keys = insert_all(&mut tree, &metrics);

            for (deleted, i) in order.iter().enumerate() {
                let removed = tree.delete(keys[*i]);
                prop_assert_eq!(removed.map(|record| record.identifier), Some(format!("R{i}")));
                tree.check_tree_invariants();
                prop_assert_eq!(tree.len(), metrics.len() - deleted - 1);
            }
            prop_assert!(tree.is_empty());
            prop_assert!(tree.root().is_none());
        }

        #[test]
        fn prop_find_exact_after_insert(
            metrics in proptest::collection::hash_set(-1_000_000i32..1_000_000, 1..200),
            probe in -1_000_000i32..1_000_000,
        ) {
            let metrics: Vec<f64> = metrics.into_iter().map(|v| f64::from(v) / 100.0).collect();
            let mut tree = MetricTree::new();
            insert_all(&mut tree, &metrics);

            for metric in &metrics {
                prop_assert_eq!(tree.find_exact(*metric).unwrap().key(), *metric);
            }
            let probe = f64::from(probe) / 100.0;
            prop_assert_eq!(tree.find_exact(probe).is_some(), metrics.contains(&probe));
        }

        #[test]
        fn prop_level_groups_partition_the_tree(
            metrics in colliding_metrics(200)
        ) {
            let mut tree = MetricTree::new();
            insert_all(&mut tree, &metrics);

            let groups = tree.level_groups();
            prop_assert_eq!(groups.len(), tree.height() as usize);
            prop_assert_eq!(groups.iter().map(Vec::len).sum::<usize>(), tree.len());
            for (level, group) in groups.iter().enumerate() {
                prop_assert!(group.len() <= 1 << level);
            }
        }

        #[test]
        fn prop_nearest_is_on_search_path(
            metrics in colliding_metrics(100),
            query in -4.0f64..4.0,
        ) {
            let mut tree = MetricTree::new();
            insert_all(&mut tree, &metrics);

            // In a search tree the predecessor and successor of the query are
            // on its search path, so the path-only nearest is the true nearest.
            let nearest = tree.find_nearest(query).unwrap();
            let best = tree
                .keys_in_order()
                .into_iter()
                .map(|key| (key - query).abs())
                .fold(f64::INFINITY, f64::min);
            prop_assert_eq!((nearest.key() - query).abs(), best);
        }
    }
}
