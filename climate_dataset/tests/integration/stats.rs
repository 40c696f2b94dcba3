/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Tests for the per-year and global dataset statistics.

use climate_dataset::Dataset;
use itertools::Itertools;

const CSV: &str = "\
ISO3;F1961;F1962;F1963
AAA;1;2;
BBB;3;;
CCC;;;
DDD;5;4;
";

#[test]
fn test_per_year_mean() {
    let dataset = Dataset::from_reader(CSV.as_bytes()).unwrap();
    let means = dataset.per_year_mean();

    assert_eq!(means.keys().copied().collect_vec(), [1961, 1962, 1963]);
    assert_eq!(means[&1961], Some(3.0));
    assert_eq!(means[&1962], Some(3.0));
    // A year without measurements has no mean.
    assert_eq!(means[&1963], None);
}

#[test]
fn test_global_mean() {
    let dataset = Dataset::from_reader(CSV.as_bytes()).unwrap();
    assert_eq!(dataset.global_mean(), Some(15.0 / 5.0));
}

#[test]
fn test_statistics_of_an_empty_body() {
    let dataset = Dataset::from_reader("ISO3,F1961,F1962\n".as_bytes()).unwrap();

    assert!(dataset.is_empty());
    assert_eq!(dataset.global_mean(), None);
    assert_eq!(
        dataset.per_year_mean().values().copied().collect_vec(),
        [None, None]
    );
}

#[test]
fn test_records_keep_source_order() {
    let dataset = Dataset::from_reader(CSV.as_bytes()).unwrap();

    let identifiers = dataset
        .records()
        .iter()
        .map(|record| record.identifier.as_str())
        .collect_vec();
    assert_eq!(identifiers, ["AAA", "BBB", "DDD"]);

    let metrics = dataset
        .into_records()
        .into_iter()
        .map(|record| record.metric)
        .collect_vec();
    assert_eq!(metrics, [1.5, 3.0, 4.5]);
}
