/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

use itertools::Itertools;
use metric_tree::{MetricTree, Record};
use tree_render::{RenderOptions, render_dot, write_dot};

fn countries() -> MetricTree {
    let mut tree = MetricTree::new();
    tree.insert(0.8, Record::new("ARG", "Argentina", 0.8));
    tree.insert(1.2, Record::new("BEL", "Belgium", 1.2));
    tree.insert(1.2, Record::new("CHE", "Switzerland", 1.2));
    tree
}

#[test]
fn test_render_small_tree() {
    let dot = render_dot(&countries(), &RenderOptions::default());

    let expected = r#"digraph "metric_tree" {
    rankdir=TB;
    graph [nodesep="0.3", ranksep="0.4"];
    node [shape=box, fontsize="10"];
    n0 [label="BEL\nBelgium\nmean=1.2000\nBF=0 H=2"];
    n0 -> n1;
    n0 -> n2;
    n1 [label="ARG\nArgentina\nmean=0.8000\nBF=0 H=1"];
    n2 [label="CHE\nSwitzerland\nmean=1.2000\nBF=0 H=1"];
}
"#;
    assert_eq!(dot, expected);
}

#[test]
fn test_render_empty_tree() {
    let dot = render_dot(&MetricTree::new(), &RenderOptions::default());

    assert!(dot.starts_with("digraph \"metric_tree\" {\n"));
    assert!(dot.ends_with("}\n"));
    assert!(!dot.contains("[label="));
    assert!(!dot.contains("->"));
}

#[test]
fn test_one_node_per_tree_node() {
    let mut tree = MetricTree::new();
    for i in 0..50u32 {
        let metric = f64::from(i % 17) / 4.0;
        tree.insert(metric, Record::new(format!("C{i}"), "", metric));
    }

    let dot = render_dot(&tree, &RenderOptions::default());
    let nodes = dot.lines().filter(|line| line.contains("[label=")).count();
    let edges = dot.lines().filter(|line| line.contains(" -> ")).collect_vec();

    assert_eq!(nodes, tree.len());
    assert_eq!(edges.len(), tree.len() - 1);
    assert!(edges.iter().all_unique());
}

#[test]
fn test_balance_factor_in_label() {
    let mut tree = MetricTree::new();
    tree.insert(2.0, Record::new("B", "", 2.0));
    tree.insert(1.0, Record::new("A", "", 1.0));

    let dot = render_dot(&tree, &RenderOptions::default());
    assert!(dot.contains(r#"[label="B\n\nmean=2.0000\nBF=-1 H=2"]"#), "{dot}");
}

#[test]
fn test_labels_are_escaped() {
    let mut tree = MetricTree::new();
    tree.insert(1.0, Record::new("X", r#"The "Quoted" \ Land"#, 1.0));

    let dot = render_dot(&tree, &RenderOptions::default());
    assert!(dot.contains(r#"The \"Quoted\" \\ Land"#), "{dot}");
}

#[test]
fn test_custom_options() {
    let options = RenderOptions {
        graph_name: "countries".to_owned(),
        node_separation: 1.5,
        rank_separation: 2.0,
        font_size: 14,
    };
    let dot = render_dot(&countries(), &options);

    assert!(dot.starts_with("digraph \"countries\" {\n"));
    assert!(dot.contains(r#"graph [nodesep="1.5", ranksep="2"];"#));
    assert!(dot.contains(r#"node [shape=box, fontsize="14"];"#));
}

#[test]
fn test_write_dot() {
    let tree = countries();
    let path = std::env::temp_dir().join(format!("tree_render_test_{}.dot", std::process::id()));

    write_dot(&tree, &path, &RenderOptions::default()).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(written, render_dot(&tree, &RenderOptions::default()));
}

#[test]
fn test_write_dot_reports_path() {
    let err = write_dot(
        &countries(),
        "no/such/directory/tree.dot",
        &RenderOptions::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("no/such/directory/tree.dot"), "{err}");
}
