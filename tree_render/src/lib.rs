/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Graphviz DOT rendering of a [`MetricTree`].
//!
//! Every node becomes a box labelled with its identifier, name, key and
//! structural data:
//!
//! ```text
//! ARG
//! Argentina
//! mean=0.8000
//! BF=0 H=1
//! ```
//!
//! Rendering only reads the tree. Turn the output into an image with
//! `dot -Tpng tree.dot -o tree.png`.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::io;
use std::path::Path;

use metric_tree::{MetricTree, NodeIndex, NodeView};
use tracing::debug;

/// Layout attributes of the generated graph.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Name of the `digraph`.
    pub graph_name: String,
    /// Minimum horizontal space between nodes, in inches.
    pub node_separation: f64,
    /// Minimum vertical space between ranks, in inches.
    pub rank_separation: f64,
    pub font_size: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            graph_name: "metric_tree".to_owned(),
            node_separation: 0.3,
            rank_separation: 0.4,
            font_size: 10,
        }
    }
}

/// Render `tree` as a DOT `digraph`.
///
/// Nodes are emitted in pre-order, each followed by the edges to its
/// children, left before right. Node `n{i}` is the `i`-th node in pre-order.
/// An empty tree yields a graph without nodes.
pub fn render_dot(tree: &MetricTree, options: &RenderOptions) -> String {
    let mut out = String::new();
    write_graph(&mut out, tree, options).expect("writing to a String cannot fail");
    out
}

/// Render `tree` and write the DOT text to `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be written. The error message names
/// the path.
pub fn write_dot(tree: &MetricTree, path: impl AsRef<Path>, options: &RenderOptions) -> io::Result<()> {
    let path = path.as_ref();
    fs_err::write(path, render_dot(tree, options))?;
    debug!(path = %path.display(), nodes = tree.len(), "wrote tree diagram");
    Ok(())
}

fn write_graph(out: &mut String, tree: &MetricTree, options: &RenderOptions) -> std::fmt::Result {
    writeln!(out, "digraph \"{}\" {{", escape(&options.graph_name))?;
    writeln!(out, "    rankdir=TB;")?;
    writeln!(
        out,
        "    graph [nodesep=\"{}\", ranksep=\"{}\"];",
        options.node_separation, options.rank_separation
    )?;
    writeln!(out, "    node [shape=box, fontsize=\"{}\"];", options.font_size)?;

    let ids: HashMap<NodeIndex, usize> = tree
        .iter()
        .enumerate()
        .map(|(ordinal, node)| (node.index(), ordinal))
        .collect();
    let node_id = |node: &NodeView<'_>| format!("n{}", ids[&node.index()]);

    for node in tree {
        writeln!(out, "    {} [label=\"{}\"];", node_id(&node), label(&node))?;
        for child in [node.left(), node.right()].into_iter().flatten() {
            writeln!(out, "    {} -> {};", node_id(&node), node_id(&child))?;
        }
    }

    writeln!(out, "}}")
}

fn label(node: &NodeView<'_>) -> String {
    format!(
        "{}\\n{}\\nmean={:.4}\\nBF={} H={}",
        escape(node.identifier()),
        escape(node.name()),
        node.key(),
        node.balance_factor(),
        node.height()
    )
}

/// Escape text for a double-quoted DOT string.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(c),
        }
    }
    escaped
}
