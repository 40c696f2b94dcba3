/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

use std::path::PathBuf;

use clap::Parser;
use climate_dataset::DEFAULT_DATASET_PATH;
use metric_tree::MetricTree;

/// Index countries by their mean temperature change and explore the tree
/// from an interactive menu.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Options {
    /// CSV file with one row per country and `F1961`..`F2022` year columns.
    #[arg(short, long, default_value = DEFAULT_DATASET_PATH)]
    pub dataset: PathBuf,

    /// Where the Graphviz rendering of the tree is written.
    #[arg(short = 'o', long, default_value = "tree.dot")]
    pub dot_output: PathBuf,

    /// Don't re-render the tree after every insertion or deletion.
    #[arg(long)]
    pub no_render: bool,

    /// Tolerance used when searching by metric.
    #[arg(short, long, default_value_t = MetricTree::DEFAULT_TOLERANCE)]
    pub tolerance: f64,
}
