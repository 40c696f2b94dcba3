/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

use std::io;
use std::process::ExitCode;

use clap::Parser;
use climate_dataset::Dataset;
use tracing::{error, warn};

mod args;
mod logging;
mod menu;

fn main() -> ExitCode {
    let options = args::Options::parse();
    if let Err(err) = logging::try_init() {
        eprintln!("Unable to install the log subscriber: {err}");
    }

    let dataset = match Dataset::from_path(&options.dataset) {
        Ok(dataset) => dataset,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    if dataset.is_empty() {
        warn!(path = %options.dataset.display(), "dataset holds no measurements");
    }

    let tree = dataset.build_tree();
    println!("Loaded {} countries.", tree.len());

    let mut menu = menu::Menu::new(tree, &dataset, &options, io::stdin().lock(), io::stdout().lock());
    match menu.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("terminal I/O failed: {err}");
            ExitCode::FAILURE
        }
    }
}
