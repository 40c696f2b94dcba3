/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! The interactive menu.
//!
//! A thin dispatch loop: every command reads its arguments from the input,
//! calls into [`MetricTree`] and prints the outcome. Bad input is reported
//! and the menu is shown again; end of input exits.

use std::io::{self, BufRead, Write};

use climate_dataset::Dataset;
use itertools::Itertools;
use metric_tree::{MetricLookup, MetricTree, NodeView, SUPPORTED_YEARS, normalize_identifier};
use tracing::{info, warn};
use tree_render::RenderOptions;

use crate::args::Options;

/// Tolerance used to resolve the metric given to [`Command::DeleteByMetric`].
const DELETE_TOLERANCE: f64 = 1e-9;

/// A menu entry. Discriminants are the numbers shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Exit = 0,
    LevelOrder = 1,
    Insert = 2,
    DeleteByIdentifier = 3,
    SearchByMetric = 4,
    AboveYearAverage = 5,
    BelowGlobalAverage = 6,
    AtLeast = 7,
    NodeInfo = 8,
    Render = 9,
    DeleteByMetric = 10,
}

impl Command {
    const ALL: [Self; 11] = [
        Self::LevelOrder,
        Self::Insert,
        Self::DeleteByIdentifier,
        Self::SearchByMetric,
        Self::AboveYearAverage,
        Self::BelowGlobalAverage,
        Self::AtLeast,
        Self::NodeInfo,
        Self::Render,
        Self::DeleteByMetric,
        Self::Exit,
    ];

    fn parse(choice: &str) -> Option<Self> {
        let choice: u8 = choice.trim().parse().ok()?;
        Self::ALL.into_iter().find(|command| *command as u8 == choice)
    }

    const fn description(self) -> &'static str {
        match self {
            Self::Exit => "Exit",
            Self::LevelOrder => "Level-order traversal",
            Self::Insert => "Insert a country by ISO3",
            Self::DeleteByIdentifier => "Delete a country by ISO3",
            Self::SearchByMetric => "Search by metric (mean change)",
            Self::AboveYearAverage => "Countries above the average of a year",
            Self::BelowGlobalAverage => "Countries below the global average in a year",
            Self::AtLeast => "Countries with a mean change of at least a value",
            Self::NodeInfo => "Node information (level, balance, parent/grandparent/uncle)",
            Self::Render => "Render the tree (Graphviz DOT)",
            Self::DeleteByMetric => "Delete by metric (mean change)",
        }
    }
}

/// Menu state: the tree being explored and the terminal it talks through.
#[derive(Debug)]
pub struct Menu<'a, R, W> {
    tree: MetricTree,
    dataset: &'a Dataset,
    options: &'a Options,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(
        tree: MetricTree,
        dataset: &'a Dataset,
        options: &'a Options,
        input: R,
        output: W,
    ) -> Self {
        Self {
            tree,
            dataset,
            options,
            input,
            output,
        }
    }

    /// Show the menu and run commands until the user exits or the input ends.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading the input or writing the output fails.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("Choose an option: ")? else {
                return Ok(());
            };
            match Command::parse(&choice) {
                Some(Command::Exit) => return Ok(()),
                Some(command) => self.execute(command)?,
                None => writeln!(self.output, "Invalid option.")?,
            }
        }
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "\n=== Climate index: AVL tree keyed by mean temperature change ({}-{}) ===",
            SUPPORTED_YEARS.start(),
            SUPPORTED_YEARS.end()
        )?;
        for command in Command::ALL {
            writeln!(self.output, "{}) {}", command as u8, command.description())?;
        }
        Ok(())
    }

    fn execute(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::Exit => Ok(()),
            Command::LevelOrder => self.level_order(),
            Command::Insert => self.insert(),
            Command::DeleteByIdentifier => self.delete_by_identifier(),
            Command::SearchByMetric => self.search_by_metric(),
            Command::AboveYearAverage => self.above_year_average(),
            Command::BelowGlobalAverage => self.below_global_average(),
            Command::AtLeast => self.at_least(),
            Command::NodeInfo => self.node_info(),
            Command::Render => self.render(),
            Command::DeleteByMetric => self.delete_by_metric(),
        }
    }

    fn level_order(&mut self) -> io::Result<()> {
        let levels = self.tree.level_groups();
        if levels.is_empty() {
            return writeln!(self.output, "The tree is empty.");
        }
        for (level, identifiers) in levels.iter().enumerate() {
            writeln!(self.output, "Level {level}: {}", identifiers.iter().join(", "))?;
        }
        Ok(())
    }

    fn insert(&mut self) -> io::Result<()> {
        let Some(identifier) = self.prompt_identifier("ISO3 to insert (must exist in the dataset): ")?
        else {
            return Ok(());
        };

        let Some(record) = self.dataset.find_record(&identifier) else {
            return writeln!(self.output, "No country with ISO3 {identifier} in the dataset.");
        };
        if self.tree.find_by_identifier(&identifier).is_some() {
            return writeln!(
                self.output,
                "{identifier} is already in the tree. Delete it first to insert it again."
            );
        }

        self.tree.insert(record.metric, record.clone());
        info!(identifier = %identifier, "inserted country");
        writeln!(self.output, "Inserted {identifier}.")?;
        self.render_after_change()
    }

    fn delete_by_identifier(&mut self) -> io::Result<()> {
        let Some(identifier) = self.prompt_identifier("ISO3 to delete: ")? else {
            return Ok(());
        };

        match self.tree.delete_by_identifier(&identifier) {
            0 => writeln!(self.output, "{identifier} is not in the tree."),
            removed => {
                info!(identifier = %identifier, removed, "deleted country");
                writeln!(self.output, "Deleted {identifier} ({removed} node(s)).")?;
                self.render_after_change()
            }
        }
    }

    fn search_by_metric(&mut self) -> io::Result<()> {
        let Some(input) = self.prompt("Metric (mean change): ")? else {
            return Ok(());
        };
        let Some(metric) = parse_number(&input) else {
            return writeln!(self.output, "Invalid value.");
        };

        let found = match self.tree.lookup_metric(metric, self.options.tolerance) {
            MetricLookup::Found(node) => {
                writeln!(self.output, "Found: {} | mean = {:.6}", node.identifier(), node.key())?;
                node.index()
            }
            MetricLookup::Nearest(node) => {
                return writeln!(
                    self.output,
                    "No exact match. Nearest: {} | mean = {:.6}",
                    node.identifier(),
                    node.key()
                );
            }
            MetricLookup::Empty => return writeln!(self.output, "The tree is empty."),
        };

        let Some(answer) = self.prompt("Show node information? [y/N]: ")? else {
            return Ok(());
        };
        if answer.eq_ignore_ascii_case("y") {
            if let Some(node) = self.tree.view(found) {
                write_node_info(&mut self.output, node)?;
            }
        }
        Ok(())
    }

    fn above_year_average(&mut self) -> io::Result<()> {
        let Some(year) = self.prompt_year()? else {
            return Ok(());
        };

        match self.tree.above_year_average(year) {
            Err(err) => writeln!(self.output, "Error: {err}"),
            Ok(hits) if hits.is_empty() => {
                writeln!(self.output, "No country is above the {year} average.")
            }
            Ok(hits) => {
                writeln!(self.output, "Average for {year}: {:.4}", hits[0].reference)?;
                for hit in &hits {
                    writeln!(
                        self.output,
                        "{} ({}): {:.4}",
                        hit.node.identifier(),
                        hit.node.name(),
                        hit.value
                    )?;
                }
                Ok(())
            }
        }
    }

    fn below_global_average(&mut self) -> io::Result<()> {
        let Some(year) = self.prompt_year()? else {
            return Ok(());
        };

        match self.tree.below_global_average(year) {
            Err(err) => writeln!(self.output, "Error: {err}"),
            Ok(hits) if hits.is_empty() => {
                writeln!(self.output, "No country is below the global average in {year}.")
            }
            Ok(hits) => {
                writeln!(self.output, "Global average: {:.4}", hits[0].reference)?;
                for hit in &hits {
                    writeln!(
                        self.output,
                        "{} ({}): {:.4} in {year}",
                        hit.node.identifier(),
                        hit.node.name(),
                        hit.value
                    )?;
                }
                Ok(())
            }
        }
    }

    fn at_least(&mut self) -> io::Result<()> {
        let Some(input) = self.prompt("Threshold for the mean change: ")? else {
            return Ok(());
        };
        let Some(threshold) = parse_number(&input) else {
            return writeln!(self.output, "Invalid value. Enter a number, e.g. 0.5 or 1.25.");
        };

        let hits = self.tree.at_least(threshold);
        if hits.is_empty() {
            return writeln!(self.output, "No country has a mean change of at least {threshold}.");
        }
        for hit in &hits {
            writeln!(
                self.output,
                "{} ({}): mean = {:.4}",
                hit.node.identifier(),
                hit.node.name(),
                hit.key
            )?;
        }
        Ok(())
    }

    fn node_info(&mut self) -> io::Result<()> {
        let Some(identifier) = self.prompt_identifier("ISO3 of the node to inspect: ")? else {
            return Ok(());
        };

        match self.tree.find_by_identifier(&identifier) {
            Some(node) => write_node_info(&mut self.output, node),
            None => writeln!(self.output, "{identifier} is not in the tree."),
        }
    }

    fn delete_by_metric(&mut self) -> io::Result<()> {
        let Some(input) = self.prompt("Mean change to delete: ")? else {
            return Ok(());
        };
        let Some(metric) = parse_number(&input) else {
            return writeln!(self.output, "Invalid value.");
        };

        match self.tree.delete_approx(metric, DELETE_TOLERANCE) {
            None => writeln!(self.output, "No node with that mean change."),
            Some(record) => {
                info!(identifier = %record.identifier, metric, "deleted country by metric");
                writeln!(self.output, "Deleted {}.", record.identifier)?;
                self.render_after_change()
            }
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let path = &self.options.dot_output;
        match tree_render::write_dot(&self.tree, path, &RenderOptions::default()) {
            Ok(()) => writeln!(self.output, "Tree written to {}.", path.display()),
            Err(err) => {
                warn!("could not render the tree: {err}");
                writeln!(self.output, "Could not render the tree: {err}")
            }
        }
    }

    fn render_after_change(&mut self) -> io::Result<()> {
        if self.options.no_render {
            return Ok(());
        }
        self.render()
    }

    /// Print `prompt` and read one line. `None` at end of input.
    fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    fn prompt_identifier(&mut self, prompt: &str) -> io::Result<Option<String>> {
        Ok(self.prompt(prompt)?.map(|input| normalize_identifier(&input)))
    }

    /// Read a year. Invalid numbers are reported and yield `None`; the range
    /// itself is validated by the tree.
    fn prompt_year(&mut self) -> io::Result<Option<i32>> {
        let prompt = format!(
            "Year to evaluate ({}-{}): ",
            SUPPORTED_YEARS.start(),
            SUPPORTED_YEARS.end()
        );
        let Some(input) = self.prompt(&prompt)? else {
            return Ok(None);
        };
        match input.parse() {
            Ok(year) => Ok(Some(year)),
            Err(_) => {
                writeln!(
                    self.output,
                    "Invalid year. Enter a number between {} and {}.",
                    SUPPORTED_YEARS.start(),
                    SUPPORTED_YEARS.end()
                )?;
                Ok(None)
            }
        }
    }
}

/// Parse a finite number, accepting a decimal comma.
fn parse_number(input: &str) -> Option<f64> {
    input
        .trim()
        .replace(',', ".")
        .parse()
        .ok()
        .filter(|value: &f64| value.is_finite())
}

fn write_node_info(output: &mut impl Write, node: NodeView<'_>) -> io::Result<()> {
    let identifier = |node: Option<NodeView<'_>>| node.map_or("-", |node| node.identifier()).to_owned();

    writeln!(output, "ISO3: {}  Country: {}", node.identifier(), node.name())?;
    writeln!(output, "Mean change (key): {:.6}", node.key())?;
    writeln!(
        output,
        "Level: {}  |  Balance: {}  |  Height: {}",
        node.level(),
        node.balance_factor(),
        node.height()
    )?;
    writeln!(
        output,
        "Parent: {} | Grandparent: {} | Uncle: {}",
        identifier(node.parent()),
        identifier(node.grandparent()),
        identifier(node.uncle())
    )
}
