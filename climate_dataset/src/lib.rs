/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Loader for the yearly temperature-change CSV.
//!
//! The source has one row per country and one column per year, named
//! `F1961` through `F2022`. Optional `ISO3`, `Country` and `ObjectId` columns
//! identify the row. Each row becomes a [`Record`] whose metric is the mean of
//! its present measurements.
//!
//! # Example
//!
//! ```
//! use climate_dataset::Dataset;
//!
//! let csv = "ISO3;Country;F1961;F1962\nARG;Argentina;0,5;1,5\nBRA;Brazil;NA;\n";
//! let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
//!
//! // Brazil has no measurement at all and is dropped.
//! assert_eq!(dataset.len(), 1);
//! assert_eq!(dataset.find_record("arg").unwrap().metric, 1.0);
//! assert_eq!(dataset.global_mean(), Some(1.0));
//! ```

mod cell;
mod error;

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use metric_tree::{MetricTree, Record, normalize_identifier};
use tracing::{debug, info};

pub use error::{DatasetError, Result};

/// The default dataset file name.
pub const DEFAULT_DATASET_PATH: &str = "dataset_climate_change.csv";

/// The parsed dataset.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Rows with at least one measurement, in source order.
    records: Vec<Record>,
    /// Year columns, in header order.
    years: Vec<u16>,
    /// Mean of each year column over every row.
    per_year_mean: BTreeMap<u16, Option<f64>>,
    /// Mean of every measurement in the file.
    global_mean: Option<f64>,
    /// Number of rows without any measurement.
    dropped: usize,
}

/// Column positions resolved from the header.
#[derive(Debug)]
struct Columns {
    iso3: Option<usize>,
    country: Option<usize>,
    object_id: Option<usize>,
    years: Vec<(usize, u16)>,
}

impl Columns {
    fn from_header(header: &csv::StringRecord) -> Result<Self> {
        let position = |name: &str| header.iter().position(|field| field.trim() == name);
        let years: Vec<_> = header
            .iter()
            .enumerate()
            .filter_map(|(i, field)| cell::year_column(field).map(|year| (i, year)))
            .collect();
        if years.is_empty() {
            return Err(DatasetError::NoYearColumns);
        }

        Ok(Self {
            iso3: position("ISO3"),
            country: position("Country"),
            object_id: position("ObjectId"),
            years,
        })
    }

    fn text<'r>(&self, row: &'r csv::StringRecord, column: Option<usize>) -> Option<&'r str> {
        column.and_then(|i| row.get(i)).map(str::trim)
    }
}

impl Dataset {
    /// Load the dataset stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Io`] if the file cannot be read, and the
    /// errors of [`Dataset::from_reader`] otherwise.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let dataset = Self::from_reader(fs_err::File::open(path)?)?;
        info!(
            path = %path.display(),
            records = dataset.len(),
            dropped = dataset.dropped,
            years = dataset.years.len(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    /// Parse a dataset from any reader.
    ///
    /// The input is decoded as UTF-8, or as Latin-1 when it isn't valid
    /// UTF-8. The delimiter, `;` or `,`, is inferred from the header.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::NoYearColumns`] if the header has no
    /// `F<year>` column, [`DatasetError::Csv`] on malformed CSV and
    /// [`DatasetError::Io`] if reading fails.
    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let text = cell::decode(bytes);

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(cell::sniff_delimiter(&text))
            .flexible(true)
            .from_reader(text.as_bytes());
        let columns = Columns::from_header(csv_reader.headers()?)?;

        let mut dataset = Self {
            years: columns.years.iter().map(|(_, year)| *year).collect(),
            ..Self::default()
        };
        let mut year_sums: BTreeMap<u16, (f64, usize)> =
            dataset.years.iter().map(|year| (*year, (0.0, 0))).collect();

        for row in csv_reader.records() {
            let row = row?;
            let series: BTreeMap<u16, Option<f64>> = columns
                .years
                .iter()
                .map(|(i, year)| (*year, row.get(*i).and_then(cell::measurement)))
                .collect();
            for (year, value) in &series {
                if let (Some(value), Some(entry)) = (value, year_sums.get_mut(year)) {
                    entry.0 += value;
                    entry.1 += 1;
                }
            }

            let identifier = columns
                .text(&row, columns.iso3)
                .map(normalize_identifier)
                .unwrap_or_default();
            let Some(metric) = mean(series.values().flatten().copied()) else {
                debug!(
                    identifier = %identifier,
                    line = row.position().map(|p| p.line()),
                    "dropping row without measurements"
                );
                dataset.dropped += 1;
                continue;
            };

            let name = columns.text(&row, columns.country).unwrap_or_default();
            let mut record = Record::new(identifier, name, metric).with_series(series);
            record.object_id = columns
                .text(&row, columns.object_id)
                .and_then(cell::object_id);
            dataset.records.push(record);
        }

        dataset.per_year_mean = year_sums
            .iter()
            .map(|(year, (sum, count))| (*year, (*count > 0).then(|| sum / *count as f64)))
            .collect();
        let (sum, count) = year_sums
            .values()
            .fold((0.0, 0), |(sum, count), (s, c)| (sum + s, count + c));
        dataset.global_mean = (count > 0).then(|| sum / count as f64);

        Ok(dataset)
    }

    /// Number of loaded records.
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The loaded records, in source order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// The year columns found in the header, in header order.
    pub fn years(&self) -> &[u16] {
        &self.years
    }

    /// Number of rows dropped because they held no measurement.
    pub const fn dropped_rows(&self) -> usize {
        self.dropped
    }

    /// Mean of every year column. `None` for a year without any measurement.
    pub const fn per_year_mean(&self) -> &BTreeMap<u16, Option<f64>> {
        &self.per_year_mean
    }

    /// Mean of every measurement of every year.
    pub const fn global_mean(&self) -> Option<f64> {
        self.global_mean
    }

    /// The first record whose identifier matches `identifier`, trimmed and
    /// ASCII case-insensitively.
    pub fn find_record(&self, identifier: &str) -> Option<&Record> {
        self.records
            .iter()
            .find(|record| record.matches_identifier(identifier))
    }

    /// Index every record by its metric.
    pub fn build_tree(&self) -> MetricTree {
        let mut tree = MetricTree::new();
        for record in &self.records {
            tree.insert(record.metric, record.clone());
        }
        debug!(nodes = tree.len(), height = tree.height(), "built metric tree");
        tree
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    (count > 0).then(|| sum / count as f64)
}
