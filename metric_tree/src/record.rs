/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! The payload indexed by the tree: one country and its yearly series.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// Years covered by the climate dataset. Analytics reject anything else.
pub const SUPPORTED_YEARS: RangeInclusive<u16> = 1961..=2022;

/// A single indexed subject, typically a country.
///
/// The tree never inspects the record beyond its identifier and series;
/// [`Record::metric`] is the true, unperturbed value the record was
/// indexed by.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    /// Identifier, e.g. an ISO3 country code. Expected unique but not enforced.
    pub identifier: String,
    /// Human readable name.
    pub name: String,
    /// Mean of the measurements in [`Record::series`].
    pub metric: f64,
    /// Row identifier carried over from the source data, when present.
    pub object_id: Option<u64>,
    /// Year to measurement. `None` marks a missing measurement.
    pub series: BTreeMap<u16, Option<f64>>,
}

impl Record {
    /// Create a record with an empty series.
    pub fn new(identifier: impl Into<String>, name: impl Into<String>, metric: f64) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            metric,
            object_id: None,
            series: BTreeMap::new(),
        }
    }

    /// Attach a year series to the record.
    pub fn with_series(mut self, series: impl IntoIterator<Item = (u16, Option<f64>)>) -> Self {
        self.series = series.into_iter().collect();
        self
    }

    /// The measurement for `year`, if present and not missing.
    pub fn value_for(&self, year: u16) -> Option<f64> {
        self.series
            .get(&year)
            .copied()
            .flatten()
            .filter(|value| !value.is_nan())
    }

    /// All present measurements, in year order.
    pub fn measurements(&self) -> impl Iterator<Item = f64> + '_ {
        self.series
            .values()
            .filter_map(|value| *value)
            .filter(|value| !value.is_nan())
    }

    /// Whether this record's identifier matches `identifier`, both trimmed and
    /// compared ASCII case-insensitively.
    pub fn matches_identifier(&self, identifier: &str) -> bool {
        self.identifier
            .trim()
            .eq_ignore_ascii_case(identifier.trim())
    }
}

/// Normalize an identifier for comparison: trimmed and ASCII upper-cased.
pub fn normalize_identifier(identifier: &str) -> String {
    identifier.trim().to_ascii_uppercase()
}
