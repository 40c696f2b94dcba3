/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Whole-collection filters over the yearly series.
//!
//! These are linear scans over every node. The tree ordering is on the
//! metric, not on per-year values, so nothing can be pruned.

use super::MetricTree;
use crate::error::{AnalyticsError, Result};
use crate::{NodeView, SUPPORTED_YEARS};

/// A node whose value for a year compared favourably against a reference mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearComparison<'a> {
    pub node: NodeView<'a>,
    /// The node's measurement for the queried year.
    pub value: f64,
    /// The mean the value was compared against.
    pub reference: f64,
}

/// A node whose key reached a threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdMatch<'a> {
    pub node: NodeView<'a>,
    pub key: f64,
}

impl MetricTree {
    /// Nodes whose value for `year` is strictly above that year's mean.
    ///
    /// The mean is taken over every node holding a measurement for `year`.
    /// A year with no measurements at all yields an empty result.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::YearOutOfRange`] if `year` is outside
    /// [`SUPPORTED_YEARS`].
    pub fn above_year_average(&self, year: i32) -> Result<Vec<YearComparison<'_>>> {
        let year = check_year(year)?;
        let values: Vec<_> = self.values_for(year).collect();
        let Some(reference) = mean(values.iter().map(|(_, value)| *value)) else {
            return Ok(Vec::new());
        };

        Ok(values
            .into_iter()
            .filter(|(_, value)| *value > reference)
            .map(|(node, value)| YearComparison {
                node,
                value,
                reference,
            })
            .collect())
    }

    /// Nodes whose value for `year` is strictly below the global mean.
    ///
    /// The global mean is taken over every measurement of every year of every
    /// node.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::YearOutOfRange`] if `year` is outside
    /// [`SUPPORTED_YEARS`].
    pub fn below_global_average(&self, year: i32) -> Result<Vec<YearComparison<'_>>> {
        let year = check_year(year)?;
        let Some(reference) = self.global_mean() else {
            return Ok(Vec::new());
        };

        Ok(self
            .values_for(year)
            .filter(|(_, value)| *value < reference)
            .map(|(node, value)| YearComparison {
                node,
                value,
                reference,
            })
            .collect())
    }

    /// Nodes whose key is at least `threshold`, in pre-order.
    pub fn at_least(&self, threshold: f64) -> Vec<ThresholdMatch<'_>> {
        self.iter()
            .filter(|node| node.key() >= threshold)
            .map(|node| ThresholdMatch {
                key: node.key(),
                node,
            })
            .collect()
    }

    /// Mean of every measurement held by the tree, `None` if there is none.
    pub fn global_mean(&self) -> Option<f64> {
        mean(self.iter().flat_map(|node| node.record().measurements()))
    }

    /// Every node holding a measurement for `year`, with that measurement.
    fn values_for(&self, year: u16) -> impl Iterator<Item = (NodeView<'_>, f64)> {
        self.iter()
            .filter_map(move |node| node.record().value_for(year).map(|value| (node, value)))
    }
}

fn check_year(year: i32) -> Result<u16> {
    u16::try_from(year)
        .ok()
        .filter(|year| SUPPORTED_YEARS.contains(year))
        .ok_or(AnalyticsError::YearOutOfRange {
            year,
            min: *SUPPORTED_YEARS.start(),
            max: *SUPPORTED_YEARS.end(),
        })
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    (count > 0).then(|| sum / count as f64)
}
