/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Error types for dataset loading.

use std::io;

/// Result type alias for dataset operations.
pub type Result<T> = std::result::Result<T, DatasetError>;

/// Errors that can occur while loading a dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The source could not be read. Errors from [`Dataset::from_path`]
    /// carry the offending path.
    ///
    /// [`Dataset::from_path`]: crate::Dataset::from_path
    #[error("failed to read the dataset: {0}")]
    Io(#[from] io::Error),

    /// The source is not valid CSV.
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The header has no `F<year>` column.
    #[error("no year columns (F1961..F2022) found in the header")]
    NoYearColumns,
}
