/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Error types for the analytical queries.

/// A specialized Result type for the analytical queries.
pub type Result<T> = std::result::Result<T, AnalyticsError>;

/// Errors that can occur when running an analytical query over the tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalyticsError {
    /// The requested year lies outside the dataset's historical range.
    #[error("year {year} is outside the supported range {min}..={max}")]
    YearOutOfRange {
        /// The requested year.
        year: i32,
        /// First supported year.
        min: u16,
        /// Last supported year.
        max: u16,
    },
}
