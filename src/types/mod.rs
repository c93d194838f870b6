//! Type definitions for pltrack

mod date;
mod error;
mod summary;

pub use date::*;
pub use error::*;
pub use summary::*;

use std::fmt;

/// Non-fatal problems found while aggregating. Rows and sources that
/// produce one of these contribute nothing to the totals.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// Row is too short to hold the income, turnover or date cell
    MissingColumn {
        source: String,
        row: usize,
        column: usize,
    },
    /// Cell is present but not a finite number after normalization
    UnparseableNumber {
        source: String,
        row: usize,
        column: usize,
        value: String,
    },
    /// Retrieval failed or the source was never fetched
    SourceUnavailable { source: String, reason: String },
    /// Tab holds no data rows below its header
    EmptySource { source: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingColumn {
                source,
                row,
                column,
            } => write!(f, "{}: row {} has no column {}", source, row, column),
            Self::UnparseableNumber {
                source,
                row,
                column,
                value,
            } => write!(
                f,
                "{}: row {} column {} is not a number: {:?}",
                source, row, column, value
            ),
            Self::SourceUnavailable { source, reason } => {
                write!(f, "{}: no data ({})", source, reason)
            }
            Self::EmptySource { source } => write!(f, "{}: no data rows", source),
        }
    }
}
