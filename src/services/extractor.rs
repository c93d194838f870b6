//! Row extraction service
//!
//! Turns one raw sheet row into a [`NormalizedEntry`] using per-source
//! column offsets. Rows that cannot be read are skipped, never fatal.

use crate::types::{NormalizedEntry, RawRow};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Column holding the date in every tab
pub const DATE_COLUMN: usize = 0;

/// Offsets for sources that have no override
pub const DEFAULT_OFFSETS: ColumnOffsets = ColumnOffsets {
    income: 8,
    turnover: 5,
};

/// Resolved income/turnover cell positions for one source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnOffsets {
    pub income: usize,
    pub turnover: usize,
}

/// Partial override; unset fields fall back to the default offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColumnOverride {
    #[serde(default)]
    pub income: Option<usize>,
    #[serde(default)]
    pub turnover: Option<usize>,
}

/// Source name → column offsets lookup table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRules {
    #[serde(default = "default_offsets")]
    pub default: ColumnOffsets,
    #[serde(default)]
    pub overrides: HashMap<String, ColumnOverride>,
}

fn default_offsets() -> ColumnOffsets {
    DEFAULT_OFFSETS
}

impl Default for ColumnRules {
    /// Stock layout: the three sports tabs keep income in column K (10),
    /// and Tennis keeps turnover in column E (4).
    fn default() -> Self {
        let mut overrides = HashMap::new();
        overrides.insert(
            "Tennis".to_string(),
            ColumnOverride {
                income: Some(10),
                turnover: Some(4),
            },
        );
        for source in ["MLB", "American Football"] {
            overrides.insert(
                source.to_string(),
                ColumnOverride {
                    income: Some(10),
                    turnover: None,
                },
            );
        }
        Self {
            default: DEFAULT_OFFSETS,
            overrides,
        }
    }
}

impl ColumnRules {
    /// Rules with no overrides at all
    pub fn uniform(default: ColumnOffsets) -> Self {
        Self {
            default,
            overrides: HashMap::new(),
        }
    }

    pub fn with_override(mut self, source: impl Into<String>, rule: ColumnOverride) -> Self {
        self.overrides.insert(source.into(), rule);
        self
    }

    /// Offsets for `source`
    pub fn offsets_for(&self, source: &str) -> ColumnOffsets {
        match self.overrides.get(source) {
            Some(rule) => ColumnOffsets {
                income: rule.income.unwrap_or(self.default.income),
                turnover: rule.turnover.unwrap_or(self.default.turnover),
            },
            None => self.default,
        }
    }
}

/// Why a row produced no entry
#[derive(Debug, Clone, PartialEq)]
pub enum RowSkip {
    MissingColumn { column: usize },
    UnparseableNumber { column: usize, value: String },
}

/// Parse a numeric cell: drop `,` thousands separators, trim, require a
/// finite value.
///
/// # Examples
/// ```
/// use pltrack::services::extractor::parse_amount;
///
/// assert_eq!(parse_amount(" 1,250.50 "), Some(1250.5));
/// assert_eq!(parse_amount("-"), None);
/// ```
pub fn parse_amount(cell: &str) -> Option<f64> {
    let cleaned = cell.replace(',', "");
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Extract the (date, income, turnover) triple from one row of `source`.
///
/// The date is cell 0 as written; it is validated later, only where a
/// calendar value is needed.
pub fn extract(
    source: &str,
    row: &RawRow,
    rules: &ColumnRules,
) -> std::result::Result<NormalizedEntry, RowSkip> {
    let offsets = rules.offsets_for(source);

    let date = cell(row, DATE_COLUMN)?;
    let income = amount(row, offsets.income)?;
    let turnover = amount(row, offsets.turnover)?;

    Ok(NormalizedEntry {
        source: source.to_string(),
        date: date.trim().to_string(),
        income,
        turnover,
    })
}

fn cell(row: &RawRow, column: usize) -> std::result::Result<&str, RowSkip> {
    row.get(column)
        .map(String::as_str)
        .ok_or(RowSkip::MissingColumn { column })
}

fn amount(row: &RawRow, column: usize) -> std::result::Result<f64, RowSkip> {
    let raw = cell(row, column)?;
    parse_amount(raw).ok_or_else(|| RowSkip::UnparseableNumber {
        column,
        value: raw.to_string(),
    })
}
