//! Row sources: where the per-tab sheet rows come from

mod file;
mod sheets;

pub use file::FileSource;
pub use sheets::SheetsClient;

use crate::types::{RawRow, SourceBatch};
use serde_json::Value;
use std::collections::HashMap;

/// Retrieves the raw rows of every requested tab.
///
/// A tab that cannot be retrieved comes back as
/// [`SourceBatch::Unavailable`]; retrieval never fails as a whole.
pub trait RowSource: Send + Sync {
    /// Source kind (e.g., "google-sheets")
    fn name(&self) -> &str;

    fn fetch_all(&self, tabs: &[String]) -> HashMap<String, SourceBatch>;
}

/// Convert JSON cells to strings. Sheets returns formatted strings, but
/// numbers and booleans are accepted too; null becomes an empty cell.
pub(crate) fn rows_from_json(values: Vec<Vec<Value>>) -> Vec<RawRow> {
    values
        .into_iter()
        .map(|row| row.into_iter().map(cell_to_string).collect())
        .collect()
}

fn cell_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
