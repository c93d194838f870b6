//! Row, entry and summary types for P/L tracking

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

/// One sheet row: cell 0 is the date, the rest are positional values
pub type RawRow = Vec<String>;

/// Rows retrieved for one source tab
#[derive(Debug, Clone, PartialEq)]
pub enum SourceBatch {
    /// All rows of the tab, header row included
    Rows(Vec<RawRow>),
    /// Retrieval failed; the reason is kept for diagnostics
    Unavailable(String),
}

/// A row reduced to the values the aggregators care about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedEntry {
    pub source: String,
    /// dd/mm/yyyy, taken verbatim from the sheet
    pub date: String,
    pub income: f64,
    pub turnover: f64,
}

/// Per-source turnover for one day
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TurnoverBreakdown {
    pub by_source: HashMap<String, f64>,
    pub total: f64,
}

/// Everything booked on one date
#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    pub date: String,
    /// Income per source; a source with no rows that day has no key
    pub income: HashMap<String, f64>,
    pub total: f64,
    /// `None` for subset summaries, which only track income
    pub turnover: Option<TurnoverBreakdown>,
}

impl DailySummary {
    /// Empty summary that tracks turnover
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            income: HashMap::new(),
            total: 0.0,
            turnover: Some(TurnoverBreakdown::default()),
        }
    }

    /// Empty summary that only tracks income
    pub fn income_only(date: impl Into<String>) -> Self {
        Self {
            turnover: None,
            ..Self::new(date)
        }
    }

    /// Book one entry. Turnover is dropped when the summary is income-only.
    pub fn add(&mut self, entry: &NormalizedEntry) {
        *self.income.entry(entry.source.clone()).or_insert(0.0) += entry.income;
        self.total += entry.income;

        if let Some(turnover) = self.turnover.as_mut() {
            *turnover
                .by_source
                .entry(entry.source.clone())
                .or_insert(0.0) += entry.turnover;
            turnover.total += entry.turnover;
        }
    }

    pub fn income_for(&self, source: &str) -> Option<f64> {
        self.income.get(source).copied()
    }

    pub fn turnover_for(&self, source: &str) -> Option<f64> {
        self.turnover
            .as_ref()
            .and_then(|t| t.by_source.get(source).copied())
    }

    pub fn total_turnover(&self) -> f64 {
        self.turnover.as_ref().map_or(0.0, |t| t.total)
    }
}

/// Serialized flat: `date`, one key per source, `Total`, then
/// `turnover_<source>` keys and `TotalTurnover` when turnover is tracked.
impl Serialize for DailySummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("date", &self.date)?;
        for (source, value) in sorted(&self.income) {
            map.serialize_entry(source, &value)?;
        }
        map.serialize_entry("Total", &self.total)?;
        if let Some(turnover) = &self.turnover {
            for (source, value) in sorted(&turnover.by_source) {
                map.serialize_entry(&format!("turnover_{}", source), &value)?;
            }
            map.serialize_entry("TotalTurnover", &turnover.total)?;
        }
        map.end()
    }
}

/// Income rolled up over one Monday-to-Sunday week
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklySummary {
    /// dd/mm/yyyy of the week's Monday
    pub week_start: String,
    /// Every requested source has a key, 0 when it booked nothing
    pub income: HashMap<String, f64>,
    pub total: f64,
    /// Number of daily summaries folded into this week
    pub days: u32,
}

impl WeeklySummary {
    pub fn new(week_start: impl Into<String>) -> Self {
        Self {
            week_start: week_start.into(),
            income: HashMap::new(),
            total: 0.0,
            days: 0,
        }
    }

    pub fn income_for(&self, source: &str) -> Option<f64> {
        self.income.get(source).copied()
    }
}

impl Serialize for WeeklySummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("weekStart", &self.week_start)?;
        for (source, value) in sorted(&self.income) {
            map.serialize_entry(source, &value)?;
        }
        map.serialize_entry("Total", &self.total)?;
        map.serialize_entry("days", &self.days)?;
        map.end()
    }
}

/// Label used for the combined row of the all-time table
pub const TOTAL_ROW_LABEL: &str = "Total";

/// Cumulative P/L and turnover for one source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllTimeSummary {
    #[serde(rename = "sourceName")]
    pub source_name: String,
    #[serde(rename = "totalPL")]
    pub total_pl: f64,
    #[serde(rename = "totalTurnover")]
    pub total_turnover: f64,
    /// Percent; 0 when there was no turnover
    pub roi: f64,
}

impl AllTimeSummary {
    pub fn new(source_name: impl Into<String>, total_pl: f64, total_turnover: f64) -> Self {
        Self {
            source_name: source_name.into(),
            total_pl,
            total_turnover,
            roi: roi(total_pl, total_turnover),
        }
    }

    /// Combined row over all sources. ROI is recomputed from the summed
    /// P/L and turnover, not averaged.
    pub fn total_row(rows: &[AllTimeSummary]) -> Self {
        let total_pl = rows.iter().map(|r| r.total_pl).sum();
        let total_turnover = rows.iter().map(|r| r.total_turnover).sum();
        Self::new(TOTAL_ROW_LABEL, total_pl, total_turnover)
    }
}

/// Return on investment in percent. Zero turnover yields 0.
pub fn roi(total_pl: f64, total_turnover: f64) -> f64 {
    if total_turnover != 0.0 {
        total_pl / total_turnover * 100.0
    } else {
        0.0
    }
}

fn sorted(map: &HashMap<String, f64>) -> Vec<(&String, f64)> {
    let mut pairs: Vec<(&String, f64)> = map.iter().map(|(k, v)| (k, *v)).collect();
    pairs.sort_by(|a, b| a.0.cmp(b.0));
    pairs
}
