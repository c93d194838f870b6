//! Sorting for summary tables
//!
//! Any summary collection can be ordered by one of its fields. Date-like
//! keys compare as calendar dates, numeric keys treat a missing value as 0.

use crate::types::{parse_sheet_date, AllTimeSummary, DailySummary, WeeklySummary};
use chrono::NaiveDate;
use std::cmp::Ordering;

pub const DATE_KEY: &str = "date";
pub const WEEK_START_KEY: &str = "weekStart";
pub const TOTAL_KEY: &str = "Total";
pub const TOTAL_TURNOVER_KEY: &str = "TotalTurnover";
pub const SOURCE_NAME_KEY: &str = "sourceName";
pub const TURNOVER_PREFIX: &str = "turnover_";

/// Comparable value of one field
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue<'a> {
    /// `None` when the label is not a valid dd/mm/yyyy date
    Date(Option<NaiveDate>),
    Number(f64),
    Text(&'a str),
}

impl SortValue<'_> {
    fn date(label: &str) -> Self {
        SortValue::Date(parse_sheet_date(label).ok())
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            // Unparseable dates sort before every real date
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// A record that can be ordered by a named field
pub trait Sortable {
    fn sort_value(&self, key: &str) -> SortValue<'_>;
}

impl Sortable for DailySummary {
    fn sort_value(&self, key: &str) -> SortValue<'_> {
        match key {
            DATE_KEY => SortValue::date(&self.date),
            TOTAL_KEY => SortValue::Number(self.total),
            TOTAL_TURNOVER_KEY => SortValue::Number(self.total_turnover()),
            _ => {
                if let Some(source) = key.strip_prefix(TURNOVER_PREFIX) {
                    if let Some(value) = self.turnover_for(source) {
                        return SortValue::Number(value);
                    }
                }
                SortValue::Number(self.income_for(key).unwrap_or(0.0))
            }
        }
    }
}

impl Sortable for WeeklySummary {
    fn sort_value(&self, key: &str) -> SortValue<'_> {
        match key {
            WEEK_START_KEY => SortValue::date(&self.week_start),
            TOTAL_KEY => SortValue::Number(self.total),
            "days" => SortValue::Number(self.days as f64),
            _ => SortValue::Number(self.income_for(key).unwrap_or(0.0)),
        }
    }
}

impl Sortable for AllTimeSummary {
    fn sort_value(&self, key: &str) -> SortValue<'_> {
        match key {
            SOURCE_NAME_KEY => SortValue::Text(&self.source_name),
            "totalPL" => SortValue::Number(self.total_pl),
            "totalTurnover" => SortValue::Number(self.total_turnover),
            "roi" => SortValue::Number(self.roi),
            _ => SortValue::Number(0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "↑",
            Self::Descending => "↓",
        }
    }
}

/// Current sort column of a table; owned by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub key: String,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: DATE_KEY.to_string(),
            direction: SortDirection::Ascending,
        }
    }
}

impl SortState {
    /// Header click: the same key flips direction, a new key starts ascending
    pub fn select(&self, key: &str) -> Self {
        let direction = if self.key == key {
            self.direction.toggled()
        } else {
            SortDirection::Ascending
        };
        Self {
            key: key.to_string(),
            direction,
        }
    }

    pub fn apply<R: Sortable + Clone>(&self, records: &[R]) -> Vec<R> {
        sort(records, &self.key, self.direction)
    }
}

/// Return `records` ordered by `key`. Descending is the exact reverse of
/// ascending, ties included.
pub fn sort<R: Sortable + Clone>(records: &[R], key: &str, direction: SortDirection) -> Vec<R> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| a.sort_value(key).compare(&b.sort_value(key)));
    if direction == SortDirection::Descending {
        sorted.reverse();
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(date: &str, source: &str, income: f64) -> DailySummary {
        let mut summary = DailySummary::new(date);
        summary.income.insert(source.to_string(), income);
        summary.total = income;
        summary
    }

    fn dates(records: &[DailySummary]) -> Vec<&str> {
        records.iter().map(|r| r.date.as_str()).collect()
    }

    // ========== date keys ==========

    #[test]
    fn test_sort_by_date_is_calendar_order() {
        // String order would put 02/03 before 10/01
        let records = vec![
            day("02/03/2024", "S1x", 1.0),
            day("10/01/2024", "S1x", 2.0),
            day("05/12/2023", "S1x", 3.0),
        ];

        let sorted = sort(&records, DATE_KEY, SortDirection::Ascending);

        assert_eq!(dates(&sorted), vec!["05/12/2023", "10/01/2024", "02/03/2024"]);
    }

    #[test]
    fn test_sort_by_date_toggle_reverses() {
        let records = vec![
            day("02/03/2024", "S1x", 1.0),
            day("10/01/2024", "S1x", 2.0),
            day("05/12/2023", "S1x", 3.0),
        ];

        let asc = sort(&records, DATE_KEY, SortDirection::Ascending);
        let desc = sort(&records, DATE_KEY, SortDirection::Descending);

        let mut reversed = asc.clone();
        reversed.reverse();
        assert_eq!(desc, reversed);
    }

    #[test]
    fn test_sort_does_not_mutate_input() {
        let records = vec![day("02/03/2024", "S1x", 1.0), day("10/01/2024", "S1x", 2.0)];
        let _ = sort(&records, DATE_KEY, SortDirection::Ascending);
        assert_eq!(dates(&records), vec!["02/03/2024", "10/01/2024"]);
    }

    #[test]
    fn test_sort_invalid_dates_first() {
        let records = vec![day("10/01/2024", "S1x", 1.0), day("garbage", "S1x", 2.0)];

        let sorted = sort(&records, DATE_KEY, SortDirection::Ascending);

        assert_eq!(dates(&sorted), vec!["garbage", "10/01/2024"]);
    }

    #[test]
    fn test_sort_weekly_by_week_start() {
        let mut a = WeeklySummary::new("29/01/2024");
        a.total = 1.0;
        let mut b = WeeklySummary::new("08/01/2024");
        b.total = 2.0;

        let sorted = sort(&[a, b], WEEK_START_KEY, SortDirection::Descending);

        assert_eq!(sorted[0].week_start, "29/01/2024");
        assert_eq!(sorted[1].week_start, "08/01/2024");
    }

    // ========== numeric keys ==========

    #[test]
    fn test_sort_missing_source_counts_as_zero() {
        let records = vec![
            day("01/01/2024", "MLB", 5.0),
            day("02/01/2024", "S1x", 100.0), // no MLB field
            day("03/01/2024", "MLB", -5.0),
        ];

        let sorted = sort(&records, "MLB", SortDirection::Ascending);

        assert_eq!(dates(&sorted), vec!["03/01/2024", "02/01/2024", "01/01/2024"]);
    }

    #[test]
    fn test_sort_by_total_descending() {
        let records = vec![
            day("01/01/2024", "S1x", 5.0),
            day("02/01/2024", "S1x", 50.0),
            day("03/01/2024", "S1x", -5.0),
        ];

        let sorted = sort(&records, TOTAL_KEY, SortDirection::Descending);

        assert_eq!(dates(&sorted), vec!["02/01/2024", "01/01/2024", "03/01/2024"]);
    }

    #[test]
    fn test_sort_by_turnover_field() {
        let mut a = DailySummary::new("01/01/2024");
        a.turnover.as_mut().unwrap().by_source.insert("S1x".into(), 10.0);
        let b = DailySummary::new("02/01/2024");

        let sorted = sort(&[a, b], "turnover_S1x", SortDirection::Descending);

        assert_eq!(sorted[0].date, "01/01/2024");
    }

    #[test]
    fn test_sort_all_time_by_roi_and_name() {
        let rows = vec![
            AllTimeSummary::new("Tennis", 10.0, 100.0),
            AllTimeSummary::new("MLB", 50.0, 100.0),
            AllTimeSummary::new("S1x", -1.0, 0.0),
        ];

        let by_roi = sort(&rows, "roi", SortDirection::Descending);
        let names: Vec<&str> = by_roi.iter().map(|r| r.source_name.as_str()).collect();
        assert_eq!(names, vec!["MLB", "Tennis", "S1x"]);

        let by_name = sort(&rows, SOURCE_NAME_KEY, SortDirection::Ascending);
        let names: Vec<&str> = by_name.iter().map(|r| r.source_name.as_str()).collect();
        assert_eq!(names, vec!["MLB", "S1x", "Tennis"]);
    }

    // ========== SortState ==========

    #[test]
    fn test_sort_state_same_key_flips() {
        let state = SortState::default();
        let next = state.select(DATE_KEY);
        assert_eq!(next.direction, SortDirection::Descending);
        assert_eq!(next.select(DATE_KEY).direction, SortDirection::Ascending);
    }

    #[test]
    fn test_sort_state_new_key_starts_ascending() {
        let state = SortState::default().select(DATE_KEY);
        let next = state.select(TOTAL_KEY);
        assert_eq!(next.key, TOTAL_KEY);
        assert_eq!(next.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_sort_state_apply() {
        let records = vec![day("02/01/2024", "S1x", 1.0), day("01/01/2024", "S1x", 2.0)];
        let sorted = SortState::default().apply(&records);
        assert_eq!(dates(&sorted), vec!["01/01/2024", "02/01/2024"]);
    }

    #[test]
    fn test_direction_arrow() {
        assert_eq!(SortDirection::Ascending.arrow(), "↑");
        assert_eq!(SortDirection::Descending.arrow(), "↓");
    }
}
