//! dd/mm/yyyy date handling shared by the weekly aggregator and the sorter

use super::{PltrackError, Result};
use chrono::{Datelike, Duration, NaiveDate};

/// Date format used by every sheet tab and every date-like label
pub const SHEET_DATE_FORMAT: &str = "%d/%m/%Y";

/// Parse a sheet date (`15/01/2024`). Single-digit day and month are accepted.
pub fn parse_sheet_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), SHEET_DATE_FORMAT)
        .map_err(|_| PltrackError::InvalidDate(s.to_string()))
}

pub fn format_sheet_date(date: NaiveDate) -> String {
    date.format(SHEET_DATE_FORMAT).to_string()
}

/// Monday on or before `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}
