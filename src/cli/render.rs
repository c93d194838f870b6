//! Plain-text tables for the terminal

use pltrack::services::sorter::{SortState, DATE_KEY, SOURCE_NAME_KEY, TOTAL_KEY, WEEK_START_KEY};
use pltrack::types::{AllTimeSummary, DailySummary, WeeklySummary};

/// Round to a whole number and group thousands: -1234.6 → "-1,235"
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

pub fn format_roi(roi: f64) -> String {
    format!("{:.2}%", roi)
}

fn header_label(label: &str, key: &str, sort: &SortState) -> String {
    if sort.key == key {
        format!("{} {}", label, sort.direction.arrow())
    } else {
        label.to_string()
    }
}

fn optional(value: Option<f64>) -> String {
    value.map(format_number).unwrap_or_else(|| "-".to_string())
}

pub fn daily_table(records: &[DailySummary], sources: &[String], sort: &SortState) -> String {
    let mut header = vec![header_label("Date", DATE_KEY, sort)];
    header.extend(sources.iter().map(|s| header_label(s, s, sort)));
    header.push(header_label("Total", TOTAL_KEY, sort));

    let rows = records
        .iter()
        .map(|r| {
            let mut cells = vec![r.date.clone()];
            cells.extend(sources.iter().map(|s| optional(r.income_for(s))));
            cells.push(format_number(r.total));
            cells
        })
        .collect();

    layout(header, rows)
}

pub fn weekly_table(records: &[WeeklySummary], sources: &[String], sort: &SortState) -> String {
    let mut header = vec![header_label("Week Starting", WEEK_START_KEY, sort)];
    header.extend(sources.iter().map(|s| header_label(s, s, sort)));
    header.push(header_label("Total", TOTAL_KEY, sort));

    let rows = records
        .iter()
        .map(|r| {
            let mut cells = vec![r.week_start.clone()];
            cells.extend(sources.iter().map(|s| optional(r.income_for(s))));
            cells.push(format_number(r.total));
            cells
        })
        .collect();

    layout(header, rows)
}

/// Per-source rows followed by the combined Total row
pub fn all_time_table(records: &[AllTimeSummary], sort: &SortState) -> String {
    let header = vec![
        header_label("Source", SOURCE_NAME_KEY, sort),
        header_label("Total P/L", "totalPL", sort),
        header_label("Total Turnover", "totalTurnover", sort),
        header_label("ROI (%)", "roi", sort),
    ];

    let total = AllTimeSummary::total_row(records);
    let rows = records
        .iter()
        .chain(std::iter::once(&total))
        .map(|r| {
            vec![
                r.source_name.clone(),
                format_number(r.total_pl),
                format_number(r.total_turnover),
                format_roi(r.roi),
            ]
        })
        .collect();

    layout(header, rows)
}

/// First column left-aligned, the rest right-aligned
fn layout(header: Vec<String>, rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (cell, &width))| {
                if i == 0 {
                    format!("{:<width$}", cell, width = width)
                } else {
                    format!("{:>width$}", cell, width = width)
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = line(header.as_slice());
    out.push('\n');
    let rule_len: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');
    for row in &rows {
        out.push_str(&line(row.as_slice()));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pltrack::services::sorter::SortDirection;

    #[test]
    fn test_format_number_groups_thousands() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.4), "999");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(1234567.0), "1,234,567");
        assert_eq!(format_number(-1234.6), "-1,235");
        assert_eq!(format_number(f64::NAN), "-");
    }

    #[test]
    fn test_format_roi() {
        assert_eq!(format_roi(12.346), "12.35%");
        assert_eq!(format_roi(0.0), "0.00%");
        assert_eq!(format_roi(-5.0), "-5.00%");
    }

    #[test]
    fn test_daily_table_marks_missing_and_sort() {
        let mut day = DailySummary::new("15/01/2024");
        day.income.insert("S1x".into(), 1500.0);
        day.total = 1500.0;
        let sources = vec!["S1x".to_string(), "MLB".to_string()];
        let sort = SortState {
            key: "MLB".into(),
            direction: SortDirection::Descending,
        };

        let table = daily_table(&[day], &sources, &sort);
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines[0].starts_with("Date"));
        assert!(lines[0].contains("MLB ↓"));
        assert!(lines[2].starts_with("15/01/2024"));
        assert!(lines[2].contains("1,500"));
        assert!(lines[2].contains(" -"));
    }

    #[test]
    fn test_all_time_table_has_total_row() {
        let rows = vec![
            AllTimeSummary::new("S1x", 100.0, 1000.0),
            AllTimeSummary::new("MLB", 300.0, 0.0),
        ];

        let table = all_time_table(&rows, &SortState::default());
        let last = table.lines().last().unwrap();

        assert!(last.starts_with("Total"));
        assert!(last.contains("400"));
        assert!(last.ends_with("40.00%"));
    }
}
