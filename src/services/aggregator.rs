//! Aggregator service for computing P/L rollups

use crate::services::extractor::{self, ColumnRules, RowSkip};
use crate::types::{
    format_sheet_date, parse_sheet_date, week_start, AllTimeSummary, DailySummary, Diagnostic,
    Result, SourceBatch, WeeklySummary,
};
use std::collections::{HashMap, HashSet};

/// Daily summaries keyed by date, with the rows and sources that were skipped
#[derive(Debug, Clone, Default)]
pub struct DailyAggregation {
    pub summaries: HashMap<String, DailySummary>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Output of a single pass that fills the full and the subset view together
#[derive(Debug, Clone, Default)]
pub struct DailyPass {
    /// All sources, income and turnover
    pub full: HashMap<String, DailySummary>,
    /// Subset sources only, income only
    pub subset: HashMap<String, DailySummary>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Aggregator for computing P/L statistics
pub struct Aggregator;

impl Aggregator {
    /// Aggregate every source's rows by date, tracking income and turnover.
    pub fn daily(
        batches: &HashMap<String, SourceBatch>,
        source_names: &[String],
        rules: &ColumnRules,
    ) -> DailyAggregation {
        let pass = Self::daily_with_subset(batches, source_names, &[], rules);
        DailyAggregation {
            summaries: pass.full,
            diagnostics: pass.diagnostics,
        }
    }

    /// Aggregate only `subset_names` by date, tracking income only.
    pub fn daily_subset(
        batches: &HashMap<String, SourceBatch>,
        subset_names: &[String],
        rules: &ColumnRules,
    ) -> DailyAggregation {
        let pass = Self::daily_with_subset(batches, subset_names, subset_names, rules);
        DailyAggregation {
            summaries: pass.subset,
            diagnostics: pass.diagnostics,
        }
    }

    /// Walk every row once, booking each entry into the full view and, for
    /// sources in `subset_names`, into the income-only subset view.
    ///
    /// The first row of each batch is the tab header and is skipped.
    pub fn daily_with_subset(
        batches: &HashMap<String, SourceBatch>,
        source_names: &[String],
        subset_names: &[String],
        rules: &ColumnRules,
    ) -> DailyPass {
        let subset: HashSet<&str> = subset_names.iter().map(String::as_str).collect();
        let mut pass = DailyPass::default();

        for source in source_names {
            let rows = match batches.get(source) {
                Some(SourceBatch::Rows(rows)) => rows,
                Some(SourceBatch::Unavailable(reason)) => {
                    push(
                        &mut pass.diagnostics,
                        Diagnostic::SourceUnavailable {
                            source: source.clone(),
                            reason: reason.clone(),
                        },
                    );
                    continue;
                }
                None => {
                    push(
                        &mut pass.diagnostics,
                        Diagnostic::SourceUnavailable {
                            source: source.clone(),
                            reason: "not fetched".into(),
                        },
                    );
                    continue;
                }
            };

            if rows.len() < 2 {
                push(
                    &mut pass.diagnostics,
                    Diagnostic::EmptySource {
                        source: source.clone(),
                    },
                );
                continue;
            }

            let in_subset = subset.contains(source.as_str());

            // Sheet row numbers are 1-based with the header on row 1
            for (index, row) in rows.iter().enumerate().skip(1) {
                let entry = match extractor::extract(source, row, rules) {
                    Ok(entry) => entry,
                    Err(skip) => {
                        push(&mut pass.diagnostics, skip_diagnostic(source, index + 1, skip));
                        continue;
                    }
                };

                pass.full
                    .entry(entry.date.clone())
                    .or_insert_with(|| DailySummary::new(entry.date.clone()))
                    .add(&entry);

                if in_subset {
                    pass.subset
                        .entry(entry.date.clone())
                        .or_insert_with(|| DailySummary::income_only(entry.date.clone()))
                        .add(&entry);
                }
            }
        }

        log::debug!(
            "daily pass: {} dates, {} subset dates, {} diagnostics",
            pass.full.len(),
            pass.subset.len(),
            pass.diagnostics.len()
        );
        pass
    }

    /// Roll daily summaries into Monday-start weeks keyed by the Monday's
    /// dd/mm/yyyy label.
    ///
    /// Fails on the first date that is not a valid dd/mm/yyyy date: a
    /// dropped day would leave a week total silently short.
    pub fn weekly<'a, I>(daily: I, source_names: &[String]) -> Result<HashMap<String, WeeklySummary>>
    where
        I: IntoIterator<Item = &'a DailySummary>,
    {
        let mut weekly_map: HashMap<String, WeeklySummary> = HashMap::new();

        for day in daily {
            let date = parse_sheet_date(&day.date)?;
            let label = format_sheet_date(week_start(date));

            let week = weekly_map
                .entry(label.clone())
                .or_insert_with(|| WeeklySummary::new(label));

            for source in source_names {
                *week.income.entry(source.clone()).or_insert(0.0) +=
                    day.income_for(source).unwrap_or(0.0);
            }
            week.total += day.total;
            week.days = week.days.saturating_add(1);
        }

        Ok(weekly_map)
    }

    /// Cumulative P/L, turnover and ROI per source, in `source_names` order
    pub fn all_time<'a, I>(daily: I, source_names: &[String]) -> Vec<AllTimeSummary>
    where
        I: IntoIterator<Item = &'a DailySummary>,
    {
        let mut totals: Vec<(f64, f64)> = vec![(0.0, 0.0); source_names.len()];

        for day in daily {
            for (source, (pl, turnover)) in source_names.iter().zip(totals.iter_mut()) {
                *pl += day.income_for(source).unwrap_or(0.0);
                *turnover += day.turnover_for(source).unwrap_or(0.0);
            }
        }

        source_names
            .iter()
            .zip(totals)
            .map(|(source, (pl, turnover))| AllTimeSummary::new(source.clone(), pl, turnover))
            .collect()
    }
}

fn skip_diagnostic(source: &str, row: usize, skip: RowSkip) -> Diagnostic {
    match skip {
        RowSkip::MissingColumn { column } => Diagnostic::MissingColumn {
            source: source.to_string(),
            row,
            column,
        },
        RowSkip::UnparseableNumber { column, value } => Diagnostic::UnparseableNumber {
            source: source.to_string(),
            row,
            column,
            value,
        },
    }
}

fn push(diagnostics: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    log::warn!("{}", diagnostic);
    diagnostics.push(diagnostic);
}
