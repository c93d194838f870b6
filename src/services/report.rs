//! Report building: one fetch-and-aggregate pass for every table view
//!
//! Everything is rebuilt from the fetched batches on each call; nothing is
//! carried over between runs.

use crate::config::AppConfig;
use crate::services::sorter::{self, SortDirection, DATE_KEY, WEEK_START_KEY};
use crate::services::Aggregator;
use crate::sources::RowSource;
use crate::types::{AllTimeSummary, DailySummary, Diagnostic, Result, SourceBatch, WeeklySummary};
use std::collections::HashMap;

/// All table views for one snapshot, dated views in ascending order.
///
/// Weekly views are rolled up on request, so a daily date that cannot be
/// placed in a week only fails the weekly tables.
#[derive(Debug, Clone)]
pub struct Report {
    pub daily: Vec<DailySummary>,
    pub all_time: Vec<AllTimeSummary>,
    pub subset_daily: Vec<DailySummary>,
    pub diagnostics: Vec<Diagnostic>,
    sources: Vec<String>,
    subset: Vec<String>,
}

impl Report {
    /// Combined row for the all-time table
    pub fn all_time_total(&self) -> AllTimeSummary {
        AllTimeSummary::total_row(&self.all_time)
    }

    pub fn weekly(&self) -> Result<Vec<WeeklySummary>> {
        let weekly = Aggregator::weekly(&self.daily, &self.sources)?;
        Ok(by_key(weekly, WEEK_START_KEY))
    }

    pub fn subset_weekly(&self) -> Result<Vec<WeeklySummary>> {
        let weekly = Aggregator::weekly(&self.subset_daily, &self.subset)?;
        Ok(by_key(weekly, WEEK_START_KEY))
    }
}

pub struct ReportService<'a> {
    config: &'a AppConfig,
}

impl<'a> ReportService<'a> {
    pub fn new(config: &'a AppConfig) -> Self {
        Self { config }
    }

    /// Fetch every configured tab from `source`, then aggregate
    pub fn load(&self, source: &dyn RowSource) -> Report {
        log::info!(
            "loading {} tabs from {}",
            self.config.sources.len(),
            source.name()
        );
        let batches = source.fetch_all(&self.config.sources);
        self.build(&batches)
    }

    /// Aggregate already-fetched batches
    pub fn build(&self, batches: &HashMap<String, SourceBatch>) -> Report {
        let config = self.config;
        let pass = Aggregator::daily_with_subset(
            batches,
            &config.sources,
            &config.subset,
            &config.column_rules,
        );

        let all_time = Aggregator::all_time(pass.full.values(), &config.sources);

        Report {
            daily: by_key(pass.full, DATE_KEY),
            all_time,
            subset_daily: by_key(pass.subset, DATE_KEY),
            diagnostics: pass.diagnostics,
            sources: config.sources.clone(),
            subset: config.subset.clone(),
        }
    }
}

fn by_key<R: sorter::Sortable + Clone>(map: HashMap<String, R>, key: &str) -> Vec<R> {
    let records: Vec<R> = map.into_values().collect();
    sorter::sort(&records, key, SortDirection::Ascending)
}
