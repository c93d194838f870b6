mod render;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use pltrack::config::AppConfig;
use pltrack::services::sorter::{SortDirection, SortState, DATE_KEY, WEEK_START_KEY};
use pltrack::services::{Report, ReportService};
use pltrack::sources::{FileSource, RowSource, SheetsClient};
use pltrack::types::AllTimeSummary;
use std::path::PathBuf;

/// Daily, weekly and all-time P/L from spreadsheet tabs
#[derive(Parser)]
#[command(name = "pltrack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Read tab rows from a JSON export instead of Google Sheets
    #[arg(long, global = true)]
    input: Option<PathBuf>,

    /// Config file (default: ~/.pltrack/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the daily summary (default)
    Daily {
        /// Only the subset tabs, income only
        #[arg(long)]
        subset: bool,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Show the weekly summary (weeks start on Monday)
    Weekly {
        /// Only the subset tabs
        #[arg(long)]
        subset: bool,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Show all-time P/L, turnover and ROI per tab
    All {
        #[command(flatten)]
        view: ViewArgs,
    },
}

#[derive(Args, Default)]
struct ViewArgs {
    /// Column to sort by (date, weekStart, Total, a tab name, totalPL, roi, ...)
    #[arg(long)]
    sort: Option<String>,

    /// Sort descending
    #[arg(long)]
    desc: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl ViewArgs {
    fn sort_state(&self, default_key: &str) -> SortState {
        SortState {
            key: self.sort.clone().unwrap_or_else(|| default_key.to_string()),
            direction: if self.desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            },
        }
    }
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let config = AppConfig::load(self.config.as_deref()).context("loading config")?;
        let source: Box<dyn RowSource> = match &self.input {
            Some(path) => Box::new(
                FileSource::open(path).with_context(|| format!("reading {}", path.display()))?,
            ),
            None => {
                let (sheet_id, api_key) = config.credentials()?;
                Box::new(SheetsClient::new(sheet_id, api_key)?)
            }
        };

        let report = ReportService::new(&config).load(source.as_ref());
        if !report.diagnostics.is_empty() {
            log::warn!("{} rows or tabs skipped", report.diagnostics.len());
        }

        let command = self.command.unwrap_or(Commands::Daily {
            subset: false,
            view: ViewArgs::default(),
        });
        let output = render_command(&command, &report, &config)?;
        print!("{}", output);
        Ok(())
    }
}

fn render_command(command: &Commands, report: &Report, config: &AppConfig) -> anyhow::Result<String> {
    let output = match command {
        Commands::Daily { subset, view } => {
            let (records, sources) = if *subset {
                (&report.subset_daily, &config.subset)
            } else {
                (&report.daily, &config.sources)
            };
            let sort = view.sort_state(DATE_KEY);
            let sorted = sort.apply(records);
            if view.json {
                serde_json::to_string_pretty(&sorted)? + "\n"
            } else {
                render::daily_table(&sorted, sources, &sort)
            }
        }
        Commands::Weekly { subset, view } => {
            let (records, sources) = if *subset {
                (report.subset_weekly(), &config.subset)
            } else {
                (report.weekly(), &config.sources)
            };
            let records = records.context("rolling daily rows into weeks")?;
            let sort = view.sort_state(WEEK_START_KEY);
            let sorted = sort.apply(&records);
            if view.json {
                serde_json::to_string_pretty(&sorted)? + "\n"
            } else {
                render::weekly_table(&sorted, sources, &sort)
            }
        }
        Commands::All { view } => {
            // Configured tab order unless a sort column was asked for
            let sort = view.sort_state("");
            let rows: Vec<AllTimeSummary> = if view.sort.is_some() {
                sort.apply(&report.all_time)
            } else {
                report.all_time.clone()
            };
            if view.json {
                let body = serde_json::json!({
                    "rows": rows,
                    "total": AllTimeSummary::total_row(&rows),
                });
                serde_json::to_string_pretty(&body)? + "\n"
            } else {
                render::all_time_table(&rows, &sort)
            }
        }
    };
    Ok(output)
}
