//! Services for row extraction, aggregation and sorting

pub mod aggregator;
pub mod extractor;
pub mod report;
pub mod sorter;

pub use aggregator::{Aggregator, DailyAggregation, DailyPass};
pub use extractor::{ColumnOffsets, ColumnOverride, ColumnRules};
pub use report::{Report, ReportService};
pub use sorter::{sort, SortDirection, SortState, Sortable};
