//! Core types: report tables, date ranges, gap filling, tracing

pub mod gapfill;
pub mod table;
pub mod time;
pub mod tracing;

pub use gapfill::{DATE_HEADER, MONTH_HEADER, NOT_AVAILABLE, fill_date_gaps};
pub use table::{ReportTable, TableError};
pub use time::{DATE_FORMAT, DateRange, DateRangeError, MONTH_FORMAT};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
