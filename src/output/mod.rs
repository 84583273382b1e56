//! Report output

pub mod format;
pub mod reports;

pub use format::{CompactFormat, ReportFormat};
pub use reports::{format_compact_table, format_json, format_summary, render_report};
