//! Application orchestration

pub mod execution;
pub mod initialization;

pub use execution::{current_time, run_report, ReportSettings};
pub use initialization::{configure_logging, load_configuration};
