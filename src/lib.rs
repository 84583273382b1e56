//! Temporal classification and aggregation of GitHub issue and pull request
//! activity for a single login.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod logging;
pub mod output;
pub mod stats;

pub use error::{StatsError, StatsResult};
