//! Command line arguments and date handling

pub mod args;
pub mod date_parser;

pub use args::{parse_args, validate_args, Args};
