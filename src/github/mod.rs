//! Work items retrieved from the code hosting platform

pub mod collection;
pub mod dataset;
pub mod item;
pub mod search;
pub mod timestamp;

pub use collection::{Collection, Tracked};
pub use dataset::Dataset;
pub use item::{ItemDetails, ItemKind, PullRequestDetails, WorkItem};
pub use search::{SearchSnapshot, SearchSource};
pub use timestamp::{parse_timestamp, Timestamp};
