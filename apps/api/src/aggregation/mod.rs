//! Aggregation: turns a profile into one deduplicated list of postings.

pub mod aggregator;
pub mod progress;
pub mod queries;

pub use aggregator::{FetchReport, JobAggregator};
pub use progress::{ProgressLog, ProgressSink};
