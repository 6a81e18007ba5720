//! Matching — ranks fetched postings against a profile.
//!
//! Two phases: a local keyword heuristic over every posting, then an optional oracle
//! re-score of the best candidates. Without an oracle the heuristic alone decides.

pub mod assembler;
pub mod handlers;
pub mod keywords;
pub mod lexicon;
pub mod local_scorer;
pub mod locality;
pub mod matcher;
pub mod oracle;
pub mod pipeline;
pub mod prompts;

pub use matcher::JobMatcher;
pub use oracle::{OracleScorer, ScoringOracle};
pub use pipeline::JobPipeline;
