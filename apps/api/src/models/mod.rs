pub mod job;
pub mod lenient;
pub mod profile;

pub use job::{JobPosting, MatchedJob, Region};
pub use profile::Profile;
