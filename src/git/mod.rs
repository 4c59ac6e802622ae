mod diff;
mod repo;

pub use diff::ChangeCounts;
pub use repo::{parse_natural_duration, GitRepo};
