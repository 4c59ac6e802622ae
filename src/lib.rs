//! Commit history statistics for local git repositories.
//!
//! History is read through [`git::GitRepo`], summarised by
//! [`analysis::aggregate`] into a [`model::StatsReport`], and rendered by the
//! formatters in [`render`].

pub mod analysis;
pub mod charts;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod git;
pub mod logging;
pub mod model;
pub mod render;
pub mod util;
