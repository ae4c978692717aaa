//! Commit activity statistics for Git repositories.
//!
//! [`analyze`] walks a branch oldest-first, applies the date and count
//! filters from [`AnalysisOptions`], and folds the accepted commits into
//! [`Metrics`]: commits per day, per author and per top-level directory, plus
//! line churn per day and per file. The `output` module renders metrics as
//! JSON, a text summary or a static HTML report.

pub mod aggregate;
pub mod analyzer;
pub mod cli;
pub mod commands;
pub mod error;
pub mod git;
pub mod model;
pub mod output;
pub mod util;

pub use analyzer::{analyze, analyze_source};
pub use error::{RepoScopeError, Result};
pub use model::{AnalysisOptions, Metrics};
