//! Subcommand executors. Each one runs the analysis and hands the metrics to
//! an output adapter.

pub mod analyze;
pub mod report;
pub mod summary;

use crate::analyzer::analyze_with_progress;
use crate::cli::CommonArgs;
use crate::model::{AnalysisOptions, Metrics};
use crate::util::resolve_range;
use anyhow::Context;
use chrono::Utc;

pub(crate) fn build_options(common: &CommonArgs) -> anyhow::Result<AnalysisOptions> {
    let (since, until) = resolve_range(common.since.as_deref(), common.until.as_deref(), Utc::now())
        .context("Failed to resolve date range")?;

    let mut options = AnalysisOptions::new().with_branch(common.branch.clone());
    if let Some(since) = since {
        options = options.with_since(since);
    }
    if let Some(until) = until {
        options = options.with_until(until);
    }
    if let Some(max) = common.max_commits {
        options = options.with_max_commits(max);
    }
    Ok(options)
}

pub(crate) fn run_analysis(common: &CommonArgs, progress: bool) -> anyhow::Result<Metrics> {
    let options = build_options(common)?;
    let path = match &common.path {
        Some(path) => path.clone(),
        None => std::env::current_dir().context("Failed to read current directory")?,
    };
    let path = path.to_string_lossy().to_string();

    analyze_with_progress(&path, &options, progress)
        .with_context(|| format!("Failed to analyze repository at {path}"))
}
