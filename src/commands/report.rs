use super::run_analysis;
use crate::cli::CommonArgs;
use crate::output::write_report;
use anyhow::Context;
use console::style;
use std::path::PathBuf;

pub fn exec(common: CommonArgs, out: PathBuf, progress: bool) -> anyhow::Result<()> {
    let metrics = run_analysis(&common, progress)?;
    let files = write_report(&metrics, &out)
        .with_context(|| format!("Failed to write report to {}", out.display()))?;

    println!("Metrics written to {}", files.metrics.display());
    println!("HTML report written to {}", files.index.display());
    println!();
    println!("{}", style("Report generated successfully!").green().bold());
    println!("Open {} in your browser to view the report.", files.index.display());
    Ok(())
}
