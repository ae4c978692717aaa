use super::run_analysis;
use crate::cli::CommonArgs;
use crate::output::JsonFormat;
use anyhow::Context;
use std::path::PathBuf;
use tracing::info;

pub fn exec(
    common: CommonArgs,
    out: Option<PathBuf>,
    compact: bool,
    progress: bool,
) -> anyhow::Result<()> {
    let metrics = run_analysis(&common, progress)?;
    let format = if compact { JsonFormat::compact() } else { JsonFormat::pretty() };

    match out {
        Some(path) => {
            format
                .write_to_file(&metrics, &path)
                .with_context(|| format!("Failed to write metrics to {}", path.display()))?;
            info!(path = %path.display(), "metrics written");
            eprintln!("Metrics written to {}", path.display());
        }
        None => {
            println!("{}", format.format(&metrics).context("Failed to serialize metrics")?);
        }
    }

    Ok(())
}
