use super::run_analysis;
use crate::cli::CommonArgs;
use crate::output::SummaryFormat;

pub fn exec(common: CommonArgs, progress: bool) -> anyhow::Result<()> {
    let metrics = run_analysis(&common, progress)?;
    print!("{}", SummaryFormat::for_terminal().format(&metrics));
    Ok(())
}
