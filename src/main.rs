use anyhow::Result;
use clap::Parser;
use reposcope::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _ = tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_max_level(cli.log_level())
        .with_target(false)
        .try_init();

    cli.execute()
}
