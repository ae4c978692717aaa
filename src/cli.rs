use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "reposcope")]
#[command(about = "Git repository analyzer: commit activity by day, author and directory")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, global = true, action = ArgAction::Count, help = "More log output (repeatable)")]
    pub verbose: u8,

    #[arg(short, long, global = true, conflicts_with = "verbose", help = "Only log errors")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone, Debug)]
pub struct CommonArgs {
    #[arg(help = "Path to the Git repository [default: current directory]")]
    pub path: Option<PathBuf>,

    #[arg(long, default_value = "HEAD", help = "Branch to analyze")]
    pub branch: String,

    #[arg(long, help = "Only include commits on or after this date (RFC3339, YYYY-MM-DD, or relative like \"2 weeks ago\")")]
    pub since: Option<String>,

    #[arg(long, help = "Only include commits on or before this date (RFC3339, YYYY-MM-DD, or relative)")]
    pub until: Option<String>,

    #[arg(long, help = "Maximum number of commits to analyze")]
    pub max_commits: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a repository and output metrics as JSON
    Analyze {
        #[command(flatten)]
        common: CommonArgs,

        #[arg(long, help = "Output file path [default: stdout]")]
        out: Option<PathBuf>,

        #[arg(long, help = "Single-line JSON")]
        compact: bool,
    },
    /// Analyze a repository and print a summary
    Summary {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Analyze a repository and generate an HTML report
    Report {
        #[command(flatten)]
        common: CommonArgs,

        #[arg(long, default_value = "./report", help = "Output directory for the report")]
        out: PathBuf,
    },
}

impl Cli {
    pub fn log_level(&self) -> Level {
        if self.quiet {
            return Level::ERROR;
        }
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    pub fn execute(self) -> Result<()> {
        let progress = !self.quiet && console::Term::stderr().is_term();
        match self.command {
            Commands::Analyze { common, out, compact } => {
                crate::commands::analyze::exec(common, out, compact, progress)
            }
            Commands::Summary { common } => crate::commands::summary::exec(common, progress),
            Commands::Report { common, out } => {
                crate::commands::report::exec(common, out, progress)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_for_analyze() {
        let cli = Cli::try_parse_from(["reposcope", "analyze"]).unwrap();
        assert_eq!(cli.log_level(), Level::WARN);
        match cli.command {
            Commands::Analyze { common, out, compact } => {
                assert!(common.path.is_none());
                assert_eq!(common.branch, "HEAD");
                assert!(common.since.is_none());
                assert!(common.max_commits.is_none());
                assert!(out.is_none());
                assert!(!compact);
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn parses_shared_filters_and_report_dir() {
        let cli = Cli::try_parse_from([
            "reposcope",
            "report",
            "/tmp/repo",
            "--branch",
            "main",
            "--since",
            "2024-01-01",
            "--max-commits",
            "50",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.log_level(), Level::DEBUG);
        match cli.command {
            Commands::Report { common, out } => {
                assert_eq!(common.path, Some(PathBuf::from("/tmp/repo")));
                assert_eq!(common.branch, "main");
                assert_eq!(common.since.as_deref(), Some("2024-01-01"));
                assert_eq!(common.max_commits, Some(50));
                assert_eq!(out, PathBuf::from("./report"));
            }
            _ => panic!("expected report"),
        }
    }

    #[test]
    fn rejects_negative_max_commits() {
        assert!(Cli::try_parse_from(["reposcope", "summary", "--max-commits", "-1"]).is_err());
    }
}
