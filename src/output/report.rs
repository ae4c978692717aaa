use super::JsonFormat;
use crate::error::Result;
use crate::model::Metrics;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const INDEX_HTML: &str = include_str!("report_template.html");

pub const METRICS_FILE: &str = "metrics.json";
pub const INDEX_FILE: &str = "index.html";

/// Paths written by [`write_report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFiles {
    pub metrics: PathBuf,
    pub index: PathBuf,
}

/// Writes `metrics.json` and a static `index.html` that renders it, creating
/// `out_dir` if needed. Existing files are overwritten.
pub fn write_report(metrics: &Metrics, out_dir: &Path) -> Result<ReportFiles> {
    fs::create_dir_all(out_dir)?;

    let files = ReportFiles {
        metrics: out_dir.join(METRICS_FILE),
        index: out_dir.join(INDEX_FILE),
    };

    JsonFormat::pretty().write_to_file(metrics, &files.metrics)?;
    debug!(path = %files.metrics.display(), "wrote metrics");

    fs::write(&files.index, INDEX_HTML)?;
    debug!(path = %files.index.display(), "wrote report page");

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_both_files_into_new_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("report");
        let metrics = Metrics::empty("/repo".into(), "HEAD".into(), "abc".into());

        let files = write_report(&metrics, &out).unwrap();

        assert_eq!(files.metrics, out.join("metrics.json"));
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&files.metrics).unwrap()).unwrap();
        assert_eq!(json["repoPath"], "/repo");

        let html = fs::read_to_string(&files.index).unwrap();
        assert!(html.contains("fetch('metrics.json')"));
        assert!(html.contains("commitsOverTime"));
    }
}
