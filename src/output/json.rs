use crate::error::Result;
use crate::model::Metrics;
use std::fs;
use std::path::Path;

/// How metrics are rendered as JSON. Field naming is fixed by the serde
/// attributes on [`Metrics`]; only layout is configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonFormat {
    pub pretty: bool,
}

impl JsonFormat {
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }

    pub fn format(&self, metrics: &Metrics) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(metrics)?
        } else {
            serde_json::to_string(metrics)?
        };
        Ok(json)
    }

    pub fn write_to_file(&self, metrics: &Metrics, path: &Path) -> Result<()> {
        fs::write(path, self.format(metrics)?)?;
        Ok(())
    }
}

impl Default for JsonFormat {
    fn default() -> Self {
        Self::pretty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CommitsByAuthor, CommitsByDay};
    use chrono::{FixedOffset, NaiveDate, TimeZone};

    fn sample() -> Metrics {
        let mut metrics = Metrics::empty("/repo".into(), "main".into(), "abcdef0123".into());
        let date = FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2024, 4, 1, 9, 30, 0)
            .unwrap();
        metrics.total_commits = 1;
        metrics.unique_authors = 1;
        metrics.earliest_date = Some(date);
        metrics.latest_date = Some(date);
        metrics.commits_by_day = vec![CommitsByDay {
            day: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            commit_count: 1,
        }];
        metrics.commits_by_author = vec![CommitsByAuthor {
            author_name: "Ann".into(),
            author_email: "ann@example.com".into(),
            commit_count: 1,
        }];
        metrics
    }

    #[test]
    fn uses_camel_case_field_names() {
        let json = JsonFormat::compact().format(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["repoPath"], "/repo");
        assert_eq!(value["headCommitId"], "abcdef0123");
        assert_eq!(value["totalCommits"], 1);
        assert_eq!(value["uniqueAuthors"], 1);
        assert_eq!(value["commitsOverTime"][0]["day"], "2024-04-01");
        assert_eq!(value["commitsOverTime"][0]["commitCount"], 1);
        assert_eq!(value["commitsByAuthor"][0]["authorEmail"], "ann@example.com");
        assert_eq!(value["earliestCommitDate"], "2024-04-01T09:30:00+01:00");
    }

    #[test]
    fn compact_is_single_line_and_pretty_is_not() {
        let metrics = sample();
        assert!(!JsonFormat::compact().format(&metrics).unwrap().contains('\n'));
        assert!(JsonFormat::pretty().format(&metrics).unwrap().contains('\n'));
    }

    #[test]
    fn round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.json");
        let metrics = sample();
        JsonFormat::default().write_to_file(&metrics, &path).unwrap();

        let read: Metrics = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(read, metrics);
    }
}
