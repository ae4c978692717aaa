use crate::model::Metrics;
use console::{Style, StyledObject};
use std::fmt::Write;

const TOP_AUTHORS: usize = 10;
const TOP_DIRECTORIES: usize = 10;
const TOP_DAYS: usize = 5;
const TOP_FILES: usize = 10;

/// Layout options for the text summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SummaryFormat {
    pub color: bool,
}

impl SummaryFormat {
    /// Colors on when stdout supports them.
    pub fn for_terminal() -> Self {
        Self {
            color: console::colors_enabled(),
        }
    }

    fn paint<D>(&self, value: D, style: Style) -> StyledObject<D> {
        style.force_styling(self.color).apply_to(value)
    }

    pub fn format(&self, metrics: &Metrics) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = self.write_summary(&mut out, metrics);
        out
    }

    fn write_summary(&self, out: &mut String, metrics: &Metrics) -> std::fmt::Result {
        let bold = || Style::new().bold();

        writeln!(out, "{}", self.paint("=== RepoScope Analysis ===", bold()))?;
        writeln!(out)?;
        writeln!(out, "Repository: {}", metrics.repo_path)?;
        writeln!(out, "Branch: {}", metrics.branch)?;
        let head = if metrics.head_commit_id.is_empty() {
            "(none)"
        } else {
            metrics.short_head()
        };
        writeln!(out, "Head Commit: {head}")?;
        writeln!(out)?;

        writeln!(out, "{}", self.paint("--- Overview ---", bold()))?;
        writeln!(out, "Total Commits: {}", self.paint(metrics.total_commits, Style::new().cyan()))?;
        writeln!(
            out,
            "Unique Authors: {}",
            self.paint(metrics.unique_authors, Style::new().yellow())
        )?;
        if let (Some(earliest), Some(latest)) = (metrics.earliest_date, metrics.latest_date) {
            writeln!(
                out,
                "Date Range: {} to {}",
                earliest.format("%Y-%m-%d"),
                latest.format("%Y-%m-%d")
            )?;
        }
        if !metrics.code_churn_by_day.is_empty() {
            writeln!(
                out,
                "Lines: {} added, {} deleted",
                self.paint(metrics.lines_added(), Style::new().green()),
                self.paint(metrics.lines_deleted(), Style::new().red())
            )?;
        }
        writeln!(out)?;

        if !metrics.commits_by_author.is_empty() {
            writeln!(out, "{}", self.paint("--- Top Authors ---", bold()))?;
            for author in metrics.commits_by_author.iter().take(TOP_AUTHORS) {
                writeln!(
                    out,
                    "  {} ({}): {} commits ({:.1}%)",
                    author.author_name,
                    author.author_email,
                    author.commit_count,
                    percentage(author.commit_count, metrics.total_commits)
                )?;
            }
            writeln!(out)?;
        }

        if !metrics.commits_by_directory.is_empty() {
            writeln!(out, "{}", self.paint("--- Most Active Directories ---", bold()))?;
            for dir in metrics.commits_by_directory.iter().take(TOP_DIRECTORIES) {
                writeln!(out, "  {}: {} commits", dir.directory_path, dir.commit_count)?;
            }
            writeln!(out)?;
        }

        if !metrics.file_hotspots.is_empty() {
            writeln!(out, "{}", self.paint("--- File Hotspots ---", bold()))?;
            for file in metrics.file_hotspots.iter().take(TOP_FILES) {
                writeln!(
                    out,
                    "  {}: {} commits, +{} -{}",
                    file.file_path, file.commit_count, file.lines_added, file.lines_deleted
                )?;
            }
            writeln!(out)?;
        }

        if !metrics.commits_by_day.is_empty() {
            writeln!(out, "{}", self.paint("--- Most Active Days ---", bold()))?;
            let mut days: Vec<_> = metrics.commits_by_day.iter().collect();
            days.sort_by(|a, b| b.commit_count.cmp(&a.commit_count));
            for day in days.into_iter().take(TOP_DAYS) {
                writeln!(out, "  {}: {} commits", day.day.format("%Y-%m-%d"), day.commit_count)?;
            }
        }

        Ok(())
    }
}

/// Human-readable report of `metrics`, without colors.
pub fn format_summary(metrics: &Metrics) -> String {
    SummaryFormat::default().format(metrics)
}

fn percentage(count: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::build_metrics;
    use crate::model::{CommitInfo, FileChange};
    use chrono::{FixedOffset, TimeZone};

    fn commit(id: &str, author: &str, day: u32, path: &str) -> CommitInfo {
        CommitInfo {
            id: id.into(),
            author_name: author.into(),
            author_email: format!("{author}@example.com"),
            author_date: FixedOffset::east_opt(0)
                .unwrap()
                .with_ymd_and_hms(2024, 2, day, 8, 0, 0)
                .unwrap(),
            message: String::new(),
            file_changes: vec![FileChange::new(path, 4, 1)],
        }
    }

    #[test]
    fn lists_sections_for_populated_metrics() {
        let commits = vec![
            commit("c1", "ann", 1, "src/a.rs"),
            commit("c2", "ann", 2, "src/b.rs"),
            commit("c3", "bob", 2, "docs/c.md"),
            commit("c4", "bob", 2, "docs/c.md"),
        ];
        let head = "0123456789abcdef".to_string();
        let metrics = build_metrics("/repo".into(), "HEAD".into(), head, &commits);
        let text = format_summary(&metrics);

        assert!(text.contains("Repository: /repo"));
        assert!(text.contains("Head Commit: 01234567"));
        assert!(text.contains("Date Range: 2024-02-01 to 2024-02-02"));
        assert!(text.contains("ann (ann@example.com): 2 commits (50.0%)"));
        assert!(text.contains("  src: 2 commits"));
        assert!(text.contains("  docs/c.md: 2 commits, +8 -2"));
        assert!(text.contains("Lines: 16 added, 4 deleted"));

        let busiest = text.find("2024-02-02: 3 commits").unwrap();
        let quieter = text.find("2024-02-01: 1 commits").unwrap();
        assert!(busiest < quieter);
    }

    #[test]
    fn empty_metrics_skip_lists() {
        let metrics = build_metrics("/repo".into(), "HEAD".into(), String::new(), &[]);
        let text = format_summary(&metrics);

        assert!(text.contains("Total Commits: 0"));
        assert!(text.contains("Head Commit: (none)"));
        assert!(!text.contains("Top Authors"));
        assert!(!text.contains("Date Range"));
    }
}
