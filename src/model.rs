use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Branch name that stands for whatever HEAD currently points at.
pub const HEAD_BRANCH: &str = "HEAD";

/// Bucket for files that live directly in the repository root.
pub const ROOT_DIRECTORY: &str = "(root)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileChange {
    pub path: String,
    pub lines_added: u32,
    pub lines_deleted: u32,
}

impl FileChange {
    pub fn new(path: impl Into<String>, lines_added: u32, lines_deleted: u32) -> Self {
        Self {
            path: path.into(),
            lines_added,
            lines_deleted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitInfo {
    pub id: String,
    pub author_name: String,
    pub author_email: String,
    /// Author timestamp in the author's own UTC offset.
    pub author_date: DateTime<FixedOffset>,
    pub message: String,
    pub file_changes: Vec<FileChange>,
}

/// Filters applied while walking the commit log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOptions {
    pub branch: String,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
    pub max_commits: Option<usize>,
}

impl AnalysisOptions {
    pub fn new() -> Self {
        Self {
            branch: HEAD_BRANCH.to_string(),
            since: None,
            until: None,
            max_commits: None,
        }
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    pub fn with_since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn with_until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    pub fn with_max_commits(mut self, max_commits: usize) -> Self {
        self.max_commits = Some(max_commits);
        self
    }

    /// Inclusive on both ends.
    pub fn contains(&self, timestamp: &DateTime<FixedOffset>) -> bool {
        let timestamp = timestamp.with_timezone(&Utc);
        if let Some(since) = self.since {
            if timestamp < since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if timestamp > until {
                return false;
            }
        }
        true
    }
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitsByDay {
    pub day: NaiveDate,
    pub commit_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitsByAuthor {
    pub author_name: String,
    pub author_email: String,
    pub commit_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitsByDirectory {
    pub directory_path: String,
    pub commit_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeChurnByDay {
    pub day: NaiveDate,
    pub lines_added: u64,
    pub lines_deleted: u64,
    pub net_change: i64,
    pub total_churn: u64,
    pub commit_count: u32,
}

impl CodeChurnByDay {
    pub fn new(day: NaiveDate) -> Self {
        Self {
            day,
            lines_added: 0,
            lines_deleted: 0,
            net_change: 0,
            total_churn: 0,
            commit_count: 0,
        }
    }

    pub fn add_commit(&mut self, commit: &CommitInfo) {
        for change in &commit.file_changes {
            self.lines_added += change.lines_added as u64;
            self.lines_deleted += change.lines_deleted as u64;
        }
        self.net_change = self.lines_added as i64 - self.lines_deleted as i64;
        self.total_churn = self.lines_added + self.lines_deleted;
        self.commit_count += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileHotspot {
    pub file_path: String,
    pub commit_count: u32,
    pub lines_added: u64,
    pub lines_deleted: u64,
    pub net_change: i64,
    pub total_churn: u64,
}

impl FileHotspot {
    pub fn new(file_path: String) -> Self {
        Self {
            file_path,
            commit_count: 0,
            lines_added: 0,
            lines_deleted: 0,
            net_change: 0,
            total_churn: 0,
        }
    }

    pub fn add_change(&mut self, change: &FileChange) {
        self.lines_added += change.lines_added as u64;
        self.lines_deleted += change.lines_deleted as u64;
        self.net_change = self.lines_added as i64 - self.lines_deleted as i64;
        self.total_churn = self.lines_added + self.lines_deleted;
    }
}

/// Everything the output adapters render.
///
/// Field names on the wire follow the report page: the per-day list is
/// `commitsOverTime` and the range is `earliestCommitDate`/`latestCommitDate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub repo_path: String,
    pub branch: String,
    pub head_commit_id: String,
    pub total_commits: u32,
    #[serde(rename = "earliestCommitDate", skip_serializing_if = "Option::is_none", default)]
    pub earliest_date: Option<DateTime<FixedOffset>>,
    #[serde(rename = "latestCommitDate", skip_serializing_if = "Option::is_none", default)]
    pub latest_date: Option<DateTime<FixedOffset>>,
    pub unique_authors: u32,
    #[serde(rename = "commitsOverTime")]
    pub commits_by_day: Vec<CommitsByDay>,
    pub commits_by_author: Vec<CommitsByAuthor>,
    pub commits_by_directory: Vec<CommitsByDirectory>,
    #[serde(default)]
    pub code_churn_by_day: Vec<CodeChurnByDay>,
    #[serde(default)]
    pub file_hotspots: Vec<FileHotspot>,
}

impl Metrics {
    pub fn empty(repo_path: String, branch: String, head_commit_id: String) -> Self {
        Self {
            repo_path,
            branch,
            head_commit_id,
            total_commits: 0,
            earliest_date: None,
            latest_date: None,
            unique_authors: 0,
            commits_by_day: Vec::new(),
            commits_by_author: Vec::new(),
            commits_by_directory: Vec::new(),
            code_churn_by_day: Vec::new(),
            file_hotspots: Vec::new(),
        }
    }

    pub fn short_head(&self) -> &str {
        let end = self
            .head_commit_id
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.head_commit_id.len());
        &self.head_commit_id[..end]
    }

    pub fn lines_added(&self) -> u64 {
        self.code_churn_by_day.iter().map(|d| d.lines_added).sum()
    }

    pub fn lines_deleted(&self) -> u64 {
        self.code_churn_by_day.iter().map(|d| d.lines_deleted).sum()
    }
}
