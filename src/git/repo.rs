use super::{CommitHeader, CommitSource};
use crate::error::{RepoScopeError, Result};
use crate::model::{FileChange, HEAD_BRANCH};
use chrono::{DateTime, FixedOffset};
use gix::object::tree::diff::ChangeDetached;
use gix::objs::tree::EntryMode;
use gix::{ObjectId, Repository};
use indicatif::{ProgressBar, ProgressStyle};
use similar::{ChangeTag, TextDiff};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};
use std::path::{Path, PathBuf};
use tracing::debug;

const BINARY_SNIFF_LEN: usize = 8192;

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
    progress: bool,
}

impl GitRepo {
    /// Open the repository at `path`. Parent directories are not searched.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = gix::open(path).map_err(|e| {
            RepoScopeError::InvalidInput(format!(
                "Path '{}' is not a valid Git repository: {e}",
                path.display()
            ))
        })?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(Self {
            repo,
            path,
            progress: false,
        })
    }

    /// Show a spinner on stderr while walking history.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn spinner(&self, message: &'static str) -> ProgressBar {
        if !self.progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} {pos}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(message);
        pb
    }

    fn parse_id(&self, id: &str) -> Result<ObjectId> {
        ObjectId::from_hex(id.as_bytes())
            .map_err(|e| RepoScopeError::GitRepo(format!("Invalid commit ID '{id}': {e}")))
    }

    fn commit_seconds(&self, id: ObjectId) -> Result<i64> {
        Ok(self.repo.find_commit(id)?.time()?.seconds)
    }

    fn header(&self, commit: &gix::Commit<'_>) -> Result<CommitHeader> {
        let author = commit.author()?;
        let time = author.time().map_err(|e| {
            RepoScopeError::InvalidDate(format!("Bad author time in {}: {e}", commit.id))
        })?;
        let offset = FixedOffset::east_opt(time.offset).ok_or_else(|| {
            RepoScopeError::InvalidDate(format!("Bad UTC offset {} in {}", time.offset, commit.id))
        })?;
        let author_date = DateTime::from_timestamp(time.seconds, 0)
            .ok_or_else(|| {
                RepoScopeError::InvalidDate(format!("Invalid timestamp: {}", time.seconds))
            })?
            .with_timezone(&offset);

        Ok(CommitHeader {
            id: commit.id.to_string(),
            author_name: author.name.to_string(),
            author_email: author.email.to_string(),
            author_date,
            message: commit.message_raw_sloppy().to_string().trim_end().to_string(),
        })
    }

    fn handle_change(&self, change: ChangeDetached, files: &mut Vec<FileChange>) -> Result<()> {
        match change {
            ChangeDetached::Addition {
                entry_mode,
                id,
                location,
                ..
            } => {
                if entry_mode.is_tree() {
                    return Ok(());
                }
                let added = self.line_count(entry_mode, id)?;
                files.push(FileChange::new(location.to_string(), added, 0));
            }
            ChangeDetached::Deletion {
                entry_mode,
                id,
                location,
                ..
            } => {
                if entry_mode.is_tree() {
                    return Ok(());
                }
                let deleted = self.line_count(entry_mode, id)?;
                files.push(FileChange::new(location.to_string(), 0, deleted));
            }
            ChangeDetached::Modification {
                previous_entry_mode,
                previous_id,
                entry_mode,
                id,
                location,
                ..
            } => {
                if entry_mode.is_tree() {
                    return Ok(());
                }
                // A directory replaced by a file: the file side is all new.
                let old = if previous_entry_mode.is_tree() {
                    Some(String::new())
                } else {
                    self.blob_text(previous_entry_mode, previous_id)?
                };
                let new = self.blob_text(entry_mode, id)?;
                let (added, deleted) = match (old, new) {
                    (Some(old), Some(new)) => line_diff(&old, &new),
                    _ => (0, 0),
                };
                files.push(FileChange::new(location.to_string(), added, deleted));
            }
            ChangeDetached::Rewrite {
                source_location,
                source_entry_mode,
                source_id,
                entry_mode,
                id,
                location,
                copy,
                ..
            } => {
                if entry_mode.is_tree() {
                    return Ok(());
                }
                let old = self.blob_text(source_entry_mode, source_id)?;
                let new = self.blob_text(entry_mode, id)?;
                let (deleted, added) = match (old, new) {
                    (Some(old), Some(new)) => (count_lines(&old), count_lines(&new)),
                    _ => (0, 0),
                };
                // Report as delete + add so both paths count as touched.
                if !copy {
                    files.push(FileChange::new(source_location.to_string(), 0, deleted));
                }
                files.push(FileChange::new(location.to_string(), added, 0));
            }
        }
        Ok(())
    }

    fn line_count(&self, mode: EntryMode, id: ObjectId) -> Result<u32> {
        Ok(self
            .blob_text(mode, id)?
            .map(|text| count_lines(&text))
            .unwrap_or(0))
    }

    /// Text of a blob, `None` for binary content and submodule entries,
    /// neither of which has lines to count.
    fn blob_text(&self, mode: EntryMode, id: ObjectId) -> Result<Option<String>> {
        if mode.is_commit() {
            return Ok(None);
        }
        let object = self.repo.find_object(id)?;
        let data = object.data.as_slice();
        if data.iter().take(BINARY_SNIFF_LEN).any(|&b| b == 0) {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(data).into_owned()))
    }
}

impl CommitSource for GitRepo {
    fn resolve_branch(&self, name: &str) -> Result<Option<String>> {
        if name == HEAD_BRANCH {
            return self.head_id();
        }

        let candidates = if name.starts_with("refs/") {
            vec![name.to_string()]
        } else {
            vec![format!("refs/heads/{name}"), format!("refs/remotes/{name}")]
        };

        for full_name in candidates {
            let found = self
                .repo
                .try_find_reference(full_name.as_str())
                .map_err(|e| {
                    RepoScopeError::InvalidInput(format!(
                        "Branch '{name}' could not be resolved: {e}"
                    ))
                })?;
            if let Some(mut reference) = found {
                let id = reference.peel_to_id_in_place().map_err(|e| {
                    RepoScopeError::GitRepo(format!("Failed to peel '{full_name}': {e}"))
                })?;
                debug!(branch = name, reference = %full_name, tip = %id, "resolved branch");
                return Ok(Some(id.to_string()));
            }
        }

        Ok(None)
    }

    fn head_id(&self) -> Result<Option<String>> {
        let mut head = self.repo.head()?;
        if head.is_unborn() {
            return Ok(None);
        }
        let commit = head.peel_to_commit_in_place()?;
        Ok(Some(commit.id.to_string()))
    }

    fn list_commits(&self, tip: &str) -> Result<Vec<CommitHeader>> {
        let tip = self.parse_id(tip)?;

        // Newest first by committer time; on equal times the commit discovered
        // first wins, so children always come out before their parents.
        let mut queue: BinaryHeap<(i64, Reverse<u64>, ObjectId)> = BinaryHeap::new();
        let mut seen: HashSet<ObjectId> = HashSet::new();
        let mut seq = 0u64;
        seen.insert(tip);
        queue.push((self.commit_seconds(tip)?, Reverse(seq), tip));

        let pb = self.spinner("Walking commits...");
        let mut commits = Vec::new();

        while let Some((_, _, commit_id)) = queue.pop() {
            let commit = self.repo.find_commit(commit_id)?;
            for parent in commit.parent_ids() {
                let parent: ObjectId = parent.into();
                if seen.insert(parent) {
                    seq += 1;
                    queue.push((self.commit_seconds(parent)?, Reverse(seq), parent));
                }
            }
            commits.push(self.header(&commit)?);
            pb.inc(1);
        }

        pb.finish_and_clear();
        commits.reverse();
        Ok(commits)
    }

    fn diff_against_parent(&self, commit_id: &str) -> Result<Vec<FileChange>> {
        let commit = self.repo.find_commit(self.parse_id(commit_id)?)?;
        let commit_tree = commit.tree()?;
        let parent_id: Option<ObjectId> = commit.parent_ids().next().map(|id| id.into());

        let changes: Vec<ChangeDetached> = match parent_id {
            Some(parent_id) => {
                let parent_tree = self.repo.find_commit(parent_id)?.tree()?;
                self.repo
                    .diff_tree_to_tree(Some(&parent_tree), Some(&commit_tree), None)?
            }
            None => self.repo.diff_tree_to_tree(None, Some(&commit_tree), None)?,
        };

        let mut files = Vec::new();
        for change in changes {
            self.handle_change(change, &mut files)?;
        }
        Ok(files)
    }
}

fn count_lines(text: &str) -> u32 {
    text.lines().count() as u32
}

/// Added and deleted line counts between two blob texts.
fn line_diff(old: &str, new: &str) -> (u32, u32) {
    let diff = TextDiff::from_lines(old, new);
    let mut added = 0u32;
    let mut deleted = 0u32;
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => added += 1,
            ChangeTag::Delete => deleted += 1,
            ChangeTag::Equal => {}
        }
    }
    (added, deleted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_diff_counts_inserts_and_deletes() {
        let old = "a\nb\nc\n";
        let new = "a\nB\nc\nd\n";
        assert_eq!(line_diff(old, new), (2, 1));
    }

    #[test]
    fn line_diff_against_empty_text() {
        assert_eq!(line_diff("", "x\ny\n"), (2, 0));
        assert_eq!(line_diff("x\n", ""), (0, 1));
        assert_eq!(line_diff("", ""), (0, 0));
    }

    #[test]
    fn open_rejects_plain_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = GitRepo::open(dir.path()).err().unwrap();
        assert!(err.is_invalid_input());
    }
}
