//! Folding accepted commits into [`Metrics`].
//!
//! Every list sorted by count uses a stable sort over first-seen order, so
//! ties keep the order in which the (oldest-first) commit list met them.

use crate::model::{
    CodeChurnByDay, CommitInfo, CommitsByAuthor, CommitsByDay, CommitsByDirectory, FileHotspot,
    Metrics,
};
use crate::util::{day_key, top_level_directory};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::Hash;

pub fn build_metrics(
    repo_path: String,
    branch: String,
    head_commit_id: String,
    commits: &[CommitInfo],
) -> Metrics {
    if commits.is_empty() {
        return Metrics::empty(repo_path, branch, head_commit_id);
    }

    let commits_by_author = commits_by_author(commits);

    Metrics {
        repo_path,
        branch,
        head_commit_id,
        total_commits: commits.len() as u32,
        earliest_date: commits.iter().map(|c| c.author_date).min(),
        latest_date: commits.iter().map(|c| c.author_date).max(),
        unique_authors: commits_by_author.len() as u32,
        commits_by_day: commits_by_day(commits),
        commits_by_author,
        commits_by_directory: commits_by_directory(commits),
        code_churn_by_day: code_churn_by_day(commits),
        file_hotspots: file_hotspots(commits),
    }
}

pub fn commits_by_day(commits: &[CommitInfo]) -> Vec<CommitsByDay> {
    let mut days: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for commit in commits {
        *days.entry(day_key(&commit.author_date)).or_insert(0) += 1;
    }
    days.into_iter()
        .map(|(day, commit_count)| CommitsByDay { day, commit_count })
        .collect()
}

pub fn commits_by_author(commits: &[CommitInfo]) -> Vec<CommitsByAuthor> {
    let counts = count_in_order(
        commits
            .iter()
            .map(|c| (c.author_name.as_str(), c.author_email.as_str())),
    );
    let mut authors: Vec<CommitsByAuthor> = counts
        .into_iter()
        .map(|((name, email), commit_count)| CommitsByAuthor {
            author_name: name.to_string(),
            author_email: email.to_string(),
            commit_count,
        })
        .collect();
    authors.sort_by(|a, b| b.commit_count.cmp(&a.commit_count));
    authors
}

/// A commit counts once for every distinct top-level directory it touches.
pub fn commits_by_directory(commits: &[CommitInfo]) -> Vec<CommitsByDirectory> {
    let counts = count_in_order(commits.iter().flat_map(|commit| {
        distinct(
            commit
                .file_changes
                .iter()
                .map(|change| top_level_directory(&change.path)),
        )
    }));
    let mut directories: Vec<CommitsByDirectory> = counts
        .into_iter()
        .map(|(dir, commit_count)| CommitsByDirectory {
            directory_path: dir.to_string(),
            commit_count,
        })
        .collect();
    directories.sort_by(|a, b| b.commit_count.cmp(&a.commit_count));
    directories
}

pub fn code_churn_by_day(commits: &[CommitInfo]) -> Vec<CodeChurnByDay> {
    let mut days: BTreeMap<NaiveDate, CodeChurnByDay> = BTreeMap::new();
    for commit in commits {
        let day = day_key(&commit.author_date);
        days.entry(day)
            .or_insert_with(|| CodeChurnByDay::new(day))
            .add_commit(commit);
    }
    days.into_values().collect()
}

/// Per-file activity; a commit listing the same path twice counts once.
pub fn file_hotspots(commits: &[CommitInfo]) -> Vec<FileHotspot> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut hotspots: Vec<FileHotspot> = Vec::new();

    for commit in commits {
        let mut touched: HashSet<&str> = HashSet::new();
        for change in &commit.file_changes {
            let slot = *index.entry(change.path.as_str()).or_insert_with(|| {
                hotspots.push(FileHotspot::new(change.path.clone()));
                hotspots.len() - 1
            });
            let hotspot = &mut hotspots[slot];
            if touched.insert(change.path.as_str()) {
                hotspot.commit_count += 1;
            }
            hotspot.add_change(change);
        }
    }

    hotspots.sort_by(|a, b| b.commit_count.cmp(&a.commit_count));
    hotspots
}

fn count_in_order<K, I>(keys: I) -> Vec<(K, u32)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, u32)> = Vec::new();
    for key in keys {
        match index.get(&key) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }
    counts
}

fn distinct<K, I>(keys: I) -> Vec<K>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut seen = HashSet::new();
    keys.into_iter().filter(|k| seen.insert(k.clone())).collect()
}
