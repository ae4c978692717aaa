//! Access to the version-control layer.
//!
//! The analyzer only needs four capabilities from a repository, collected in
//! [`CommitSource`]. [`GitRepo`] provides them on top of gix.

mod repo;

pub use repo::GitRepo;

use crate::error::Result;
use crate::model::FileChange;
use chrono::{DateTime, FixedOffset};

/// Commit metadata, without its diff.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitHeader {
    pub id: String,
    pub author_name: String,
    pub author_email: String,
    pub author_date: DateTime<FixedOffset>,
    pub message: String,
}

pub trait CommitSource {
    /// Tip commit of a branch. `"HEAD"` resolves to the current head, `None`
    /// for an unknown branch or an unborn HEAD.
    fn resolve_branch(&self, name: &str) -> Result<Option<String>>;

    /// Commit id HEAD points at, `None` while HEAD is unborn.
    fn head_id(&self) -> Result<Option<String>>;

    /// Every commit reachable from `tip`, oldest first.
    fn list_commits(&self, tip: &str) -> Result<Vec<CommitHeader>>;

    /// One row per path touched relative to the first parent, or to the
    /// empty tree for a root commit.
    fn diff_against_parent(&self, commit_id: &str) -> Result<Vec<FileChange>>;
}
