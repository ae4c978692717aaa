use crate::aggregate::build_metrics;
use crate::error::{RepoScopeError, Result};
use crate::git::{CommitSource, GitRepo};
use crate::model::{AnalysisOptions, CommitInfo, Metrics, HEAD_BRANCH};
use tracing::{debug, info};

/// Analyze the repository at `repo_path`.
///
/// The repository handle lives only for the duration of this call.
pub fn analyze(repo_path: &str, options: &AnalysisOptions) -> Result<Metrics> {
    analyze_with_progress(repo_path, options, false)
}

/// Same as [`analyze`], optionally drawing a spinner on stderr.
pub fn analyze_with_progress(
    repo_path: &str,
    options: &AnalysisOptions,
    progress: bool,
) -> Result<Metrics> {
    if repo_path.trim().is_empty() {
        return Err(RepoScopeError::InvalidInput(
            "Repository path cannot be empty.".to_string(),
        ));
    }

    let repo = GitRepo::open(repo_path)?.with_progress(progress);
    info!(path = %repo.path().display(), branch = %options.branch, "analyzing repository");
    analyze_source(&repo, repo_path, options)
}

/// Core pipeline over any [`CommitSource`]: resolve, walk, filter, diff, fold.
pub fn analyze_source<S: CommitSource>(
    source: &S,
    repo_path: &str,
    options: &AnalysisOptions,
) -> Result<Metrics> {
    let tip = source.resolve_branch(&options.branch)?;
    let head_commit_id = source.head_id()?.unwrap_or_default();

    let tip = match tip {
        Some(tip) => tip,
        // Unborn HEAD: a valid repository with nothing to walk.
        None if options.branch == HEAD_BRANCH => {
            info!("HEAD is unborn, repository has no commits");
            return Ok(build_metrics(
                repo_path.to_string(),
                options.branch.clone(),
                head_commit_id,
                &[],
            ));
        }
        None => {
            return Err(RepoScopeError::InvalidInput(format!(
                "Branch '{}' not found in repository.",
                options.branch
            )))
        }
    };

    let commits = collect_commits(source, &tip, options)?;
    info!(accepted = commits.len(), "commit walk finished");

    Ok(build_metrics(
        repo_path.to_string(),
        options.branch.clone(),
        head_commit_id,
        &commits,
    ))
}

fn collect_commits<S: CommitSource>(
    source: &S,
    tip: &str,
    options: &AnalysisOptions,
) -> Result<Vec<CommitInfo>> {
    let mut commits = Vec::new();

    for header in source.list_commits(tip)? {
        if !options.contains(&header.author_date) {
            debug!(commit = %header.id, date = %header.author_date, "outside date range");
            continue;
        }

        if let Some(max) = options.max_commits {
            if commits.len() >= max {
                debug!(max, "max commit count reached");
                break;
            }
        }

        let file_changes = source.diff_against_parent(&header.id)?;
        commits.push(CommitInfo {
            id: header.id,
            author_name: header.author_name,
            author_email: header.author_email,
            author_date: header.author_date,
            message: header.message,
            file_changes,
        });
    }

    Ok(commits)
}
