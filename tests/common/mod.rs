#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::Command;

pub fn has_git() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

fn git(dir: &Path, args: &[&str]) {
    assert!(Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

pub fn init_git_repo(dir: &Path) {
    git(dir, &["init"]);
    git(dir, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    git(dir, &["config", "core.autocrlf", "false"]);
    git(dir, &["config", "core.safecrlf", "false"]);
    git(dir, &["config", "commit.gpgsign", "false"]);
    git(dir, &["config", "user.email", "you@example.com"]);
    git(dir, &["config", "user.name", "Your Name"]);
}

pub fn write_file(dir: &Path, name: &str, content: &[u8]) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let mut f = File::create(&path).unwrap();
    f.write_all(content).unwrap();
    f.sync_all().unwrap();
}

/// Commits the whole worktree as `author` at `date` (ISO 8601).
pub fn commit_all(dir: &Path, author: &str, date: &str, message: &str) {
    git(dir, &["add", "-A"]);
    assert!(Command::new("git")
        .args(["commit", "-m", message])
        .env("GIT_AUTHOR_NAME", author)
        .env("GIT_AUTHOR_EMAIL", format!("{}@example.com", author.to_lowercase()))
        .env("GIT_AUTHOR_DATE", date)
        .env("GIT_COMMITTER_NAME", author)
        .env("GIT_COMMITTER_EMAIL", format!("{}@example.com", author.to_lowercase()))
        .env("GIT_COMMITTER_DATE", date)
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

pub fn commit_files(dir: &Path, author: &str, date: &str, files: &[(&str, &str)]) {
    for (name, content) in files {
        write_file(dir, name, content.as_bytes());
    }
    let names: Vec<&str> = files.iter().map(|(n, _)| *n).collect();
    commit_all(dir, author, date, &format!("touch {}", names.join(", ")));
}

pub fn create_branch(dir: &Path, name: &str) {
    git(dir, &["branch", name]);
}

pub fn git_mv(dir: &Path, from: &str, to: &str) {
    git(dir, &["mv", from, to]);
}

/// The three-commit history used across tests: day 1 Alice touches
/// `src/x`, day 2 Bob touches `src/y` and `docs/z`, then Alice `docs/w`.
pub fn worked_example(dir: &Path) {
    init_git_repo(dir);
    commit_files(dir, "Alice", "2024-03-01T10:00:00+00:00", &[("src/x", "x\n")]);
    commit_files(
        dir,
        "Bob",
        "2024-03-02T09:00:00+00:00",
        &[("src/y", "y\n"), ("docs/z", "z\nz\n")],
    );
    commit_files(dir, "Alice", "2024-03-02T15:00:00+00:00", &[("docs/w", "w\n")]);
}
