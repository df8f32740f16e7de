//! # Git Utilities
//!
//! Resolves the repository context the gateway works against: the GitHub
//! `owner/repo` pair behind the configured remotes and the checked-out branch.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use git2::Repository;
use tracing::{debug, trace};

use crate::github::{GitHubRepo, issue_number_from_branch_name, parse_owner_and_repo};

/// Source of local repository facts consumed by the gateway.
pub trait RepoContext {
  /// Resolve the GitHub repository behind the first GitHub fetch remote.
  fn owner_and_repo(&self) -> Result<Option<GitHubRepo>>;

  /// Name of the currently checked-out branch.
  fn current_branch(&self) -> Result<String>;

  /// Issue number encoded in the current branch name, if any.
  fn issue_number_from_branch(&self) -> Result<Option<u64>> {
    let branch = self.current_branch()?;
    Ok(issue_number_from_branch_name(&branch))
  }
}

/// Detect if the given path or any parent directory is a Git repository
pub fn detect_repository_from_path<P: AsRef<Path>>(path: P) -> Option<PathBuf> {
  match Repository::discover(path.as_ref()) {
    Ok(repo) => repo.workdir().map(Path::to_path_buf),
    Err(_) => None,
  }
}

/// [`RepoContext`] backed by a repository on disk.
#[derive(Debug, Clone)]
pub struct GitRepoContext {
  path: PathBuf,
}

impl GitRepoContext {
  /// Locate the repository containing the current working directory.
  pub fn discover() -> Result<Self> {
    let current_dir = env::current_dir().context("Failed to read current directory")?;
    Self::discover_from_path(current_dir)
  }

  /// Locate the repository containing `path`.
  pub fn discover_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    let workdir = detect_repository_from_path(path)
      .ok_or_else(|| anyhow::anyhow!("Not in a Git repository: {}", path.display()))?;
    debug!("Using repository at {}", workdir.display());
    Ok(Self { path: workdir })
  }

  /// Working directory of the repository.
  pub fn path(&self) -> &Path {
    &self.path
  }

  fn open(&self) -> Result<Repository> {
    Repository::open(&self.path).with_context(|| format!("Failed to open Git repository at {}", self.path.display()))
  }

  /// Render the remotes the way `git remote -v` prints them.
  pub fn remote_listing(&self) -> Result<String> {
    let repo = self.open()?;
    let remotes = repo.remotes().context("Failed to list remotes")?;

    let mut listing = String::new();
    for name in remotes.iter().flatten() {
      let remote = repo
        .find_remote(name)
        .with_context(|| format!("Failed to read remote '{name}'"))?;
      let fetch_url = remote.url().unwrap_or_default();
      let push_url = remote.pushurl().unwrap_or(fetch_url);
      listing.push_str(&format!("{name}\t{fetch_url} (fetch)\n"));
      listing.push_str(&format!("{name}\t{push_url} (push)\n"));
    }

    trace!("Remote listing:\n{}", listing);
    Ok(listing)
  }
}

impl RepoContext for GitRepoContext {
  fn owner_and_repo(&self) -> Result<Option<GitHubRepo>> {
    let listing = self.remote_listing()?;
    Ok(parse_owner_and_repo(&listing))
  }

  fn current_branch(&self) -> Result<String> {
    let repo = self.open()?;
    let head = repo.head().context("Failed to get HEAD reference")?;

    if !head.is_branch() {
      return Err(anyhow::anyhow!("HEAD is detached; check out a branch first"));
    }

    head
      .shorthand()
      .map(str::to_string)
      .ok_or_else(|| anyhow::anyhow!("Current branch name is not valid UTF-8"))
  }
}

/// Resolve `owner/repo` for the repository containing the working directory.
pub fn owner_and_repo() -> Result<Option<GitHubRepo>> {
  GitRepoContext::discover()?.owner_and_repo()
}

/// Get the current branch name for the repository containing the working
/// directory.
pub fn current_branch() -> Result<String> {
  GitRepoContext::discover()?.current_branch()
}

/// Issue number encoded in the working directory's current branch.
pub fn issue_number_from_branch() -> Result<Option<u64>> {
  GitRepoContext::discover()?.issue_number_from_branch()
}
