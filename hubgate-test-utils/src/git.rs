//! Git repository management for testing
//!
//! Temporary repositories with a configured identity, plus helpers to commit,
//! branch, check out, and add remotes.

use std::fs;
use std::path::Path;

use anyhow::Result;
use git2::{BranchType, Repository, Signature};
use tempfile::TempDir;

/// A test guard owning a temporary git repository. The directory is removed
/// when the guard is dropped.
pub struct GitRepoTestGuard {
  /// The temporary directory containing the git repository
  pub temp_dir: TempDir,
  /// The git repository
  pub repo: Repository,
}

impl GitRepoTestGuard {
  /// Create a new test git repository
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let temp_path = temp_dir.path();

    let repo = Repository::init(temp_path).expect("Failed to initialize git repository");

    let mut config = repo.config().expect("Failed to get repository config");
    config
      .set_str("user.name", "Hubgate Test User")
      .expect("Failed to set user.name");
    config
      .set_str("user.email", "hubgate-test@example.com")
      .expect("Failed to set user.email");

    assert!(
      temp_path.join(".git").exists(),
      "Git repository was not properly initialized"
    );

    Self { temp_dir, repo }
  }

  /// Create a repository with an initial commit, a GitHub `origin` remote,
  /// and `branch` checked out.
  pub fn with_github_branch(remote_url: &str, branch: &str) -> Self {
    let guard = Self::new();
    create_commit(&guard.repo, "README.md", "hubgate", "Initial commit").expect("Failed to create commit");
    add_remote(&guard.repo, "origin", remote_url).expect("Failed to add remote");
    if guard.repo.find_branch(branch, BranchType::Local).is_err() {
      create_branch(&guard.repo, branch, None).expect("Failed to create branch");
    }
    checkout_branch(&guard.repo, branch).expect("Failed to checkout branch");
    guard
  }

  /// Get the path to the git repository
  pub fn path(&self) -> &Path {
    self.temp_dir.path()
  }
}

impl Default for GitRepoTestGuard {
  fn default() -> Self {
    Self::new()
  }
}

/// Helper function to create a commit in a repository
pub fn create_commit(repo: &Repository, file_name: &str, content: &str, message: &str) -> Result<()> {
  let repo_path = repo
    .workdir()
    .ok_or_else(|| anyhow::anyhow!("Repository has no working directory"))?;
  fs::write(repo_path.join(file_name), content)?;

  let mut index = repo.index()?;
  index.add_path(Path::new(file_name))?;
  index.write()?;

  let tree_id = index.write_tree()?;
  let tree = repo.find_tree(tree_id)?;

  let signature = Signature::now("Test User", "test@example.com")?;

  let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
  let parents: Vec<_> = parent.iter().collect();
  repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;

  Ok(())
}

/// Helper function to create a branch in a repository
pub fn create_branch(repo: &Repository, branch_name: &str, start_point: Option<&str>) -> Result<()> {
  let head = if let Some(start) = start_point {
    repo
      .find_branch(start, BranchType::Local)?
      .into_reference()
      .peel_to_commit()?
  } else {
    repo.head()?.peel_to_commit()?
  };

  repo.branch(branch_name, &head, false)?;
  Ok(())
}

/// Helper function to checkout a branch
pub fn checkout_branch(repo: &Repository, branch_name: &str) -> Result<()> {
  let obj = repo
    .revparse_single(&format!("refs/heads/{branch_name}"))?
    .peel_to_commit()?;

  repo.checkout_tree(&obj.into_object(), None)?;
  repo.set_head(&format!("refs/heads/{branch_name}"))?;

  Ok(())
}

/// Helper function to register a remote
pub fn add_remote(repo: &Repository, name: &str, url: &str) -> Result<()> {
  repo.remote(name, url)?;
  Ok(())
}
