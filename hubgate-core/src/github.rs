//! GitHub naming conventions shared across crates.
//!
//! Parses `git remote -v` listings into a repository reference and extracts
//! issue numbers from branch names that follow the `<number>-<slug>` pattern.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static REMOTE_FETCH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"github\.com[:/]([\w\-]+)/([\w\-]+)\.git \(fetch\)").expect("Failed to compile GitHub remote regex")
});

static ISSUE_BRANCH_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^(\d+)-").expect("Failed to compile issue branch regex"));

/// Parsed GitHub repository reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubRepo {
  /// Repository owner (user or organization)
  pub owner: String,
  /// Repository name
  pub repo: String,
}

impl GitHubRepo {
  pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
    Self {
      owner: owner.into(),
      repo: repo.into(),
    }
  }

  /// Returns the full repository path as `owner/repo`.
  pub fn full_name(&self) -> String {
    format!("{}/{}", self.owner, self.repo)
  }
}

impl fmt::Display for GitHubRepo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.owner, self.repo)
  }
}

/// Find the first GitHub fetch remote in a `git remote -v` style listing.
///
/// Only SSH (`git@github.com:owner/repo.git`) and HTTPS
/// (`https://github.com/owner/repo.git`) fetch URLs ending in `.git` are
/// recognised. Returns `None` when no line matches.
pub fn parse_owner_and_repo(listing: &str) -> Option<GitHubRepo> {
  let captures = REMOTE_FETCH_REGEX.captures(listing)?;
  let owner = captures.get(1)?.as_str();
  let repo = captures.get(2)?.as_str();
  Some(GitHubRepo::new(owner, repo))
}

/// Extract the issue number encoded as a numeric prefix of a branch name.
///
/// `42-fix-thing` yields `Some(42)`; `fix-thing` and `42` (no dash) yield
/// `None`.
pub fn issue_number_from_branch_name(branch: &str) -> Option<u64> {
  ISSUE_BRANCH_REGEX
    .captures(branch)
    .and_then(|captures| captures.get(1))
    .and_then(|number| number.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_ssh_fetch_remote() {
    let repo = parse_owner_and_repo("origin\tgit@github.com:acme/widgets.git (fetch)").unwrap();
    assert_eq!(repo, GitHubRepo::new("acme", "widgets"));
  }

  #[test]
  fn test_parse_https_fetch_remote() {
    let listing = "origin\thttps://github.com/acme/widgets.git (fetch)\n\
                   origin\thttps://github.com/acme/widgets.git (push)\n";
    let repo = parse_owner_and_repo(listing).unwrap();
    assert_eq!(repo.owner, "acme");
    assert_eq!(repo.repo, "widgets");
    assert_eq!(repo.full_name(), "acme/widgets");
  }

  #[test]
  fn test_parse_skips_non_github_remotes() {
    let listing = "mirror\tgit@gitlab.com:acme/widgets.git (fetch)\n\
                   mirror\tgit@gitlab.com:acme/widgets.git (push)\n\
                   upstream\tgit@github.com:acme-corp/big-widgets.git (fetch)\n\
                   upstream\tgit@github.com:acme-corp/big-widgets.git (push)\n";
    let repo = parse_owner_and_repo(listing).unwrap();
    assert_eq!(repo, GitHubRepo::new("acme-corp", "big-widgets"));
  }

  #[test]
  fn test_parse_requires_git_suffix_and_fetch_marker() {
    assert_eq!(parse_owner_and_repo("origin\thttps://github.com/acme/widgets (fetch)"), None);
    assert_eq!(parse_owner_and_repo("origin\tgit@github.com:acme/widgets.git (push)"), None);
    assert_eq!(parse_owner_and_repo(""), None);
  }

  #[test]
  fn test_issue_number_from_branch_name() {
    assert_eq!(issue_number_from_branch_name("42-fix-thing"), Some(42));
    assert_eq!(issue_number_from_branch_name("7-"), Some(7));
    assert_eq!(issue_number_from_branch_name("fix-thing"), None);
    assert_eq!(issue_number_from_branch_name("42"), None);
    assert_eq!(issue_number_from_branch_name("feature/42-fix-thing"), None);
  }

  #[test]
  fn test_issue_number_overflow_is_none() {
    assert_eq!(issue_number_from_branch_name("99999999999999999999999-huge"), None);
  }
}
