//! # Hubgate Core Library
//!
//! Local repository introspection shared by the gateway and the CLI: resolving
//! the GitHub `owner/repo` pair from the configured remotes, reading the
//! checked-out branch, and mapping branch names to issue numbers.

pub mod git;
pub mod github;
pub mod output;

pub use git::{GitRepoContext, RepoContext, current_branch, issue_number_from_branch, owner_and_repo};
pub use github::{GitHubRepo, issue_number_from_branch_name, parse_owner_and_repo};
pub use output::{print_error, print_header, print_info, print_success, print_warning};
