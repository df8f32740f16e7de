//! # Context Command
//!
//! Shows what hubgate resolved from the local repository without touching the
//! network.

use anyhow::Result;
use hubgate_core::{RepoContext, print_header, print_info, print_warning};

use super::{GatewayArgs, repo_context};

/// Handle the context command
pub(crate) fn handle_context_command(args: &GatewayArgs) -> Result<()> {
  let context = repo_context(args)?;

  print_header("Repository");
  println!("  Path: {}", context.path().display());
  match context.owner_and_repo()? {
    Some(repo) => println!("  GitHub: {repo}"),
    None => print_warning("No GitHub remote found"),
  }

  print_header("Branch");
  let branch = context.current_branch()?;
  println!("  Name: {branch}");
  match context.issue_number_from_branch()? {
    Some(number) => println!("  Issue: #{number}"),
    None => print_info("Branch name does not start with an issue number"),
  }

  Ok(())
}
