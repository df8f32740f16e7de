//! # Pull Request Commands
//!
//! Operations on the pull request opened from the current branch, plus
//! opening a new one.

use anyhow::Result;
use clap::Subcommand;
use hubgate_core::output::{format_login, format_timestamp};
use hubgate_core::{RepoContext, print_header, print_info, print_success, print_warning};
use hubgate_gh::CommentsByUser;
use serde_json::Value;

use super::{GatewayArgs, build_gateway, print_json, runtime};

/// Subcommands for the pr command
#[derive(Subcommand, Debug)]
pub enum PrCommands {
  /// Show the open pull request for the current branch
  #[command(alias = "status")]
  Show,

  /// Conversation comments on the open pull request
  Comments,

  /// Commits of the open pull request
  Commits,

  /// Review comments on the open pull request
  #[command(name = "review-comments")]
  ReviewComments,

  /// Review and conversation comments grouped by author, oldest first
  Feedback {
    /// Print the grouped comments as JSON
    #[arg(long)]
    json: bool,
  },

  /// Merge the open pull request
  Merge,

  /// Open a pull request
  Create {
    /// Pull request title
    title: String,

    /// Branch to merge into
    #[arg(long, default_value = "main")]
    base: String,

    /// Branch to merge from (defaults to the current branch)
    #[arg(long)]
    head: Option<String>,

    /// Pull request description
    #[arg(long)]
    body: Option<String>,
  },
}

/// Handle the pr command
pub(crate) fn handle_pr_command(args: &GatewayArgs, command: PrCommands) -> Result<()> {
  let rt = runtime()?;
  let mut gateway = build_gateway(args)?;

  match command {
    PrCommands::Show => match rt.block_on(gateway.get_open_pr())? {
      Some(pr) => print_json(&pr),
      None => {
        print_warning("No open pull request for the current branch");
        Ok(())
      }
    },
    PrCommands::Comments => print_json(&rt.block_on(gateway.get_pr_comments())?),
    PrCommands::Commits => print_json(&rt.block_on(gateway.get_pr_commits())?),
    PrCommands::ReviewComments => print_json(&rt.block_on(gateway.get_pr_review_comments())?),
    PrCommands::Feedback { json } => {
      let grouped = rt.block_on(gateway.get_pr_and_review_comments())?;
      if json {
        print_json(&grouped)
      } else {
        print_feedback(&grouped);
        Ok(())
      }
    }
    PrCommands::Merge => match rt.block_on(gateway.merge_pr())? {
      Some(result) => {
        print_success("Merged pull request");
        print_json(&result)
      }
      None => {
        print_warning("No open pull request to merge");
        Ok(())
      }
    },
    PrCommands::Create {
      title,
      base,
      head,
      body,
    } => {
      let head = match head {
        Some(head) => head,
        None => gateway.context().current_branch()?,
      };
      let pr = rt.block_on(gateway.create_pr(&title, &head, &base, body.as_deref()))?;
      if let Some(number) = pr.get("number").and_then(Value::as_u64) {
        print_success(&format!("Opened pull request #{number} from {head} into {base}"));
      }
      print_json(&pr)
    }
  }
}

fn print_feedback(grouped: &CommentsByUser) {
  if grouped.is_empty() {
    print_info("No comments on the open pull request");
    return;
  }

  for (login, comments) in grouped {
    print_header(&format_login(login));
    for comment in comments {
      let body = comment.comment.get("body").and_then(Value::as_str).unwrap_or_default();
      let first_line = body.lines().next().unwrap_or_default();
      let stamp = comment.updated_at.format("%Y-%m-%d %H:%M").to_string();
      println!("  {}  {}", format_timestamp(&stamp), first_line);
    }
  }
}
