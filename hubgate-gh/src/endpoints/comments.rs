//! GitHub comment endpoints for the open pull request.

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{info, instrument};

use crate::gateway::GitHubGateway;
use crate::models::{CommentSummary, CommentsByUser, TimestampedComment, parse_github_timestamp};
use crate::transport::Transport;

impl<T: Transport> GitHubGateway<T> {
  /// Conversation comments on the open pull request; empty when there is
  /// none.
  #[instrument(skip(self), level = "debug")]
  pub async fn get_pr_comments(&mut self) -> Result<Vec<Value>> {
    if let Some(comments) = &self.cache.pr_comments {
      return Ok(comments.clone());
    }

    let number = self.open_pr_number().await?;
    let comments = match number {
      Some(number) => {
        self
          .call_for_list("list_issue_comments", self.repo_params().param("number", number))
          .await?
      }
      None => Vec::new(),
    };

    info!("Cached {} pull request comments", comments.len());
    self.cache.pr_comments = Some(comments.clone());
    Ok(comments)
  }

  /// Review (diff) comments on the open pull request; empty when there is
  /// none.
  #[instrument(skip(self), level = "debug")]
  pub async fn get_pr_review_comments(&mut self) -> Result<Vec<Value>> {
    if let Some(comments) = &self.cache.pr_review_comments {
      return Ok(comments.clone());
    }

    let number = self.open_pr_number().await?;
    let comments = match number {
      Some(number) => {
        self
          .call_for_list("list_pr_review_comments", self.repo_params().param("number", number))
          .await?
      }
      None => Vec::new(),
    };

    info!("Cached {} pull request review comments", comments.len());
    self.cache.pr_review_comments = Some(comments.clone());
    Ok(comments)
  }

  /// Review and conversation comments grouped by author, oldest first.
  #[instrument(skip(self), level = "debug")]
  pub async fn get_pr_and_review_comments(&mut self) -> Result<CommentsByUser> {
    let review_comments = self.get_pr_review_comments().await?;
    let pr_comments = self.get_pr_comments().await?;
    group_comments_by_user(review_comments.iter().chain(pr_comments.iter()))
  }
}

/// Group comments by `user.login`, each group stably sorted by `updated_at`.
///
/// Every comment is copied before it is paired with its timestamp, so the
/// inputs are left untouched.
pub fn group_comments_by_user<'a>(comments: impl IntoIterator<Item = &'a Value>) -> Result<CommentsByUser> {
  let mut grouped = CommentsByUser::new();

  for comment in comments {
    let summary: CommentSummary =
      serde_json::from_value(comment.clone()).context("Comment is missing user.login or updated_at")?;
    let updated_at = parse_github_timestamp(&summary.updated_at)?;

    grouped
      .entry(summary.user.login)
      .or_default()
      .push(TimestampedComment {
        updated_at,
        comment: comment.clone(),
      });
  }

  for comments in grouped.values_mut() {
    comments.sort_by_key(|comment| comment.updated_at);
  }

  Ok(grouped)
}
