//! # GitHub Pull Request Endpoints
//!
//! Pull request operations keyed on the current branch: finding the open PR,
//! listing its commits, merging it, and opening new ones.

use anyhow::{Context, Result};
use serde_json::{Map, Value, json};
use tracing::{debug, info, instrument};

use crate::gateway::GitHubGateway;
use crate::models::PullRequestSummary;
use crate::transport::Transport;

impl<T: Transport> GitHubGateway<T> {
  /// Find the pull request whose head branch is the current branch.
  ///
  /// The list is filtered server-side by `head` and then re-checked locally
  /// for an exact `head.ref` match. A hit is cached; a miss is not.
  #[instrument(skip(self), level = "debug")]
  pub async fn get_open_pr(&mut self) -> Result<Option<Value>> {
    if let Some(pr) = &self.cache.pr {
      return Ok(Some(pr.clone()));
    }

    let branch = self.context.current_branch()?;
    let prs = self
      .call_for_list("list_pr", self.repo_params().data(json!({ "head": branch })))
      .await?;

    let found = prs.into_iter().find(|pr| {
      serde_json::from_value::<PullRequestSummary>(pr.clone()).is_ok_and(|summary| summary.head.ref_name == branch)
    });

    match found {
      Some(pr) => {
        info!("Cached open pull request for branch {}", branch);
        self.cache.pr = Some(pr.clone());
        Ok(Some(pr))
      }
      None => {
        debug!("No open pull request for branch {}", branch);
        Ok(None)
      }
    }
  }

  /// Number of the open pull request, if there is one.
  pub(crate) async fn open_pr_number(&mut self) -> Result<Option<u64>> {
    let Some(pr) = self.get_open_pr().await? else {
      return Ok(None);
    };

    let summary: PullRequestSummary = serde_json::from_value(pr).context("Failed to parse open pull request")?;
    Ok(Some(summary.number))
  }

  /// Commits of the open pull request; empty when there is none.
  #[instrument(skip(self), level = "debug")]
  pub async fn get_pr_commits(&mut self) -> Result<Vec<Value>> {
    if let Some(commits) = &self.cache.pr_commits {
      return Ok(commits.clone());
    }

    let number = self.open_pr_number().await?;
    let commits = match number {
      Some(number) => {
        self
          .call_for_list("list_pr_commits", self.repo_params().param("number", number))
          .await?
      }
      None => Vec::new(),
    };

    info!("Cached {} pull request commits", commits.len());
    self.cache.pr_commits = Some(commits.clone());
    Ok(commits)
  }

  /// Merge the open pull request. Returns `None` when there is no open PR.
  #[instrument(skip(self), level = "debug")]
  pub async fn merge_pr(&mut self) -> Result<Option<Value>> {
    let Some(number) = self.open_pr_number().await? else {
      debug!("Nothing to merge");
      return Ok(None);
    };

    let response = self
      .call(
        "merge_pr",
        self.repo_params().param("number", number).data(json!({})),
      )
      .await?;
    info!("Merged pull request #{}", number);
    Ok(Some(response.body))
  }

  /// Open a pull request from `head` into `base`.
  #[instrument(skip(self, body), level = "debug")]
  pub async fn create_pr(&self, title: &str, head: &str, base: &str, body: Option<&str>) -> Result<Value> {
    let mut data = Map::new();
    data.insert("title".to_string(), json!(title));
    data.insert("head".to_string(), json!(head));
    data.insert("base".to_string(), json!(base));
    if let Some(body) = body {
      data.insert("body".to_string(), json!(body));
    }

    let response = self
      .call("create_pr", self.repo_params().data(Value::Object(data)))
      .await?;
    Ok(response.body)
  }
}
