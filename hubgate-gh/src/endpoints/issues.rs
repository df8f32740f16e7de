//! # GitHub Issue Endpoints
//!
//! Creating issues, resolving the issue that the current branch works on,
//! and listing organisation issues.

use anyhow::{Context, Result};
use hubgate_core::issue_number_from_branch_name;
use serde_json::{Map, Value, json};
use tracing::{info, instrument};

use crate::error::GatewayError;
use crate::gateway::GitHubGateway;
use crate::models::GitHubUser;
use crate::routes::CallParams;
use crate::transport::Transport;

impl<T: Transport> GitHubGateway<T> {
  /// Create an issue titled `title` with any extra fields in `data`.
  ///
  /// With `self_assign`, the authenticated user is looked up and set as the
  /// assignee.
  #[instrument(skip(self, data), level = "debug")]
  pub async fn create_issue(&self, title: &str, self_assign: bool, mut data: Map<String, Value>) -> Result<Value> {
    data.insert("title".to_string(), json!(title));

    if self_assign {
      let user = self.call("user", CallParams::new()).await?.body;
      let user: GitHubUser = serde_json::from_value(user).context("Authenticated user has no login")?;
      data.insert("assignee".to_string(), json!(user.login));
    }

    let response = self
      .call("create_issue", self.repo_params().data(Value::Object(data)))
      .await?;
    Ok(response.body)
  }

  /// Fetch the issue whose number prefixes the current branch name.
  ///
  /// The body is cached whatever the status, so a 404 body is returned again
  /// on later calls without another request.
  #[instrument(skip(self), level = "debug")]
  pub async fn get_current_issue(&mut self) -> Result<Value> {
    if let Some(issue) = &self.cache.issue {
      return Ok(issue.clone());
    }

    let branch = self.context.current_branch()?;
    let number = issue_number_from_branch_name(&branch).ok_or(GatewayError::NoIssueNumber { branch })?;

    let issue = self
      .call("list_issue", self.repo_params().param("number", number))
      .await?
      .body;
    info!("Cached issue #{}", number);
    self.cache.issue = Some(issue.clone());
    Ok(issue)
  }

  /// Issues across an organisation visible to the authenticated user.
  #[instrument(skip(self), level = "debug")]
  pub async fn list_org_issues(&self, org: &str) -> Result<Value> {
    let response = self.call("list_issues", CallParams::new().param("org", org)).await?;
    Ok(response.body)
  }
}
