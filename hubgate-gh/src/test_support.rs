//! In-memory transport and repository context for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use hubgate_core::{GitHubRepo, RepoContext};
use reqwest::StatusCode;
use serde_json::Value;

use crate::transport::{ApiRequest, ApiResponse, HttpMethod, Transport};

/// Serves canned responses keyed by method and path and records every request.
#[derive(Default)]
pub(crate) struct RecordingTransport {
  responses: HashMap<(HttpMethod, String), ApiResponse>,
  requests: Mutex<Vec<ApiRequest>>,
}

impl RecordingTransport {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  pub(crate) fn respond(mut self, method: HttpMethod, path: &str, status: StatusCode, body: Value) -> Self {
    self
      .responses
      .insert((method, path.to_string()), ApiResponse::new(body, status));
    self
  }

  pub(crate) fn requests(&self) -> Vec<ApiRequest> {
    self.requests.lock().map(|requests| requests.clone()).unwrap_or_default()
  }

  pub(crate) fn count(&self, method: HttpMethod, path: &str) -> usize {
    self
      .requests()
      .iter()
      .filter(|request| request.method == method && request.path == path)
      .count()
  }
}

impl Transport for RecordingTransport {
  async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
    let key = (request.method, request.path.clone());
    if let Ok(mut requests) = self.requests.lock() {
      requests.push(request);
    }

    self
      .responses
      .get(&key)
      .cloned()
      .ok_or_else(|| anyhow::anyhow!("No canned response for {} {}", key.0, key.1))
  }
}

/// Fixed repository facts.
pub(crate) struct StaticRepoContext {
  repo: Option<GitHubRepo>,
  branch: String,
}

impl StaticRepoContext {
  pub(crate) fn new(owner: &str, repo: &str, branch: &str) -> Self {
    Self {
      repo: Some(GitHubRepo::new(owner, repo)),
      branch: branch.to_string(),
    }
  }

  pub(crate) fn without_remote(branch: &str) -> Self {
    Self {
      repo: None,
      branch: branch.to_string(),
    }
  }
}

impl RepoContext for StaticRepoContext {
  fn owner_and_repo(&self) -> Result<Option<GitHubRepo>> {
    Ok(self.repo.clone())
  }

  fn current_branch(&self) -> Result<String> {
    Ok(self.branch.clone())
  }
}
