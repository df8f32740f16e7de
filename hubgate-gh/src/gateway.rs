//! # GitHub API Gateway
//!
//! Binds the route table to a transport and to the local repository. Each
//! gateway instance resolves `owner/repo` once, dispatches named operations,
//! and memoizes a few branch-scoped lookups for its whole lifetime.

use anyhow::{Context, Result};
use hubgate_core::{GitHubRepo, GitRepoContext, RepoContext};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::client::GitHubClient;
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::routes::{CallParams, find_route};
use crate::transport::{ApiResponse, Transport};

/// Write-once slots filled on first access and never cleared.
#[derive(Debug, Default)]
pub(crate) struct ResponseCache {
  pub(crate) pr: Option<Value>,
  pub(crate) issue: Option<Value>,
  pub(crate) pr_comments: Option<Vec<Value>>,
  pub(crate) pr_commits: Option<Vec<Value>>,
  pub(crate) pr_review_comments: Option<Vec<Value>>,
  pub(crate) user: Option<Value>,
}

/// GitHub REST gateway scoped to the repository it was created in.
pub struct GitHubGateway<T: Transport = GitHubClient> {
  pub(crate) transport: T,
  pub(crate) context: Box<dyn RepoContext>,
  repo: Option<GitHubRepo>,
  pub(crate) cache: ResponseCache,
}

impl GitHubGateway<GitHubClient> {
  /// Create a gateway for the repository containing the working directory.
  ///
  /// `token` falls back to `GITHUB_TOKEN` when not given.
  pub fn new(token: Option<String>) -> Result<Self> {
    let config = GatewayConfig::from_env().with_token(token);
    let context = GitRepoContext::discover()?;
    Self::from_config(&config, context)
  }

  /// Create a gateway from explicit configuration and repository context.
  pub fn from_config(config: &GatewayConfig, context: impl RepoContext + 'static) -> Result<Self> {
    Self::with_transport(GitHubClient::from_config(config), context)
  }
}

impl<T: Transport> GitHubGateway<T> {
  /// Create a gateway over any transport. Resolves `owner/repo` immediately;
  /// a repository without a GitHub remote leaves both unset.
  pub fn with_transport(transport: T, context: impl RepoContext + 'static) -> Result<Self> {
    let repo = context
      .owner_and_repo()
      .context("Failed to resolve GitHub repository from remotes")?;

    match &repo {
      Some(repo) => debug!("Gateway bound to {}", repo),
      None => warn!("No GitHub remote found; repository-scoped routes will fail"),
    }

    Ok(Self {
      transport,
      context: Box::new(context),
      repo,
      cache: ResponseCache::default(),
    })
  }

  pub fn owner(&self) -> Option<&str> {
    self.repo.as_ref().map(|repo| repo.owner.as_str())
  }

  pub fn repo(&self) -> Option<&str> {
    self.repo.as_ref().map(|repo| repo.repo.as_str())
  }

  pub fn transport(&self) -> &T {
    &self.transport
  }

  pub fn context(&self) -> &dyn RepoContext {
    self.context.as_ref()
  }

  /// Call parameters seeded with `owner` and `repo` when they are known.
  pub fn repo_params(&self) -> CallParams {
    match &self.repo {
      Some(repo) => CallParams::new()
        .param("owner", &repo.owner)
        .param("repo", &repo.repo),
      None => CallParams::new(),
    }
  }

  /// Dispatch a named operation and return its `(body, status)`.
  ///
  /// # Errors
  ///
  /// Fails for unknown routes, missing path parameters, transport failures,
  /// and statuses outside the route's accepted set.
  #[instrument(skip(self, params), level = "debug")]
  pub async fn call(&self, name: &str, params: CallParams) -> Result<ApiResponse> {
    let route = find_route(name)?;
    let request = route.build_request(&params)?;
    debug!("Dispatching {} {} via {}", request.method, request.path, route.name);

    let response = self
      .transport
      .execute(request)
      .await
      .with_context(|| format!("Route '{}' failed", route.name))?;

    if !route.accepts(response.status) {
      warn!("Route {} returned unexpected HTTP {}", route.name, response.status);
      return Err(
        GatewayError::UnexpectedStatus {
          route: route.name,
          status: response.status,
          body: response.body,
        }
        .into(),
      );
    }

    debug!("Route {} returned HTTP {}", route.name, response.status);
    Ok(response)
  }

  /// Dispatch a route that must return a JSON array.
  pub(crate) async fn call_for_list(&self, name: &str, params: CallParams) -> Result<Vec<Value>> {
    let response = self.call(name, params).await?;
    match response.body {
      Value::Array(items) => Ok(items),
      other => Err(anyhow::anyhow!("Route '{name}' returned a non-list body: {other}")),
    }
  }
}
