//! # GitHub HTTP Client
//!
//! The production [`Transport`]: sends resolved requests to the GitHub REST
//! API with the common headers attached and hands back the parsed body with
//! the raw status.

use anyhow::{Context, Result};
use reqwest::{Client, header};
use serde_json::Value;
use tracing::{debug, instrument, trace, warn};
use url::Url;

use crate::config::GatewayConfig;
use crate::consts::{ACCEPT, API_BASE_URL, USER_AGENT};
use crate::transport::{ApiRequest, ApiResponse, Transport};

/// Represents a GitHub API client
#[derive(Clone)]
pub struct GitHubClient {
  pub(crate) client: Client,
  pub(crate) base_url: String,
  pub(crate) token: Option<String>,
}

impl GitHubClient {
  /// Create a new GitHub client against the public API
  pub fn new(token: Option<String>) -> Self {
    if token.is_none() {
      warn!("No GitHub token configured; requests will be unauthenticated");
    }

    Self {
      client: Client::new(),
      base_url: API_BASE_URL.to_string(),
      token,
    }
  }

  /// Create a client from resolved configuration
  pub fn from_config(config: &GatewayConfig) -> Self {
    Self::new(config.token.clone()).with_base_url(&config.base_url)
  }

  /// Point the client at another API root (GitHub Enterprise, test servers)
  pub fn with_base_url(mut self, base_url: &str) -> Self {
    self.base_url = base_url.to_string();
    self
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  pub fn has_token(&self) -> bool {
    self.token.is_some()
  }

  /// Join a request path onto the base URL, percent-encoding as needed.
  pub(crate) fn url_for(&self, path: &str) -> Result<Url> {
    let mut url = Url::parse(&self.base_url).with_context(|| format!("Invalid API base URL '{}'", self.base_url))?;
    let joined = format!("{}{}", url.path().trim_end_matches('/'), path);
    url.set_path(&joined);
    Ok(url)
  }
}

impl Transport for GitHubClient {
  #[instrument(skip(self, request), fields(method = %request.method, path = %request.path), level = "debug")]
  async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
    let url = self.url_for(&request.path)?;
    trace!("GitHub API URL: {}", url);

    let mut builder = self
      .client
      .request(request.method.into(), url)
      .header(header::ACCEPT, ACCEPT)
      .header(header::USER_AGENT, USER_AGENT);

    if let Some(token) = &self.token {
      builder = builder.header(header::AUTHORIZATION, format!("token {token}"));
    }
    if !request.query.is_empty() {
      builder = builder.query(&request.query);
    }
    if let Some(body) = &request.body {
      builder = builder.json(body);
    }

    let response = builder
      .send()
      .await
      .with_context(|| format!("{} {} failed", request.method, request.path))?;

    let status = response.status();
    debug!("GitHub API response status: {}", status);

    let text = response.text().await.context("Failed to read response body")?;
    trace!("Response body: {}", text);

    Ok(ApiResponse::new(parse_body(&text), status))
  }
}

/// Empty bodies become `null`; bodies that are not JSON are kept as a string.
fn parse_body(text: &str) -> Value {
  if text.trim().is_empty() {
    return Value::Null;
  }

  serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
