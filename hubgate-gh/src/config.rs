//! Gateway configuration resolved from the environment.

use std::env;

use tracing::debug;

use crate::consts::{API_BASE_URL, API_URL_ENV_VAR, TOKEN_ENV_VAR};

/// Token and endpoint used to build the HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
  pub token: Option<String>,
  pub base_url: String,
}

impl Default for GatewayConfig {
  fn default() -> Self {
    Self {
      token: None,
      base_url: API_BASE_URL.to_string(),
    }
  }
}

impl GatewayConfig {
  /// Read `GITHUB_TOKEN` and `HUBGATE_API_URL`; blank values count as unset.
  pub fn from_env() -> Self {
    let token = non_empty_var(TOKEN_ENV_VAR);
    let base_url = non_empty_var(API_URL_ENV_VAR).unwrap_or_else(|| API_BASE_URL.to_string());
    debug!(
      "Resolved gateway config: base_url={}, token={}",
      base_url,
      if token.is_some() { "set" } else { "unset" }
    );
    Self { token, base_url }
  }

  /// Replace the token when `token` is provided.
  pub fn with_token(mut self, token: Option<String>) -> Self {
    if let Some(token) = token {
      self.token = Some(token);
    }
    self
  }

  /// Replace the base URL when `base_url` is provided.
  pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
    if let Some(base_url) = base_url {
      self.base_url = base_url;
    }
    self
  }
}

fn non_empty_var(key: &str) -> Option<String> {
  env::var(key).ok().filter(|value| !value.trim().is_empty())
}
