//! Error kinds raised by the gateway itself.
//!
//! Operations return `anyhow::Result`; callers that need to branch on a
//! specific failure use `error.downcast_ref::<GatewayError>()`.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
  #[error("Unknown route '{0}'")]
  UnknownRoute(String),

  #[error("Route '{route}' requires path parameter '{param}'")]
  MissingPathParam { route: &'static str, param: String },

  #[error("Route '{route}' returned unexpected HTTP {status}: {body}")]
  UnexpectedStatus {
    route: &'static str,
    status: StatusCode,
    body: Value,
  },

  #[error("Branch '{branch}' does not start with an issue number (expected '<number>-...')")]
  NoIssueNumber { branch: String },

  #[error("Invalid GitHub timestamp '{value}'")]
  InvalidTimestamp {
    value: String,
    #[source]
    source: chrono::ParseError,
  },
}

impl GatewayError {
  /// HTTP status carried by the error, if it came from a response.
  pub fn status(&self) -> Option<StatusCode> {
    match self {
      Self::UnexpectedStatus { status, .. } => Some(*status),
      _ => None,
    }
  }
}
