//! # Transport Seam
//!
//! The request/response types exchanged between the gateway and whatever
//! performs HTTP. [`crate::client::GitHubClient`] is the production
//! implementation.

use std::fmt;
use std::future::Future;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

/// HTTP verbs used by the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
  Get,
  Post,
  Put,
  Patch,
  Delete,
}

impl HttpMethod {
  /// Whether a call payload travels as a JSON body (`true`) or as query
  /// parameters (`false`).
  pub const fn sends_body(self) -> bool {
    matches!(self, Self::Post | Self::Put | Self::Patch)
  }

  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Get => "GET",
      Self::Post => "POST",
      Self::Put => "PUT",
      Self::Patch => "PATCH",
      Self::Delete => "DELETE",
    }
  }
}

impl fmt::Display for HttpMethod {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl From<HttpMethod> for reqwest::Method {
  fn from(method: HttpMethod) -> Self {
    match method {
      HttpMethod::Get => Self::GET,
      HttpMethod::Post => Self::POST,
      HttpMethod::Put => Self::PUT,
      HttpMethod::Patch => Self::PATCH,
      HttpMethod::Delete => Self::DELETE,
    }
  }
}

/// A fully resolved request: path placeholders already substituted.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
  pub method: HttpMethod,
  /// Path relative to the API base URL, starting with `/`
  pub path: String,
  pub query: Vec<(String, String)>,
  pub body: Option<Value>,
}

impl ApiRequest {
  pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
    Self {
      method,
      path: path.into(),
      query: Vec::new(),
      body: None,
    }
  }
}

/// The `(body, status)` pair every dispatch returns.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
  /// Parsed JSON body; `null` when the response had no body
  pub body: Value,
  pub status: StatusCode,
}

impl ApiResponse {
  pub fn new(body: Value, status: StatusCode) -> Self {
    Self { body, status }
  }

  pub fn into_parts(self) -> (Value, StatusCode) {
    (self.body, self.status)
  }
}

/// Performs HTTP for the gateway.
///
/// Implementations send the request and report whatever status came back;
/// accepting or rejecting a status is the gateway's job.
pub trait Transport {
  fn execute(&self, request: ApiRequest) -> impl Future<Output = Result<ApiResponse>> + Send;
}
