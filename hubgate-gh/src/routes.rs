//! # Route Table
//!
//! Every GitHub operation the gateway knows about, as data: a name, an HTTP
//! method, a path template with `{placeholder}` tokens, and the statuses that
//! count as success for that operation.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::error::GatewayError;
use crate::transport::{ApiRequest, HttpMethod};

static PLACEHOLDER_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\{(\w+)\}").expect("Failed to compile path placeholder regex"));

/// Accepted statuses for routes that do not list their own.
pub const DEFAULT_VALID_STATUS: &[u16] = &[200];

/// Static description of one REST operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
  pub name: &'static str,
  pub method: HttpMethod,
  pub path: &'static str,
  pub valid_status: &'static [u16],
}

impl Route {
  const fn new(name: &'static str, method: HttpMethod, path: &'static str, valid_status: &'static [u16]) -> Self {
    Self {
      name,
      method,
      path,
      valid_status,
    }
  }

  /// Whether `status` is a non-error outcome for this route.
  pub fn accepts(&self, status: reqwest::StatusCode) -> bool {
    self.valid_status.contains(&status.as_u16())
  }

  /// Placeholder names in template order.
  pub fn placeholders(&self) -> Vec<&'static str> {
    PLACEHOLDER_REGEX
      .captures_iter(self.path)
      .filter_map(|captures| captures.get(1))
      .map(|name| name.as_str())
      .collect()
  }

  /// Substitute every placeholder with its value from `params`. Each value
  /// is percent-encoded as a single path segment.
  pub fn render_path(&self, params: &CallParams) -> Result<String, GatewayError> {
    let mut rendered = String::with_capacity(self.path.len());
    let mut last = 0;

    for captures in PLACEHOLDER_REGEX.captures_iter(self.path) {
      let (Some(token), Some(name)) = (captures.get(0), captures.get(1)) else {
        continue;
      };
      let value = params.get(name.as_str()).ok_or_else(|| GatewayError::MissingPathParam {
        route: self.name,
        param: name.as_str().to_string(),
      })?;

      rendered.push_str(&self.path[last..token.start()]);
      rendered.push_str(&urlencoding::encode(value));
      last = token.end();
    }

    rendered.push_str(&self.path[last..]);
    Ok(rendered)
  }

  /// Build the request for this route. The call payload becomes the JSON
  /// body for `POST`/`PUT`/`PATCH` and query parameters otherwise.
  pub fn build_request(&self, params: &CallParams) -> Result<ApiRequest, GatewayError> {
    let mut request = ApiRequest::new(self.method, self.render_path(params)?);

    match params.payload() {
      Some(data) if self.method.sends_body() => request.body = Some(data.clone()),
      Some(Value::Object(fields)) => {
        request.query = fields
          .iter()
          .map(|(key, value)| (key.clone(), query_value(value)))
          .collect();
      }
      Some(other) => debug!("Ignoring non-object payload for {} {}: {}", self.method, self.name, other),
      None => {}
    }

    Ok(request)
  }
}

fn query_value(value: &Value) -> String {
  match value {
    Value::String(text) => text.clone(),
    other => other.to_string(),
  }
}

/// Path parameters and optional payload for a single dispatch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallParams {
  path: BTreeMap<String, String>,
  data: Option<Value>,
}

impl CallParams {
  pub fn new() -> Self {
    Self::default()
  }

  /// Set a path placeholder value.
  pub fn param(mut self, key: &str, value: impl ToString) -> Self {
    self.path.insert(key.to_string(), value.to_string());
    self
  }

  /// Attach a payload.
  pub fn data(mut self, data: Value) -> Self {
    self.data = Some(data);
    self
  }

  pub fn get(&self, key: &str) -> Option<&str> {
    self.path.get(key).map(String::as_str)
  }

  pub fn payload(&self) -> Option<&Value> {
    self.data.as_ref()
  }
}

/// The complete route table.
pub static ROUTES: &[Route] = &[
  Route::new("list_issues", HttpMethod::Get, "/orgs/{org}/issues", DEFAULT_VALID_STATUS),
  Route::new(
    "list_issue",
    HttpMethod::Get,
    "/repos/{owner}/{repo}/issues/{number}",
    &[200, 404],
  ),
  Route::new("list_labels", HttpMethod::Get, "/repos/{owner}/{repo}/labels", &[200, 404]),
  Route::new(
    "list_label",
    HttpMethod::Get,
    "/repos/{owner}/{repo}/label/{name}",
    &[200, 404],
  ),
  Route::new(
    "add_labels_to_issue",
    HttpMethod::Post,
    "/repos/{owner}/{repo}/issues/{number}/labels",
    &[200, 404],
  ),
  Route::new(
    "remove_label_from_issue",
    HttpMethod::Delete,
    "/repos/{owner}/{repo}/issues/{number}/labels/{name}",
    &[200, 404],
  ),
  Route::new(
    "remove_all_labels_from_issue",
    HttpMethod::Delete,
    "/repos/{owner}/{repo}/issues/{number}/labels",
    &[204, 404],
  ),
  Route::new("user", HttpMethod::Get, "/user", &[200]),
  Route::new(
    "create_issue",
    HttpMethod::Post,
    "/repos/{owner}/{repo}/issues",
    DEFAULT_VALID_STATUS,
  ),
  Route::new("create_pr", HttpMethod::Post, "/repos/{owner}/{repo}/pulls", &[201]),
  Route::new("list_pr", HttpMethod::Get, "/repos/{owner}/{repo}/pulls", &[200]),
  Route::new(
    "list_pr_review_comments",
    HttpMethod::Get,
    "/repos/{owner}/{repo}/pulls/{number}/comments",
    &[200],
  ),
  Route::new(
    "list_issue_comments",
    HttpMethod::Get,
    "/repos/{owner}/{repo}/issues/{number}/comments",
    &[200],
  ),
  Route::new(
    "list_issue_labels",
    HttpMethod::Get,
    "/repos/{owner}/{repo}/issues/{number}/labels",
    &[200, 404],
  ),
  Route::new(
    "list_pr_commits",
    HttpMethod::Get,
    "/repos/{owner}/{repo}/pulls/{number}/commits",
    &[200],
  ),
  Route::new(
    "merge_pr",
    HttpMethod::Put,
    "/repos/{owner}/{repo}/pulls/{number}/merge",
    &[200],
  ),
];

/// Look up a route by operation name.
pub fn find_route(name: &str) -> Result<&'static Route, GatewayError> {
  ROUTES
    .iter()
    .find(|route| route.name == name)
    .ok_or_else(|| GatewayError::UnknownRoute(name.to_string()))
}
