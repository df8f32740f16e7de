//! # GitHub Label Endpoints
//!
//! Reading repository and issue labels, and adding or removing labels on an
//! issue.

use std::collections::BTreeSet;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{Value, json};
use tracing::{debug, instrument, warn};

use crate::consts::LABELS_MISSING_MESSAGE;
use crate::gateway::GitHubGateway;
use crate::models::GitHubLabel;
use crate::transport::{ApiResponse, Transport};

impl<T: Transport> GitHubGateway<T> {
  /// Labels of the repository, or of one issue when `issue_number` is given.
  /// Issue number 0 counts as not given.
  #[instrument(skip(self), level = "debug")]
  pub async fn get_labels(&self, issue_number: Option<u64>) -> Result<ApiResponse> {
    match issue_number.filter(|number| *number != 0) {
      Some(number) => {
        self
          .call("list_issue_labels", self.repo_params().param("number", number))
          .await
      }
      None => self.call("list_labels", self.repo_params()).await,
    }
  }

  /// A single repository label by name.
  #[instrument(skip(self), level = "debug")]
  pub async fn get_label(&self, name: &str) -> Result<ApiResponse> {
    self.call("list_label", self.repo_params().param("name", name)).await
  }

  /// Whether every requested label exists in the repository.
  ///
  /// The requested names must form a strict subset of the repository's
  /// labels: asking for exactly the full label set answers `false`.
  #[instrument(skip(self, labels), level = "debug")]
  pub async fn labels_exist<S: AsRef<str>>(&self, labels: &[S]) -> Result<bool> {
    let response = self.get_labels(None).await?;
    let existing: BTreeSet<String> = label_names(&response.body).into_iter().collect();
    let requested: BTreeSet<String> = labels.iter().map(|label| label.as_ref().to_string()).collect();

    let exists = requested.is_subset(&existing) && requested.len() < existing.len();
    debug!("Requested labels {:?} exist: {}", requested, exists);
    Ok(exists)
  }

  /// Add `labels` to an issue.
  ///
  /// Unless `force` is set, the labels are checked first. When any are
  /// missing nothing is sent and a synthetic 404 response is returned.
  #[instrument(skip(self), level = "debug")]
  pub async fn add_labels_to_issue(&self, issue_number: u64, labels: &[String], force: bool) -> Result<ApiResponse> {
    if !force && !self.labels_exist(labels).await? {
      warn!("Not adding labels to #{}: {}", issue_number, LABELS_MISSING_MESSAGE);
      return Ok(ApiResponse::new(
        json!({ "message": LABELS_MISSING_MESSAGE }),
        StatusCode::NOT_FOUND,
      ));
    }

    self
      .call(
        "add_labels_to_issue",
        self.repo_params().param("number", issue_number).data(json!(labels)),
      )
      .await
  }

  /// Remove one label, or every label when `remove_all` is set.
  #[instrument(skip(self), level = "debug")]
  pub async fn remove_label_from_issue(
    &self,
    issue_number: u64,
    label: Option<&str>,
    remove_all: bool,
  ) -> Result<ApiResponse> {
    let params = self.repo_params().param("number", issue_number);
    if remove_all {
      return self.call("remove_all_labels_from_issue", params).await;
    }

    let params = match label {
      Some(label) => params.param("name", label),
      None => params,
    };
    self.call("remove_label_from_issue", params).await
  }
}

/// Names from a label list body. Anything but an array yields no names.
fn label_names(body: &Value) -> Vec<String> {
  let Value::Array(items) = body else {
    return Vec::new();
  };

  items
    .iter()
    .filter_map(|item| serde_json::from_value::<GitHubLabel>(item.clone()).ok())
    .map(|label| label.name)
    .collect()
}

#[cfg(test)]
mod tests {
  use reqwest::StatusCode;
  use serde_json::json;

  use super::*;
  use crate::error::GatewayError;
  use crate::test_support::{RecordingTransport, StaticRepoContext};
  use crate::transport::HttpMethod;

  const LABELS: &str = "/repos/acme/widgets/labels";
  const ISSUE_LABELS: &str = "/repos/acme/widgets/issues/42/labels";

  fn gateway(transport: RecordingTransport) -> GitHubGateway<RecordingTransport> {
    GitHubGateway::with_transport(transport, StaticRepoContext::new("acme", "widgets", "42-fix-thing")).unwrap()
  }

  fn labels(names: &[&str]) -> Value {
    Value::Array(
      names
        .iter()
        .map(|name| json!({"name": name, "color": "f29513"}))
        .collect(),
    )
  }

  #[test]
  fn test_label_names_ignores_non_arrays() {
    assert!(label_names(&json!({"message": "Not Found"})).is_empty());
    assert_eq!(label_names(&labels(&["bug", "docs"])), vec!["bug", "docs"]);
  }

  #[tokio::test]
  async fn test_labels_exist_requires_strict_subset() -> anyhow::Result<()> {
    let single = gateway(RecordingTransport::new().respond(HttpMethod::Get, LABELS, StatusCode::OK, labels(&["bug"])));
    assert!(!single.labels_exist(&["bug"]).await?);

    let several = gateway(RecordingTransport::new().respond(
      HttpMethod::Get,
      LABELS,
      StatusCode::OK,
      labels(&["bug", "urgent", "docs"]),
    ));
    assert!(several.labels_exist(&["bug", "urgent"]).await?);
    assert!(!several.labels_exist(&["bug", "missing"]).await?);
    Ok(())
  }

  #[tokio::test]
  async fn test_labels_exist_treats_not_found_as_empty() -> anyhow::Result<()> {
    let gateway = gateway(RecordingTransport::new().respond(
      HttpMethod::Get,
      LABELS,
      StatusCode::NOT_FOUND,
      json!({"message": "Not Found"}),
    ));

    assert!(!gateway.labels_exist(&["bug"]).await?);
    Ok(())
  }

  #[tokio::test]
  async fn test_get_labels_for_issue() -> anyhow::Result<()> {
    let gateway = gateway(RecordingTransport::new().respond(
      HttpMethod::Get,
      ISSUE_LABELS,
      StatusCode::OK,
      labels(&["bug"]),
    ));

    let response = gateway.get_labels(Some(42)).await?;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body[0]["name"], "bug");
    Ok(())
  }

  #[tokio::test]
  async fn test_get_labels_issue_zero_lists_repository_labels() -> anyhow::Result<()> {
    let gateway = gateway(RecordingTransport::new().respond(
      HttpMethod::Get,
      LABELS,
      StatusCode::OK,
      labels(&["bug", "docs"]),
    ));

    let response = gateway.get_labels(Some(0)).await?;
    assert_eq!(label_names(&response.body), vec!["bug", "docs"]);
    assert_eq!(gateway.transport().count(HttpMethod::Get, LABELS), 1);
    assert_eq!(gateway.transport().requests().len(), 1);
    Ok(())
  }

  #[tokio::test]
  async fn test_get_label_by_name() -> anyhow::Result<()> {
    let gateway = gateway(RecordingTransport::new().respond(
      HttpMethod::Get,
      "/repos/acme/widgets/label/good%20first%20issue",
      StatusCode::OK,
      json!({"name": "good first issue"}),
    ));

    let (body, status) = gateway.get_label("good first issue").await?.into_parts();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "good first issue");
    Ok(())
  }

  #[tokio::test]
  async fn test_add_missing_labels_is_not_sent() -> anyhow::Result<()> {
    let gateway = gateway(RecordingTransport::new().respond(
      HttpMethod::Get,
      LABELS,
      StatusCode::OK,
      labels(&["bug", "docs"]),
    ));

    let response = gateway
      .add_labels_to_issue(42, &["missing".to_string()], false)
      .await?;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, json!({"message": LABELS_MISSING_MESSAGE}));
    assert_eq!(gateway.transport().count(HttpMethod::Post, ISSUE_LABELS), 0);
    Ok(())
  }

  #[tokio::test]
  async fn test_add_labels_sends_array_body() -> anyhow::Result<()> {
    let gateway = gateway(
      RecordingTransport::new()
        .respond(HttpMethod::Get, LABELS, StatusCode::OK, labels(&["bug", "docs"]))
        .respond(HttpMethod::Post, ISSUE_LABELS, StatusCode::OK, labels(&["bug"])),
    );

    let response = gateway.add_labels_to_issue(42, &["bug".to_string()], false).await?;
    assert_eq!(response.status, StatusCode::OK);

    let post = gateway
      .transport()
      .requests()
      .into_iter()
      .find(|request| request.method == HttpMethod::Post)
      .unwrap();
    assert_eq!(post.body, Some(json!(["bug"])));
    Ok(())
  }

  #[tokio::test]
  async fn test_forced_add_skips_existence_check() -> anyhow::Result<()> {
    let gateway = gateway(RecordingTransport::new().respond(
      HttpMethod::Post,
      ISSUE_LABELS,
      StatusCode::OK,
      labels(&["new-label"]),
    ));

    gateway
      .add_labels_to_issue(42, &["new-label".to_string()], true)
      .await?;
    assert_eq!(gateway.transport().count(HttpMethod::Get, LABELS), 0);
    Ok(())
  }

  #[tokio::test]
  async fn test_remove_label_dispatch() -> anyhow::Result<()> {
    let gateway = gateway(
      RecordingTransport::new()
        .respond(
          HttpMethod::Delete,
          "/repos/acme/widgets/issues/42/labels/bug",
          StatusCode::OK,
          labels(&[]),
        )
        .respond(HttpMethod::Delete, ISSUE_LABELS, StatusCode::NO_CONTENT, Value::Null),
    );

    let single = gateway.remove_label_from_issue(42, Some("bug"), false).await?;
    assert_eq!(single.status, StatusCode::OK);

    let all = gateway.remove_label_from_issue(42, Some("bug"), true).await?;
    assert_eq!(all.status, StatusCode::NO_CONTENT);
    assert_eq!(all.body, Value::Null);
    Ok(())
  }

  #[tokio::test]
  async fn test_remove_single_label_requires_name() -> anyhow::Result<()> {
    let gateway = gateway(RecordingTransport::new());

    let error = gateway.remove_label_from_issue(42, None, false).await.unwrap_err();
    assert!(matches!(
      error.downcast_ref::<GatewayError>(),
      Some(GatewayError::MissingPathParam { param, .. }) if param == "name"
    ));
    Ok(())
  }
}
