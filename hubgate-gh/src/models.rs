//! Typed views over the handful of GitHub fields the gateway reads.
//!
//! Records themselves stay as `serde_json::Value`; these structs only
//! deserialize the fields needed for matching, grouping, and sorting.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::consts::GITHUB_TIMESTAMP_FORMAT;
use crate::error::GatewayError;

/// Represents a GitHub user
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubUser {
  pub login: String,
}

/// Represents a GitHub pull request reference (head or base)
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestRef {
  #[serde(rename = "ref")]
  pub ref_name: String,
}

/// The parts of a pull request used to match it to a branch
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestSummary {
  pub number: u64,
  pub head: PullRequestRef,
}

/// The parts of an issue or review comment used for grouping
#[derive(Debug, Clone, Deserialize)]
pub struct CommentSummary {
  pub user: GitHubUser,
  pub updated_at: String,
}

/// Represents a GitHub label
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubLabel {
  pub name: String,
}

/// A copy of a comment record paired with its parsed `updated_at`.
///
/// Serializes as the original record plus an `updated_at_datetime` field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimestampedComment {
  #[serde(rename = "updated_at_datetime")]
  pub updated_at: DateTime<Utc>,
  #[serde(flatten)]
  pub comment: Value,
}

/// Comments keyed by author login, each list ascending by `updated_at`.
pub type CommentsByUser = BTreeMap<String, Vec<TimestampedComment>>;

/// Parse a GitHub `YYYY-MM-DDTHH:MM:SSZ` timestamp as UTC.
pub fn parse_github_timestamp(value: &str) -> Result<DateTime<Utc>, GatewayError> {
  NaiveDateTime::parse_from_str(value, GITHUB_TIMESTAMP_FORMAT)
    .map(|naive| naive.and_utc())
    .map_err(|source| GatewayError::InvalidTimestamp {
      value: value.to_string(),
      source,
    })
}

#[cfg(test)]
mod tests {
  use chrono::{Datelike, Timelike};
  use serde_json::json;

  use super::*;

  #[test]
  fn test_pull_request_summary_deserialization() {
    let json = json!({
        "number": 1347,
        "title": "Amazing new feature",
        "state": "open",
        "head": {
            "label": "octocat:new-feature",
            "ref": "new-feature",
            "sha": "6dcb09b5b57875f334f61aebed695e2e4193db5e"
        }
    });

    let pr: PullRequestSummary = serde_json::from_value(json).unwrap();
    assert_eq!(pr.number, 1347);
    assert_eq!(pr.head.ref_name, "new-feature");
  }

  #[test]
  fn test_comment_summary_deserialization() {
    let json = json!({
        "id": 1,
        "body": "Looks good",
        "user": {"login": "octocat", "id": 1},
        "updated_at": "2011-04-14T16:00:49Z"
    });

    let comment: CommentSummary = serde_json::from_value(json).unwrap();
    assert_eq!(comment.user.login, "octocat");
    assert_eq!(comment.updated_at, "2011-04-14T16:00:49Z");
  }

  #[test]
  fn test_parse_github_timestamp() {
    let parsed = parse_github_timestamp("2011-04-14T16:00:49Z").unwrap();
    assert_eq!(parsed.year(), 2011);
    assert_eq!(parsed.month(), 4);
    assert_eq!(parsed.hour(), 16);
    assert_eq!(parsed.second(), 49);
  }

  #[test]
  fn test_parse_github_timestamp_rejects_other_layouts() {
    assert!(parse_github_timestamp("2011-04-14 16:00:49").is_err());
    assert!(parse_github_timestamp("2011-04-14T16:00:49.123Z").is_err());
    assert!(matches!(
      parse_github_timestamp("yesterday"),
      Err(GatewayError::InvalidTimestamp { ref value, .. }) if value == "yesterday"
    ));
  }

  #[test]
  fn test_timestamped_comment_serialization() {
    let comment = TimestampedComment {
      updated_at: parse_github_timestamp("2011-04-14T16:00:49Z").unwrap(),
      comment: json!({"id": 7, "updated_at": "2011-04-14T16:00:49Z"}),
    };

    let value = serde_json::to_value(&comment).unwrap();
    assert_eq!(value["id"], 7);
    assert_eq!(value["updated_at"], "2011-04-14T16:00:49Z");
    assert_eq!(value["updated_at_datetime"], "2011-04-14T16:00:49Z");
  }
}
