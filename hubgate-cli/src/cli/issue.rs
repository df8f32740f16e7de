//! # Issue Commands
//!
//! Creating issues, showing the issue the current branch works on, and
//! listing organisation issues.

use anyhow::{Result, bail};
use clap::Subcommand;
use hubgate_core::print_success;
use hubgate_gh::GatewayError;
use serde_json::{Map, Value, json};

use super::{GatewayArgs, build_gateway, parse_json, print_json, runtime};

/// Subcommands for the issue command
#[derive(Subcommand, Debug)]
pub enum IssueCommands {
  /// Create an issue in the current repository
  Create {
    /// Issue title
    title: String,

    /// Issue body
    #[arg(long)]
    body: Option<String>,

    /// Label to apply (repeatable)
    #[arg(long = "label", short = 'l')]
    labels: Vec<String>,

    /// Assign the issue to the authenticated user
    #[arg(long = "self-assign")]
    self_assign: bool,

    /// Extra issue fields as a JSON object
    #[arg(long, value_parser = parse_json)]
    data: Option<Value>,
  },

  /// Show the issue named by the current branch (`<number>-...`)
  #[command(alias = "show")]
  Current,

  /// List issues across an organisation
  #[command(name = "list-org")]
  ListOrg {
    /// Organisation login
    org: String,
  },
}

/// Handle the issue command
pub(crate) fn handle_issue_command(args: &GatewayArgs, command: IssueCommands) -> Result<()> {
  let rt = runtime()?;
  let mut gateway = build_gateway(args)?;

  match command {
    IssueCommands::Create {
      title,
      body,
      labels,
      self_assign,
      data,
    } => {
      let data = issue_fields(data, body, labels)?;
      let issue = created_issue(rt.block_on(gateway.create_issue(&title, self_assign, data)))?;
      if let Some(number) = issue.get("number").and_then(Value::as_u64) {
        print_success(&format!("Created issue #{number}"));
      }
      print_json(&issue)
    }
    IssueCommands::Current => {
      let issue = rt.block_on(gateway.get_current_issue())?;
      print_json(&issue)
    }
    IssueCommands::ListOrg { org } => {
      let issues = rt.block_on(gateway.list_org_issues(&org))?;
      print_json(&issues)
    }
  }
}

/// GitHub answers a successful create with 201, which `create_issue` does
/// not accept. The error still carries the new issue as its body.
fn created_issue(result: Result<Value>) -> Result<Value> {
  let error = match result {
    Ok(issue) => return Ok(issue),
    Err(error) => error,
  };

  match error.downcast::<GatewayError>() {
    Ok(GatewayError::UnexpectedStatus {
      route: "create_issue",
      status,
      body,
    }) if status.as_u16() == 201 => Ok(body),
    Ok(other) => Err(other.into()),
    Err(error) => Err(error),
  }
}

/// Extra issue fields beyond the title. `--body` and `--label` win over
/// the same keys in `--data`.
fn issue_fields(data: Option<Value>, body: Option<String>, labels: Vec<String>) -> Result<Map<String, Value>> {
  let mut fields = match data {
    Some(Value::Object(fields)) => fields,
    Some(other) => bail!("--data must be a JSON object, got {other}"),
    None => Map::new(),
  };

  if let Some(body) = body {
    fields.insert("body".to_string(), json!(body));
  }
  if !labels.is_empty() {
    fields.insert("labels".to_string(), json!(labels));
  }
  Ok(fields)
}
