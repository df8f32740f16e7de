//! # Call Command
//!
//! Dispatches any route from the table by name with user-supplied path
//! parameters and payload.

use anyhow::Result;
use clap::Args;
use serde_json::Value;

use super::{GatewayArgs, build_gateway, parse_json, print_response, runtime};

/// Arguments for the call command
#[derive(Args, Debug)]
pub struct CallArgs {
  /// Route name (see `hubgate routes`)
  pub route: String,

  /// Path parameter as key=value (repeatable)
  #[arg(short = 'p', long = "param", value_parser = parse_key_value)]
  pub params: Vec<(String, String)>,

  /// JSON payload
  #[arg(short = 'd', long = "data", value_parser = parse_json)]
  pub data: Option<Value>,
}

/// Handle the call command
pub(crate) fn handle_call_command(args: &GatewayArgs, call: CallArgs) -> Result<()> {
  let rt = runtime()?;
  let gateway = build_gateway(args)?;

  let mut params = gateway.repo_params();
  for (key, value) in &call.params {
    params = params.param(key, value);
  }
  if let Some(data) = call.data {
    params = params.data(data);
  }

  let response = rt.block_on(gateway.call(&call.route, params))?;
  print_response(&response)
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
  match raw.split_once('=') {
    Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
    _ => Err(format!("expected key=value, got '{raw}'")),
  }
}
