//! # User Command
//!
//! Shows the user the configured token authenticates as.

use anyhow::Result;
use hubgate_core::output::format_login;
use hubgate_core::print_success;
use hubgate_gh::GitHubUser;

use super::{GatewayArgs, build_gateway, print_json, runtime};

/// Handle the user command
pub(crate) fn handle_user_command(args: &GatewayArgs) -> Result<()> {
  let rt = runtime()?;
  let mut gateway = build_gateway(args)?;

  let user = rt.block_on(gateway.get_user())?;
  if let Ok(summary) = serde_json::from_value::<GitHubUser>(user.clone()) {
    print_success(&format!("Authenticated as {}", format_login(&summary.login)));
  }
  print_json(&user)
}
