//! # Routes Command
//!
//! Prints the route table.

use anyhow::Result;
use hubgate_core::output::format_route;
use hubgate_gh::ROUTES;

/// Handle the routes command
pub(crate) fn handle_routes_command() -> Result<()> {
  let width = ROUTES.iter().map(|route| route.name.len()).max().unwrap_or_default();

  for route in ROUTES {
    let statuses = route
      .valid_status
      .iter()
      .map(u16::to_string)
      .collect::<Vec<_>>()
      .join(",");
    // Pad before coloring so ANSI codes do not skew the columns.
    let name = format!("{:<width$}", route.name);
    println!("{}  {:<6} {}  [{}]", format_route(&name), route.method.as_str(), route.path, statuses);
  }

  Ok(())
}
