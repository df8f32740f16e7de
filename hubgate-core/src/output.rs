//! # Output Formatting
//!
//! Colored status lines and value formatting for terminal output.

use owo_colors::OwoColorize;

/// Helper function to safely get an emoji or fallback to a default character
pub fn get_emoji_or_default(name: &str, default: &str) -> String {
  match emojis::get_by_shortcode(name) {
    Some(emoji) => emoji.to_string(),
    None => default.to_string(),
  }
}

/// Print a success message
pub fn print_success(message: &str) {
  let check = get_emoji_or_default("check_mark", "✓");
  println!("{} {}", check.green().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
  let cross = get_emoji_or_default("cross_mark", "✗");
  eprintln!("{} {}", cross.red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
  let warning = get_emoji_or_default("warning", "⚠");
  println!("{} {}", warning.yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
  let info = get_emoji_or_default("information", "ℹ");
  println!("{} {}", info.blue().bold(), message);
}

/// Print a section header
pub fn print_header(header: &str) {
  println!("\n{}", header.blue().bold());
}

/// Format a GitHub login
pub fn format_login(login: &str) -> String {
  format!("@{login}").bright_cyan().bold().to_string()
}

/// Format a timestamp
pub fn format_timestamp(timestamp: &str) -> String {
  timestamp.yellow().to_string()
}

/// Format a route or operation name
pub fn format_route(name: &str) -> String {
  name.purple().to_string()
}

/// Format an HTTP status code, green for 2xx and red otherwise
pub fn format_status(status: u16) -> String {
  if (200..300).contains(&status) {
    status.green().to_string()
  } else {
    status.red().to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_get_emoji_or_default() {
    let result = get_emoji_or_default("check_mark", "✓");
    assert!(!result.is_empty());

    let result = get_emoji_or_default("nonexistent_emoji", "fallback");
    assert_eq!(result, "fallback");
  }

  #[test]
  fn test_format_functions() {
    assert!(format_login("octocat").contains("@octocat"));
    assert!(format_timestamp("2023-01-01T00:00:00Z").contains("2023-01-01"));
    assert!(format_route("list_pr").contains("list_pr"));
  }

  #[test]
  fn test_format_status() {
    assert!(format_status(200).contains("200"));
    assert!(format_status(404).contains("404"));
  }
}
