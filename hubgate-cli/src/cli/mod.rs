//! # Command Line Interface
//!
//! Defines the CLI structure and command handlers for hubgate: repository
//! context, issues, pull requests, labels, and raw route dispatch.

mod call;
mod context;
mod issue;
mod labels;
mod pr;
mod routes;
mod user;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use hubgate_core::output::format_status;
use hubgate_core::{GitRepoContext, print_info};
use hubgate_gh::{ApiResponse, GatewayConfig, GitHubGateway};
use serde::Serialize;
use tokio::runtime::Runtime;
use tracing::debug;

/// Top-level CLI command for the hubgate tool
#[derive(Parser)]
#[command(name = "hubgate")]
#[command(about = "A thin GitHub REST gateway for the repository you are in")]
#[command(
  long_about = "Hubgate resolves the GitHub repository from your git remotes and the\n\
        issue number from your branch name, then talks to the GitHub REST API\n\
        through a fixed table of named routes."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(long, value_enum, ignore_case = true, global = true, default_value_t = ColorMode::Auto)]
  pub colors: ColorMode,

  #[command(flatten)]
  pub gateway: GatewayArgs,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
  Always,
  Auto,
  Never,
}

/// Options shared by every command that talks to GitHub
#[derive(Args, Debug, Clone, Default)]
pub struct GatewayArgs {
  /// GitHub token (defaults to $GITHUB_TOKEN)
  #[arg(long, global = true)]
  pub token: Option<String>,

  /// GitHub API root (defaults to $HUBGATE_API_URL, then https://api.github.com)
  #[arg(long = "api-url", global = true)]
  pub api_url: Option<String>,

  /// Path inside the git repository to operate on (defaults to the current directory)
  #[arg(long = "repo", short = 'C', global = true)]
  pub repo: Option<PathBuf>,
}

/// Subcommands for the hubgate tool
#[derive(Subcommand)]
pub enum Commands {
  /// Dispatch any named route
  #[command(long_about = "Dispatch a route from the route table by name.\n\n\
            Path placeholders are filled from --param key=value pairs; owner and repo\n\
            default to the current repository. --data is sent as the JSON body for\n\
            POST/PUT/PATCH routes and as query parameters otherwise.")]
  Call(call::CallArgs),

  /// Show the repository, branch, and issue number hubgate resolved
  #[command(alias = "ctx")]
  Context,

  /// Issue operations
  #[command(subcommand)]
  Issue(issue::IssueCommands),

  /// Repository and issue labels
  #[command(subcommand)]
  Labels(labels::LabelsCommands),

  /// Pull request operations for the current branch
  #[command(subcommand)]
  Pr(pr::PrCommands),

  /// List the route table
  Routes,

  /// Show the authenticated user
  #[command(alias = "whoami")]
  User,
}

pub fn handle_cli(cli: Cli) -> Result<()> {
  match cli.colors {
    ColorMode::Always => owo_colors::set_override(true),
    ColorMode::Never => owo_colors::set_override(false),
    ColorMode::Auto => {}
  }

  match cli.command {
    Commands::Call(args) => call::handle_call_command(&cli.gateway, args),
    Commands::Context => context::handle_context_command(&cli.gateway),
    Commands::Issue(command) => issue::handle_issue_command(&cli.gateway, command),
    Commands::Labels(command) => labels::handle_labels_command(&cli.gateway, command),
    Commands::Pr(command) => pr::handle_pr_command(&cli.gateway, command),
    Commands::Routes => routes::handle_routes_command(),
    Commands::User => user::handle_user_command(&cli.gateway),
  }
}

/// Resolve the repository context selected by `--repo`, or the current one.
pub(crate) fn repo_context(args: &GatewayArgs) -> Result<GitRepoContext> {
  match &args.repo {
    Some(path) => GitRepoContext::discover_from_path(path),
    None => GitRepoContext::discover(),
  }
}

/// Build a gateway from the command line flags and the environment.
pub(crate) fn build_gateway(args: &GatewayArgs) -> Result<GitHubGateway> {
  let config = GatewayConfig::from_env()
    .with_token(args.token.clone())
    .with_base_url(args.api_url.clone());
  debug!("Using GitHub API at {}", config.base_url);

  GitHubGateway::from_config(&config, repo_context(args)?)
}

/// Runtime on which command handlers drive gateway calls to completion.
pub(crate) fn runtime() -> Result<Runtime> {
  Runtime::new().context("Failed to start async runtime")
}

/// Value parser for JSON arguments.
pub(crate) fn parse_json(raw: &str) -> Result<serde_json::Value, String> {
  serde_json::from_str(raw).map_err(|e| format!("invalid JSON: {e}"))
}

/// Print a value as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
  let rendered = serde_json::to_string_pretty(value).context("Failed to render JSON")?;
  println!("{rendered}");
  Ok(())
}

/// Print the status line and body of a raw gateway response.
pub(crate) fn print_response(response: &ApiResponse) -> Result<()> {
  print_info(&format!("HTTP {}", format_status(response.status.as_u16())));
  print_json(&response.body)
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["hubgate", "user", "--token", "abc", "-vv", "--colors", "never"]).unwrap();
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.colors, ColorMode::Never);
    assert_eq!(cli.gateway.token.as_deref(), Some("abc"));
  }

  #[test]
  fn test_repo_flag() {
    let cli = Cli::try_parse_from(["hubgate", "-C", "/tmp/project", "context"]).unwrap();
    assert_eq!(cli.gateway.repo, Some(PathBuf::from("/tmp/project")));
    assert!(matches!(cli.command, Commands::Context));
  }
}
