//! # Label Commands
//!
//! Listing repository and issue labels and adding or removing labels on an
//! issue.

use anyhow::Result;
use clap::Subcommand;
use hubgate_core::{print_success, print_warning};

use super::{GatewayArgs, build_gateway, print_response, runtime};

/// Subcommands for the labels command
#[derive(Subcommand, Debug)]
pub enum LabelsCommands {
  /// List repository labels, or the labels of one issue
  List {
    /// Issue number
    #[arg(long)]
    issue: Option<u64>,
  },

  /// Show a single label
  Get {
    /// Label name
    name: String,
  },

  /// Check that labels exist in the repository
  Check {
    /// Label names
    #[arg(required = true)]
    labels: Vec<String>,
  },

  /// Add labels to an issue
  Add {
    /// Issue number
    issue: u64,

    /// Label names
    #[arg(required = true)]
    labels: Vec<String>,

    /// Add the labels even if they do not exist yet
    #[arg(long)]
    force: bool,
  },

  /// Remove a label from an issue
  #[command(alias = "rm")]
  Remove {
    /// Issue number
    issue: u64,

    /// Label name
    #[arg(required_unless_present = "all")]
    label: Option<String>,

    /// Remove every label from the issue
    #[arg(long)]
    all: bool,
  },
}

/// Handle the labels command
pub(crate) fn handle_labels_command(args: &GatewayArgs, command: LabelsCommands) -> Result<()> {
  let rt = runtime()?;
  let gateway = build_gateway(args)?;

  match command {
    LabelsCommands::List { issue } => print_response(&rt.block_on(gateway.get_labels(issue))?),
    LabelsCommands::Get { name } => print_response(&rt.block_on(gateway.get_label(&name))?),
    LabelsCommands::Check { labels } => {
      if rt.block_on(gateway.labels_exist(labels.as_slice()))? {
        print_success(&format!("Labels exist: {}", labels.join(", ")));
      } else {
        print_warning(&format!("Not all labels exist: {}", labels.join(", ")));
      }
      Ok(())
    }
    LabelsCommands::Add { issue, labels, force } => {
      print_response(&rt.block_on(gateway.add_labels_to_issue(issue, &labels, force))?)
    }
    LabelsCommands::Remove { issue, label, all } => {
      let response = rt.block_on(gateway.remove_label_from_issue(issue, label.as_deref(), all))?;
      print_response(&response)
    }
  }
}
