//! CLI help and command-name contract for logging and usage output.

use crate::cli::parse::{Cli, Commands};
use clap::CommandFactory;

/// Subcommand name as typed on the command line.
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Create { .. } => "create",
        Commands::Update { .. } => "update",
        Commands::Get { .. } => "get",
        Commands::Delete { .. } => "delete",
        Commands::List { .. } => "list",
    }
}

/// Rendered usage line(s) for a subcommand, or for the whole tool when the name is unknown.
pub fn usage_for(name: &str) -> String {
    let mut command = Cli::command();
    match command.find_subcommand_mut(name) {
        Some(sub) => sub.render_usage().to_string(),
        None => command.render_usage().to_string(),
    }
}
