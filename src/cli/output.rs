//! CLI output: what the dispatcher writes to stderr for a failed command.

use crate::cli::help::usage_for;
use crate::error::ComposedError;
use owo_colors::OwoColorize;

/// Lines for stderr, honoring the error's display flags. Empty when nothing is shown.
pub fn render_error(error: &ComposedError, command: &str, color: bool) -> String {
    let mut lines = Vec::new();
    if error.should_print_message() {
        let label = if color {
            format!("{}", "error:".red().bold())
        } else {
            "error:".to_string()
        };
        lines.push(format!("{} {}", label, error.message()));
    }
    if error.flags().display_usage {
        lines.push(format!(
            "Run 'apigw {} --help' for usage.\n{}",
            command,
            usage_for(command).trim_end()
        ));
    }
    lines.join("\n")
}
