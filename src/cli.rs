//! CLI domain: parse, route, help, output, and presentation only.
//! No endpoint logic; a single route table dispatches to endpoint services.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::{command_name, usage_for};
pub use output::render_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    format_api_listing, format_created, format_deleted, format_records_json, format_rows,
    format_updated, ok_label,
};
pub use route::RunContext;
