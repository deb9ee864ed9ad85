//! Listing: filter endpoint records and lay them out as a table or detail blocks.
//!
//! Every (path, verb) pair of every record that passes the filter becomes one row; there
//! is no de-duplication. Row order follows the documents' path and operation maps.

use crate::endpoint::model::{EndpointQuery, EndpointRecord};
use crate::endpoint::verb::HttpVerb;
use tracing::debug;

pub const ACTION_HEADER: &str = "Action";
pub const VERB_HEADER: &str = "Verb";
pub const API_NAME_HEADER: &str = "API Name";
pub const URL_HEADER: &str = "URL";

pub const ACTION_COLUMN_MAX: usize = 40;
pub const API_NAME_COLUMN_MAX: usize = 30;

/// Relative path / verb filter. `None` matches anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointFilter {
    pub relative_path: Option<String>,
    pub verb: Option<HttpVerb>,
}

impl EndpointFilter {
    /// Exact, case-sensitive path match.
    pub fn matches_path(&self, path: &str) -> bool {
        self.relative_path.as_deref().map_or(true, |p| p == path)
    }

    /// Case-insensitive verb match against a document operation key.
    pub fn matches_verb(&self, operation: &str) -> bool {
        self.verb
            .map_or(true, |v| v.as_str().eq_ignore_ascii_case(operation))
    }
}

impl From<&EndpointQuery> for EndpointFilter {
    fn from(query: &EndpointQuery) -> Self {
        Self {
            relative_path: query.relative_path.clone(),
            verb: query.verb,
        }
    }
}

/// One displayable path x verb combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRow {
    pub action: String,
    pub verb: String,
    pub api_name: String,
    pub base_path: String,
    pub path: String,
    pub url: String,
}

pub fn matching_rows(records: &[EndpointRecord], filter: &EndpointFilter) -> Vec<EndpointRow> {
    let mut rows = Vec::new();
    for record in records {
        let Some(document) = record.document.as_ref() else {
            debug!(base_url = %record.base_url, "Record has no document; skipping");
            continue;
        };
        let base_url = record.base_url.trim_end_matches('/');
        for (path, operations) in &document.paths {
            if !filter.matches_path(path) {
                continue;
            }
            for (op, operation) in operations {
                if !filter.matches_verb(op) {
                    continue;
                }
                rows.push(EndpointRow {
                    action: operation.qualified_action_name(),
                    verb: op.clone(),
                    api_name: document.title().to_string(),
                    base_path: document.base_path.clone(),
                    path: path.clone(),
                    url: format!("{}{}", base_url, path),
                });
            }
        }
    }
    debug!(rows = rows.len(), ?filter, "Filtered API rows");
    rows
}

/// Tabular column widths derived from the rows being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnWidths {
    pub action: usize,
    pub api_name: usize,
}

impl ColumnWidths {
    /// Widen to the longest value, never narrower than the header, capped at the maximum.
    pub fn compute(rows: &[EndpointRow]) -> Self {
        let longest_action = rows.iter().map(|r| r.action.chars().count()).max().unwrap_or(0);
        let longest_name = rows.iter().map(|r| r.api_name.chars().count()).max().unwrap_or(0);
        Self {
            action: ACTION_HEADER.len().max(longest_action).min(ACTION_COLUMN_MAX),
            api_name: API_NAME_HEADER.len().max(longest_name).min(API_NAME_COLUMN_MAX),
        }
    }
}

/// Prefix of `value` at most `width` characters long.
pub fn truncate(value: &str, width: usize) -> &str {
    match value.char_indices().nth(width) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

fn table_line(widths: ColumnWidths, action: &str, verb: &str, api_name: &str, url: &str) -> String {
    format!(
        "{:<action_w$} {:>7} {:>name_w$}  {}",
        truncate(action, widths.action),
        verb,
        truncate(api_name, widths.api_name),
        url,
        action_w = widths.action,
        name_w = widths.api_name + 1,
    )
}

/// Header line followed by one line per row.
pub fn format_table(rows: &[EndpointRow]) -> String {
    let widths = ColumnWidths::compute(rows);
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(table_line(
        widths,
        ACTION_HEADER,
        VERB_HEADER,
        API_NAME_HEADER,
        URL_HEADER,
    ));
    for row in rows {
        lines.push(table_line(widths, &row.action, &row.verb, &row.api_name, &row.url));
    }
    lines.join("\n")
}

/// One block per row, one property per line.
pub fn format_detail(rows: &[EndpointRow]) -> String {
    rows.iter()
        .map(|row| {
            format!(
                "{}: {}\n  {}: {}\n  Base path: {}\n  Path: {}\n  {}: {}\n  {}: {}",
                ACTION_HEADER,
                row.action,
                API_NAME_HEADER,
                row.api_name,
                row.base_path,
                row.path,
                VERB_HEADER,
                row.verb,
                URL_HEADER,
                row.url
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
