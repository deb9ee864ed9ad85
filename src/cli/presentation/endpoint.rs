//! Endpoint command presentation: confirmations, listings, json.

use crate::endpoint::model::{EndpointQuery, EndpointRecord};
use crate::listing::{format_detail, format_table, EndpointRow};
use owo_colors::OwoColorize;

pub fn ok_label(color: bool) -> String {
    if color {
        format!("{}", "ok:".green())
    } else {
        "ok:".to_string()
    }
}

fn action_label(action: &str, color: bool) -> String {
    if color {
        format!("{}", action.bold())
    } else {
        action.to_string()
    }
}

pub fn format_created(path: &str, verb: &str, action: &str, url: &str, color: bool) -> String {
    format!(
        "{} created API {} {} for action {}\n{}",
        ok_label(color),
        path,
        verb,
        action_label(action, color),
        url
    )
}

pub fn format_updated(path: &str, verb: &str, action: &str, url: &str, color: bool) -> String {
    format!(
        "{} updated API {} {} for action {}\n{}",
        ok_label(color),
        path,
        verb,
        action_label(action, color),
        url
    )
}

/// Confirmation wording depends on how much of the API the query named.
pub fn format_deleted(query: &EndpointQuery, color: bool) -> String {
    let base = query.selector.as_ref().map(|s| s.as_str()).unwrap_or("");
    match (&query.relative_path, query.verb) {
        (None, _) => format!("{} deleted API {}", ok_label(color), base),
        (Some(path), None) => format!("{} deleted {} from {}", ok_label(color), path, base),
        (Some(path), Some(verb)) => {
            format!("{} deleted {} {} from {}", ok_label(color), path, verb, base)
        }
    }
}

/// Rows as a table, or as detail blocks when `full`.
pub fn format_rows(rows: &[EndpointRow], full: bool) -> String {
    if full {
        format_detail(rows)
    } else {
        format_table(rows)
    }
}

/// `ok: APIs` followed by the rows. The table header is printed even without rows.
pub fn format_api_listing(rows: &[EndpointRow], full: bool, color: bool) -> String {
    let body = format_rows(rows, full);
    if body.is_empty() {
        format!("{} APIs", ok_label(color))
    } else {
        format!("{} APIs\n{}", ok_label(color), body)
    }
}

pub fn format_records_json(records: &[EndpointRecord]) -> String {
    serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string())
}
