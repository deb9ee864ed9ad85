//! CLI presentation: text and json formatters per command family.

mod endpoint;

pub use endpoint::{
    format_api_listing, format_created, format_deleted, format_records_json, format_rows,
    format_updated, ok_label,
};
