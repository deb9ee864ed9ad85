//! Verb and path token validation.

use crate::error::ComposedError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use tracing::debug;

/// HTTP methods an endpoint may be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpVerb {
    pub const ALL: [HttpVerb; 7] = [
        HttpVerb::Get,
        HttpVerb::Post,
        HttpVerb::Put,
        HttpVerb::Delete,
        HttpVerb::Patch,
        HttpVerb::Head,
        HttpVerb::Options,
    ];

    /// Canonical upper-case form.
    pub fn as_str(self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
            HttpVerb::Put => "PUT",
            HttpVerb::Delete => "DELETE",
            HttpVerb::Patch => "PATCH",
            HttpVerb::Head => "HEAD",
            HttpVerb::Options => "OPTIONS",
        }
    }

    /// Case-insensitive lookup.
    pub fn parse(token: &str) -> Option<HttpVerb> {
        HttpVerb::ALL
            .into_iter()
            .find(|verb| verb.as_str().eq_ignore_ascii_case(token))
    }

    /// Comma-separated list of every permitted verb.
    pub fn valid_set() -> String {
        HttpVerb::ALL
            .iter()
            .map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for HttpVerb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for HttpVerb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        HttpVerb::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown HTTP verb '{}'", raw)))
    }
}

/// Validate a verb token, returning its canonical form.
pub fn validate_verb(token: &str) -> Result<HttpVerb, ComposedError> {
    HttpVerb::parse(token).ok_or_else(|| {
        debug!(verb = token, "Invalid API verb");
        ComposedError::validation(format!(
            "'{}' is not a valid API verb.  Valid values are: {}",
            token,
            HttpVerb::valid_set()
        ))
    })
}

/// True when the token is shaped like a path (leading `/`).
pub fn has_path_prefix(token: &str) -> bool {
    token.starts_with('/')
}

pub fn validate_path_prefix(token: &str) -> Result<(), ComposedError> {
    if has_path_prefix(token) {
        Ok(())
    } else {
        debug!(path = token, "Path does not begin with '/'");
        Err(ComposedError::validation(format!(
            "'{}' must begin with '/'.",
            token
        )))
    }
}

pub fn validate_relative_path(token: &str) -> Result<(), ComposedError> {
    validate_path_prefix(token)
}
