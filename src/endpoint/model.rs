//! Endpoint entities: what the client sends and what the gateway returns.

use crate::endpoint::document::EndpointDocument;
use crate::endpoint::verb::HttpVerb;
use serde::{Deserialize, Serialize};

/// Backend method every gateway route uses to invoke its action.
pub const BACKEND_METHOD: &str = "POST";

/// Action a route forwards to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRef {
    pub namespace: String,
    pub package: Option<String>,
    pub name: String,
    pub backend_url: String,
    pub backend_method: String,
}

impl ActionRef {
    /// Entity path relative to the namespace: `package/name` or `name`.
    pub fn entity_path(&self) -> String {
        match &self.package {
            Some(package) => format!("{}/{}", package, self.name),
            None => self.name.clone(),
        }
    }

    /// `/namespace/package/name`
    pub fn qualified_name(&self) -> String {
        format!("/{}/{}", self.namespace, self.entity_path())
    }
}

/// Structural fields of a definition built from positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointFields {
    pub base_path: String,
    pub relative_path: String,
    pub verb: HttpVerb,
    pub action: Option<ActionRef>,
    pub api_name: Option<String>,
    /// `API:{namespace}:{base_path}`; set only when an explicit base path was given.
    pub id: Option<String>,
}

/// Where a definition's structure comes from. Exactly one source exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointSource {
    Fields(EndpointFields),
    /// Raw content of an uploaded description document.
    Document(String),
}

/// Endpoint definition sent to the gateway on create or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDefinition {
    pub namespace: String,
    pub source: EndpointSource,
}

impl EndpointDefinition {
    pub fn is_document_sourced(&self) -> bool {
        matches!(self.source, EndpointSource::Document(_))
    }

    pub fn fields(&self) -> Option<&EndpointFields> {
        match &self.source {
            EndpointSource::Fields(fields) => Some(fields),
            EndpointSource::Document(_) => None,
        }
    }

    pub fn document(&self) -> Option<&str> {
        match &self.source {
            EndpointSource::Document(raw) => Some(raw),
            EndpointSource::Fields(_) => None,
        }
    }
}

/// Leading selector of a get/delete/list query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointSelector {
    BasePath(String),
    Name(String),
}

impl EndpointSelector {
    /// A token beginning with `/` is a base path; anything else is an API name.
    pub fn from_token(token: &str) -> Self {
        if crate::endpoint::verb::has_path_prefix(token) {
            EndpointSelector::BasePath(token.to_string())
        } else {
            EndpointSelector::Name(token.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EndpointSelector::BasePath(s) | EndpointSelector::Name(s) => s,
        }
    }
}

/// Query built from get/delete/list positional arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointQuery {
    pub selector: Option<EndpointSelector>,
    pub relative_path: Option<String>,
    pub verb: Option<HttpVerb>,
}

/// Opaque paging hints forwarded to the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub skip: u32,
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { skip: 0, limit: 30 }
    }
}

/// An API as stored by the gateway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointRecord {
    #[serde(default)]
    pub namespace: String,
    #[serde(rename = "gwApiUrl", default)]
    pub base_url: String,
    #[serde(rename = "gwApiActivated", default)]
    pub activated: bool,
    #[serde(rename = "tenantId", default, skip_serializing_if = "String::is_empty")]
    pub tenant_id: String,
    #[serde(rename = "apidoc", default, skip_serializing_if = "Option::is_none")]
    pub document: Option<EndpointDocument>,
}

impl EndpointRecord {
    /// External URL of `relative_path` + `verb`, if the record's document declares it.
    pub fn managed_url(&self, relative_path: &str, verb: HttpVerb) -> Option<String> {
        let document = self.document.as_ref()?;
        let operations = document.paths.get(relative_path)?;
        operations
            .keys()
            .any(|op| op.eq_ignore_ascii_case(verb.as_str()))
            .then(|| format!("{}{}", self.base_url.trim_end_matches('/'), relative_path))
    }
}
