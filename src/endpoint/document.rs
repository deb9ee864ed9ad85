//! Endpoint-description documents ("swagger" files) and their ingestion.
//!
//! Field names follow the gateway's description format exactly; unknown fields are kept
//! so a document round-trips through the client unchanged.

use crate::config::ClientConfig;
use crate::endpoint::model::{EndpointDefinition, EndpointSource};
use crate::endpoint::verb;
use crate::error::{ComposedError, DisplayFlags, ErrorKind, ExitCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Extension key on each operation naming the action it invokes.
pub const OPERATION_EXTENSION: &str = "x-ibm-op-ext";

/// Parsed endpoint-description document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointDocument {
    /// Document format identity, e.g. `"2.0"`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub swagger: String,
    #[serde(rename = "basePath", default, skip_serializing_if = "String::is_empty")]
    pub base_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<DocumentInfo>,
    /// Relative path -> verb -> operation.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub paths: BTreeMap<String, BTreeMap<String, Operation>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentInfo {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "operationId", default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(rename = "x-ibm-op-ext", default, skip_serializing_if = "Option::is_none")]
    pub action: Option<OperationAction>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationAction {
    #[serde(rename = "actionName", default)]
    pub action_name: String,
    #[serde(rename = "actionNamespace", default)]
    pub action_namespace: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Operation {
    /// `/namespace/action`, or an empty string when the operation names no action.
    pub fn qualified_action_name(&self) -> String {
        match &self.action {
            Some(action) => format!("/{}/{}", action.action_namespace, action.action_name),
            None => String::new(),
        }
    }
}

impl EndpointDocument {
    /// API name shown in listings.
    pub fn title(&self) -> &str {
        self.info.as_ref().map(|i| i.title.as_str()).unwrap_or("")
    }

    /// Check required fields, the base path prefix, and every operation's action binding.
    pub fn validate(&self) -> Result<(), ComposedError> {
        let mut missing = Vec::new();
        if self.base_path.is_empty() {
            missing.push("basePath");
        }
        if self.swagger.is_empty() {
            missing.push("swagger");
        }
        match &self.info {
            None => missing.push("info"),
            Some(info) if info.title.is_empty() => missing.push("info.title"),
            Some(_) => {}
        }
        if self.paths.is_empty() {
            missing.push("paths");
        }
        if !missing.is_empty() {
            return Err(ComposedError::validation(format!(
                "Swagger file is invalid (missing {} field(s))",
                missing.join(", ")
            )));
        }

        if !verb::has_path_prefix(&self.base_path) {
            return Err(ComposedError::validation(
                "Swagger file basePath must start with a leading slash (/)",
            ));
        }

        for (path, operations) in &self.paths {
            for (op, operation) in operations {
                let named = operation
                    .action
                    .as_ref()
                    .is_some_and(|a| !a.action_name.is_empty());
                if !named {
                    return Err(ComposedError::validation(format!(
                        "Swagger file operation '{} {}' does not name an action ({}.actionName)",
                        op, path, OPERATION_EXTENSION
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Source of document bytes.
pub trait DocumentReader {
    fn read_document(&self, path: &Path) -> std::io::Result<String>;
}

/// Reads documents from the local filesystem.
pub struct FsDocumentReader;

impl DocumentReader for FsDocumentReader {
    fn read_document(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }
}

pub fn parse_document(content: &str) -> Result<EndpointDocument, serde_json::Error> {
    serde_json::from_str(content)
}

/// Read, parse, and validate the document at `path` into a document-sourced definition.
pub fn ingest_document(
    path: Option<&Path>,
    reader: &dyn DocumentReader,
    config: &ClientConfig,
) -> Result<EndpointDefinition, ComposedError> {
    let path = path.ok_or_else(|| {
        debug!("No swagger file is specified");
        ComposedError::usage("A configuration file was not specified.")
    })?;

    let content = reader.read_document(path).map_err(|e| {
        debug!(path = %path.display(), error = %e, "Failed to read swagger file");
        ComposedError::wrap(
            ErrorKind::Io(format!(
                "Error reading swagger file '{}': {}",
                path.display(),
                e
            )),
            e,
            ExitCode::General,
            DisplayFlags::message_and_usage(),
        )
    })?;

    let document = parse_document(&content).map_err(|e| {
        debug!(path = %path.display(), error = %e, "Failed to parse swagger file");
        ComposedError::wrap(
            ErrorKind::Validation(format!(
                "Error parsing swagger file '{}': {}",
                path.display(),
                e
            )),
            e,
            ExitCode::General,
            DisplayFlags::message_and_usage(),
        )
    })?;

    document.validate()?;
    debug!(
        base_path = %document.base_path,
        paths = document.paths.len(),
        "Swagger file accepted"
    );

    Ok(EndpointDefinition {
        namespace: config.namespace().to_string(),
        source: EndpointSource::Document(content),
    })
}
