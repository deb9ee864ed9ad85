//! Qualified action names: `[/namespace/][package/]name`.

use std::fmt;
use thiserror::Error;

/// Namespace used when neither the name nor the configuration supplies one.
pub const DEFAULT_NAMESPACE: &str = "_";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QualifiedNameError {
    #[error("the name is empty")]
    Empty,

    #[error("a namespace must follow the leading '/'")]
    MissingNamespace,

    #[error("'{0}' contains an empty path segment")]
    EmptySegment(String),

    #[error("'{0}' has too many path segments; expected [/namespace/][package/]name")]
    TooManySegments(String),
}

/// A parsed action name. `name` may be empty when the input only named a namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedName {
    pub namespace: String,
    pub package: Option<String>,
    pub name: String,
}

impl QualifiedName {
    /// Parse `input`, falling back to `default_namespace` when it has no leading `/`.
    pub fn parse(input: &str, default_namespace: &str) -> Result<Self, QualifiedNameError> {
        if input.is_empty() {
            return Err(QualifiedNameError::Empty);
        }

        let (namespace, rest) = match input.strip_prefix('/') {
            Some(stripped) => {
                let mut parts = stripped.splitn(2, '/');
                let namespace = parts.next().unwrap_or_default();
                if namespace.is_empty() {
                    return Err(QualifiedNameError::MissingNamespace);
                }
                (namespace.to_string(), parts.next().unwrap_or_default())
            }
            None => {
                let namespace = if default_namespace.is_empty() {
                    DEFAULT_NAMESPACE
                } else {
                    default_namespace
                };
                (namespace.to_string(), input)
            }
        };

        let segments: Vec<&str> = rest.split('/').collect();
        let (package, name) = match segments.as_slice() {
            [name] => (None, *name),
            [package, name] => {
                if package.is_empty() {
                    return Err(QualifiedNameError::EmptySegment(input.to_string()));
                }
                (Some(package.to_string()), *name)
            }
            _ => return Err(QualifiedNameError::TooManySegments(input.to_string())),
        };

        Ok(Self {
            namespace,
            package,
            name: name.to_string(),
        })
    }

    /// Entity path relative to the namespace: `package/name` or `name`.
    pub fn entity_path(&self) -> String {
        match &self.package {
            Some(package) => format!("{}/{}", package, self.name),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.namespace, self.entity_path())
    }
}
