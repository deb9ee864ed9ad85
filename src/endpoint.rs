//! Endpoint definitions and the logic that builds them from command input.
//!
//! A definition comes either from positional arguments ([`resolve`]) or from an uploaded
//! description document ([`document`]), never both.

pub mod document;
pub mod model;
pub mod name;
pub mod resolve;
pub mod verb;

pub use document::{
    ingest_document, DocumentReader, EndpointDocument, FsDocumentReader, Operation,
};
pub use model::{
    ActionRef, EndpointDefinition, EndpointFields, EndpointQuery, EndpointRecord,
    EndpointSelector, EndpointSource, Pagination,
};
pub use name::{QualifiedName, QualifiedNameError};
pub use resolve::{resolve_definition, DefinitionFlags};
pub use verb::{validate_path_prefix, validate_verb, HttpVerb};
