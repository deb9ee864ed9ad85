//! Route-management service client.
//!
//! The command layer talks to the gateway only through [`GatewayClient`]. Every method
//! fails with a [`ComposedError`] whose exit code already distinguishes transport failures
//! (`Network`) from error responses (`HttpResponse`).

use crate::endpoint::model::{EndpointDefinition, EndpointQuery, EndpointRecord, Pagination};
use crate::error::ComposedError;
use thiserror::Error;

pub mod http;
pub mod wire;

pub use http::HttpGatewayClient;

/// Low-level failures inside a gateway client.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("The server responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unable to decode the server response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unable to start the request runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Operations of the route-management service.
pub trait GatewayClient {
    /// Create (`overwrite == false`) or replace an API.
    fn insert(
        &self,
        definition: &EndpointDefinition,
        overwrite: bool,
    ) -> Result<EndpointRecord, ComposedError>;

    /// Records matching a base path or API name, optionally narrowed to a path and verb.
    fn get(
        &self,
        query: &EndpointQuery,
        page: &Pagination,
    ) -> Result<Vec<EndpointRecord>, ComposedError>;

    fn delete(&self, query: &EndpointQuery) -> Result<(), ComposedError>;

    /// Every API in the configured namespace.
    fn list(&self, page: &Pagination) -> Result<Vec<EndpointRecord>, ComposedError>;
}
