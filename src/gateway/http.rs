//! HTTP implementation of [`GatewayClient`] against the route-management web actions.

use crate::config::ClientConfig;
use crate::endpoint::model::{EndpointDefinition, EndpointQuery, EndpointRecord, Pagination};
use crate::error::{ComposedError, DisplayFlags, ErrorKind, ExitCode};
use crate::gateway::wire::{ApiDocRequest, ErrorBody, RecordList};
use crate::gateway::{GatewayClient, GatewayError};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::debug;

const GATEWAY_HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Package holding the route-management actions.
const ROUTE_PACKAGE: &str = "web/whisk.system/routemgmt";

const CREATE_ROUTE: &str = "createApi";
const GET_ROUTE: &str = "getApi";
const DELETE_ROUTE: &str = "deleteApi";

pub struct HttpGatewayClient {
    client: Client,
    runtime: Runtime,
    routes_url: String,
    namespace: String,
    credentials: Option<(String, String)>,
    auth_key: Option<String>,
}

impl HttpGatewayClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ComposedError> {
        let base_url = config.api_base_url()?;
        let client = Client::builder()
            .connect_timeout(GATEWAY_HTTP_CONNECT_TIMEOUT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.insecure)
            .build()
            .map_err(transport_error)?;
        let runtime = Runtime::new().map_err(|e| {
            ComposedError::wrap(
                ErrorKind::Network(format!("Unable to start the request runtime: {}", e)),
                GatewayError::Runtime(e),
                ExitCode::General,
                DisplayFlags::message(),
            )
        })?;

        Ok(Self {
            client,
            runtime,
            routes_url: routes_url(&base_url, &config.api_version),
            namespace: config.namespace().to_string(),
            credentials: config.credentials(),
            auth_key: config.auth.clone(),
        })
    }

    fn request(&self, method: Method, route: &str) -> RequestBuilder {
        let url = format!("{}/{}.json", self.routes_url, route);
        debug!(%method, %url, "Sending gateway request");
        let builder = self.client.request(method, url);
        match &self.credentials {
            Some((user, password)) => builder.basic_auth(user, Some(password)),
            None => builder,
        }
    }

    /// Send and return the body of a successful response.
    fn send(&self, request: RequestBuilder) -> Result<String, ComposedError> {
        let (status, body) = self
            .runtime
            .block_on(async {
                let response = request.send().await?;
                let status = response.status();
                let body = response.text().await?;
                Ok::<_, reqwest::Error>((status, body))
            })
            .map_err(transport_error)?;

        debug!(status = status.as_u16(), bytes = body.len(), "Gateway responded");
        if status.is_success() {
            Ok(body)
        } else {
            Err(status_error(status.as_u16(), body))
        }
    }

    fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ComposedError> {
        let body = self.send(request)?;
        serde_json::from_str(&body).map_err(decode_error)
    }
}

impl GatewayClient for HttpGatewayClient {
    fn insert(
        &self,
        definition: &EndpointDefinition,
        overwrite: bool,
    ) -> Result<EndpointRecord, ComposedError> {
        let body = ApiDocRequest::from_definition(definition, self.auth_key.as_deref());
        let request = self
            .request(Method::POST, CREATE_ROUTE)
            .query(&[("overwrite", overwrite.to_string())])
            .json(&body);
        self.send_json(request)
    }

    fn get(
        &self,
        query: &EndpointQuery,
        page: &Pagination,
    ) -> Result<Vec<EndpointRecord>, ComposedError> {
        let params = query_params(&self.namespace, query, Some(page));
        let request = self.request(Method::GET, GET_ROUTE).query(&params);
        self.send_json::<RecordList>(request)
            .map(RecordList::into_records)
    }

    fn delete(&self, query: &EndpointQuery) -> Result<(), ComposedError> {
        let mut params = query_params(&self.namespace, query, None);
        params.push(("force", "true".to_string()));
        let request = self.request(Method::DELETE, DELETE_ROUTE).query(&params);
        self.send(request).map(|_| ())
    }

    fn list(&self, page: &Pagination) -> Result<Vec<EndpointRecord>, ComposedError> {
        let params = query_params(&self.namespace, &EndpointQuery::default(), Some(page));
        let request = self.request(Method::GET, GET_ROUTE).query(&params);
        self.send_json::<RecordList>(request)
            .map(RecordList::into_records)
    }
}

/// `{base}/api/{version}/web/whisk.system/routemgmt`
pub fn routes_url(base_url: &str, api_version: &str) -> String {
    format!(
        "{}/api/{}/{}",
        base_url.trim_end_matches('/'),
        api_version,
        ROUTE_PACKAGE
    )
}

/// Query-string parameters for get/delete/list.
pub fn query_params(
    namespace: &str,
    query: &EndpointQuery,
    page: Option<&Pagination>,
) -> Vec<(&'static str, String)> {
    let mut params = vec![("__ow_user", namespace.to_string())];
    if let Some(selector) = &query.selector {
        params.push(("basepath", selector.as_str().to_string()));
    }
    if let Some(path) = &query.relative_path {
        params.push(("relpath", path.clone()));
    }
    if let Some(verb) = query.verb {
        params.push(("operation", verb.as_str().to_string()));
    }
    if let Some(page) = page {
        params.push(("skip", page.skip.to_string()));
        params.push(("limit", page.limit.to_string()));
    }
    params
}

fn transport_error(error: reqwest::Error) -> ComposedError {
    let message = if error.is_timeout() {
        format!("Request timeout: {}", error)
    } else if error.is_connect() {
        format!("Connection error: {}", error)
    } else {
        format!("HTTP error: {}", error)
    };
    ComposedError::wrap(
        ErrorKind::Network(message),
        GatewayError::Transport(error),
        ExitCode::Network,
        DisplayFlags::message(),
    )
}

/// A failing status. A body carrying an `error` field is a fault reported by the service.
pub fn status_error(status: u16, body: String) -> ComposedError {
    let (message, flags) = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(payload) => (
            payload.error,
            DisplayFlags::message().with_application_fault(),
        ),
        Err(_) => (
            format!("The server responded with status {}: {}", status, body),
            DisplayFlags::message(),
        ),
    };
    ComposedError::wrap(
        ErrorKind::Network(message),
        GatewayError::Status { status, body },
        ExitCode::HttpResponse,
        flags,
    )
}

fn decode_error(error: serde_json::Error) -> ComposedError {
    ComposedError::wrap(
        ErrorKind::Network(format!("Unable to decode the server response: {}", error)),
        GatewayError::Decode(error),
        ExitCode::HttpResponse,
        DisplayFlags::message(),
    )
}
