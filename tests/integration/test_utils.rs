//! Shared test utilities for integration tests
//!
//! An in-memory gateway that records every call, canned records, and serialized access to
//! the environment variables config loading reads.

use apigw::cli::RunContext;
use apigw::config::{ClientConfig, GatewayConfig, OutputConfig};
use apigw::endpoint::model::{EndpointDefinition, EndpointQuery, EndpointRecord, Pagination};
use apigw::error::{ComposedError, DisplayFlags, ErrorKind, ExitCode};
use apigw::gateway::GatewayClient;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Mutex, MutexGuard};

/// Global mutex to serialize APIGW_* environment variable access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Holds the env lock and restores the listed variables on drop.
pub struct EnvGuard {
    saved: Vec<(String, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvGuard {
    pub fn set(vars: &[(&str, Option<&str>)]) -> Self {
        let lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut saved = Vec::new();
        for (name, value) in vars {
            saved.push((name.to_string(), std::env::var(name).ok()));
            match value {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
        }
        Self { saved, _lock: lock }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (name, value) in self.saved.drain(..) {
            match value {
                Some(value) => std::env::set_var(&name, value),
                None => std::env::remove_var(&name),
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Insert {
        definition: EndpointDefinition,
        overwrite: bool,
    },
    Get {
        query: EndpointQuery,
        page: Pagination,
    },
    Delete(EndpointQuery),
    List(Pagination),
}

/// Gateway double: answers from canned data and records what it was asked.
#[derive(Clone, Default)]
pub struct RecordingGateway {
    pub calls: Rc<RefCell<Vec<Call>>>,
    pub inserted: Option<EndpointRecord>,
    pub records: Vec<EndpointRecord>,
    pub failure: Option<(String, ExitCode)>,
}

impl RecordingGateway {
    pub fn returning(records: Vec<EndpointRecord>) -> Self {
        Self {
            inserted: records.first().cloned(),
            records,
            ..Self::default()
        }
    }

    pub fn failing(message: &str, exit_code: ExitCode) -> Self {
        Self {
            failure: Some((message.to_string(), exit_code)),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn check(&self) -> Result<(), ComposedError> {
        match &self.failure {
            Some((message, exit_code)) => Err(ComposedError::new(
                ErrorKind::Network(message.clone()),
                *exit_code,
                DisplayFlags::message(),
            )),
            None => Ok(()),
        }
    }
}

impl GatewayClient for RecordingGateway {
    fn insert(
        &self,
        definition: &EndpointDefinition,
        overwrite: bool,
    ) -> Result<EndpointRecord, ComposedError> {
        self.calls.borrow_mut().push(Call::Insert {
            definition: definition.clone(),
            overwrite,
        });
        self.check()?;
        Ok(self.inserted.clone().unwrap_or_default())
    }

    fn get(
        &self,
        query: &EndpointQuery,
        page: &Pagination,
    ) -> Result<Vec<EndpointRecord>, ComposedError> {
        self.calls.borrow_mut().push(Call::Get {
            query: query.clone(),
            page: *page,
        });
        self.check()?;
        Ok(self.records.clone())
    }

    fn delete(&self, query: &EndpointQuery) -> Result<(), ComposedError> {
        self.calls.borrow_mut().push(Call::Delete(query.clone()));
        self.check()
    }

    fn list(&self, page: &Pagination) -> Result<Vec<EndpointRecord>, ComposedError> {
        self.calls.borrow_mut().push(Call::List(*page));
        self.check()?;
        Ok(self.records.clone())
    }
}

/// Plain-text configuration for namespace `guest` on `openwhisk.example.com`.
pub fn test_config() -> GatewayConfig {
    GatewayConfig {
        client: ClientConfig {
            apihost: "openwhisk.example.com".to_string(),
            namespace: "guest".to_string(),
            auth: Some("user-uuid:secret".to_string()),
            ..ClientConfig::default()
        },
        output: OutputConfig { color: false },
        ..GatewayConfig::default()
    }
}

pub fn context_with(gateway: &RecordingGateway) -> RunContext {
    RunContext::with_client(test_config(), Box::new(gateway.clone()))
}

pub const LIBRARY_DOCUMENT: &str = r#"{
    "swagger": "2.0",
    "basePath": "/library",
    "info": {"title": "library", "version": "1.0"},
    "paths": {
        "/books": {
            "get": {"operationId": "getBooks", "x-ibm-op-ext": {"actionName": "list-books", "actionNamespace": "guest"}},
            "post": {"operationId": "addBook", "x-ibm-op-ext": {"actionName": "add-book", "actionNamespace": "guest"}}
        },
        "/authors": {
            "get": {"x-ibm-op-ext": {"actionName": "list-authors", "actionNamespace": "guest"}}
        }
    }
}"#;

/// Stored record for [`LIBRARY_DOCUMENT`].
pub fn library_record() -> EndpointRecord {
    serde_json::from_str(&format!(
        r#"{{"namespace": "guest", "gwApiUrl": "https://gw.example.com/api/1234/library/",
            "gwApiActivated": true, "tenantId": "tenant-1", "apidoc": {}}}"#,
        LIBRARY_DOCUMENT
    ))
    .unwrap()
}

pub fn args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}
