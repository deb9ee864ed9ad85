//! CLI route: single route table and run context. Dispatches to endpoint services and
//! presentation.

use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_api_listing, format_created, format_deleted, format_records_json, format_rows,
    format_updated,
};
use crate::config::{ClientOverrides, ConfigLoader, GatewayConfig};
use crate::endpoint::document::{ingest_document, DocumentReader, FsDocumentReader};
use crate::endpoint::model::{
    EndpointDefinition, EndpointQuery, EndpointRecord, EndpointSelector, EndpointSource,
    Pagination,
};
use crate::endpoint::resolve::{
    resolve_definition, resolve_delete_query, resolve_get_query, resolve_list_query,
    DefinitionFlags,
};
use crate::error::{ComposedError, DisplayFlags, ErrorKind, ExitCode};
use crate::gateway::{GatewayClient, HttpGatewayClient};
use crate::listing::{matching_rows, EndpointFilter};
use std::cell::OnceCell;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const MISSING_CREATE_INPUT: &str = "Invalid argument(s). Specify a swagger file or specify an API base path with an API path, an API verb, and an action name.";
const CONFLICTING_CREATE_INPUT: &str = "Invalid argument(s). Specify either a swagger file or API arguments, not both.";

/// Runtime context for CLI execution: effective configuration, the gateway client, and the
/// document reader. The HTTP client is built on first use so argument errors never depend
/// on connection settings.
pub struct RunContext {
    config: GatewayConfig,
    client: OnceCell<Box<dyn GatewayClient>>,
    reader: Box<dyn DocumentReader>,
}

impl RunContext {
    /// Load configuration from every layer and apply command-line overrides.
    pub fn new(
        config_path: Option<&Path>,
        overrides: &ClientOverrides,
    ) -> Result<Self, ComposedError> {
        let mut config = ConfigLoader::load(config_path)?;
        overrides.apply(&mut config);
        Ok(Self::with_config(config))
    }

    pub fn with_config(config: GatewayConfig) -> Self {
        Self {
            config,
            client: OnceCell::new(),
            reader: Box::new(FsDocumentReader),
        }
    }

    /// Use `client` instead of the HTTP client.
    pub fn with_client(config: GatewayConfig, client: Box<dyn GatewayClient>) -> Self {
        let context = Self::with_config(config);
        let _ = context.client.set(client);
        context
    }

    pub fn with_document_reader(mut self, reader: Box<dyn DocumentReader>) -> Self {
        self.reader = reader;
        self
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    fn color(&self) -> bool {
        self.config.output.color
    }

    fn gateway(&self) -> Result<&dyn GatewayClient, ComposedError> {
        if let Some(client) = self.client.get() {
            return Ok(client.as_ref());
        }
        let client = HttpGatewayClient::new(&self.config.client)?;
        Ok(self
            .client
            .get_or_init(|| Box::new(client) as Box<dyn GatewayClient>)
            .as_ref())
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ComposedError> {
        match command {
            Commands::Create {
                args,
                api_name,
                config_file,
            } => self.handle_create(args, api_name.as_deref(), config_file.as_ref()),
            Commands::Update { args, api_name } => {
                self.handle_update(args, api_name.as_deref())
            }
            Commands::Get { args, full, format } => self.handle_get(args, *full, format),
            Commands::Delete { args } => self.handle_delete(args),
            Commands::List {
                args,
                skip,
                limit,
                full,
                format,
            } => self.handle_list(
                args,
                Pagination {
                    skip: *skip,
                    limit: *limit,
                },
                *full,
                format,
            ),
        }
    }

    fn handle_create(
        &self,
        args: &[String],
        api_name: Option<&str>,
        config_file: Option<&PathBuf>,
    ) -> Result<String, ComposedError> {
        let definition = match (args.is_empty(), config_file) {
            (true, None) => {
                debug!("No swagger file and no arguments");
                return Err(ComposedError::usage(MISSING_CREATE_INPUT));
            }
            (false, Some(_)) => {
                debug!("Both a swagger file and arguments were given");
                return Err(ComposedError::usage(CONFLICTING_CREATE_INPUT));
            }
            (true, Some(path)) => {
                ingest_document(Some(path.as_path()), self.reader.as_ref(), &self.config.client)
                    .map_err(|e| parse_failure("Unable to parse swagger file", e))?
            }
            (false, None) => resolve_definition(
                "Api create",
                args,
                &DefinitionFlags {
                    api_name: api_name.map(str::to_string),
                },
                &self.config.client,
            )
            .map_err(|e| parse_failure("Unable to parse API command arguments", e))?,
        };

        let record = self
            .gateway()
            .and_then(|gateway| gateway.insert(&definition, false))
            .map_err(|e| remote_failure("Unable to create API", e))?;
        info!(namespace = %definition.namespace, "API created");

        Ok(self.created_lines(&definition, &record))
    }

    fn created_lines(&self, definition: &EndpointDefinition, record: &EndpointRecord) -> String {
        let base_url = record.base_url.trim_end_matches('/');
        match &definition.source {
            EndpointSource::Fields(fields) => {
                let action = fields
                    .action
                    .as_ref()
                    .map(|a| a.qualified_name())
                    .unwrap_or_default();
                format_created(
                    &format!(
                        "{}{}",
                        fields.base_path.trim_end_matches('/'),
                        fields.relative_path
                    ),
                    fields.verb.as_str(),
                    &action,
                    &format!("{}{}", base_url, fields.relative_path),
                    self.color(),
                )
            }
            EndpointSource::Document(_) => {
                let mut lines = Vec::new();
                if let Some(document) = &record.document {
                    for (path, operations) in &document.paths {
                        for (op, operation) in operations {
                            let action = operation
                                .action
                                .as_ref()
                                .map(|a| a.action_name.clone())
                                .unwrap_or_default();
                            lines.push(format_created(
                                path,
                                op,
                                &action,
                                &format!("{}{}", base_url, path),
                                self.color(),
                            ));
                        }
                    }
                }
                lines.join("\n")
            }
        }
    }

    fn handle_update(
        &self,
        args: &[String],
        api_name: Option<&str>,
    ) -> Result<String, ComposedError> {
        let definition = resolve_definition(
            "Api update",
            args,
            &DefinitionFlags {
                api_name: api_name.map(str::to_string),
            },
            &self.config.client,
        )
        .map_err(|e| parse_failure("Unable to parse API command arguments", e))?;

        let record = self
            .gateway()
            .and_then(|gateway| gateway.insert(&definition, true))
            .map_err(|e| remote_failure("Unable to update API", e))?;
        info!(namespace = %definition.namespace, "API updated");

        let Some(fields) = definition.fields() else {
            return Ok(String::new());
        };
        let url = record
            .managed_url(&fields.relative_path, fields.verb)
            .unwrap_or_else(|| {
                format!(
                    "{}{}",
                    record.base_url.trim_end_matches('/'),
                    fields.relative_path
                )
            });
        let action = fields
            .action
            .as_ref()
            .map(|a| a.qualified_name())
            .unwrap_or_default();
        Ok(format_updated(
            &fields.relative_path,
            fields.verb.as_str(),
            &action,
            &url,
            self.color(),
        ))
    }

    fn handle_get(&self, args: &[String], full: bool, format: &str) -> Result<String, ComposedError> {
        let query = resolve_get_query(args)?;
        let records = self
            .gateway()
            .and_then(|gateway| gateway.get(&query, &Pagination::default()))
            .map_err(|e| remote_failure("Unable to get API", e))?;

        let records: Vec<EndpointRecord> = records
            .into_iter()
            .filter(|record| record.document.is_some())
            .collect();
        if records.is_empty() {
            return Err(not_found(&query));
        }

        if format == "json" {
            return Ok(format_records_json(&records));
        }
        let rows = matching_rows(&records, &EndpointFilter::from(&query));
        Ok(format_rows(&rows, full))
    }

    fn handle_delete(&self, args: &[String]) -> Result<String, ComposedError> {
        let query = resolve_delete_query(args)?;
        self.gateway()
            .and_then(|gateway| gateway.delete(&query))
            .map_err(|e| remote_failure("Unable to delete API", e))?;
        info!(?query, "API deleted");
        Ok(format_deleted(&query, self.color()))
    }

    fn handle_list(
        &self,
        args: &[String],
        page: Pagination,
        full: bool,
        format: &str,
    ) -> Result<String, ComposedError> {
        let query = resolve_list_query(args)?;
        let records = match &query.selector {
            None => self
                .gateway()
                .and_then(|gateway| gateway.list(&page))
                .map_err(|e| remote_failure("Unable to obtain the API list", e))?,
            Some(_) => self
                .gateway()
                .and_then(|gateway| gateway.get(&query, &page))
                .map_err(|e| remote_failure("Unable to obtain the API list", e))?,
        };
        debug!(records = records.len(), "Gateway returned API records");

        if format == "json" {
            return Ok(format_records_json(&records));
        }
        let rows = matching_rows(&records, &EndpointFilter::from(&query));
        Ok(format_api_listing(&rows, full, self.color()))
    }
}

/// Argument or document failure: message and usage, exit code from the inner error.
fn parse_failure(prefix: &str, error: ComposedError) -> ComposedError {
    let kind = error
        .kind()
        .with_message(format!("{}: {}", prefix, error.message()));
    ComposedError::wrap(
        kind,
        error,
        ExitCode::General,
        DisplayFlags::message_and_usage(),
    )
}

/// Remote failure: the client's exit code (network or HTTP response) survives the wrap.
fn remote_failure(prefix: &str, error: ComposedError) -> ComposedError {
    let kind = error
        .kind()
        .with_message(format!("{}: {}", prefix, error.message()));
    ComposedError::wrap(kind, error, ExitCode::Network, DisplayFlags::message())
}

fn not_found(query: &EndpointQuery) -> ComposedError {
    let message = match &query.selector {
        Some(EndpointSelector::Name(name)) => format!("API does not exist for API name {}", name),
        Some(EndpointSelector::BasePath(base_path)) => {
            format!("API does not exist for basepath {}", base_path)
        }
        None => "API does not exist".to_string(),
    };
    debug!(%message, "No API returned");
    ComposedError::new(
        ErrorKind::NotFound(message),
        ExitCode::General,
        DisplayFlags::message(),
    )
}
