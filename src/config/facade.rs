//! Loads [`GatewayConfig`] from every layer in precedence order.

use super::merge::merge_policy::builder_with_defaults;
use super::sources::{environment, explicit_file, global_file};
use super::GatewayConfig;
use crate::error::{ComposedError, DisplayFlags, ErrorKind, ExitCode};
use config::ConfigError;
use std::path::Path;
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, global file, optional explicit file, then `APIGW_*` environment variables.
    pub fn load(config_path: Option<&Path>) -> Result<GatewayConfig, ComposedError> {
        let build = || -> Result<GatewayConfig, ConfigError> {
            let mut builder = global_file::add_to_builder(builder_with_defaults()?)?;
            if let Some(path) = config_path {
                builder = explicit_file::add_to_builder(builder, path)?;
            }
            builder = environment::add_to_builder(builder);
            builder.build()?.try_deserialize()
        };
        let config = build().map_err(config_error)?;
        debug!(
            apihost = %config.client.apihost,
            namespace = %config.client.namespace,
            api_version = %config.client.api_version,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Defaults plus a single file; no global file and no environment.
    pub fn load_from_file(path: &Path) -> Result<GatewayConfig, ComposedError> {
        let build = || -> Result<GatewayConfig, ConfigError> {
            explicit_file::add_to_builder(builder_with_defaults()?, path)?
                .build()?
                .try_deserialize()
        };
        build().map_err(config_error)
    }
}

fn config_error(error: ConfigError) -> ComposedError {
    ComposedError::wrap(
        ErrorKind::Config(format!("Unable to load configuration: {}", error)),
        error,
        ExitCode::General,
        DisplayFlags::message(),
    )
}
