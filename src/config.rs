//! Configuration System
//!
//! Per-invocation client configuration built once at dispatch. Layers, lowest to highest:
//! built-in defaults, the global config file, an explicit `--config` file, `APIGW_*`
//! environment variables, then global command-line flags ([`ClientOverrides`]).

use crate::endpoint::name::DEFAULT_NAMESPACE;
use crate::error::{ComposedError, DisplayFlags, ErrorKind, ExitCode};
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use merge::merge_policy::{
    DEFAULT_API_VERSION, DEFAULT_TIMEOUT_SECS, ENV_PREFIX, ENV_SEPARATOR,
};
pub use sources::global_file::{global_config_path, CONFIG_FILE_ENV};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Connection settings for the platform that hosts the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Host (optionally with scheme) of the platform API.
    #[serde(default)]
    pub apihost: String,

    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// `UUID:KEY` authorization key.
    #[serde(default)]
    pub auth: Option<String>,

    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Skip TLS certificate verification.
    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            apihost: String::new(),
            namespace: default_namespace(),
            auth: None,
            api_version: default_api_version(),
            insecure: false,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Effective namespace; `_` when none is configured.
    pub fn namespace(&self) -> &str {
        let namespace = self.namespace.trim();
        if namespace.is_empty() {
            DEFAULT_NAMESPACE
        } else {
            namespace
        }
    }

    /// Bare host, without scheme or trailing slash.
    pub fn host(&self) -> &str {
        let host = self.apihost.trim();
        let host = host
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(host);
        host.trim_end_matches('/')
    }

    /// Base URL of the platform API. The scheme defaults to `https`.
    pub fn api_base_url(&self) -> Result<String, ComposedError> {
        let host = self.apihost.trim().trim_end_matches('/');
        if host.is_empty() {
            return Err(ComposedError::new(
                ErrorKind::Config(
                    "The API host is not configured. Set it with --apihost or APIGW_CLIENT__APIHOST."
                        .to_string(),
                ),
                ExitCode::General,
                DisplayFlags::message(),
            ));
        }
        if host.contains("://") {
            Ok(host.to_string())
        } else {
            Ok(format!("https://{}", host))
        }
    }

    /// Basic-auth user and password split from the `UUID:KEY` authorization key.
    pub fn credentials(&self) -> Option<(String, String)> {
        let auth = self.auth.as_deref()?.trim();
        if auth.is_empty() {
            return None;
        }
        match auth.split_once(':') {
            Some((user, key)) => Some((user.to_string(), key.to_string())),
            None => Some((auth.to_string(), String::new())),
        }
    }
}

/// Command output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

/// Values supplied by global command-line flags; they beat every other layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientOverrides {
    pub apihost: Option<String>,
    pub auth: Option<String>,
    pub namespace: Option<String>,
    pub api_version: Option<String>,
    pub insecure: bool,
    pub no_color: bool,
}

impl ClientOverrides {
    pub fn apply(&self, config: &mut GatewayConfig) {
        if let Some(apihost) = &self.apihost {
            config.client.apihost = apihost.clone();
        }
        if let Some(auth) = &self.auth {
            config.client.auth = Some(auth.clone());
        }
        if let Some(namespace) = &self.namespace {
            config.client.namespace = namespace.clone();
        }
        if let Some(api_version) = &self.api_version {
            config.client.api_version = api_version.clone();
        }
        if self.insecure {
            config.client.insecure = true;
        }
        if self.no_color {
            config.output.color = false;
        }
    }
}
