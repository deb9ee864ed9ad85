//! CLI parse: clap types for apigw. No behavior; definitions only.

use crate::config::ClientOverrides;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// apigw - manage API gateway endpoints backed by platform actions
#[derive(Parser)]
#[command(name = "apigw")]
#[command(about = "Create, inspect, and remove API gateway endpoints that invoke actions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over the global config file)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Platform API host
    #[arg(long, global = true)]
    pub apihost: Option<String>,

    /// Authorization key (UUID:KEY)
    #[arg(short = 'u', long, global = true)]
    pub auth: Option<String>,

    /// Namespace that owns the APIs
    #[arg(long, global = true)]
    pub namespace: Option<String>,

    /// Platform API version
    #[arg(long = "apiversion", global = true)]
    pub api_version: Option<String>,

    /// Bypass certificate checking
    #[arg(short = 'i', long, global = true)]
    pub insecure: bool,

    /// Enable verbose logging (info)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (when output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

impl Cli {
    pub fn overrides(&self) -> ClientOverrides {
        ClientOverrides {
            apihost: self.apihost.clone(),
            auth: self.auth.clone(),
            namespace: self.namespace.clone(),
            api_version: self.api_version.clone(),
            insecure: self.insecure,
            no_color: self.no_color,
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create a new API
    #[command(
        override_usage = "apigw create ([BASE_PATH|API_NAME] API_PATH API_VERB ACTION | --config-file CFG_FILE)"
    )]
    Create {
        /// [BASE_PATH|API_NAME] API_PATH API_VERB ACTION
        args: Vec<String>,

        /// Friendly name of the API; ignored when a swagger file is given
        #[arg(short = 'n', long = "apiname")]
        api_name: Option<String>,

        /// Swagger file describing the whole API
        #[arg(short = 'c', long = "config-file")]
        config_file: Option<PathBuf>,
    },
    /// Update an existing API
    #[command(override_usage = "apigw update [BASE_PATH|API_NAME] API_PATH API_VERB ACTION")]
    Update {
        /// [BASE_PATH|API_NAME] API_PATH API_VERB ACTION
        args: Vec<String>,

        /// Friendly name of the API
        #[arg(short = 'n', long = "apiname")]
        api_name: Option<String>,
    },
    /// Get API details
    #[command(override_usage = "apigw get BASE_PATH|API_NAME")]
    Get {
        /// BASE_PATH|API_NAME
        args: Vec<String>,

        /// Display full API configuration details
        #[arg(short = 'f', long)]
        full: bool,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// Delete an API
    #[command(override_usage = "apigw delete BASE_PATH|API_NAME [API_PATH [API_VERB]]")]
    Delete {
        /// BASE_PATH|API_NAME [API_PATH [API_VERB]]
        args: Vec<String>,
    },
    /// List APIs
    #[command(override_usage = "apigw list [BASE_PATH|API_NAME [API_PATH [API_VERB]]]")]
    List {
        /// [BASE_PATH|API_NAME [API_PATH [API_VERB]]]
        args: Vec<String>,

        /// Exclude the first N APIs from the result
        #[arg(short = 's', long, default_value = "0")]
        skip: u32,

        /// Return at most N APIs
        #[arg(short = 'l', long, default_value = "30")]
        limit: u32,

        /// Display full API configuration details
        #[arg(short = 'f', long)]
        full: bool,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
}
