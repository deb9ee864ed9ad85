//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

pub const DEFAULT_API_VERSION: &str = "v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// `APIGW_CLIENT__APIHOST` sets `client.apihost`.
pub const ENV_PREFIX: &str = "APIGW";
pub const ENV_SEPARATOR: &str = "__";

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("client.api_version", DEFAULT_API_VERSION)?
        .set_default("client.namespace", "_")?
        .set_default("client.insecure", false)?
        .set_default("client.timeout_secs", DEFAULT_TIMEOUT_SECS)?
        .set_default("output.color", true)
}
