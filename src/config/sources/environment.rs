//! Environment source: `APIGW_CLIENT__APIHOST`, `APIGW_OUTPUT__COLOR`, ...

use super::super::merge::merge_policy::{ENV_PREFIX, ENV_SEPARATOR};
use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator(ENV_SEPARATOR)
            .try_parsing(true),
    )
}
