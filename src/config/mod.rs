//! Plugin config built on the schema combinators.
//!
//! - mocha runner options and their resolution over defaults
//!   ([`resolve_mocha_config`]);
//! - strings and URLs that may be given as configuration variables
//!   ([`sensitive_url_schema`]).

mod mocha;
mod sensitive;

pub use mocha::{
    mocha_config_schema, resolve_mocha_config, validate_mocha_user_config, MochaConfig,
    MochaTimeout, MochaUi, DEFAULT_MOCHA_TIMEOUT, MOCHA_UI_OPTIONS,
};
pub use sensitive::{
    configuration_variable_schema, sensitive_string_schema, sensitive_url_schema,
    ConfigurationVariable, SensitiveValue, CONFIGURATION_VARIABLE_TYPE,
};

use crate::error::SchemaBuildError;
use crate::validation::ConfigValidationError;

/// Errors from resolving a plugin config section.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The user config failed validation.
    #[error("invalid config: {} error(s)", .0.len())]
    Invalid(Vec<ConfigValidationError>),

    #[error(transparent)]
    Schema(#[from] SchemaBuildError),

    #[error("failed to convert validated config: {0}")]
    Convert(#[from] serde_json::Error),
}
