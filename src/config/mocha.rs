//! Mocha test-runner options.
//!
//! The user config's `mocha` key is validated with [`mocha_config_schema`] and
//! then deserialized into [`MochaConfig`], merged over the defaults.

use serde::ser::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::SchemaBuildError;
use crate::path::IssuePath;
use crate::schema::{candidate, ObjectSchema, Schema, SchemaLike};
use crate::validation::{issues_to_config_errors, ConfigValidationError};

use super::ConfigError;

/// Timeout applied when the user config does not set one, in milliseconds.
pub const DEFAULT_MOCHA_TIMEOUT: f64 = 40_000.0;

/// The interfaces mocha accepts for `ui`.
pub const MOCHA_UI_OPTIONS: [&str; 4] = ["bdd", "tdd", "qunit", "exports"];

/// A mocha timeout: milliseconds or a duration string such as `"2s"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MochaTimeout {
    Millis(f64),
    Duration(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MochaUi {
    Bdd,
    Tdd,
    Qunit,
    Exports,
}

/// Resolved mocha options. Unset options are left to mocha's own defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MochaConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_uncaught: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub async_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bail: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_leaks: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forbid_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forbid_pending: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_trace: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub globals: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grep: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_diffs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invert: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_highlighting: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporter_options: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retries: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slow: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<MochaTimeout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ui: Option<MochaUi>,
}

impl MochaConfig {
    /// Returns `self` with every option set in `overrides` replaced.
    ///
    /// ```rust
    /// use hardhat_schema::config::{MochaConfig, MochaTimeout};
    ///
    /// let base = MochaConfig { bail: Some(false), timeout: Some(MochaTimeout::Millis(40000.0)), ..Default::default() };
    /// let cli = MochaConfig { bail: Some(true), ..Default::default() };
    ///
    /// let merged = base.merge(cli).unwrap();
    /// assert_eq!(merged.bail, Some(true));
    /// assert_eq!(merged.timeout, Some(MochaTimeout::Millis(40000.0)));
    /// ```
    pub fn merge(self, overrides: MochaConfig) -> Result<MochaConfig, ConfigError> {
        let mut merged = to_object(self)?;
        merged.extend(to_object(overrides)?);
        Ok(serde_json::from_value(Value::Object(merged))?)
    }
}

fn to_object(config: MochaConfig) -> Result<Map<String, Value>, ConfigError> {
    match serde_json::to_value(config)? {
        Value::Object(map) => Ok(map),
        other => Err(ConfigError::Convert(serde_json::Error::custom(format!(
            "mocha config serialized to {other} instead of an object"
        )))),
    }
}

/// Schema for the `mocha` options object.
///
/// `timeout` and `ui` are unions with a single summary message each, so a
/// wrong value reports one readable issue instead of one per alternative.
pub fn mocha_config_schema() -> Result<ObjectSchema, SchemaBuildError> {
    let timeout = Schema::union(
        vec![candidate(Schema::number()), candidate(Schema::string())],
        "Expected a number or a string",
    )?;

    let ui = Schema::union(
        MOCHA_UI_OPTIONS
            .iter()
            .map(|option| candidate(Schema::literal(*option)))
            .collect(),
        "Expected 'bdd', 'tdd', 'qunit' or 'exports'",
    )?;

    Ok(Schema::object()
        .optional("allowUncaught", Schema::boolean())
        .optional("asyncOnly", Schema::boolean())
        .optional("bail", Schema::boolean())
        .optional("checkLeaks", Schema::boolean())
        .optional("delay", Schema::boolean())
        .optional("dryRun", Schema::boolean())
        .optional("exit", Schema::boolean())
        .optional("forbidOnly", Schema::boolean())
        .optional("forbidPending", Schema::boolean())
        .optional("fullTrace", Schema::boolean())
        .optional("globals", Schema::array(Schema::string()))
        .optional("grep", Schema::string())
        .optional("inlineDiffs", Schema::boolean())
        .optional("invert", Schema::boolean())
        .optional("jobs", Schema::number())
        .optional("noHighlighting", Schema::boolean())
        .optional("parallel", Schema::boolean())
        .optional("reporter", Schema::string())
        .optional("reporterOptions", Schema::unknown())
        .optional("require", Schema::array(Schema::string()))
        .optional("retries", Schema::number())
        .optional("slow", Schema::number())
        .optional("timeout", timeout)
        .optional("ui", ui))
}

/// Validates `user_config.mocha` and resolves it over the defaults.
///
/// A missing `mocha` key resolves to the defaults. Validation problems are
/// returned as [`ConfigError::Invalid`] with paths starting at `mocha`.
///
/// ```rust
/// use hardhat_schema::config::{resolve_mocha_config, ConfigError, MochaTimeout, MochaUi};
/// use serde_json::json;
///
/// let config = resolve_mocha_config(&json!({ "mocha": { "ui": "tdd" } })).unwrap();
/// assert_eq!(config.ui, Some(MochaUi::Tdd));
/// assert_eq!(config.timeout, Some(MochaTimeout::Millis(40000.0)));
///
/// let err = resolve_mocha_config(&json!({ "mocha": { "ui": "jasmine" } })).unwrap_err();
/// assert!(matches!(err, ConfigError::Invalid(errors) if errors[0].message == "Expected 'bdd', 'tdd', 'qunit' or 'exports'"));
/// ```
pub fn resolve_mocha_config(user_config: &Value) -> Result<MochaConfig, ConfigError> {
    let defaults = MochaConfig {
        timeout: Some(MochaTimeout::Millis(DEFAULT_MOCHA_TIMEOUT)),
        ..Default::default()
    };

    let Some(user_mocha) = user_config.get("mocha") else {
        debug!("no mocha config provided, using defaults");
        return Ok(defaults);
    };

    let schema = mocha_config_schema()?;
    let validated = schema
        .validate_to_value(user_mocha, &IssuePath::root().push_key("mocha"))
        .into_result()
        .map_err(|issues| ConfigError::Invalid(issues_to_config_errors(issues)))?;

    let user: MochaConfig = serde_json::from_value(validated)?;
    defaults.merge(user)
}

/// Validation-only entry point, used by the config validation hook.
pub fn validate_mocha_user_config(
    user_config: &Value,
) -> Result<Vec<ConfigValidationError>, ConfigError> {
    let Some(user_mocha) = user_config.get("mocha") else {
        return Ok(Vec::new());
    };

    let schema = mocha_config_schema()?;
    let result = schema
        .validate_to_value(user_mocha, &IssuePath::root().push_key("mocha"))
        .into_result();

    Ok(match result {
        Ok(_) => Vec::new(),
        Err(issues) => issues_to_config_errors(issues),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathKey;
    use serde_json::json;

    #[test]
    fn test_missing_mocha_key_uses_defaults() {
        let config = resolve_mocha_config(&json!({})).unwrap();
        assert_eq!(config.timeout, Some(MochaTimeout::Millis(DEFAULT_MOCHA_TIMEOUT)));
        assert_eq!(config.bail, None);
    }

    #[test]
    fn test_user_options_override_defaults() {
        let config = resolve_mocha_config(&json!({
            "mocha": { "timeout": "10s", "bail": true, "globals": ["ethers"] }
        }))
        .unwrap();

        assert_eq!(config.timeout, Some(MochaTimeout::Duration("10s".to_string())));
        assert_eq!(config.bail, Some(true));
        assert_eq!(config.globals, Some(vec!["ethers".to_string()]));
    }

    #[test]
    fn test_timeout_accepts_number_or_string_only() {
        let schema = mocha_config_schema().unwrap();
        assert!(schema.safe_parse(&json!({ "timeout": 2000 })).is_success());
        assert!(schema.safe_parse(&json!({ "timeout": "2s" })).is_success());

        let issues = schema.parse(&json!({ "timeout": true })).unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues.first().message, "Expected a number or a string");
        assert_eq!(issues.first().path.to_string(), "timeout");
    }

    #[test]
    fn test_ui_accepts_only_known_interfaces() {
        let schema = mocha_config_schema().unwrap();
        for ui in MOCHA_UI_OPTIONS {
            assert!(schema.safe_parse(&json!({ "ui": ui })).is_success(), "{ui}");
        }

        let issues = schema.parse(&json!({ "ui": "BDD" })).unwrap_err();
        assert_eq!(issues.messages(), vec!["Expected 'bdd', 'tdd', 'qunit' or 'exports'"]);
    }

    #[test]
    fn test_invalid_config_paths_start_at_mocha() {
        let errors = validate_mocha_user_config(&json!({
            "mocha": { "require": ["./a.js", 3], "retries": "x" }
        }))
        .unwrap();

        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors[0].path,
            vec![PathKey::key("mocha"), PathKey::key("require"), PathKey::index(1)]
        );
        assert_eq!(errors[1].path, vec![PathKey::key("mocha"), PathKey::key("retries")]);
    }

    #[test]
    fn test_numeric_options_accept_any_number() {
        let config = resolve_mocha_config(&json!({
            "mocha": { "retries": 1.5, "jobs": 0, "slow": -1 }
        }))
        .unwrap();

        assert_eq!(config.retries, Some(1.5));
        assert_eq!(config.jobs, Some(0.0));
        assert_eq!(config.slow, Some(-1.0));
    }

    #[test]
    fn test_merge_keeps_every_option_set_on_either_side() {
        let base = MochaConfig {
            bail: Some(true),
            globals: Some(vec!["ethers".to_string()]),
            reporter_options: Some(json!({ "output": "r.json" })),
            ..Default::default()
        };
        let overrides = MochaConfig {
            bail: Some(false),
            jobs: Some(4.0),
            ui: Some(MochaUi::Exports),
            ..Default::default()
        };

        let merged = base.clone().merge(overrides).unwrap();
        assert_eq!(merged.bail, Some(false));
        assert_eq!(merged.globals, base.globals);
        assert_eq!(merged.reporter_options, base.reporter_options);
        assert_eq!(merged.jobs, Some(4.0));
        assert_eq!(merged.ui, Some(MochaUi::Exports));

        assert_eq!(base.clone().merge(MochaConfig::default()).unwrap(), base);
    }

    #[test]
    fn test_mocha_must_be_object() {
        let err = resolve_mocha_config(&json!({ "mocha": "fast" })).unwrap_err();
        match err {
            ConfigError::Invalid(errors) => {
                assert_eq!(errors[0].message, "Expected object, received string");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_reporter_options_pass_through() {
        let config = resolve_mocha_config(&json!({
            "mocha": { "reporter": "json", "reporterOptions": { "output": "out.json" } }
        }))
        .unwrap();
        assert_eq!(config.reporter_options, Some(json!({ "output": "out.json" })));
    }

    #[test]
    fn test_unknown_mocha_keys_are_dropped() {
        let config = resolve_mocha_config(&json!({ "mocha": { "colors": true } })).unwrap();
        assert_eq!(config, resolve_mocha_config(&json!({})).unwrap());
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let base = MochaConfig {
            grep: Some("erc20".to_string()),
            ..Default::default()
        };
        let merged = base.merge(MochaConfig::default()).unwrap();
        assert_eq!(merged.grep.as_deref(), Some("erc20"));
    }
}
