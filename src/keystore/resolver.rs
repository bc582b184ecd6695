//! Configuration variable resolution chain.
//!
//! A [`ConfigurationVariableResolver`] runs its [`FetchValueHandler`]s in
//! order. Each handler either answers or passes the variable on through
//! [`Next`]; after the last handler the variable is read from the
//! environment.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, trace};

use crate::config::{ConfigurationVariable, SensitiveValue};

use super::store::{KeystoreError, SecretStore};

/// Errors from resolving a configuration variable.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// No handler produced a value and the environment has no such variable.
    #[error("configuration variable '{0}' not found")]
    VariableNotFound(String),

    #[error(transparent)]
    Keystore(#[from] KeystoreError),

    /// The value is neither a string nor a configuration variable.
    #[error("expected a string or a configuration variable")]
    NotSensitiveValue,
}

/// Read access to environment variables.
pub trait Environment: Send + Sync {
    fn var(&self, name: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// A fixed set of variables.
#[derive(Debug, Clone, Default)]
pub struct MapEnvironment {
    vars: HashMap<String, String>,
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl Environment for MapEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

const CI_VARIABLES: [&str; 9] = [
    "BUILD_ID",
    "BUILD_NUMBER",
    "CI",
    "CI_APP_ID",
    "CI_BUILD_ID",
    "CI_BUILD_NUMBER",
    "CI_NAME",
    "CONTINUOUS_INTEGRATION",
    "RUN_ID",
];

/// Returns true when the environment looks like a CI run.
///
/// `CI=false` always means "not CI"; otherwise any of the usual CI markers
/// being set does.
pub fn is_ci(env: &dyn Environment) -> bool {
    if env.var("CI").as_deref() == Some("false") {
        return false;
    }
    CI_VARIABLES.iter().any(|name| env.var(name).is_some())
}

/// Settings for the keystore handler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Skip the keystore entirely; secrets come from the environment.
    pub ci: bool,
}

impl ResolverOptions {
    pub fn from_env(env: &dyn Environment) -> Self {
        Self { ci: is_ci(env) }
    }
}

/// One step of the resolution chain.
pub trait FetchValueHandler: Send + Sync {
    /// Returns the variable's value, or defers to `next`.
    fn fetch_value(
        &self,
        variable: &ConfigurationVariable,
        next: Next<'_>,
    ) -> Result<String, ResolveError>;
}

/// The remainder of the chain after the current handler.
pub struct Next<'a> {
    handlers: &'a [Arc<dyn FetchValueHandler>],
    env: &'a dyn Environment,
}

impl Next<'_> {
    /// Hands the variable to the next handler, or to the environment lookup
    /// once no handlers remain.
    pub fn run(self, variable: &ConfigurationVariable) -> Result<String, ResolveError> {
        match self.handlers.split_first() {
            Some((handler, rest)) => handler.fetch_value(
                variable,
                Next {
                    handlers: rest,
                    env: self.env,
                },
            ),
            None => {
                trace!(variable = %variable.name, "reading configuration variable from environment");
                self.env
                    .var(&variable.name)
                    .ok_or_else(|| ResolveError::VariableNotFound(variable.name.clone()))
            }
        }
    }
}

/// Answers from a keystore when one is available and the run is not in CI.
pub struct KeystoreHandler {
    store: Option<Arc<dyn SecretStore>>,
    options: ResolverOptions,
}

impl KeystoreHandler {
    /// `store` is `None` when no keystore has been created yet.
    pub fn new(store: Option<Arc<dyn SecretStore>>, options: ResolverOptions) -> Self {
        Self { store, options }
    }
}

impl FetchValueHandler for KeystoreHandler {
    fn fetch_value(
        &self,
        variable: &ConfigurationVariable,
        next: Next<'_>,
    ) -> Result<String, ResolveError> {
        if self.options.ci {
            debug!(variable = %variable.name, "running in CI, skipping keystore");
            return next.run(variable);
        }

        let Some(store) = &self.store else {
            debug!(variable = %variable.name, "no keystore available");
            return next.run(variable);
        };

        match store.get(&variable.name)? {
            Some(value) => Ok(value),
            None => {
                debug!(variable = %variable.name, "key not in keystore");
                next.run(variable)
            }
        }
    }
}

/// Resolves configuration variables through an ordered handler chain.
///
/// ```rust
/// use hardhat_schema::config::ConfigurationVariable;
/// use hardhat_schema::keystore::{
///     ConfigurationVariableResolver, KeystoreHandler, MapEnvironment, MemoryKeystore,
///     ResolverOptions,
/// };
/// use std::sync::Arc;
///
/// let keystore = MemoryKeystore::new();
/// keystore.set("RPC_URL", "from-keystore", false).unwrap();
///
/// let env = MapEnvironment::new().with_var("RPC_URL", "from-env");
/// let resolver = ConfigurationVariableResolver::new(Arc::new(env)).with_handler(
///     KeystoreHandler::new(Some(Arc::new(keystore)), ResolverOptions { ci: false }),
/// );
///
/// let value = resolver.resolve(&ConfigurationVariable::new("RPC_URL")).unwrap();
/// assert_eq!(value, "from-keystore");
/// ```
#[derive(Clone)]
pub struct ConfigurationVariableResolver {
    handlers: Vec<Arc<dyn FetchValueHandler>>,
    env: Arc<dyn Environment>,
}

impl ConfigurationVariableResolver {
    pub fn new(env: Arc<dyn Environment>) -> Self {
        Self {
            handlers: Vec::new(),
            env,
        }
    }

    /// A resolver over the process environment with the keystore handler
    /// installed, configured from the same environment.
    pub fn from_process_env(store: Option<Arc<dyn SecretStore>>) -> Self {
        let options = ResolverOptions::from_env(&ProcessEnvironment);
        Self::new(Arc::new(ProcessEnvironment)).with_handler(KeystoreHandler::new(store, options))
    }

    /// Appends a handler; handlers run in the order they were added.
    pub fn with_handler<H: FetchValueHandler + 'static>(mut self, handler: H) -> Self {
        self.handlers.push(Arc::new(handler));
        self
    }

    pub fn resolve(&self, variable: &ConfigurationVariable) -> Result<String, ResolveError> {
        Next {
            handlers: &self.handlers,
            env: self.env.as_ref(),
        }
        .run(variable)
    }

    pub fn resolve_sensitive(&self, value: &SensitiveValue) -> Result<String, ResolveError> {
        match value {
            SensitiveValue::Plain(s) => Ok(s.clone()),
            SensitiveValue::Variable(variable) => self.resolve(variable),
        }
    }

    /// Resolves a validated sensitive config value given in JSON form.
    pub fn resolve_value(&self, value: &Value) -> Result<String, ResolveError> {
        let sensitive = SensitiveValue::from_value(value).ok_or(ResolveError::NotSensitiveValue)?;
        self.resolve_sensitive(&sensitive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keystore::MemoryKeystore;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn keystore_with(key: &str, value: &str) -> Arc<dyn SecretStore> {
        let keystore = MemoryKeystore::new();
        keystore.set(key, value, false).unwrap();
        Arc::new(keystore)
    }

    fn resolver(
        env: MapEnvironment,
        store: Option<Arc<dyn SecretStore>>,
        ci: bool,
    ) -> ConfigurationVariableResolver {
        ConfigurationVariableResolver::new(Arc::new(env))
            .with_handler(KeystoreHandler::new(store, ResolverOptions { ci }))
    }

    #[test]
    fn test_is_ci_detection() {
        assert!(!is_ci(&MapEnvironment::new()));
        assert!(is_ci(&MapEnvironment::new().with_var("CI", "true")));
        assert!(is_ci(&MapEnvironment::new().with_var("RUN_ID", "1")));
        assert!(!is_ci(
            &MapEnvironment::new().with_var("CI", "false").with_var("BUILD_NUMBER", "7")
        ));
    }

    #[test]
    fn test_keystore_value_wins_over_env() {
        let env = MapEnvironment::new().with_var("KEY", "env");
        let resolver = resolver(env, Some(keystore_with("KEY", "stored")), false);
        assert_eq!(resolver.resolve(&ConfigurationVariable::new("KEY")).unwrap(), "stored");
    }

    #[test]
    fn test_ci_skips_keystore() {
        let env = MapEnvironment::new().with_var("KEY", "env");
        let resolver = resolver(env, Some(keystore_with("KEY", "stored")), true);
        assert_eq!(resolver.resolve(&ConfigurationVariable::new("KEY")).unwrap(), "env");
    }

    #[test]
    fn test_missing_keystore_falls_back_to_env() {
        let env = MapEnvironment::new().with_var("KEY", "env");
        let resolver = resolver(env, None, false);
        assert_eq!(resolver.resolve(&ConfigurationVariable::new("KEY")).unwrap(), "env");
    }

    #[test]
    fn test_key_missing_from_keystore_falls_back_to_env() {
        let env = MapEnvironment::new().with_var("KEY", "env");
        let resolver = resolver(env, Some(keystore_with("OTHER", "x")), false);
        assert_eq!(resolver.resolve(&ConfigurationVariable::new("KEY")).unwrap(), "env");
    }

    #[test]
    fn test_not_found_anywhere() {
        let resolver = resolver(MapEnvironment::new(), None, false);
        let err = resolver.resolve(&ConfigurationVariable::new("NOPE")).unwrap_err();
        assert!(matches!(err, ResolveError::VariableNotFound(ref name) if name == "NOPE"));
        assert_eq!(err.to_string(), "configuration variable 'NOPE' not found");
    }

    struct FailingStore;

    impl SecretStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, KeystoreError> {
            Err(KeystoreError::Unavailable("corrupted file".to_string()))
        }

        fn keys(&self) -> Result<Vec<String>, KeystoreError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_keystore_errors_propagate() {
        let env = MapEnvironment::new().with_var("KEY", "env");
        let resolver = resolver(env, Some(Arc::new(FailingStore)), false);
        let err = resolver.resolve(&ConfigurationVariable::new("KEY")).unwrap_err();
        assert!(matches!(err, ResolveError::Keystore(KeystoreError::Unavailable(_))));
    }

    struct Fixed(&'static str, Arc<AtomicUsize>);

    impl FetchValueHandler for Fixed {
        fn fetch_value(
            &self,
            _variable: &ConfigurationVariable,
            _next: Next<'_>,
        ) -> Result<String, ResolveError> {
            self.1.fetch_add(1, Ordering::SeqCst);
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_handlers_run_in_order_and_stop_at_first_answer() {
        let first_calls = Arc::new(AtomicUsize::new(0));
        let second_calls = Arc::new(AtomicUsize::new(0));

        let resolver = ConfigurationVariableResolver::new(Arc::new(MapEnvironment::new()))
            .with_handler(Fixed("first", Arc::clone(&first_calls)))
            .with_handler(Fixed("second", Arc::clone(&second_calls)));

        assert_eq!(resolver.resolve(&ConfigurationVariable::new("X")).unwrap(), "first");
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_resolve_value() {
        let env = MapEnvironment::new().with_var("PK", "0xkey");
        let resolver = resolver(env, None, false);

        assert_eq!(resolver.resolve_value(&json!("plain")).unwrap(), "plain");
        assert_eq!(
            resolver
                .resolve_value(&ConfigurationVariable::new("PK").to_value())
                .unwrap(),
            "0xkey"
        );
        assert!(matches!(
            resolver.resolve_value(&json!(1)),
            Err(ResolveError::NotSensitiveValue)
        ));
    }
}
