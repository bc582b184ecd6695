//! Configuration variable resolution backed by a keystore.
//!
//! Secrets referenced from the config as configuration variables are looked
//! up in the keystore first and in the environment second. In CI the
//! keystore is never consulted.

mod resolver;
mod store;

pub use resolver::{
    is_ci, ConfigurationVariableResolver, Environment, FetchValueHandler, KeystoreHandler,
    MapEnvironment, Next, ProcessEnvironment, ResolveError, ResolverOptions,
};
pub use store::{is_valid_key, KeystoreError, MemoryKeystore, SecretStore};
