//! Issue paths locating a failure inside nested config values.
//!
//! This module provides [`IssuePath`] and [`PathKey`]. A path is an ordered
//! list of object keys and array indices, e.g. `["bar", 0]`.

use std::fmt::{self, Display};

use serde_json::Value;

/// One step of an [`IssuePath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathKey {
    /// An object key (e.g. `mocha`, `timeout`)
    Key(String),
    /// An array index (e.g. `0`)
    Index(usize),
}

impl PathKey {
    /// Creates a key step.
    pub fn key(name: impl Into<String>) -> Self {
        PathKey::Key(name.into())
    }

    /// Creates an index step.
    pub fn index(idx: usize) -> Self {
        PathKey::Index(idx)
    }

    /// Converts the step to its JSON form: a string for keys, a number for indices.
    pub fn to_json(&self) -> Value {
        match self {
            PathKey::Key(name) => Value::String(name.clone()),
            PathKey::Index(idx) => Value::from(*idx),
        }
    }
}

impl From<&str> for PathKey {
    fn from(name: &str) -> Self {
        PathKey::Key(name.to_string())
    }
}

impl From<String> for PathKey {
    fn from(name: String) -> Self {
        PathKey::Key(name)
    }
}

impl From<usize> for PathKey {
    fn from(idx: usize) -> Self {
        PathKey::Index(idx)
    }
}

/// The location of an issue inside a validated value.
///
/// Paths are immutable; `push_key` and `push_index` return extended copies so
/// sibling fields can branch off a shared parent.
///
/// # Example
///
/// ```rust
/// use hardhat_schema::{IssuePath, PathKey};
///
/// let path = IssuePath::root().push_key("bar").push_index(0);
///
/// assert_eq!(path.to_string(), "bar[0]");
/// assert_eq!(path.keys(), &[PathKey::key("bar"), PathKey::index(0)]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct IssuePath {
    keys: Vec<PathKey>,
}

impl IssuePath {
    /// The empty path, pointing at the value passed to the top-level schema.
    pub fn root() -> Self {
        Self::default()
    }

    /// Builds a path from a list of steps.
    pub fn from_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<PathKey>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns a new path with an object key appended.
    pub fn push_key(&self, name: impl Into<String>) -> Self {
        let mut keys = self.keys.clone();
        keys.push(PathKey::Key(name.into()));
        Self { keys }
    }

    /// Returns a new path with an array index appended.
    pub fn push_index(&self, index: usize) -> Self {
        let mut keys = self.keys.clone();
        keys.push(PathKey::Index(index));
        Self { keys }
    }

    /// Returns `prefix` followed by this path.
    pub fn prefixed(&self, prefix: &IssuePath) -> Self {
        let mut keys = prefix.keys.clone();
        keys.extend(self.keys.iter().cloned());
        Self { keys }
    }

    pub fn is_root(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[PathKey] {
        &self.keys
    }

    pub fn into_keys(self) -> Vec<PathKey> {
        self.keys
    }

    /// Returns the parent path, or None at the root.
    pub fn parent(&self) -> Option<Self> {
        self.keys.split_last().map(|(_, rest)| Self {
            keys: rest.to_vec(),
        })
    }

    pub fn last(&self) -> Option<&PathKey> {
        self.keys.last()
    }

    /// Converts the path to a JSON array of strings and numbers.
    pub fn to_json(&self) -> Value {
        Value::Array(self.keys.iter().map(PathKey::to_json).collect())
    }
}

impl Display for IssuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.keys.iter().enumerate() {
            match key {
                PathKey::Key(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathKey::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_root_path_is_empty() {
        let path = IssuePath::root();
        assert!(path.is_root());
        assert_eq!(path.len(), 0);
        assert_eq!(path.to_string(), "");
        assert_eq!(path.to_json(), json!([]));
    }

    #[test]
    fn test_key_then_index() {
        let path = IssuePath::root().push_key("bar").push_index(0);
        assert_eq!(path.to_string(), "bar[0]");
        assert_eq!(path.to_json(), json!(["bar", 0]));
    }

    #[test]
    fn test_nested_keys() {
        let path = IssuePath::root().push_key("mocha").push_key("timeout");
        assert_eq!(path.to_string(), "mocha.timeout");
    }

    #[test]
    fn test_branching_leaves_parent_untouched() {
        let base = IssuePath::root().push_key("globals");
        let first = base.push_index(0);
        let second = base.push_index(1);

        assert_eq!(base.to_string(), "globals");
        assert_eq!(first.to_string(), "globals[0]");
        assert_eq!(second.to_string(), "globals[1]");
    }

    #[test]
    fn test_prefixed() {
        let inner = IssuePath::from_keys(["timeout"]);
        let prefix = IssuePath::from_keys(["mocha"]);
        assert_eq!(inner.prefixed(&prefix).to_json(), json!(["mocha", "timeout"]));
        assert_eq!(IssuePath::root().prefixed(&prefix), prefix);
    }

    #[test]
    fn test_parent_and_last() {
        let path = IssuePath::root().push_key("a").push_index(3);
        assert_eq!(path.last(), Some(&PathKey::Index(3)));

        let parent = path.parent().unwrap();
        assert_eq!(parent.to_string(), "a");
        assert!(parent.parent().unwrap().is_root());
        assert!(IssuePath::root().parent().is_none());
    }

    #[test]
    fn test_from_keys_mixed() {
        let path = IssuePath::from_keys([PathKey::key("bar"), PathKey::index(2)]);
        assert_eq!(path.keys(), &[PathKey::key("bar"), PathKey::index(2)]);
    }
}
