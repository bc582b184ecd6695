//! Error types.
//!
//! Validation failures are data ([`Issue`], [`Issues`]). Mistakes made while
//! building a schema are reported as [`SchemaBuildError`].

mod issue;

pub use issue::{Issue, IssueCode, Issues};

/// Errors raised while constructing a schema.
#[derive(Debug, thiserror::Error)]
pub enum SchemaBuildError {
    /// A union combinator was given no candidates.
    #[error("{combinator} requires at least one candidate schema")]
    EmptyCandidates { combinator: &'static str },

    /// A string pattern failed to compile.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
