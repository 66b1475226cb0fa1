use crate::compat::{String, ToString, Vec};
use thiserror::Error;

/// A single field failure inside [`BindError::Validation`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {detail}")]
pub struct Issue {
    /// Name of the schema field the failure belongs to.
    pub field: String,
    /// What went wrong: missing input, coercion failure, or a violated
    /// constraint.
    pub detail: String,
}

/// Errors that can occur while declaring schemas and binding query state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// The schema declaration itself is ill-formed. This is a programming
    /// error on the caller's side, not bad query input.
    #[error("invalid schema: {detail}")]
    Schema { detail: String },
    /// One or more fields without a fallback received missing or invalid
    /// input. Every offending field is listed.
    #[error("query validation failed: {}", fmt_issues(.issues))]
    Validation { issues: Vec<Issue> },
    /// A bound state could not be deserialized into the requested type.
    #[error("state decode failed: {detail}")]
    Decode { detail: String },
}

fn fmt_issues(issues: &[Issue]) -> String {
    let mut out = String::new();
    for (index, issue) in issues.iter().enumerate() {
        if index > 0 {
            out.push_str("; ");
        }
        out.push_str(&issue.to_string());
    }
    out
}

/// Result type for query binding operations
pub type Result<T> = core::result::Result<T, BindError>;
