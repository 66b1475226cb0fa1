use crate::compat::{String, Vec};
use serde_json::Value;

/// Field kinds a schema can declare. Each kind pairs a decode rule for raw
/// query text with the matching encode rule for URL construction, so a
/// value written by one side is always readable by the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Raw text taken verbatim; travels bare in the query.
    Text,
    /// Finite `f64`; travels as a JSON number literal.
    Number,
    /// `i64`, strictly parsed; travels as a JSON number literal.
    Integer,
    /// Boolean switch: `true`, `1`, and bare presence mean on, `false` and
    /// `0` mean off; travels as `true`/`false`.
    Flag,
    /// Arbitrary JSON; travels as compact JSON text, strings included.
    Json,
}

impl FieldKind {
    /// Short label used in schema error details.
    pub fn label(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Flag => "flag",
            Self::Json => "json",
        }
    }
}

/// A single named field: a kind, optional constraints, and an optional
/// fallback.
///
/// A field with a fallback degrades silently: absent or invalid input is
/// replaced by the fallback. A field without one is required, and bad
/// input surfaces as a validation error instead.
#[derive(Debug, Clone)]
pub struct Field {
    pub(crate) name: String,
    pub(crate) kind: FieldKind,
    pub(crate) min: Option<f64>,
    pub(crate) max: Option<f64>,
    pub(crate) min_len: Option<usize>,
    pub(crate) max_len: Option<usize>,
    pub(crate) one_of: Option<Vec<String>>,
    pub(crate) fallback: Option<Value>,
}

impl Field {
    fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            min: None,
            max: None,
            min_len: None,
            max_len: None,
            one_of: None,
            fallback: None,
        }
    }

    /// Declare a text field.
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    /// Declare a number field.
    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Number)
    }

    /// Declare an integer field.
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    /// Declare a flag field.
    pub fn flag(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Flag)
    }

    /// Declare a JSON field.
    pub fn json(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Json)
    }

    /// Inclusive lower bound for numeric kinds.
    #[must_use]
    pub fn min(mut self, min: impl Into<f64>) -> Self {
        self.min = Some(min.into());
        self
    }

    /// Inclusive upper bound for numeric kinds.
    #[must_use]
    pub fn max(mut self, max: impl Into<f64>) -> Self {
        self.max = Some(max.into());
        self
    }

    /// Minimum length in characters for text fields.
    #[must_use]
    pub fn min_len(mut self, min_len: usize) -> Self {
        self.min_len = Some(min_len);
        self
    }

    /// Maximum length in characters for text fields.
    #[must_use]
    pub fn max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    /// Restrict a text field to a fixed set of allowed values.
    #[must_use]
    pub fn one_of<I, S>(mut self, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.one_of = Some(allowed.into_iter().map(Into::into).collect());
        self
    }

    /// Value substituted when input is absent or invalid. The fallback
    /// must itself satisfy the field's kind and constraints; schema
    /// construction rejects one that does not.
    #[must_use]
    pub fn fallback(mut self, fallback: impl Into<Value>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// Field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field kind.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Check whether the field has no fallback, making its input mandatory.
    pub fn is_required(&self) -> bool {
        self.fallback.is_none()
    }
}
