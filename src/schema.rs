use crate::coerce::{decode_raw, encode_value, vet};
use crate::compat::{String, ToString, Vec, format};
use crate::error::{BindError, Issue, Result};
use crate::field::{Field, FieldKind};
use crate::query_pairs::QueryPairs;
use crate::state::BoundState;
use crate::update::Update;
use serde_json::Value;

/// A validated description of the query fields a surface binds to.
///
/// Built through [`Schema::builder`]. Construction rejects ill-formed
/// declarations up front, so a `Schema` value never produces configuration
/// errors later: every fallback is known to satisfy its own field.
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<Field>,
    fingerprint: u64,
}

impl Schema {
    /// Start declaring a schema.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder { fields: Vec::new() }
    }

    /// Look up a declared field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Declared fields, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Hash of the full declaration, usable as one half of a memoization
    /// key. Two schemas with identical declarations share a fingerprint.
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// Validate a query against this schema and produce the bound state.
    ///
    /// Each field reads the last occurrence of its key. Input that decodes
    /// and satisfies the constraints is accepted; anything else (absent,
    /// undecodable, or out of bounds) degrades to the field's fallback.
    /// Keys the schema does not declare are ignored. Evaluation is pure:
    /// the same schema and query always produce the same state.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::Validation`] when a field without a fallback
    /// has missing or invalid input, naming every offending field.
    ///
    /// # Examples
    ///
    /// ```
    /// use uqs::{Field, QueryPairs, Schema};
    ///
    /// let schema = Schema::builder()
    ///     .field(Field::integer("count").min(0).fallback(0))
    ///     .build()?;
    ///
    /// let state = schema.evaluate(&QueryPairs::parse("count=5"))?;
    /// assert_eq!(state.integer("count"), Some(5));
    ///
    /// // Out of bounds degrades to the fallback
    /// let state = schema.evaluate(&QueryPairs::parse("count=-3"))?;
    /// assert_eq!(state.integer("count"), Some(0));
    /// # Ok::<(), uqs::BindError>(())
    /// ```
    pub fn evaluate(&self, query: &QueryPairs) -> Result<BoundState> {
        let mut entries = Vec::with_capacity(self.fields.len());
        let mut issues = Vec::new();
        for field in &self.fields {
            match resolve(field, query.last(&field.name)) {
                Ok(value) => entries.push((field.name.clone(), value)),
                Err(issue) => issues.push(issue),
            }
        }
        if issues.is_empty() {
            Ok(BoundState::from_entries(entries))
        } else {
            Err(BindError::Validation { issues })
        }
    }

    /// Build a URL string by merging `update` into `query` at `path`.
    ///
    /// Updated keys keep their position in the query; keys the update does
    /// not mention pass through untouched, declared or not. A null update
    /// value removes its key. When nothing remains, the bare path is
    /// returned without a `?`.
    ///
    /// Values are written through the declared field kind: a value that
    /// matches its field's kind reads back identically when the produced
    /// URL is evaluated, while a mismatched one (say, text written to an
    /// integer field) still serializes but degrades on the next evaluation
    /// like any other invalid input.
    pub fn create_url(&self, path: &str, query: &QueryPairs, update: &Update) -> String {
        let mut merged = query.clone();
        for (key, value) in update.iter() {
            if value.is_null() {
                merged.remove(key);
            } else {
                let kind = self.field(key).map(Field::kind);
                merged.set(key, &encode_value(kind, value));
            }
        }
        let query_string = merged.serialize();
        let mut url = String::with_capacity(path.len() + query_string.len());
        url.push_str(path);
        url.push_str(&query_string);
        url
    }
}

/// Accept-or-fallback resolution for a single field.
fn resolve(field: &Field, raw: Option<&str>) -> core::result::Result<Value, Issue> {
    let outcome = match raw {
        Some(text) => {
            decode_raw(field.kind, text).and_then(|value| vet(field, &value).map(|()| value))
        }
        None => Err("missing".to_string()),
    };
    match outcome {
        Ok(value) => Ok(value),
        Err(detail) => field.fallback.clone().ok_or_else(|| Issue {
            field: field.name.clone(),
            detail,
        }),
    }
}

/// Builder for [`Schema`].
pub struct SchemaBuilder {
    fields: Vec<Field>,
}

impl SchemaBuilder {
    /// Add a field declaration.
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Finalize the schema.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::Schema`] for an empty or duplicate field name,
    /// constraints that do not match the field kind, inverted bounds, or a
    /// fallback that fails its own field's rules.
    pub fn build(self) -> Result<Schema> {
        for (index, field) in self.fields.iter().enumerate() {
            if field.name.is_empty() {
                return Err(schema_error("field name is empty"));
            }
            if self.fields[..index].iter().any(|prior| prior.name == field.name) {
                return Err(schema_error(&format!("duplicate field `{}`", field.name)));
            }
            check_shape(field)?;
            if let Some(fallback) = &field.fallback {
                vet(field, fallback).map_err(|detail| {
                    schema_error(&format!("fallback for `{}` is invalid: {detail}", field.name))
                })?;
            }
        }
        let fingerprint = fingerprint(&self.fields);
        Ok(Schema {
            fields: self.fields,
            fingerprint,
        })
    }
}

fn schema_error(detail: &str) -> BindError {
    BindError::Schema {
        detail: detail.to_string(),
    }
}

/// Constraints must match the field kind, and ranges must not be inverted.
fn check_shape(field: &Field) -> Result<()> {
    let numeric = matches!(field.kind, FieldKind::Number | FieldKind::Integer);
    if (field.min.is_some() || field.max.is_some()) && !numeric {
        return Err(schema_error(&format!(
            "`{}` ({}) cannot carry numeric bounds",
            field.name,
            field.kind.label()
        )));
    }
    if let (Some(min), Some(max)) = (field.min, field.max) {
        if min > max {
            return Err(schema_error(&format!("`{}` has min above max", field.name)));
        }
    }
    let text = field.kind == FieldKind::Text;
    if (field.min_len.is_some() || field.max_len.is_some() || field.one_of.is_some()) && !text {
        return Err(schema_error(&format!(
            "`{}` ({}) cannot carry text constraints",
            field.name,
            field.kind.label()
        )));
    }
    if let (Some(min_len), Some(max_len)) = (field.min_len, field.max_len) {
        if min_len > max_len {
            return Err(schema_error(&format!(
                "`{}` has min_len above max_len",
                field.name
            )));
        }
    }
    Ok(())
}

/// FNV-1a over the canonical field descriptors, declaration order included.
/// The descriptor pins the `one_of` item count and fallback presence, and
/// every chunk is hashed length-first, so the byte stream is prefix-free:
/// regrouping adjacent values (`["ab", "c"]` vs `["a", "bc"]`) cannot
/// produce the same hash.
fn fingerprint(fields: &[Field]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for field in fields {
        hash = fnv_chunk(hash, field.name.as_bytes());
        hash = fnv_chunk(hash, field.kind.label().as_bytes());
        hash = fnv_chunk(
            hash,
            format!(
                "{:?}:{:?}:{:?}:{:?}:{:?}:{}",
                field.min,
                field.max,
                field.min_len,
                field.max_len,
                field.one_of.as_ref().map(Vec::len),
                field.fallback.is_some(),
            )
            .as_bytes(),
        );
        if let Some(one_of) = &field.one_of {
            for allowed in one_of {
                hash = fnv_chunk(hash, allowed.as_bytes());
            }
        }
        if let Some(fallback) = &field.fallback {
            hash = fnv_chunk(hash, fallback.to_string().as_bytes());
        }
    }
    hash
}

/// Hash one chunk, length first, so no chunk can run into the next.
fn fnv_chunk(mut hash: u64, bytes: &[u8]) -> u64 {
    hash = fnv(hash, &(bytes.len() as u64).to_le_bytes());
    fnv(hash, bytes)
}

fn fnv(mut hash: u64, bytes: &[u8]) -> u64 {
    for &byte in bytes {
        hash = (hash ^ u64::from(byte)).wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}
