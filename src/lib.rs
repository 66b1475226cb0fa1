#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Compatibility layer for std/no_std
mod compat;

// Internal modules (not public API)
mod binder;
mod coerce;
mod encoding;
mod error;
mod field;
mod helpers;
mod query_pairs;
mod schema;
mod state;
mod update;

// Public API
pub use binder::{Binder, EvalCache};
pub use error::{BindError, Issue};
pub use field::{Field, FieldKind};
pub use helpers::split_target;
pub use query_pairs::QueryPairs;
pub use schema::{Schema, SchemaBuilder};
pub use state::BoundState;
pub use update::Update;

/// JSON value type used for fallbacks, update assignments, and bound state
/// entries.
pub use serde_json::Value;

pub type Result<T> = core::result::Result<T, BindError>;
