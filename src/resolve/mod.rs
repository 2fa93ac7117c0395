//! Resolve phase: raw form values → validated parameters for one operation.
//!
//! Pure and synchronous. Each call reads an immutable snapshot of the raw
//! values and shares no state with other calls.

pub mod merge;
pub mod operation;
pub mod params;
pub mod pipeline;
pub mod visibility;

pub use merge::{CanonicalValues, merge_canonical};
pub use operation::select_operation;
pub use params::{ResolvedParameters, build_parameters};
pub use pipeline::{resolve, resolve_with};
pub use visibility::{required_fields, resolve_visibility};

use serde_json::Value;

pub const TRACING_TARGET: &str = "blockform::resolve";

/// A value as the resolver sees it: `null` and blank strings are absent,
/// other strings are trimmed, everything else passes through.
pub(crate) fn effective(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| Value::String(trimmed.to_string()))
        }
        other => Some(other.clone()),
    }
}
