//! Canonical value merger: one value per logical parameter.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use super::effective;
use crate::schema::{FieldSpec, RawValues};

/// Canonical parameter name → effective value. Absent parameters have no entry.
pub type CanonicalValues = BTreeMap<String, Value>;

/// Collapse the active fields into one value per canonical key.
///
/// Within a group, the first field in declaration order with a non-blank raw
/// value wins. Defaults are only consulted when no member has a raw value,
/// again in declaration order.
pub fn merge_canonical(
    fields: &[FieldSpec],
    values: &RawValues,
    active: &BTreeSet<String>,
) -> CanonicalValues {
    let active_fields: Vec<&FieldSpec> = fields.iter().filter(|f| active.contains(&f.id)).collect();

    let mut canonical = CanonicalValues::new();
    for field in &active_fields {
        let key = field.canonical_key();
        if canonical.contains_key(key) {
            continue;
        }
        if let Some(value) = values.get(&field.id).and_then(effective) {
            canonical.insert(key.to_string(), value);
        }
    }
    for field in &active_fields {
        let key = field.canonical_key();
        if canonical.contains_key(key) {
            continue;
        }
        if let Some(value) = field.default_value().as_ref().and_then(effective) {
            canonical.insert(key.to_string(), value);
        }
    }
    canonical
}
