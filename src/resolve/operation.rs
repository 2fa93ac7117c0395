//! Operation selector.

use super::TRACING_TARGET;
use crate::schema::OperationMap;

/// Map the operation field's value to a backend-operation identifier.
///
/// Never fails: a missing or unrecognized value selects the map's default
/// entry.
pub fn select_operation<'a>(map: &'a OperationMap, current: Option<&str>) -> &'a str {
    match current {
        Some(key) => match map.get(key) {
            Some(operation) => operation,
            None => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    operation = key,
                    fallback = map.default_operation(),
                    "Unrecognized operation, falling back to default"
                );
                map.default_operation()
            }
        },
        None => {
            tracing::debug!(
                target: TRACING_TARGET,
                fallback = map.default_operation(),
                "No operation selected, using default"
            );
            map.default_operation()
        }
    }
}
