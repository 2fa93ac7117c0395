//! Schema phase: block definition JSON → Rust types + field dependency graph.

pub mod graph;
pub mod types;

pub use graph::{Dependency, FieldGraph};
pub use types::*;

use crate::error::Result;

/// Deserialize a block definition JSON string. Does not validate it; see
/// [`crate::validate::validate_block`] or [`crate::catalog::Block::new`].
pub fn parse(json: &str) -> Result<BlockDefinition> {
    Ok(serde_json::from_str::<BlockDefinition>(json)?)
}

/// Parse a raw values JSON object as sent by the form UI.
pub fn parse_values(json: &str) -> Result<RawValues> {
    Ok(serde_json::from_str::<RawValues>(json)?)
}
