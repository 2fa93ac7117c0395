//! Schema validation phase.
//!
//! Runs once when a block is registered. Every error is collected so block
//! authors see all problems at once.

pub mod operations;
pub mod structural;

use crate::error::SchemaError;
use crate::schema::BlockDefinition;

/// Validate a block definition (fields, conditions, operations, rules).
pub fn validate_block(block: &BlockDefinition) -> Vec<SchemaError> {
    let mut errors = structural::validate_structural(block);
    errors.extend(operations::validate_operations(block));
    errors
}
