pub mod blocks;
pub mod catalog;
pub mod error;
pub mod resolve;
pub mod schema;
pub mod validate;
pub mod wasm;

pub use catalog::{Block, BlockRegistry};
pub use error::{Error, Reason, Result, SchemaError, ValidationError};
pub use resolve::ResolvedParameters;
pub use schema::{BlockDefinition, FieldSpec, RawValues};
