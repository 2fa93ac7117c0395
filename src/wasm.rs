//! WASM entry points for the block configuration form.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::catalog::{Block, BlockRegistry};
use crate::error::Error;
use crate::schema::{self, RawValues};

/// Validate a block definition JSON.
/// Returns a JSON array of error objects (empty when valid).
#[wasm_bindgen]
pub fn validate_block(definition_json: &str) -> JsValue {
    let result = match Block::from_json(definition_json) {
        Ok(_) => vec![],
        Err(e) => ErrorDto::from_error(e),
    };
    to_js(&result)
}

/// Active and required field ids for the current form values.
#[wasm_bindgen]
pub fn describe_form(definition_json: &str, values_json: &str) -> JsValue {
    to_js(&describe_form_inner(definition_json, values_json))
}

fn describe_form_inner(definition_json: &str, values_json: &str) -> FormResult {
    let (block, values) = match load(definition_json, values_json) {
        Ok(loaded) => loaded,
        Err(e) => {
            return FormResult::Errors {
                errors: ErrorDto::from_error(e),
            };
        }
    };
    FormResult::Success {
        active: block.active_fields(&values).into_iter().collect(),
        required: block.required_fields(&values).into_iter().collect(),
    }
}

/// Full resolution: parse → validate schema → resolve parameters.
/// Returns `{ status: "success", parameters }` or `{ status: "errors", errors }`.
#[wasm_bindgen]
pub fn resolve_block(definition_json: &str, values_json: &str) -> JsValue {
    to_js(&resolve_block_inner(definition_json, values_json))
}

fn resolve_block_inner(definition_json: &str, values_json: &str) -> ResolveResult {
    let resolved = load(definition_json, values_json)
        .and_then(|(block, values)| block.resolve(&values));
    match resolved {
        Ok(params) => ResolveResult::Success {
            parameters: params.to_value(),
        },
        Err(e) => ResolveResult::Errors {
            errors: ErrorDto::from_error(e),
        },
    }
}

/// Resolve values against one of the bundled blocks, by block id.
#[wasm_bindgen]
pub fn resolve_builtin(block_id: &str, values_json: &str) -> JsValue {
    to_js(&resolve_builtin_inner(block_id, values_json))
}

fn resolve_builtin_inner(block_id: &str, values_json: &str) -> ResolveResult {
    let resolved = BlockRegistry::shared_builtin().and_then(|registry| {
        let values = schema::parse_values(values_json)?;
        match registry.get(block_id) {
            Some(block) => block.resolve(&values).map(Some),
            None => Ok(None),
        }
    });
    match resolved {
        Ok(Some(params)) => ResolveResult::Success {
            parameters: params.to_value(),
        },
        Ok(None) => ResolveResult::Errors {
            errors: vec![ErrorDto {
                code: "R003".into(),
                phase: "Resolve".into(),
                message: format!("Unknown block '{}'", block_id),
                field_id: None,
            }],
        },
        Err(e) => ResolveResult::Errors {
            errors: ErrorDto::from_error(e),
        },
    }
}

fn load(definition_json: &str, values_json: &str) -> crate::error::Result<(Block, RawValues)> {
    let block = Block::from_json(definition_json)?;
    let values = schema::parse_values(values_json)?;
    Ok((block, values))
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or(JsValue::NULL)
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDto {
    code: String,
    phase: String,
    message: String,
    field_id: Option<String>,
}

impl ErrorDto {
    fn from_error(error: Error) -> Vec<ErrorDto> {
        let phase = error.phase().to_string();
        match error {
            Error::Schema(errors) => errors
                .into_iter()
                .map(|e| ErrorDto {
                    code: e.code.to_string(),
                    phase: phase.clone(),
                    message: e.message,
                    field_id: e.field_id,
                })
                .collect(),
            Error::Validation(e) => vec![ErrorDto {
                code: "R001".into(),
                phase,
                message: e.reason.to_string(),
                field_id: Some(e.field_id),
            }],
            other => {
                let code = match &other {
                    Error::Io { .. } => "P002",
                    Error::Convert { .. } => "R002",
                    _ => "P001",
                };
                vec![ErrorDto {
                    code: code.into(),
                    phase,
                    message: other.to_string(),
                    field_id: None,
                }]
            }
        }
    }
}

#[derive(Debug, serde::Serialize)]
#[serde(tag = "status")]
enum FormResult {
    #[serde(rename = "success")]
    Success {
        active: Vec<String>,
        required: Vec<String>,
    },
    #[serde(rename = "errors")]
    Errors { errors: Vec<ErrorDto> },
}

#[derive(Debug, serde::Serialize)]
#[serde(tag = "status")]
enum ResolveResult {
    #[serde(rename = "success")]
    Success { parameters: serde_json::Value },
    #[serde(rename = "errors")]
    Errors { errors: Vec<ErrorDto> },
}
