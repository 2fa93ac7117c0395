//! Unified error types used across all phases.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Parse,
    Schema,
    Resolve,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Parse => write!(f, "Parse"),
            Phase::Schema => write!(f, "Schema"),
            Phase::Resolve => write!(f, "Resolve"),
        }
    }
}

/// A malformed block definition. Fatal: the block is not registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{code}] {message}{}", .field_id.as_ref().map(|id| format!(" (field '{}')", id)).unwrap_or_default())]
pub struct SchemaError {
    pub code: &'static str,
    pub message: String,
    pub field_id: Option<String>,
}

impl SchemaError {
    pub fn new(code: &'static str, message: impl Into<String>, field_id: Option<String>) -> Self {
        SchemaError {
            code,
            message: message.into(),
            field_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    Required,
    NotANumber,
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reason::Required => write!(f, "required"),
            Reason::NotANumber => write!(f, "not a number"),
        }
    }
}

/// A canonical parameter failed a rule of the selected operation.
/// `field_id` is the canonical parameter name the form error is tied to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field_id}: {reason}")]
pub struct ValidationError {
    pub field_id: String,
    pub reason: Reason,
}

impl ValidationError {
    pub fn required(field_id: impl Into<String>) -> Self {
        ValidationError {
            field_id: field_id.into(),
            reason: Reason::Required,
        }
    }

    pub fn not_a_number(field_id: impl Into<String>) -> Self {
        ValidationError {
            field_id: field_id.into(),
            reason: Reason::NotANumber,
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse block definition: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid block definition: {}", join(.0))]
    Schema(Vec<SchemaError>),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("resolved parameters do not fit operation '{operation}': {source}")]
    Convert {
        operation: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn phase(&self) -> Phase {
        match self {
            Error::Parse(_) | Error::Io { .. } => Phase::Parse,
            Error::Schema(_) => Phase::Schema,
            Error::Validation(_) | Error::Convert { .. } => Phase::Resolve,
        }
    }

    /// The field a form error should be attached to, if any.
    pub fn field_id(&self) -> Option<&str> {
        match self {
            Error::Validation(e) => Some(&e.field_id),
            Error::Schema(errors) => errors.iter().find_map(|e| e.field_id.as_deref()),
            _ => None,
        }
    }
}

impl From<Vec<SchemaError>> for Error {
    fn from(errors: Vec<SchemaError>) -> Self {
        Error::Schema(errors)
    }
}

fn join(errors: &[SchemaError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
