//! Parameter builder: per-operation validation and coercion.

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Number, Value};

use super::effective;
use super::merge::CanonicalValues;
use crate::error::{Error, Result, ValidationError};
use crate::schema::{ParamRule, Rule};

/// The validated parameter object handed to the execution collaborator.
///
/// Serializes flat as `{ "operation": ..., <params in key order> }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedParameters {
    operation: String,
    #[serde(flatten)]
    params: BTreeMap<String, Value>,
}

impl ResolvedParameters {
    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn get(&self, param: &str) -> Option<&Value> {
        self.params.get(param)
    }

    pub fn params(&self) -> &BTreeMap<String, Value> {
        &self.params
    }

    pub fn to_value(&self) -> Value {
        let mut object = serde_json::Map::new();
        object.insert("operation".into(), Value::String(self.operation.clone()));
        for (key, value) in &self.params {
            object.insert(key.clone(), value.clone());
        }
        Value::Object(object)
    }

    /// Convert into a typed per-operation record, usually an enum tagged by
    /// `operation`.
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T> {
        serde_json::from_value(self.to_value()).map_err(|source| Error::Convert {
            operation: self.operation,
            source,
        })
    }
}

/// Apply `rules` to the canonical values for `operation`.
///
/// Required checks run first over every rule, so a missing mandatory field is
/// reported before any coercion is attempted. The remaining rules then run in
/// declaration order. Only parameters named by a rule reach the output.
pub fn build_parameters(
    canonical: &CanonicalValues,
    operation: &str,
    rules: &[&ParamRule],
) -> std::result::Result<ResolvedParameters, ValidationError> {
    for rule in rules {
        if rule.rule == Rule::RequiredNonEmpty && lookup(canonical, &rule.param).is_none() {
            return Err(ValidationError::required(&rule.param));
        }
    }

    let mut params = BTreeMap::new();
    for rule in rules {
        if let Some(value) = lookup(canonical, &rule.param) {
            params.insert(rule.param.clone(), value);
        }
    }

    for rule in rules {
        let param = rule.param.as_str();
        match &rule.rule {
            Rule::RequiredNonEmpty | Rule::PassThrough => {}
            Rule::NumericCoerce => {
                if let Some(value) = params.get(param) {
                    let number = coerce_number(param, value)?;
                    params.insert(param.to_string(), Value::Number(number));
                }
            }
            Rule::NumericClamp { min, max } => {
                if let Some(value) = params.get(param) {
                    let number = coerce_number(param, value)?;
                    params.insert(param.to_string(), clamp(&number, *min, *max));
                }
            }
            Rule::Default { value } => {
                if !params.contains_key(param) {
                    params.insert(param.to_string(), value.clone());
                }
            }
        }
    }

    // The operation id is carried on its own.
    params.remove("operation");

    Ok(ResolvedParameters {
        operation: operation.to_string(),
        params,
    })
}

fn lookup(canonical: &CanonicalValues, param: &str) -> Option<Value> {
    canonical.get(param).and_then(effective)
}

fn coerce_number(param: &str, value: &Value) -> std::result::Result<Number, ValidationError> {
    match value {
        Value::Number(n) => Ok(n.clone()),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(i) = s.parse::<i64>() {
                return Ok(Number::from(i));
            }
            s.parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .ok_or_else(|| ValidationError::not_a_number(param))
        }
        _ => Err(ValidationError::not_a_number(param)),
    }
}

/// Clamp into `[min, max]`. Integer inputs stay integers when the clamped
/// value is integral.
fn clamp(number: &Number, min: f64, max: f64) -> Value {
    let clamped = number.as_f64().unwrap_or(min).clamp(min, max);
    let was_integer = number.is_i64() || number.is_u64();
    if was_integer && clamped.fract() == 0.0 {
        return Value::from(clamped as i64);
    }
    Number::from_f64(clamped)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}
