//! Declarative block definition types.
//!
//! These types are the serde target for block definition JSON authored by
//! integration developers. They carry no logic beyond small accessors; the
//! `validate` and `resolve` phases interpret them.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Raw user-entered values keyed by field id, as produced by the form UI.
pub type RawValues = BTreeMap<String, Value>;

pub const DEFAULT_OPERATION_FIELD: &str = "operation";

// =============================================================================
// BLOCK
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockDefinition {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Field whose value selects the operation.
    #[serde(default = "default_operation_field")]
    pub operation_field: String,
    pub fields: Vec<FieldSpec>,
    pub operations: OperationMap,
    #[serde(default)]
    pub rules: RuleSet,
}

fn default_operation_field() -> String {
    DEFAULT_OPERATION_FIELD.to_string()
}

impl BlockDefinition {
    pub fn field(&self, id: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn operation_spec(&self) -> Option<&FieldSpec> {
        self.field(&self.operation_field)
    }
}

// =============================================================================
// FIELDS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    ShortText,
    LongText,
    Dropdown,
    Switch,
    Slider,
    Secret,
    StructuredConfig,
}

/// The kind of value a widget produces. Fields sharing a `canonicalId`
/// must agree on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueClass {
    Text,
    Boolean,
    Number,
    Structured,
}

impl FieldKind {
    pub fn value_class(self) -> ValueClass {
        match self {
            FieldKind::ShortText | FieldKind::LongText | FieldKind::Dropdown | FieldKind::Secret => {
                ValueClass::Text
            }
            FieldKind::Switch => ValueClass::Boolean,
            FieldKind::Slider => ValueClass::Number,
            FieldKind::StructuredConfig => ValueClass::Structured,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    pub label: String,
    pub value: String,
}

impl FieldOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        FieldOption {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValue>,
    #[serde(default)]
    pub required: Requirement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl FieldSpec {
    pub fn new(id: impl Into<String>, kind: FieldKind) -> Self {
        FieldSpec {
            id: id.into(),
            title: None,
            kind,
            options: Vec::new(),
            default_value: None,
            required: Requirement::default(),
            condition: None,
            canonical_id: None,
            placeholder: None,
        }
    }

    pub fn with_options(mut self, options: Vec<FieldOption>) -> Self {
        self.options = options;
        self
    }

    pub fn with_default(mut self, value: impl Into<DefaultValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn with_canonical_id(mut self, canonical_id: impl Into<String>) -> Self {
        self.canonical_id = Some(canonical_id.into());
        self
    }

    pub fn with_required(mut self, required: Requirement) -> Self {
        self.required = required;
        self
    }

    /// The canonical parameter this field feeds: its `canonicalId`, or its own id.
    pub fn canonical_key(&self) -> &str {
        self.canonical_id.as_deref().unwrap_or(&self.id)
    }

    pub fn default_value(&self) -> Option<Value> {
        self.default_value.as_ref().map(DefaultValue::produce)
    }

    /// The condition deciding when a conditional `required` applies.
    pub fn required_condition(&self) -> Option<&Condition> {
        match &self.required {
            Requirement::When(condition) => Some(condition),
            Requirement::Always(_) => None,
        }
    }
}

/// A field default: a fixed literal, or a producer evaluated on each use.
#[derive(Debug, Clone)]
pub enum DefaultValue {
    Literal(Value),
    Producer(fn() -> Value),
}

impl DefaultValue {
    pub fn produce(&self) -> Value {
        match self {
            DefaultValue::Literal(v) => v.clone(),
            DefaultValue::Producer(f) => f(),
        }
    }
}

impl From<Value> for DefaultValue {
    fn from(value: Value) -> Self {
        DefaultValue::Literal(value)
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        DefaultValue::Literal(Value::String(value.to_string()))
    }
}

impl From<fn() -> Value> for DefaultValue {
    fn from(f: fn() -> Value) -> Self {
        DefaultValue::Producer(f)
    }
}

impl Serialize for DefaultValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.produce().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DefaultValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(DefaultValue::Literal)
    }
}

/// `required: true`, or `required: { field, value }` to require a field only
/// for some values of another field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Requirement {
    Always(bool),
    When(Condition),
}

impl Default for Requirement {
    fn default() -> Self {
        Requirement::Always(false)
    }
}

// =============================================================================
// CONDITIONS
// =============================================================================

/// Active iff the value of `field` is one of `values` (negated by `not`),
/// and the optional `and` clause also holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    #[serde(rename = "value", deserialize_with = "one_or_many")]
    pub values: Vec<Value>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub not: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub and: Option<Box<Condition>>,
}

impl Condition {
    pub fn new<V: Into<Value>>(field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Condition {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
            not: false,
            and: None,
        }
    }

    pub fn negated(mut self) -> Self {
        self.not = !self.not;
        self
    }

    pub fn and(mut self, other: Condition) -> Self {
        self.and = Some(Box::new(other));
        self
    }

    /// Every field id this condition reads.
    pub fn referenced_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.field.as_str()];
        if let Some(and) = &self.and {
            fields.extend(and.referenced_fields());
        }
        fields
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Value>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<Value>),
        One(Value),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(values) => values,
        OneOrMany::One(value) => vec![value],
    })
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Lookup table from operation field value to backend-operation identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationMap {
    /// Key of the entry used when the operation value is missing or unknown.
    pub default: String,
    pub entries: BTreeMap<String, String>,
}

impl OperationMap {
    pub fn new(default: impl Into<String>, entries: impl IntoIterator<Item = (String, String)>) -> Self {
        OperationMap {
            default: default.into(),
            entries: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Backend id of the default entry. Falls back to the default key itself
    /// for maps that never went through schema validation.
    pub fn default_operation(&self) -> &str {
        self.get(&self.default).unwrap_or(&self.default)
    }

    pub fn backend_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(String::as_str)
    }
}

// =============================================================================
// PARAMETER RULES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamRule {
    pub param: String,
    #[serde(flatten)]
    pub rule: Rule,
}

impl ParamRule {
    pub fn new(param: impl Into<String>, rule: Rule) -> Self {
        ParamRule {
            param: param.into(),
            rule,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule")]
pub enum Rule {
    #[serde(rename = "required")]
    RequiredNonEmpty,
    #[serde(rename = "numeric")]
    NumericCoerce,
    #[serde(rename = "clamp")]
    NumericClamp { min: f64, max: f64 },
    #[serde(rename = "passThrough")]
    PassThrough,
    #[serde(rename = "default")]
    Default { value: Value },
}

/// Rules shared by every operation plus per-operation rules, keyed by
/// backend-operation identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub common: Vec<ParamRule>,
    #[serde(default)]
    pub operations: BTreeMap<String, Vec<ParamRule>>,
}

impl RuleSet {
    /// Common rules first, then the operation's own, in declaration order.
    pub fn for_operation(&self, operation: &str) -> Vec<&ParamRule> {
        self.common
            .iter()
            .chain(self.operations.get(operation).into_iter().flatten())
            .collect()
    }
}
