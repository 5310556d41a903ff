//! Parameter constraint sets and their discovery schemas.
//!
//! A tool's parameters are declared once, as a `serde` + `schemars` struct.
//! [`input_schema_for`] turns that declaration into the JSON schema advertised
//! by `tools/list`. [`ConstraintSet::from_schema`] reads the same schema back
//! into the rules the dispatcher enforces, so what clients are told and what
//! the server accepts cannot drift apart.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use rmcp::model::JsonObject;
use schemars::{JsonSchema, generate::SchemaSettings};
use serde_json::Value;

use super::error::{FieldViolation, ValidationError};

/// Generate the discovery schema for a parameter struct.
///
/// Subschemas are inlined so each property is self-contained, and the
/// top-level `$schema` marker is dropped.
pub fn input_schema_for<T: JsonSchema>() -> JsonObject {
    let generator = SchemaSettings::draft07()
        .with(|s| s.inline_subschemas = true)
        .into_generator();
    let schema = generator.into_root_schema_for::<T>();

    let mut object = schema.as_object().cloned().unwrap_or_default();
    object.remove("$schema");
    object
}

/// JSON value categories a field may accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValueKind {
    String,
    Integer,
    Number,
    Boolean,
    Null,
    Array,
    Object,
}

impl ValueKind {
    fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "string" => Self::String,
            "integer" => Self::Integer,
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "null" => Self::Null,
            "array" => Self::Array,
            "object" => Self::Object,
            _ => return None,
        })
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Null => value.is_null(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
        }
    }

    fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(n) if n.is_f64() => Self::Number,
            Value::Number(_) => Self::Integer,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::Array => "array",
            Self::Object => "object",
        })
    }
}

/// Rules for one field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldConstraint {
    /// Accepted kinds; empty accepts anything.
    pub kinds: BTreeSet<ValueKind>,
    /// Inclusive lower bound for numbers.
    pub minimum: Option<f64>,
    /// Inclusive upper bound for numbers.
    pub maximum: Option<f64>,
    /// Closed set of accepted values.
    pub allowed: Option<Vec<Value>>,
    /// Value filled in when the field is omitted.
    pub default: Option<Value>,
    pub description: Option<String>,
}

impl FieldConstraint {
    /// Read a property schema, merging `anyOf`/`oneOf` branches.
    pub fn from_schema(schema: &Value) -> Self {
        let mut constraint = Self::default();
        constraint.absorb(schema);
        constraint.default = schema.get("default").cloned();
        constraint.description = schema
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string);
        constraint
    }

    fn absorb(&mut self, schema: &Value) {
        match schema.get("type") {
            Some(Value::String(name)) => self.kinds.extend(ValueKind::parse(name)),
            Some(Value::Array(names)) => self.kinds.extend(
                names
                    .iter()
                    .filter_map(Value::as_str)
                    .filter_map(ValueKind::parse),
            ),
            _ => {}
        }

        if let Some(min) = schema.get("minimum").and_then(Value::as_f64) {
            self.minimum = Some(self.minimum.map_or(min, |m| m.min(min)));
        }
        if let Some(max) = schema.get("maximum").and_then(Value::as_f64) {
            self.maximum = Some(self.maximum.map_or(max, |m| m.max(max)));
        }

        if let Some(Value::Array(values)) = schema.get("enum") {
            self.allowed.get_or_insert_with(Vec::new).extend(values.iter().cloned());
        }
        if let Some(value) = schema.get("const") {
            self.allowed.get_or_insert_with(Vec::new).push(value.clone());
        }

        for key in ["anyOf", "oneOf"] {
            if let Some(Value::Array(branches)) = schema.get(key) {
                for branch in branches {
                    self.absorb(branch);
                }
            }
        }
    }

    /// Check a supplied value against this field's rules.
    pub fn check(&self, value: &Value) -> Result<(), String> {
        if !self.kinds.is_empty() && !self.kinds.iter().any(|k| k.matches(value)) {
            let expected = self
                .kinds
                .iter()
                .map(ValueKind::to_string)
                .collect::<Vec<_>>()
                .join(" or ");
            return Err(format!("expected {expected}, got {}", ValueKind::of(value)));
        }

        if value.is_null() {
            return Ok(());
        }

        if let Some(number) = value.as_f64() {
            if let Some(min) = self.minimum.filter(|min| number < *min) {
                return Err(format!("must be >= {min}"));
            }
            if let Some(max) = self.maximum.filter(|max| number > *max) {
                return Err(format!("must be <= {max}"));
            }
        }

        if let Some(allowed) = &self.allowed
            && !allowed.contains(value)
        {
            let options = allowed
                .iter()
                .filter(|v| !v.is_null())
                .map(|v| v.as_str().map_or_else(|| v.to_string(), str::to_string))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(format!("must be one of: {options}"));
        }

        Ok(())
    }
}

/// Every rule declared for a tool's arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintSet {
    pub fields: BTreeMap<String, FieldConstraint>,
    pub required: BTreeSet<String>,
    /// Reject fields not listed in `fields`.
    pub deny_unknown: bool,
}

impl ConstraintSet {
    /// Reconstruct the constraint set from a discovery schema.
    pub fn from_schema(schema: &JsonObject) -> Self {
        let fields = schema
            .get("properties")
            .and_then(Value::as_object)
            .map(|props| {
                props
                    .iter()
                    .map(|(name, prop)| (name.clone(), FieldConstraint::from_schema(prop)))
                    .collect()
            })
            .unwrap_or_default();

        let required = schema
            .get("required")
            .and_then(Value::as_array)
            .map(|names| {
                names
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let deny_unknown = matches!(schema.get("additionalProperties"), Some(Value::Bool(false)));

        Self {
            fields,
            required,
            deny_unknown,
        }
    }

    /// Validate `arguments` and fill in defaults for omitted fields.
    ///
    /// Every violation found is reported, not only the first.
    pub fn validate(&self, mut arguments: JsonObject) -> Result<JsonObject, ValidationError> {
        let mut violations = Vec::new();

        for (name, value) in &arguments {
            match self.fields.get(name) {
                Some(constraint) => {
                    if let Err(message) = constraint.check(value) {
                        violations.push(FieldViolation::new(name, message));
                    }
                }
                None if self.deny_unknown => {
                    violations.push(FieldViolation::new(name, "unknown field"));
                }
                None => {}
            }
        }

        for name in &self.required {
            if !arguments.contains_key(name) {
                violations.push(FieldViolation::new(name, "required field is missing"));
            }
        }

        if !violations.is_empty() {
            return Err(ValidationError::new(violations));
        }

        for (name, constraint) in &self.fields {
            if let Some(default) = &constraint.default
                && !arguments.contains_key(name)
            {
                arguments.insert(name.clone(), default.clone());
            }
        }

        Ok(arguments)
    }
}
