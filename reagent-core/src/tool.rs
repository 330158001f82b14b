//! # Tool Contract
//!
//! External capabilities the reasoning actor can invoke. Each tool declares a
//! typed parameter schema that the executor validates *before* invocation, so
//! a mismatched call is reported as a structured error instead of surfacing
//! as an argument-binding failure inside the tool.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The JSON type a parameter must carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    String,
    Number,
    Integer,
    Bool,
    Object,
    Array,
    /// Any JSON value, including null
    Any,
}

impl ParamKind {
    /// Stable name used in schemas, prompts and error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Number => "number",
            ParamKind::Integer => "integer",
            ParamKind::Bool => "bool",
            ParamKind::Object => "object",
            ParamKind::Array => "array",
            ParamKind::Any => "any",
        }
    }

    /// Check a JSON value against this kind
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ParamKind::String => value.is_string(),
            ParamKind::Number => value.is_number(),
            ParamKind::Integer => value.is_i64() || value.is_u64(),
            ParamKind::Bool => value.is_boolean(),
            ParamKind::Object => value.is_object(),
            ParamKind::Array => value.is_array(),
            ParamKind::Any => true,
        }
    }
}

impl std::fmt::Display for ParamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One declared parameter of a tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamKind,
    pub required: bool,
    pub description: String,
}

impl ParamSpec {
    /// Declare a required parameter
    pub fn required(name: impl Into<String>, kind: ParamKind, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
            description: description.into(),
        }
    }

    /// Declare an optional parameter
    pub fn optional(name: impl Into<String>, kind: ParamKind, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            description: description.into(),
        }
    }
}

/// The declared parameters of a tool.
///
/// Validation is strict: required fields must be present, every field must
/// match its declared kind, and undeclared fields are rejected so actor
/// typos become visible instead of being silently dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSchema {
    params: Vec<ParamSpec>,
}

impl ParamSchema {
    /// An empty schema (tool takes no parameters)
    pub fn new() -> Self {
        Self::default()
    }

    /// Chainable: add a parameter declaration
    pub fn with(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    /// Declared parameters, in declaration order
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Validate a parameter object against this schema
    pub fn validate(&self, params: &Map<String, Value>) -> Result<()> {
        for spec in &self.params {
            match params.get(&spec.name) {
                Some(value) => {
                    if !spec.kind.matches(value) {
                        return Err(Error::invalid_params(format!(
                            "parameter '{}' must be {}, got {}",
                            spec.name,
                            spec.kind,
                            json_kind(value)
                        ))
                        .with_operation("schema::validate")
                        .with_context("param", spec.name.clone()));
                    }
                }
                None if spec.required => {
                    return Err(Error::invalid_params(format!(
                        "missing required parameter '{}'",
                        spec.name
                    ))
                    .with_operation("schema::validate")
                    .with_context("param", spec.name.clone()));
                }
                None => {}
            }
        }

        for key in params.keys() {
            if !self.params.iter().any(|spec| spec.name == *key) {
                return Err(Error::invalid_params(format!("unknown parameter '{}'", key))
                    .with_operation("schema::validate")
                    .with_context("param", key.clone()));
            }
        }

        Ok(())
    }

    /// Render a compact one-line signature, e.g. `{"x": integer, "y": integer}`
    pub fn signature(&self) -> String {
        let fields: Vec<String> = self
            .params
            .iter()
            .map(|spec| {
                if spec.required {
                    format!("\"{}\": {}", spec.name, spec.kind)
                } else {
                    format!("\"{}\"?: {}", spec.name, spec.kind)
                }
            })
            .collect();
        format!("{{{}}}", fields.join(", "))
    }
}

/// Trait defining an external capability the loop can dispatch to.
///
/// Tools are registered once at session start and treated as read-only
/// afterwards, so `Send + Sync` lets concurrent independent runs share one
/// registry. Invocation is synchronous; the loop's suspension point is the
/// reasoning-actor call, not the tool.
pub trait Tool: Send + Sync {
    /// Unique registry key for this tool
    fn name(&self) -> &str;

    /// Human-readable description, used in prompts and listings
    fn description(&self) -> &str {
        ""
    }

    /// Declared parameter schema, validated before every invocation
    fn schema(&self) -> ParamSchema;

    /// Execute with an already-validated parameter object.
    ///
    /// Domain failures are returned as errors; the executor converts them
    /// into observations rather than letting them escape the loop.
    fn invoke(&self, params: &Map<String, Value>) -> Result<Value>;
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn grid_schema() -> ParamSchema {
        ParamSchema::new()
            .with(ParamSpec::required("x", ParamKind::Integer, "grid column"))
            .with(ParamSpec::required("y", ParamKind::Integer, "grid row"))
    }

    fn obj(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_valid_params() {
        let schema = grid_schema();
        assert!(schema.validate(&obj(json!({"x": 0, "y": 1}))).is_ok());
    }

    #[test]
    fn test_missing_required_param() {
        let schema = grid_schema();
        let err = schema.validate(&obj(json!({"x": 0}))).unwrap_err();
        assert_eq!(err.kind(), reagent_error::ErrorKind::InvalidParams);
        assert!(err.message().contains("'y'"));
    }

    #[test]
    fn test_type_mismatch() {
        let schema = grid_schema();
        let err = schema.validate(&obj(json!({"x": "zero", "y": 1}))).unwrap_err();
        assert_eq!(err.kind(), reagent_error::ErrorKind::InvalidParams);
        assert!(err.message().contains("integer"));
    }

    #[test]
    fn test_unknown_param_rejected() {
        let schema = grid_schema();
        let err = schema
            .validate(&obj(json!({"x": 0, "y": 1, "z": 2})))
            .unwrap_err();
        assert_eq!(err.kind(), reagent_error::ErrorKind::InvalidParams);
        assert!(err.message().contains("'z'"));
    }

    #[test]
    fn test_optional_param() {
        let schema = ParamSchema::new()
            .with(ParamSpec::required("query", ParamKind::String, "search text"))
            .with(ParamSpec::optional("limit", ParamKind::Integer, "max results"));

        assert!(schema.validate(&obj(json!({"query": "ion storm"}))).is_ok());
        assert!(schema
            .validate(&obj(json!({"query": "ion storm", "limit": 5})))
            .is_ok());
    }

    #[test]
    fn test_integer_rejects_float() {
        let schema = grid_schema();
        let err = schema.validate(&obj(json!({"x": 0.5, "y": 1}))).unwrap_err();
        assert_eq!(err.kind(), reagent_error::ErrorKind::InvalidParams);
    }

    #[test]
    fn test_signature_rendering() {
        let schema = ParamSchema::new()
            .with(ParamSpec::required("mass", ParamKind::Number, "mass in kg"))
            .with(ParamSpec::optional("unit", ParamKind::String, "output unit"));
        assert_eq!(schema.signature(), "{\"mass\": number, \"unit\"?: string}");
    }
}
