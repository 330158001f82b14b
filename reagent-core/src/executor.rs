//! # Tool Executor
//!
//! Dispatches a parsed action against the registry and reports the outcome as
//! an [`Observation`]. Every failure mode on this path - unknown tool, bad
//! parameters, domain error inside the tool - is converted into observation
//! text and fed back to the reasoning actor so it can self-correct. Nothing
//! here escalates to a process-level failure, and nothing is retried: each
//! parsed action is invoked exactly once.

use crate::action::ParsedAction;
use crate::registry::ToolRegistry;
use crate::tool::Tool;
use serde::{Deserialize, Serialize};

/// What kind of outcome an observation reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservationKind {
    /// The tool ran and returned a result
    ToolResult,
    /// The requested tool is not in the registry
    UnknownTool,
    /// Parameter validation or the tool itself failed
    ToolError,
}

/// Feedback appended to the transcript after dispatching an action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub kind: ObservationKind,
    pub text: String,
}

impl Observation {
    /// Successful tool result, pretty-printed for the actor
    pub fn tool_result(result: &serde_json::Value) -> Self {
        let rendered =
            serde_json::to_string_pretty(result).unwrap_or_else(|_| result.to_string());
        Self {
            kind: ObservationKind::ToolResult,
            text: format!("Observation: {}", rendered),
        }
    }

    /// The requested tool is not registered; lists what is
    pub fn unknown_tool(requested: &str, available: &[String]) -> Self {
        Self {
            kind: ObservationKind::UnknownTool,
            text: format!(
                "Error: Tool '{}' not found. Available tools: [{}]",
                requested,
                available.join(", ")
            ),
        }
    }

    /// Validation or invocation failure inside a known tool
    pub fn tool_error(tool_name: &str, error: &reagent_error::Error) -> Self {
        Self {
            kind: ObservationKind::ToolError,
            text: format!("Error executing {}: {}", tool_name, error.message()),
        }
    }

    /// Check if this observation reports a successful result
    pub fn is_result(&self) -> bool {
        self.kind == ObservationKind::ToolResult
    }
}

impl std::fmt::Display for Observation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Dispatch one parsed action against the registry.
///
/// Lookup, validate, invoke - in that order. Parameter validation happens
/// before the tool runs, so type mismatches are reported as structured
/// errors rather than surfacing inside the tool.
pub fn execute(action: &ParsedAction, registry: &ToolRegistry) -> Observation {
    let Some(tool) = registry.lookup(&action.tool_name) else {
        return Observation::unknown_tool(&action.tool_name, &registry.tool_names());
    };

    if let Err(err) = tool.schema().validate(&action.parameters) {
        return Observation::tool_error(&action.tool_name, &err);
    }

    match tool.invoke(&action.parameters) {
        Ok(result) => Observation::tool_result(&result),
        Err(err) => Observation::tool_error(&action.tool_name, &err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::{ParamKind, ParamSchema, ParamSpec, Tool};
    use reagent_error::Error;
    use serde_json::{json, Map, Value};
    use std::sync::Arc;

    struct Doubler;

    impl Tool for Doubler {
        fn name(&self) -> &str {
            "doubler"
        }

        fn schema(&self) -> ParamSchema {
            ParamSchema::new().with(ParamSpec::required("n", ParamKind::Number, "value to double"))
        }

        fn invoke(&self, params: &Map<String, Value>) -> reagent_error::Result<Value> {
            let n = params["n"].as_f64().unwrap_or_default();
            if n.is_sign_negative() {
                return Err(Error::tool_failed("doubler", "n must be non-negative"));
            }
            Ok(json!({ "doubled": n * 2.0, "status": "success" }))
        }
    }

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(Doubler)).unwrap();
        registry
    }

    fn action(tool_name: &str, params: Value) -> ParsedAction {
        let parameters = match params {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        };
        ParsedAction {
            tool_name: tool_name.to_string(),
            parameters,
        }
    }

    #[test]
    fn test_successful_dispatch() {
        let obs = execute(&action("doubler", json!({"n": 21})), &registry());
        assert_eq!(obs.kind, ObservationKind::ToolResult);
        assert!(obs.text.contains("\"doubled\": 42.0"));
        assert!(obs.text.contains("\"status\": \"success\""));
    }

    #[test]
    fn test_unknown_tool_lists_registry() {
        let obs = execute(&action("warp_drive", json!({})), &registry());
        assert_eq!(obs.kind, ObservationKind::UnknownTool);
        assert!(obs.text.contains("warp_drive"));
        assert!(obs.text.contains("doubler"));
    }

    #[test]
    fn test_invalid_params_become_tool_error() {
        let obs = execute(&action("doubler", json!({"n": "many"})), &registry());
        assert_eq!(obs.kind, ObservationKind::ToolError);
        assert!(obs.text.contains("doubler"));
        assert!(obs.text.contains("number"));
    }

    #[test]
    fn test_missing_param_becomes_tool_error() {
        let obs = execute(&action("doubler", json!({})), &registry());
        assert_eq!(obs.kind, ObservationKind::ToolError);
        assert!(obs.text.contains("'n'"));
    }

    #[test]
    fn test_domain_error_becomes_tool_error() {
        let obs = execute(&action("doubler", json!({"n": -1})), &registry());
        assert_eq!(obs.kind, ObservationKind::ToolError);
        assert!(obs.text.contains("non-negative"));
    }
}
