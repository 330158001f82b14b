//! # Tool Registry
//!
//! Name-to-contract lookup for tool dispatch. A registry is an explicitly
//! constructed value passed into each agent, never a process-wide singleton:
//! registration happens once at session start, after which the read path is
//! pure and safe to share across concurrent runs.

use crate::error::{Error, Result};
use crate::tool::Tool;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Registered tool contracts, keyed by unique name.
///
/// Backed by a `BTreeMap` so listings are deterministic, which keeps
/// "unknown tool" observations and rendered prompts stable.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its declared name.
    ///
    /// Re-registering a taken name is a `ToolConflict`; silent overwrite is
    /// forbidden by design.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<()> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(Error::tool_conflict(name).with_operation("registry::register"));
        }
        self.tools.insert(name, tool);
        Ok(())
    }

    /// Look up a tool by name. Pure read path.
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// All registered names, sorted
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// Iterate over registered tools in name order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Tool>> {
        self.tools.values()
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check whether no tools are registered
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tool_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::{ParamKind, ParamSchema, ParamSpec};
    use serde_json::{Map, Value};

    struct EchoTool;

    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the input text back"
        }

        fn schema(&self) -> ParamSchema {
            ParamSchema::new().with(ParamSpec::required("text", ParamKind::String, "text to echo"))
        }

        fn invoke(&self, params: &Map<String, Value>) -> reagent_error::Result<Value> {
            Ok(serde_json::json!({ "echo": params["text"] }))
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool)).unwrap();

        let tool = registry.lookup("echo").expect("echo registered");
        assert_eq!(tool.name(), "echo");
        assert!(registry.lookup("warp_drive").is_none());
    }

    #[test]
    fn test_duplicate_registration_is_conflict() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool)).unwrap();

        let err = registry.register(Arc::new(EchoTool)).unwrap_err();
        assert_eq!(err.kind(), reagent_error::ErrorKind::ToolConflict);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_lookup_returns_registered_contract() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool)).unwrap();

        // The looked-up contract advertises exactly the registered schema.
        let tool = registry.lookup("echo").unwrap();
        assert_eq!(tool.schema(), EchoTool.schema());
    }

    #[test]
    fn test_tool_names_sorted() {
        struct Named(&'static str);
        impl Tool for Named {
            fn name(&self) -> &str {
                self.0
            }
            fn schema(&self) -> ParamSchema {
                ParamSchema::new()
            }
            fn invoke(&self, _: &Map<String, Value>) -> reagent_error::Result<Value> {
                Ok(Value::Null)
            }
        }

        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(Named("zeta"))).unwrap();
        registry.register(Arc::new(Named("alpha"))).unwrap();
        registry.register(Arc::new(Named("mid"))).unwrap();

        assert_eq!(registry.tool_names(), vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_empty_registry() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.tool_names().is_empty());
    }
}
