//! # Prompt Schema
//!
//! A structured description of the loop's text protocol that is rendered into
//! the system turn seeding every run. The reasoning actor learns the tool
//! catalog and the expected response grammar from this one turn, so the
//! renderer pulls tool names, signatures and descriptions straight from the
//! registry the agent was constructed with.

use crate::action::{ACTION_INPUT_MARKER, ACTION_MARKER, FINAL_ANSWER_MARKER, THOUGHT_MARKER};
use crate::registry::ToolRegistry;
use crate::tool::Tool;
use serde::Serialize;

/// Complete prompt schema - everything the actor needs to drive the loop
#[derive(Debug, Clone, Serialize)]
pub struct PromptSchema {
    /// Schema version
    pub version: &'static str,
    /// Brief description of the agent's role
    pub description: &'static str,
    /// Best practices for producing well-formed turns
    pub guidelines: Vec<Guideline>,
}

impl Default for PromptSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptSchema {
    pub fn new() -> Self {
        Self {
            version: "0.1.0",
            description: "You are an agent that solves tasks by reasoning step by step \
                          and invoking tools. Each of your turns either invokes exactly \
                          one tool or delivers the final answer.",
            guidelines: Self::define_guidelines(),
        }
    }

    /// Render the system turn for a task against a tool registry
    pub fn render(&self, task: &str, registry: &ToolRegistry) -> String {
        let mut out = String::new();

        out.push_str(self.description);
        out.push_str("\n\n");

        out.push_str("## Available Tools\n\n");
        if registry.is_empty() {
            out.push_str("(no tools registered)\n");
        }
        for (i, tool) in registry.iter().enumerate() {
            out.push_str(&format!(
                "{}. **{}** {}",
                i + 1,
                tool.name(),
                tool.schema().signature()
            ));
            if !tool.description().is_empty() {
                out.push_str(&format!(" - {}", tool.description()));
            }
            out.push('\n');
        }
        out.push('\n');

        out.push_str(&format!("## Your Task\n\n{}\n\n", task));

        out.push_str("## Response Format\n\n");
        out.push_str("Use the following format:\n");
        out.push_str(&format!("{} [Your reasoning about what to do next]\n", THOUGHT_MARKER));
        out.push_str(&format!("{} [Tool name]\n", ACTION_MARKER));
        out.push_str(&format!("{} {{\"param\": \"value\"}}\n\n", ACTION_INPUT_MARKER));
        out.push_str("OR when you have enough information:\n");
        out.push_str(&format!("{} [Your complete answer]\n\n", FINAL_ANSWER_MARKER));

        out.push_str("## Guidelines\n\n");
        for g in &self.guidelines {
            out.push_str(&format!("### {}\n{}\n\n", g.title, g.content));
        }

        out
    }

    fn define_guidelines() -> Vec<Guideline> {
        vec![
            Guideline {
                title: "One Action Per Turn",
                content: "Invoke at most one tool per turn and wait for its observation \
                          before deciding the next step. Only the first action directive \
                          in a turn is executed.",
            },
            Guideline {
                title: "Valid Action Input",
                content: "The action input must be a single JSON object whose fields match \
                          the tool signature exactly. Malformed input wastes a turn.",
            },
            Guideline {
                title: "Finish Decisively",
                content: "Deliver the final answer as soon as the gathered observations \
                          support it. The run is bounded by an iteration budget.",
            },
        ]
    }
}

/// A guideline included in the rendered system turn
#[derive(Debug, Clone, Serialize)]
pub struct Guideline {
    pub title: &'static str,
    pub content: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::builtin_registry;

    #[test]
    fn test_render_contains_grammar_markers() {
        let schema = PromptSchema::new();
        let prompt = schema.render("Plot a course", &ToolRegistry::new());

        assert!(prompt.contains("Thought:"));
        assert!(prompt.contains("Action:"));
        assert!(prompt.contains("Action Input:"));
        assert!(prompt.contains("Final Answer:"));
        assert!(prompt.contains("Plot a course"));
    }

    #[test]
    fn test_render_lists_registered_tools() {
        let schema = PromptSchema::new();
        let registry = builtin_registry().unwrap();
        let prompt = schema.render("Survey the sector grid", &registry);

        assert!(prompt.contains("scan_sector_hazards"));
        assert!(prompt.contains("calculate_escape_velocity"));
        assert!(prompt.contains("\"x\": integer"));
    }

    #[test]
    fn test_render_empty_registry() {
        let schema = PromptSchema::new();
        let prompt = schema.render("anything", &ToolRegistry::new());
        assert!(prompt.contains("(no tools registered)"));
    }
}
