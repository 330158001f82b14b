//! # Action Grammar
//!
//! The text protocol between the reasoning actor and the loop. A turn may
//! carry an action directive:
//!
//! ```text
//! Thought: I should scan the next sector.
//! Action: scan_sector_hazards
//! Action Input: {"x": 1, "y": 0}
//! ```
//!
//! or a terminal answer:
//!
//! ```text
//! Final Answer: Route plotted.
//! ```
//!
//! Only the **first** directive in a turn is honored; later ones are ignored
//! so the contract stays deterministic when a model emits several candidates.
//! The input literal spans to the first syntactically balanced close brace,
//! which survives nested objects and braces inside string values.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Marker introducing a tool invocation
pub const ACTION_MARKER: &str = "Action:";

/// Marker introducing the JSON parameter block of an action
pub const ACTION_INPUT_MARKER: &str = "Action Input:";

/// Marker introducing the terminal answer
pub const FINAL_ANSWER_MARKER: &str = "Final Answer:";

/// Marker introducing free-form reasoning (ignored by the parser)
pub const THOUGHT_MARKER: &str = "Thought:";

/// A fully parsed action directive, ready for dispatch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedAction {
    /// Registry key of the requested tool
    pub tool_name: String,
    /// JSON object of named parameters
    pub parameters: serde_json::Map<String, serde_json::Value>,
}

/// Outcome of scanning a turn for an action directive.
///
/// `NoAction` is a valid result, not an error: the turn carried pure
/// reasoning (or a final answer) and simply burns an iteration.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Action(ParsedAction),
    NoAction,
}

/// Scan a turn for the first action directive.
///
/// Returns `Ok(NoAction)` when no `Action:` marker is present. Returns a
/// `ParseFailed` error when a marker is present but the directive is
/// malformed: missing tool name, missing input block, unbalanced braces,
/// invalid JSON, or a literal that is not a JSON object. A malformed
/// directive never yields a partially populated [`ParsedAction`].
pub fn parse_action(text: &str) -> Result<ActionOutcome> {
    let Some(marker_at) = text.find(ACTION_MARKER) else {
        return Ok(ActionOutcome::NoAction);
    };

    let after_marker = &text[marker_at + ACTION_MARKER.len()..];
    let name_start = after_marker.trim_start();
    let name_len = name_start
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_alphanumeric() || *c == '_')
        .count();

    if name_len == 0 {
        return Err(Error::parse_failed("action directive has no tool name")
            .with_operation("action::parse_action"));
    }
    let tool_name = &name_start[..name_len];

    let after_name = &name_start[name_len..];
    let Some(input_at) = after_name.find(ACTION_INPUT_MARKER) else {
        return Err(Error::parse_failed("action directive has no input block")
            .with_operation("action::parse_action")
            .with_context("tool", tool_name));
    };

    let input_tail = after_name[input_at + ACTION_INPUT_MARKER.len()..].trim_start();
    let literal = balanced_object(input_tail).ok_or_else(|| {
        Error::parse_failed("action input is not a balanced JSON object")
            .with_operation("action::parse_action")
            .with_context("tool", tool_name)
    })?;

    let value: serde_json::Value = serde_json::from_str(literal).map_err(|e| {
        Error::parse_failed(format!("action input is not valid JSON: {}", e))
            .with_operation("action::parse_action")
            .with_context("tool", tool_name)
            .set_source(e)
    })?;

    match value {
        serde_json::Value::Object(parameters) => Ok(ActionOutcome::Action(ParsedAction {
            tool_name: tool_name.to_string(),
            parameters,
        })),
        other => Err(Error::parse_failed(format!(
            "action input must be a JSON object, got {}",
            json_type_name(&other)
        ))
        .with_operation("action::parse_action")
        .with_context("tool", tool_name)),
    }
}

/// Extract the terminal answer from a turn, if present.
///
/// Everything after the first `Final Answer:` marker, trimmed. The loop
/// checks this *before* action parsing, so a turn carrying both markers is
/// treated as a final answer.
pub fn extract_final_answer(text: &str) -> Option<String> {
    text.find(FINAL_ANSWER_MARKER)
        .map(|at| text[at + FINAL_ANSWER_MARKER.len()..].trim().to_string())
}

/// Take the prefix of `s` that forms one balanced JSON object literal.
///
/// `s` must start with `{` (after leading trim by the caller). Tracks string
/// literals and escape sequences so braces inside values do not end the scan.
fn balanced_object(s: &str) -> Option<&str> {
    let mut chars = s.char_indices();
    match chars.next() {
        Some((_, '{')) => {}
        _ => return None,
    }

    let mut depth = 1usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in chars {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[..i + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
