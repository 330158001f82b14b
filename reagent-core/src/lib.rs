//! # Reagent Core
//!
//! The runtime pieces of a reason/act agent loop.
//!
//! ## Core Concepts
//! - **Transcript**: the ordered record of turns in one run
//! - **Action grammar**: `Thought: / Action: / Action Input: / Final Answer:`
//!   parsed out of free-form model text
//! - **Tools**: named contracts with typed parameter schemas
//! - **Registry**: explicit name-to-contract lookup, shared read-only
//! - **Executor**: validates and dispatches actions, reports observations
//! - **Actor**: trait-based source of next-turn text (provider or scripted)

pub mod action;
pub mod actor;
pub mod error;
pub mod executor;
pub mod provider;
pub mod registry;
pub mod schema;
pub mod tool;
pub mod tools;
pub mod transcript;

pub use action::{
    parse_action, extract_final_answer, ActionOutcome, ParsedAction, ACTION_INPUT_MARKER,
    ACTION_MARKER, FINAL_ANSWER_MARKER, THOUGHT_MARKER,
};
pub use actor::{ProviderActor, ReasoningActor, ScriptedActor};
pub use error::{Error, ErrorKind, ErrorStatus, Result};
pub use executor::{execute, Observation, ObservationKind};
pub use provider::{
    AnthropicProvider, ChatMessage, CompletionRequest, CompletionResponse, FinishReason,
    LlmProvider, OpenAIProvider, ProviderConfig, ProviderError, ProviderType, Usage,
    UsageTracker,
};
pub use registry::ToolRegistry;
pub use schema::{Guideline, PromptSchema};
pub use tool::{ParamKind, ParamSchema, ParamSpec, Tool};
pub use tools::{builtin_registry, EscapeVelocity, SectorScan};
pub use transcript::{Role, Transcript, Turn};
