//! # Reagent Agent
//!
//! The agent orchestrates the reason/act loop:
//! 1. Seed the transcript with the task, tool catalog and response grammar
//! 2. Ask the reasoning actor for the next turn
//! 3. A final answer ends the run; otherwise parse the action directive
//! 4. Execute the tool and feed the observation back
//! 5. Repeat until a final answer or the iteration budget
//!
//! The actor is the brain, the tools are the hands.

mod agent;

pub use agent::{Agent, AgentConfig, RunResult, RunState};
