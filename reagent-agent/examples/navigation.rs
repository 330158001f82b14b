//! Scripted navigation run against the built-in tools.
//!
//! Run with: cargo run -p reagent-agent --example navigation

use reagent_agent::{Agent, AgentConfig};
use reagent_core::{builtin_registry, ScriptedActor};

#[tokio::main]
async fn main() {
    let script = ScriptedActor::from_turns(&[
        "Thought: I should check the sector to the right before moving.\n\
         Action: scan_sector_hazards\n\
         Action Input: {\"x\": 1, \"y\": 0}",
        "Thought: (1,0) is clear. Now the sector above the start.\n\
         Action: scan_sector_hazards\n\
         Action Input: {\"x\": 0, \"y\": 1}",
        "Thought: (0,1) is radioactive, so the route must go right first.\n\
         Final Answer: Move right to (1,0); the upward sector (0,1) is unsafe.",
    ]);

    let registry = builtin_registry().expect("example tools register cleanly");

    let mut agent = Agent::new(script, registry).with_config(AgentConfig {
        max_iterations: 10,
        verbose: true,
        observe_parse_errors: true,
    });

    let result = agent
        .run("Find a safe first move from the starting position (0,0).")
        .await
        .expect("scripted actor cannot fail");

    println!("Success: {}", result.success);
    println!("Iterations: {}", result.iterations);
    println!("Final Answer: {}", result.final_answer.unwrap_or_default());
}
