//! Agent implementation - orchestrates the reason/act loop

use reagent_core::{
    execute, extract_final_answer, parse_action, ActionOutcome, PromptSchema, ReasoningActor,
    ToolRegistry, Transcript, Turn,
};
use reagent_error::Result;

/// Configuration for the agent
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Upper bound on reasoning-actor calls per run
    pub max_iterations: usize,
    /// Print per-iteration progress to stdout
    pub verbose: bool,
    /// Feed malformed action directives back as observations.
    ///
    /// `false` restores the legacy behavior where a malformed directive
    /// silently burns an iteration with no feedback to the actor.
    pub observe_parse_errors: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            verbose: false,
            observe_parse_errors: true,
        }
    }
}

/// Terminal state of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// The actor delivered a final answer
    FinalAnswer,
    /// The iteration budget ran out first
    IterationLimit,
}

/// Result of one agent run
#[derive(Debug, Clone)]
pub struct RunResult {
    /// The extracted final answer, or a synthesized notice on limit
    pub final_answer: Option<String>,
    /// Number of reasoning-actor calls consumed
    pub iterations: usize,
    /// The full conversation record
    pub transcript: Transcript,
    /// Whether the run ended with an actor-delivered final answer
    pub success: bool,
    /// How the run terminated
    pub state: RunState,
}

/// The agent orchestrator - drives one reasoning actor against one registry.
///
/// Each run is strictly sequential: a tool invocation completes before the
/// next actor call is issued, since that call depends on the observation.
/// Independent runs share nothing but the read-only registry.
pub struct Agent<A: ReasoningActor> {
    actor: A,
    registry: ToolRegistry,
    schema: PromptSchema,
    config: AgentConfig,
}

impl<A: ReasoningActor> Agent<A> {
    /// Create a new agent with default configuration
    pub fn new(actor: A, registry: ToolRegistry) -> Self {
        Self {
            actor,
            registry,
            schema: PromptSchema::new(),
            config: AgentConfig::default(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the iteration budget
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    /// The wrapped reasoning actor
    pub fn actor(&self) -> &A {
        &self.actor
    }

    /// The registry this agent dispatches against
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Run a query to completion.
    ///
    /// Every parse or dispatch failure stays inside the transcript as an
    /// observation; the only error propagated to the caller is a failure of
    /// the reasoning-actor transport itself.
    pub async fn run(&mut self, query: &str) -> Result<RunResult> {
        if self.config.verbose {
            println!("Query: {}\n", query);
        }

        let mut transcript = Transcript::seeded(self.schema.render(query, &self.registry));
        let mut iterations = 0;
        let mut answer = None;

        while iterations < self.config.max_iterations {
            if self.config.verbose {
                println!("--- Iteration {} ---", iterations + 1);
            }

            let text = self.actor.next_turn(&transcript).await?;

            if self.config.verbose {
                println!("{}\n", text);
            }

            transcript.push(Turn::assistant(text.clone()));
            iterations += 1;

            // Final answer wins even if the turn also carries an action.
            if let Some(extracted) = extract_final_answer(&text) {
                answer = Some(extracted);
                break;
            }

            match parse_action(&text) {
                Ok(ActionOutcome::Action(action)) => {
                    if self.config.verbose {
                        println!(
                            "Executing: {}({})",
                            action.tool_name,
                            serde_json::Value::Object(action.parameters.clone())
                        );
                    }

                    let observation = execute(&action, &self.registry);

                    if self.config.verbose {
                        println!("{}\n", observation);
                    }

                    transcript.push(Turn::user(observation.text));
                }
                Ok(ActionOutcome::NoAction) => {
                    // Reasoning-only turn: the iteration is consumed with no
                    // observation to feed back.
                }
                Err(err) => {
                    if self.config.observe_parse_errors {
                        let feedback = format!(
                            "Error: action directive could not be parsed: {}",
                            err.message()
                        );
                        if self.config.verbose {
                            println!("{}\n", feedback);
                        }
                        transcript.push(Turn::user(feedback));
                    } else if self.config.verbose {
                        println!("(malformed action directive ignored)\n");
                    }
                }
            }
        }

        let result = match answer {
            Some(final_answer) => RunResult {
                final_answer: Some(final_answer),
                iterations,
                transcript,
                success: true,
                state: RunState::FinalAnswer,
            },
            None => RunResult {
                final_answer: Some(format!(
                    "Agent terminated due to iteration limit ({}). No final answer produced.",
                    self.config.max_iterations
                )),
                iterations,
                transcript,
                success: false,
                state: RunState::IterationLimit,
            },
        };

        if self.config.verbose {
            match result.state {
                RunState::FinalAnswer => println!(
                    "Final answer reached after {} iteration(s)\n",
                    result.iterations
                ),
                RunState::IterationLimit => println!(
                    "Iteration limit ({}) reached without a final answer\n",
                    self.config.max_iterations
                ),
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reagent_core::{builtin_registry, Role, ScriptedActor};

    fn agent(turns: &[&str]) -> Agent<ScriptedActor> {
        Agent::new(ScriptedActor::from_turns(turns), builtin_registry().unwrap())
    }

    fn assistant_turns(result: &RunResult) -> usize {
        result
            .transcript
            .iter()
            .filter(|t| t.role == Role::Assistant)
            .count()
    }

    #[tokio::test]
    async fn test_hazard_scan_feeds_observation_back() {
        let mut agent = agent(&[
            "Thought: check the sector above.\n\
             Action: scan_sector_hazards\n\
             Action Input: {\"x\": 0, \"y\": 1}",
            "Final Answer: sector (0,1) is dangerous, avoiding it.",
        ]);

        let result = agent.run("Survey the grid").await.unwrap();
        assert!(result.success);
        assert_eq!(result.iterations, 2);

        let observation = result
            .transcript
            .iter()
            .find(|t| t.role == Role::User)
            .expect("observation turn");
        assert!(observation.text.contains("High Radiation"));
        assert!(observation.text.contains("\"safe\": false"));
    }

    #[tokio::test]
    async fn test_immediate_final_answer() {
        let mut agent = agent(&["Final Answer: done"]);

        let result = agent.run("anything").await.unwrap();
        assert!(result.success);
        assert_eq!(result.state, RunState::FinalAnswer);
        assert_eq!(result.final_answer.as_deref(), Some("done"));
        assert_eq!(result.iterations, 1);
    }

    #[tokio::test]
    async fn test_zero_iteration_budget() {
        let mut agent = agent(&["Final Answer: never reached"]).with_max_iterations(0);

        let result = agent.run("anything").await.unwrap();
        assert!(!result.success);
        assert_eq!(result.state, RunState::IterationLimit);
        assert_eq!(result.iterations, 0);
        assert_eq!(agent.actor().calls_made(), 0);
        assert!(result.final_answer.unwrap().contains("iteration limit"));
    }

    #[tokio::test]
    async fn test_unknown_tool_lists_registry() {
        let mut agent = agent(&[
            "Action: warp_drive\nAction Input: {}",
            "Final Answer: giving up on warp.",
        ]);

        let result = agent.run("escape").await.unwrap();
        let observation = result
            .transcript
            .iter()
            .find(|t| t.role == Role::User)
            .expect("observation turn");
        assert!(observation.text.contains("warp_drive"));
        assert!(observation.text.contains("scan_sector_hazards"));
        assert!(observation.text.contains("calculate_escape_velocity"));
    }

    #[tokio::test]
    async fn test_reasoning_only_turn_burns_iteration() {
        let mut agent = agent(&["Thought: still thinking.", "Final Answer: ok"]);

        let result = agent.run("anything").await.unwrap();
        assert!(result.success);
        assert_eq!(result.iterations, 2);
        // System turn plus two assistant turns: no observation was appended.
        assert_eq!(result.transcript.len(), 3);
    }

    #[tokio::test]
    async fn test_parse_error_feedback_default() {
        let mut agent = agent(&[
            "Action: scan_sector_hazards\nAction Input: {\"x\": 0",
            "Final Answer: retried.",
        ]);

        let result = agent.run("anything").await.unwrap();
        assert!(result.success);
        assert_eq!(result.iterations, 2);

        let feedback = result
            .transcript
            .iter()
            .find(|t| t.role == Role::User)
            .expect("parse feedback turn");
        assert!(feedback.text.contains("could not be parsed"));
    }

    #[tokio::test]
    async fn test_parse_error_silent_legacy_behavior() {
        let mut agent = agent(&[
            "Action: scan_sector_hazards\nAction Input: {\"x\": 0",
            "Final Answer: retried.",
        ])
        .with_config(AgentConfig {
            observe_parse_errors: false,
            ..AgentConfig::default()
        });

        let result = agent.run("anything").await.unwrap();
        assert!(result.success);
        assert_eq!(result.iterations, 2);
        // Legacy mode: the malformed directive leaves no trace beyond the
        // assistant turn itself.
        assert!(result.transcript.iter().all(|t| t.role != Role::User));
    }

    #[tokio::test]
    async fn test_final_answer_takes_precedence_over_action() {
        let mut agent = agent(&[
            "Action: scan_sector_hazards\nAction Input: {\"x\": 0, \"y\": 0}\n\
             Final Answer: both markers present",
        ]);

        let result = agent.run("anything").await.unwrap();
        assert!(result.success);
        assert_eq!(result.final_answer.as_deref(), Some("both markers present"));
        // The action was never dispatched.
        assert!(result.transcript.iter().all(|t| t.role != Role::User));
    }

    #[tokio::test]
    async fn test_iteration_limit_bounds_actor_calls() {
        let scan = "Action: scan_sector_hazards\nAction Input: {\"x\": 1, \"y\": 0}";
        let mut agent = agent(&[scan, scan, scan, scan, scan]).with_max_iterations(3);

        let result = agent.run("anything").await.unwrap();
        assert!(!result.success);
        assert_eq!(result.iterations, 3);
        assert_eq!(agent.actor().calls_made(), 3);
        assert_eq!(assistant_turns(&result), 3);
    }

    #[tokio::test]
    async fn test_one_assistant_turn_per_iteration() {
        let mut agent = agent(&[
            "Thought: first.",
            "Action: scan_sector_hazards\nAction Input: {\"x\": 2, \"y\": 2}",
            "Final Answer: exit located.",
        ]);

        let result = agent.run("anything").await.unwrap();
        assert_eq!(result.iterations, 3);
        assert_eq!(assistant_turns(&result), 3);
    }

    #[tokio::test]
    async fn test_transcript_grows_monotonically() {
        let mut agent = agent(&[
            "Action: scan_sector_hazards\nAction Input: {\"x\": 1, \"y\": 1}",
            "Final Answer: asteroid field mapped.",
        ]);

        let result = agent.run("anything").await.unwrap();
        // system + (assistant, observation) + assistant
        assert_eq!(result.transcript.len(), 4);
        let roles: Vec<Role> = result.transcript.iter().map(|t| t.role).collect();
        assert_eq!(
            roles,
            vec![Role::System, Role::Assistant, Role::User, Role::Assistant]
        );
    }
}
