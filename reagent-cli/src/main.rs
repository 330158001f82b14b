//! # Reagent CLI
//!
//! Command-line interface for running the reason/act agent loop.
//!
//! Usage:
//!   reagent <task>
//!   reagent run <task>
//!   reagent demo
//!   reagent schema
//!
//! Examples:
//!   reagent "Plot a safe course from (0,0) to (2,2)"
//!   reagent -p anthropic -m claude-3-5-haiku-20241022 "Scan sector (1,1)"
//!   reagent demo --quiet

use clap::{Parser, Subcommand, ValueEnum};
use reagent_agent::{Agent, AgentConfig, RunResult};
use reagent_core::{
    builtin_registry, AnthropicProvider, LlmProvider, OpenAIProvider, PromptSchema,
    ProviderActor, ProviderConfig, ScriptedActor, Tool, ToolRegistry,
};

#[derive(Parser)]
#[command(name = "reagent")]
#[command(author, version, about = "Reagent - a reason/act agent loop over typed tools")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Task to execute (when not using subcommands)
    #[arg(trailing_var_arg = true)]
    task: Vec<String>,

    /// Provider backend for the reasoning actor
    #[arg(short, long, global = true, value_enum, default_value = "openai")]
    provider: ProviderKind,

    /// Model override for the selected provider
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Maximum reasoning iterations per run
    #[arg(long, global = true, default_value_t = 10)]
    max_iterations: usize,

    /// Enable verbose output (show transcript and token usage)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode - only show the final answer
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ProviderKind {
    Openai,
    Anthropic,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a task against a live provider
    Run {
        /// The task description
        #[arg(trailing_var_arg = true, required = true)]
        task: Vec<String>,
    },
    /// Run the scripted hazard-grid navigation demo (no provider needed)
    Demo,
    /// Show the system prompt rendered for the built-in tools
    Schema,
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}…", &s[..max_len])
    }
}

fn agent_config(cli: &Cli) -> AgentConfig {
    AgentConfig {
        max_iterations: cli.max_iterations,
        verbose: !cli.quiet,
        observe_parse_errors: true,
    }
}

fn report(result: &RunResult, cli: &Cli) {
    if !cli.quiet {
        println!("\n--- FINAL ANSWER ---\n");
    }
    println!("{}", result.final_answer.clone().unwrap_or_default());

    if cli.verbose {
        println!("\n--- Transcript ({} turns) ---", result.transcript.len());
        for turn in result.transcript.iter() {
            let flat = turn.text.replace('\n', " ");
            println!(
                "  [{:9}] {}",
                turn.role.as_str().to_uppercase(),
                truncate(&flat, 100)
            );
        }
    }

    if !cli.quiet {
        println!(
            "\nSuccess: {} ({} iteration(s))",
            result.success, result.iterations
        );
    }
}

fn api_key(var: &str) -> String {
    match std::env::var(var) {
        Ok(key) if !key.is_empty() => key,
        _ => {
            eprintln!("Error: {} is not set.", var);
            eprintln!("Export an API key or use `reagent demo` for the offline demo.");
            std::process::exit(1);
        }
    }
}

async fn run_with_provider<P: LlmProvider>(provider: P, task: &str, cli: &Cli) {
    let registry = build_registry();
    let mut agent =
        Agent::new(ProviderActor::new(provider), registry).with_config(agent_config(cli));

    match agent.run(task).await {
        Ok(result) => {
            report(&result, cli);

            if cli.verbose {
                let usage = agent.actor().usage();
                println!(
                    "\nTokens: {} prompt + {} completion = {} total over {} call(s)",
                    usage.total_prompt_tokens,
                    usage.total_completion_tokens,
                    usage.total_tokens(),
                    usage.total_calls
                );
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run_task(task: &str, cli: &Cli) {
    if !cli.quiet {
        println!("Reagent - reason/act agent loop\n");
    }

    match cli.provider {
        ProviderKind::Openai => {
            let mut config = ProviderConfig::openai(api_key("OPENAI_API_KEY"));
            if let Some(model) = &cli.model {
                config = config.with_model(model.clone());
            }
            run_with_provider(OpenAIProvider::new(config), task, cli).await;
        }
        ProviderKind::Anthropic => {
            let mut config = ProviderConfig::anthropic(api_key("ANTHROPIC_API_KEY"));
            if let Some(model) = &cli.model {
                config = config.with_model(model.clone());
            }
            run_with_provider(AnthropicProvider::new(config), task, cli).await;
        }
    }
}

fn build_registry() -> ToolRegistry {
    match builtin_registry() {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("Error building tool registry: {}", e);
            std::process::exit(1);
        }
    }
}

/// The canned seven-turn navigation walk: scan the neighbors, route around
/// the three hazards, report the safe path.
fn demo_script() -> ScriptedActor {
    ScriptedActor::from_turns(&[
        "Thought: I start at (0,0) and need the exit at (2,2). First check the sector to the right.\n\
         Action: scan_sector_hazards\n\
         Action Input: {\"x\": 1, \"y\": 0}",
        "Thought: (1,0) is clear. Before committing, check the sector above the start.\n\
         Action: scan_sector_hazards\n\
         Action Input: {\"x\": 0, \"y\": 1}",
        "Thought: (0,1) has high radiation, so the route goes right. Check (1,1) next.\n\
         Action: scan_sector_hazards\n\
         Action Input: {\"x\": 1, \"y\": 1}",
        "Thought: (1,1) is an asteroid field. Check whether I can continue right along the bottom row.\n\
         Action: scan_sector_hazards\n\
         Action Input: {\"x\": 2, \"y\": 0}",
        "Thought: (2,0) is clear. Check the sector above it.\n\
         Action: scan_sector_hazards\n\
         Action Input: {\"x\": 2, \"y\": 1}",
        "Thought: (2,1) is an ion storm, but I only pass through the column edge. Confirm the exit itself.\n\
         Action: scan_sector_hazards\n\
         Action Input: {\"x\": 2, \"y\": 2}",
        "Thought: All hazards are mapped: radiation at (0,1), asteroids at (1,1), ion storm at (2,1).\n\
         Final Answer: Safe route plotted: (0,0) -> (1,0) -> (2,0) -> (2,2). Move right twice along the \
         bottom row, then up to the exit, avoiding all three hazardous sectors.",
    ])
}

async fn run_demo(cli: &Cli) {
    if !cli.quiet {
        println!("Reagent demo - scripted nebula navigation\n");
    }

    let registry = build_registry();
    let mut agent = Agent::new(demo_script(), registry).with_config(agent_config(cli));

    let query =
        "Plot a safe course from starting position (0,0) to the Exit at (2,2). \
         Scan sectors to avoid hazards.";

    match agent.run(query).await {
        Ok(result) => {
            report(&result, cli);

            // Direct tool invocation, outside the loop
            if !cli.quiet {
                let registry = agent.registry();
                if let Some(tool) = registry.lookup("calculate_escape_velocity") {
                    let params = serde_json::json!({"mass": 5.972e24, "radius": 6.371e6});
                    if let serde_json::Value::Object(params) = params {
                        match tool.invoke(&params) {
                            Ok(result) => println!(
                                "\nEarth escape velocity: {} km/s",
                                result["escape_velocity_km_s"]
                            ),
                            Err(e) => eprintln!("Escape velocity failed: {}", e),
                        }
                    }
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn show_schema() {
    let registry = build_registry();
    let schema = PromptSchema::new();
    println!("{}", schema.render("<your task here>", &registry));
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Demo) => {
            run_demo(&cli).await;
            return;
        }
        Some(Commands::Schema) => {
            show_schema();
            return;
        }
        Some(Commands::Run { task }) => {
            let task_str = task.join(" ");
            run_task(&task_str, &cli).await;
            return;
        }
        None => {
            if cli.task.is_empty() {
                eprintln!("Error: No task provided.");
                eprintln!("Usage: reagent [OPTIONS] <TASK>...");
                eprintln!("       reagent run <TASK>...");
                eprintln!("       reagent demo");
                eprintln!("       reagent schema");
                eprintln!("\nExamples:");
                eprintln!("  reagent \"Plot a safe course from (0,0) to (2,2)\"");
                eprintln!("  reagent -p anthropic \"Scan sector (1,1)\"");
                eprintln!("  reagent demo");
                eprintln!("  reagent --help");
                std::process::exit(1);
            }
        }
    }

    // Default: run task from positional args
    let task_str = cli.task.join(" ");
    run_task(&task_str, &cli).await;
}
