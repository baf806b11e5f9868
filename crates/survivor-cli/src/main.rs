//! Survivor CLI - run the survival agent headless.
//!
//! - `survivor run` - drive the agent through a seeded sandbox world
//! - `survivor config` - print the default agent configuration
//! - `survivor transitions` - print the exploration transition table

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use survivor_agent::{
    AgentConfig, AgentController, DebugShape, ExplorationState, TraceLog, TRACE_LOG,
};
use survivor_cli::{SandboxSummary, SandboxWorld};
use survivor_core::SteeringOutput;

#[derive(Parser)]
#[command(name = "survivor")]
#[command(about = "Headless runner for the survival agent", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the agent in the sandbox world
    Run {
        /// Number of frames to simulate
        #[arg(long, default_value_t = 3600)]
        frames: u64,

        /// Seconds per frame
        #[arg(long, default_value_t = 1.0 / 30.0)]
        dt: f32,

        /// Seed for the sandbox world
        #[arg(long, default_value_t = 7)]
        world_seed: u64,

        /// Agent configuration (YAML); defaults are used when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print one JSON record per frame and a JSON summary
        #[arg(long)]
        json: bool,

        /// Record and print the decision trace
        #[arg(long)]
        trace: bool,
    },

    /// Print the default agent configuration as YAML
    Config,

    /// Print the exploration transition table
    Transitions,
}

#[derive(Serialize)]
struct FrameRecord<'a> {
    frame: u64,
    state: &'static str,
    output: &'a SteeringOutput,
    shapes: &'a [DebugShape],
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            frames,
            dt,
            world_seed,
            config,
            json,
            trace,
        } => run(frames, dt, world_seed, config, json, trace),
        Commands::Config => {
            print!("{}", AgentConfig::default().to_yaml()?);
            Ok(())
        }
        Commands::Transitions => {
            print_transitions();
            Ok(())
        }
    }
}

fn run(
    frames: u64,
    dt: f32,
    world_seed: u64,
    config_path: Option<PathBuf>,
    json: bool,
    trace: bool,
) -> Result<()> {
    let config = match &config_path {
        Some(path) => AgentConfig::load(path)?,
        None => AgentConfig::default(),
    };
    tracing::info!(frames, dt, world_seed, agent_seed = config.seed, "Starting sandbox run");

    let mut world = SandboxWorld::new(world_seed);
    let mut agent = AgentController::new(config);
    if trace {
        agent
            .blackboard_mut()
            .add(TRACE_LOG, TraceLog::default())
            .context("Failed to install trace log")?;
    }
    agent
        .initialize(&mut world)
        .context("Failed to initialize agent")?;

    for _ in 0..frames {
        let output = agent.update_steering(dt, &mut world);
        if json {
            let shapes = agent.debug_shapes();
            let record = FrameRecord {
                frame: agent.frame(),
                state: agent.current_state().name(),
                output: &output,
                shapes: &shapes,
            };
            println!("{}", serde_json::to_string(&record)?);
        }
        world.step(dt, &output);
        if world.is_agent_dead() {
            break;
        }
    }

    let final_state = agent.current_state();
    let blackboard = agent.shutdown();
    let summary = world.summary();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary, final_state);
    }

    if trace {
        let log = blackboard
            .get_ref(TRACE_LOG)
            .context("Trace log missing after run")?;
        for event in &log.events {
            println!("[{:>6}] {} a={} b={}", event.tick, event.tag, event.a, event.b);
        }
    }

    Ok(())
}

fn print_summary(summary: &SandboxSummary, state: ExplorationState) {
    println!("Survivor Sandbox Run");
    println!("====================");
    println!();
    println!(
        "Frames: {} ({})",
        summary.frames,
        if summary.alive { "alive" } else { "dead" }
    );
    println!("Final state: {}", state.name());
    println!(
        "Position: ({:.1}, {:.1})",
        summary.position.x, summary.position.y
    );
    println!("Health: {:.1}  Energy: {:.1}", summary.health, summary.energy);
    println!();
    println!("Score: {}", summary.stats.score);
    println!("Difficulty: {}", summary.stats.difficulty);
    println!(
        "Enemies killed: {} (hits: {}, missed shots: {})",
        summary.stats.enemies_killed, summary.stats.enemies_hit, summary.stats.missed_shots
    );
    println!("Items picked up: {}", summary.stats.items_picked_up);
    println!();
    println!("Inventory:");
    if summary.inventory.is_empty() {
        println!("  (empty)");
    }
    for item in &summary.inventory {
        println!("  - {:?} (value: {})", item.item_type, item.value);
    }
}

fn print_transitions() {
    let fsm = survivor_agent::exploration_machine();
    println!("Start: {}", fsm.current().name());
    for state in ExplorationState::ALL {
        println!("{}:", state.name());
        for t in fsm.transitions_from(state) {
            println!("  {:<22} -> {}", t.guard.name(), t.to.name());
        }
    }
}
