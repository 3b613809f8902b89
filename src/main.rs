//! # scenegen CLI
//!
//! Command-line front end for the scene generator.
//!
//! ## Subcommands
//!
//! - `generate`: ask Gemini for a scene premise and print the resulting
//!   scene specification as JSON
//!
//! Participants come from repeated `--participant` flags, a JSON file of
//! agent configs, or both. Set `GEMINI_API_KEY` (or `GEMINI_FREE_API_KEY`
//! with `--free`) before running.

mod telemetry;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use scenegen::model::Client;
use scenegen::participants::{load_participants, participants_from_names};
use scenegen::scene::parse_start_time;
use scenegen::{GeneratorConfig, SceneGenerator};
use telemetry::OtelGuard;
use tracing::{info, instrument};

#[derive(Parser)]
#[command(author, version, about = "Generate LLM-written scenes for agent-based simulations", long_about = None)]
struct Cli {
    /// Export traces and metrics over OTLP
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a scene specification
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Name of the scene type
    #[arg(short, long)]
    name: String,

    /// Basis of the scene premise (a random everyday situation if omitted)
    #[arg(short, long)]
    situation: Option<String>,

    /// Desired premise length in words
    #[arg(short, long, default_value = "100")]
    length: usize,

    /// Scene start time, RFC 3339 or YYYY-MM-DDTHH:MM[:SS] (default: now, UTC)
    #[arg(short = 't', long)]
    start_time: Option<String>,

    /// Participant name (repeatable)
    #[arg(short, long = "participant")]
    participants: Vec<String>,

    /// JSON file with an array of agent configs
    #[arg(short = 'f', long)]
    participants_file: Option<PathBuf>,

    /// Number of rounds the scene lasts
    #[arg(short, long, default_value = "1")]
    rounds: usize,

    /// Maximum premise length in tokens
    #[arg(long, default_value = "3500")]
    max_tokens: u64,

    /// Maximum premise length in characters
    #[arg(long, default_value = "3500")]
    max_characters: usize,

    /// Sampling temperature
    #[arg(long)]
    temperature: Option<f64>,

    /// Use the free Gemini tier
    #[arg(long)]
    free: bool,

    /// Write the scene to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    let mut _otel: Option<OtelGuard> = None;
    if cli.otel {
        _otel = Some(telemetry::init_tracing_subscriber()?);
    } else {
        telemetry::init_console_subscriber();
    }

    match cli.command {
        Some(Commands::Generate(args)) => {
            generate_command(args).await?;
        }
        None => {
            // If no command is provided, show help
            let _ = Cli::parse_from(["scenegen", "--help"]);
        }
    }

    Ok(())
}

#[instrument]
async fn generate_command(args: GenerateArgs) -> anyhow::Result<()> {
    let start_time = match args.start_time.as_deref() {
        Some(input) => parse_start_time(input)?,
        None => chrono::Utc::now().naive_utc(),
    };

    let mut participants = match &args.participants_file {
        Some(path) => load_participants(path).await?,
        None => Vec::new(),
    };
    participants.extend(participants_from_names(args.participants));

    let client = if args.free {
        Client::new_gemini_free_from_env()?
    } else {
        Client::new_gemini_from_env()?
    };

    let mut config = GeneratorConfig::builder()
        .max_tokens(args.max_tokens)
        .max_characters(args.max_characters);
    if let Some(temperature) = args.temperature {
        config = config.temperature(temperature);
    }
    let generator = SceneGenerator::new(config.build());

    info!("Generating scene '{}' for {} participants", args.name, participants.len());
    let scene = generator
        .generate(
            &client.language_model(),
            args.name,
            args.situation.as_deref(),
            args.length,
            start_time,
            participants,
            args.rounds,
        )
        .await?;

    let json = serde_json::to_string_pretty(&scene)?;
    match args.output {
        Some(output_file) => {
            tokio::fs::write(&output_file, json).await?;
            println!("Saved scene to {}", output_file.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
