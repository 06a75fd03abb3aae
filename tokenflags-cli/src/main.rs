//! tokenflags CLI - edit flag panels and run the randomization engine.
//!
//! # Commands
//!
//! - `tokenflags show [TOKEN]` - List every control and its value
//! - `tokenflags encode --set KEY=VALUE` - Edit controls and print the new token
//! - `tokenflags toggle KEY...` - Activate controls (cycles tri-states)
//! - `tokenflags check TOKEN` - Verify a token is well-formed
//! - `tokenflags seed` - Print a random seed
//! - `tokenflags cosmetics` - List the engine's cosmetic choices
//! - `tokenflags randomize` - Run the engine with the current token
//! - `tokenflags state` - Show or clear persisted state

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

mod commands;
mod error;

use commands::{GlobalOptions, check, cosmetics, encode, randomize, seed, show, state, toggle};
use error::CliResult;

/// tokenflags - Compact shareable flag tokens
#[derive(Parser)]
#[command(name = "tokenflags")]
#[command(author = "Pegasus Heavy Industries LLC")]
#[command(version)]
#[command(about = "Edit flag panels as base32 tokens and hand them to a randomization engine")]
#[command(long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = format!(
    "{}\n  {} tokenflags show\n  {} tokenflags encode --set fast-text=on --set leveling-speed=Fast\n  {} tokenflags toggle shuffle-chests\n  {} tokenflags randomize --engine ./dwr --source game.nes",
    "Examples:".bright_cyan().bold(),
    "$".dimmed(),
    "$".dimmed(),
    "$".dimmed(),
    "$".dimmed(),
))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML, JSON or .env)
    #[arg(long, global = true, env = "TOKENFLAGS_CONFIG")]
    config: Option<PathBuf>,

    /// Panel layout file (TOML or JSON) instead of the classic layout
    #[arg(long, global = true)]
    layout: Option<PathBuf>,

    /// State file holding the last token and source
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except results and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every control and its value
    #[command(alias = "s")]
    Show(ShowArgs),

    /// Set control values and print the resulting token
    #[command(alias = "e")]
    Encode(EncodeArgs),

    /// Activate controls, cycling tri-states and enumerations
    #[command(alias = "t")]
    Toggle(ToggleArgs),

    /// Check whether a token is well-formed
    Check(CheckArgs),

    /// Print a random seed
    Seed,

    /// List the cosmetic choices the engine offers
    Cosmetics(EngineArgs),

    /// Run the engine with the current token
    #[command(alias = "r")]
    Randomize(RandomizeArgs),

    /// Show or clear persisted state
    State(StateArgs),
}

#[derive(Args)]
struct ShowArgs {
    /// Token to show (defaults to the stored token)
    token: Option<String>,

    /// Print controls as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct EncodeArgs {
    /// Start from this token instead of the stored one
    #[arg(long)]
    from: Option<String>,

    /// Control assignment, e.g. `fast-text=on`
    #[arg(long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,
}

#[derive(Args)]
struct ToggleArgs {
    /// Control keys to activate
    #[arg(required = true)]
    keys: Vec<String>,
}

#[derive(Args)]
struct CheckArgs {
    /// Token to check
    token: String,
}

#[derive(Args)]
struct EngineArgs {
    /// Engine program (overrides the configured engine)
    #[arg(long)]
    engine: Option<PathBuf>,
}

#[derive(Args)]
struct RandomizeArgs {
    #[command(flatten)]
    engine: EngineArgs,

    /// Source artifact (defaults to the stored source)
    #[arg(long)]
    source: Option<PathBuf>,

    /// Seed (random when omitted)
    #[arg(long)]
    seed: Option<String>,

    /// Cosmetic choice (defaults to the stored or configured choice)
    #[arg(long)]
    cosmetic: Option<String>,
}

#[derive(Args)]
struct StateArgs {
    /// Remove all persisted state
    #[arg(long)]
    clear: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if cli.verbose {
        tokenflags_log::set_debug(true);
    } else if cli.quiet {
        tokenflags_log::set_level(tokenflags_log::Level::Error);
    }

    let options = GlobalOptions {
        config: cli.config,
        layout: cli.layout,
        state: cli.state,
        quiet: cli.quiet,
    };

    let result: CliResult<()> = match cli.command {
        Commands::Show(args) => show::run(&options, args.token.as_deref(), args.json),
        Commands::Encode(args) => encode::run(&options, args.from.as_deref(), &args.set),
        Commands::Toggle(args) => toggle::run(&options, &args.keys),
        Commands::Check(args) => check::run(&options, &args.token),
        Commands::Seed => seed::run(),
        Commands::Cosmetics(args) => cosmetics::run(&options, args.engine).await,
        Commands::Randomize(args) => {
            randomize::run(
                &options,
                randomize::Request {
                    engine: args.engine.engine,
                    source: args.source,
                    seed: args.seed,
                    cosmetic: args.cosmetic,
                },
            )
            .await
        }
        Commands::State(args) => state::run(&options, args.clear),
    };

    if let Err(e) = result {
        eprintln!("\n  {} {}\n", "Error:".red().bold(), e);
        std::process::exit(1);
    };
}
