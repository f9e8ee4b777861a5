use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use dialer::Voice;

mod cmd;

#[derive(Parser)]
#[command(name = "dialer")]
#[command(version, about = "Voice marketing campaign runner")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding .dialer/dialer.toml (defaults to the current directory)
    #[arg(long, global = true)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload customers, generate a script and voice, and call every customer
    Run(RunArgs),
    /// List the available synthesis voices
    Voices,
    /// View, create, or validate configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Args, Clone, Debug)]
pub struct RunArgs {
    /// Your own phone number
    #[arg(long)]
    pub caller: Option<String>,

    /// Assistant name used in the generated script
    #[arg(long)]
    pub assistant: Option<String>,

    /// How the assistant should come across
    #[arg(long)]
    pub persona: Option<String>,

    /// Overall conversation flow handed to the script generator
    #[arg(long, conflicts_with = "prompt_file")]
    pub prompt: Option<String>,

    /// Read the conversation prompt from a file
    #[arg(long)]
    pub prompt_file: Option<PathBuf>,

    /// Customer list (.xlsx, .xls, or .csv)
    #[arg(long)]
    pub customers: Option<PathBuf>,

    /// Synthesis voice
    #[arg(long, value_enum)]
    pub voice: Option<Voice>,

    /// Backend base URL. Overrides dialer.toml and DIALER_BACKEND_URL.
    #[arg(long)]
    pub backend_url: Option<String>,

    /// Calls in flight at once. Overrides dialer.toml and DIALER_MAX_PARALLEL_CALLS.
    #[arg(long)]
    pub max_parallel_calls: Option<usize>,

    /// Prompt for any field not given on the command line
    #[arg(short, long)]
    pub interactive: bool,

    /// Print only the outcome JSON and skip the progress display
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Validate configuration and show any warnings
    Validate,
    /// Initialize a default dialer.toml file
    Init,
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "dialer=debug" } else { "dialer=warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let project_dir = match cli.project_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    match &cli.command {
        Commands::Run(args) => cmd::cmd_run(&project_dir, &cli, args).await?,
        Commands::Voices => cmd::cmd_voices(),
        Commands::Config { command } => cmd::cmd_config(&project_dir, command.clone())?,
    }

    Ok(())
}
