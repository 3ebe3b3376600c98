//! sala CLI - render audio files through the reverb and manage presets.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sala")]
#[command(author, version, about = "Stereo reverb renderer and preset tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a WAV file through the reverb
    Render(commands::render::RenderArgs),

    /// List the reverb's parameters
    Params(commands::params::ParamsArgs),

    /// List, show and save presets
    Presets(commands::presets::PresetsArgs),

    /// Show WAV file information
    Info(commands::info::InfoArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render(args) => commands::render::run(args),
        Commands::Params(args) => commands::params::run(args),
        Commands::Presets(args) => commands::presets::run(args),
        Commands::Info(args) => commands::info::run(args),
    }
}
