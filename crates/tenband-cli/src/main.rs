//! Tenband CLI - ten-band equalizer over WAV files and system loopback audio.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tenband")]
#[command(author, version, about = "Ten-band equalizer engine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a WAV file through the equalizer
    Process(commands::process::ProcessArgs),

    /// Capture system loopback audio through the equalizer
    Capture(commands::capture::CaptureArgs),

    /// List the built-in presets
    Presets(commands::presets::PresetsArgs),

    /// List audio devices
    Devices(commands::devices::DevicesArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Capture(args) => commands::capture::run(args),
        Commands::Presets(args) => commands::presets::run(args),
        Commands::Devices(args) => commands::devices::run(args),
    }
}
