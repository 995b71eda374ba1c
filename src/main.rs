mod commands;
mod config;
mod schedule;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "vercal")]
#[command(about = "Generate printable weekly-vertical paper calendars from a recurring-event schedule")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a calendar PDF
    Generate(commands::generate::GenerateArgs),
    /// Validate a schedule file and print its expanded occurrences
    Check(commands::check::CheckArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Check(args) => commands::check::run(args),
    }
}
