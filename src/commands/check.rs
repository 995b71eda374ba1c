//! The `check` command: validate a schedule file and preview its expansion.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;
use vercal_core::{expand_all, DateEventIndex};

use crate::schedule;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Schedule CSV to validate
    pub schedule: PathBuf,

    /// Print the per-date index as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: CheckArgs) -> Result<()> {
    let rules = schedule::read_rules(&args.schedule)?;
    let occurrences = expand_all(&rules);
    let index = DateEventIndex::from_occurrences(&occurrences);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&index)?);
        return Ok(());
    }

    for (date, events) in index.iter() {
        println!("{}", date.to_string().bold());
        for event in events {
            match event.event_end {
                Some(end) => println!("  {}-{}  {}", event.event_start, end, event.event),
                None => println!("  {}        {}", event.event_start, event.event),
            }
        }
    }
    println!(
        "\n{} rules, {} occurrences across {} dates",
        rules.len(),
        occurrences.len(),
        index.date_count()
    );
    Ok(())
}
