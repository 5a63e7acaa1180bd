mod input;

use std::path::PathBuf;
use anyhow::Context;
use clap::Parser;
use pbp::GameLineups;

#[derive(Parser)]
struct Args {
    /// Game log, one encoded event per line. May be gzipped.
    #[arg(value_name = "LOG", value_hint = clap::ValueHint::FilePath)]
    log: PathBuf,

    /// JSON file with both teams' starting lineups
    #[arg(value_name = "LINEUPS", value_hint = clap::ValueHint::FilePath)]
    lineups: PathBuf,

    /// Print the tables as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let lineups_json = std::fs::read_to_string(&args.lineups)
        .with_context(|| format!("Failed to read {}", args.lineups.display()))?;
    let lineups: GameLineups = serde_json::from_str(&lineups_json)
        .context("Failed to parse lineups")?;
    let lines = input::read_lines(&args.log)?;

    let output = pbp::interpret_game(lineups, &lines)
        .with_context(|| format!("Failed to interpret {}", args.log.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for table in &output.tables {
            println!("{table}");
        }
        if !output.unrecognized.is_empty() {
            eprintln!("{} unrecognized lines", output.unrecognized.len());
        }
    }

    Ok(())
}
