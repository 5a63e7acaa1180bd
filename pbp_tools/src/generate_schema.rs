use clap::{Parser, ValueEnum};
use schemars::gen::SchemaSettings;
use pbp::{GameLineups, GameOutput};

#[derive(Copy, Clone, ValueEnum)]
enum Target {
    /// The lineups file `narrate` reads
    Lineups,
    /// What `narrate --json` prints
    Output,
}

#[derive(Parser)]
struct Args {
    #[arg(value_enum, default_value_t = Target::Output)]
    target: Target,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let generator = SchemaSettings::default().into_generator();
    let schema = match args.target {
        Target::Lineups => generator.into_root_schema_for::<GameLineups>(),
        Target::Output => generator.into_root_schema_for::<GameOutput>(),
    };

    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
