mod input;

use std::path::PathBuf;
use anyhow::anyhow;
use clap::Parser;
use indicatif::{ProgressDrawTarget, ProgressStyle};
use itertools::Itertools;
use log::info;
use par_iter_sync::IntoParallelIteratorSync;
use pbp::{Decoded, EventKind};

#[derive(Parser)]
struct Args {
    /// Game logs to decode. Gzipped logs are decompressed.
    #[arg(required = true, value_name = "LOG", value_hint = clap::ValueHint::FilePath)]
    logs: Vec<PathBuf>,

    /// Also check that no line matches more than one grammar. Much slower.
    #[arg(long)]
    exclusive: bool,

    /// How many of the most common unrecognized lines to print
    #[arg(long, default_value_t = 20)]
    top: usize,
}

enum LineReport {
    Blank,
    Decoded(EventKind),
    Unrecognized(String),
    Ambiguous(String, Vec<EventKind>),
}

fn check_line(line: String, exclusive: bool) -> LineReport {
    if line.trim().is_empty() {
        return LineReport::Blank;
    }
    if exclusive {
        let kinds = pbp::matching_kinds(&line);
        if kinds.len() > 1 {
            return LineReport::Ambiguous(line, kinds);
        }
    }
    match pbp::decode(&line) {
        Decoded::Event(event) => LineReport::Decoded(event.kind),
        Decoded::Unrecognized(line) => LineReport::Unrecognized(line),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut lines = Vec::new();
    for path in &args.logs {
        lines.extend(input::read_lines(path)?);
    }
    info!("Decoding {} lines from {} logs", lines.len(), args.logs.len());

    let progress = indicatif::ProgressBar::new(lines.len() as u64);
    progress.set_style(ProgressStyle::with_template("{msg:7} {wide_bar} {human_pos}/{human_len} {elapsed} eta {eta}")?);
    progress.set_draw_target(ProgressDrawTarget::stdout_with_hz(2 /* hz */));

    let exclusive = args.exclusive;
    let iter = lines.into_iter()
        .into_par_iter_sync(move |line| Ok::<_, ()>(check_line(line, exclusive)));

    let mut decoded = Vec::new();
    let mut unrecognized = Vec::new();
    let mut ambiguous = 0;
    for report in iter {
        progress.inc(1);
        match report {
            LineReport::Blank => {}
            LineReport::Decoded(kind) => decoded.push(kind),
            LineReport::Unrecognized(line) => {
                progress.set_message(format!("{} bad", unrecognized.len() + 1));
                unrecognized.push(line);
            }
            LineReport::Ambiguous(line, kinds) => {
                progress.println(format!("{line:?} matches {}", kinds.iter().map(|k| k.as_ref()).join(", ")));
                ambiguous += 1;
            }
        }
    }
    progress.finish();

    println!("{} lines decoded, {} unrecognized", decoded.len(), unrecognized.len());
    for (kind, count) in decoded.iter().counts().into_iter().sorted_by_key(|(_, count)| std::cmp::Reverse(*count)) {
        println!("{count:>9} {}", kind.as_ref());
    }
    if !unrecognized.is_empty() {
        println!("Most common unrecognized lines:");
        let most_common = unrecognized.iter()
            .counts()
            .into_iter()
            .sorted_by_key(|(line, count)| (std::cmp::Reverse(*count), *line))
            .take(args.top);
        for (line, count) in most_common {
            println!("{count:>9} {line}");
        }
    }

    if ambiguous > 0 {
        return Err(anyhow!("{ambiguous} lines matched more than one grammar"));
    }
    Ok(())
}
