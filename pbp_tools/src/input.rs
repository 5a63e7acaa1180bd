use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use anyhow::Context;
use flate2::read::GzDecoder;

/// Opens a text file for line-by-line reading, decompressing it first if it's gzipped
pub fn open_lines(path: &Path) -> anyhow::Result<Box<dyn BufRead>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    if path.extension().map_or(false, |ext| ext == "gz") {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

pub fn read_lines(path: &Path) -> anyhow::Result<Vec<String>> {
    open_lines(path)?
        .lines()
        .collect::<Result<_, _>>()
        .with_context(|| format!("Failed to read lines from {}", path.display()))
}
