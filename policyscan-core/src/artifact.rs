// JSON artifacts written at the end of each scan stage

use policyscan_scanner::error::{Result, ScanError};
use policyscan_scanner::result::{PageResources, WordFrequency};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

pub const DEFAULT_RESOURCES_PATH: &str = "./external_resources.json";
pub const DEFAULT_FREQUENCIES_PATH: &str = "./word_frequencies.json";

/// Pretty-print `value` as JSON to `path`, replacing whatever was there.
pub fn write_artifact<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, value).map_err(std::io::Error::from)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    debug!("Wrote artifact {}", path.display());
    Ok(())
}

pub fn write_page_resources(resources: &PageResources, path: &Path) -> Result<()> {
    write_artifact(resources, path)
}

pub fn write_word_frequencies(frequencies: &WordFrequency, path: &Path) -> Result<()> {
    write_artifact(frequencies, path)
}

pub fn read_page_resources(path: &Path) -> Result<PageResources> {
    let file = File::open(path)?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| ScanError::ParseError(format!("{}: {}", path.display(), e)))
}

pub fn read_word_frequencies(path: &Path) -> Result<WordFrequency> {
    let file = File::open(path)?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| ScanError::ParseError(format!("{}: {}", path.display(), e)))
}
