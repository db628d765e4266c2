//! Sorted-domains cache file
//!
//! Once written, the cache is the only source of truth: later runs read it
//! instead of downloading the feed again. Format:
//!
//! ```text
//! domain, date
//! foo.se, 2024-01-05
//! example.se, 2024-01-10
//! ```

use crate::parser::{parse_lines, ParseOutcome, CACHE_SEPARATOR};
use crate::record::DomainRecord;
use anyhow::{Context, Result};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Header line of the cache file
pub const CACHE_HEADER: &str = "domain, date";

/// Handle on the cache file location
#[derive(Debug, Clone)]
pub struct CacheFile {
    path: PathBuf,
}

impl CacheFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Overwrite the cache with the given (already sorted) records
    pub fn save(&self, records: &[DomainRecord]) -> Result<()> {
        write_listing(
            &self.path,
            CACHE_HEADER,
            records.iter().map(DomainRecord::to_cache_row),
        )
    }

    /// Read the cache, skipping the header line.
    ///
    /// Bad rows are skipped with a warning. Fails only if the file cannot be
    /// read at all.
    pub fn try_load(&self) -> Result<ParseOutcome> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;

        Ok(parse_lines(
            contents.lines().skip(1).map(str::trim),
            CACHE_SEPARATOR,
        ))
    }

    /// Like [`CacheFile::try_load`], but a missing or unreadable file is
    /// reported and yields an empty outcome.
    pub fn load(&self) -> ParseOutcome {
        if !self.exists() {
            error!("File '{}' not found.", self.path.display());
            return ParseOutcome::default();
        }

        match self.try_load() {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Error reading file: {:#}", e);
                ParseOutcome::default()
            }
        }
    }
}

/// Write a header line followed by one row per line, replacing any existing file.
///
/// Parent directories are created as needed.
pub fn write_listing<I, S>(path: &Path, header: &str, rows: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let file = fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{}", header)?;
    for row in rows {
        writeln!(writer, "{}", row.as_ref())?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Data successfully saved to {}", path.display());
    Ok(())
}
