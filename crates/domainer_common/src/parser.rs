//! Line parser for the bardate feed and the local cache file
//!
//! Both sources hold one `domain<SEP>date` pair per line; only the separator
//! differs (`\t` in the feed, `", "` in the cache). Bad lines are skipped with
//! a warning and reported back so callers can account for every input line.

use crate::record::{parse_date, DomainRecord};
use std::fmt;
use tracing::warn;

/// Field separator used by the remote feed
pub const FEED_SEPARATOR: &str = "\t";

/// Field separator used by the cache file
pub const CACHE_SEPARATOR: &str = ", ";

/// Why a line was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Wrong number of fields
    Malformed,
    /// Date field is not a strict `YYYY-MM-DD` calendar date
    InvalidDate,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Malformed => write!(f, "Skipping malformed line"),
            SkipReason::InvalidDate => write!(f, "Skipping invalid date format"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based position within the parsed input
    pub line_number: usize,
    pub line: String,
    pub reason: SkipReason,
}

/// Records in input order plus every line that was dropped
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub records: Vec<DomainRecord>,
    pub skipped: Vec<SkippedLine>,
}

impl ParseOutcome {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total lines seen (kept + skipped)
    pub fn lines_seen(&self) -> usize {
        self.records.len() + self.skipped.len()
    }
}

/// Parse the raw feed body.
///
/// The body is trimmed as a whole first so a trailing newline is not counted
/// as a malformed line. Individual lines are taken verbatim.
pub fn parse_feed(content: &str) -> ParseOutcome {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return ParseOutcome::default();
    }
    parse_lines(trimmed.lines(), FEED_SEPARATOR)
}

/// Parse `domain<separator>date` lines
pub fn parse_lines<'a, I>(lines: I, separator: &str) -> ParseOutcome
where
    I: IntoIterator<Item = &'a str>,
{
    let mut outcome = ParseOutcome::default();

    for (idx, line) in lines.into_iter().enumerate() {
        match parse_line(line, separator) {
            Ok(record) => outcome.records.push(record),
            Err(reason) => {
                warn!("{}: {}", reason, line);
                outcome.skipped.push(SkippedLine {
                    line_number: idx + 1,
                    line: line.to_string(),
                    reason,
                });
            }
        }
    }

    outcome
}

/// Parse a single line into a record
pub fn parse_line(line: &str, separator: &str) -> Result<DomainRecord, SkipReason> {
    let fields: Vec<&str> = line.split(separator).collect();
    let [domain, raw_date] = fields.as_slice() else {
        return Err(SkipReason::Malformed);
    };

    let date = parse_date(raw_date).ok_or(SkipReason::InvalidDate)?;
    Ok(DomainRecord::new(*domain, date))
}
