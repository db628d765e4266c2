//! Domain records
//!
//! A record is one `(domain, date)` pair taken from the bardate feed or from
//! the local cache file. Records are never mutated after parsing.

use chrono::NaiveDate;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Date format used by the feed, the cache file and the CLI
pub const DATE_FORMAT: &str = "%Y-%m-%d";

static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern is valid"));

/// One domain and the date it becomes available for registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRecord {
    pub domain: String,
    pub date: NaiveDate,
}

impl DomainRecord {
    pub fn new(domain: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            domain: domain.into(),
            date,
        }
    }

    /// Render as a cache row: `domain, YYYY-MM-DD`
    pub fn to_cache_row(&self) -> String {
        format!("{}, {}", self.domain, self.date.format(DATE_FORMAT))
    }
}

impl fmt::Display for DomainRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.domain, self.date.format(DATE_FORMAT))
    }
}

/// Parse a strict `YYYY-MM-DD` date.
///
/// Unpadded components (`2024-1-5`) and trailing data are rejected, as are
/// well-formed strings that are not real calendar dates (`2024-13-40`).
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    if !DATE_PATTERN.is_match(raw) {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

/// Sort records ascending by date.
///
/// `sort_by_key` is stable, so domains sharing a date keep their input order.
pub fn sort_by_date(mut records: Vec<DomainRecord>) -> Vec<DomainRecord> {
    records.sort_by_key(|r| r.date);
    records
}
