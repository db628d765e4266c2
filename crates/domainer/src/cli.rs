//! Command-line interface definition

use chrono::NaiveDate;
use clap::Parser;
use domainer_common::{parse_date, DomainerError};
use std::path::PathBuf;

/// Download, sort and cache the .se bardate list, then filter it by date
#[derive(Parser, Debug, Clone)]
#[command(name = "domainer")]
#[command(about = "Download, sort domains, and filter by date.", long_about = None)]
#[command(version = env!("DOMAINER_VERSION"))]
pub struct Cli {
    /// Date to filter available domains (YYYY-MM-DD)
    #[arg(short, long, value_name = "YYYY-MM-DD", value_parser = parse_target_date)]
    pub date: Option<NaiveDate>,

    /// Analyze the matched domains using ChatGPT
    #[arg(short, long)]
    pub chatgpt: bool,

    /// Configuration file (default: ~/.config/domainer/config.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory for the cache and output files
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Re-download the feed even if a cache file exists
    #[arg(long)]
    pub refresh: bool,

    /// Show debug diagnostics
    #[arg(short, long)]
    pub verbose: bool,
}

/// Strict `YYYY-MM-DD` parser for `--date`
pub fn parse_target_date(raw: &str) -> Result<NaiveDate, DomainerError> {
    parse_date(raw).ok_or_else(|| DomainerError::InvalidDate(raw.to_string()))
}
