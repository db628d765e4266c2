//! Result presentation
//!
//! Everything the user asked for goes to the wrapped writer (stdout in
//! production). [`save_matches`] writes the per-date output file.

use chrono::NaiveDate;
use domainer_common::cache::write_listing;
use std::io::{self, Write};
use std::path::Path;
use tracing::error;

/// Header line of the per-date output file
pub const OUTPUT_HEADER: &str = "domain";

const SEPARATOR_WIDTH: usize = 50;

pub struct Presenter<W: Write> {
    out: W,
}

impl<W: Write> Presenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// No `--date`: the cache step was all that was asked for
    pub fn cache_ready(&mut self) -> io::Result<()> {
        writeln!(self.out, "Data successfully downloaded and sorted.")
    }

    pub fn matches(&mut self, date: NaiveDate, domains: &[String]) -> io::Result<()> {
        writeln!(self.out, "Domains available on {}:", date)?;
        writeln!(self.out, "{}", domains.join("\n"))
    }

    pub fn no_matches(&mut self, date: NaiveDate) -> io::Result<()> {
        writeln!(self.out, "No domains available on {}.", date)
    }

    pub fn analysis_started(&mut self) -> io::Result<()> {
        writeln!(self.out, "Analyzing domains with ChatGPT...")
    }

    /// Print the advisory text framed by separator lines
    pub fn analysis(&mut self, domains: &[String], analysis: &str) -> io::Result<()> {
        if domains.is_empty() {
            return writeln!(self.out, "No domains available for analysis.");
        }

        let separator = "-".repeat(SEPARATOR_WIDTH);
        writeln!(self.out)?;
        writeln!(self.out, "ChatGPT Analysis and Recommendations:")?;
        writeln!(self.out, "{}", separator)?;
        writeln!(self.out, "{}", analysis)?;
        writeln!(self.out, "{}", separator)?;
        writeln!(
            self.out,
            "Analysis complete. Use the insights to evaluate domain potential."
        )
    }
}

/// Write the matched domains to `path`. Failures are logged, not returned.
pub fn save_matches(path: &Path, domains: &[String]) -> bool {
    match write_listing(path, OUTPUT_HEADER, domains) {
        Ok(()) => true,
        Err(e) => {
            error!("Error writing to file: {:#}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
    }

    fn output(presenter: Presenter<Vec<u8>>) -> String {
        String::from_utf8(presenter.into_inner()).unwrap()
    }

    #[test]
    fn test_matches_listing() {
        let mut presenter = Presenter::new(Vec::new());
        presenter
            .matches(date(), &["foo.se".to_string(), "abc.se".to_string()])
            .unwrap();

        assert_eq!(output(presenter), "Domains available on 2024-01-05:\nfoo.se\nabc.se\n");
    }

    #[test]
    fn test_no_matches() {
        let mut presenter = Presenter::new(Vec::new());
        presenter.no_matches(date()).unwrap();
        assert_eq!(output(presenter), "No domains available on 2024-01-05.\n");
    }

    #[test]
    fn test_analysis_is_framed() {
        let mut presenter = Presenter::new(Vec::new());
        presenter
            .analysis(&["foo.se".to_string()], "1. foo.se - keep it")
            .unwrap();

        let text = output(presenter);
        let separator = "-".repeat(50);
        assert!(text.contains(&format!("{}\n1. foo.se - keep it\n{}\n", separator, separator)));
        assert!(text.starts_with("\nChatGPT Analysis and Recommendations:\n"));
        assert!(text.ends_with("Analysis complete. Use the insights to evaluate domain potential.\n"));
    }

    #[test]
    fn test_analysis_without_domains() {
        let mut presenter = Presenter::new(Vec::new());
        presenter.analysis(&[], "ignored").unwrap();
        assert_eq!(output(presenter), "No domains available for analysis.\n");
    }

    #[test]
    fn test_save_matches_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("available_domains_2024-01-05.txt");

        assert!(save_matches(&path, &["foo.se".to_string(), "abc.se".to_string()]));

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "domain\nfoo.se\nabc.se\n");
    }

    #[test]
    fn test_save_matches_failure_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        assert!(!save_matches(temp_dir.path(), &["foo.se".to_string()]));
    }
}
