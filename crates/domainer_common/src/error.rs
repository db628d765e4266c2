//! Error types for Domainer.

use crate::fetch::FetchError;
use thiserror::Error;

/// Exit code for success
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for general errors
pub const EXIT_GENERAL_ERROR: i32 = 1;

/// Exit code for invalid command-line input (matches clap's usage errors)
pub const EXIT_USAGE: i32 = 2;

/// Exit code when the feed holds no usable entries
pub const EXIT_NO_DATA: i32 = 65;

/// Exit code when the feed cannot be downloaded
pub const EXIT_DOWNLOAD_FAILED: i32 = 69;

/// Exit code for unreadable or invalid configuration
pub const EXIT_CONFIG: i32 = 78;

/// Conditions that end a run
#[derive(Error, Debug)]
pub enum DomainerError {
    #[error("Unable to download data: {0}")]
    Download(#[from] FetchError),

    #[error("No valid entries found.")]
    NoValidEntries,

    #[error("Invalid date format '{0}'. Use YYYY-MM-DD.")]
    InvalidDate(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DomainerError {
    pub fn exit_code(&self) -> i32 {
        match self {
            DomainerError::Download(_) => EXIT_DOWNLOAD_FAILED,
            DomainerError::NoValidEntries => EXIT_NO_DATA,
            DomainerError::InvalidDate(_) => EXIT_USAGE,
            DomainerError::Config(_) => EXIT_CONFIG,
            DomainerError::Io(_) => EXIT_GENERAL_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_non_zero() {
        let errors = [
            DomainerError::Download(FetchError::Transport("refused".to_string())),
            DomainerError::NoValidEntries,
            DomainerError::InvalidDate("2024-13-40".to_string()),
            DomainerError::Config("bad".to_string()),
            DomainerError::Io(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed")),
        ];

        for error in &errors {
            assert_ne!(error.exit_code(), EXIT_SUCCESS, "{}", error);
        }
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            DomainerError::InvalidDate("2024-13-40".to_string()).to_string(),
            "Invalid date format '2024-13-40'. Use YYYY-MM-DD."
        );
        assert_eq!(
            DomainerError::Download(FetchError::Timeout(60)).to_string(),
            "Unable to download data: Request timeout after 60 seconds"
        );
    }
}
