//! Shared types for CLI command handlers.
//!
//! Commands return [`CliResult`] so `main` can translate failures into
//! stable process exit codes for scripts and CI.

use serde::Serialize;
use std::fmt;

/// Process exit codes used by the CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Command completed successfully
    Success = 0,
    /// Input was readable but failed validation
    ValidationFailed = 1,
    /// File could not be read, written, or parsed
    IoError = 2,
}

impl ExitCode {
    /// Raw exit code for `std::process::exit`.
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error type carried out of CLI command handlers.
#[derive(Debug)]
pub struct CliError {
    /// Human-readable message printed to stderr
    pub message: String,
    /// Exit code for the process
    pub exit_code: ExitCode,
}

impl CliError {
    /// I/O or parse failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::IoError,
        }
    }

    /// Validation failure (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::ValidationFailed,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI command handlers.
pub type CliResult<T> = Result<T, CliError>;

/// A single validation finding.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationMessage {
    /// `"error"` or `"warning"`
    pub severity: String,
    /// Finding text
    pub message: String,
}

/// JSON response body for `validate`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResponse {
    /// True when the snapshot loaded without structural errors
    pub valid: bool,
    /// Advisory and structural findings
    pub findings: Vec<ValidationMessage>,
}

/// Per-day circle counts for `inspect`.
#[derive(Debug, Clone, Serialize)]
pub struct DaySummary {
    /// Event day number (1-based)
    pub day: u8,
    /// ISO date of the day
    pub date: String,
    /// Number of circles placed on this day
    pub circles: usize,
}

/// JSON response body for `inspect`.
#[derive(Debug, Clone, Serialize)]
pub struct InspectResponse {
    /// Event display name
    pub event: String,
    /// Per-day summaries
    pub days: Vec<DaySummary>,
    /// Number of exhibition halls
    pub halls: usize,
    /// Number of venue maps
    pub maps: usize,
    /// Number of space blocks
    pub blocks: usize,
    /// Number of genres
    pub genres: usize,
    /// Total layout cells across all maps
    pub cells: usize,
    /// Total circles across all days
    pub circles: usize,
}

/// A single search hit for `search`.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    /// Circle identifier
    pub circle_id: u32,
    /// Circle name
    pub name: String,
    /// Author pen name
    pub penname: String,
    /// Event day number
    pub day: u8,
    /// Formatted space label, e.g. `A-42b`
    pub space: String,
    /// Genre name, empty when the genre id is unknown
    pub genre: String,
}

/// JSON response body for `search`.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    /// Query string as given
    pub query: String,
    /// Matching circles in catalog order
    pub hits: Vec<SearchHit>,
}
