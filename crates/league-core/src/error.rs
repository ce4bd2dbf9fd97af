//! Error types for league-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in league-core
#[derive(Debug, Error)]
pub enum Error {
    /// An operation referenced a team that is not in the table
    #[error("team '{0}' not found")]
    TeamNotFound(String),

    /// A team with this name already exists
    #[error("team '{0}' already exists")]
    DuplicateTeam(String),

    /// Name rejected by the character-class check
    #[error("invalid team name '{0}': only English letters and spaces are allowed")]
    InvalidName(String),

    /// Failed to read the standings file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the standings file
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the csv crate
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A line-scoped diagnostic produced while parsing a standings file
///
/// These are collected into a [`crate::codec::LoadReport`] and never
/// raised individually past the deserialization boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct LineError {
    /// 1-based line number in the source text
    pub line: u64,
    pub kind: LineErrorKind,
}

/// What went wrong on a single line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineErrorKind {
    /// Wrong number of comma-separated fields
    #[error("expected 5 fields, found {found}")]
    FieldCount { found: usize },

    /// A tally field did not parse as a non-negative integer
    #[error("invalid number in {field} field: '{value}'")]
    NumericParse { field: &'static str, value: String },

    /// The reconstructed team failed structural validation
    #[error("{reason}")]
    Validation { reason: String },

    /// The name already appeared earlier in the same load
    #[error("duplicate team name '{name}'")]
    DuplicateName { name: String },
}
