//! Error types for the solver library

use crate::solver::Part;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for parsing input data
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// Input format doesn't match expected structure
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    /// Required data is missing from input
    #[error("Missing data: {0}")]
    MissingData(String),
    /// Other parsing errors
    #[error("Parse error: {0}")]
    Other(String),
}

/// Error type for solving a specific part
#[derive(Debug, Error)]
pub enum SolveError {
    /// The input parsed fine but has no answer
    #[error("Unsolvable input: {0}")]
    Unsolvable(String),
    /// The run was cancelled while the solver checked its context
    #[error("Cancelled by User")]
    Cancelled,
    /// An error occurred while solving the part
    #[error("Solve failed: {0}")]
    SolveFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SolveError {
    /// Wrap any error as a solve failure
    pub fn failed<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::SolveFailed(err.into())
    }
}

/// Error type for running one part of a solution
#[derive(Debug, Error)]
pub enum SolverError {
    /// Error occurred during parsing
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),
    /// Error occurred during solving
    #[error("Solve error: {0}")]
    SolveError(#[from] SolveError),
}

impl SolverError {
    /// Whether this error is the cancellation sentinel
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SolverError::SolveError(SolveError::Cancelled))
    }
}

/// Error type for loading raw input files
#[derive(Debug, Error)]
pub enum InputError {
    /// The input file does not exist
    #[error("No such file: '{}'", path.display())]
    NotFound { path: PathBuf },
    /// The input file exists but could not be read
    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Malformed fixture declarations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixtureError {
    /// Number of named fixtures differs from number of expected results
    #[error("{part} declares {fixtures} fixture(s) but {expected} expected result(s)")]
    CountMismatch {
        part: Part,
        fixtures: usize,
        expected: usize,
    },
    /// A part was declared without any expected result
    #[error("{part} declares no expected results")]
    Empty { part: Part },
}

/// Error type for registration failures
#[derive(Debug, Clone, Error)]
pub enum RegistrationError {
    /// Attempted to register a solution for a day that already has one
    #[error("Duplicate solution registration for day {0}")]
    DuplicateSolution(u8),
    /// Day outside of 1..=25
    #[error("Invalid day {0}, expected 1-25")]
    InvalidDay(u8),
}
