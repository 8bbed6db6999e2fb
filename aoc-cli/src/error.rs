//! Error types for the CLI

use std::path::PathBuf;
use thiserror::Error;

/// Harness-level failures; a single solution's failure is never one of these
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Registration error
    #[error("Registration error: {0}")]
    Registration(#[from] aoc_solver::RegistrationError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The solutions directory could not be scanned
    #[error("Failed to scan '{}': {source}", dir.display())]
    Discovery {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Nothing runnable was found
    #[error("No solutions found under '{}'", .0.display())]
    NoSolutions(PathBuf),

    /// Selection outside `0..=available`
    #[error("This number is not supported: {0}")]
    UnsupportedIndex(usize),

    /// Signal handler installation failed
    #[error("Failed to install Ctrl+C handler: {0}")]
    Ctrlc(#[from] ctrlc::Error),
}
