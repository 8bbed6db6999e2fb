//! Raw input tokenization

use crate::error::InputError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How a raw input file is split into tokens before parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputOptions {
    /// Token separator, usually a newline
    pub separator: String,
    /// Drop empty tokens (blank lines)
    pub filter_out_empty_lines: bool,
}

impl InputOptions {
    pub fn new(separator: impl Into<String>, filter_out_empty_lines: bool) -> Self {
        Self {
            separator: separator.into(),
            filter_out_empty_lines,
        }
    }

    /// Newline separated, keeping blank lines
    pub fn keep_empty_lines() -> Self {
        Self::new("\n", false)
    }
}

impl Default for InputOptions {
    fn default() -> Self {
        Self::new("\n", true)
    }
}

/// Split raw text into tokens according to `options`
///
/// Carriage returns are stripped from every token.
pub fn split_input(text: &str, options: &InputOptions) -> Vec<String> {
    let tokens: Box<dyn Iterator<Item = &str>> = if options.separator.is_empty() {
        Box::new(std::iter::once(text))
    } else {
        Box::new(text.split(options.separator.as_str()))
    };

    tokens
        .map(|token| token.replace('\r', ""))
        .filter(|token| !options.filter_out_empty_lines || !token.is_empty())
        .collect()
}

/// Read and tokenize an input file
pub fn load_input(path: &Path, options: &InputOptions) -> Result<Vec<String>, InputError> {
    if !path.exists() {
        return Err(InputError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "loaded input");
    Ok(split_input(&text, options))
}
