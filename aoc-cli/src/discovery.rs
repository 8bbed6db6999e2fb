//! Scan the data directory for day folders backed by a registered solution

use crate::error::CliError;
use aoc_solver::{DynSolution, SolutionRegistry};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// One selectable unit of work
#[derive(Clone)]
pub struct SolutionDescriptor {
    /// 1-based position in the sorted list
    pub index: usize,
    pub day: u8,
    /// Folder holding `input.txt` and the sample fixtures
    pub dir: PathBuf,
    pub solution: &'static dyn DynSolution,
}

impl std::fmt::Debug for SolutionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolutionDescriptor")
            .field("index", &self.index)
            .field("day", &self.day)
            .field("dir", &self.dir)
            .finish_non_exhaustive()
    }
}

fn day_folder() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)^day[ _-]?(\d{2})$").expect("day folder pattern is valid"))
}

/// Day number encoded in a folder name such as `Day 04` or `day_04`
pub fn parse_day_folder(name: &str) -> Option<u8> {
    day_folder()
        .captures(name)
        .and_then(|captures| captures[1].parse().ok())
}

/// Recursively collect `(day, folder)` pairs under `dir`
fn walk(dir: &Path, found: &mut Vec<(u8, PathBuf)>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let path = entry.path();
        match entry.file_name().to_str().and_then(parse_day_folder) {
            Some(day) => found.push((day, path)),
            None => walk(&path, found)?,
        }
    }
    Ok(())
}

/// Discover every day folder under `root` that has a registered solution
///
/// The result is sorted by day and numbered from 1. Folders without a
/// matching registration are skipped; a day found twice keeps the first
/// folder in path order.
pub fn discover(
    root: &Path,
    registry: &SolutionRegistry,
) -> Result<Vec<SolutionDescriptor>, CliError> {
    let mut found = Vec::new();
    walk(root, &mut found).map_err(|source| CliError::Discovery {
        dir: root.to_path_buf(),
        source,
    })?;
    found.sort();

    let mut descriptors: Vec<SolutionDescriptor> = Vec::new();
    for (day, dir) in found {
        if let Some(previous) = descriptors.last()
            && previous.day == day
        {
            tracing::warn!(
                day,
                kept = %previous.dir.display(),
                ignored = %dir.display(),
                "duplicate day folder"
            );
            continue;
        }
        let Some(entry) = registry.get(day) else {
            tracing::debug!(day, dir = %dir.display(), "no registered solution, skipping");
            continue;
        };
        descriptors.push(SolutionDescriptor {
            index: descriptors.len() + 1,
            day,
            dir,
            solution: entry.solution,
        });
    }

    tracing::debug!(count = descriptors.len(), root = %root.display(), "discovered solutions");
    Ok(descriptors)
}
