//! Configuration resolution from CLI args

use crate::cli::Args;
use crate::discovery::SolutionDescriptor;
use crate::error::CliError;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Resolved runtime configuration
pub struct Config {
    /// `Some(0)` runs everything, `None` asks interactively
    pub selection: Option<usize>,
    /// Root holding the `Day NN` data folders
    pub solutions_dir: PathBuf,
    /// Tags to filter solutions
    pub tags: Vec<String>,
    /// Run each solution in a worker process
    pub isolate: bool,
    pub settings: RunSettings,
}

/// The part of the configuration every run needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSettings {
    pub skip_tests: bool,
    pub auto_skip_slow: bool,
    pub mute: bool,
    pub debug: bool,
    /// Fallback deadline for solutions without a slowness classification
    pub slow_threshold: Duration,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            skip_tests: false,
            auto_skip_slow: false,
            mute: false,
            debug: false,
            slow_threshold: Duration::from_secs(10),
        }
    }
}

impl RunSettings {
    pub fn from_args(args: &Args) -> Self {
        Self {
            skip_tests: args.no_tests,
            auto_skip_slow: args.auto_skip_slow,
            mute: args.mute,
            debug: args.debug || debug_from_env(),
            slow_threshold: Duration::from_secs(args.slow_threshold),
        }
    }

    /// Flags that reproduce these settings in a worker process
    pub fn worker_flags(&self) -> Vec<&'static str> {
        [
            (self.skip_tests, "--no-tests"),
            (self.auto_skip_slow, "--autoskipslow"),
            (self.mute, "--mute"),
            (self.debug, "--debug"),
        ]
        .into_iter()
        .filter_map(|(on, flag)| on.then_some(flag))
        .collect()
    }
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        if args.all && args.day.is_some_and(|day| day != 0) {
            return Err(CliError::Config(
                "--all cannot be combined with a day".to_string(),
            ));
        }
        let settings = RunSettings::from_args(&args);
        Ok(Config {
            selection: if args.all { Some(0) } else { args.day },
            solutions_dir: expand_tilde(&args.solutions_dir),
            tags: args.tags,
            isolate: args.isolate,
            settings,
        })
    }
}

/// Expand ~ to home directory
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str()
        && (path_str.starts_with("~/") || path_str == "~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path_str.trim_start_matches('~').trim_start_matches('/'));
    }
    path.to_path_buf()
}

/// `DEBUG` set to a truthy value turns debug mode on
pub fn debug_from_env() -> bool {
    std::env::var("DEBUG").is_ok_and(|value| is_truthy(&value))
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "enabled" | "enable"
    )
}

/// Ask which solution to run
pub fn prompt_selection(descriptors: &[SolutionDescriptor]) -> Result<usize, CliError> {
    let stdin = std::io::stdin();
    prompt_selection_from(&mut stdin.lock(), &mut std::io::stdout(), descriptors)
}

fn prompt_selection_from<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    descriptors: &[SolutionDescriptor],
) -> Result<usize, CliError> {
    writeln!(output, "{}", console::style("Select an Option:").green())?;
    writeln!(output, "0: Run all Available Solutions")?;
    for descriptor in descriptors {
        writeln!(
            output,
            "{}: Run the Solution of Day {:02}",
            descriptor.index, descriptor.day
        )?;
    }
    write!(output, "> ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(CliError::Config("No selection made".to_string()));
    }
    match line.trim() {
        "all" | "a" => Ok(0),
        choice => choice
            .parse()
            .map_err(|_| CliError::Config(format!("Invalid selection: '{choice}'"))),
    }
}
