//! aoc: discover, test, run and time Advent of Code solutions

mod banner;
mod channel;
mod cli;
mod config;
mod discovery;
mod error;
mod orchestrator;
mod output;
mod slow;
mod status;
mod timing;
mod worker;

#[cfg(test)]
mod test_support;

// Import aoc-solutions to link the solution plugins
use aoc_solutions as _;

use aoc_solver::SolutionRegistryBuilder;
use channel::{InProcessChannel, SubprocessChannel};
use clap::Parser;
use cli::Args;
use config::{Config, RunSettings};
use console::style;
use orchestrator::{Orchestrator, Selection};
use slow::StdinKeys;
use status::HARNESS_FATAL;
use std::path::Path;
use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

fn main() {
    let (argv, dropped) = cli::normalize_args(std::env::args_os());
    let args = Args::parse_from(argv);
    init_tracing(args.debug || config::debug_from_env());
    for flag in &dropped {
        tracing::debug!(%flag, "ignoring unrecognized flag");
    }

    if args.format {
        banner::print_tree();
        return;
    }

    if let Some(day) = args.worker {
        let settings = RunSettings::from_args(&args);
        let dir = args.worker_dir.as_deref().unwrap_or(Path::new("."));
        let code = match build_registry(&[]) {
            Ok(registry) => worker::run(day, dir, &registry, &settings),
            Err(e) => {
                eprintln!("{e}");
                status::RunStatus::Internal.code()
            }
        };
        std::process::exit(code);
    }

    match run(args) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}", style(format!("Error: {e}")).red());
            std::process::exit(HARNESS_FATAL);
        }
    }
}

/// Logs go to stderr so a worker's stdout stays a clean message stream
fn init_tracing(debug: bool) {
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        let level = if debug { LevelFilter::DEBUG } else { LevelFilter::WARN };
        let filter = EnvFilter::builder()
            .with_default_directive(level.into())
            .from_env_lossy();
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}

fn run(args: Args) -> Result<i32, error::CliError> {
    let config = Config::from_args(args)?;
    tracing::debug!(
        selection = ?config.selection,
        dir = %config.solutions_dir.display(),
        settings = ?config.settings,
        "resolved configuration"
    );

    ctrlc::set_handler(|| {
        println!("\n{}", style("Everything was cancelled by User").red());
        std::process::exit(0);
    })?;

    let registry = build_registry(&config.tags)?;
    if !config.settings.mute {
        println!("{}", style("Loading Available Solutions...").magenta());
    }
    let descriptors = discovery::discover(&config.solutions_dir, &registry)?;
    if descriptors.is_empty() {
        return Err(error::CliError::NoSolutions(config.solutions_dir));
    }

    let index = match config.selection {
        Some(index) => index,
        None => config::prompt_selection(&descriptors)?,
    };
    let selection = Selection::from_index(index, descriptors.len())?;

    let keys = StdinKeys::global();
    let summary = if config.isolate {
        let channel = SubprocessChannel::current_exe(config.settings, keys)?;
        Orchestrator::new(channel, config.settings, &descriptors).run(selection)?
    } else {
        let channel = InProcessChannel::new(config.settings, keys);
        Orchestrator::new(channel, config.settings, &descriptors).run(selection)?
    };
    Ok(summary.exit_code)
}

/// Build registry with tag filtering
fn build_registry(tags: &[String]) -> Result<aoc_solver::SolutionRegistry, error::CliError> {
    let builder = SolutionRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solution_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}
