//! CLI argument parsing using clap

use clap::{CommandFactory, Parser};
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::PathBuf;

/// Advent of Code solution runner
#[derive(Parser, Debug)]
#[command(
    name = "aoc",
    about = "Discover, test, run and time Advent of Code solutions",
    version
)]
pub struct Args {
    /// Solution to run: 0 runs all, 1.. picks one from the discovered list,
    /// omit to choose interactively
    pub day: Option<usize>,

    /// Run all available solutions
    #[arg(short, long)]
    pub all: bool,

    /// Skip the sample fixtures and go straight to the real input
    #[arg(short = 't', long = "no-tests")]
    pub no_tests: bool,

    /// Skip solutions that declare themselves slow
    #[arg(short = 's', long = "autoskipslow")]
    pub auto_skip_slow: bool,

    /// Suppress solution output and result printing
    #[arg(short, long)]
    pub mute: bool,

    /// Verbose logging, live output and a per-phase timing breakdown
    #[arg(short, long, visible_alias = "verbose", short_alias = 'v')]
    pub debug: bool,

    /// Print the banner and exit
    #[arg(short = 'f', long = "format", visible_alias = "tree")]
    pub format: bool,

    /// Directory holding one `Day NN` folder per puzzle
    #[arg(long, env = "AOC_SOLUTIONS_DIR", default_value = "data")]
    pub solutions_dir: PathBuf,

    /// Run each solution in its own worker process
    #[arg(long)]
    pub isolate: bool,

    /// Seconds before an unclassified solution gets the slow-run prompt
    #[arg(long, default_value_t = 10, value_name = "SECS")]
    pub slow_threshold: u64,

    /// Tags to filter solutions (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Run one day as a worker speaking JSON lines on stdout
    #[arg(long, hide = true, value_name = "DAY")]
    pub worker: Option<u8>,

    /// Data folder for the worker's day
    #[arg(long, hide = true, requires = "worker", value_name = "DIR")]
    pub worker_dir: Option<PathBuf>,
}

/// Rewrite raw argv into something clap accepts
///
/// `--<number>` becomes the positional day, `-?` becomes `--help`, and flags
/// clap does not know are removed. Returns the rewritten argv together with
/// the removed flags.
pub fn normalize_args<I>(raw: I) -> (Vec<OsString>, Vec<String>)
where
    I: IntoIterator<Item = OsString>,
{
    let command = Args::command();
    let mut longs: HashSet<String> = ["help", "version"].map(String::from).into();
    let mut shorts: HashSet<char> = ['h', 'V'].into();
    for arg in command.get_arguments() {
        longs.extend(arg.get_long().map(String::from));
        longs.extend(arg.get_all_aliases().unwrap_or_default().into_iter().map(String::from));
        shorts.extend(arg.get_short());
        shorts.extend(arg.get_all_short_aliases().unwrap_or_default());
    }

    let mut raw = raw.into_iter();
    let mut args: Vec<OsString> = raw.next().into_iter().collect();
    let mut dropped = Vec::new();

    while let Some(arg) = raw.next() {
        let Some(text) = arg.to_str() else {
            args.push(arg);
            continue;
        };
        if text == "--" {
            args.push(arg);
            args.extend(raw.by_ref());
            break;
        }
        if text == "-?" {
            args.push("--help".into());
        } else if let Some(flag) = text.strip_prefix("--") {
            let name = flag.split_once('=').map_or(flag, |(name, _)| name);
            if !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()) {
                args.push(name.into());
            } else if longs.contains(name) {
                args.push(arg);
            } else {
                dropped.push(text.to_string());
            }
        } else if let Some(cluster) = text.strip_prefix('-')
            && !cluster.is_empty()
        {
            if cluster.chars().all(|c| shorts.contains(&c)) {
                args.push(arg);
            } else {
                dropped.push(text.to_string());
            }
        } else {
            args.push(arg);
        }
    }

    (args, dropped)
}
