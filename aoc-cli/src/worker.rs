//! Hidden worker mode used by `--isolate`
//!
//! The host re-executes itself with `--worker <DAY>`; the worker runs that one
//! solution and writes its progress to stdout as JSON lines. Errors go to
//! stderr and the run status becomes the exit code.

use crate::channel::{EventSink, IpcMessage, run_solution};
use crate::config::RunSettings;
use crate::status::RunStatus;
use aoc_solver::{CancelToken, SolutionRegistry};
use std::io::Write;
use std::path::Path;

/// Writes each message as one JSON line and flushes it immediately
pub struct JsonLineSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLineSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> EventSink for JsonLineSink<W> {
    fn emit(&mut self, message: IpcMessage) {
        let line = match serde_json::to_string(&message) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, "failed to encode IPC message");
                return;
            }
        };
        if let Err(e) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            tracing::warn!(error = %e, "IPC stream closed");
        }
    }
}

/// Run `day` from `dir` and return the process exit code
pub fn run(day: u8, dir: &Path, registry: &SolutionRegistry, settings: &RunSettings) -> i32 {
    let Some(entry) = registry.get(day) else {
        eprintln!("No solution registered for day {day}");
        return RunStatus::Internal.code();
    };
    tracing::debug!(day, dir = %dir.display(), "worker starting");

    let mut sink = JsonLineSink::new(std::io::stdout().lock());
    let outcome = run_solution(entry.solution, dir, settings, &CancelToken::new(), &mut sink);
    if let Some(error) = &outcome.error {
        eprintln!("{error}");
    }
    outcome.status.code()
}
