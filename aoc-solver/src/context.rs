//! Per-call context handed to solve functions

use crate::error::SolveError;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Whether a solve call runs against a sample fixture or the real input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Test,
    Real,
}

/// Shared flag used to cooperatively interrupt a running solution
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Context passed to every [`PartSolver::solve`](crate::PartSolver::solve) call
///
/// Anything a solution wants to print goes through [`SolveContext::println`]
/// and is buffered, so harness output is never interleaved with solution
/// output. A context built [`with_live_output`](SolveContext::with_live_output)
/// hands each line over as soon as it is written instead. Long-running
/// solutions should call [`SolveContext::check_cancelled`] between steps.
pub struct SolveContext<'a> {
    mode: RunMode,
    mute: bool,
    cancel: CancelToken,
    output: Vec<String>,
    live: Option<&'a mut dyn FnMut(String)>,
}

impl fmt::Debug for SolveContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolveContext")
            .field("mode", &self.mode)
            .field("mute", &self.mute)
            .field("cancel", &self.cancel)
            .field("output", &self.output)
            .field("live", &self.live.is_some())
            .finish()
    }
}

impl<'a> SolveContext<'a> {
    pub fn new(mode: RunMode, mute: bool, cancel: CancelToken) -> Self {
        Self {
            mode,
            mute,
            cancel,
            output: Vec::new(),
            live: None,
        }
    }

    /// Context for a sample fixture run
    pub fn for_test(mute: bool) -> Self {
        Self::new(RunMode::Test, mute, CancelToken::new())
    }

    /// Forward every printed line to `forward` right away; nothing is buffered
    pub fn with_live_output(mut self, forward: &'a mut dyn FnMut(String)) -> Self {
        self.live = Some(forward);
        self
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    pub fn is_test(&self) -> bool {
        self.mode == RunMode::Test
    }

    pub fn is_mute(&self) -> bool {
        self.mute
    }

    /// Record one line of solution output (dropped when muted)
    pub fn println(&mut self, line: impl fmt::Display) {
        if self.mute {
            return;
        }
        match self.live.as_mut() {
            Some(forward) => forward(line.to_string()),
            None => self.output.push(line.to_string()),
        }
    }

    /// Returns `Err(SolveError::Cancelled)` once the run has been cancelled
    pub fn check_cancelled(&self) -> Result<(), SolveError> {
        if self.cancel.is_cancelled() {
            Err(SolveError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Take the buffered output, leaving the buffer empty
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }
}
