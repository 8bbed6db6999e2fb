//! Execution channels: run one solution and relay its progress to the host
//!
//! Both channels share the solution-side [`run_solution`] and the host-side
//! [`relay`] loop. They differ only in how events travel between the two: a
//! crossbeam channel for [`InProcessChannel`], JSON lines over a child's
//! stdout for [`SubprocessChannel`].

mod in_process;
mod relay;
mod runner;
mod subprocess;

pub use in_process::InProcessChannel;
pub use relay::relay;
pub use runner::run_solution;
pub use subprocess::SubprocessChannel;

use crate::discovery::SolutionDescriptor;
use crate::status::RunStatus;
use crate::timing::{Phase, TimingRecord};
use aoc_solver::{Answer, Slowness};
use serde::{Deserialize, Serialize};

/// One progress message from a running solution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum IpcMessage {
    Slow { message: String, level: Slowness },
    Time { what: Phase },
    Result { part: u8, value: Answer },
    Message { message: String },
}

/// Everything the relay loop can receive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Ipc(IpcMessage),
    Stdout(String),
    Stderr(String),
    Finished(Outcome),
}

/// How the solution side ended, with an optional error text for stderr
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub status: RunStatus,
    pub error: Option<String>,
}

impl Outcome {
    pub fn new(status: RunStatus) -> Self {
        Self {
            status,
            error: None,
        }
    }

    pub fn success() -> Self {
        Self::new(RunStatus::Success)
    }

    pub fn failed(status: RunStatus, error: impl Into<String>) -> Self {
        Self {
            status,
            error: Some(error.into()),
        }
    }
}

/// Captured text of a run: answers and messages, raw stderr, harness notes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
    pub errors: Vec<String>,
}

/// Terminal outcome of one run
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub status: RunStatus,
    pub output: CapturedOutput,
    pub answers: [Option<Answer>; 2],
    pub timing: TimingRecord,
}

impl ExecutionResult {
    /// The run never started
    pub fn launch_failure(error: impl Into<String>) -> Self {
        let mut timing = TimingRecord::new();
        timing.mark(Phase::Start);
        timing.mark(Phase::End);
        Self {
            status: RunStatus::Internal,
            output: CapturedOutput {
                errors: vec![error.into()],
                ..CapturedOutput::default()
            },
            answers: [None, None],
            timing,
        }
    }
}

pub trait ExecutionChannel {
    fn execute(&self, descriptor: &SolutionDescriptor) -> ExecutionResult;
}

/// Where [`run_solution`] sends its progress
pub trait EventSink {
    fn emit(&mut self, message: IpcMessage);
}

/// Interpret one line of worker stdout
///
/// JSON objects are IPC messages, anything else is plain output. An object
/// with an unrecognized `type` is logged and dropped.
pub fn parse_line(line: &str) -> Option<Event> {
    let value = match serde_json::from_str::<serde_json::Value>(line) {
        Ok(value @ serde_json::Value::Object(_)) => value,
        _ => return Some(Event::Stdout(line.to_string())),
    };
    let kind = value
        .get("type")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("<missing>")
        .to_string();
    match serde_json::from_value::<IpcMessage>(value) {
        Ok(message) => Some(Event::Ipc(message)),
        Err(e) => {
            tracing::warn!(kind, error = %e, "Not recognized IPC message, ignoring");
            None
        }
    }
}
