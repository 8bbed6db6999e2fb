use super::{EventSink, IpcMessage, Outcome};
use crate::config::RunSettings;
use crate::status::RunStatus;
use crate::timing::Phase;
use aoc_solver::{
    CancelToken, DynSolution, GateError, Part, RunMode, SolveContext, TestGate, load_input,
};
use std::path::Path;

/// Real puzzle input, read from the solution's data folder
pub const INPUT_FILE: &str = "input.txt";

/// Drive one solution from test gate to both answers
///
/// Every failure ends up in the returned [`Outcome`]; nothing from the
/// solution propagates past this function except a panic, which the caller
/// catches.
pub fn run_solution(
    solution: &dyn DynSolution,
    dir: &Path,
    settings: &RunSettings,
    cancel: &CancelToken,
    sink: &mut dyn EventSink,
) -> Outcome {
    sink.emit(IpcMessage::Time { what: Phase::Start });
    let options = solution.options();

    if !settings.skip_tests {
        match TestGate::new(dir).mute(settings.mute).run(solution) {
            Ok(report) => {
                tracing::debug!(passed = report.passed, "sample fixtures passed");
                for message in report.output {
                    sink.emit(IpcMessage::Message { message });
                }
            }
            Err(GateError::Failed(failure)) => {
                return Outcome::failed(RunStatus::TestFailed, failure.to_string());
            }
            Err(e) => return Outcome::failed(RunStatus::Internal, configuration_error(e)),
        }
        sink.emit(IpcMessage::Time { what: Phase::Tests });
    }

    if let Some(level) = options.slowness {
        if settings.auto_skip_slow {
            sink.emit(IpcMessage::Message {
                message: "Auto Skipped Slow Solution".to_string(),
            });
            return Outcome::new(RunStatus::Skipped);
        }
        sink.emit(IpcMessage::Slow {
            message: level.warning().to_string(),
            level,
        });
    }

    let lines = match load_input(&dir.join(INPUT_FILE), &options.input) {
        Ok(lines) => lines,
        Err(e) => return Outcome::failed(RunStatus::Internal, configuration_error(e)),
    };

    for part in Part::ALL {
        let mut forward = |message: String| sink.emit(IpcMessage::Message { message });
        let mut ctx = SolveContext::new(RunMode::Real, settings.mute, cancel.clone());
        if settings.debug {
            ctx = ctx.with_live_output(&mut forward);
        }
        let result = solution.run_part(part, lines.clone(), &mut ctx);
        for message in ctx.take_output() {
            sink.emit(IpcMessage::Message { message });
        }
        match result {
            Ok(value) => {
                let message = format!("{part}: '{value}'");
                sink.emit(IpcMessage::Result {
                    part: part.number(),
                    value,
                });
                sink.emit(IpcMessage::Message { message });
                sink.emit(IpcMessage::Time {
                    what: Phase::for_part(part),
                });
            }
            Err(e) if e.is_cancelled() => {
                return Outcome::failed(RunStatus::Cancelled, e.to_string());
            }
            Err(e) => return Outcome::failed(RunStatus::Internal, format!("{part}: {e}")),
        }
    }

    Outcome::success()
}

/// Fixture and input problems keep exit code 68 but are labelled as configuration
fn configuration_error(e: impl std::fmt::Display) -> String {
    format!("Configuration error: {e}")
}
