use super::{CapturedOutput, Event, ExecutionResult, IpcMessage};
use crate::config::RunSettings;
use crate::slow::{KeySource, KeySubscription, SlowRunMachine, is_cancel_key};
use crate::status::RunStatus;
use crate::timing::{Phase, TimingRecord};
use console::style;
use crossbeam_channel::{Receiver, select};
use std::time::Instant;

enum Step {
    Event(Option<Event>),
    Key(Option<String>),
    Deadline,
}

/// Collect events from one run until it finishes or the user cancels it
///
/// `classified` runs rely on their own slow warning; the others get a fallback
/// deadline after `settings.slow_threshold`. `on_cancel` must stop the
/// computation, the relay returns right after calling it.
pub fn relay(
    events: Receiver<Event>,
    settings: &RunSettings,
    classified: bool,
    keys: &dyn KeySource,
    mut on_cancel: impl FnMut(),
) -> ExecutionResult {
    let mut timing = TimingRecord::new();
    timing.mark(Phase::Start);
    let mut output = CapturedOutput::default();
    let mut answers = [None, None];
    let mut machine = SlowRunMachine::new();
    let mut subscription: Option<KeySubscription> = None;
    let mut deadline = (!classified).then(|| Instant::now() + settings.slow_threshold);
    let no_keys = crossbeam_channel::never::<String>();

    let status = loop {
        let fallback = deadline.map_or_else(crossbeam_channel::never, crossbeam_channel::at);
        let key_rx = subscription.as_ref().map_or(&no_keys, KeySubscription::receiver);
        let step = select! {
            recv(events) -> event => Step::Event(event.ok()),
            recv(key_rx) -> key => Step::Key(key.ok()),
            recv(fallback) -> _ => Step::Deadline,
        };

        match step {
            Step::Event(Some(Event::Ipc(message))) => match message {
                IpcMessage::Slow { message, level } => {
                    tracing::debug!(?level, "solution declared itself slow");
                    deadline = None;
                    warn_slow(&message);
                    if let Err(e) = machine.await_decision() {
                        tracing::debug!(error = %e, "ignoring repeated slow warning");
                    }
                    subscription.get_or_insert_with(|| keys.subscribe());
                }
                IpcMessage::Time { what } => timing.mark(what),
                IpcMessage::Result { part, value } => match answers.get_mut(usize::from(part).wrapping_sub(1)) {
                    Some(slot) => *slot = Some(value),
                    None => tracing::warn!(part, "result for an unknown part"),
                },
                IpcMessage::Message { message } => capture_stdout(&mut output, message, settings.debug),
            },
            Step::Event(Some(Event::Stdout(line))) => capture_stdout(&mut output, line, settings.debug),
            Step::Event(Some(Event::Stderr(line))) => output.stderr.push(line),
            Step::Event(Some(Event::Finished(outcome))) => {
                output.stderr.extend(outcome.error);
                let transition = match outcome.status {
                    RunStatus::Skipped => machine.skip(),
                    _ if machine.is_awaiting() => machine.complete(),
                    _ => Ok(()),
                };
                if let Err(e) = transition {
                    tracing::debug!(error = %e, "slow-run state left as is");
                }
                break outcome.status;
            }
            Step::Event(None) => {
                output
                    .errors
                    .push("Execution channel closed before the run finished".to_string());
                break RunStatus::Internal;
            }
            Step::Key(Some(line)) if is_cancel_key(&line) => {
                on_cancel();
                if let Err(e) = machine.cancel() {
                    tracing::debug!(error = %e, "cancel outside the slow-run prompt");
                }
                output.errors.push("Cancelled by User".to_string());
                break RunStatus::Cancelled;
            }
            Step::Key(Some(line)) => tracing::trace!(%line, "ignoring key"),
            Step::Key(None) => subscription = None,
            Step::Deadline => {
                deadline = None;
                warn_slow(&format!(
                    "Attention: still running after {}s",
                    settings.slow_threshold.as_secs_f64()
                ));
                if let Err(e) = machine.await_decision() {
                    tracing::debug!(error = %e, "fallback deadline after slow warning");
                }
                subscription.get_or_insert_with(|| keys.subscribe());
            }
        }
    };

    timing.mark(Phase::End);
    drop(subscription);
    tracing::debug!(?status, state = ?machine.state(), "run finished");

    ExecutionResult {
        status,
        output,
        answers,
        timing,
    }
}

/// Debug runs echo solution output as it arrives
fn capture_stdout(output: &mut CapturedOutput, line: String, echo: bool) {
    if echo {
        println!("{line}");
    }
    output.stdout.push(line);
}

fn warn_slow(message: &str) {
    println!("{}", style(message).red());
    println!("{}", style("To interrupt this press c!").yellow());
}
