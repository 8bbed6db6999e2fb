use super::{Event, EventSink, ExecutionChannel, ExecutionResult, IpcMessage, Outcome, relay, run_solution};
use crate::config::RunSettings;
use crate::discovery::SolutionDescriptor;
use crate::slow::KeySource;
use crate::status::RunStatus;
use aoc_solver::CancelToken;
use crossbeam_channel::{Sender, unbounded};
use std::any::Any;
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::OnceLock;
use std::thread;

/// Runs solutions on a dedicated thread of the host process
///
/// Cancelling flips the solution's cancel token and returns at once; a
/// solution that never checks the token keeps its thread until it finishes.
pub struct InProcessChannel<'a> {
    settings: RunSettings,
    keys: &'a dyn KeySource,
}

impl<'a> InProcessChannel<'a> {
    pub fn new(settings: RunSettings, keys: &'a dyn KeySource) -> Self {
        Self { settings, keys }
    }
}

struct ChannelSink(Sender<Event>);

impl EventSink for ChannelSink {
    fn emit(&mut self, message: IpcMessage) {
        if self.0.send(Event::Ipc(message)).is_err() {
            tracing::trace!("host stopped listening");
        }
    }
}

thread_local! {
    static PANIC_ROUTE: RefCell<Option<Sender<Event>>> = const { RefCell::new(None) };
}

/// Install the process-wide panic hook once
///
/// Panics on a thread holding a [`PanicRoute`] land in that run's stderr,
/// every other panic goes to the hook that was in place before.
fn install_panic_router() {
    static INSTALLED: OnceLock<()> = OnceLock::new();
    INSTALLED.get_or_init(|| {
        let fallback = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let routed = PANIC_ROUTE
                .try_with(|route| match route.borrow().as_ref() {
                    Some(events) => events.send(Event::Stderr(info.to_string())).is_ok(),
                    None => false,
                })
                .unwrap_or(false);
            if !routed {
                fallback(info);
            }
        }));
    });
}

/// Sends panics of the current thread to one run until dropped
struct PanicRoute;

impl PanicRoute {
    fn set(events: Sender<Event>) -> Self {
        install_panic_router();
        PANIC_ROUTE.with(|route| *route.borrow_mut() = Some(events));
        PanicRoute
    }
}

impl Drop for PanicRoute {
    fn drop(&mut self) {
        PANIC_ROUTE.with(|route| route.borrow_mut().take());
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string());
    format!("Solution panicked: {detail}")
}

impl ExecutionChannel for InProcessChannel<'_> {
    fn execute(&self, descriptor: &SolutionDescriptor) -> ExecutionResult {
        let (tx, rx) = unbounded();
        let cancel = CancelToken::new();
        let solution = descriptor.solution;
        let dir = descriptor.dir.clone();
        let settings = self.settings;
        let token = cancel.clone();

        let spawned = thread::Builder::new()
            .name(format!("day-{:02}", descriptor.day))
            .spawn(move || {
                let route = PanicRoute::set(tx.clone());
                let mut sink = ChannelSink(tx.clone());
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                    run_solution(solution, &dir, &settings, &token, &mut sink)
                }))
                .unwrap_or_else(|payload| {
                    Outcome::failed(RunStatus::Internal, panic_message(payload.as_ref()))
                });
                drop(route);
                let _ = tx.send(Event::Finished(outcome));
            });
        if let Err(e) = spawned {
            return ExecutionResult::launch_failure(format!("failed to start solution thread: {e}"));
        }

        let classified = descriptor.solution.options().slowness.is_some();
        relay(rx, &self.settings, classified, self.keys, || cancel.cancel())
    }
}
