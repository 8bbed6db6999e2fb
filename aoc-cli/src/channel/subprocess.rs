use super::{Event, ExecutionChannel, ExecutionResult, Outcome, parse_line, relay};
use crate::config::RunSettings;
use crate::discovery::SolutionDescriptor;
use crate::error::CliError;
use crate::slow::KeySource;
use crate::status::RunStatus;
use crossbeam_channel::{Sender, unbounded};
use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Runs each solution in a worker process of this same binary
///
/// The worker writes one JSON message per stdout line and reports its
/// status through the exit code. Cancelling kills and reaps the worker.
pub struct SubprocessChannel<'a> {
    program: PathBuf,
    settings: RunSettings,
    keys: &'a dyn KeySource,
}

impl<'a> SubprocessChannel<'a> {
    pub fn new(program: PathBuf, settings: RunSettings, keys: &'a dyn KeySource) -> Self {
        Self {
            program,
            settings,
            keys,
        }
    }

    /// Workers re-execute the running binary
    pub fn current_exe(settings: RunSettings, keys: &'a dyn KeySource) -> Result<Self, CliError> {
        Ok(Self::new(std::env::current_exe()?, settings, keys))
    }

    fn command(&self, descriptor: &SolutionDescriptor) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg("--worker")
            .arg(descriptor.day.to_string())
            .arg("--worker-dir")
            .arg(&descriptor.dir)
            .args(self.settings.worker_flags())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }
}

fn lock(child: &Mutex<Child>) -> MutexGuard<'_, Child> {
    child.lock().unwrap_or_else(PoisonError::into_inner)
}

fn spawn_reader<R, F>(stream: Option<R>, events: Sender<Event>, to_event: F) -> Option<JoinHandle<()>>
where
    R: Read + Send + 'static,
    F: Fn(String) -> Option<Event> + Send + 'static,
{
    let stream = stream?;
    Some(thread::spawn(move || {
        for line in BufReader::new(stream).lines() {
            let Ok(line) = line else { break };
            if let Some(event) = to_event(line)
                && events.send(event).is_err()
            {
                break;
            }
        }
    }))
}

impl ExecutionChannel for SubprocessChannel<'_> {
    fn execute(&self, descriptor: &SolutionDescriptor) -> ExecutionResult {
        let mut child = match self.command(descriptor).spawn() {
            Ok(child) => child,
            Err(e) => {
                return ExecutionResult::launch_failure(format!(
                    "failed to launch worker '{}': {e}",
                    self.program.display()
                ));
            }
        };
        tracing::debug!(pid = child.id(), day = descriptor.day, "worker started");

        let (tx, rx) = unbounded();
        let readers: Vec<JoinHandle<()>> = [
            spawn_reader(child.stdout.take(), tx.clone(), |line| parse_line(&line)),
            spawn_reader(child.stderr.take(), tx.clone(), |line| Some(Event::Stderr(line))),
        ]
        .into_iter()
        .flatten()
        .collect();

        let child = Arc::new(Mutex::new(child));
        let waited = Arc::clone(&child);
        thread::spawn(move || {
            for reader in readers {
                let _ = reader.join();
            }
            let exit = loop {
                let polled = lock(&waited).try_wait();
                match polled {
                    Ok(Some(status)) => break Ok(status),
                    Ok(None) => thread::sleep(POLL_INTERVAL),
                    Err(e) => break Err(e),
                }
            };
            let outcome = match exit {
                Ok(status) => match status.code() {
                    Some(code) => Outcome::new(RunStatus::from_code(code)),
                    None => Outcome::failed(RunStatus::Internal, "worker terminated by a signal"),
                },
                Err(e) => Outcome::failed(RunStatus::Internal, format!("failed to wait for worker: {e}")),
            };
            let _ = tx.send(Event::Finished(outcome));
        });

        let classified = descriptor.solution.options().slowness.is_some();
        relay(rx, &self.settings, classified, self.keys, || {
            let mut child = lock(&child);
            if let Err(e) = child.kill() {
                tracing::debug!(error = %e, "worker already gone");
            }
            match child.wait() {
                Ok(status) => tracing::debug!(%status, "worker reaped"),
                Err(e) => tracing::warn!(error = %e, "failed to reap worker"),
            }
        })
    }
}
