//! Slow-run interrupt protocol
//!
//! A run that is (or turns out to be) slow gets a warning and a
//! keypress-based cancel option while it keeps computing. [`SlowRunMachine`]
//! tracks where a run is in that protocol and [`KeySource`] hands out
//! cancel-key listeners that detach themselves when dropped.

use crossbeam_channel::{Receiver, Sender, unbounded};
use std::io::BufRead;
use std::sync::{Arc, Mutex, MutexGuard, Once, OnceLock, PoisonError};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SlowState {
    #[default]
    Normal,
    AwaitingDecision,
    Skipped,
    Cancelled,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("illegal slow-run transition from {from:?} to {to:?}")]
pub struct IllegalTransition {
    pub from: SlowState,
    pub to: SlowState,
}

#[derive(Debug, Default)]
pub struct SlowRunMachine {
    state: SlowState,
}

impl SlowRunMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SlowState {
        self.state
    }

    pub fn is_awaiting(&self) -> bool {
        self.state == SlowState::AwaitingDecision
    }

    /// Slow solution with auto-skip requested
    pub fn skip(&mut self) -> Result<(), IllegalTransition> {
        self.transition(SlowState::Skipped)
    }

    /// Warning shown, listening for the cancel key
    pub fn await_decision(&mut self) -> Result<(), IllegalTransition> {
        self.transition(SlowState::AwaitingDecision)
    }

    pub fn cancel(&mut self) -> Result<(), IllegalTransition> {
        self.transition(SlowState::Cancelled)
    }

    pub fn complete(&mut self) -> Result<(), IllegalTransition> {
        self.transition(SlowState::Completed)
    }

    fn transition(&mut self, to: SlowState) -> Result<(), IllegalTransition> {
        use SlowState::*;
        match (self.state, to) {
            (Normal, Skipped | AwaitingDecision) | (AwaitingDecision, Cancelled | Completed) => {
                tracing::debug!(from = ?self.state, ?to, "slow-run transition");
                self.state = to;
                Ok(())
            }
            (from, to) => Err(IllegalTransition { from, to }),
        }
    }
}

/// A line counts as the cancel key when it starts with `c`
pub fn is_cancel_key(line: &str) -> bool {
    line.starts_with('c')
}

/// Hands out key listeners; at most one is attached at a time
pub trait KeySource {
    fn subscribe(&self) -> KeySubscription;

    fn active_subscriptions(&self) -> usize;
}

#[derive(Default)]
struct Slot {
    next_id: u64,
    current: Option<(u64, Sender<String>)>,
}

/// Routes key lines to whichever subscriber is current
#[derive(Clone, Default)]
pub struct KeyHub {
    slot: Arc<Mutex<Slot>>,
}

impl KeyHub {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Deliver `line` to the current subscriber, `false` when nobody listens
    pub fn publish(&self, line: impl Into<String>) -> bool {
        match &self.lock().current {
            Some((_, sender)) => sender.send(line.into()).is_ok(),
            None => false,
        }
    }

    fn detach(&self, id: u64) {
        let mut slot = self.lock();
        if slot.current.as_ref().is_some_and(|(current, _)| *current == id) {
            slot.current = None;
        }
    }
}

impl KeySource for KeyHub {
    fn subscribe(&self) -> KeySubscription {
        let (sender, receiver) = unbounded();
        let mut slot = self.lock();
        let id = slot.next_id;
        slot.next_id += 1;
        slot.current = Some((id, sender));
        KeySubscription {
            id,
            receiver,
            hub: self.clone(),
        }
    }

    fn active_subscriptions(&self) -> usize {
        usize::from(self.lock().current.is_some())
    }
}

/// A live key listener; dropping it detaches from the source
pub struct KeySubscription {
    id: u64,
    receiver: Receiver<String>,
    hub: KeyHub,
}

impl KeySubscription {
    pub fn receiver(&self) -> &Receiver<String> {
        &self.receiver
    }
}

impl Drop for KeySubscription {
    fn drop(&mut self) {
        self.hub.detach(self.id);
    }
}

/// Process-wide key source reading lines from stdin
///
/// The reader thread starts on the first subscription and lives for the rest
/// of the process; lines typed while nobody listens are discarded.
pub struct StdinKeys {
    hub: KeyHub,
    reader: Once,
}

impl StdinKeys {
    pub fn global() -> &'static StdinKeys {
        static KEYS: OnceLock<StdinKeys> = OnceLock::new();
        KEYS.get_or_init(|| StdinKeys {
            hub: KeyHub::new(),
            reader: Once::new(),
        })
    }

    fn ensure_reader(&self) {
        self.reader.call_once(|| {
            let hub = self.hub.clone();
            let spawned = std::thread::Builder::new()
                .name("stdin-keys".into())
                .spawn(move || {
                    let stdin = std::io::stdin();
                    let mut line = String::new();
                    loop {
                        line.clear();
                        match stdin.lock().read_line(&mut line) {
                            Ok(0) | Err(_) => break,
                            Ok(_) => {
                                if !hub.publish(line.trim_end()) {
                                    tracing::trace!("key line without a listener");
                                }
                            }
                        }
                    }
                });
            if let Err(e) = spawned {
                tracing::warn!(error = %e, "failed to start the key reader, cancel key disabled");
            }
        });
    }
}

impl KeySource for StdinKeys {
    fn subscribe(&self) -> KeySubscription {
        self.ensure_reader();
        self.hub.subscribe()
    }

    fn active_subscriptions(&self) -> usize {
        self.hub.active_subscriptions()
    }
}
