//! Debounce timer
//!
//! Collapses a burst of triggers into a single delayed action. Every call to
//! [`Debouncer::schedule`] re-arms the timer and supersedes the action armed
//! before it; only the last action of a burst runs, once the input has been
//! quiet for the full delay.
//!
//! Must be used from inside a tokio runtime.

use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// Timer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    /// No timer armed
    Idle,
    /// Timer armed; the action runs when it expires unless re-armed
    Pending,
}

#[derive(Default)]
struct Slot {
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

/// Cancellable delayed action that is reset on every trigger
pub struct Debouncer {
    delay: Duration,
    slot: Arc<Mutex<Slot>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm the timer for `action`, superseding whatever was pending
    pub fn schedule<F>(&self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut slot = self.slot.lock();
        if let Some(previous) = slot.pending.take() {
            previous.abort();
            trace!("Superseded pending debounce timer");
        }
        slot.generation += 1;

        let generation = slot.generation;
        let delay = self.delay;
        let shared = Arc::clone(&self.slot);

        slot.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            {
                let mut slot = shared.lock();
                // Lost a race with a newer schedule() or cancel()
                if slot.generation != generation {
                    return;
                }
                slot.pending = None;
            }
            debug!("Debounce timer fired after {:?}", delay);
            action.await;
        }));
    }

    /// Drop the pending action, if any. Returns whether one was pending.
    pub fn cancel(&self) -> bool {
        let mut slot = self.slot.lock();
        slot.generation += 1;
        match slot.pending.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn state(&self) -> DebounceState {
        if self.slot.lock().pending.is_some() {
            DebounceState::Pending
        } else {
            DebounceState::Idle
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Debouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("state", &self.state())
            .finish()
    }
}
