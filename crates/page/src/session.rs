//! Debounced filter session
//!
//! Wires an input control to a [`LiveFilter`]. Keystrokes call
//! [`FilterSession::schedule_filter`]; the filter runs once the input has been
//! quiet for the debounce delay, always with the latest query.

use crate::live::{FilterResult, LiveFilter};
use crate::view::RecordView;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use vitrine_common::{DebounceState, Debouncer};

/// A completed filter run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedFilter {
    pub query: String,
    pub result: FilterResult,
}

pub struct FilterSession<R> {
    filter: Arc<Mutex<LiveFilter<R>>>,
    debouncer: Debouncer,
    applied: watch::Sender<Option<AppliedFilter>>,
}

impl<R> FilterSession<R>
where
    R: RecordView + Send + 'static,
{
    pub fn new(filter: LiveFilter<R>, delay: Duration) -> Self {
        let (applied, _) = watch::channel(None);
        Self {
            filter: Arc::new(Mutex::new(filter)),
            debouncer: Debouncer::new(delay),
            applied,
        }
    }

    /// Re-arm the timer for `query`. Must be called inside a tokio runtime.
    pub fn schedule_filter(&self, query: &str) {
        let query = query.to_string();
        let filter = Arc::clone(&self.filter);
        let applied = self.applied.clone();

        self.debouncer.schedule(async move {
            let result = filter.lock().apply(&query);
            applied.send_replace(Some(AppliedFilter { query, result }));
        });
    }

    /// Run immediately, dropping any pending run
    pub fn apply_now(&self, query: &str) -> FilterResult {
        self.debouncer.cancel();
        let result = self.filter.lock().apply(query);
        self.applied.send_replace(Some(AppliedFilter {
            query: query.to_string(),
            result: result.clone(),
        }));
        result
    }

    /// Receives every completed run
    pub fn subscribe(&self) -> watch::Receiver<Option<AppliedFilter>> {
        self.applied.subscribe()
    }

    pub fn state(&self) -> DebounceState {
        self.debouncer.state()
    }

    pub fn delay(&self) -> Duration {
        self.debouncer.delay()
    }

    /// Drop a pending run. Returns whether one was pending.
    pub fn cancel(&self) -> bool {
        self.debouncer.cancel()
    }

    /// Inspect the records under the session lock
    pub fn with_filter<T>(&self, f: impl FnOnce(&LiveFilter<R>) -> T) -> T {
        f(&self.filter.lock())
    }

    /// Cancel pending work and hand the records back
    pub fn close(self) -> Vec<R> {
        self.debouncer.cancel();
        let records = self.filter.lock().take_records();
        records
    }
}
