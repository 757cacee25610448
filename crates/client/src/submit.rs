//! Debounced auto-submit of the search box to the search API
//!
//! A query is submitted once typing pauses, and only when it is empty or at
//! least `min_len` characters long. Each submitted search takes the next
//! sequence number; a response is delivered only while its search is still
//! the latest one issued, so a slow response can never overwrite a newer one.

use crate::search::CatalogSearch;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;
use vitrine_common::{DebounceState, Debouncer, Product, SearchParams, VitrineConfig};
use vitrine_page::QueryListener;

/// Hands out sequence numbers and tells whether one is still the newest
#[derive(Debug, Default)]
pub struct SequenceGate {
    latest: AtomicU64,
}

impl SequenceGate {
    pub fn issue(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, seq: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == seq
    }
}

/// Delivered search result
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub seq: u64,
    pub query: String,
    pub products: Vec<Product>,
}

pub fn should_submit(query: &str, min_len: usize) -> bool {
    let len = query.chars().count();
    len == 0 || len >= min_len
}

pub struct AutoSubmit {
    search: CatalogSearch,
    debouncer: Debouncer,
    enabled: bool,
    min_len: usize,
    gate: Arc<SequenceGate>,
    submitted: Arc<AtomicU64>,
    idle: watch::Sender<bool>,
    results: watch::Sender<Option<SearchOutcome>>,
}

impl AutoSubmit {
    pub fn new(search: CatalogSearch, delay: Duration, min_len: usize) -> Self {
        let (results, _) = watch::channel(None);
        let (idle, _) = watch::channel(true);
        Self {
            search,
            debouncer: Debouncer::new(delay),
            enabled: true,
            min_len,
            gate: Arc::new(SequenceGate::default()),
            submitted: Arc::new(AtomicU64::new(0)),
            idle,
            results,
        }
    }

    /// Debounce and minimum length from the config; submits nothing unless `api.auto_submit` is set
    pub fn from_config(search: CatalogSearch, config: &VitrineConfig) -> Self {
        let mut submitter = Self::new(search, config.filter.debounce(), config.api.min_query_len);
        submitter.enabled = config.api.auto_submit;
        submitter
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Re-arm the submit timer for `query`. Must be called inside a tokio runtime.
    pub fn submit(&self, query: &str) {
        if !self.enabled {
            return;
        }

        let generation = self.submitted.fetch_add(1, Ordering::SeqCst) + 1;
        self.idle.send_replace(false);

        let query = query.to_string();
        let min_len = self.min_len;
        let search = self.search.clone();
        let gate = Arc::clone(&self.gate);
        let results = self.results.clone();
        let submitted = Arc::clone(&self.submitted);
        let idle = self.idle.clone();

        self.debouncer.schedule(async move {
            deliver(&search, &gate, &results, query, min_len).await;
            if submitted.load(Ordering::SeqCst) == generation {
                idle.send_replace(true);
            }
        });
    }

    /// Receives every delivered result
    pub fn subscribe(&self) -> watch::Receiver<Option<SearchOutcome>> {
        self.results.subscribe()
    }

    pub fn state(&self) -> DebounceState {
        self.debouncer.state()
    }

    /// Wait until the latest submit has run, including its search request
    pub async fn settle(&self) {
        let mut idle = self.idle.subscribe();
        let _ = idle.wait_for(|idle| *idle).await;
    }

    pub fn cancel(&self) -> bool {
        let cancelled = self.debouncer.cancel();
        if cancelled {
            self.idle.send_replace(true);
        }
        cancelled
    }
}

async fn deliver(
    search: &CatalogSearch,
    gate: &SequenceGate,
    results: &watch::Sender<Option<SearchOutcome>>,
    query: String,
    min_len: usize,
) {
    if !should_submit(&query, min_len) {
        debug!("Query {:?} below {} characters, not submitting", query, min_len);
        return;
    }

    let seq = gate.issue();
    let params = if query.is_empty() {
        SearchParams::default()
    } else {
        SearchParams::query(&query)
    };
    let products = search.search_products(&params).await;

    if !gate.is_current(seq) {
        debug!("Dropping stale response #{} for {:?}", seq, query);
        return;
    }
    results.send_replace(Some(SearchOutcome {
        seq,
        query,
        products,
    }));
}

impl QueryListener for AutoSubmit {
    fn query_changed(&self, query: &str) {
        self.submit(query);
    }
}
