//! Live filter
//!
//! Keeps a rendered list of records in sync with a free-text query. Each run
//! is a pure function of the record text and the query: running it twice with
//! the same inputs leaves every record in the same state and reports the same
//! count.

use crate::matcher::Query;
use crate::view::{DisplayState, RecordFields, RecordView, ResultCounter};
use serde::Serialize;
use tracing::debug;

/// Outcome of one filter run, in record order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FilterResult {
    pub visible: Vec<bool>,
    pub visible_count: usize,
}

impl FilterResult {
    fn from_flags(visible: Vec<bool>) -> Self {
        let visible_count = visible.iter().filter(|v| **v).count();
        Self {
            visible,
            visible_count,
        }
    }

    pub fn total(&self) -> usize {
        self.visible.len()
    }

    pub fn hidden_count(&self) -> usize {
        self.total() - self.visible_count
    }
}

/// Which records match, without touching them
pub fn evaluate<R: RecordFields>(query: &str, records: &[R]) -> FilterResult {
    let query = Query::new(query);
    FilterResult::from_flags(records.iter().map(|r| query.matches(r)).collect())
}

/// Match every record and write its display state
pub fn apply_filter<R: RecordView>(query: &str, records: &mut [R]) -> FilterResult {
    let query = Query::new(query);
    let visible = records
        .iter_mut()
        .map(|record| {
            let matched = query.matches(&*record);
            record.set_display(DisplayState::for_match(matched));
            matched
        })
        .collect();
    FilterResult::from_flags(visible)
}

/// The rendered records plus the optional result counter next to them
pub struct LiveFilter<R> {
    records: Vec<R>,
    counter: Option<Box<dyn ResultCounter>>,
    query: String,
}

impl<R: RecordView> LiveFilter<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records,
            counter: None,
            query: String::new(),
        }
    }

    pub fn with_counter(mut self, counter: impl ResultCounter + 'static) -> Self {
        self.counter = Some(Box::new(counter));
        self
    }

    /// Run the filter for `query` and refresh the counter
    pub fn apply(&mut self, query: &str) -> FilterResult {
        let result = apply_filter(query, &mut self.records);
        if let Some(counter) = &self.counter {
            counter.update(result.visible_count);
        }
        self.query = query.to_string();
        debug!(
            "Filter {:?}: {}/{} visible",
            query,
            result.visible_count,
            result.total()
        );
        result
    }

    /// Query of the last run
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn visible_records(&self) -> impl Iterator<Item = &R> {
        self.records.iter().filter(|r| r.display().is_visible())
    }

    /// Hand the records back, leaving the filter empty
    pub fn take_records(&mut self) -> Vec<R> {
        std::mem::take(&mut self.records)
    }
}

impl<R> std::fmt::Debug for LiveFilter<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveFilter")
            .field("records", &self.records.len())
            .field("query", &self.query)
            .field("has_counter", &self.counter.is_some())
            .finish()
    }
}
