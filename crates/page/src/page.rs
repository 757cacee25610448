//! Page setup and teardown
//!
//! [`PageController::setup`] takes the interactive elements of a rendered
//! catalog page and the collaborators they need, and returns a controller
//! whose methods are the event handlers. [`PageController::dispose`] cancels
//! pending timers and hands the elements back.

use crate::form::{confirm_click, Button, Confirmer, Form, SubmitOutcome};
use crate::input::{format_price, normalize_tags, TextInput};
use crate::layout::{EntryAnimation, TextArea};
use crate::live::{FilterResult, LiveFilter};
use crate::session::FilterSession;
use crate::view::{CatalogCard, CounterLabel};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use vitrine_common::{Notifier, Severity};

/// Receives every change of the search input, e.g. to submit it to the API
pub trait QueryListener: Send + Sync {
    fn query_changed(&self, query: &str);
}

/// The interactive parts of a rendered catalog page
#[derive(Debug, Clone, Default)]
pub struct PageElements {
    pub cards: Vec<CatalogCard>,
    pub counter: Option<CounterLabel>,
    pub search: Option<TextInput>,
    pub forms: Vec<Form>,
    pub price_inputs: Vec<TextInput>,
    pub tag_inputs: Vec<TextInput>,
    pub buttons: Vec<Button>,
    pub textareas: Vec<TextArea>,
}

/// Collaborators injected into the page
pub struct PageDeps {
    pub notifier: Arc<dyn Notifier>,
    pub confirmer: Arc<dyn Confirmer>,
    pub query_listener: Option<Arc<dyn QueryListener>>,
    pub debounce: Duration,
}

impl PageDeps {
    pub fn new(notifier: Arc<dyn Notifier>, confirmer: Arc<dyn Confirmer>) -> Self {
        Self {
            notifier,
            confirmer,
            query_listener: None,
            debounce: Duration::from_millis(500),
        }
    }

    pub fn with_query_listener(mut self, listener: Arc<dyn QueryListener>) -> Self {
        self.query_listener = Some(listener);
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

pub struct PageController {
    session: FilterSession<CatalogCard>,
    counter: Option<CounterLabel>,
    search: Option<TextInput>,
    forms: Vec<Form>,
    price_inputs: Vec<TextInput>,
    tag_inputs: Vec<TextInput>,
    buttons: Vec<Button>,
    textareas: Vec<TextArea>,
    deps: PageDeps,
}

impl PageController {
    /// Stagger the card entry animations and wire the live filter
    pub fn setup(elements: PageElements, deps: PageDeps) -> Self {
        let PageElements {
            mut cards,
            counter,
            search,
            forms,
            price_inputs,
            tag_inputs,
            buttons,
            textareas,
        } = elements;

        for (index, card) in cards.iter_mut().enumerate() {
            card.set_animation(EntryAnimation::for_index(index));
        }

        let mut filter = LiveFilter::new(cards);
        if let Some(counter) = &counter {
            filter = filter.with_counter(counter.clone());
        }

        info!(
            "Page wired: {} cards, {} forms, search {}",
            filter.records().len(),
            forms.len(),
            if search.is_some() { "on" } else { "off" }
        );

        Self {
            session: FilterSession::new(filter, deps.debounce),
            counter,
            search,
            forms,
            price_inputs,
            tag_inputs,
            buttons,
            textareas,
            deps,
        }
    }

    /// Search input changed. Must be called inside a tokio runtime.
    pub fn search_input(&mut self, value: &str) {
        let Some(search) = self.search.as_mut() else {
            debug!("No search input on this page");
            return;
        };
        search.value = value.to_string();
        self.session.schedule_filter(value);
        if let Some(listener) = &self.deps.query_listener {
            listener.query_changed(value);
        }
    }

    pub fn session(&self) -> &FilterSession<CatalogCard> {
        &self.session
    }

    /// Filter immediately without waiting for the debounce
    pub fn filter_now(&self, query: &str) -> FilterResult {
        self.session.apply_now(query)
    }

    /// Price field lost focus: reformat it, or leave it alone if it is not a number
    pub fn price_blurred(&mut self, index: usize) -> Option<&str> {
        let input = self.price_inputs.get_mut(index)?;
        match format_price(&input.value) {
            Ok(formatted) => input.value = formatted,
            Err(e) => debug!("Leaving price field unchanged: {}", e),
        }
        Some(&input.value)
    }

    pub fn tags_input(&mut self, index: usize, value: &str) -> Option<&str> {
        let input = self.tag_inputs.get_mut(index)?;
        input.value = normalize_tags(value);
        Some(&input.value)
    }

    pub fn textarea_input(&mut self, index: usize, value: &str) -> Option<u32> {
        let area = self.textareas.get_mut(index)?;
        area.input(value);
        Some(area.height_px())
    }

    /// Submit of form `index`; blocked when a field is invalid
    pub fn form_submitted(&mut self, index: usize) -> Option<SubmitOutcome> {
        let form = self.forms.get_mut(index)?;
        Some(form.submit())
    }

    /// Click on button `index`; false cancels the submission
    pub fn button_clicked(&self, index: usize) -> bool {
        match self.buttons.get(index) {
            Some(button) => confirm_click(button, self.deps.confirmer.as_ref()),
            None => true,
        }
    }

    /// Show a toast through the injected notifier
    pub fn toast(&self, message: &str, severity: Severity) {
        self.deps.notifier.notify(message, severity);
    }

    pub fn form_mut(&mut self, index: usize) -> Option<&mut Form> {
        self.forms.get_mut(index)
    }

    pub fn price_input(&self, index: usize) -> Option<&TextInput> {
        self.price_inputs.get(index)
    }

    /// Cancel pending work and hand the elements back
    pub fn dispose(self) -> PageElements {
        let cards = self.session.close();
        debug!("Page disposed");
        PageElements {
            cards,
            counter: self.counter,
            search: self.search,
            forms: self.forms,
            price_inputs: self.price_inputs,
            tag_inputs: self.tag_inputs,
            buttons: self.buttons,
            textareas: self.textareas,
        }
    }
}
