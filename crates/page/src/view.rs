//! Record views
//!
//! The filter never owns markup. It reads text through [`RecordFields`] and
//! writes a [`DisplayState`] back through [`RecordView`]; whatever renders the
//! catalog implements those two traits.

use crate::layout::EntryAnimation;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use vitrine_common::{Product, Record};

/// Read access to the text a record exposes to the filter.
/// A field the view cannot supply is `None` and reads as empty.
pub trait RecordFields {
    fn title(&self) -> Option<&str>;
    fn description(&self) -> Option<&str>;
    fn category(&self) -> Option<&str>;
    fn tags(&self) -> Vec<&str>;
}

/// A rendered record whose visibility the filter controls
pub trait RecordView: RecordFields {
    fn display(&self) -> DisplayState;
    fn set_display(&mut self, state: DisplayState);
}

/// How a record is drawn after filtering.
///
/// Non-matching records stay in place at reduced opacity; nothing is removed
/// from the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayState {
    #[default]
    Shown,
    Dimmed,
}

impl DisplayState {
    pub fn for_match(matched: bool) -> Self {
        if matched {
            DisplayState::Shown
        } else {
            DisplayState::Dimmed
        }
    }

    pub fn is_visible(self) -> bool {
        self == DisplayState::Shown
    }

    pub fn opacity(self) -> f32 {
        match self {
            DisplayState::Shown => 1.0,
            DisplayState::Dimmed => 0.5,
        }
    }
}

impl std::fmt::Display for DisplayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayState::Shown => write!(f, "shown"),
            DisplayState::Dimmed => write!(f, "dimmed"),
        }
    }
}

impl RecordFields for Record {
    fn title(&self) -> Option<&str> {
        Some(&self.title)
    }

    fn description(&self) -> Option<&str> {
        Some(&self.description)
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }

    fn tags(&self) -> Vec<&str> {
        self.tags.iter().map(String::as_str).collect()
    }
}

impl RecordFields for Product {
    fn title(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn description(&self) -> Option<&str> {
        Some(&self.description)
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }

    fn tags(&self) -> Vec<&str> {
        self.tags.iter().map(String::as_str).collect()
    }
}

/// In-memory product card
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogCard {
    pub id: Option<u32>,
    pub record: Record,
    pub price: Option<f64>,
    display: DisplayState,
    animation: Option<EntryAnimation>,
}

impl CatalogCard {
    pub fn new(record: Record) -> Self {
        Self {
            record,
            ..Default::default()
        }
    }

    pub fn animation(&self) -> Option<&EntryAnimation> {
        self.animation.as_ref()
    }

    pub fn set_animation(&mut self, animation: EntryAnimation) {
        self.animation = Some(animation);
    }
}

impl From<&Product> for CatalogCard {
    fn from(product: &Product) -> Self {
        Self {
            id: Some(product.id),
            record: Record::from(product),
            price: Some(product.price),
            ..Default::default()
        }
    }
}

impl RecordFields for CatalogCard {
    fn title(&self) -> Option<&str> {
        self.record.title()
    }

    fn description(&self) -> Option<&str> {
        self.record.description()
    }

    fn category(&self) -> Option<&str> {
        self.record.category()
    }

    fn tags(&self) -> Vec<&str> {
        self.record.tags()
    }
}

impl RecordView for CatalogCard {
    fn display(&self) -> DisplayState {
        self.display
    }

    fn set_display(&mut self, state: DisplayState) {
        self.display = state;
    }
}

/// Sink for the number of visible records
pub trait ResultCounter: Send + Sync {
    fn update(&self, count: usize);
}

/// Text label showing the result count. Clones share the same label.
#[derive(Debug, Clone, Default)]
pub struct CounterLabel {
    text: Arc<Mutex<String>>,
}

impl CounterLabel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.text.lock().clone()
    }
}

impl ResultCounter for CounterLabel {
    fn update(&self, count: usize) {
        *self.text.lock() = counter_text(count);
    }
}

pub fn counter_text(count: usize) -> String {
    format!("Found {} product(s)", count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_state_opacity() {
        assert_eq!(DisplayState::for_match(true).opacity(), 1.0);
        assert_eq!(DisplayState::for_match(false).opacity(), 0.5);
        assert!(!DisplayState::Dimmed.is_visible());
    }

    #[test]
    fn test_counter_label_shared_between_clones() {
        let label = CounterLabel::new();
        let handle = label.clone();
        label.update(3);
        assert_eq!(handle.text(), "Found 3 product(s)");
    }

    #[test]
    fn test_card_from_product() {
        let product = Product::new(9, "Blue Pen", "Gel ink", 2.5, "Stationery", &["office"]);
        let card = CatalogCard::from(&product);
        assert_eq!(card.id, Some(9));
        assert_eq!(card.title(), Some("Blue Pen"));
        assert_eq!(card.tags(), vec!["office"]);
        assert_eq!(card.display(), DisplayState::Shown);
    }
}
