//! Card entry animation and textarea sizing

use std::time::Duration;

/// Stagger between consecutive cards
pub const ENTRY_STAGGER: Duration = Duration::from_millis(100);

/// Class added to cards that animate in
pub const FADE_IN_CLASS: &str = "fade-in";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryAnimation {
    pub class: &'static str,
    pub delay: Duration,
}

impl EntryAnimation {
    /// Animation for the card at `index` in render order
    pub fn for_index(index: usize) -> Self {
        Self {
            class: FADE_IN_CLASS,
            delay: ENTRY_STAGGER * index as u32,
        }
    }

    /// CSS `animation-delay` value, e.g. `0.3s`
    pub fn css_delay(&self) -> String {
        format!("{}s", self.delay.as_secs_f64())
    }
}

/// A multi-line text input that grows with its content
#[derive(Debug, Clone, PartialEq)]
pub struct TextArea {
    pub name: String,
    pub value: String,
    pub rows: usize,
    pub line_height_px: u32,
    pub padding_px: u32,
    height_px: u32,
}

impl TextArea {
    pub fn new(name: &str, rows: usize) -> Self {
        let mut area = Self {
            name: name.to_string(),
            value: String::new(),
            rows: rows.max(1),
            line_height_px: 24,
            padding_px: 12,
            height_px: 0,
        };
        area.height_px = area.content_height();
        area
    }

    pub fn height_px(&self) -> u32 {
        self.height_px
    }

    /// Height the content needs, never less than the declared rows
    pub fn content_height(&self) -> u32 {
        let lines = self.value.split('\n').count().max(self.rows);
        lines as u32 * self.line_height_px + self.padding_px
    }

    /// Replace the value and resize to fit
    pub fn input(&mut self, value: &str) {
        self.value = value.to_string();
        self.height_px = self.content_height();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_delays_stagger() {
        assert_eq!(EntryAnimation::for_index(0).delay, Duration::ZERO);
        assert_eq!(EntryAnimation::for_index(3).delay, Duration::from_millis(300));
        assert_eq!(EntryAnimation::for_index(3).css_delay(), "0.3s");
        assert_eq!(EntryAnimation::for_index(1).class, "fade-in");
    }

    #[test]
    fn test_textarea_grows_and_shrinks() {
        let mut area = TextArea::new("description", 3);
        let base = area.height_px();
        assert_eq!(base, 3 * 24 + 12);

        area.input("one\ntwo\nthree\nfour\nfive");
        assert_eq!(area.height_px(), 5 * 24 + 12);

        area.input("short");
        assert_eq!(area.height_px(), base);
    }
}
