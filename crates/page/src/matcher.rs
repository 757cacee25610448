//! Query matching

use crate::view::RecordFields;

/// A free-text filter query, lower-cased once up front
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    raw: String,
    needle: String,
}

impl Query {
    pub fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            needle: raw.to_lowercase(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Title, description, category or any single tag contains the query,
    /// ignoring case. The empty query matches everything.
    pub fn matches<R: RecordFields + ?Sized>(&self, record: &R) -> bool {
        if self.is_empty() {
            return true;
        }

        [record.title(), record.description(), record.category()]
            .into_iter()
            .any(|field| contains_lower(field.unwrap_or(""), &self.needle))
            || record
                .tags()
                .into_iter()
                .any(|tag| contains_lower(tag, &self.needle))
    }
}

impl From<&str> for Query {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

fn contains_lower(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Convenience form of [`Query::matches`]
pub fn matches<R: RecordFields + ?Sized>(record: &R, query: &str) -> bool {
    Query::new(query).matches(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_common::Record;

    #[test]
    fn test_empty_query_matches_blank_record() {
        assert!(matches(&Record::default(), ""));
    }

    #[test]
    fn test_each_field_participates() {
        let record = Record::titled("Red Mug")
            .with_description("Holds coffee")
            .with_category("Kitchen")
            .with_tags(&["ceramic", "gift"]);

        assert!(matches(&record, "mug"));
        assert!(matches(&record, "COFFEE"));
        assert!(matches(&record, "kitch"));
        assert!(matches(&record, "Gift"));
        assert!(!matches(&record, "pen"));
    }

    #[test]
    fn test_query_does_not_span_tags() {
        let record = Record::titled("Pen").with_tags(&["office", "blue"]);
        assert!(!matches(&record, "office blue"));
    }

    #[test]
    fn test_case_insensitive_both_ways() {
        let record = Record::titled("widget pro");
        assert_eq!(matches(&record, "WIDGET"), matches(&record, "widget"));
        assert!(matches(&Record::titled("ÉCLAIR"), "éclair"));
    }

    /// A rendered card with only its tag list filled in
    struct TagsOnly;

    impl RecordFields for TagsOnly {
        fn title(&self) -> Option<&str> {
            None
        }

        fn description(&self) -> Option<&str> {
            None
        }

        fn category(&self) -> Option<&str> {
            None
        }

        fn tags(&self) -> Vec<&str> {
            vec!["office"]
        }
    }

    #[test]
    fn test_missing_fields_read_as_empty() {
        assert!(matches(&TagsOnly, "office"));
        assert!(matches(&TagsOnly, "OFF"));
        assert!(!matches(&TagsOnly, "x"));
        assert!(matches(&TagsOnly, ""));
    }
}
