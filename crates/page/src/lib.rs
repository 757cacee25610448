//! Vitrine Page Library
//!
//! Client-side behaviour of the catalog page: the live filter that keeps the
//! rendered product cards in sync with the search box, its debounced trigger,
//! and the helpers wired to the page's inputs and forms.

pub mod form;
pub mod input;
pub mod layout;
pub mod live;
pub mod matcher;
pub mod page;
pub mod session;
pub mod view;

pub use form::{Button, Confirmer, Form, FormField, SubmitOutcome};
pub use input::{format_price, normalize_tags, split_tags, TextInput};
pub use layout::{EntryAnimation, TextArea};
pub use live::{apply_filter, evaluate, FilterResult, LiveFilter};
pub use matcher::{matches, Query};
pub use page::{PageController, PageDeps, PageElements, QueryListener};
pub use session::{AppliedFilter, FilterSession};
pub use view::{CatalogCard, CounterLabel, DisplayState, RecordFields, RecordView, ResultCounter};
