//! Vitrine Client Library
//!
//! Access to the catalog server's read endpoints (search, categories, tags),
//! the recovering facade the page uses, and the debounced auto-submit path.

pub mod backend;
pub mod search;
pub mod submit;

pub use backend::{CatalogBackend, HttpCatalog};
pub use search::CatalogSearch;
pub use submit::{AutoSubmit, SearchOutcome, SequenceGate};
