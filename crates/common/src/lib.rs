//! Vitrine Common Library
//!
//! Shared types, configuration and infrastructure for the Vitrine catalog
//! page: the error type, catalog wire types, the debounce timer and the
//! notification surface.

pub mod config;
pub mod debounce;
pub mod error;
pub mod notify;
pub mod types;

// Re-export commonly used types
pub use config::VitrineConfig;
pub use debounce::{DebounceState, Debouncer};
pub use error::{Error, Result};
pub use notify::{Notifier, Toast, ToastBoard};
pub use types::*;

/// Vitrine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
