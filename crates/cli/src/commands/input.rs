//! Page input helpers

use anyhow::Result;
use tracing::debug;

use crate::output::{print_line, print_names, OutputFormat};
use vitrine_page::{format_price, normalize_tags, split_tags};

/// Format a price field the way the page does on blur. Unparseable input is echoed back.
pub fn price(value: &str, format: OutputFormat) -> Result<()> {
    let formatted = match format_price(value) {
        Ok(formatted) => formatted,
        Err(e) => {
            debug!("Leaving {:?} unchanged: {}", value, e);
            value.to_string()
        }
    };
    print_line(&formatted, format);
    Ok(())
}

/// Normalise a tags field the way the page does on input
pub fn tags(value: &str, split: bool, format: OutputFormat) -> Result<()> {
    let normalized = normalize_tags(value);
    if split {
        print_names(&split_tags(&normalized), format);
    } else {
        print_line(&normalized, format);
    }
    Ok(())
}
