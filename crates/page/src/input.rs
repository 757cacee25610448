//! Price and tag input helpers

use once_cell::sync::Lazy;
use regex::Regex;
use vitrine_common::{Error, Result};

static FLOAT_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").unwrap());

static SPACED_COMMA: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*,\s*").unwrap());

static EMPTY_ENTRY: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*,").unwrap());

/// A single-line input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    pub name: String,
    pub value: String,
}

impl TextInput {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// Parse the longest leading float, skipping leading whitespace
pub fn parse_float_prefix(value: &str) -> Result<f64> {
    let trimmed = value.trim_start();
    let prefix = FLOAT_PREFIX
        .find(trimmed)
        .ok_or_else(|| Error::Parse(format!("not a number: {:?}", value)))?;

    prefix
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| Error::Parse(format!("not a finite number: {:?}", value)))
}

/// Magnitude from which a price is written in exponent form instead of fixed digits
const EXPONENT_FROM: f64 = 1e21;

/// Render a price field with two decimals: `"9"` becomes `"9.00"`.
/// Values of 1e21 and above keep the shortest exponent form, e.g. `"1e+300"`.
pub fn format_price(value: &str) -> Result<String> {
    let mut price = parse_float_prefix(value)?;
    if price == 0.0 {
        price = 0.0; // no "-0.00"
    }
    if price.abs() >= EXPONENT_FROM {
        return Ok(format!("{:e}", price).replacen('e', "e+", 1));
    }
    Ok(format!("{:.2}", price))
}

/// Normalise comma spacing in a tag field: `"a,  b ,,c"` becomes `"a, b, c"`
pub fn normalize_tags(value: &str) -> String {
    let mut normalized = SPACED_COMMA.replace_all(value, ", ").into_owned();
    loop {
        let collapsed = EMPTY_ENTRY.replace_all(&normalized, ",").into_owned();
        if collapsed == normalized {
            return normalized;
        }
        normalized = collapsed;
    }
}

/// Split a tag field into the stored tag list
pub fn split_tags(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price("9").unwrap(), "9.00");
        assert_eq!(format_price("12.345").unwrap(), "12.35");
        assert_eq!(format_price("  7.5kg").unwrap(), "7.50");
        assert_eq!(format_price(".5").unwrap(), "0.50");
        assert_eq!(format_price("-0").unwrap(), "0.00");
        assert_eq!(format_price("1e2").unwrap(), "100.00");
        assert_eq!(format_price("3e").unwrap(), "3.00");
    }

    #[test]
    fn test_format_huge_price_uses_exponent() {
        assert_eq!(format_price("1e300").unwrap(), "1e+300");
        assert_eq!(format_price("1e21").unwrap(), "1e+21");
        assert_eq!(format_price("-2.5e22").unwrap(), "-2.5e+22");
        assert_eq!(format_price("999999999999999999999").unwrap(), "1e+21");
        assert_eq!(format_price("1e20").unwrap(), "100000000000000000000.00");
    }

    #[test]
    fn test_format_price_rejects_non_numbers() {
        for value in ["abc", "", "  ", "$5", "1e999"] {
            assert!(matches!(format_price(value), Err(Error::Parse(_))), "{value:?}");
        }
    }

    #[test]
    fn test_normalize_tags() {
        assert_eq!(normalize_tags("a,  b ,,c"), "a, b, c");
        assert_eq!(normalize_tags("a,,,b"), "a, b");
        assert_eq!(normalize_tags("audio"), "audio");
        assert_eq!(normalize_tags("audio,"), "audio, ");
    }

    #[test]
    fn test_normalize_tags_is_idempotent() {
        for value in ["a,  b ,,c", "x ,y", " , ,z", "one,two , three"] {
            let once = normalize_tags(value);
            assert_eq!(normalize_tags(&once), once);
        }
    }

    #[test]
    fn test_split_tags() {
        assert_eq!(split_tags("audio, wireless,, premium "), vec!["audio", "wireless", "premium"]);
        assert!(split_tags(" , ").is_empty());
    }
}
