//! Parameter value formatting and parsing.
//!
//! This module provides [`ValueFormat`] for converting between plain
//! parameter values and display strings. The built-in variants cover the
//! common "number plus unit suffix" forms; [`ValueFormat::Custom`] carries an
//! arbitrary conversion pair for parameters with their own text shape.
//!
//! # Example
//!
//! ```ignore
//! use tether_core::format::ValueFormat;
//!
//! let pct = ValueFormat::Integer { suffix: "%" };
//! assert_eq!(pct.format(30.0), "30%");
//! assert_eq!(pct.parse("30%"), Some(30.0));
//!
//! let secs = ValueFormat::Decimal { precision: 1, suffix: "s" };
//! assert_eq!(secs.format(2.5), "2.5s");
//! assert_eq!(secs.parse("2.5s"), Some(2.5));
//! ```

use std::fmt;

/// A custom value↔text conversion pair.
///
/// Both directions must agree so that text produced by `to_text` is accepted
/// by `from_text` for any value on the parameter's step grid.
pub struct CustomFormat {
    /// Render a plain value for display.
    pub to_text: Box<dyn Fn(f64) -> String + Send + Sync>,
    /// Parse display text back to a plain value. `None` signals an
    /// unparseable string; the caller keeps its stored value.
    pub from_text: Box<dyn Fn(&str) -> Option<f64> + Send + Sync>,
}

impl fmt::Debug for CustomFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomFormat")
    }
}

/// Parameter value formatter.
#[derive(Debug)]
pub enum ValueFormat {
    /// Fixed-precision decimal with a trailing suffix (e.g. "2.5s", "-6.3dB").
    Decimal {
        /// Number of decimal places.
        precision: usize,
        /// Unit suffix appended without a space.
        suffix: &'static str,
    },

    /// Integer-rounded value with a trailing suffix (e.g. "30%").
    Integer {
        /// Unit suffix appended without a space.
        suffix: &'static str,
    },

    /// Caller-supplied conversion pair.
    Custom(CustomFormat),
}

impl ValueFormat {
    /// Build a custom formatter from a conversion closure pair.
    pub fn custom(
        to_text: impl Fn(f64) -> String + Send + Sync + 'static,
        from_text: impl Fn(&str) -> Option<f64> + Send + Sync + 'static,
    ) -> Self {
        Self::Custom(CustomFormat {
            to_text: Box::new(to_text),
            from_text: Box::new(from_text),
        })
    }

    /// Format a plain value to a display string.
    pub fn format(&self, value: f64) -> String {
        match self {
            ValueFormat::Decimal { precision, suffix } => {
                format!("{:.prec$}{}", value, suffix, prec = *precision)
            }
            ValueFormat::Integer { suffix } => {
                format!("{}{}", value.round() as i64, suffix)
            }
            ValueFormat::Custom(custom) => (custom.to_text)(value),
        }
    }

    /// Parse a display string to a plain value.
    ///
    /// Returns `None` if the string cannot be parsed. Built-in variants
    /// accept the value with or without the suffix and tolerate surrounding
    /// whitespace. Non-finite results ("NaN", "inf") are rejected for every
    /// variant: no parameter range contains them.
    pub fn parse(&self, text: &str) -> Option<f64> {
        let text = text.trim();
        let value = match self {
            ValueFormat::Decimal { suffix, .. } | ValueFormat::Integer { suffix } => {
                let stripped = text
                    .strip_suffix(suffix)
                    .map(str::trim_end)
                    .unwrap_or(text);
                stripped.parse().ok()
            }
            ValueFormat::Custom(custom) => (custom.from_text)(text),
        };
        value.filter(|v| v.is_finite())
    }
}

impl Default for ValueFormat {
    fn default() -> Self {
        ValueFormat::Decimal {
            precision: 2,
            suffix: "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_round_trip() {
        let f = ValueFormat::Decimal {
            precision: 1,
            suffix: "s",
        };
        assert_eq!(f.format(2.5), "2.5s");
        assert_eq!(f.parse("2.5s"), Some(2.5));
        assert_eq!(f.parse("2.5"), Some(2.5));
        assert_eq!(f.parse(" 2.5s "), Some(2.5));
    }

    #[test]
    fn test_integer_round_trip() {
        let f = ValueFormat::Integer { suffix: "%" };
        assert_eq!(f.format(30.0), "30%");
        assert_eq!(f.format(29.6), "30%");
        assert_eq!(f.parse("30%"), Some(30.0));
        assert_eq!(f.parse("30"), Some(30.0));
    }

    #[test]
    fn test_unparseable_returns_none() {
        let f = ValueFormat::Integer { suffix: "%" };
        assert_eq!(f.parse("loud"), None);
        assert_eq!(f.parse("%"), None);
        assert_eq!(f.parse(""), None);
    }

    #[test]
    fn test_non_finite_parses_are_rejected() {
        let f = ValueFormat::Decimal {
            precision: 1,
            suffix: "dB",
        };
        assert_eq!(f.parse("NaN"), None);
        assert_eq!(f.parse("inf"), None);
        assert_eq!(f.parse("-inf"), None);

        let c = ValueFormat::custom(|v| v.to_string(), |s| s.parse().ok());
        assert_eq!(c.parse("NaN"), None);
    }

    #[test]
    fn test_custom_pair() {
        let f = ValueFormat::custom(
            |v| format!("{:.1}s", v),
            |s| s.strip_suffix('s').unwrap_or(s).parse().ok(),
        );
        assert_eq!(f.format(2.5), "2.5s");
        assert_eq!(f.parse("2.5s"), Some(2.5));
        assert_eq!(f.parse("junk"), None);
    }
}
