//! Date attribute patterns.
//!
//! ARFF date attributes carry a pattern written with the familiar letter codes
//! (`yyyy-MM-dd'T'HH:mm:ss`). [`DatePattern`] translates such a pattern into a
//! `chrono` format string once, at header time, and then turns data values into
//! milliseconds since the Unix epoch, interpreted as UTC unless the pattern has a
//! zone field.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Pattern used when a date attribute does not declare one.
pub const DEFAULT_DATE_PATTERN: &str = "yyyy-MM-dd'T'HH:mm:ss";

/// A date pattern and its `chrono` translation.
///
/// # Examples
///
/// ```rust
/// use arff_instances::DatePattern;
///
/// let pattern = DatePattern::new("yyyy-MM-dd");
/// assert_eq!(pattern.chrono_format(), "%Y-%m-%d");
/// assert_eq!(pattern.parse_millis("1970-01-02"), Some(86_400_000.0));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePattern {
    pattern: String,
    format: String,
}

impl Default for DatePattern {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_PATTERN)
    }
}

impl DatePattern {
    #[must_use]
    pub fn new(pattern: &str) -> Self {
        DatePattern {
            pattern: pattern.to_string(),
            format: translate(pattern),
        }
    }

    /// The pattern as declared in the header.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn chrono_format(&self) -> &str {
        &self.format
    }

    /// Parses `text` into milliseconds since the epoch.
    ///
    /// Patterns without time fields are accepted and read as midnight.
    #[must_use]
    pub fn parse_millis(&self, text: &str) -> Option<f64> {
        if self.format.contains("%z") {
            return DateTime::parse_from_str(text, &self.format)
                .ok()
                .map(|dt| dt.timestamp_millis() as f64);
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, &self.format) {
            return Some(dt.and_utc().timestamp_millis() as f64);
        }
        NaiveDate::parse_from_str(text, &self.format)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc().timestamp_millis() as f64)
    }
}

fn translate(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let mut run = 1;
        while i + run < chars.len() && chars[i + run] == c {
            run += 1;
        }

        match c {
            '\'' => {
                // '' is a literal quote, otherwise copy up to the closing quote
                if run >= 2 {
                    out.push('\'');
                    i += 2;
                    continue;
                }
                i += 1;
                while i < chars.len() && chars[i] != '\'' {
                    push_literal(&mut out, chars[i]);
                    i += 1;
                }
                i += 1;
                continue;
            }
            'y' if run == 2 => out.push_str("%y"),
            'y' => out.push_str("%Y"),
            'M' if run >= 3 => out.push_str("%b"),
            'M' => out.push_str("%m"),
            'd' => out.push_str("%d"),
            'H' => out.push_str("%H"),
            'h' => out.push_str("%I"),
            'a' => out.push_str("%p"),
            'm' => out.push_str("%M"),
            's' => out.push_str("%S"),
            'S' => out.push_str("%3f"),
            'Z' | 'X' => out.push_str("%z"),
            other => {
                for _ in 0..run {
                    push_literal(&mut out, other);
                }
            }
        }
        i += run;
    }
    out
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}
