//! Value/unit extraction for alert node descriptions.
//!
//! CCMS reports measured values as free text such as `95 %`, `12,5 ms` or
//! `1200`. Status-only nodes carry plain text such as `Running`.

/// A number read from the start of a description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

/// Result of [`parse_value_unit`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValueUnit {
    pub value: Option<Number>,
    /// The unit following the number, possibly empty. When no number was
    /// found this is the unchanged input text.
    pub unit: String,
}

impl ValueUnit {
    fn text(text: &str) -> Self {
        Self {
            value: None,
            unit: text.to_string(),
        }
    }

    /// True when a number was read, i.e. the unit is not the whole text.
    pub fn is_numeric(&self, text: &str) -> bool {
        self.value.is_some() && self.unit != text
    }
}

/// Split a description into a leading number and its unit.
///
/// The number is an optionally signed decimal with `.` or `,` as decimal
/// separator. It must be followed by the end of the text, whitespace or a
/// symbol, so `95 %`, `95%` and `7` are numeric while `3rd party` is not.
/// If no number is found, or it does not fit a finite `f64`, the returned
/// unit equals `text`.
pub fn parse_value_unit(text: &str) -> ValueUnit {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == int_start {
        return ValueUnit::text(text);
    }

    let mut fractional = false;
    if end < bytes.len() && matches!(bytes[end], b'.' | b',') {
        let mut probe = end + 1;
        while probe < bytes.len() && bytes[probe].is_ascii_digit() {
            probe += 1;
        }
        if probe > end + 1 {
            fractional = true;
            end = probe;
        }
    }

    let rest = &trimmed[end..];
    if rest.chars().next().is_some_and(char::is_alphanumeric) {
        return ValueUnit::text(text);
    }

    let number = trimmed[..end].replace(',', ".");
    let value = if fractional {
        number.parse::<f64>().ok().map(Number::Float)
    } else {
        number
            .parse::<i64>()
            .map(Number::Int)
            .or_else(|_| number.parse::<f64>().map(Number::Float))
            .ok()
    };
    // Digit runs too long for f64 parse to infinity, which line protocol
    // cannot carry.
    let value = value.filter(|v| must_float(*v).is_finite());

    match value {
        Some(value) => ValueUnit {
            value: Some(value),
            unit: rest.trim().to_string(),
        },
        None => ValueUnit::text(text),
    }
}

/// Widen a parsed number to `f64`.
pub fn must_float(value: Number) -> f64 {
    match value {
        Number::Int(v) => v as f64,
        Number::Float(v) => v,
    }
}
