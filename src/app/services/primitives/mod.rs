//! Primitive parsers shared by every report decoder
//!
//! Each primitive can be used two ways:
//! - token-wise (`parse_token`) by the fixed-grammar METAR and TAF decoders,
//!   which walk whitespace-separated groups in order
//! - by scanning (`find`) in free text, as the DATIS decoder does; a scan
//!   returns the decoded value together with the byte span it consumed
//!
//! None of the parsers can fail. Anything they do not recognize is "not
//! present" and stays available to the caller as raw text.
//!
//! ## Modules
//!
//! - [`wind`] - direction, speed, gusts and variable range
//! - [`visibility`] - statute-mile, metric and CAVOK visibility
//! - [`clouds`] - cloud layers, vertical visibility and clear-sky codes
//! - [`temperature`] - temperature/dewpoint pairs
//! - [`altimeter`] - inches-of-mercury and hectopascal settings
//! - [`weather`] - present-weather groups against the shared code table

pub mod altimeter;
pub mod clouds;
pub mod temperature;
pub mod visibility;
pub mod weather;
pub mod wind;

#[cfg(test)]
pub mod tests;

use std::ops::Range;

/// A value found in free text and the byte span it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub start: usize,
    pub end: usize,
}

impl<T> Parsed<T> {
    pub fn new(value: T, start: usize, end: usize) -> Self {
        Self { value, start, end }
    }

    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Parsed<U> {
        Parsed {
            value: f(self.value),
            start: self.start,
            end: self.end,
        }
    }
}

/// Parse a signed two-digit temperature such as `17` or `M05`
pub(crate) fn parse_signed_celsius(text: &str) -> Option<f64> {
    let (negative, digits) = match text.strip_prefix('M') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: f64 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}
