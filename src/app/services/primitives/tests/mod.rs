//! Tests for the primitive parsers
//!
//! Token-wise and scanning forms are tested side by side per primitive.

mod pressure_temperature_tests;
mod weather_tests;

/// Slice of `text` covered by a parsed span
pub fn spanned<T>(text: &str, parsed: &super::Parsed<T>) -> String {
    text[parsed.span()].to_string()
}
