//! Text normalization ahead of pattern matching
//!
//! [`normalize`] upper-cases, collapses whitespace and expands the shorthand in
//! [`SHORTHAND_EXPANSIONS`] so the matchers see one canonical spelling.
//! [`canonicalize`] does only the first two steps and is what the fixed-grammar
//! METAR and TAF decoders use.

use crate::constants::SHORTHAND_EXPANSIONS;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

static SHORTHAND_RE: LazyLock<Regex> = LazyLock::new(|| {
    let mut keys: Vec<&str> = SHORTHAND_EXPANSIONS.iter().map(|(k, _)| *k).collect();
    // Longest first so `APCHS` wins over `APCH`
    keys.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    let alternation = keys
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{})\b", alternation)).expect("shorthand table builds a valid regex")
});

static SHORTHAND_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| SHORTHAND_EXPANSIONS.iter().copied().collect());

/// Upper-case and collapse whitespace runs to single spaces
pub fn canonicalize(text: &str) -> String {
    text.to_ascii_uppercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Canonicalize and expand shorthand
///
/// Idempotent: no expansion contains a shorthand key as a whole word.
pub fn normalize(text: &str) -> String {
    let canonical = canonicalize(text);
    SHORTHAND_RE
        .replace_all(&canonical, |caps: &Captures| {
            let key = &caps[0];
            SHORTHAND_MAP.get(key).copied().unwrap_or(key).to_string()
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize() {
        assert_eq!(canonicalize("  klax   251753z\n\t24015kt "), "KLAX 251753Z 24015KT");
        assert_eq!(canonicalize(""), "");
        assert_eq!(canonicalize(" \n\t "), "");
    }

    #[test]
    fn test_shorthand_expansion() {
        assert_eq!(
            normalize("ils apchs ry 24r and 25l in use"),
            "ILS APPROACHES RWY 24R AND 25L IN USE"
        );
        assert_eq!(
            normalize("TWY A CLSD BTN TWY F AND TWY A2"),
            "TAXIWAY A CLOSED BETWEEN TAXIWAY F AND TAXIWAY A2"
        );
        assert_eq!(normalize("RWY 6L PAPI OTS"), "RWY 6L PAPI OUT OF SERVICE");
        assert_eq!(normalize("VOR U/S."), "VOR UNSERVICEABLE.");
        assert_eq!(normalize("CTC GC ON 121.75"), "CONTACT GROUND CONTROL ON 121.75");
    }

    #[test]
    fn test_expansion_respects_word_boundaries() {
        // `APP` inside `APPROACH` and `RY` inside `PRY` stay untouched
        assert_eq!(normalize("VISUAL APPROACH PRY"), "VISUAL APPROACH PRY");
        assert_eq!(normalize("DEPARTURE"), "DEPARTURE");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "ARR INFO L 1953Z. SIMUL ILS APCHS RY 24R AND 25L. TWY B CLSD.",
            "hazd wx info avbl on hiwas. lndg and dep rwys 1l, 1r",
            "",
            "U/S OTS INOP NAV",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input: {}", input);
        }
    }
}
