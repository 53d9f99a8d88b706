//! Present-weather groups: `-RA`, `+TSRA`, `VCSH`, `FZFG`, `REDZ`, `BR`
//!
//! Codes are looked up in the shared code table, so a group decodes only when
//! every two-letter chunk is a known descriptor or phenomenon.

use super::Parsed;
use crate::app::models::{Intensity, WeatherCode, WeatherPhenomenon};
use crate::constants::{AMBIGUOUS_BARE_CODES, CodeFamily, weather_family};

/// Longest code body after prefixes: a descriptor and three phenomena
const MAX_CODE_CHARS: usize = 8;

/// Descriptors that may stand alone (`TS`, `VCSH`)
const STANDALONE_DESCRIPTORS: &[&str] = &["TS", "SH"];

/// Decode one present-weather token
pub fn parse_token(token: &str) -> Option<WeatherPhenomenon> {
    let mut rest = token;

    let recent = rest.len() > 2 && rest.starts_with("RE") && !rest.starts_with("RERE");
    if recent {
        rest = &rest[2..];
    }

    let intensity = if let Some(r) = rest.strip_prefix('+') {
        rest = r;
        Intensity::Heavy
    } else if let Some(r) = rest.strip_prefix('-') {
        rest = r;
        Intensity::Light
    } else if let Some(r) = rest.strip_prefix("VC") {
        rest = r;
        Intensity::Vicinity
    } else {
        Intensity::Moderate
    };

    if rest.is_empty()
        || rest.len() % 2 != 0
        || rest.len() > MAX_CODE_CHARS
        || !rest.bytes().all(|b| b.is_ascii_uppercase())
    {
        return None;
    }

    let mut descriptor = None;
    let mut phenomena = Vec::new();
    for (index, start) in (0..rest.len()).step_by(2).enumerate() {
        let code = &rest[start..start + 2];
        let family = weather_family(code)?;
        let weather_code = WeatherCode {
            code: code.to_string(),
            family,
        };
        match family {
            CodeFamily::Descriptor if index == 0 => descriptor = Some(weather_code),
            f if f.is_phenomenon() => phenomena.push(weather_code),
            _ => return None,
        }
    }

    if phenomena.is_empty() {
        let standalone = descriptor
            .as_ref()
            .is_some_and(|d| STANDALONE_DESCRIPTORS.contains(&d.code.as_str()));
        if !standalone {
            return None;
        }
    }

    Some(WeatherPhenomenon {
        intensity,
        recent,
        descriptor,
        phenomena,
        raw: token.to_string(),
    })
}

/// Whether a group is a bare code that also reads as an ordinary word
pub fn is_ambiguous_bare(phenomenon: &WeatherPhenomenon) -> bool {
    phenomenon.intensity == Intensity::Moderate
        && !phenomenon.recent
        && phenomenon.descriptor.is_none()
        && phenomenon.phenomena.len() == 1
        && AMBIGUOUS_BARE_CODES.contains(&phenomenon.phenomena[0].code.as_str())
}

/// Find every weather group in free text at or after `from`
///
/// Words are taken between whitespace with trailing punctuation removed.
/// Bare ambiguous codes are skipped.
pub fn find_all(text: &str, from: usize) -> Vec<Parsed<WeatherPhenomenon>> {
    let Some(haystack) = text.get(from..) else {
        return Vec::new();
    };
    words_with_offsets(haystack)
        .filter_map(|(offset, word)| {
            let word = word.trim_end_matches([',', '.', ';']);
            let value = parse_token(word)?;
            if is_ambiguous_bare(&value) {
                return None;
            }
            let start = from + offset;
            Some(Parsed::new(value, start, start + word.len()))
        })
        .collect()
}

/// Whitespace-separated words with their byte offsets
fn words_with_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split(' ')
        .scan(0usize, |offset, word| {
            let start = *offset;
            *offset += word.len() + 1;
            Some((start, word))
        })
        .filter(|(_, word)| !word.is_empty())
}
