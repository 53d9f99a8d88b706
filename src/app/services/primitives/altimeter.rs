//! Altimeter settings: `A2992`, `Q1013`, `ALTIMETER 2992`, `QNH 1013`

use super::Parsed;
use crate::app::models::AltimeterInfo;
use regex::Regex;
use std::sync::LazyLock;

static ALTIMETER_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([AQ])(\d{4})$").expect("valid altimeter regex"));

static ALTIMETER_SCAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:([AQ])(\d{4})|(ALTIMETER|ALSTG|QNH) (\d{4}))\b")
        .expect("valid altimeter scan regex")
});

/// Decode one `A`/`Q` token
pub fn parse_token(token: &str) -> Option<AltimeterInfo> {
    let caps = ALTIMETER_TOKEN_RE.captures(token)?;
    from_groups(&caps[1], &caps[2])
}

/// Find altimeter settings at or after `from`
///
/// Inches and hectopascals are independent: the first setting of each unit
/// is kept, so a broadcast carrying both yields both. The span covers the
/// first setting found.
pub fn find(text: &str, from: usize) -> Option<Parsed<AltimeterInfo>> {
    let haystack = text.get(from..)?;
    let mut found: Option<Parsed<AltimeterInfo>> = None;

    for caps in ALTIMETER_SCAN_RE.captures_iter(haystack) {
        let Some(whole) = caps.get(0) else { continue };
        let setting = match (caps.get(1), caps.get(3)) {
            (Some(prefix), _) => from_groups(prefix.as_str(), &caps[2]),
            (None, Some(phrase)) => {
                let prefix = if phrase.as_str() == "QNH" { "Q" } else { "A" };
                from_groups(prefix, &caps[4])
            }
            (None, None) => None,
        };
        let Some(setting) = setting else { continue };

        match found.as_mut() {
            Some(parsed) => parsed.value.merge(setting),
            None => found = Some(Parsed::new(setting, from + whole.start(), from + whole.end())),
        }
        if found
            .as_ref()
            .is_some_and(|p| p.value.inches_of_mercury.is_some() && p.value.hectopascals.is_some())
        {
            break;
        }
    }
    found
}

fn from_groups(prefix: &str, digits: &str) -> Option<AltimeterInfo> {
    let value: f64 = digits.parse().ok()?;
    match prefix {
        "A" => Some(AltimeterInfo {
            inches_of_mercury: Some(value / 100.0),
            hectopascals: None,
        }),
        "Q" => Some(AltimeterInfo {
            inches_of_mercury: None,
            hectopascals: Some(value),
        }),
        _ => None,
    }
}
