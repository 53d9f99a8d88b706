//! Temperature/dewpoint pairs: `17/11`, `M02/M08`, `05/`

use super::{Parsed, parse_signed_celsius};
use crate::app::models::TemperatureInfo;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static PAIR_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(M?\d{2})/(M?\d{2})?$").expect("valid temperature regex"));

static PAIR_SCAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(M?\d{2})/(M?\d{2})\b").expect("valid temperature scan regex"));

/// `RWY 10/28 AND 12/30`: every pair in the list is a runway
static RUNWAY_PAIR_LIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:RWY|RUNWAY)S? \d{1,2}[LRC]?/\d{1,2}[LRC]?(?:(?: ?, ?| AND | OR | ?& ?)(?:(?:RWY|RUNWAY) )?\d{1,2}[LRC]?/\d{1,2}[LRC]?)*",
    )
    .expect("valid runway pair list regex")
});

/// Temperature and dewpoint decoded from one group
pub type TemperaturePair = (TemperatureInfo, Option<TemperatureInfo>);

/// Decode one temperature/dewpoint token
///
/// A missing dewpoint (`05/`) still yields the temperature.
pub fn parse_token(token: &str) -> Option<TemperaturePair> {
    let caps = PAIR_TOKEN_RE.captures(token)?;
    let temperature = TemperatureInfo::new(parse_signed_celsius(&caps[1])?);
    let dewpoint = match caps.get(2) {
        Some(m) => Some(TemperatureInfo::new(parse_signed_celsius(m.as_str())?)),
        None => None,
    };
    Some((temperature, dewpoint))
}

/// Find the first complete pair at or after `from`
///
/// Runway pairs (`RWY 12/30`, `RWY 10/28 AND 12/30`, `12/30 CLOSED`) are
/// skipped, as are fragments of longer slash groups such as dates.
pub fn find(text: &str, from: usize) -> Option<Parsed<TemperaturePair>> {
    let haystack = text.get(from..)?;
    let runway_lists: Vec<Range<usize>> = RUNWAY_PAIR_LIST_RE
        .find_iter(text)
        .map(|m| m.range())
        .collect();

    PAIR_SCAN_RE.captures_iter(haystack).find_map(|caps| {
        let whole = caps.get(0)?;
        let (start, end) = (from + whole.start(), from + whole.end());
        if runway_lists.iter().any(|r| r.start <= start && end <= r.end) {
            return None;
        }
        let after = &text[end..];
        if text[..start].ends_with('/') || after.starts_with('/') || after.starts_with(" CLOSED") {
            return None;
        }
        let temperature = TemperatureInfo::new(parse_signed_celsius(&caps[1])?);
        let dewpoint = TemperatureInfo::new(parse_signed_celsius(&caps[2])?);
        Some(Parsed::new((temperature, Some(dewpoint)), start, end))
    })
}
