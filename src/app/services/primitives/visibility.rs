//! Prevailing visibility: `10SM`, `P6SM`, `M1/4SM`, `1 1/2SM`, `9999`, `5KM`, `CAVOK`

use super::Parsed;
use crate::app::models::{DistanceUnit, VisibilityInfo, VisibilityQualifier};
use crate::constants::METRIC_VISIBILITY_MAX;
use regex::Regex;
use std::sync::LazyLock;

static STATUTE_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([PM])?(\d{1,2}/\d{1,2}|\d{1,3})SM$").expect("valid statute visibility regex")
});

static METRIC_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})(?:NDV)?$|^(\d{1,2})KM$").expect("valid metric regex"));

static VISIBILITY_SCAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:([PM])?((?:\d{1,2} )?\d{1,2}/\d{1,2}|\d{1,3})SM|VIS(?:IBILITY)? (\d{4})|(CAVOK))\b",
    )
    .expect("valid visibility scan regex")
});

/// Decode one visibility token
pub fn parse_token(token: &str) -> Option<VisibilityInfo> {
    if token == "CAVOK" {
        return Some(VisibilityInfo::cavok());
    }
    if let Some(caps) = STATUTE_TOKEN_RE.captures(token) {
        return statute(caps.get(1).map(|m| m.as_str()), &caps[2]);
    }
    let caps = METRIC_TOKEN_RE.captures(token)?;
    if let Some(meters) = caps.get(1) {
        return metric(meters.as_str());
    }
    let kilometers: f64 = caps.get(2)?.as_str().parse().ok()?;
    Some(VisibilityInfo {
        distance: Some(kilometers * 1000.0),
        unit: DistanceUnit::Meters,
        qualifier: None,
        is_cavok: false,
    })
}

/// Decode a mixed number split across two tokens, such as `1` `1/2SM`
pub fn parse_split(whole: &str, fraction: &str) -> Option<VisibilityInfo> {
    if whole.is_empty() || whole.len() > 2 || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let caps = STATUTE_TOKEN_RE.captures(fraction)?;
    if caps.get(1).is_some() || !caps[2].contains('/') {
        return None;
    }
    statute(None, &format!("{} {}", whole, &caps[2]))
}

/// Find the first visibility group at or after `from`
pub fn find(text: &str, from: usize) -> Option<Parsed<VisibilityInfo>> {
    let haystack = text.get(from..)?;
    for caps in VISIBILITY_SCAN_RE.captures_iter(haystack) {
        let whole = caps.get(0)?;
        let value = if caps.get(4).is_some() {
            Some(VisibilityInfo::cavok())
        } else if let Some(meters) = caps.get(3) {
            metric(meters.as_str())
        } else {
            statute(caps.get(1).map(|m| m.as_str()), &caps[2])
        };
        if let Some(value) = value {
            return Some(Parsed::new(value, from + whole.start(), from + whole.end()));
        }
    }
    None
}

fn statute(prefix: Option<&str>, amount: &str) -> Option<VisibilityInfo> {
    let qualifier = match prefix {
        Some("P") => Some(VisibilityQualifier::GreaterThan),
        Some("M") => Some(VisibilityQualifier::LessThan),
        _ => None,
    };
    Some(VisibilityInfo {
        distance: Some(parse_miles(amount)?),
        unit: DistanceUnit::StatuteMiles,
        qualifier,
        is_cavok: false,
    })
}

fn metric(digits: &str) -> Option<VisibilityInfo> {
    let meters: f64 = digits.parse().ok()?;
    // 9999 reads as "10 km or more"
    let (distance, qualifier) = if digits == "9999" {
        (METRIC_VISIBILITY_MAX, Some(VisibilityQualifier::GreaterThan))
    } else {
        (meters, None)
    };
    Some(VisibilityInfo {
        distance: Some(distance),
        unit: DistanceUnit::Meters,
        qualifier,
        is_cavok: false,
    })
}

/// `3`, `1/4` or `1 1/2` in statute miles
pub(crate) fn parse_miles(amount: &str) -> Option<f64> {
    let mut total = 0.0;
    for part in amount.split_whitespace() {
        total += match part.split_once('/') {
            Some((numerator, denominator)) => {
                let numerator: f64 = numerator.parse().ok()?;
                let denominator: f64 = denominator.parse().ok()?;
                if denominator == 0.0 {
                    return None;
                }
                numerator / denominator
            }
            None => part.parse::<f64>().ok()?,
        };
    }
    Some(total)
}
