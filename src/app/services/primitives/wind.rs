//! Surface wind groups: `24015G25KT`, `VRB05KT`, `05010MPS`, `00000KT`, `CALM`

use super::Parsed;
use crate::app::models::{WindDirection, WindInfo};
use crate::constants::{KNOTS_PER_KMH, KNOTS_PER_MPS};
use regex::Regex;
use std::sync::LazyLock;

static WIND_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(VRB|\d{3})(\d{2,3})(?:G(\d{2,3}))?(KT|MPS|KMH)$").expect("valid wind regex")
});

static WIND_SCAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:(CALM)|(VRB|\d{3})(\d{2,3})(?:G(\d{2,3}))?(KT|MPS|KMH))\b")
        .expect("valid wind scan regex")
});

static VARIABLE_RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{3})V(\d{3})$").expect("valid variable range regex"));

static TRAILING_RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ (\d{3}V\d{3})\b").expect("valid trailing range regex"));

/// Decode one wind token
pub fn parse_token(token: &str) -> Option<WindInfo> {
    if token == "CALM" {
        return Some(WindInfo::calm());
    }
    let caps = WIND_TOKEN_RE.captures(token)?;
    from_groups(&caps[1], &caps[2], caps.get(3).map(|m| m.as_str()), &caps[4])
}

/// Decode a `dddVddd` variable direction token
pub fn parse_variable_range(token: &str) -> Option<(u16, u16)> {
    let caps = VARIABLE_RANGE_RE.captures(token)?;
    let low: u16 = caps[1].parse().ok()?;
    let high: u16 = caps[2].parse().ok()?;
    (low <= 360 && high <= 360).then_some((low, high))
}

/// Find the first wind group at or after `from`
///
/// A `dddVddd` group immediately following the wind is folded into it and
/// included in the returned span.
pub fn find(text: &str, from: usize) -> Option<Parsed<WindInfo>> {
    let haystack = text.get(from..)?;
    for caps in WIND_SCAN_RE.captures_iter(haystack) {
        let whole = caps.get(0)?;
        let (start, mut end) = (from + whole.start(), from + whole.end());

        let wind = if caps.get(1).is_some() {
            Some(WindInfo::calm())
        } else {
            from_groups(&caps[2], &caps[3], caps.get(4).map(|m| m.as_str()), &caps[5])
        };
        let Some(mut wind) = wind else { continue };

        if let Some(range) = TRAILING_RANGE_RE.captures(&text[end..]) {
            if let Some(parsed) = parse_variable_range(&range[1]) {
                wind.variable_range = Some(parsed);
                end += range.get(0).map_or(0, |m| m.end());
            }
        }
        return Some(Parsed::new(wind, start, end));
    }
    None
}

fn from_groups(direction: &str, speed: &str, gust: Option<&str>, unit: &str) -> Option<WindInfo> {
    let direction = match direction {
        "VRB" => WindDirection::Variable,
        digits => {
            let degrees: u16 = digits.parse().ok()?;
            if degrees > 360 {
                return None;
            }
            WindDirection::Degrees(degrees)
        }
    };
    let speed_knots = to_knots(speed.parse().ok()?, unit);
    let gust_knots = match gust {
        Some(g) => Some(to_knots(g.parse().ok()?, unit)),
        None => None,
    };

    Some(WindInfo {
        direction,
        speed_knots,
        gust_knots,
        variable_range: None,
    })
}

fn to_knots(value: u16, unit: &str) -> u16 {
    match unit {
        "MPS" => (f64::from(value) * KNOTS_PER_MPS).round() as u16,
        "KMH" => (f64::from(value) * KNOTS_PER_KMH).round() as u16,
        _ => value,
    }
}
