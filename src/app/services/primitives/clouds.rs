//! Sky condition groups: `FEW020`, `BKN035CB`, `OVC///`, `VV002`, `SKC`, `CLR`, `NSC`

use super::Parsed;
use crate::app::models::{CloudCoverage, CloudLayer, SignificantCloud};
use regex::Regex;
use std::sync::LazyLock;

static LAYER_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(FEW|SCT|BKN|OVC|VV)(\d{3}|///)(CB|TCU|///)?$").expect("valid cloud layer regex")
});

static CLOUD_SCAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:(FEW|SCT|BKN|OVC|VV)(\d{3})(CB|TCU)?|(SKC|CLR|NSC|NCD))\b")
        .expect("valid cloud scan regex")
});

/// Decode one sky-condition token
pub fn parse_token(token: &str) -> Option<CloudLayer> {
    if let Some(layer) = clear_sky(token) {
        return Some(layer);
    }
    let caps = LAYER_TOKEN_RE.captures(token)?;
    let height = match &caps[2] {
        "///" => None,
        digits => Some(digits.parse::<u32>().ok()? * 100),
    };
    layer(&caps[1], height, caps.get(3).map(|m| m.as_str()))
}

/// Layer implied by `CAVOK`
pub fn cavok_layer() -> CloudLayer {
    CloudLayer::new(CloudCoverage::NoSignificant, None)
}

/// Find every cloud group at or after `from`, in source order
pub fn find_all(text: &str, from: usize) -> Vec<Parsed<CloudLayer>> {
    let Some(haystack) = text.get(from..) else {
        return Vec::new();
    };
    CLOUD_SCAN_RE
        .captures_iter(haystack)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let value = match caps.get(4) {
                Some(code) => clear_sky(code.as_str())?,
                None => {
                    let height = caps[2].parse::<u32>().ok()? * 100;
                    layer(&caps[1], Some(height), caps.get(3).map(|m| m.as_str()))?
                }
            };
            Some(Parsed::new(value, from + whole.start(), from + whole.end()))
        })
        .collect()
}

fn clear_sky(token: &str) -> Option<CloudLayer> {
    match token {
        "SKC" | "CLR" => Some(CloudLayer::new(CloudCoverage::Clear, None)),
        "NSC" | "NCD" => Some(CloudLayer::new(CloudCoverage::NoSignificant, None)),
        _ => None,
    }
}

fn layer(code: &str, height_feet: Option<u32>, suffix: Option<&str>) -> Option<CloudLayer> {
    let coverage = match code {
        "FEW" => CloudCoverage::Few,
        "SCT" => CloudCoverage::Scattered,
        "BKN" => CloudCoverage::Broken,
        "OVC" => CloudCoverage::Overcast,
        "VV" => CloudCoverage::Obscured,
        _ => return None,
    };
    let significant = match suffix {
        Some("CB") => Some(SignificantCloud::Cumulonimbus),
        Some("TCU") => Some(SignificantCloud::ToweringCumulus),
        _ => None,
    };
    Some(CloudLayer {
        coverage,
        height_feet,
        significant,
    })
}
