//! Decodes segmented TAF text into a [`TafRecord`]

use super::segmenter::{RawSegment, segment};
use crate::app::models::{
    DayTime, ExtremeKind, ForecastSegment, TafRecord, TemperatureExtreme, WindShear,
};
use crate::app::services::normalizer::canonicalize;
use crate::app::services::primitives::{
    altimeter, clouds, parse_signed_celsius, temperature, visibility, weather, wind,
};
use crate::app::services::remark_decoder::RemarkDecoder;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static EXTREME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^T([XN])(M?\d{2})/(\d{4})Z$").expect("valid temperature extreme regex")
});

static WIND_SHEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^WS(\d{3})/(\S+)$").expect("valid wind shear regex"));

/// Decoder for terminal aerodrome forecasts
#[derive(Debug, Clone, Default)]
pub struct TafDecoder {
    remarks: RemarkDecoder,
}

impl TafDecoder {
    pub fn new(remarks: RemarkDecoder) -> Self {
        Self { remarks }
    }

    /// Decode one forecast; never fails
    pub fn decode(&self, raw: &str) -> TafRecord {
        let text = canonicalize(raw);
        let text = text.trim_end_matches('=').trim_end();
        let tokens: Vec<&str> = text.split(' ').filter(|t| !t.is_empty()).collect();

        let segmented = segment(&tokens);
        let segments: Vec<ForecastSegment> =
            segmented.segments.iter().map(decode_segment).collect();

        let record = TafRecord {
            station: segmented.station,
            issued: segmented.issued,
            valid_from: segmented.valid_from,
            valid_to: segmented.valid_to,
            amended: segmented.amended,
            corrected: segmented.corrected,
            nil: segmented.nil,
            segments,
            remarks: self.remarks.decode(&segmented.remark_tokens),
            raw_text: raw.to_string(),
        };

        debug!(
            "Decoded TAF {}: {} segments",
            record.station.as_deref().unwrap_or("(no station)"),
            record.segments.len()
        );
        record
    }
}

/// Decode the groups of one segment
pub fn decode_segment(raw: &RawSegment<'_>) -> ForecastSegment {
    let mut segment = ForecastSegment::new(raw.kind);
    let tokens = &raw.tokens;
    let mut i = 0;

    while i < tokens.len() {
        let token = tokens[i];
        let next = tokens.get(i + 1).copied();

        if segment.wind.is_none() {
            if let Some(mut parsed) = wind::parse_token(token) {
                if let Some(range) = next.and_then(wind::parse_variable_range) {
                    parsed.variable_range = Some(range);
                    i += 1;
                }
                segment.wind = Some(parsed);
                i += 1;
                continue;
            }
        }

        if segment.visibility.is_none() {
            if let Some(vis) = next.and_then(|n| visibility::parse_split(token, n)) {
                segment.visibility = Some(vis);
                i += 2;
                continue;
            }
            if let Some(vis) = visibility::parse_token(token) {
                if vis.is_cavok {
                    segment.clouds.push(clouds::cavok_layer());
                }
                segment.visibility = Some(vis);
                i += 1;
                continue;
            }
        }

        if token == "NSW" {
            segment.no_significant_weather = true;
        } else if let Some(extreme) = temperature_extreme(token) {
            segment.temperature_extremes.push(extreme);
        } else if let Some(shear) = wind_shear(token) {
            segment.wind_shear.push(shear);
        } else if let Some(phenomenon) = weather::parse_token(token) {
            segment.weather.push(phenomenon);
        } else if let Some(layer) = clouds::parse_token(token) {
            segment.clouds.push(layer);
        } else if let Some((temp, dew)) = segment
            .temperature
            .is_none()
            .then(|| temperature::parse_token(token))
            .flatten()
        {
            segment.temperature = Some(temp);
            segment.dewpoint = dew;
        } else if let Some(setting) = altimeter::parse_token(token) {
            segment
                .altimeter
                .get_or_insert_with(Default::default)
                .merge(setting);
        } else {
            segment.unparsed.push(token.to_string());
        }
        i += 1;
    }

    segment
}

/// `TX25/1521Z` or `TNM03/1606Z`
fn temperature_extreme(token: &str) -> Option<TemperatureExtreme> {
    let caps = EXTREME_RE.captures(token)?;
    let kind = if &caps[1] == "X" {
        ExtremeKind::Maximum
    } else {
        ExtremeKind::Minimum
    };
    let celsius = parse_signed_celsius(&caps[2])?;
    Some(TemperatureExtreme {
        kind,
        celsius: if celsius == 0.0 { 0.0 } else { celsius },
        at: DayTime::parse_ddhh(&caps[3])?,
    })
}

/// `WS020/24045KT`
fn wind_shear(token: &str) -> Option<WindShear> {
    let caps = WIND_SHEAR_RE.captures(token)?;
    Some(WindShear {
        height_feet: caps[1].parse::<u32>().ok()? * 100,
        wind: wind::parse_token(&caps[2])?,
    })
}
