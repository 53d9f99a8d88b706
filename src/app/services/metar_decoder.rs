//! METAR/SPECI decoder
//!
//! A single pass over whitespace-separated groups: report type, station,
//! observation time and flags, then the body groups, then everything after
//! `RMK` goes to the [`RemarkDecoder`]. Body groups no primitive recognizes
//! are kept in [`MetarRecord::unparsed`].

use super::normalizer::canonicalize;
use super::primitives::{altimeter, clouds, temperature, visibility, weather, wind};
use super::remark_decoder::RemarkDecoder;
use crate::app::models::{DayTime, MetarRecord};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static STATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9]{3}$").expect("valid station regex"));

static OBSERVATION_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{6})Z$").expect("valid observation time regex"));

/// Decoder for METAR and SPECI observations
#[derive(Debug, Clone, Default)]
pub struct MetarDecoder {
    remarks: RemarkDecoder,
}

impl MetarDecoder {
    pub fn new(remarks: RemarkDecoder) -> Self {
        Self { remarks }
    }

    /// Decode one observation; never fails
    pub fn decode(&self, raw: &str) -> MetarRecord {
        let text = canonicalize(raw);
        let text = text.trim_end_matches('=').trim_end();
        let tokens: Vec<&str> = text.split(' ').filter(|t| !t.is_empty()).collect();

        let (body, remark_tokens) = match tokens.iter().position(|t| *t == "RMK") {
            Some(index) => (&tokens[..index], &tokens[index + 1..]),
            None => (&tokens[..], &tokens[tokens.len()..]),
        };

        let mut record = MetarRecord {
            raw_text: raw.to_string(),
            ..MetarRecord::default()
        };

        let consumed = decode_header(body, &mut record);
        decode_body(&body[consumed..], &mut record);
        record.remarks = self.remarks.decode(remark_tokens);

        debug!(
            "Decoded METAR {}: {} weather groups, {} cloud layers, {} unparsed",
            record.station.as_deref().unwrap_or("(no station)"),
            record.weather.len(),
            record.clouds.len(),
            record.unparsed.len() + record.remarks.passthrough.len()
        );
        record
    }
}

/// Consume report type, station, time and flags; returns tokens consumed
fn decode_header(tokens: &[&str], record: &mut MetarRecord) -> usize {
    let mut i = 0;

    match tokens.first() {
        Some(&"METAR") => i += 1,
        Some(&"SPECI") => {
            record.is_special = true;
            i += 1;
        }
        _ => {}
    }

    i += consume_flags(&tokens[i..], record);

    if let Some(token) = tokens.get(i).filter(|t| STATION_RE.is_match(t)) {
        record.station = Some(token.to_string());
        i += 1;
    }

    if let Some(caps) = tokens.get(i).and_then(|t| OBSERVATION_TIME_RE.captures(t)) {
        record.observed = DayTime::parse_ddhhmm(&caps[1]);
        i += 1;
    }

    i + consume_flags(&tokens[i..], record)
}

fn consume_flags(tokens: &[&str], record: &mut MetarRecord) -> usize {
    let mut consumed = 0;
    for token in tokens {
        match *token {
            "AUTO" => record.auto = true,
            "COR" | "CC" => record.corrected = true,
            "NIL" => record.nil = true,
            _ => break,
        }
        consumed += 1;
    }
    consumed
}

fn decode_body(tokens: &[&str], record: &mut MetarRecord) {
    let mut i = 0;

    while i < tokens.len() {
        let token = tokens[i];
        let next = tokens.get(i + 1).copied();

        if record.wind.is_none() {
            if let Some(mut parsed) = wind::parse_token(token) {
                if let Some(range) = next.and_then(wind::parse_variable_range) {
                    parsed.variable_range = Some(range);
                    i += 1;
                }
                record.wind = Some(parsed);
                i += 1;
                continue;
            }
        }

        if record.visibility.is_none() {
            if let Some(vis) = next.and_then(|n| visibility::parse_split(token, n)) {
                record.visibility = Some(vis);
                i += 2;
                continue;
            }
            if let Some(vis) = visibility::parse_token(token) {
                if vis.is_cavok {
                    record.clouds.push(clouds::cavok_layer());
                }
                record.visibility = Some(vis);
                i += 1;
                continue;
            }
        }

        if let Some(phenomenon) = weather::parse_token(token) {
            record.weather.push(phenomenon);
        } else if let Some(layer) = clouds::parse_token(token) {
            record.clouds.push(layer);
        } else if let Some((temp, dew)) = record
            .temperature
            .is_none()
            .then(|| temperature::parse_token(token))
            .flatten()
        {
            record.temperature = Some(temp);
            record.dewpoint = dew;
        } else if let Some(setting) = altimeter::parse_token(token) {
            record
                .altimeter
                .get_or_insert_with(Default::default)
                .merge(setting);
        } else if token == "NOSIG" {
            record.no_significant_change = true;
        } else {
            record.unparsed.push(token.to_string());
        }
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{CloudCoverage, Intensity, VisibilityQualifier, WindDirection};
    use chrono::{TimeZone, Utc};

    fn decode(text: &str) -> MetarRecord {
        MetarDecoder::default().decode(text)
    }

    #[test]
    fn test_full_observation() {
        let record = decode(
            "METAR KSFO 151756Z 29012G20KT 260V320 10SM -RA FEW008 BKN200 16/11 A2996 RMK AO2 SLP145 T01610106",
        );

        assert_eq!(record.station.as_deref(), Some("KSFO"));
        assert!(!record.is_special);
        assert_eq!(record.observed, DayTime::new(15, 17, 56));

        let wind = record.wind.as_ref().unwrap();
        assert_eq!(wind.direction, WindDirection::Degrees(290));
        assert_eq!(wind.gust_knots, Some(20));
        assert_eq!(wind.variable_range, Some((260, 320)));

        assert_eq!(record.visibility.as_ref().unwrap().distance, Some(10.0));
        assert_eq!(record.weather.len(), 1);
        assert_eq!(record.weather[0].intensity, Intensity::Light);
        assert_eq!(record.clouds.len(), 2);
        assert_eq!(record.temperature.unwrap().celsius, 16.0);
        assert_eq!(record.dewpoint.unwrap().celsius, 11.0);
        assert_eq!(record.altimeter.unwrap().inches_of_mercury, Some(29.96));
        assert_eq!(record.remarks.sensor_type(), Some("AO2"));
        assert_eq!(record.remarks.sea_level_pressure(), Some(1014.5));
        assert!(record.unparsed.is_empty());
    }

    #[test]
    fn test_speci_auto_and_corrected() {
        let record = decode("SPECI KDEN 021514Z AUTO COR 00000KT 1 1/2SM BR OVC004 M02/M03 A3012=");
        assert!(record.is_special);
        assert!(record.auto);
        assert!(record.corrected);
        assert!(record.wind.as_ref().unwrap().is_calm());
        assert_eq!(record.visibility.as_ref().unwrap().distance, Some(1.5));
        assert_eq!(record.temperature.unwrap().celsius, -2.0);
        assert_eq!(record.altimeter.unwrap().inches_of_mercury, Some(30.12));
        assert!(record.unparsed.is_empty());
    }

    #[test]
    fn test_icao_style_with_cavok() {
        let record = decode("EGLL 151750Z 24008KT CAVOK 18/09 Q1021 NOSIG");
        assert!(record.visibility.as_ref().unwrap().is_cavok);
        assert_eq!(record.clouds[0].coverage, CloudCoverage::NoSignificant);
        assert_eq!(record.altimeter.unwrap().hectopascals, Some(1021.0));
        assert!(record.no_significant_change);
    }

    #[test]
    fn test_metric_visibility_and_both_altimeters() {
        let record = decode("RKSI 150600Z 32010KT 9999 FEW030 22/12 Q1009 A2980");
        let vis = record.visibility.as_ref().unwrap();
        assert_eq!(vis.qualifier, Some(VisibilityQualifier::GreaterThan));
        let alt = record.altimeter.unwrap();
        assert_eq!(alt.hectopascals, Some(1009.0));
        assert_eq!(alt.inches_of_mercury, Some(29.8));
    }

    #[test]
    fn test_unrecognized_groups_are_preserved() {
        let record = decode("KJFK 151751Z 18012KT 10SM R04R/2000FT FEW250 27/18 A3001 WSHFT");
        assert_eq!(record.unparsed, vec!["R04R/2000FT", "WSHFT"]);
        assert_eq!(record.clouds.len(), 1);
    }

    #[test]
    fn test_nil_report() {
        let record = decode("KXYZ 151753Z NIL");
        assert!(record.nil);
        assert!(record.wind.is_none());
    }

    #[test]
    fn test_empty_and_garbage_input() {
        let record = decode("");
        assert!(record.station.is_none());
        assert!(record.unparsed.is_empty());

        let record = decode("//// ???? 12");
        assert_eq!(record.unparsed.len(), 3);
    }

    #[test]
    fn test_observation_time_resolution() {
        let record = decode("KLAX 312353Z 25010KT 10SM CLR 20/10 A2992");
        let reference = Utc.with_ymd_and_hms(2024, 2, 1, 0, 10, 0).unwrap();
        assert_eq!(
            record.observed_at(reference),
            Some(Utc.with_ymd_and_hms(2024, 1, 31, 23, 53, 0).unwrap())
        );
    }

    #[test]
    fn test_ceiling() {
        let record = decode("KBOS 151754Z 09010KT 3SM -SN SCT008 BKN015 OVC030 M01/M03 A2990");
        assert_eq!(record.ceiling_feet(), Some(1500));
    }
}
