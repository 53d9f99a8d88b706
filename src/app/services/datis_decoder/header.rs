//! Broadcast header: station, service and information letter/time

use super::matched_text::MatchedText;
use crate::app::models::AtisService;
use chrono::NaiveTime;
use regex::Regex;
use std::sync::LazyLock;

static INFO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:INFO|INFORMATION) ([A-Z])\b(?: (\d{2})(\d{2})Z?\b)?")
        .expect("valid information header regex")
});

static STATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z][A-Z0-9]{3})\b").expect("valid station regex"));

/// Words that can open a broadcast but are not a station identifier
const NOT_STATIONS: &[&str] = &["INFO", "ATIS", "WIND", "THIS", "TIME"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    pub station: Option<String>,
    pub service: Option<AtisService>,
    pub info_letter: Option<char>,
    pub info_time: Option<NaiveTime>,
}

/// Extract the header and claim the text it came from
///
/// The station is the leading identifier if there is one, else `station_hint`.
pub fn extract(text: &str, station_hint: Option<&str>, matched: &mut MatchedText) -> Header {
    let mut header = Header::default();

    if let Some(m) = STATION_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .filter(|m| !NOT_STATIONS.contains(&m.as_str()))
    {
        header.station = Some(m.as_str().to_string());
        matched.claim(m.range());
    }
    if header.station.is_none() {
        header.station = station_hint
            .map(|s| s.trim().to_ascii_uppercase())
            .filter(|s| !s.is_empty());
    }

    if let Some(caps) = INFO_RE.captures(text) {
        let Some(whole) = caps.get(0) else {
            return header;
        };
        header.info_letter = caps[1].chars().next();
        header.info_time = match (caps.get(2), caps.get(3)) {
            (Some(h), Some(m)) => h
                .as_str()
                .parse()
                .ok()
                .zip(m.as_str().parse().ok())
                .and_then(|(h, m)| NaiveTime::from_hms_opt(h, m, 0)),
            _ => None,
        };

        let prefix = &text[..whole.start()];
        header.service = service(prefix);

        // A short lead-in ("KLAX ARR") belongs to the header
        let lead_in_words = prefix.split_whitespace().count();
        if !prefix.contains('.') && lead_in_words <= 4 {
            matched.claim(0..whole.end());
        } else {
            matched.claim(whole.range());
        }
    }

    header
}

/// Service named before the information letter
fn service(prefix: &str) -> Option<AtisService> {
    let arrival = prefix.contains("ARR");
    let departure = prefix.contains("DEP");
    match (arrival, departure) {
        (true, true) => Some(AtisService::Combined),
        (true, false) => Some(AtisService::Arrival),
        (false, true) => Some(AtisService::Departure),
        (false, false) => None,
    }
}
