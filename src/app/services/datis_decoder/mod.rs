//! DATIS broadcast decoder
//!
//! Broadcast text has no fixed grammar, so decoding runs as a series of
//! passes over the normalized text. Every pass claims the byte spans it
//! turned into items in a [`MatchedText`] owned by the decode call, and later
//! passes skip candidates overlapping a claim:
//!
//! 1. [`header`] - station, service, information letter and time
//! 2. weather primitives scanned over the whole text
//! 3. per sentence, [`notams`] - runway/taxiway closures and notices
//! 4. per sentence, [`operations`] - approaches and departures in use
//! 5. per sentence, [`advisories`] - fixed advisory phrases
//!
//! Item lists are [`UniqueList`]s, so the same decoded string never appears
//! twice even when the broadcast repeats a phrase. Sentences no pass claimed
//! any part of are kept verbatim.

pub mod advisories;
pub mod header;
pub mod matched_text;
pub mod notams;
pub mod operations;
pub mod sentences;

#[cfg(test)]
pub mod tests;

pub use matched_text::{MatchedText, UniqueList};
pub use sentences::Sentence;

use crate::app::models::DatisRecord;
use crate::app::services::normalizer::normalize;
use crate::app::services::primitives::{
    Parsed, altimeter, clouds, temperature, visibility, weather, wind,
};
use crate::config::DecoderConfig;
use tracing::{debug, trace};

/// Decoder for DATIS broadcasts
#[derive(Debug, Clone)]
pub struct DatisDecoder {
    named_visual_approaches: Vec<String>,
    advisory_phrases: Vec<String>,
}

impl Default for DatisDecoder {
    fn default() -> Self {
        Self::from_config(&DecoderConfig::default())
    }
}

impl DatisDecoder {
    pub fn from_config(config: &DecoderConfig) -> Self {
        let upper = |phrases: &[String]| {
            phrases
                .iter()
                .map(|p| p.trim().to_ascii_uppercase())
                .filter(|p| !p.is_empty())
                .collect()
        };
        Self {
            named_visual_approaches: upper(&config.named_visual_approaches),
            advisory_phrases: upper(&config.advisory_phrases_extra),
        }
    }

    /// Decode one broadcast; never fails
    ///
    /// `station_hint` supplies the station when the text does not open with
    /// an identifier.
    pub fn decode(&self, raw: &str, station_hint: Option<&str>) -> DatisRecord {
        let text = normalize(raw);
        let mut matched = MatchedText::new();

        let header = header::extract(&text, station_hint, &mut matched);
        let mut record = DatisRecord {
            station: header.station,
            service: header.service,
            info_letter: header.info_letter,
            info_time: header.info_time,
            raw_text: raw.to_string(),
            ..DatisRecord::default()
        };

        scan_primitives(&text, &mut matched, &mut record);

        let mut notices = notams::NoticeLists::default();
        let mut operations = operations::OperationLists::default();
        let mut advisories = UniqueList::new();
        let sentences = sentences::split(&text);

        for sentence in &sentences {
            notams::extract(sentence, &mut matched, &mut notices);
            operations::extract(
                sentence,
                &self.named_visual_approaches,
                &mut matched,
                &mut operations,
            );
            advisories::extract(sentence, &self.advisory_phrases, &mut matched, &mut advisories);
        }

        for sentence in &sentences {
            if !matched.overlaps(&sentence.span()) {
                trace!("Unrecognized broadcast sentence: {}", sentence.text);
                record.unrecognized.push(sentence.text.to_string());
            }
        }

        record.closed_runways = notices.closed_runways.into_vec();
        record.closed_taxiways = notices.closed_taxiways.into_vec();
        record.notams = notices.notams.into_vec();
        record.approaches = operations.approaches.into_vec();
        record.departures = operations.departures.into_vec();
        record.advisories = advisories.into_vec();

        debug!(
            "Decoded DATIS {} info {}: {} approaches, {} departures, {} closures, {} notices, {} advisories, {} unrecognized",
            record.station.as_deref().unwrap_or("(no station)"),
            record.info_letter.map_or('-', |c| c),
            record.approaches.len(),
            record.departures.len(),
            record.closed_runways.len() + record.closed_taxiways.len(),
            record.notams.len(),
            record.advisories.len(),
            record.unrecognized.len()
        );
        record
    }
}

/// Weather primitives over the whole text, first unclaimed match of each
fn scan_primitives(text: &str, matched: &mut MatchedText, record: &mut DatisRecord) {
    if let Some(parsed) = first_unclaimed(text, matched, wind::find) {
        matched.claim(parsed.span());
        record.wind = Some(parsed.value);
    }

    if let Some(parsed) = first_unclaimed(text, matched, visibility::find) {
        matched.claim(parsed.span());
        record.visibility = Some(parsed.value);
    }

    for parsed in clouds::find_all(text, 0) {
        if matched.overlaps(&parsed.span()) {
            continue;
        }
        matched.claim(parsed.span());
        record.clouds.push(parsed.value);
    }
    if record.clouds.is_empty() && record.visibility.as_ref().is_some_and(|v| v.is_cavok) {
        record.clouds.push(clouds::cavok_layer());
    }

    if let Some(parsed) = first_unclaimed(text, matched, temperature::find) {
        matched.claim(parsed.span());
        let (temp, dew) = parsed.value;
        record.temperature = Some(temp);
        record.dewpoint = dew;
    }

    if let Some(parsed) = first_unclaimed(text, matched, altimeter::find) {
        matched.claim(parsed.span());
        record.altimeter = Some(parsed.value);
    }

    for parsed in weather::find_all(text, 0) {
        if matched.overlaps(&parsed.span()) {
            continue;
        }
        matched.claim(parsed.span());
        record.weather.push(parsed.value);
    }
}

/// Rescan past claimed matches until one is free
fn first_unclaimed<T>(
    text: &str,
    matched: &MatchedText,
    find: impl Fn(&str, usize) -> Option<Parsed<T>>,
) -> Option<Parsed<T>> {
    let mut from = 0;
    while let Some(parsed) = find(text, from) {
        if !matched.overlaps(&parsed.span()) {
            return Some(parsed);
        }
        from = parsed.end.max(from + 1);
    }
    None
}
