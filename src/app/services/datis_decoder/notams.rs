//! Closure and notice pass
//!
//! Runway and taxiway closures become typed closures, navaid and lighting
//! outages become typed equipment notices. A sentence with a closure or
//! notice shape that yields neither is kept whole as a general notice.

use super::matched_text::{MatchedText, UniqueList};
use super::sentences::{Sentence, find_phrase};
use crate::app::models::{ClosureRestriction, Equipment, Notam, RunwayClosure, TaxiwayClosure};
use crate::constants::{NOTICE_PHRASES, OUT_OF_SERVICE_PHRASES};
use regex::Regex;
use std::sync::LazyLock;

static TAXIWAY_CLOSURE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\bTAXIWAY ([A-Z]{1,2}\d{0,2}(?:(?:, ?| AND )[A-Z]{1,2}\d{0,2})*) CLOSED\b(?: BETWEEN (.+?) AND (.+))?",
    )
    .expect("valid taxiway closure regex")
});

static RUNWAY_CLOSURE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:RWY|RUNWAY)S? (\d{1,2}[LRC]?(?:/\d{1,2}[LRC]?)?(?:(?: ?, ?| AND )\d{1,2}[LRC]?(?:/\d{1,2}[LRC]?)?)*) CLOSED\b(?: TO (LANDING|ARRIVALS|TAKEOFFS?|DEPARTURES))?",
    )
    .expect("valid runway closure regex")
});

static CLOSED_RUNWAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{1,2}[LRC]?(?:/\d{1,2}[LRC]?)?").expect("valid closed runway regex")
});

static EQUIPMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(ILS GLIDE ?SLOPE|GLIDE ?SLOPE|ILS LOCALIZER|LOCALIZER|VORTAC|VOR|DME|PAPI|VASI|APPROACH LIGHTS|MALSR|ALS|ILS)\b",
    )
    .expect("valid equipment regex")
});

static RUNWAY_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:RWY|RUNWAY) (\d{1,2}[LRC]?)\b").expect("valid runway regex"));

/// Output lists of the closure and notice pass
#[derive(Debug, Default)]
pub struct NoticeLists {
    pub closed_runways: UniqueList<RunwayClosure>,
    pub closed_taxiways: UniqueList<TaxiwayClosure>,
    pub notams: UniqueList<Notam>,
}

/// Run the closure and notice pass over one sentence
pub fn extract(sentence: &Sentence<'_>, matched: &mut MatchedText, out: &mut NoticeLists) {
    let mut produced = false;

    for caps in TAXIWAY_CLOSURE_RE.captures_iter(sentence.text) {
        let Some(whole) = caps.get(0) else { continue };
        let span = sentence.span_of(&whole);
        if matched.overlaps(&span) {
            continue;
        }
        let names = split_taxiways(&caps[1]);
        let between = match (caps.get(2), caps.get(3)) {
            (Some(a), Some(b)) if names.len() == 1 => {
                Some((a.as_str().trim().to_string(), b.as_str().trim().to_string()))
            }
            _ => None,
        };
        for taxiway in names {
            out.closed_taxiways.push(TaxiwayClosure {
                taxiway,
                between: between.clone(),
            });
        }
        matched.claim(span);
        produced = true;
    }

    for caps in RUNWAY_CLOSURE_RE.captures_iter(sentence.text) {
        let Some(whole) = caps.get(0) else { continue };
        let span = sentence.span_of(&whole);
        if matched.overlaps(&span) {
            continue;
        }
        let restriction = caps.get(2).map(|m| match m.as_str() {
            "LANDING" | "ARRIVALS" => ClosureRestriction::Landing,
            _ => ClosureRestriction::Takeoff,
        });
        // `RWY 10/28 AND 12/30 CLOSED` closes each runway in the list
        for runway in CLOSED_RUNWAY_RE.find_iter(&caps[1]) {
            out.closed_runways.push(RunwayClosure {
                runway: runway.as_str().to_string(),
                restriction,
            });
        }
        matched.claim(span);
        produced = true;
    }

    if let Some(outage) = OUT_OF_SERVICE_PHRASES
        .iter()
        .find_map(|phrase| find_phrase(sentence.text, phrase, 0))
    {
        produced |= extract_equipment(sentence, outage, matched, out);
    }

    let notice_shaped = sentence.contains_phrase("CLOSED")
        || NOTICE_PHRASES.iter().any(|p| sentence.contains_phrase(p));
    if notice_shaped && !produced {
        out.notams.push(Notam::General {
            text: sentence.text.to_string(),
        });
        matched.claim(sentence.span());
    }
}

/// Equipment named before an out-of-service phrase
fn extract_equipment(
    sentence: &Sentence<'_>,
    outage: std::ops::Range<usize>,
    matched: &mut MatchedText,
    out: &mut NoticeLists,
) -> bool {
    let head = &sentence.text[..outage.start];
    let mut produced = false;

    for m in EQUIPMENT_RE.find_iter(head) {
        let span = sentence.span_of(&m);
        if matched.overlaps(&span) {
            continue;
        }
        let Some(equipment) = equipment(m.as_str()) else {
            continue;
        };

        // Nearest runway reference before the outage phrase
        let runway = RUNWAY_REF_RE
            .captures_iter(head)
            .filter_map(|caps| Some((caps.get(0)?.start(), caps.get(1)?.as_str())))
            .min_by_key(|(start, _)| start.abs_diff(m.start()));
        let claim_start = runway.map_or(m.start(), |(start, _)| start.min(m.start()));

        out.notams.push(Notam::EquipmentOutOfService {
            equipment,
            runway: runway.map(|(_, designator)| designator.to_string()),
        });
        matched.claim(sentence.absolute(claim_start..outage.end));
        produced = true;
    }
    produced
}

fn equipment(keyword: &str) -> Option<Equipment> {
    let equipment = match keyword {
        "VOR" | "VORTAC" => Equipment::Vor,
        "DME" => Equipment::Dme,
        "ILS" => Equipment::Ils,
        "LOCALIZER" | "ILS LOCALIZER" => Equipment::Localizer,
        "PAPI" => Equipment::Papi,
        "VASI" => Equipment::Vasi,
        "APPROACH LIGHTS" | "MALSR" | "ALS" => Equipment::ApproachLights,
        k if k.contains("GLIDE") => Equipment::Glideslope,
        _ => return None,
    };
    Some(equipment)
}

/// `B, C AND D` -> `["B", "C", "D"]`
fn split_taxiways(list: &str) -> Vec<String> {
    list.replace(" AND ", ",")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
