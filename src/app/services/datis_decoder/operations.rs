//! Approach and departure pass
//!
//! Runway lists (`RWY 24R AND 25L`) are attributed to the nearest preceding
//! approach or departure keyword in the same sentence, falling back to the
//! first keyword after the list. With no such keyword, an approach type next
//! to the list (`ILS RWY 28L`, `EXPECT RNAV RWY 19L`) makes it an approach.
//! Named and charted visual procedures and vectors-for-visual phrases are
//! recognized before the generic lists.

use super::matched_text::{MatchedText, UniqueList};
use super::sentences::{Sentence, find_phrase};
use crate::app::models::{Approach, ApproachType, Departure};
use regex::{Match, Regex};
use std::ops::Range;
use std::sync::LazyLock;

static RUNWAY_LIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:RWY|RUNWAY)S? (\d{1,2}[LRC]?(?:(?: ?, ?| AND | OR | ?& ?)(?:(?:RWY|RUNWAY) )?\d{1,2}[LRC]?)*)\b",
    )
    .expect("valid runway list regex")
});

static RUNWAY_DESIGNATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{1,2}[LRC]?\b").expect("valid runway designator regex"));

static KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(APPROACH(?:ES)?|LANDING|ARRIVALS?|DEPARTURES?|DEPARTING|TAKEOFFS?)\b")
        .expect("valid operation keyword regex")
});

static APPROACH_TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(ILS|LOCALIZER|LOC|RNAV|RNP|GPS|VISUAL)\b").expect("valid approach type regex")
});

static CHARTED_VISUAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bCHARTED VISUAL ([A-Z][A-Z ]*?) APPROACH(?:ES)?\b").expect("valid charted visual regex")
});

static VECTORS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bVECTORS (?:FOR|TO) (?:THE )?VISUAL\b").expect("valid vectors regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Approach,
    Departure,
}

/// Output lists of the approach and departure pass
#[derive(Debug, Default)]
pub struct OperationLists {
    pub approaches: UniqueList<Approach>,
    pub departures: UniqueList<Departure>,
}

/// Run the approach and departure pass over one sentence
pub fn extract(
    sentence: &Sentence<'_>,
    named_visuals: &[String],
    matched: &mut MatchedText,
    out: &mut OperationLists,
) {
    let before = out.approaches.len() + out.departures.len();

    named_visual_approaches(sentence, named_visuals, matched, out);

    for m in VECTORS_RE.find_iter(sentence.text) {
        let span = sentence.span_of(&m);
        if !matched.overlaps(&span) {
            out.approaches.push(Approach::VectorsForVisual);
            matched.claim(span);
        }
    }

    runway_lists(sentence, matched, out);

    let produced = out.approaches.len() + out.departures.len() > before;
    if !produced && !matched.overlaps(&sentence.span()) {
        fallback(sentence, matched, out);
    }
}

/// Charted visuals and configured named visual procedures
fn named_visual_approaches(
    sentence: &Sentence<'_>,
    named_visuals: &[String],
    matched: &mut MatchedText,
    out: &mut OperationLists,
) {
    for caps in CHARTED_VISUAL_RE.captures_iter(sentence.text) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let span = sentence.span_of(&whole);
        if matched.overlaps(&span) {
            continue;
        }
        matched.claim(span);
        let runways = claim_following_runways(sentence, whole.end(), matched);
        out.approaches.push(Approach::NamedVisual {
            name: name.as_str().trim().to_string(),
            charted: true,
            runways,
        });
    }

    for name in named_visuals {
        let Some(local) = find_phrase(sentence.text, name, 0) else {
            continue;
        };
        let span = sentence.absolute(local.clone());
        if matched.overlaps(&span) {
            continue;
        }
        matched.claim(span);
        let runways = claim_following_runways(sentence, local.end, matched);
        out.approaches.push(Approach::NamedVisual {
            name: name.clone(),
            charted: false,
            runways,
        });
    }
}

/// Runway list right after a named procedure, if unclaimed
fn claim_following_runways(
    sentence: &Sentence<'_>,
    from: usize,
    matched: &mut MatchedText,
) -> Vec<String> {
    let Some(caps) = sentence.text.get(from..).and_then(|t| RUNWAY_LIST_RE.captures(t)) else {
        return Vec::new();
    };
    let (Some(whole), Some(list)) = (caps.get(0), caps.get(1)) else {
        return Vec::new();
    };
    // Only a list that directly follows ("APPROACH RWY 28R"), not one later on
    if sentence.text[from..from + whole.start()].split_whitespace().count() > 2 {
        return Vec::new();
    }
    let span = sentence.absolute(from + whole.start()..from + whole.end());
    if matched.overlaps(&span) {
        return Vec::new();
    }
    matched.claim(span);
    designators(list.as_str())
}

fn runway_lists(sentence: &Sentence<'_>, matched: &mut MatchedText, out: &mut OperationLists) {
    let keywords: Vec<(Range<usize>, Category)> = KEYWORD_RE
        .find_iter(sentence.text)
        .filter(|m| !matched.overlaps(&sentence.span_of(m)))
        .map(|m| (m.range(), category(m.as_str())))
        .collect();
    let type_keywords: Vec<Range<usize>> = APPROACH_TYPE_RE
        .find_iter(sentence.text)
        .filter(|m| !matched.overlaps(&sentence.span_of(m)))
        .map(|m| m.range())
        .collect();
    let simultaneous = sentence.contains_phrase("SIMULTANEOUS");
    let instrument = sentence.contains_phrase("INSTRUMENT");

    let mut clause_start = 0;
    for caps in RUNWAY_LIST_RE.captures_iter(sentence.text) {
        let (Some(whole), Some(list)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let span = sentence.span_of(&whole);

        // A closure inside the list ("LANDING RWY 24R, RWY 24L CLOSED")
        // keeps its runway; the rest of the list still counts
        let runways = unclaimed_designators(sentence, &list, matched);
        if runways.is_empty() {
            clause_start = whole.end();
            continue;
        }

        let (categories, clause_end) = governing_categories(&keywords, &type_keywords, clause_start, &whole);
        if categories.is_empty() {
            clause_start = whole.end();
            continue;
        }

        let clause = &sentence.text[clause_start..clause_end];
        for category in categories {
            match category {
                Category::Approach => out.approaches.push(Approach::Runways {
                    types: approach_types(clause),
                    runways: runways.clone(),
                    simultaneous,
                }),
                Category::Departure => out.departures.push(Departure::Runways {
                    runways: runways.clone(),
                    simultaneous,
                    instrument,
                }),
            };
        }
        matched.claim(span);
        clause_start = whole.end();
    }
}

/// Categories governing a list: every keyword in its clause before the list
/// (so "LANDING AND DEPARTING RWY 1L" is both), else the first keyword after it
///
/// An approach type stands in for a missing keyword, preceding first. Also
/// returns where the clause ends, which reaches a trailing keyword
/// (`RWY 19 ILS APPROACH`).
fn governing_categories(
    keywords: &[(Range<usize>, Category)],
    type_keywords: &[Range<usize>],
    clause_start: usize,
    list: &Match<'_>,
) -> (Vec<Category>, usize) {
    let in_clause = |range: &Range<usize>| range.start >= clause_start && range.end <= list.start();

    let mut preceding: Vec<Category> = Vec::new();
    for (range, category) in keywords {
        if in_clause(range) && !preceding.contains(category) {
            preceding.push(*category);
        }
    }
    if !preceding.is_empty() {
        return (preceding, list.end());
    }
    if type_keywords.iter().any(in_clause) {
        return (vec![Category::Approach], list.end());
    }
    if let Some((range, category)) = keywords.iter().find(|(range, _)| range.start >= list.end()) {
        return (vec![*category], range.end);
    }
    match type_keywords.iter().find(|range| range.start >= list.end()) {
        Some(range) => (vec![Category::Approach], range.end),
        None => (Vec::new(), list.end()),
    }
}

fn category(keyword: &str) -> Category {
    match keyword {
        k if k.starts_with("APPROACH") || k == "LANDING" || k.starts_with("ARRIVAL") => {
            Category::Approach
        }
        _ => Category::Departure,
    }
}

/// Approach types named in a clause, in order of first mention
fn approach_types(clause: &str) -> Vec<ApproachType> {
    let mut types: Vec<ApproachType> = Vec::new();
    for m in APPROACH_TYPE_RE.find_iter(clause) {
        let kind = match m.as_str() {
            "ILS" => ApproachType::Ils,
            "LOC" | "LOCALIZER" => ApproachType::Loc,
            "RNAV" => ApproachType::Rnav,
            "RNP" => ApproachType::Rnp,
            "GPS" => ApproachType::Gps,
            _ => ApproachType::Visual,
        };
        if !types.contains(&kind) {
            types.push(kind);
        }
    }

    // RNAV and RNP together name one procedure
    if let (Some(rnav), Some(rnp)) = (
        types.iter().position(|t| *t == ApproachType::Rnav),
        types.iter().position(|t| *t == ApproachType::Rnp),
    ) {
        types[rnav.min(rnp)] = ApproachType::RnavRnp;
        types.remove(rnav.max(rnp));
    }
    types
}

/// `24R AND 25L` -> `["24R", "25L"]`, without repeats
fn designators(list: &str) -> Vec<String> {
    let mut runways: Vec<String> = Vec::new();
    for m in RUNWAY_DESIGNATOR_RE.find_iter(list) {
        let designator = m.as_str().to_string();
        if !runways.contains(&designator) {
            runways.push(designator);
        }
    }
    runways
}

/// Designators of a list that no earlier pass claimed
fn unclaimed_designators(
    sentence: &Sentence<'_>,
    list: &Match<'_>,
    matched: &MatchedText,
) -> Vec<String> {
    let mut runways: Vec<String> = Vec::new();
    for m in RUNWAY_DESIGNATOR_RE.find_iter(list.as_str()) {
        let span = sentence.absolute(list.start() + m.start()..list.start() + m.end());
        let designator = m.as_str().to_string();
        if !matched.overlaps(&span) && !runways.contains(&designator) {
            runways.push(designator);
        }
    }
    runways
}

/// Approach or departure sentence with no runway list
fn fallback(sentence: &Sentence<'_>, matched: &mut MatchedText, out: &mut OperationLists) {
    let names_approach = APPROACH_TYPE_RE.is_match(sentence.text)
        && (sentence.contains_phrase("APPROACH") || sentence.contains_phrase("APPROACHES"));
    let names_departures = (sentence.contains_phrase("DEPARTURES")
        || sentence.contains_phrase("DEPARTURE"))
        && (sentence.contains_phrase("IN USE") || sentence.contains_phrase("IN PROGRESS"));

    if names_approach {
        out.approaches.push(Approach::Other {
            text: sentence.text.to_string(),
        });
        matched.claim(sentence.span());
    } else if names_departures {
        out.departures.push(Departure::Other {
            text: sentence.text.to_string(),
        });
        matched.claim(sentence.span());
    }
}
