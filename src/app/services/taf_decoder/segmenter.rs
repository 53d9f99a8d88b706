//! Splits TAF text into header fields and change segments

use crate::app::models::{DayTime, SegmentKind, TafPeriod};
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

static STATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9]{3}$").expect("valid station regex"));

static ISSUE_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{6})Z$").expect("valid issue time regex"));

static PERIOD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})/(\d{4})$").expect("valid period regex"));

static SINGLE_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}$").expect("valid single time regex"));

/// `FM151800`, or `FM1518` without minutes
static FROM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^FM(\d{4}(?:\d{2})?)$").expect("valid FM regex"));

static PROBABILITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^PROB(\d{2})$").expect("valid PROB regex"));

/// One segment's kind and the groups it contains
#[derive(Debug, Clone, PartialEq)]
pub struct RawSegment<'a> {
    pub kind: SegmentKind,
    pub tokens: Vec<&'a str>,
}

/// Header fields and segments of one forecast
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentedTaf<'a> {
    pub station: Option<String>,
    pub issued: Option<DayTime>,
    pub valid_from: Option<DayTime>,
    pub valid_to: Option<DayTime>,
    pub amended: bool,
    pub corrected: bool,
    pub nil: bool,
    pub segments: Vec<RawSegment<'a>>,
    pub remark_tokens: Vec<&'a str>,
}

/// Split canonical TAF tokens into header and segments
pub fn segment<'a>(tokens: &[&'a str]) -> SegmentedTaf<'a> {
    let mut taf = SegmentedTaf::default();

    let (tokens, remarks) = match tokens.iter().position(|t| *t == "RMK") {
        Some(index) => (&tokens[..index], &tokens[index + 1..]),
        None => (tokens, &tokens[tokens.len()..]),
    };
    taf.remark_tokens = remarks.to_vec();

    let mut i = read_header(tokens, &mut taf);

    let mut current: Option<RawSegment<'a>> = None;
    if let Some(caps) = tokens.get(i).and_then(|t| PERIOD_RE.captures(t)) {
        taf.valid_from = DayTime::parse_ddhh(&caps[1]);
        taf.valid_to = DayTime::parse_ddhh(&caps[2]);
        current = Some(RawSegment {
            kind: SegmentKind::Main,
            tokens: Vec::new(),
        });
        i += 1;
    }

    while i < tokens.len() {
        if let Some((kind, consumed)) = change_group(&tokens[i..], &taf) {
            trace!("TAF change group {:?} at token {}", kind, i);
            taf.segments.extend(current.take());
            current = Some(RawSegment {
                kind,
                tokens: Vec::new(),
            });
            i += consumed;
            continue;
        }

        current
            .get_or_insert_with(|| RawSegment {
                kind: SegmentKind::Main,
                tokens: Vec::new(),
            })
            .tokens
            .push(tokens[i]);
        i += 1;
    }
    taf.segments.extend(current);

    taf
}

/// Read `TAF`, `AMD`/`COR`, station, issue time and `NIL`
fn read_header(tokens: &[&str], taf: &mut SegmentedTaf<'_>) -> usize {
    let mut i = 0;
    if tokens.first() == Some(&"TAF") {
        i += 1;
    }
    i += read_flags(&tokens[i..], taf);

    if let Some(token) = tokens.get(i).filter(|t| STATION_RE.is_match(t)) {
        taf.station = Some(token.to_string());
        i += 1;
    }
    if let Some(caps) = tokens.get(i).and_then(|t| ISSUE_TIME_RE.captures(t)) {
        taf.issued = DayTime::parse_ddhhmm(&caps[1]);
        i += 1;
    }
    i + read_flags(&tokens[i..], taf)
}

fn read_flags(tokens: &[&str], taf: &mut SegmentedTaf<'_>) -> usize {
    let mut consumed = 0;
    for token in tokens {
        match *token {
            "AMD" => taf.amended = true,
            "COR" | "CC" => taf.corrected = true,
            "NIL" => taf.nil = true,
            _ => break,
        }
        consumed += 1;
    }
    consumed
}

/// Recognize a change group at the start of `tokens`
///
/// Returns the segment kind and how many tokens the group header used.
fn change_group(tokens: &[&str], taf: &SegmentedTaf<'_>) -> Option<(SegmentKind, usize)> {
    let first = *tokens.first()?;

    if let Some(caps) = FROM_RE.captures(first) {
        let digits = &caps[1];
        let at = if digits.len() == 4 {
            DayTime::parse_ddhh(digits)?
        } else {
            DayTime::parse_ddhhmm(digits)?
        };
        return Some((SegmentKind::From { at }, 1));
    }

    match first {
        "BECMG" => {
            let (period, used) = period_after(&tokens[1..], taf);
            Some((SegmentKind::Becoming { period }, 1 + used))
        }
        "TEMPO" => {
            let (period, used) = period_after(&tokens[1..], taf);
            Some((SegmentKind::Temporary { period }, 1 + used))
        }
        _ => {
            let caps = PROBABILITY_RE.captures(first)?;
            let percent: u8 = caps[1].parse().ok()?;
            let temporary = tokens.get(1) == Some(&"TEMPO");
            let skip = 1 + usize::from(temporary);
            let (period, used) = period_after(&tokens[skip..], taf);
            Some((
                SegmentKind::Probability {
                    percent,
                    period,
                    temporary,
                },
                skip + used,
            ))
        }
    }
}

/// Optional validity right after a change keyword
///
/// A `ddhh/ddhh` range is always taken. A bare `ddhh` is read as a time only
/// when its day falls on the forecast's first or last valid day, otherwise it
/// is left for the segment (it is most likely metric visibility).
fn period_after(tokens: &[&str], taf: &SegmentedTaf<'_>) -> (Option<TafPeriod>, usize) {
    let Some(token) = tokens.first() else {
        return (None, 0);
    };

    if let Some(caps) = PERIOD_RE.captures(token) {
        if let Some(from) = DayTime::parse_ddhh(&caps[1]) {
            let to = DayTime::parse_ddhh(&caps[2]);
            return (Some(TafPeriod { from, to }), 1);
        }
    }

    if SINGLE_TIME_RE.is_match(token) {
        let valid_days = [taf.valid_from, taf.valid_to]
            .iter()
            .flatten()
            .map(|t| t.day)
            .collect::<Vec<_>>();
        if let Some(from) = DayTime::parse_ddhh(token).filter(|t| valid_days.contains(&t.day)) {
            return (Some(TafPeriod { from, to: None }), 1);
        }
    }

    (None, 0)
}
