//! Advisory pass: fixed phrase membership per sentence

use super::matched_text::{MatchedText, UniqueList};
use super::sentences::{Sentence, find_phrase};
use crate::app::models::Advisory;
use crate::constants::{ADVISORY_PHRASES, AdvisoryKind};

/// Run the advisory pass over one sentence
///
/// Advisories quote their whole sentence, so phrases inside text another
/// pass already claimed still count. A sentence yields at most one advisory
/// per kind, and a bare hold-short reminder only when nothing more specific
/// matched (`LAND AND HOLD SHORT` is not also a hold-short advisory).
pub fn extract(
    sentence: &Sentence<'_>,
    extra_phrases: &[String],
    matched: &mut MatchedText,
    out: &mut UniqueList<Advisory>,
) {
    let mut kinds: Vec<AdvisoryKind> = Vec::new();

    let builtin = ADVISORY_PHRASES
        .iter()
        .map(|(phrase, kind)| (*phrase, *kind));
    let custom = extra_phrases
        .iter()
        .map(|phrase| (phrase.as_str(), AdvisoryKind::Custom));

    for (phrase, kind) in builtin.chain(custom) {
        let Some(local) = find_phrase(sentence.text, phrase, 0) else {
            continue;
        };
        if kind == AdvisoryKind::HoldShort && !kinds.is_empty() {
            continue;
        }
        matched.claim(sentence.absolute(local));
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }

    // A specific kind found after HOLD SHORT still supersedes it
    if kinds.len() > 1 {
        kinds.retain(|k| *k != AdvisoryKind::HoldShort);
    }

    for kind in kinds {
        out.push(Advisory {
            kind,
            text: sentence.text.to_string(),
        });
    }
}
