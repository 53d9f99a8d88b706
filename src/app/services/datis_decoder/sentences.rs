//! Sentence splitting and phrase search over normalized broadcast text

use regex::Match;
use std::ops::Range;

/// One sentence of normalized text and its byte offset in the full text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentence<'a> {
    pub text: &'a str,
    pub start: usize,
}

impl<'a> Sentence<'a> {
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    pub fn span(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// Absolute span of a regex match found in this sentence's text
    pub fn span_of(&self, m: &Match<'_>) -> Range<usize> {
        self.start + m.start()..self.start + m.end()
    }

    /// Absolute span of a local byte range
    pub fn absolute(&self, local: Range<usize>) -> Range<usize> {
        self.start + local.start..self.start + local.end
    }

    pub fn contains_phrase(&self, phrase: &str) -> bool {
        find_phrase(self.text, phrase, 0).is_some()
    }
}

/// Split on `.` except between two digits (`121.75`, `29.92`)
///
/// Sentences are trimmed and empty ones dropped.
pub fn split(text: &str) -> Vec<Sentence<'_>> {
    let bytes = text.as_bytes();
    let mut sentences = Vec::new();
    let mut start = 0;

    for (i, &byte) in bytes.iter().enumerate() {
        if byte != b'.' {
            continue;
        }
        let between_digits = i > 0
            && bytes[i - 1].is_ascii_digit()
            && bytes.get(i + 1).is_some_and(u8::is_ascii_digit);
        if between_digits {
            continue;
        }
        push_trimmed(text, start..i, &mut sentences);
        start = i + 1;
    }
    push_trimmed(text, start..text.len(), &mut sentences);

    sentences
}

fn push_trimmed<'a>(text: &'a str, range: Range<usize>, out: &mut Vec<Sentence<'a>>) {
    let slice = &text[range.clone()];
    let leading = slice.len() - slice.trim_start().len();
    let trimmed = slice.trim();
    if !trimmed.is_empty() {
        out.push(Sentence {
            text: trimmed,
            start: range.start + leading,
        });
    }
}

/// Find `phrase` as whole words in `haystack` at or after `from`
///
/// Returns the local byte range of the first occurrence.
pub fn find_phrase(haystack: &str, phrase: &str, from: usize) -> Option<Range<usize>> {
    if phrase.is_empty() {
        return None;
    }
    let bytes = haystack.as_bytes();
    let tail = haystack.get(from..)?;
    tail.match_indices(phrase).find_map(|(offset, _)| {
        let start = from + offset;
        let end = start + phrase.len();
        let clean_start = start == 0 || !bytes[start - 1].is_ascii_alphanumeric();
        let clean_end = end == bytes.len() || !bytes[end].is_ascii_alphanumeric();
        (clean_start && clean_end).then_some(start..end)
    })
}
