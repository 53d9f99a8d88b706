//! Bookkeeping for which parts of a broadcast have been decoded
//!
//! Every extraction pass claims the byte spans it turned into items. Later
//! passes skip candidates that overlap a claim, so one phrase never produces
//! two items. One value lives per decode call and is passed explicitly to
//! each pass.

use std::collections::{BTreeMap, HashSet};
use std::fmt::Display;
use std::ops::Range;

/// Set of claimed byte spans, kept disjoint and merged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchedText {
    /// start -> end of each claimed span
    spans: BTreeMap<usize, usize>,
}

impl MatchedText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a span, merging it with any span it touches
    pub fn claim(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        let (mut start, mut end) = (range.start, range.end);

        if let Some((&s, &e)) = self.spans.range(..=start).next_back() {
            if e >= start {
                start = s;
                end = end.max(e);
            }
        }
        let absorbed: Vec<usize> = self.spans.range(start..=end).map(|(&s, _)| s).collect();
        for s in absorbed {
            if let Some(e) = self.spans.remove(&s) {
                end = end.max(e);
            }
        }
        self.spans.insert(start, end);
    }

    /// Whether any byte of `range` is already claimed
    pub fn overlaps(&self, range: &Range<usize>) -> bool {
        if range.is_empty() {
            return false;
        }
        if let Some((_, &e)) = self.spans.range(..=range.start).next_back() {
            if e > range.start {
                return true;
            }
        }
        self.spans.range(range.start..range.end).next().is_some()
    }

    /// Number of disjoint claimed spans
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn spans(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.spans.iter().map(|(&s, &e)| s..e)
    }
}

/// Ordered list that drops items whose rendering was already seen
#[derive(Debug, Clone)]
pub struct UniqueList<T> {
    items: Vec<T>,
    seen: HashSet<String>,
}

impl<T> Default for UniqueList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            seen: HashSet::new(),
        }
    }
}

impl<T: Display> UniqueList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append unless an item with the same decoded string exists
    pub fn push(&mut self, item: T) -> bool {
        if self.seen.insert(item.to_string()) {
            self.items.push(item);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}
