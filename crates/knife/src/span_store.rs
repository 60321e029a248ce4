// Copyright 2026 The Matrix.org Foundation C.I.C.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Storage of formatting spans over the text buffer.

use std::ops::Range;

use crate::format::{Format, FormatKind};

/// A format attached to the half-open range `[start, end)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    pub format: Format,
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(format: Format, start: usize, end: usize) -> Self {
        Self { format, start, end }
    }

    pub fn kind(&self) -> FormatKind {
        self.format.kind()
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Whether this span intersects the query range. A non-empty query only
    /// sees spans sharing at least one position with it. An empty query at
    /// `p` sees every span that contains or touches `p`.
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        if start == end || self.start == self.end {
            self.start <= end && self.end >= start
        } else {
            self.start < end && self.end > start
        }
    }

    /// Whether the position `pos` lies inside this span.
    pub fn covers(&self, pos: usize) -> bool {
        self.start <= pos && pos < self.end
    }
}

/// Every span of a document, in insertion order. Overlapping and adjacent
/// spans of the same kind are kept apart; nothing is merged implicitly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpanStore {
    spans: Vec<Span>,
}

impl SpanStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Span> {
        self.spans.iter()
    }

    /// Attach a span. Ranges with `start > end` are ignored.
    pub fn add_span(&mut self, format: Format, start: usize, end: usize) {
        if start > end {
            return;
        }
        self.spans.push(Span::new(format, start, end));
    }

    /// Remove and return every span of `kind` overlapping `[start, end)`.
    pub fn remove_spans_of_kind(
        &mut self,
        kind: FormatKind,
        start: usize,
        end: usize,
    ) -> Vec<Span> {
        self.remove_where(|span| span.kind() == kind && span.overlaps(start, end))
    }

    /// Copies of every span of `kind` overlapping `[start, end)`.
    pub fn spans_of_kind(
        &self,
        kind: FormatKind,
        start: usize,
        end: usize,
    ) -> Vec<Span> {
        self.spans
            .iter()
            .filter(|span| span.kind() == kind && span.overlaps(start, end))
            .cloned()
            .collect()
    }

    /// The first span of `kind` covering `pos`.
    pub fn span_at(&self, kind: FormatKind, pos: usize) -> Option<Span> {
        self.spans
            .iter()
            .find(|span| span.kind() == kind && span.covers(pos))
            .cloned()
    }

    /// Remove one span equal to `span`. Returns whether one was found.
    pub fn remove_span(&mut self, span: &Span) -> bool {
        match self.spans.iter().position(|s| s == span) {
            Some(index) => {
                self.spans.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.spans.clear();
    }

    pub(crate) fn remove_where(
        &mut self,
        mut predicate: impl FnMut(&Span) -> bool,
    ) -> Vec<Span> {
        let mut removed = Vec::new();
        self.spans.retain(|span| {
            if predicate(span) {
                removed.push(span.clone());
                false
            } else {
                true
            }
        });
        removed
    }

    /// Shift spans after the text in `[start, end)` was replaced by
    /// `inserted` code units.
    ///
    /// Spans behave as exclusive at both ends: text inserted at a span
    /// boundary stays outside it, text inserted strictly inside extends it.
    /// Spans left with no characters are dropped.
    pub fn adjust_for_replace(
        &mut self,
        start: usize,
        end: usize,
        inserted: usize,
    ) {
        let removed = end - start;
        let collapse = |pos: usize| {
            if pos >= end {
                pos - removed
            } else if pos > start {
                start
            } else {
                pos
            }
        };
        self.spans.retain_mut(|span| {
            let mut new_start = collapse(span.start);
            let mut new_end = collapse(span.end);
            if new_start >= new_end {
                return false;
            }
            if new_start >= start {
                new_start += inserted;
            }
            if new_end > start {
                new_end += inserted;
            }
            span.start = new_start;
            span.end = new_end;
            true
        });
    }

    /// Panic if any span lies outside `[0, len]` or is inverted.
    pub fn assert_invariants(&self, len: usize) {
        for span in &self.spans {
            assert!(
                span.start <= span.end && span.end <= len,
                "span {:?} out of bounds for text of length {}",
                span,
                len
            );
        }
    }
}

impl IntoIterator for SpanStore {
    type Item = Span;
    type IntoIter = std::vec::IntoIter<Span>;

    fn into_iter(self) -> Self::IntoIter {
        self.spans.into_iter()
    }
}

impl<'a> IntoIterator for &'a SpanStore {
    type Item = &'a Span;
    type IntoIter = std::slice::Iter<'a, Span>;

    fn into_iter(self) -> Self::IntoIter {
        self.spans.iter()
    }
}

impl FromIterator<Span> for SpanStore {
    fn from_iter<T: IntoIterator<Item = Span>>(iter: T) -> Self {
        Self {
            spans: iter.into_iter().collect(),
        }
    }
}
