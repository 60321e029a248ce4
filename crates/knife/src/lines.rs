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

//! Line styles. Bullets and quotes are attached to whole lines, where a line
//! is a `\n`-separated piece of the text.

use std::ops::Range;

use crate::format::{Format, FormatKind};
use crate::selection::Selection;
use crate::span_store::SpanStore;

const NEWLINE: u16 = b'\n' as u16;

/// Ranges of every `\n`-separated line, newline excluded.
pub fn line_ranges(text: &[u16]) -> Vec<Range<usize>> {
    let mut start = 0;
    text.split(|unit| *unit == NEWLINE)
        .map(|line| {
            let range = start..start + line.len();
            start += line.len() + 1;
            range
        })
        .collect()
}

/// Non-empty lines that either contain the selection or lie inside it.
fn candidate_lines(
    text: &[u16],
    selection: Selection,
) -> impl Iterator<Item = Range<usize>> {
    line_ranges(text).into_iter().filter(move |line| {
        !line.is_empty()
            && ((line.start <= selection.start && selection.end <= line.end)
                || (selection.start <= line.start && line.end <= selection.end))
    })
}

fn line_has(spans: &SpanStore, kind: FormatKind, line: &Range<usize>) -> bool {
    !spans.spans_of_kind(kind, line.start, line.end).is_empty()
}

pub struct LineFormatter<'a> {
    text: &'a [u16],
    spans: &'a mut SpanStore,
}

impl<'a> LineFormatter<'a> {
    pub fn new(text: &'a [u16], spans: &'a mut SpanStore) -> Self {
        Self { text, spans }
    }

    /// Turn a line format on or off for every line touched by `selection`.
    /// Lines already in the requested state are left alone.
    pub fn apply(&mut self, format: Format, selection: Selection, on: bool) {
        let kind = format.kind();
        for line in candidate_lines(self.text, selection) {
            if line_has(self.spans, kind, &line) == on {
                continue;
            }
            if on {
                self.spans.add_span(format.clone(), line.start, line.end);
            } else {
                self.clear_line(kind, &line);
            }
        }
    }

    fn clear_line(&mut self, kind: FormatKind, line: &Range<usize>) {
        let removed = self.spans.remove_spans_of_kind(kind, line.start, line.end);
        for span in removed {
            if span.start < line.start {
                self.spans.add_span(span.format.clone(), span.start, line.start);
            }
            if span.end > line.end {
                self.spans.add_span(span.format, line.end, span.end);
            }
        }
    }
}

/// Whether every line touched by `selection` carries `kind`. True when the
/// selection touches no non-empty line.
pub fn contains(
    text: &[u16],
    spans: &SpanStore,
    kind: FormatKind,
    selection: Selection,
) -> bool {
    candidate_lines(text, selection).all(|line| line_has(spans, kind, &line))
}

#[cfg(test)]
mod tests {
    use widestring::U16String;

    use super::*;
    use crate::format::{BulletStyle, QuoteStyle};
    use crate::span_store::Span;

    fn utf16(text: &str) -> Vec<u16> {
        U16String::from_str(text).into_vec()
    }

    fn bullet() -> Format {
        Format::Bullet(BulletStyle::default())
    }

    fn bullets(text: &str, selection: Selection) -> SpanStore {
        let text = utf16(text);
        let mut spans = SpanStore::new();
        LineFormatter::new(&text, &mut spans).apply(bullet(), selection, true);
        spans
    }

    fn ranges(spans: &SpanStore) -> Vec<(usize, usize)> {
        let mut ranges: Vec<_> = spans.iter().map(|s| (s.start, s.end)).collect();
        ranges.sort();
        ranges
    }

    #[test]
    fn line_offsets_skip_the_newline() {
        assert_eq!(line_ranges(&utf16("ab\n\ncde")), vec![0..2, 3..3, 4..7]);
        assert_eq!(line_ranges(&utf16("ab\n")), vec![0..2, 3..3]);
    }

    #[test]
    fn caret_formats_its_own_line() {
        let spans = bullets("one\ntwo\nthree", Selection::caret(5));
        assert_eq!(ranges(&spans), vec![(4, 7)]);
    }

    #[test]
    fn range_formats_every_line_inside_it() {
        let spans = bullets("one\ntwo\nthree", Selection::new(0, 13));
        assert_eq!(ranges(&spans), vec![(0, 3), (4, 7), (8, 13)]);
    }

    #[test]
    fn partly_selected_lines_are_not_candidates() {
        let spans = bullets("one\ntwo\nthree", Selection::new(1, 6));
        assert!(spans.is_empty());
    }

    #[test]
    fn empty_lines_are_skipped() {
        let spans = bullets("a\n\nb", Selection::new(0, 4));
        assert_eq!(ranges(&spans), vec![(0, 1), (3, 4)]);
    }

    #[test]
    fn formatted_lines_are_left_alone() {
        let text = utf16("a\nb");
        let mut spans = SpanStore::new();
        spans.add_span(bullet(), 0, 1);
        LineFormatter::new(&text, &mut spans).apply(
            bullet(),
            Selection::new(0, 3),
            true,
        );
        assert_eq!(ranges(&spans), vec![(0, 1), (2, 3)]);
    }

    #[test]
    fn already_bulleted_middle_line_keeps_its_span() {
        let text = utf16("a\nb\nc");
        let middle = Format::Bullet(BulletStyle {
            radius: 9,
            ..BulletStyle::default()
        });
        let mut spans = SpanStore::new();
        spans.add_span(middle.clone(), 2, 3);
        LineFormatter::new(&text, &mut spans).apply(
            bullet(),
            Selection::new(0, 5),
            true,
        );
        let mut kept: Vec<Span> = spans.iter().cloned().collect();
        kept.sort_by_key(|s| s.start);
        assert_eq!(
            kept,
            vec![
                Span::new(bullet(), 0, 1),
                Span::new(middle, 2, 3),
                Span::new(bullet(), 4, 5),
            ]
        );
    }

    #[test]
    fn caret_on_an_empty_line_changes_nothing() {
        let spans = bullets("a\n\nb", Selection::caret(2));
        assert!(spans.is_empty());

        let text = utf16("a\n\nb");
        let mut spans = SpanStore::new();
        spans.add_span(bullet(), 0, 1);
        LineFormatter::new(&text, &mut spans).apply(
            bullet(),
            Selection::caret(2),
            false,
        );
        assert_eq!(ranges(&spans), vec![(0, 1)]);
    }

    #[test]
    fn turning_off_clears_only_touched_lines() {
        let text = utf16("a\nb\nc");
        let mut spans = SpanStore::new();
        spans.add_span(Format::Quote(QuoteStyle::default()), 0, 5);
        let quote = Format::Quote(QuoteStyle::default());
        LineFormatter::new(&text, &mut spans).apply(
            quote.clone(),
            Selection::caret(2),
            false,
        );
        let kept: Vec<Span> = spans.iter().cloned().collect();
        assert_eq!(
            kept,
            vec![Span::new(quote.clone(), 0, 2), Span::new(quote, 3, 5)]
        );
        assert!(!contains(&text, &spans, FormatKind::Quote, Selection::caret(2)));
        assert!(contains(&text, &spans, FormatKind::Quote, Selection::caret(0)));
    }

    #[test]
    fn contains_requires_every_candidate_line() {
        let text = utf16("a\nb");
        let spans = bullets("a\nb", Selection::caret(0));
        assert!(contains(&text, &spans, FormatKind::Bullet, Selection::caret(0)));
        assert!(!contains(&text, &spans, FormatKind::Bullet, Selection::new(0, 3)));
    }

    #[test]
    fn no_candidate_lines_is_vacuously_true() {
        let text = utf16("a\n\nb");
        let spans = SpanStore::new();
        assert!(contains(&text, &spans, FormatKind::Bullet, Selection::caret(2)));
    }
}
