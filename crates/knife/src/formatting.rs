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

//! Character-run styles: applying, removing and querying formats over a
//! range of the text.

use crate::color::ColorTransform;
use crate::format::{Format, FormatKind};
use crate::span_store::SpanStore;

pub struct FormattingEngine<'a> {
    spans: &'a mut SpanStore,
    colors: &'a dyn ColorTransform,
}

impl<'a> FormattingEngine<'a> {
    pub fn new(spans: &'a mut SpanStore, colors: &'a dyn ColorTransform) -> Self {
        Self { spans, colors }
    }

    pub fn toggle(&mut self, format: Format, start: usize, end: usize, on: bool) {
        if on {
            self.apply(format, start, end);
        } else {
            self.remove(&format, start, end);
        }
    }

    /// Attach `format` to `[start, end)`. A run carries at most one link, so
    /// existing links are cut out of the range first.
    pub fn apply(&mut self, format: Format, start: usize, end: usize) {
        if start >= end {
            return;
        }
        let format = match format {
            Format::Highlight(color) => {
                Format::Highlight(self.colors.transform(color))
            }
            Format::Link(link) => {
                self.spans.remove_spans_of_kind(FormatKind::Link, start, end);
                Format::Link(link)
            }
            other => other,
        };
        self.spans.add_span(format, start, end);
    }

    /// Cut `[start, end)` out of every span matching `format`, keeping the
    /// parts on either side with their original attributes.
    pub fn remove(&mut self, format: &Format, start: usize, end: usize) {
        if start >= end {
            return;
        }
        self.subtract(format.kind(), |f| f.matches(format), start, end);
    }

    fn subtract(
        &mut self,
        kind: FormatKind,
        matches: impl Fn(&Format) -> bool,
        start: usize,
        end: usize,
    ) {
        let removed = self.spans.remove_where(|span| {
            span.kind() == kind
                && matches(&span.format)
                && span.start < end
                && span.end > start
        });
        for span in removed {
            if span.start < start {
                self.spans.add_span(span.format.clone(), span.start, start);
            }
            if span.end > end {
                self.spans.add_span(span.format, end, span.end);
            }
        }
    }
}

/// Whether `[start, end)` fully carries `format`.
///
/// For a caret the characters on both sides must carry it, so a caret at
/// either end of the text never does.
pub fn contains(
    spans: &SpanStore,
    len: usize,
    format: &Format,
    start: usize,
    end: usize,
) -> bool {
    let covered = |pos: usize| {
        spans
            .iter()
            .any(|span| span.format.matches(format) && span.covers(pos))
    };
    if start > end || end > len {
        false
    } else if start == end {
        start > 0 && start < len && covered(start - 1) && covered(start)
    } else {
        (start..end).all(covered)
    }
}
