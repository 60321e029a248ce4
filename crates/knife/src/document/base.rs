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

use std::fmt;

use widestring::{U16Str, U16String};

use crate::color::{ColorTransform, IdentityColors};
use crate::config::{ConfigError, EditorConfig};
use crate::history::{HistoryEntry, HistoryManager};
use crate::selection::Selection;
use crate::span_store::{Span, SpanStore};

/// A rich text document.
///
/// Text is stored as UTF-16 code units and every position in the API is a
/// code-unit offset. Formatting lives in a [`SpanStore`] beside the text;
/// text edits shift the spans and are recorded for undo.
pub struct Document {
    /// The text content.
    pub(crate) text: U16String,

    /// Formatting spans over `text`.
    pub(crate) spans: SpanStore,

    /// Current selection, always within `text`.
    pub(crate) selection: Selection,

    pub(crate) history: HistoryManager,

    pub(crate) config: EditorConfig,

    /// Applied to highlight colours on the way in and reversed on export.
    pub(crate) colors: Box<dyn ColorTransform>,
}

impl Document {
    /// Create an empty document that stores colours as given.
    pub fn new(config: EditorConfig) -> Result<Self, ConfigError> {
        Self::with_color_transform(config, IdentityColors)
    }

    /// Create an empty document that passes highlight colours through
    /// `colors`.
    pub fn with_color_transform(
        config: EditorConfig,
        colors: impl ColorTransform + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let history =
            HistoryManager::new(config.history_enable, config.history_size)?;
        Ok(Self {
            text: U16String::new(),
            spans: SpanStore::new(),
            selection: Selection::default(),
            history,
            config,
            colors: Box::new(colors),
        })
    }

    /// The document length in UTF-16 code units.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn text(&self) -> &U16Str {
        &self.text
    }

    /// A copy of every span, in the order they were added.
    pub fn spans(&self) -> Vec<Span> {
        self.spans.iter().cloned().collect()
    }

    pub fn span_store(&self) -> &SpanStore {
        &self.spans
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    /// Replace the units in `[start, end)` with `inserted`, leaving
    /// `selection` selected afterwards. `start <= end <= len` must hold.
    pub(crate) fn splice(
        &mut self,
        start: usize,
        end: usize,
        inserted: &[u16],
        selection: Selection,
    ) {
        self.notify_before_change();
        let mut units = std::mem::take(&mut self.text).into_vec();
        units.splice(start..end, inserted.iter().copied());
        self.text = U16String::from_vec(units);
        self.spans.adjust_for_replace(start, end, inserted.len());
        self.selection = selection.clamp(self.len());
        self.notify_after_change();
        self.after_mutation();
    }

    /// Swap in new text and spans wholesale.
    pub(crate) fn replace_content(
        &mut self,
        text: U16String,
        spans: SpanStore,
        selection: Selection,
    ) {
        self.notify_before_change();
        self.text = text;
        self.spans = spans;
        self.selection = selection.clamp(self.len());
        self.notify_after_change();
        self.after_mutation();
    }

    fn notify_before_change(&mut self) {
        let (text, spans, caret) = (&self.text, &self.spans, self.selection.end);
        self.history
            .before_change(|| HistoryEntry::new(text, spans, caret));
    }

    fn notify_after_change(&mut self) {
        let (text, spans, caret) = (&self.text, &self.spans, self.selection.end);
        self.history
            .after_change(|| HistoryEntry::new(text, spans, caret));
    }

    pub(crate) fn after_mutation(&self) {
        #[cfg(feature = "assert-invariants")]
        self.explicitly_assert_invariants();
    }

    /// Panic if any span or the selection lies outside the text.
    pub fn explicitly_assert_invariants(&self) {
        self.spans.assert_invariants(self.len());
        assert!(
            self.selection.start <= self.selection.end
                && self.selection.end <= self.len(),
            "selection {:?} out of bounds for text of length {}",
            self.selection,
            self.len()
        );
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("text", &self.text.to_string_lossy())
            .field("spans", &self.spans)
            .field("selection", &self.selection)
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use speculoos::prelude::*;

    use super::*;
    use crate::format::{Format, Typeface};

    #[test]
    fn new_document_is_empty() {
        let doc = Document::new(EditorConfig::default()).unwrap();
        assert!(doc.is_empty());
        assert_eq!(doc.selection(), Selection::caret(0));
        assert_that!(doc.spans()).is_empty();
    }

    #[test]
    fn document_can_move_between_threads() {
        fn assert_send<T: Send>() {}
        assert_send::<Document>();
    }

    #[test]
    fn zero_history_size_is_rejected() {
        let config = EditorConfig {
            history_size: 0,
            ..Default::default()
        };
        assert_eq!(
            Document::new(config).err(),
            Some(ConfigError::HistorySize)
        );
    }

    #[test]
    fn disabled_history_may_have_zero_size() {
        let config = EditorConfig {
            history_enable: false,
            history_size: 0,
            ..Default::default()
        };
        assert_that!(Document::new(config)).is_ok();
    }

    #[test]
    fn splice_shifts_spans_and_moves_selection() {
        let mut doc = Document::new(EditorConfig::default()).unwrap();
        doc.set_text("hello");
        doc.spans.add_span(Format::Style(Typeface::Bold), 1, 4);
        doc.splice(0, 0, &[b'>' as u16], Selection::caret(1));
        assert_eq!(doc.plain_text(), ">hello");
        assert_eq!(doc.spans()[0].range(), 2..5);
        assert_eq!(doc.selection(), Selection::caret(1));
        doc.explicitly_assert_invariants();
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn invariant_check_catches_bad_spans() {
        let mut doc = Document::new(EditorConfig::default()).unwrap();
        doc.spans.add_span(Format::Underline, 0, 3);
        doc.explicitly_assert_invariants();
    }
}
