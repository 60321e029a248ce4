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

//! Snapshot-based undo/redo history.

use std::collections::VecDeque;

use tracing::trace;
use widestring::{U16Str, U16String};

use crate::config::ConfigError;
use crate::span_store::SpanStore;

/// The text and spans of a document at one point in time, with the caret
/// position to restore.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    text: U16String,
    spans: SpanStore,
    caret_end: usize,
}

impl HistoryEntry {
    pub fn new(text: &U16Str, spans: &SpanStore, caret_end: usize) -> Self {
        Self {
            text: text.to_ustring(),
            spans: spans.clone(),
            caret_end,
        }
    }

    pub fn text(&self) -> &U16Str {
        &self.text
    }

    pub fn spans(&self) -> &SpanStore {
        &self.spans
    }

    pub fn caret_end(&self) -> usize {
        self.caret_end
    }

    pub(crate) fn into_parts(self) -> (U16String, SpanStore, usize) {
        (self.text, self.spans, self.caret_end)
    }
}

/// Bounded undo/redo history.
///
/// Entries hold the state *before* each recorded change. The state after the
/// latest change is kept in `pending_after` so that the last undo can be
/// redone.
#[derive(Debug)]
pub struct HistoryManager {
    enabled: bool,
    size: usize,
    entries: VecDeque<HistoryEntry>,
    cursor: usize,
    capturing: bool,
    replaying: bool,
    pending_before: Option<HistoryEntry>,
    pending_after: Option<HistoryEntry>,
}

impl HistoryManager {
    pub fn new(enabled: bool, size: usize) -> Result<Self, ConfigError> {
        if enabled && size == 0 {
            return Err(ConfigError::HistorySize);
        }
        Ok(Self {
            enabled,
            size,
            entries: VecDeque::with_capacity(size.min(64)),
            cursor: 0,
            capturing: true,
            replaying: false,
            pending_before: None,
            pending_after: None,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_replaying(&self) -> bool {
        self.replaying
    }

    pub fn set_capturing(&mut self, capturing: bool) {
        self.capturing = capturing;
    }

    pub(crate) fn set_replaying(&mut self, replaying: bool) {
        self.replaying = replaying;
    }

    fn should_capture(&self) -> bool {
        self.enabled && self.capturing && !self.replaying
    }

    /// Record the state before a change. `snapshot` is only called when the
    /// change will be captured.
    pub fn before_change(&mut self, snapshot: impl FnOnce() -> HistoryEntry) {
        if self.should_capture() {
            self.pending_before = Some(snapshot());
        }
    }

    /// Record the state after a change and, if the text changed, push the
    /// state from before it. Anything that could have been redone is lost.
    pub fn after_change(&mut self, snapshot: impl FnOnce() -> HistoryEntry) {
        if !self.should_capture() {
            return;
        }
        let after = snapshot();
        let before = self.pending_before.take();
        let after = self.pending_after.insert(after);
        let Some(before) = before else {
            return;
        };
        if before.text == after.text {
            return;
        }

        self.entries.truncate(self.cursor);
        if self.entries.len() >= self.size {
            self.entries.pop_front();
            trace!(size = self.size, "history full, evicted oldest entry");
        }
        self.entries.push_back(before);
        self.cursor = self.entries.len();
    }

    pub fn undo_valid(&self) -> bool {
        self.enabled && !self.replaying && self.cursor > 0
    }

    pub fn redo_valid(&self) -> bool {
        if !self.enabled || self.replaying || self.entries.is_empty() {
            return false;
        }
        self.cursor + 1 < self.entries.len() || self.pending_after.is_some()
    }

    /// Move back one step, returning the state to restore.
    pub(crate) fn step_back(&mut self) -> Option<HistoryEntry> {
        if !self.undo_valid() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor).cloned()
    }

    /// Move forward one step, returning the state to restore.
    pub(crate) fn step_forward(&mut self) -> Option<HistoryEntry> {
        if !self.redo_valid() {
            return None;
        }
        if self.cursor + 1 >= self.entries.len() {
            self.cursor = self.entries.len();
            self.pending_after.clone()
        } else {
            self.cursor += 1;
            self.entries.get(self.cursor).cloned()
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
        self.pending_before = None;
        self.pending_after = None;
    }
}

#[cfg(test)]
mod tests {
    use speculoos::prelude::*;

    use super::*;

    fn entry(text: &str) -> HistoryEntry {
        HistoryEntry::new(
            &U16String::from_str(text),
            &SpanStore::new(),
            text.len(),
        )
    }

    fn record(history: &mut HistoryManager, before: &str, after: &str) {
        history.before_change(|| entry(before));
        history.after_change(|| entry(after));
    }

    fn text_of(entry: Option<HistoryEntry>) -> String {
        entry.map(|e| e.text().to_string_lossy()).unwrap_or_default()
    }

    #[test]
    fn zero_size_is_rejected_when_enabled() {
        assert_that!(HistoryManager::new(true, 0)).is_err();
        assert_that!(HistoryManager::new(false, 0)).is_ok();
    }

    #[test]
    fn changes_are_recorded_in_order() {
        let mut history = HistoryManager::new(true, 10).unwrap();
        record(&mut history, "", "a");
        record(&mut history, "a", "ab");
        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), 2);
        assert_eq!(text_of(history.step_back()), "a");
        assert_eq!(text_of(history.step_back()), "");
        assert!(!history.undo_valid());
    }

    #[test]
    fn unchanged_text_is_not_recorded() {
        let mut history = HistoryManager::new(true, 10).unwrap();
        record(&mut history, "same", "same");
        assert!(history.is_empty());
    }

    #[test]
    fn oldest_entries_are_evicted() {
        let mut history = HistoryManager::new(true, 2).unwrap();
        record(&mut history, "", "a");
        record(&mut history, "a", "ab");
        record(&mut history, "ab", "abc");
        assert_eq!(history.len(), 2);
        assert_eq!(text_of(history.step_back()), "ab");
        assert_eq!(text_of(history.step_back()), "a");
        assert!(!history.undo_valid());
    }

    #[test]
    fn redo_at_the_tail_restores_the_latest_state() {
        let mut history = HistoryManager::new(true, 10).unwrap();
        record(&mut history, "", "a");
        record(&mut history, "a", "ab");
        history.step_back();
        history.step_back();
        assert_eq!(text_of(history.step_forward()), "a");
        assert_eq!(text_of(history.step_forward()), "ab");
        assert_eq!(history.cursor(), 2);
    }

    #[test]
    fn recording_after_undo_drops_forward_history() {
        let mut history = HistoryManager::new(true, 10).unwrap();
        record(&mut history, "", "a");
        record(&mut history, "a", "ab");
        history.step_back();
        record(&mut history, "a", "ax");
        assert_eq!(history.len(), 2);
        assert_eq!(text_of(history.step_back()), "a");
        assert_eq!(text_of(history.step_forward()), "ax");
    }

    #[test]
    fn nothing_is_recorded_while_replaying_or_not_capturing() {
        let mut history = HistoryManager::new(true, 10).unwrap();
        history.set_replaying(true);
        record(&mut history, "", "a");
        assert!(!history.undo_valid());
        history.set_replaying(false);

        history.set_capturing(false);
        record(&mut history, "", "a");
        assert!(history.is_empty());
    }

    #[test]
    fn disabled_history_is_inert() {
        let mut history = HistoryManager::new(false, 0).unwrap();
        record(&mut history, "", "a");
        assert!(!history.undo_valid());
        assert!(!history.redo_valid());
        assert!(history.step_back().is_none());
    }

    #[test]
    fn clearing_forgets_everything() {
        let mut history = HistoryManager::new(true, 10).unwrap();
        record(&mut history, "", "a");
        history.clear();
        assert!(!history.undo_valid());
        assert!(!history.redo_valid());
        assert_eq!(history.cursor(), 0);
    }
}
