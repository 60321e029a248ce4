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

use tracing::debug;

use super::Document;
use crate::history::HistoryEntry;
use crate::selection::Selection;

/// Marks the history as replaying for as long as it lives, so that the
/// edits made while restoring a snapshot are not recorded.
struct Replay<'a> {
    document: &'a mut Document,
}

impl<'a> Replay<'a> {
    fn begin(document: &'a mut Document) -> Self {
        document.history.set_replaying(true);
        Self { document }
    }

    fn restore(&mut self, entry: HistoryEntry) {
        let (text, spans, caret) = entry.into_parts();
        self.document
            .replace_content(text, spans, Selection::caret(caret));
    }
}

impl Drop for Replay<'_> {
    fn drop(&mut self) {
        self.document.history.set_replaying(false);
    }
}

impl Document {
    pub fn undo(&mut self) {
        let Some(entry) = self.history.step_back() else {
            return;
        };
        debug!(cursor = self.history.cursor(), "undo");
        Replay::begin(self).restore(entry);
    }

    pub fn redo(&mut self) {
        let Some(entry) = self.history.step_forward() else {
            return;
        };
        debug!(cursor = self.history.cursor(), "redo");
        Replay::begin(self).restore(entry);
    }

    pub fn undo_valid(&self) -> bool {
        self.history.undo_valid()
    }

    pub fn redo_valid(&self) -> bool {
        self.history.redo_valid()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Stop (or resume) recording text changes.
    pub fn set_history_capturing(&mut self, capturing: bool) {
        self.history.set_capturing(capturing);
    }
}
