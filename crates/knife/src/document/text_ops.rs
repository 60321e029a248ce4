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

use widestring::U16String;

use super::Document;
use crate::selection::Selection;
use crate::span_store::SpanStore;

const IDEOGRAPHIC_SPACE: u16 = 0x3000;

fn utf16(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

impl Document {
    /// Replace the current selection with `new_text`, leaving the caret
    /// after it.
    pub fn replace_text(&mut self, new_text: &str) {
        let Selection { start, end } = self.selection;
        self.replace_text_in(new_text, start, end);
    }

    /// Replace `[start, end)` with `new_text`, leaving the caret after it.
    /// Positions past the end of the text are clamped.
    pub fn replace_text_in(&mut self, new_text: &str, start: usize, end: usize) {
        let range = Selection::new(start, end).clamp(self.len());
        let inserted = utf16(new_text);
        let caret = Selection::caret(range.start + inserted.len());
        self.splice(range.start, range.end, &inserted, caret);
    }

    /// Replace the whole text, dropping all formatting.
    pub fn set_text(&mut self, text: &str) {
        let text = U16String::from_str(text);
        let caret = Selection::caret(text.len());
        self.replace_content(text, SpanStore::new(), caret);
    }

    pub fn enter(&mut self) {
        self.replace_text("\n");
    }

    /// Delete the selection, or the character before the caret.
    pub fn backspace(&mut self) {
        let Selection { start, end } = self.selection;
        if start != end {
            self.replace_text_in("", start, end);
        } else if start > 0 {
            let units = self.text.as_slice();
            let width = if start >= 2
                && is_low_surrogate(units[start - 1])
                && is_high_surrogate(units[start - 2])
            {
                2
            } else {
                1
            };
            self.replace_text_in("", start - width, start);
        }
    }

    /// Delete the selection, or the character after the caret.
    pub fn delete(&mut self) {
        let Selection { start, end } = self.selection;
        if start != end {
            self.replace_text_in("", start, end);
        } else if start < self.len() {
            let units = self.text.as_slice();
            let width = if start + 1 < units.len()
                && is_high_surrogate(units[start])
                && is_low_surrogate(units[start + 1])
            {
                2
            } else {
                1
            };
            self.replace_text_in("", start, start + width);
        }
    }

    /// Insert two ideographic spaces at the start of the selection. The
    /// selection moves along with the text after it.
    pub fn insert_indent(&mut self) {
        let Selection { start, end } = self.selection;
        let indent = [IDEOGRAPHIC_SPACE; 2];
        let moved = Selection::new(start + indent.len(), end + indent.len());
        self.splice(start, start, &indent, moved);
    }

    /// Remove all formatting, keeping the text, and put the caret at the end.
    pub fn clear_formats(&mut self) {
        let text = self.text.clone();
        let caret = Selection::caret(text.len());
        self.replace_content(text, SpanStore::new(), caret);
    }

    pub fn plain_text(&self) -> String {
        self.text.to_string_lossy()
    }
}
