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

use super::Document;
use crate::html::{self, TagHandler};
use crate::selection::Selection;

impl Document {
    /// Replace the content with imported HTML, putting the caret at the end.
    pub fn from_html(&mut self, html: &str) {
        let content = html::parse(html, &self.config, &*self.colors);
        let caret = Selection::caret(content.text.len());
        self.replace_content(content.text, content.spans, caret);
    }

    /// Like [`Document::from_html`], with `handler` deciding what to do
    /// with elements the importer does not know.
    pub fn from_html_with_handler(&mut self, html: &str, handler: &mut dyn TagHandler) {
        let content = html::parse_with_handler(html, &self.config, handler);
        let caret = Selection::caret(content.text.len());
        self.replace_content(content.text, content.spans, caret);
    }

    pub fn to_html(&self) -> String {
        html::to_html(self.text.as_slice(), &self.spans, &*self.colors)
    }
}
