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

use tracing::trace;

use super::Document;
use crate::color::Color;
use crate::format::{Format, StyleKind, Typeface};
use crate::formatting::{self, FormattingEngine};
use crate::lines::{self, LineFormatter};
use crate::selection::Selection;

impl Document {
    pub(crate) fn format_for(&self, style: &StyleKind) -> Format {
        match style {
            StyleKind::Bold => Format::Style(Typeface::Bold),
            StyleKind::Italic => Format::Style(Typeface::Italic),
            StyleKind::Underline => Format::Underline,
            StyleKind::Strikethrough => Format::Strikethrough,
            StyleKind::Highlight(color) => Format::Highlight(*color),
            StyleKind::Link(url) => Format::Link(self.config.link_style(url.as_str())),
            StyleKind::Bullet => Format::Bullet(self.config.bullet_style()),
            StyleKind::Quote => Format::Quote(self.config.quote_style()),
        }
    }

    /// Turn `style` on or off over `selection`.
    ///
    /// Bullets and quotes apply to whole lines touched by the selection;
    /// every other style applies to exactly the selected characters.
    pub fn toggle_style(&mut self, style: StyleKind, selection: Selection, on: bool) {
        let selection = selection.clamp(self.len());
        let format = self.format_for(&style);
        self.toggle_format(format, selection, on);
    }

    fn toggle_format(&mut self, format: Format, selection: Selection, on: bool) {
        if format.is_line_format() {
            LineFormatter::new(self.text.as_slice(), &mut self.spans)
                .apply(format, selection, on);
        } else {
            FormattingEngine::new(&mut self.spans, &*self.colors).toggle(
                format,
                selection.start,
                selection.end,
                on,
            );
        }
        self.after_mutation();
    }

    /// Whether `selection` fully carries `style`.
    ///
    /// Highlights and links match whatever their colour or URL.
    pub fn contains(&self, style: &StyleKind, selection: Selection) -> bool {
        let format = self.format_for(style);
        self.contains_format(&format, selection)
    }

    fn contains_format(&self, format: &Format, selection: Selection) -> bool {
        if format.is_line_format() {
            lines::contains(
                self.text.as_slice(),
                &self.spans,
                format.kind(),
                selection.clamp(self.len()),
            )
        } else {
            formatting::contains(
                &self.spans,
                self.len(),
                format,
                selection.start,
                selection.end,
            )
        }
    }

    pub fn toggle_typeface(&mut self, typeface: Typeface, selection: Selection, on: bool) {
        let selection = selection.clamp(self.len());
        self.toggle_format(Format::Style(typeface), selection, on);
    }

    /// Toggle a typeface given as a raw platform style code over the current
    /// selection. Unknown codes are ignored.
    pub fn toggle_typeface_code(&mut self, code: i32, on: bool) {
        match Typeface::from_code(code) {
            Some(typeface) => self.toggle_typeface(typeface, self.selection, on),
            None => trace!(code, "ignoring unknown typeface code"),
        }
    }

    pub fn contains_typeface(&self, typeface: Typeface, selection: Selection) -> bool {
        self.contains_format(&Format::Style(typeface), selection)
    }

    /// Like [`Document::contains_typeface`], false for unknown codes.
    pub fn contains_typeface_code(&self, code: i32, selection: Selection) -> bool {
        Typeface::from_code(code)
            .map(|typeface| self.contains_typeface(typeface, selection))
            .unwrap_or(false)
    }

    pub fn bold(&mut self, on: bool) {
        self.toggle_style(StyleKind::Bold, self.selection, on);
    }

    pub fn italic(&mut self, on: bool) {
        self.toggle_style(StyleKind::Italic, self.selection, on);
    }

    pub fn underline(&mut self, on: bool) {
        self.toggle_style(StyleKind::Underline, self.selection, on);
    }

    pub fn strikethrough(&mut self, on: bool) {
        self.toggle_style(StyleKind::Strikethrough, self.selection, on);
    }

    pub fn highlight(&mut self, color: Color, on: bool) {
        self.toggle_style(StyleKind::Highlight(color), self.selection, on);
    }

    pub fn bullet(&mut self, on: bool) {
        self.toggle_style(StyleKind::Bullet, self.selection, on);
    }

    pub fn quote(&mut self, on: bool) {
        self.toggle_style(StyleKind::Quote, self.selection, on);
    }
}
