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

//! Mapping of HTML elements the converter does not handle itself.

use std::mem::discriminant;

use tracing::debug;
use widestring::U16String;

use super::panode_container::{get_attr, style_property};
use crate::color::{Color, ColorTransform};
use crate::format::{BulletStyle, Format};
use crate::span_store::SpanStore;

const NEWLINE: u16 = b'\n' as u16;
const SPACE: u16 = b' ' as u16;

/// Text and spans accumulated while converting HTML.
#[derive(Clone, Debug, Default)]
pub struct ImportBuffer {
    text: Vec<u16>,
    spans: SpanStore,
}

impl ImportBuffer {
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn spans(&self) -> &SpanStore {
        &self.spans
    }

    pub fn ends_with_newline(&self) -> bool {
        self.text.last() == Some(&NEWLINE)
    }

    pub fn push_newline(&mut self) {
        self.text.push(NEWLINE);
    }

    /// Start a new line unless the buffer is empty or already on one.
    pub fn ensure_newline(&mut self) {
        if !self.is_empty() && !self.ends_with_newline() {
            self.push_newline();
        }
    }

    /// Append text, collapsing whitespace runs into one space. Whitespace
    /// at the start of a line is dropped.
    pub fn push_text(&mut self, text: &str) {
        let mut units = [0u16; 2];
        for c in text.chars() {
            if matches!(c, ' ' | '\n' | '\t' | '\r' | '\x0C') {
                let previous = self.text.last().copied().unwrap_or(NEWLINE);
                if previous != SPACE && previous != NEWLINE {
                    self.text.push(SPACE);
                }
            } else {
                self.text.extend_from_slice(c.encode_utf16(&mut units));
            }
        }
    }

    /// Attach a span over `[start, end)`. Empty ranges produce nothing.
    pub fn add_span(&mut self, format: Format, start: usize, end: usize) {
        if start < end {
            self.spans.add_span(format, start, end);
        }
    }

    pub(crate) fn into_parts(self) -> (U16String, SpanStore) {
        (U16String::from_vec(self.text), self.spans)
    }

    pub fn text(&self) -> &[u16] {
        &self.text
    }
}

/// An element boundary seen by a [`TagHandler`].
#[derive(Clone, Copy, Debug)]
pub enum TagEvent<'a> {
    Open {
        tag: &'a str,
        attrs: &'a [(String, String)],
    },
    Close {
        tag: &'a str,
    },
}

/// Converts elements the base converter does not know into spans.
///
/// The handler sees every such element twice, once when it opens (with its
/// attributes) and once when it closes, and returns whether it recognised
/// the tag.
pub trait TagHandler {
    fn handle_tag(&mut self, event: TagEvent<'_>, output: &mut ImportBuffer) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MarkerKind {
    ListItem,
    Strike,
    Mark(Color),
}

#[derive(Clone, Copy, Debug)]
struct OpenMarker {
    kind: MarkerKind,
    start: usize,
}

/// Handles list items, strikethrough and `<mark>` highlights.
pub struct ExtendedTagHandler<'a> {
    colors: &'a dyn ColorTransform,
    open: Vec<OpenMarker>,
}

impl<'a> ExtendedTagHandler<'a> {
    pub fn new(colors: &'a dyn ColorTransform) -> Self {
        Self {
            colors,
            open: Vec::new(),
        }
    }

    fn push(&mut self, kind: MarkerKind, output: &ImportBuffer) {
        self.open.push(OpenMarker {
            kind,
            start: output.len(),
        });
    }

    /// Remove the innermost open marker of the same kind as `kind`.
    fn pop(&mut self, kind: MarkerKind) -> Option<OpenMarker> {
        let index = self
            .open
            .iter()
            .rposition(|m| discriminant(&m.kind) == discriminant(&kind))?;
        Some(self.open.remove(index))
    }

    fn close(&mut self, kind: MarkerKind, output: &mut ImportBuffer) {
        let Some(marker) = self.pop(kind) else {
            return;
        };
        let format = match marker.kind {
            MarkerKind::ListItem => Format::Bullet(BulletStyle::default()),
            MarkerKind::Strike => Format::Strikethrough,
            MarkerKind::Mark(color) => Format::Highlight(self.colors.transform(color)),
        };
        output.add_span(format, marker.start, output.len());
    }
}

fn mark_color(attrs: &[(String, String)]) -> Color {
    let Some(value) = get_attr(attrs, "style")
        .and_then(|style| style_property(style, "background-color"))
    else {
        return Color::DEFAULT_HIGHLIGHT;
    };
    match value.parse::<i32>() {
        Ok(color) => Color(color),
        Err(e) => {
            debug!(value, error = %e, "unreadable mark colour, using default");
            Color::DEFAULT_HIGHLIGHT
        }
    }
}

impl TagHandler for ExtendedTagHandler<'_> {
    fn handle_tag(&mut self, event: TagEvent<'_>, output: &mut ImportBuffer) -> bool {
        match event {
            TagEvent::Open { tag, attrs } => match tag {
                "li" => {
                    output.ensure_newline();
                    self.push(MarkerKind::ListItem, output);
                }
                "s" | "strike" | "del" => self.push(MarkerKind::Strike, output),
                "mark" => self.push(MarkerKind::Mark(mark_color(attrs)), output),
                _ => return false,
            },
            TagEvent::Close { tag } => match tag {
                "li" => {
                    output.ensure_newline();
                    self.close(MarkerKind::ListItem, output);
                }
                "s" | "strike" | "del" => self.close(MarkerKind::Strike, output),
                "mark" => self.close(MarkerKind::Mark(Color::default()), output),
                _ => return false,
            },
        }
        true
    }
}
