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

//! State queries: toolbar action states and a debug dump of the document.

use std::collections::HashMap;

use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter};

use super::Document;
use crate::color::Color;
use crate::format::{Format, StyleKind, Typeface};
use crate::span_store::Span;

/// A toolbar button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, AsRefStr)]
pub enum FormatAction {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Highlight,
    Link,
    Bullet,
    Quote,
    Undo,
    Redo,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionState {
    Enabled,
    /// The selection already has the style; pressing removes it.
    Reversed,
    Disabled,
}

impl Document {
    /// State of every toolbar button for the current selection.
    pub fn action_states(&self) -> HashMap<FormatAction, ActionState> {
        FormatAction::iter()
            .map(|action| (action, self.action_state(action)))
            .collect()
    }

    fn action_state(&self, action: FormatAction) -> ActionState {
        let style = match action {
            FormatAction::Undo => return enabled_if(self.undo_valid()),
            FormatAction::Redo => return enabled_if(self.redo_valid()),
            FormatAction::Bold => StyleKind::Bold,
            FormatAction::Italic => StyleKind::Italic,
            FormatAction::Underline => StyleKind::Underline,
            FormatAction::Strikethrough => StyleKind::Strikethrough,
            FormatAction::Highlight => StyleKind::Highlight(Color::DEFAULT_HIGHLIGHT),
            FormatAction::Link => StyleKind::Link(String::new()),
            FormatAction::Bullet => StyleKind::Bullet,
            FormatAction::Quote => StyleKind::Quote,
        };
        if self.contains(&style, self.selection) {
            ActionState::Reversed
        } else {
            ActionState::Enabled
        }
    }

    /// A readable dump of the document: one line per run of identically
    /// formatted text, with `{` `}` around the selection or `|` at the
    /// caret.
    pub fn to_tree(&self) -> String {
        let Self {
            text,
            spans,
            selection,
            ..
        } = self;
        let mut out = format!("sel: ({},{})\n", selection.start, selection.end);
        if text.is_empty() {
            out.push_str("└─ \"|\"\n");
            return out;
        }

        let mut boundaries: Vec<usize> = spans
            .iter()
            .flat_map(|span| [span.start, span.end])
            .chain([text.len()])
            .filter(|pos| *pos > 0 && *pos <= text.len())
            .collect();
        boundaries.sort_unstable();
        boundaries.dedup();

        let units = text.as_slice();
        let mut run_start = 0;
        let last = boundaries.len() - 1;
        for (i, run_end) in boundaries.into_iter().enumerate() {
            let branch = if i == last { "└─" } else { "├─" };
            let run = annotate_selection(units, run_start, run_end, selection.start, selection.end);
            let labels: Vec<String> = spans
                .iter()
                .filter(|span| span.start <= run_start && run_end <= span.end)
                .map(label)
                .collect();
            out.push_str(&format!("{branch} {run:?}"));
            if !labels.is_empty() {
                out.push_str(&format!(" [{}]", labels.join(", ")));
            }
            out.push('\n');
            run_start = run_end;
        }
        out
    }
}

fn enabled_if(valid: bool) -> ActionState {
    if valid {
        ActionState::Enabled
    } else {
        ActionState::Disabled
    }
}

fn label(span: &Span) -> String {
    match &span.format {
        Format::Style(Typeface::Normal) => "normal".to_owned(),
        Format::Style(Typeface::Bold) => "bold".to_owned(),
        Format::Style(Typeface::Italic) => "italic".to_owned(),
        Format::Style(Typeface::BoldItalic) => "bold_italic".to_owned(),
        Format::Underline => "underline".to_owned(),
        Format::Strikethrough => "strikethrough".to_owned(),
        Format::Highlight(color) => format!("highlight={color}"),
        Format::Link(link) => format!("link={}", link.url),
        Format::Bullet(_) => "bullet".to_owned(),
        Format::Quote(_) => "quote".to_owned(),
    }
}

/// The units in `[start, end)` as text, with selection markers inserted
/// where the selection starts or ends inside the run.
fn annotate_selection(
    units: &[u16],
    start: usize,
    end: usize,
    sel_start: usize,
    sel_end: usize,
) -> String {
    let mut result = String::new();
    let caret = sel_start == sel_end;
    for pos in start..=end {
        if pos == sel_start && (pos < end || (caret && end == units.len())) {
            result.push(if caret { '|' } else { '{' });
        }
        if !caret && pos == sel_end && pos > start {
            result.push('}');
        }
        if pos < end {
            let next = char::decode_utf16([units[pos]])
                .next()
                .and_then(Result::ok);
            match next {
                Some(c) => result.push(c),
                None => {
                    if let Some(c) = decode_pair(units, pos) {
                        result.push(c);
                    }
                }
            }
        }
    }
    result
}

/// Decode the character starting at `pos` if it is a surrogate pair. Low
/// surrogates yield nothing since their high half already produced the
/// character.
fn decode_pair(units: &[u16], pos: usize) -> Option<char> {
    let pair = units.get(pos..pos + 2)?;
    char::decode_utf16(pair.iter().copied()).next()?.ok()
}
