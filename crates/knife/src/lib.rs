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

//! A span-based rich text document model.
//!
//! Text is kept as UTF-16 code units alongside a flat list of formatting
//! spans. On top of that sit the character-run formatting engine, the line
//! formatter for bullets and quotes, HTML import and export, and a bounded
//! snapshot history for undo and redo.

pub mod color;
pub mod config;
mod document;
pub mod format;
pub mod formatting;
pub mod history;
pub mod html;
pub mod lines;
pub mod selection;
pub mod span_store;

pub use crate::color::{
    Color, ColorTransform, IdentityColors, Theme, ThemeProvider, ThemedColorMap,
};
pub use crate::config::{ConfigError, EditorConfig};
pub use crate::document::{ActionState, Document, FormatAction};
pub use crate::format::{
    BulletStyle, Format, FormatKind, LinkStyle, QuoteStyle, StyleKind, Typeface,
};
pub use crate::history::{HistoryEntry, HistoryManager};
pub use crate::selection::Selection;
pub use crate::span_store::{Span, SpanStore};
