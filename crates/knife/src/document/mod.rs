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

//! The editable document: text buffer, spans, selection and history.
//!
//! [`Document`] is implemented across several files, one per area of its
//! API.

mod base;
mod content_access;
mod formatting;
mod links;
mod selection;
mod state_query;
mod text_ops;
mod undo_redo;

pub use base::Document;
pub use state_query::{ActionState, FormatAction};
