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

//! Conversion between HTML and document text with spans.
//!
//! Import parses with html5ever into a small arena tree and
//! walks it, mapping the tags it knows to spans and handing the rest to a
//! [`TagHandler`]. Export writes the spans back as nested inline tags, with
//! bullets and quotes as `<ul><li>` and `<blockquote>` blocks.

mod padom;
mod padom_creator;
mod panode_container;
mod parse;
mod serialize;
mod tag_handler;

pub use parse::{parse, parse_with_handler, ParsedContent};
pub use serialize::to_html;
pub use tag_handler::{ExtendedTagHandler, ImportBuffer, TagEvent, TagHandler};
