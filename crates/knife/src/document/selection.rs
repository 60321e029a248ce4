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
use crate::selection::Selection;

impl Document {
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Select between two positions, in either order. Positions past the
    /// end of the text are clamped.
    pub fn select(&mut self, anchor: usize, focus: usize) {
        self.selection = Selection::new(anchor, focus).clamp(self.len());
    }

    pub fn select_all(&mut self) {
        self.selection = Selection::new(0, self.len());
    }
}
