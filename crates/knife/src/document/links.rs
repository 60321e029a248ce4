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
use crate::format::{Format, FormatKind};
use crate::formatting::FormattingEngine;
use crate::selection::Selection;

impl Document {
    /// Link `selection` to `url`. A blank `url` instead removes every link
    /// touching the selection, in full.
    pub fn set_link(&mut self, url: &str, selection: Selection) {
        let selection = selection.clamp(self.len());
        if url.trim().is_empty() {
            self.spans.remove_spans_of_kind(
                FormatKind::Link,
                selection.start,
                selection.end,
            );
        } else {
            let link = Format::Link(self.config.link_style(url));
            FormattingEngine::new(&mut self.spans, &*self.colors).apply(
                link,
                selection.start,
                selection.end,
            );
        }
        self.after_mutation();
    }

    /// URL of the link covering `pos`, if any.
    pub fn link_at(&self, pos: usize) -> Option<String> {
        match self.spans.span_at(FormatKind::Link, pos)?.format {
            Format::Link(link) => Some(link.url),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::color::Color;
    use crate::config::EditorConfig;
    use crate::format::{Format, StyleKind};
    use crate::selection::Selection;
    use crate::Document;

    fn model_with_text(text: &str) -> Document {
        let mut doc = Document::new(EditorConfig::default()).unwrap();
        doc.replace_text(text);
        doc
    }

    #[test]
    fn set_link_covers_the_selection() {
        let mut doc = model_with_text("see matrix.org");
        doc.set_link("https://matrix.org", Selection::new(4, 14));
        assert_eq!(doc.link_at(4).as_deref(), Some("https://matrix.org"));
        assert_eq!(doc.link_at(3), None);
        assert!(doc.contains(&StyleKind::Link(String::new()), Selection::new(4, 14)));
    }

    #[test]
    fn links_take_the_configured_style() {
        let config = EditorConfig {
            link_color: Color(5),
            link_underline: false,
            ..Default::default()
        };
        let mut doc = Document::new(config.clone()).unwrap();
        doc.replace_text("x");
        doc.set_link("https://x.org", Selection::new(0, 1));
        assert_eq!(
            doc.spans()[0].format,
            Format::Link(config.link_style("https://x.org"))
        );
    }

    #[test]
    fn relinking_part_of_a_link_drops_the_old_link() {
        let mut doc = model_with_text("abcdef");
        doc.set_link("https://one.org", Selection::new(0, 6));
        doc.set_link("https://two.org", Selection::new(2, 4));
        assert_eq!(doc.link_at(0), None);
        assert_eq!(doc.link_at(2).as_deref(), Some("https://two.org"));
        assert_eq!(doc.link_at(4), None);
        assert_eq!(doc.spans().len(), 1);
    }

    #[test]
    fn blank_url_removes_touching_links_entirely() {
        let mut doc = model_with_text("abcdef");
        doc.set_link("https://one.org", Selection::new(0, 3));
        doc.set_link("https://two.org", Selection::new(4, 6));
        doc.set_link("  ", Selection::new(1, 2));
        assert_eq!(doc.link_at(0), None);
        assert_eq!(doc.link_at(4).as_deref(), Some("https://two.org"));
    }

    #[test]
    fn link_style_can_be_toggled_off() {
        let mut doc = model_with_text("abcdef");
        doc.toggle_style(
            StyleKind::Link("https://x.org".into()),
            Selection::new(0, 6),
            true,
        );
        doc.toggle_style(StyleKind::Link(String::new()), Selection::new(0, 3), false);
        assert_eq!(doc.link_at(1), None);
        assert_eq!(doc.link_at(3).as_deref(), Some("https://x.org"));
    }
}
