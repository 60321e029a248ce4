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

//! HTML export.

use crate::color::{Color, ColorTransform};
use crate::format::{Format, FormatKind};
use crate::span_store::{Span, SpanStore};

const NEWLINE: u16 = b'\n' as u16;

/// Inline tags in the order they nest, outermost first.
#[derive(Clone, Debug, PartialEq, Eq)]
enum InlineTag {
    Anchor(String),
    Bold,
    Italic,
    Underline,
    Strike,
    Mark(Color),
}

impl InlineTag {
    fn open(&self, html: &mut String) {
        match self {
            InlineTag::Anchor(url) => {
                html.push_str("<a href=\"");
                html.push_str(&html_escape::encode_double_quoted_attribute(url));
                html.push_str("\">");
            }
            InlineTag::Bold => html.push_str("<b>"),
            InlineTag::Italic => html.push_str("<i>"),
            InlineTag::Underline => html.push_str("<u>"),
            InlineTag::Strike => html.push_str("<del>"),
            InlineTag::Mark(color) => {
                html.push_str(&format!("<mark style=\"background-color:{color}\">"))
            }
        }
    }

    fn close(&self, html: &mut String) {
        html.push_str(match self {
            InlineTag::Anchor(_) => "</a>",
            InlineTag::Bold => "</b>",
            InlineTag::Italic => "</i>",
            InlineTag::Underline => "</u>",
            InlineTag::Strike => "</del>",
            InlineTag::Mark(_) => "</mark>",
        });
    }
}

/// Serialize text and spans as HTML that imports back to the same spans.
pub fn to_html(text: &[u16], spans: &SpanStore, colors: &dyn ColorTransform) -> String {
    let mut writer = HtmlWriter {
        text,
        spans,
        colors,
        html: String::new(),
        open: Vec::new(),
    };
    writer.write_blocks();
    writer.html
}

struct HtmlWriter<'a> {
    text: &'a [u16],
    spans: &'a SpanStore,
    colors: &'a dyn ColorTransform,
    html: String,
    open: Vec<InlineTag>,
}

impl HtmlWriter<'_> {
    fn covering(&self, kind: FormatKind, start: usize, end: usize) -> bool {
        self.spans.iter().any(|span| {
            span.kind() == kind && !span.is_empty() && span.start <= start && end <= span.end
        })
    }

    /// `pos`, moved past the low half if it falls inside a surrogate pair.
    fn char_boundary(&self, pos: usize) -> usize {
        let splits_pair = pos > 0
            && pos < self.text.len()
            && (0xD800..0xDC00).contains(&self.text[pos - 1])
            && (0xDC00..0xE000).contains(&self.text[pos]);
        if splits_pair {
            pos + 1
        } else {
            pos
        }
    }

    /// Next position after `from` where a bullet or quote starts or ends.
    fn next_line_transition(&self, from: usize) -> usize {
        self.spans
            .iter()
            .filter(|span| span.format.is_line_format())
            .flat_map(|span| [span.start, span.end])
            .map(|pos| self.char_boundary(pos))
            .filter(|pos| *pos > from)
            .min()
            .unwrap_or(self.text.len())
            .min(self.text.len())
    }

    /// Write each bullet as its own list and each contiguous quote as one
    /// blockquote around the lines it covers. The line break ending a
    /// bullet or a quote is implied by the closing tag and not written.
    fn write_blocks(&mut self) {
        let len = self.text.len();
        let mut in_quote = false;
        let mut i = 0;
        while i < len {
            let next = self.next_line_transition(i);
            let bullet = self.covering(FormatKind::Bullet, i, next);
            let quote = self.covering(FormatKind::Quote, i, next);
            if quote && !in_quote {
                self.html.push_str("<blockquote>");
                in_quote = true;
            } else if !quote && in_quote {
                self.html.push_str("</blockquote>");
                in_quote = false;
            }
            if bullet {
                self.html.push_str("<ul><li>");
            }
            self.write_inline(i, next);
            if bullet {
                self.html.push_str("</li></ul>");
            }
            i = next;
            let quote_ends = quote && !self.covering(FormatKind::Quote, i, i + 1);
            if (bullet || quote_ends) && self.text.get(i) == Some(&NEWLINE) {
                i += 1;
            }
            if quote_ends {
                self.html.push_str("</blockquote>");
                in_quote = false;
            }
        }
        if in_quote {
            self.html.push_str("</blockquote>");
        }
    }

    fn write_inline(&mut self, start: usize, end: usize) {
        let mut boundaries: Vec<usize> = self
            .spans
            .iter()
            .filter(|span| !span.format.is_line_format())
            .flat_map(|span| [span.start, span.end])
            .map(|pos| self.char_boundary(pos))
            .filter(|pos| *pos > start && *pos < end)
            .collect();
        boundaries.push(end);
        boundaries.sort_unstable();
        boundaries.dedup();

        let mut run_start = start;
        for run_end in boundaries {
            let wanted = self.tags_for(run_start, run_end);
            self.reconcile(&wanted);
            let run = String::from_utf16_lossy(&self.text[run_start..run_end]);
            write_text(&mut self.html, &run);
            run_start = run_end;
        }
        self.reconcile(&[]);
    }

    fn tags_for(&self, start: usize, end: usize) -> Vec<InlineTag> {
        let covering: Vec<&Span> = self
            .spans
            .iter()
            .filter(|span| span.start < end && start < span.end)
            .collect();
        let face = |check: fn(&Format) -> bool| covering.iter().any(|s| check(&s.format));

        let mut tags = Vec::new();
        if let Some(url) = covering.iter().find_map(|s| match &s.format {
            Format::Link(link) => Some(link.url.clone()),
            _ => None,
        }) {
            tags.push(InlineTag::Anchor(url));
        }
        if face(|f| matches!(f, Format::Style(t) if t.is_bold())) {
            tags.push(InlineTag::Bold);
        }
        if face(|f| matches!(f, Format::Style(t) if t.is_italic())) {
            tags.push(InlineTag::Italic);
        }
        if face(|f| matches!(f, Format::Underline)) {
            tags.push(InlineTag::Underline);
        }
        if face(|f| matches!(f, Format::Strikethrough)) {
            tags.push(InlineTag::Strike);
        }
        if let Some(color) = covering.iter().find_map(|s| match s.format {
            Format::Highlight(color) => Some(color),
            _ => None,
        }) {
            tags.push(InlineTag::Mark(self.colors.restore(color)));
        }
        tags
    }

    /// Close open tags down to the longest prefix shared with `wanted`, then
    /// open the rest of `wanted`.
    fn reconcile(&mut self, wanted: &[InlineTag]) {
        let shared = self
            .open
            .iter()
            .zip(wanted)
            .take_while(|(open, want)| open == want)
            .count();
        while self.open.len() > shared {
            if let Some(tag) = self.open.pop() {
                tag.close(&mut self.html);
            }
        }
        for tag in &wanted[shared..] {
            tag.open(&mut self.html);
            self.open.push(tag.clone());
        }
    }
}

/// Escape text, turning line breaks into `<br>` and keeping runs of spaces
/// as `&nbsp;` followed by one plain space.
fn write_text(html: &mut String, text: &str) {
    let mut plain = String::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\n' => {
                flush(html, &mut plain);
                html.push_str("<br>");
            }
            ' ' if chars.peek() == Some(&' ') => {
                flush(html, &mut plain);
                html.push_str("&nbsp;");
            }
            _ => plain.push(c),
        }
    }
    flush(html, &mut plain);
}

fn flush(html: &mut String, plain: &mut String) {
    if !plain.is_empty() {
        html.push_str(&html_escape::encode_text(plain.as_str()));
        plain.clear();
    }
}

#[cfg(test)]
mod tests {
    use widestring::U16String;

    use super::*;
    use crate::color::{IdentityColors, Theme, ThemedColorMap};
    use crate::format::{BulletStyle, LinkStyle, QuoteStyle, Typeface};

    fn export(text: &str, spans: &[(Format, usize, usize)]) -> String {
        let units = U16String::from_str(text).into_vec();
        let mut store = SpanStore::new();
        for (format, start, end) in spans {
            store.add_span(format.clone(), *start, *end);
        }
        to_html(&units, &store, &IdentityColors)
    }

    fn bold() -> Format {
        Format::Style(Typeface::Bold)
    }

    fn italic() -> Format {
        Format::Style(Typeface::Italic)
    }

    #[test]
    fn plain_text_is_escaped() {
        assert_eq!(export("a < b & c", &[]), "a &lt; b &amp; c");
    }

    #[test]
    fn line_breaks_become_br() {
        assert_eq!(export("a\nb", &[]), "a<br>b");
    }

    #[test]
    fn space_runs_keep_their_width() {
        assert_eq!(export("a   b", &[]), "a&nbsp;&nbsp; b");
    }

    #[test]
    fn overlapping_spans_nest_properly() {
        assert_eq!(
            export("abc", &[(bold(), 0, 2), (italic(), 1, 3)]),
            "<b>a<i>b</i></b><i>c</i>"
        );
    }

    #[test]
    fn outer_tags_close_when_inner_tags_stay() {
        assert_eq!(
            export("abc", &[(italic(), 0, 3), (bold(), 0, 1)]),
            "<b><i>a</i></b><i>bc</i>"
        );
    }

    #[test]
    fn bold_italic_typeface_writes_both_tags() {
        assert_eq!(
            export("x", &[(Format::Style(Typeface::BoldItalic), 0, 1)]),
            "<b><i>x</i></b>"
        );
    }

    #[test]
    fn links_are_outermost() {
        let link = Format::Link(LinkStyle::new("https://x.org/\"q\""));
        assert_eq!(
            export("ab", &[(bold(), 0, 2), (link, 0, 2)]),
            "<a href=\"https://x.org/&quot;q&quot;\"><b>ab</b></a>"
        );
    }

    #[test]
    fn highlights_write_their_color() {
        assert_eq!(
            export("ab", &[(Format::Highlight(Color(-3609096)), 1, 2)]),
            "a<mark style=\"background-color:-3609096\">b</mark>"
        );
    }

    #[test]
    fn highlight_colors_are_restored() {
        let light = Color(-3609096);
        let dark = Color(-1);
        let mut store = SpanStore::new();
        store.add_span(Format::Highlight(dark), 0, 1);
        let units = U16String::from_str("x").into_vec();
        let html = to_html(&units, &store, &ThemedColorMap::new(Theme::Dark, [(light, dark)]));
        assert_eq!(html, "<mark style=\"background-color:-3609096\">x</mark>");
    }

    #[test]
    fn bullets_become_list_items() {
        let bullet = Format::Bullet(BulletStyle::default());
        assert_eq!(
            export("one\ntwo\nend", &[(bullet.clone(), 0, 3), (bullet, 4, 7)]),
            "<ul><li>one</li></ul><ul><li>two</li></ul>end"
        );
    }

    #[test]
    fn quoted_bullets_nest_inside_blockquote() {
        let bullet = Format::Bullet(BulletStyle::default());
        let quote = Format::Quote(QuoteStyle::default());
        assert_eq!(
            export("a\nb", &[(quote, 0, 1), (bullet, 0, 1)]),
            "<blockquote><ul><li>a</li></ul></blockquote>b"
        );
    }

    #[test]
    fn one_blockquote_wraps_quoted_list_items() {
        let bullet = Format::Bullet(BulletStyle::default());
        let quote = Format::Quote(QuoteStyle::default());
        assert_eq!(
            export(
                "a\nb\nc",
                &[(quote, 0, 3), (bullet.clone(), 0, 1), (bullet, 2, 3)]
            ),
            "<blockquote><ul><li>a</li></ul><ul><li>b</li></ul></blockquote>c"
        );
    }

    #[test]
    fn quoted_lines_share_one_blockquote() {
        let quote = Format::Quote(QuoteStyle::default());
        assert_eq!(
            export("a\nb", &[(quote, 0, 3)]),
            "<blockquote>a<br>b</blockquote>"
        );
    }

    #[test]
    fn span_edges_inside_a_surrogate_pair_are_not_split() {
        assert_eq!(
            export("a\u{1F600}b", &[(bold(), 0, 2)]),
            "<b>a\u{1F600}</b>b"
        );
    }

    #[test]
    fn inline_tags_close_at_block_boundaries() {
        let quote = Format::Quote(QuoteStyle::default());
        assert_eq!(
            export("ab\nc", &[(bold(), 0, 4), (quote, 0, 2)]),
            "<blockquote><b>ab</b></blockquote><b>c</b>"
        );
    }
}
