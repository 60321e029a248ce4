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

//! HTML import: builds document text and spans from an HTML fragment.

use tracing::{debug, trace};
use widestring::U16String;

use super::padom::{PaDom, PaDomHandle, PaDomNode};
use super::padom_creator::PaDomCreator;
use super::panode_container::PaNodeContainer;
use super::tag_handler::{ExtendedTagHandler, ImportBuffer, TagEvent, TagHandler};
use crate::color::ColorTransform;
use crate::config::EditorConfig;
use crate::format::{Format, LinkStyle, QuoteStyle, Typeface};
use crate::span_store::SpanStore;

const NEWLINE: u16 = b'\n' as u16;

/// Text and spans produced by an import.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedContent {
    pub text: U16String,
    pub spans: SpanStore,
}

/// Import `html` with the built-in tag handler, applying the configured
/// render styles to bullets, quotes and links.
pub fn parse(html: &str, config: &EditorConfig, colors: &dyn ColorTransform) -> ParsedContent {
    let mut handler = ExtendedTagHandler::new(colors);
    parse_with_handler(html, config, &mut handler)
}

/// Import `html`, handing elements the converter does not know to
/// `handler`.
pub fn parse_with_handler(
    html: &str,
    config: &EditorConfig,
    handler: &mut dyn TagHandler,
) -> ParsedContent {
    let source = html.replace('\n', "<br>");
    let parsed = PaDomCreator::parse(&source);
    for error in &parsed.parse_errors {
        debug!(error = error.as_str(), "html parse error");
    }

    let mut converter = Converter {
        dom: &parsed.dom,
        handler,
        output: ImportBuffer::default(),
    };
    converter.convert_children(&parsed.dom.document_handle());
    let (text, spans) = converter.output.into_parts();
    let mut content = ParsedContent { text, spans };
    normalize(&mut content, config);
    content
}

struct Converter<'a, 'h> {
    dom: &'a PaDom,
    handler: &'h mut dyn TagHandler,
    output: ImportBuffer,
}

impl Converter<'_, '_> {
    fn convert_children(&mut self, handle: &PaDomHandle) {
        let dom = self.dom;
        for child in dom.get_node(handle).children() {
            match dom.get_node(child) {
                PaDomNode::Container(element) => self.convert_element(child, element),
                PaDomNode::Document(_) => self.convert_children(child),
                PaDomNode::Text(text) => self.output.push_text(&text.content),
                PaDomNode::Comment => {}
            }
        }
    }

    fn convert_element(&mut self, handle: &PaDomHandle, element: &PaNodeContainer) {
        match element.tag() {
            "b" | "strong" => self.inline(handle, Format::Style(Typeface::Bold)),
            "i" | "em" | "cite" | "dfn" => {
                self.inline(handle, Format::Style(Typeface::Italic))
            }
            "u" => self.inline(handle, Format::Underline),
            "a" => match element.get_attr("href") {
                Some(href) => self.inline(handle, Format::Link(LinkStyle::new(href))),
                None => self.convert_children(handle),
            },
            "br" => self.output.push_newline(),
            "blockquote" => {
                self.output.ensure_newline();
                let start = self.output.len();
                self.convert_children(handle);
                self.output.ensure_newline();
                let end = self.output.len();
                self.output
                    .add_span(Format::Quote(QuoteStyle::default()), start, end);
            }
            "p" | "div" | "ul" | "ol" => {
                self.output.ensure_newline();
                self.convert_children(handle);
                self.output.ensure_newline();
            }
            "html" | "body" => self.convert_children(handle),
            "script" | "style" | "head" | "title" => {}
            tag => {
                let known = self.handler.handle_tag(
                    TagEvent::Open {
                        tag,
                        attrs: &element.attrs,
                    },
                    &mut self.output,
                );
                if !known {
                    trace!(tag, "passing through unknown element");
                }
                self.convert_children(handle);
                self.handler
                    .handle_tag(TagEvent::Close { tag }, &mut self.output);
            }
        }
    }

    fn inline(&mut self, handle: &PaDomHandle, format: Format) {
        let start = self.output.len();
        self.convert_children(handle);
        self.output.add_span(format, start, self.output.len());
    }
}

/// Give bullets, quotes and links the configured render styles and drop the
/// line break that ends each bullet or quote.
fn normalize(content: &mut ParsedContent, config: &EditorConfig) {
    let text = content.text.as_slice();
    let spans = std::mem::take(&mut content.spans);
    for span in spans {
        match span.format {
            Format::Bullet(_) | Format::Quote(_) => {
                let mut end = span.end;
                if end > span.start && text.get(end - 1) == Some(&NEWLINE) {
                    end -= 1;
                }
                if span.start < end {
                    let format = match span.format {
                        Format::Bullet(_) => Format::Bullet(config.bullet_style()),
                        _ => Format::Quote(config.quote_style()),
                    };
                    content.spans.add_span(format, span.start, end);
                }
            }
            Format::Link(link) => {
                content.spans.add_span(
                    Format::Link(config.link_style(link.url)),
                    span.start,
                    span.end,
                );
            }
            format => content.spans.add_span(format, span.start, span.end),
        }
    }
}
