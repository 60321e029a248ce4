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

use strum_macros::{AsRefStr, EnumDiscriminants, EnumIter};

use crate::color::Color;

/// The four discrete faces a character run can have.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Typeface {
    Normal,
    Bold,
    Italic,
    BoldItalic,
}

impl Typeface {
    /// Convert a raw platform style code. Codes outside `0..=3` are not
    /// typefaces.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Normal),
            1 => Some(Self::Bold),
            2 => Some(Self::Italic),
            3 => Some(Self::BoldItalic),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Normal => 0,
            Self::Bold => 1,
            Self::Italic => 2,
            Self::BoldItalic => 3,
        }
    }

    pub(crate) fn is_bold(self) -> bool {
        matches!(self, Self::Bold | Self::BoldItalic)
    }

    pub(crate) fn is_italic(self) -> bool {
        matches!(self, Self::Italic | Self::BoldItalic)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BulletStyle {
    pub color: Color,
    pub radius: u32,
    pub gap_width: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct QuoteStyle {
    pub color: Color,
    pub stripe_width: u32,
    pub gap_width: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LinkStyle {
    pub url: String,
    pub color: Color,
    pub underline: bool,
}

impl LinkStyle {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            color: Color::default(),
            underline: true,
        }
    }
}

/// The style carried by a span, together with its attributes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, EnumDiscriminants)]
#[strum_discriminants(name(FormatKind))]
#[strum_discriminants(derive(Hash, EnumIter, AsRefStr))]
pub enum Format {
    Style(Typeface),
    Underline,
    Strikethrough,
    Highlight(Color),
    Link(LinkStyle),
    Bullet(BulletStyle),
    Quote(QuoteStyle),
}

impl Format {
    pub fn kind(&self) -> FormatKind {
        FormatKind::from(self)
    }

    /// Whether a span of this format counts as `other` for toggling and
    /// queries. Typefaces must agree on the face; every other kind matches
    /// on kind alone.
    pub fn matches(&self, other: &Format) -> bool {
        match (self, other) {
            (Format::Style(a), Format::Style(b)) => a == b,
            _ => self.kind() == other.kind(),
        }
    }

    pub fn is_line_format(&self) -> bool {
        self.kind().is_line_kind()
    }
}

impl FormatKind {
    pub fn is_line_kind(self) -> bool {
        matches!(self, FormatKind::Bullet | FormatKind::Quote)
    }
}

/// The styles a caller can toggle and query.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum StyleKind {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Highlight(Color),
    Bullet,
    Quote,
    Link(String),
}

impl StyleKind {
    pub fn format_kind(&self) -> FormatKind {
        match self {
            StyleKind::Bold | StyleKind::Italic => FormatKind::Style,
            StyleKind::Underline => FormatKind::Underline,
            StyleKind::Strikethrough => FormatKind::Strikethrough,
            StyleKind::Highlight(_) => FormatKind::Highlight,
            StyleKind::Bullet => FormatKind::Bullet,
            StyleKind::Quote => FormatKind::Quote,
            StyleKind::Link(_) => FormatKind::Link,
        }
    }

    pub fn is_line_style(&self) -> bool {
        self.format_kind().is_line_kind()
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn typeface_codes_round_trip() {
        for face in Typeface::iter() {
            assert_eq!(Typeface::from_code(face.code()), Some(face));
        }
    }

    #[test]
    fn unknown_typeface_codes_are_rejected() {
        assert_eq!(Typeface::from_code(-1), None);
        assert_eq!(Typeface::from_code(4), None);
    }

    #[test]
    fn typefaces_only_match_the_same_face() {
        let bold = Format::Style(Typeface::Bold);
        assert!(bold.matches(&Format::Style(Typeface::Bold)));
        assert!(!bold.matches(&Format::Style(Typeface::Italic)));
        assert!(!bold.matches(&Format::Style(Typeface::BoldItalic)));
    }

    #[test]
    fn attribute_kinds_match_regardless_of_attributes() {
        let yellow = Format::Highlight(Color::DEFAULT_HIGHLIGHT);
        assert!(yellow.matches(&Format::Highlight(Color(-3609096))));

        let link = Format::Link(LinkStyle::new("https://a.org"));
        assert!(link.matches(&Format::Link(LinkStyle::new("https://b.org"))));
        assert!(!link.matches(&Format::Underline));
    }

    #[test]
    fn kind_names() {
        assert_eq!(FormatKind::Strikethrough.as_ref(), "Strikethrough");
        assert_eq!(Typeface::BoldItalic.as_ref(), "bold_italic");
    }

    #[test]
    fn only_bullet_and_quote_are_line_kinds() {
        let lines: Vec<FormatKind> =
            FormatKind::iter().filter(|k| k.is_line_kind()).collect();
        assert_eq!(lines, vec![FormatKind::Bullet, FormatKind::Quote]);
        assert!(StyleKind::Quote.is_line_style());
        assert!(!StyleKind::Link("x".into()).is_line_style());
    }
}
