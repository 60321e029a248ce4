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

//! Colour values and the pluggable light/dark substitution hook.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// A packed ARGB colour, stored as the signed 32-bit integer the platform
/// colour APIs (and the `background-color` HTML attribute) use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color(pub i32);

impl Color {
    /// The highlight colour used when none is given or it cannot be parsed.
    pub const DEFAULT_HIGHLIGHT: Color = Color::from_rgb(0xF9, 0xE7, 0x9F);

    /// Opaque colour from its red, green and blue components.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_argb(0xFF, r, g, b)
    }

    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        let packed =
            (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32;
        Self(packed as i32)
    }

    pub const fn argb(self) -> u32 {
        self.0 as u32
    }
}

impl From<i32> for Color {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maps colours stored in the document to the colours the current theme
/// wants to show, and back again when the document is exported.
pub trait ColorTransform: Send + Sync {
    /// Colour to store for a highlight the user asked for.
    fn transform(&self, color: Color) -> Color;

    /// Colour to write out for a stored highlight.
    fn restore(&self, color: Color) -> Color {
        color
    }
}

/// Leaves every colour untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityColors;

impl ColorTransform for IdentityColors {
    fn transform(&self, color: Color) -> Color {
        color
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Source of the theme in effect. Read once per colour transform.
pub trait ThemeProvider: Send + Sync {
    fn theme(&self) -> Theme;
}

impl ThemeProvider for Theme {
    fn theme(&self) -> Theme {
        *self
    }
}

impl<T: ThemeProvider + ?Sized> ThemeProvider for Arc<T> {
    fn theme(&self) -> Theme {
        (**self).theme()
    }
}

/// Swaps light-theme colours for their dark-theme counterparts when the
/// provider reports a dark theme.
///
/// Colours without a dark counterpart fall back to the configured fallback
/// (the default highlight unless overridden).
pub struct ThemedColorMap<P> {
    provider: P,
    light_to_dark: HashMap<Color, Color>,
    dark_to_light: HashMap<Color, Color>,
    fallback: Color,
}

impl<P: ThemeProvider> ThemedColorMap<P> {
    pub fn new(
        provider: P,
        pairs: impl IntoIterator<Item = (Color, Color)>,
    ) -> Self {
        let light_to_dark: HashMap<Color, Color> = pairs.into_iter().collect();
        let dark_to_light = light_to_dark
            .iter()
            .map(|(light, dark)| (*dark, *light))
            .collect();
        Self {
            provider,
            light_to_dark,
            dark_to_light,
            fallback: Color::DEFAULT_HIGHLIGHT,
        }
    }

    pub fn with_fallback(mut self, fallback: Color) -> Self {
        self.fallback = fallback;
        self
    }
}

impl<P: ThemeProvider> ColorTransform for ThemedColorMap<P> {
    fn transform(&self, color: Color) -> Color {
        match self.provider.theme() {
            Theme::Light => color,
            Theme::Dark => self
                .light_to_dark
                .get(&color)
                .copied()
                .unwrap_or(self.fallback),
        }
    }

    fn restore(&self, color: Color) -> Color {
        match self.provider.theme() {
            Theme::Light => color,
            Theme::Dark => {
                self.dark_to_light.get(&color).copied().unwrap_or(color)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use super::*;

    const YELLOW: Color = Color::from_rgb(0xF9, 0xE7, 0x9F);
    const OLIVE: Color = Color::from_rgb(0x7D, 0x66, 0x08);
    const PINK: Color = Color::from_rgb(0xF5, 0xB7, 0xB1);

    struct Switch(AtomicBool);

    impl ThemeProvider for Switch {
        fn theme(&self) -> Theme {
            if self.0.load(Ordering::Relaxed) {
                Theme::Dark
            } else {
                Theme::Light
            }
        }
    }

    #[test]
    fn default_highlight_is_pale_yellow() {
        assert_eq!(Color::DEFAULT_HIGHLIGHT.argb(), 0xFFF9E79F);
        assert_eq!(Color::DEFAULT_HIGHLIGHT.0, -399457);
    }

    #[test]
    fn colors_display_as_signed_integers() {
        assert_eq!(Color(-3609096).to_string(), "-3609096");
    }

    #[test]
    fn identity_leaves_colors_alone() {
        assert_eq!(IdentityColors.transform(PINK), PINK);
        assert_eq!(IdentityColors.restore(PINK), PINK);
    }

    #[test]
    fn light_theme_passes_colors_through() {
        let map = ThemedColorMap::new(Theme::Light, [(YELLOW, OLIVE)]);
        assert_eq!(map.transform(YELLOW), YELLOW);
        assert_eq!(map.restore(OLIVE), OLIVE);
    }

    #[test]
    fn dark_theme_maps_known_colors() {
        let map = ThemedColorMap::new(Theme::Dark, [(YELLOW, OLIVE)]);
        assert_eq!(map.transform(YELLOW), OLIVE);
        assert_eq!(map.restore(OLIVE), YELLOW);
    }

    #[test]
    fn dark_theme_falls_back_for_unknown_colors() {
        let map = ThemedColorMap::new(Theme::Dark, [(YELLOW, OLIVE)]);
        assert_eq!(map.transform(PINK), Color::DEFAULT_HIGHLIGHT);

        let map = map.with_fallback(OLIVE);
        assert_eq!(map.transform(PINK), OLIVE);
        assert_eq!(map.restore(PINK), PINK);
    }

    #[test]
    fn theme_is_read_on_every_call() {
        let switch = Arc::new(Switch(AtomicBool::new(false)));
        let map = ThemedColorMap::new(Arc::clone(&switch), [(YELLOW, OLIVE)]);
        assert_eq!(map.transform(YELLOW), YELLOW);

        switch.0.store(true, Ordering::Relaxed);
        assert_eq!(map.transform(YELLOW), OLIVE);
    }
}
