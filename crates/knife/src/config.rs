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

use crate::color::Color;
use crate::format::{BulletStyle, LinkStyle, QuoteStyle};

pub const DEFAULT_HISTORY_SIZE: usize = 100;

/// Construction-time settings for a [`crate::Document`].
///
/// The render attributes are copied onto every bullet, quote and link span
/// the document creates, including those produced by HTML import.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorConfig {
    pub bullet_color: Color,
    pub bullet_radius: u32,
    pub bullet_gap_width: u32,
    pub quote_color: Color,
    pub quote_stripe_width: u32,
    pub quote_gap_width: u32,
    pub link_color: Color,
    pub link_underline: bool,
    pub history_enable: bool,
    pub history_size: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            bullet_color: Color::default(),
            bullet_radius: 0,
            bullet_gap_width: 0,
            quote_color: Color::default(),
            quote_stripe_width: 0,
            quote_gap_width: 0,
            link_color: Color::default(),
            link_underline: true,
            history_enable: true,
            history_size: DEFAULT_HISTORY_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("history_size must be greater than zero when history is enabled")]
    HistorySize,
}

impl EditorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_enable && self.history_size == 0 {
            return Err(ConfigError::HistorySize);
        }
        Ok(())
    }

    pub fn bullet_style(&self) -> BulletStyle {
        BulletStyle {
            color: self.bullet_color,
            radius: self.bullet_radius,
            gap_width: self.bullet_gap_width,
        }
    }

    pub fn quote_style(&self) -> QuoteStyle {
        QuoteStyle {
            color: self.quote_color,
            stripe_width: self.quote_stripe_width,
            gap_width: self.quote_gap_width,
        }
    }

    pub fn link_style(&self, url: impl Into<String>) -> LinkStyle {
        LinkStyle {
            url: url.into(),
            color: self.link_color,
            underline: self.link_underline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EditorConfig::default();
        assert_eq!(config.history_size, 100);
        assert!(config.history_enable);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn empty_history_is_rejected_only_when_enabled() {
        let mut config = EditorConfig {
            history_size: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::HistorySize));

        config.history_enable = false;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn styles_carry_configured_attributes() {
        let config = EditorConfig {
            quote_color: Color(7),
            quote_stripe_width: 2,
            link_underline: false,
            ..Default::default()
        };
        assert_eq!(config.quote_style().color, Color(7));
        assert_eq!(config.quote_style().stripe_width, 2);
        assert!(!config.link_style("https://x.org").underline);
    }
}
