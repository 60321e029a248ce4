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

use html5ever::QualName;
use once_cell::sync::Lazy;
use regex::Regex;

use super::padom::PaDomHandle;

static STYLE_DECLARATION: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"([A-Za-z-]+)\s*:\s*([^;]*)").ok());

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PaNodeContainer {
    pub(crate) name: QualName,
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) children: Vec<PaDomHandle>,
}

impl PaNodeContainer {
    pub(crate) fn tag(&self) -> &str {
        self.name.local.as_ref()
    }

    pub(crate) fn get_attr(&self, name: &str) -> Option<&str> {
        get_attr(&self.attrs, name)
    }
}

pub(crate) fn get_attr<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(n, _v)| n == name)
        .map(|(_n, v)| v.as_str())
}

/// Value of the CSS property `property` in an inline `style` attribute.
pub(crate) fn style_property<'a>(style: &'a str, property: &str) -> Option<&'a str> {
    let re = STYLE_DECLARATION.as_ref()?;
    re.captures_iter(style)
        .find(|caps| caps[1].eq_ignore_ascii_case(property))
        .and_then(|caps| caps.get(2))
        .map(|value| value.as_str().trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::padom::paqual_name;

    fn attrs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn finds_attributes_by_name() {
        let node = PaNodeContainer {
            name: paqual_name("a"),
            attrs: attrs(&[("href", "https://matrix.org")]),
            children: Vec::new(),
        };
        assert_eq!(node.tag(), "a");
        assert_eq!(node.get_attr("href"), Some("https://matrix.org"));
        assert_eq!(node.get_attr("title"), None);
    }

    #[test]
    fn reads_style_properties() {
        let style = "color: red; Background-Color: -3609096 ;";
        assert_eq!(style_property(style, "background-color"), Some("-3609096"));
        assert_eq!(style_property(style, "color"), Some("red"));
        assert_eq!(style_property(style, "font-weight"), None);
    }
}
