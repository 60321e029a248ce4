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

use std::borrow::Cow;
use std::cell::{Ref, RefCell};

use html5ever::interface::NextParserState;
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{parse_fragment, Attribute, QualName};
use once_cell::sync::Lazy;

use super::padom::{paqual_name, PaDom, PaDomHandle, PaDomNode, PaNodeText};

static NO_NAME: Lazy<QualName> = Lazy::new(|| paqual_name(""));

/// The tree produced by the parser, along with any errors it reported on
/// the way. Errors are informational: the tree is always usable.
#[derive(Clone, Debug, Default)]
pub(crate) struct ParsedDom {
    pub(crate) dom: PaDom,
    pub(crate) parse_errors: Vec<String>,
}

#[derive(Default)]
pub(crate) struct PaDomCreator {
    state: RefCell<ParsedDom>,
}

impl PaDomCreator {
    pub(crate) fn parse(html: &str) -> ParsedDom {
        parse_fragment(
            PaDomCreator::default(),
            Default::default(),
            paqual_name(""),
            vec![],
        )
        .from_utf8()
        .one(html.as_bytes())
    }

    fn insert_child(
        dom: &mut PaDom,
        parent: &PaDomHandle,
        index: Option<usize>,
        child: NodeOrText<PaDomHandle>,
    ) {
        let previous = {
            let children = dom.get_node(parent).children();
            let before = index.unwrap_or(children.len());
            before.checked_sub(1).and_then(|i| children.get(i)).cloned()
        };
        let handle = match child {
            NodeOrText::AppendNode(node) => node,
            NodeOrText::AppendText(tendril) => {
                if let Some(previous) = previous {
                    if let PaDomNode::Text(text) = dom.get_mut_node(&previous) {
                        text.content.push_str(&tendril);
                        return;
                    }
                }
                dom.add_node(PaDomNode::Text(PaNodeText {
                    content: tendril.to_string(),
                }))
            }
        };
        dom.insert_child(parent, index, handle);
    }
}

impl TreeSink for PaDomCreator {
    type Handle = PaDomHandle;
    type Output = ParsedDom;
    type ElemName<'a> = Ref<'a, QualName>;

    fn finish(self) -> Self::Output {
        self.state.into_inner()
    }

    fn parse_error(&self, msg: Cow<'static, str>) {
        self.state.borrow_mut().parse_errors.push(String::from(msg));
    }

    fn get_document(&self) -> Self::Handle {
        self.state.borrow().dom.document_handle()
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> Self::ElemName<'a> {
        Ref::map(self.state.borrow(), |state| {
            state.dom.get_node(target).name().unwrap_or(&*NO_NAME)
        })
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Attribute>,
        flags: ElementFlags,
    ) -> Self::Handle {
        self.state
            .borrow_mut()
            .dom
            .create_element(name, attrs, flags)
    }

    fn create_comment(&self, _text: StrTendril) -> Self::Handle {
        self.state.borrow_mut().dom.add_node(PaDomNode::Comment)
    }

    fn create_pi(&self, _target: StrTendril, _data: StrTendril) -> Self::Handle {
        self.state.borrow_mut().dom.add_node(PaDomNode::Comment)
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        let mut state = self.state.borrow_mut();
        Self::insert_child(&mut state.dom, parent, None, child);
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        let mut state = self.state.borrow_mut();
        match state.dom.parent_of(element) {
            Some((parent, index)) => {
                Self::insert_child(&mut state.dom, &parent, Some(index), child)
            }
            None => Self::insert_child(&mut state.dom, prev_element, None, child),
        }
    }

    fn append_doctype_to_document(
        &self,
        _name: StrTendril,
        _public_id: StrTendril,
        _system_id: StrTendril,
    ) {
    }

    fn mark_script_already_started(&self, _node: &Self::Handle) {}

    fn pop(&self, _node: &Self::Handle) {}

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        target.clone()
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        x == y
    }

    fn set_quirks_mode(&self, _mode: QuirksMode) {}

    fn append_before_sibling(
        &self,
        sibling: &Self::Handle,
        new_node: NodeOrText<Self::Handle>,
    ) {
        let mut state = self.state.borrow_mut();
        if let Some((parent, index)) = state.dom.parent_of(sibling) {
            Self::insert_child(&mut state.dom, &parent, Some(index), new_node);
        }
    }

    fn add_attrs_if_missing(&self, target: &Self::Handle, attrs: Vec<Attribute>) {
        let mut state = self.state.borrow_mut();
        if let PaDomNode::Container(node) = state.dom.get_mut_node(target) {
            for attr in attrs {
                let name = attr.name.local.to_string();
                if node.get_attr(&name).is_none() {
                    node.attrs.push((name, attr.value.to_string()));
                }
            }
        }
    }

    fn associate_with_form(
        &self,
        _target: &Self::Handle,
        _form: &Self::Handle,
        _nodes: (&Self::Handle, Option<&Self::Handle>),
    ) {
    }

    fn remove_from_parent(&self, target: &Self::Handle) {
        self.state.borrow_mut().dom.detach(target);
    }

    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle) {
        self.state
            .borrow_mut()
            .dom
            .reparent_children(node, new_parent);
    }

    fn is_mathml_annotation_xml_integration_point(&self, _handle: &Self::Handle) -> bool {
        false
    }

    fn set_current_line(&self, _line_number: u64) {}

    fn complete_script(&self, _node: &Self::Handle) -> NextParserState {
        NextParserState::Continue
    }

    fn allow_declarative_shadow_roots(&self, _intended_parent: &Self::Handle) -> bool {
        false
    }

    fn attach_declarative_shadow(
        &self,
        _location: &Self::Handle,
        _template: &Self::Handle,
        _attrs: Vec<Attribute>,
    ) -> Result<(), String> {
        Err(String::from("declarative shadow roots are not supported"))
    }
}
