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

//! Arena tree built by the HTML parser.

use html5ever::tree_builder::ElementFlags;
use html5ever::{Attribute, QualName};

use super::panode_container::PaNodeContainer;

const HTML_NS: &str = "http://www.w3.org/1999/xhtml";

pub(crate) fn paqual_name(local: &str) -> QualName {
    QualName::new(None, HTML_NS.into(), local.into())
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct PaDomHandle(pub(crate) usize);

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PaNodeText {
    pub(crate) content: String,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum PaDomNode {
    Document(PaNodeContainer),
    Container(PaNodeContainer),
    Text(PaNodeText),
    Comment,
}

impl PaDomNode {
    pub(crate) fn children(&self) -> &[PaDomHandle] {
        match self {
            PaDomNode::Document(c) | PaDomNode::Container(c) => &c.children,
            PaDomNode::Text(_) | PaDomNode::Comment => &[],
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<PaDomHandle>> {
        match self {
            PaDomNode::Document(c) | PaDomNode::Container(c) => {
                Some(&mut c.children)
            }
            PaDomNode::Text(_) | PaDomNode::Comment => None,
        }
    }

    pub(crate) fn name(&self) -> Option<&QualName> {
        match self {
            PaDomNode::Document(c) | PaDomNode::Container(c) => Some(&c.name),
            PaDomNode::Text(_) | PaDomNode::Comment => None,
        }
    }
}

/// Every node the parser created, addressed by handle. Nodes detached by
/// the tree builder stay in the arena but are unreachable from the
/// document node.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PaDom {
    nodes: Vec<PaDomNode>,
    /// Parent of each node, indexed like `nodes`.
    parents: Vec<Option<PaDomHandle>>,
    document_handle: PaDomHandle,
}

impl Default for PaDom {
    fn default() -> Self {
        Self::new()
    }
}

impl PaDom {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![PaDomNode::Document(PaNodeContainer {
                name: paqual_name(""),
                attrs: Vec::new(),
                children: Vec::new(),
            })],
            parents: vec![None],
            document_handle: PaDomHandle(0),
        }
    }

    pub(crate) fn document_handle(&self) -> PaDomHandle {
        self.document_handle.clone()
    }

    pub(crate) fn get_node(&self, handle: &PaDomHandle) -> &PaDomNode {
        &self.nodes[handle.0]
    }

    pub(crate) fn get_mut_node(&mut self, handle: &PaDomHandle) -> &mut PaDomNode {
        &mut self.nodes[handle.0]
    }

    pub(crate) fn add_node(&mut self, node: PaDomNode) -> PaDomHandle {
        self.nodes.push(node);
        self.parents.push(None);
        PaDomHandle(self.nodes.len() - 1)
    }

    pub(crate) fn create_element(
        &mut self,
        name: QualName,
        attrs: Vec<Attribute>,
        _flags: ElementFlags,
    ) -> PaDomHandle {
        let attrs = attrs
            .into_iter()
            .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
            .collect();
        self.add_node(PaDomNode::Container(PaNodeContainer {
            name,
            attrs,
            children: Vec::new(),
        }))
    }

    /// The parent of `child` and the child's index within it.
    pub(crate) fn parent_of(
        &self,
        child: &PaDomHandle,
    ) -> Option<(PaDomHandle, usize)> {
        let parent = self.parents.get(child.0)?.as_ref()?;
        let index = self
            .get_node(parent)
            .children()
            .iter()
            .position(|h| h == child)?;
        Some((parent.clone(), index))
    }

    /// Insert `child` under `parent` at `index`, or last when `index` is
    /// `None`. Text and comment nodes take no children.
    pub(crate) fn insert_child(
        &mut self,
        parent: &PaDomHandle,
        index: Option<usize>,
        child: PaDomHandle,
    ) {
        if let Some(children) = self.nodes[parent.0].children_mut() {
            match index {
                Some(index) => children.insert(index, child.clone()),
                None => children.push(child.clone()),
            }
            self.parents[child.0] = Some(parent.clone());
        }
    }

    pub(crate) fn detach(&mut self, child: &PaDomHandle) {
        if let Some((parent, index)) = self.parent_of(child) {
            if let Some(children) = self.nodes[parent.0].children_mut() {
                children.remove(index);
            }
        }
        self.parents[child.0] = None;
    }

    /// Move every child of `node` to the end of `new_parent`.
    pub(crate) fn reparent_children(
        &mut self,
        node: &PaDomHandle,
        new_parent: &PaDomHandle,
    ) {
        let moved = self.nodes[node.0]
            .children_mut()
            .map(std::mem::take)
            .unwrap_or_default();
        for child in moved {
            self.insert_child(new_parent, None, child);
        }
    }
}
