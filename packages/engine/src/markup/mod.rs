//! Arena-based document tree for HTML-like markup.
//!
//! A [`Document`] owns every node in a single `Vec`; nodes address each
//! other through copyable [`NodeId`] indices. Replacing a child is a matter
//! of reassigning one id in the parent's child list, so the tree can be
//! rewritten during a walk without holding references into it. Detached
//! nodes simply stay in the arena until the document is dropped; documents
//! live for one expansion call, so nothing accumulates.

mod parser;
mod serializer;

pub use serializer::{escape_attribute, escape_text};

use std::collections::HashMap;

use crate::error::Result;
use parser::FragmentParser;

/// Attribute view passed to component render functions.
pub type AttributeMap = HashMap<String, String>;

/// Index of a node within its [`Document`]'s arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// An element node: tag name, source-ordered attributes, ordered children.
#[derive(Debug, Clone)]
pub struct Element {
    /// Tag name, normalized to ASCII lowercase.
    pub tag: String,
    /// Attributes in source order. Duplicate names keep the first value.
    pub attrs: Vec<(String, String)>,
    /// Child nodes in document order.
    pub children: Vec<NodeId>,
}

/// A single node in the arena.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// A tagged element.
    Element(Element),
    /// A run of character data, stored decoded.
    Text(String),
}

/// A parsed markup fragment: an arena of nodes plus the ordered list of
/// top-level node ids.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<NodeData>,
    roots: Vec<NodeId>,
}

impl Document {
    /// Parse markup text into a fragment.
    ///
    /// Parsing is lenient the way HTML parsers are: elements left open at
    /// end of input are closed, stray close tags are ignored, void
    /// elements never take children. Hard syntax errors (end of input
    /// inside a tag or inside a quoted attribute value) fail the parse.
    ///
    /// # Errors
    /// Returns `UnclosedTag` or `UnterminatedAttribute` on hard syntax
    /// errors.
    pub fn parse(input: &str) -> Result<Self> {
        let mut doc = Self::default();
        doc.roots = FragmentParser::new(input).run(&mut doc)?;
        Ok(doc)
    }

    /// Parse markup text into this document's arena, returning the new
    /// fragment's top-level node ids without attaching them anywhere.
    ///
    /// This is how expansion results enter the tree they will be spliced
    /// into: the fragment is allocated in, and owned by, the same arena.
    ///
    /// # Errors
    /// Same failure modes as [`Document::parse`].
    pub fn parse_fragment_into(&mut self, markup: &str) -> Result<Vec<NodeId>> {
        FragmentParser::new(markup).run(self)
    }

    /// Top-level node ids in document order.
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Borrow a node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }

    /// Borrow a node as an element, or `None` for text nodes.
    #[must_use]
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes[id.0] {
            NodeData::Element(el) => Some(el),
            NodeData::Text(_) => None,
        }
    }

    /// Tag name of a node, or `None` for text nodes.
    #[must_use]
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|el| el.tag.as_str())
    }

    /// Child ids of a parent, where `None` addresses the top level.
    /// Text nodes have no children.
    #[must_use]
    pub fn child_ids(&self, parent: Option<NodeId>) -> &[NodeId] {
        match parent {
            None => &self.roots,
            Some(id) => match &self.nodes[id.0] {
                NodeData::Element(el) => &el.children,
                NodeData::Text(_) => &[],
            },
        }
    }

    /// Attribute map view of an element. Text nodes yield an empty map.
    /// Duplicate attribute names keep the first occurrence.
    #[must_use]
    pub fn attribute_map(&self, id: NodeId) -> AttributeMap {
        let mut map = AttributeMap::new();
        if let Some(el) = self.element(id) {
            for (name, value) in &el.attrs {
                map.entry(name.clone()).or_insert_with(|| value.clone());
            }
        }
        map
    }

    /// Create a new, empty element in the arena. The tag name is
    /// normalized to lowercase. The node starts detached.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push_node(NodeData::Element(Element {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            children: Vec::new(),
        }))
    }

    /// Append a child id to an element's child list.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        match &mut self.nodes[parent.0] {
            NodeData::Element(el) => el.children.push(child),
            NodeData::Text(_) => {
                debug_assert!(false, "append_child called on a text node");
            }
        }
    }

    /// Reassign the child slot at `index` under `parent` (`None` = top
    /// level) to a different node. Siblings keep their positions.
    pub fn replace_child(&mut self, parent: Option<NodeId>, index: usize, new_child: NodeId) {
        match parent {
            None => self.roots[index] = new_child,
            Some(id) => match &mut self.nodes[id.0] {
                NodeData::Element(el) => el.children[index] = new_child,
                NodeData::Text(_) => {
                    debug_assert!(false, "replace_child called on a text node");
                }
            },
        }
    }

    pub(crate) fn push_node(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(data);
        id
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.0]
    }
}
