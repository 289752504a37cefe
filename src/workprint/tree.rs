//! Workprint arena - the authored scene tree.
//!
//! Nodes live in one vector and refer to each other by [`NodeId`]. Each node
//! keeps an ordered list of child ids; first-child/next-sibling navigation
//! is derived from it. Trees are built top-down through [`Workprint::add_child`]
//! so they are always acyclic.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::util::{Error, Result};

/// Index of a node within its [`Workprint`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Raw authored attribute value, prior to typing by a handler.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    #[default]
    None,
    Int(i64),
    Float(f64),
    Ints(Vec<i64>),
    Floats(Vec<f64>),
    Str(String),
}

impl AttrValue {
    /// Short description for error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::None => "none".to_string(),
            Self::Int(_) => "int".to_string(),
            Self::Float(_) => "float".to_string(),
            Self::Ints(v) => format!("int[{}]", v.len()),
            Self::Floats(v) => format!("float[{}]", v.len()),
            Self::Str(_) => "string".to_string(),
        }
    }

    /// Numeric scalar as f32.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Self::Int(i) => Some(*i as f32),
            Self::Float(f) => Some(*f as f32),
            _ => None,
        }
    }

    /// Numeric list as f32.
    pub fn as_f32_vec(&self) -> Option<Vec<f32>> {
        match self {
            Self::Ints(v) => Some(v.iter().map(|i| *i as f32).collect()),
            Self::Floats(v) => Some(v.iter().map(|f| *f as f32).collect()),
            _ => None,
        }
    }

    /// Numeric list of exactly `N` elements as f32.
    pub fn as_f32_array<const N: usize>(&self) -> Option<[f32; N]> {
        self.as_f32_vec()?.try_into().ok()
    }
}

/// One authored attribute: a name, the type name selecting its handler, and
/// the raw value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub value: AttrValue,
}

/// One authored node.
#[derive(Clone, Debug)]
pub struct WorkprintNode {
    type_tag: String,
    name: String,
    parent: Option<NodeId>,
    sibling_index: usize,
    children: Vec<NodeId>,
    attributes: SmallVec<[Attribute; 4]>,
}

impl WorkprintNode {
    /// Node type tag (e.g. "Actor", "Set").
    #[inline]
    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    /// Node name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent node, `None` for the root.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in authored order.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Attributes in authored order.
    #[inline]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

/// Authored scene tree.
#[derive(Clone, Debug, Default)]
pub struct Workprint {
    nodes: Vec<WorkprintNode>,
    root: Option<NodeId>,
}

impl Workprint {
    /// Create an empty workprint.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the root node. Fails if a root already exists.
    pub fn add_root(&mut self, type_tag: &str, name: &str) -> Result<NodeId> {
        if self.root.is_some() {
            return Err(Error::invalid("workprint already has a root"));
        }
        let id = self.push_node(type_tag, name, None, 0);
        self.root = Some(id);
        Ok(id)
    }

    /// Append a child under `parent`, after any existing children.
    pub fn add_child(&mut self, parent: NodeId, type_tag: &str, name: &str) -> Result<NodeId> {
        let sibling_index = self.try_node(parent)?.children.len();
        let id = self.push_node(type_tag, name, Some(parent), sibling_index);
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    fn push_node(
        &mut self,
        type_tag: &str,
        name: &str,
        parent: Option<NodeId>,
        sibling_index: usize,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(WorkprintNode {
            type_tag: type_tag.to_string(),
            name: name.to_string(),
            parent,
            sibling_index,
            children: Vec::new(),
            attributes: SmallVec::new(),
        });
        id
    }

    /// Set an attribute, replacing a same-named one in place.
    pub fn set_attribute(
        &mut self,
        node: NodeId,
        name: &str,
        type_name: &str,
        value: AttrValue,
    ) -> Result<()> {
        self.try_node(node)?;
        let attrs = &mut self.nodes[node.0].attributes;
        let attr = Attribute {
            name: name.to_string(),
            type_name: type_name.to_string(),
            value,
        };
        match attrs.iter_mut().find(|a| a.name == name) {
            Some(existing) => *existing = attr,
            None => attrs.push(attr),
        }
        Ok(())
    }

    /// Root node, if any.
    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All node ids in arena (creation) order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Node by id.
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&WorkprintNode> {
        self.nodes.get(id.0)
    }

    /// Node by id, failing on a foreign or stale id.
    pub fn try_node(&self, id: NodeId) -> Result<&WorkprintNode> {
        self.node(id)
            .ok_or_else(|| Error::invalid(format!("node {id} not in workprint")))
    }

    /// First child in authored order.
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.children.first().copied()
    }

    /// Next sibling in authored order.
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let node = self.node(id)?;
        let parent = self.node(node.parent?)?;
        parent.children.get(node.sibling_index + 1).copied()
    }

    /// Slash-separated path of node names from the root.
    pub fn path(&self, id: NodeId) -> String {
        let mut names = Vec::new();
        let mut cur = Some(id);
        while let Some(n) = cur.and_then(|c| self.node(c)) {
            names.push(n.name.as_str());
            cur = n.parent;
        }
        names.reverse();
        format!("/{}", names.join("/"))
    }

    /// Node ids below `id` (inclusive) in depth-first pre-order.
    pub fn preorder(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            let Some(node) = self.node(cur) else { continue };
            out.push(cur);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }
}
