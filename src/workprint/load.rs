//! JSON interchange for workprints.
//!
//! A nested document mirrors the tree:
//!
//! ```json
//! { "type": "Scene", "name": "root",
//!   "attributes": [ { "name": "origin", "type": "MlVector2", "value": [0, 1] } ],
//!   "children": [ { "type": "Actor", "name": "hero" } ] }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::util::Result;

use super::{Attribute, NodeId, Workprint};

#[derive(Deserialize)]
struct NodeDoc {
    #[serde(rename = "type")]
    type_tag: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    attributes: Vec<Attribute>,
    #[serde(default)]
    children: Vec<NodeDoc>,
}

impl Workprint {
    /// Parse a workprint from a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let doc: NodeDoc = serde_json::from_str(s)?;
        let mut wp = Workprint::new();
        let root = wp.add_root(&doc.type_tag, &doc.name)?;
        wp.fill(root, doc)?;
        Ok(wp)
    }

    /// Read a workprint from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    fn fill(&mut self, id: NodeId, doc: NodeDoc) -> Result<()> {
        for attr in doc.attributes {
            self.set_attribute(id, &attr.name, &attr.type_name, attr.value)?;
        }
        for child in doc.children {
            let child_id = self.add_child(id, &child.type_tag, &child.name)?;
            self.fill(child_id, child)?;
        }
        Ok(())
    }
}
