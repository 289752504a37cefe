//! Playprint item tree (fields + pre-order write path).
//!
//! One item per workprint node, stored at the node's arena index. Items own
//! their typed fields; child order always comes from the workprint.

use smallvec::SmallVec;
use tracing::{trace, warn};

use super::compile::Diagnostic;
use super::sink::PlayprintSink;
use crate::types::{TaggedValue, TypeRegistry};
use crate::util::{Error, Result};
use crate::workprint::{NodeId, Workprint};

/// Named field of an item.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub name: String,
    pub value: TaggedValue,
}

/// Compiled counterpart of one workprint node.
#[derive(Clone, Debug)]
pub struct PlayprintItem {
    node: NodeId,
    fields: SmallVec<[Field; 4]>,
}

impl PlayprintItem {
    /// Authored node this item was built from.
    #[inline]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Fields in declared order.
    #[inline]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Field value by name.
    pub fn field(&self, name: &str) -> Option<&TaggedValue> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }
}

/// Items for a whole workprint.
pub struct ItemTree<'w> {
    workprint: &'w Workprint,
    items: Vec<PlayprintItem>,
}

impl<'w> ItemTree<'w> {
    /// Build items from every authored node, typing each attribute through
    /// the handler its type name selects.
    pub fn build(workprint: &'w Workprint, registry: &TypeRegistry) -> Result<Self> {
        let mut items = Vec::with_capacity(workprint.len());
        for id in workprint.ids() {
            let node = workprint.try_node(id)?;
            let mut fields = SmallVec::new();
            for attr in node.attributes() {
                let value = registry
                    .lookup(&attr.type_name)
                    .and_then(|kind| TaggedValue::from_attr(kind, &attr.value))
                    .inspect_err(|e| {
                        warn!(path = %workprint.path(id), field = %attr.name, "cannot type attribute: {e}")
                    })?;
                fields.push(Field { name: attr.name.clone(), value });
            }
            items.push(PlayprintItem { node: id, fields });
        }
        Ok(Self { workprint, items })
    }

    /// Number of items.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item for an authored node.
    #[inline]
    pub fn item(&self, node: NodeId) -> Option<&PlayprintItem> {
        self.items.get(node.index())
    }

    /// Set a field on the item for `node`.
    ///
    /// An existing field keeps its position and must receive a value of the
    /// same kind; a new field is appended.
    pub fn set_field(&mut self, node: NodeId, name: &str, value: &TaggedValue) -> Result<()> {
        let item = self
            .items
            .get_mut(node.index())
            .ok_or_else(|| Error::invalid(format!("node {node} not in item tree")))?;
        match item.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => field.value.assign(value),
            None => {
                item.fields.push(Field { name: name.to_string(), value: value.clone() });
                Ok(())
            }
        }
    }

    /// Write the whole tree from the workprint root, in pre-order.
    ///
    /// A field with bad data or an unresolved reference is recorded and the
    /// walk continues with the next field. A sink failure ends the walk and is
    /// returned as an error.
    pub fn write(&self, sink: &mut PlayprintSink<'_>) -> Result<Vec<Diagnostic>> {
        let mut diagnostics = Vec::new();
        let Some(root) = self.workprint.root() else {
            return Ok(diagnostics);
        };

        for id in self.workprint.preorder(root) {
            self.write_item(id, sink, &mut diagnostics)?;
        }
        Ok(diagnostics)
    }

    /// Write one item's fields in declared order.
    fn write_item(&self, id: NodeId, sink: &mut PlayprintSink<'_>, diagnostics: &mut Vec<Diagnostic>) -> Result<()> {
        let Some(item) = self.items.get(id.index()) else {
            return Ok(());
        };

        for field in &item.fields {
            trace!(node = %id, field = %field.name, kind = %field.value.kind(), at = sink.len(), "write field");
            match field.value.write(sink) {
                Ok(()) => {}
                Err(error @ Error::SinkWrite(_)) => {
                    warn!(path = %self.workprint.path(id), field = %field.name, "playprint sink failed: {error}");
                    return Err(error);
                }
                Err(error) => {
                    let path = self.workprint.path(id);
                    warn!(%path, field = %field.name, "field not written: {error}");
                    diagnostics.push(Diagnostic { path, field: field.name.clone(), error });
                }
            }
        }
        Ok(())
    }
}
