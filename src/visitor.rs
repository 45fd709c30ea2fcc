//! Commit-time change sink.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::Result;
use crate::schema::{ConstraintDescriptor, IndexDescriptor};
use crate::types::{LabelId, NodeId, PropId, RelId, TypeId};
use crate::value::Value;

/// Receives the transaction's accumulated changes, one method per event
/// kind, in the fixed order documented on [`TxState::accept`].
///
/// Every method may fail; the first error aborts the walk and is returned
/// to the caller of `accept` unchanged. All methods default to doing
/// nothing so downstream components implement only what they consume.
///
/// [`TxState::accept`]: crate::tx::TxState::accept
#[allow(unused_variables)]
pub trait TxVisitor {
    fn visit_created_node(&mut self, node: NodeId) -> Result<()> {
        Ok(())
    }

    fn visit_deleted_node(&mut self, node: NodeId) -> Result<()> {
        Ok(())
    }

    fn visit_created_relationship(
        &mut self,
        rel: RelId,
        type_id: TypeId,
        start: NodeId,
        end: NodeId,
    ) -> Result<()> {
        Ok(())
    }

    fn visit_deleted_relationship(&mut self, rel: RelId) -> Result<()> {
        Ok(())
    }

    fn visit_node_label_changes(
        &mut self,
        node: NodeId,
        added: &FxHashSet<LabelId>,
        removed: &FxHashSet<LabelId>,
    ) -> Result<()> {
        Ok(())
    }

    fn visit_node_property_changes(
        &mut self,
        node: NodeId,
        added: &FxHashMap<PropId, Value>,
        changed: &FxHashMap<PropId, Value>,
        removed: &FxHashSet<PropId>,
    ) -> Result<()> {
        Ok(())
    }

    fn visit_rel_property_changes(
        &mut self,
        rel: RelId,
        added: &FxHashMap<PropId, Value>,
        changed: &FxHashMap<PropId, Value>,
        removed: &FxHashSet<PropId>,
    ) -> Result<()> {
        Ok(())
    }

    fn visit_graph_property_changes(
        &mut self,
        added: &FxHashMap<PropId, Value>,
        changed: &FxHashMap<PropId, Value>,
        removed: &FxHashSet<PropId>,
    ) -> Result<()> {
        Ok(())
    }

    fn visit_added_index(&mut self, index: &IndexDescriptor) -> Result<()> {
        Ok(())
    }

    fn visit_removed_index(&mut self, index: &IndexDescriptor) -> Result<()> {
        Ok(())
    }

    fn visit_added_constraint(&mut self, constraint: &ConstraintDescriptor) -> Result<()> {
        Ok(())
    }

    fn visit_removed_constraint(&mut self, constraint: &ConstraintDescriptor) -> Result<()> {
        Ok(())
    }

    fn visit_created_label_token(&mut self, name: &str, id: LabelId) -> Result<()> {
        Ok(())
    }

    fn visit_created_property_key_token(&mut self, name: &str, id: PropId) -> Result<()> {
        Ok(())
    }

    fn visit_created_relationship_type_token(&mut self, name: &str, id: TypeId) -> Result<()> {
        Ok(())
    }
}
