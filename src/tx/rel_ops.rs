use rustc_hash::FxHashSet;

use crate::state::{DiffSet, NodeState, RelationshipState};
use crate::types::{Direction, NodeId, RelId, TypeId};

use super::TxState;

impl TxState {
    pub fn relationship_do_create(
        &mut self,
        rel: RelId,
        type_id: TypeId,
        start: NodeId,
        end: NodeId,
    ) {
        self.relationships.add(rel);
        if start == end {
            self.node_state_mut(start)
                .add_relationship(rel, type_id, Direction::Both);
        } else {
            self.node_state_mut(start)
                .add_relationship(rel, type_id, Direction::Outgoing);
            self.node_state_mut(end)
                .add_relationship(rel, type_id, Direction::Incoming);
        }
        self.rel_state_mut(rel).set_data(start, end, type_id);
        self.data_changed();
    }

    pub fn relationship_do_delete(
        &mut self,
        rel: RelId,
        type_id: TypeId,
        start: NodeId,
        end: NodeId,
    ) {
        if self.relationships.remove(rel) {
            self.rels_deleted.insert(rel);
        }
        if start == end {
            self.node_state_mut(start)
                .remove_relationship(rel, type_id, Direction::Both);
        } else {
            self.node_state_mut(start)
                .remove_relationship(rel, type_id, Direction::Outgoing);
            self.node_state_mut(end)
                .remove_relationship(rel, type_id, Direction::Incoming);
        }
        self.rel_states.remove(&rel);
        self.data_changed();
    }

    /// Deletes a relationship created by this transaction, resolving the
    /// endpoints from its recorded metadata. Returns false when no such
    /// relationship is known.
    pub fn relationship_do_delete_added_in_tx(&mut self, rel: RelId) -> bool {
        let Some(data) = self.rel_states.get(&rel).and_then(RelationshipState::data) else {
            return false;
        };
        self.relationship_do_delete(rel, data.type_id, data.start, data.end);
        true
    }

    pub fn relationship_is_added_in_tx(&self, rel: RelId) -> bool {
        self.relationships.is_added(&rel)
    }

    /// True if this transaction deleted the relationship, even when it
    /// also created it and the two cancelled out.
    pub fn relationship_is_deleted_in_tx(&self, rel: RelId) -> bool {
        self.rels_deleted.contains(&rel)
    }

    pub fn added_and_removed_relationships(&self) -> &DiffSet<RelId> {
        &self.relationships
    }

    /// Hands the relationship's metadata triple to `f`; `None` when this
    /// transaction holds no metadata for it.
    pub fn relationship_visit<R>(
        &self,
        rel: RelId,
        f: impl FnOnce(RelId, TypeId, NodeId, NodeId) -> R,
    ) -> Option<R> {
        let data = self.rel_states.get(&rel).and_then(RelationshipState::data)?;
        Some(f(rel, data.type_id, data.start, data.end))
    }

    /// Committed degree of a node corrected by this transaction's attached
    /// and detached relationships.
    pub fn augment_node_degree(
        &self,
        node: NodeId,
        committed: usize,
        direction: Direction,
        type_id: Option<TypeId>,
    ) -> usize {
        match self.node_states.get(&node) {
            Some(state) => state.augment_degree(direction, committed, type_id),
            None => committed,
        }
    }

    /// Types of the relationships this transaction attached to the node.
    pub fn node_relationship_types(&self, node: NodeId) -> FxHashSet<TypeId> {
        self.node_states
            .get(&node)
            .map(NodeState::relationship_types)
            .unwrap_or_default()
    }
}
