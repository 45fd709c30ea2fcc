use crate::cursor::{
    NodeRow, PropertyCursor, PropRow, RelationshipCursor, RelRow, SingleNodeCursor,
    SingleRelationshipCursor,
};
use crate::state::PropertyState;
use crate::types::{Direction, LabelId, NodeId, PropId, RelId, TypeId};

use super::TxState;

impl TxState {
    /// Committed node-id stream with removed nodes hidden and created
    /// nodes appended.
    pub fn augment_nodes_get_all<'a, I>(&'a self, committed: I) -> impl Iterator<Item = NodeId> + 'a
    where
        I: Iterator<Item = NodeId> + 'a,
    {
        self.nodes.augment(committed)
    }

    /// Committed relationship-id stream with removed relationships hidden
    /// and created ones appended.
    pub fn augment_relationships_get_all<'a, I>(
        &'a self,
        committed: I,
    ) -> impl Iterator<Item = RelId> + 'a
    where
        I: Iterator<Item = RelId> + 'a,
    {
        self.relationships.augment(committed)
    }

    pub fn augment_single_node_cursor<I>(
        &self,
        committed: I,
        node: NodeId,
    ) -> SingleNodeCursor<'_, I>
    where
        I: Iterator<Item = NodeRow>,
    {
        SingleNodeCursor::new(self, committed, node)
    }

    pub fn augment_single_relationship_cursor<I>(
        &self,
        committed: I,
        rel: RelId,
    ) -> SingleRelationshipCursor<'_, I>
    where
        I: Iterator<Item = RelRow>,
    {
        SingleRelationshipCursor::new(self, committed, rel)
    }

    /// Streams a container's committed properties through its pending
    /// change log. Containers without changes pass through untouched.
    pub fn augment_property_cursor<'a, I>(
        &'a self,
        committed: I,
        state: Option<&'a PropertyState>,
    ) -> PropertyCursor<'a, I>
    where
        I: Iterator<Item = PropRow>,
    {
        PropertyCursor::new(committed, state.filter(|s| s.has_property_changes()), None)
    }

    /// Single-key variant of
    /// [`augment_property_cursor`](Self::augment_property_cursor).
    pub fn augment_single_property_cursor<'a, I>(
        &'a self,
        committed: I,
        state: Option<&'a PropertyState>,
        key: PropId,
    ) -> PropertyCursor<'a, I>
    where
        I: Iterator<Item = PropRow>,
    {
        PropertyCursor::new(
            committed,
            state.filter(|s| s.has_property_changes()),
            Some(key),
        )
    }

    /// Committed graph properties merged with this transaction's graph
    /// property changes.
    pub fn augment_graph_properties<'a, I>(&'a self, committed: I) -> PropertyCursor<'a, I>
    where
        I: Iterator<Item = PropRow>,
    {
        self.augment_property_cursor(committed, self.graph.as_ref())
    }

    /// A node's committed relationships minus the ones this transaction
    /// detached, followed by the ones it attached in the given direction,
    /// optionally restricted to the given types.
    pub fn augment_node_relationship_cursor<'a, I>(
        &'a self,
        committed: I,
        node: NodeId,
        direction: Direction,
        types: Option<&[TypeId]>,
    ) -> RelationshipCursor<'a, I>
    where
        I: Iterator<Item = RelRow>,
    {
        let added = self.node_states.get(&node).and_then(|state| {
            if !state.has_relationship_changes() {
                return None;
            }
            let mut buf = self.scratch.acquire();
            buf.extend(state.added_relationships(direction, types).map(|rel| rel.0));
            Some(buf)
        });
        RelationshipCursor::new(self, committed, added)
    }

    /// All committed relationships minus deleted ones, followed by every
    /// relationship created by this transaction.
    pub fn augment_relationships_get_all_cursor<'a, I>(
        &'a self,
        committed: I,
    ) -> RelationshipCursor<'a, I>
    where
        I: Iterator<Item = RelRow>,
    {
        let added = (!self.relationships.is_empty()).then(|| {
            let mut buf = self.scratch.acquire();
            buf.extend(self.relationships.added().iter().map(|rel| rel.0));
            buf
        });
        RelationshipCursor::new(self, committed, added)
    }

    /// Applies a node's pending label changes to a committed label set.
    pub fn augment_labels(&self, labels: &mut Vec<LabelId>, node: NodeId) {
        let Some(state) = self.node_states.get(&node) else {
            return;
        };
        let diff = state.label_diff();
        if diff.is_empty() {
            return;
        }
        labels.retain(|label| !diff.is_removed(label));
        for label in diff.added() {
            if !labels.contains(label) {
                labels.push(*label);
            }
        }
    }
}
