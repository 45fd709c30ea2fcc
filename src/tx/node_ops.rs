use crate::state::{DiffSet, DiffView, LabelState, NodeState};
use crate::types::{LabelId, NodeId};

use super::TxState;

impl TxState {
    pub fn node_do_create(&mut self, node: NodeId) {
        self.nodes.add(node);
        self.data_changed();
    }

    /// Deletes a node. All of the node's per-entity bookkeeping is torn
    /// down: label states forget it on both sides, and the per-value index
    /// deltas it appears in are purged through the recorded handles.
    pub fn node_do_delete(&mut self, node: NodeId) {
        if self.nodes.remove(node) {
            self.nodes_deleted.insert(node);
        }
        if let Some(state) = self.node_states.remove(&node) {
            let diff = state.label_diff();
            for label in diff.added().iter().chain(diff.removed()) {
                self.label_states
                    .entry(*label)
                    .or_default()
                    .node_diff_mut()
                    .discard(&node);
            }
            self.index_updates.purge_node(node, state.index_diffs());
        }
        self.data_changed();
    }

    pub fn node_is_added_in_tx(&self, node: NodeId) -> bool {
        self.nodes.is_added(&node)
    }

    /// True if this transaction deleted the node, even when it also
    /// created it and the two cancelled out.
    pub fn node_is_deleted_in_tx(&self, node: NodeId) -> bool {
        self.nodes_deleted.contains(&node)
    }

    pub fn node_modified_in_tx(&self, node: NodeId) -> bool {
        self.node_is_added_in_tx(node)
            || self.node_is_deleted_in_tx(node)
            || self.node_states.contains_key(&node)
    }

    pub fn added_and_removed_nodes(&self) -> &DiffSet<NodeId> {
        &self.nodes
    }

    pub fn node_do_add_label(&mut self, label: LabelId, node: NodeId) {
        self.label_state_mut(label).node_diff_mut().add(node);
        self.node_state_mut(node).label_diff_mut().add(label);
        self.data_changed();
    }

    pub fn node_do_remove_label(&mut self, label: LabelId, node: NodeId) {
        self.label_state_mut(label).node_diff_mut().remove(node);
        self.node_state_mut(node).label_diff_mut().remove(label);
        self.data_changed();
    }

    /// Node-membership changes of one label.
    pub fn nodes_with_label_changed(&self, label: LabelId) -> DiffView<'_, NodeId> {
        DiffView::from_option(self.label_states.get(&label).map(LabelState::node_diff))
    }

    /// Label changes of one node.
    pub fn node_label_diff(&self, node: NodeId) -> DiffView<'_, LabelId> {
        DiffView::from_option(self.node_states.get(&node).map(NodeState::label_diff))
    }
}
