use crate::state::PropertyState;
use crate::types::{NodeId, PropId, RelId};
use crate::value::Value;

use super::TxState;

impl TxState {
    /// Records a property for a key absent from the committed node.
    pub fn node_do_add_property(&mut self, node: NodeId, key: PropId, value: Value) {
        self.node_state_mut(node)
            .properties_mut()
            .add_property(key, value);
        self.data_changed();
    }

    /// Records a new value for a key the committed node already has.
    pub fn node_do_change_property(&mut self, node: NodeId, key: PropId, value: Value) {
        self.node_state_mut(node)
            .properties_mut()
            .change_property(key, value);
        self.data_changed();
    }

    pub fn node_do_remove_property(&mut self, node: NodeId, key: PropId) {
        self.node_state_mut(node)
            .properties_mut()
            .remove_property(key);
        self.data_changed();
    }

    /// Sets a relationship property. `replaced` is the committed value,
    /// with the no-value sentinel meaning the key was absent and this is
    /// an addition rather than a change.
    pub fn relationship_do_replace_property(
        &mut self,
        rel: RelId,
        key: PropId,
        replaced: Value,
        value: Value,
    ) {
        let props = self.rel_state_mut(rel).properties_mut();
        if replaced.is_no_value() {
            props.add_property(key, value);
        } else {
            props.change_property(key, value);
        }
        self.data_changed();
    }

    pub fn relationship_do_remove_property(&mut self, rel: RelId, key: PropId) {
        self.rel_state_mut(rel)
            .properties_mut()
            .remove_property(key);
        self.data_changed();
    }

    /// Sets a graph-scoped property; same sentinel convention as
    /// [`relationship_do_replace_property`](Self::relationship_do_replace_property).
    pub fn graph_do_replace_property(&mut self, key: PropId, replaced: Value, value: Value) {
        let props = self.graph_mut();
        if replaced.is_no_value() {
            props.add_property(key, value);
        } else {
            props.change_property(key, value);
        }
        self.data_changed();
    }

    pub fn graph_do_remove_property(&mut self, key: PropId) {
        self.graph_mut().remove_property(key);
        self.data_changed();
    }

    /// The graph's property change log, if the transaction touched any
    /// graph properties.
    pub fn graph_properties(&self) -> Option<&PropertyState> {
        self.graph.as_ref()
    }
}
