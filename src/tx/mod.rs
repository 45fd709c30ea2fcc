//! The transaction-state façade.
//!
//! One instance is owned by exactly one transaction and never shared.
//! Statement execution feeds mutations in through the `*_do_*` methods;
//! read paths pull augmented views out; commit walks the accumulated
//! changes with [`accept`](TxState::accept) and the buffer is then
//! discarded. Rollback discards it without a walk.
//!
//! Every collection is empty until the first write that needs it, so a
//! read-only transaction pays for nothing but the struct itself.

use std::collections::BTreeMap;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::cursor::ScratchPool;
use crate::index_updates::IndexUpdates;
use crate::schema::{ConstraintDescriptor, IndexDescriptor};
use crate::state::{
    DiffSet, LabelState, NodeState, PropertyState, RelationshipState,
};
use crate::types::{LabelId, NodeId, PropId, RelId, TypeId};

mod accept;
mod cursor_ops;
mod index_ops;
mod node_ops;
mod prop_ops;
mod rel_ops;
mod schema_ops;

#[derive(Debug, Default)]
pub struct TxState {
    /// Added and removed nodes; modified-only nodes do not appear here.
    nodes: DiffSet<NodeId>,
    /// Added and removed relationships; modified-only ones do not appear.
    relationships: DiffSet<RelId>,
    node_states: FxHashMap<NodeId, NodeState>,
    rel_states: FxHashMap<RelId, RelationshipState>,
    label_states: FxHashMap<LabelId, LabelState>,
    graph: Option<PropertyState>,
    /// Ids deleted by this transaction even when a same-tx create cancelled
    /// them out of `nodes`/`relationships`. Idempotency checks need the
    /// answer after a create-delete sequence.
    nodes_deleted: FxHashSet<NodeId>,
    rels_deleted: FxHashSet<RelId>,
    created_label_tokens: BTreeMap<LabelId, String>,
    created_property_key_tokens: BTreeMap<PropId, String>,
    created_rel_type_tokens: BTreeMap<TypeId, String>,
    index_changes: DiffSet<IndexDescriptor>,
    constraint_changes: DiffSet<ConstraintDescriptor>,
    /// Backing-index ids recorded for uniqueness constraints added here.
    constraint_indexes: FxHashMap<ConstraintDescriptor, u64>,
    index_updates: IndexUpdates,
    scratch: ScratchPool,
    has_changes: bool,
    has_data_changes: bool,
}

impl TxState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once any mutation, data or schema, has been recorded.
    pub fn has_changes(&self) -> bool {
        self.has_changes
    }

    /// True once a data mutation (anything except token and schema
    /// bookkeeping) has been recorded.
    pub fn has_data_changes(&self) -> bool {
        self.has_data_changes
    }

    pub(crate) fn changed(&mut self) {
        self.has_changes = true;
    }

    pub(crate) fn data_changed(&mut self) {
        self.changed();
        self.has_data_changes = true;
    }

    pub fn node_state(&self, node: NodeId) -> Option<&NodeState> {
        self.node_states.get(&node)
    }

    pub fn relationship_state(&self, rel: RelId) -> Option<&RelationshipState> {
        self.rel_states.get(&rel)
    }

    /// Nodes with any per-node state, i.e. the "modified" set the commit
    /// walk reports label and property changes for.
    pub fn modified_nodes(&self) -> impl Iterator<Item = (NodeId, &NodeState)> {
        self.node_states.iter().map(|(id, state)| (*id, state))
    }

    pub fn modified_relationships(&self) -> impl Iterator<Item = (RelId, &RelationshipState)> {
        self.rel_states.iter().map(|(id, state)| (*id, state))
    }

    pub(crate) fn node_state_mut(&mut self, node: NodeId) -> &mut NodeState {
        self.node_states.entry(node).or_default()
    }

    pub(crate) fn rel_state_mut(&mut self, rel: RelId) -> &mut RelationshipState {
        self.rel_states.entry(rel).or_default()
    }

    pub(crate) fn label_state_mut(&mut self, label: LabelId) -> &mut LabelState {
        self.label_states.entry(label).or_default()
    }

    pub(crate) fn graph_mut(&mut self) -> &mut PropertyState {
        self.graph.get_or_insert_with(PropertyState::default)
    }
}
