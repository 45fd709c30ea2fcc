use crate::types::NodeId;

use super::diffset::DiffSet;

/// Pending node-membership changes of one label.
#[derive(Debug, Default)]
pub struct LabelState {
    nodes: DiffSet<NodeId>,
}

impl LabelState {
    pub fn node_diff(&self) -> &DiffSet<NodeId> {
        &self.nodes
    }

    pub(crate) fn node_diff_mut(&mut self) -> &mut DiffSet<NodeId> {
        &mut self.nodes
    }
}
