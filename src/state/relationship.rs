use crate::types::{NodeId, TypeId};

use super::property::PropertyState;

/// Endpoints and type of a relationship, fixed at creation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RelData {
    pub start: NodeId,
    pub end: NodeId,
    pub type_id: TypeId,
}

/// Pending changes of one relationship. Relationships created by the
/// transaction also carry their metadata triple here, which is what the
/// commit walk and the augmenting cursors read back.
#[derive(Debug, Default)]
pub struct RelationshipState {
    props: PropertyState,
    data: Option<RelData>,
}

impl RelationshipState {
    pub fn properties(&self) -> &PropertyState {
        &self.props
    }

    pub(crate) fn properties_mut(&mut self) -> &mut PropertyState {
        &mut self.props
    }

    pub(crate) fn set_data(&mut self, start: NodeId, end: NodeId, type_id: TypeId) {
        self.data = Some(RelData {
            start,
            end,
            type_id,
        });
    }

    pub fn data(&self) -> Option<RelData> {
        self.data
    }
}
