pub mod cursor;
pub mod error;
pub mod schema;
pub mod state;
pub mod tx;
pub mod types;
pub mod value;
pub mod visitor;

mod index_updates;

pub use crate::cursor::{NodeRow, PropRow, RelRow};
pub use crate::error::{Result, TxError};
pub use crate::schema::{
    ConstraintDescriptor, IndexDescriptor, IndexType, LabelSchemaDescriptor,
};
pub use crate::state::{
    DiffEntry, DiffSet, DiffView, LabelState, NodeState, PropertyChange, PropertyState, RelData,
    RelationshipState,
};
pub use crate::tx::TxState;
pub use crate::types::{Direction, LabelId, NodeId, PropId, RelId, TypeId};
pub use crate::value::{Value, ValueTuple};
pub use crate::visitor::TxVisitor;
