//! Per-entity change collections behind the transaction-state façade.
//!
//! Each structure here records one entity's (or one label's) pending
//! changes symbolically, so committed reads can be augmented without
//! copying committed data into the transaction.

/// Symbolic set delta: disjoint added/removed sets with un-remove
/// semantics.
pub mod diffset;

/// Per-label node membership changes.
pub mod label;

/// Per-node changes: properties, labels, relationship endpoints.
pub mod node;

/// Property add/replace/remove log shared by nodes, relationships, and the
/// graph itself.
pub mod property;

/// Per-relationship changes and creation metadata.
pub mod relationship;

mod tests;

pub use diffset::{DiffEntry, DiffSet, DiffView};
pub use label::LabelState;
pub use node::NodeState;
pub use property::{PropertyChange, PropertyState};
pub use relationship::{RelData, RelationshipState};
