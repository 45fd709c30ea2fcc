use tracing::trace;

use crate::error::{Result, TxError};
use crate::state::DiffEntry;
use crate::visitor::TxVisitor;

use super::TxState;

impl TxState {
    /// Walks the accumulated changes in a fixed categorical order and
    /// feeds them to `visitor`:
    ///
    /// 1. created nodes
    /// 2. created relationships (with type and endpoints)
    /// 3. deleted relationships
    /// 4. deleted nodes
    /// 5. per-node label changes, then property changes
    /// 6. per-relationship property changes
    /// 7. graph property changes
    /// 8. index rule changes (added, then removed)
    /// 9. constraint changes (added, then removed)
    /// 10. created tokens: labels, property keys, relationship types, each
    ///     in id order
    ///
    /// Relationships are deleted before nodes so a downstream validator
    /// never observes a dangling relationship. The first visitor error
    /// aborts the walk and is returned unchanged; cleanup after a failed
    /// commit is the transaction's job, not the buffer's.
    pub fn accept<V: TxVisitor>(&self, visitor: &mut V) -> Result<()> {
        trace!(
            nodes_added = self.nodes.added().len(),
            nodes_removed = self.nodes.removed().len(),
            rels_added = self.relationships.added().len(),
            rels_removed = self.relationships.removed().len(),
            "walking transaction state"
        );

        for &node in self.nodes.added() {
            visitor.visit_created_node(node)?;
        }

        for &rel in self.relationships.added() {
            match self.rel_states.get(&rel).and_then(|state| state.data()) {
                Some(data) => {
                    visitor.visit_created_relationship(rel, data.type_id, data.start, data.end)?
                }
                None => {
                    return Err(TxError::Corruption("created relationship has no metadata"))
                }
            }
        }

        for &rel in self.relationships.removed() {
            visitor.visit_deleted_relationship(rel)?;
        }

        for &node in self.nodes.removed() {
            visitor.visit_deleted_node(node)?;
        }

        for (&node, state) in &self.node_states {
            let labels = state.label_diff();
            if !labels.is_empty() {
                visitor.visit_node_label_changes(node, labels.added(), labels.removed())?;
            }
            let props = state.properties();
            if props.has_property_changes() {
                visitor.visit_node_property_changes(
                    node,
                    props.added(),
                    props.changed(),
                    props.removed(),
                )?;
            }
        }

        for (&rel, state) in &self.rel_states {
            let props = state.properties();
            if props.has_property_changes() {
                visitor.visit_rel_property_changes(
                    rel,
                    props.added(),
                    props.changed(),
                    props.removed(),
                )?;
            }
        }

        if let Some(props) = &self.graph {
            if props.has_property_changes() {
                visitor.visit_graph_property_changes(
                    props.added(),
                    props.changed(),
                    props.removed(),
                )?;
            }
        }

        self.index_changes.accept(|entry| match entry {
            DiffEntry::Added(index) => visitor.visit_added_index(index),
            DiffEntry::Removed(index) => visitor.visit_removed_index(index),
        })?;

        self.constraint_changes.accept(|entry| match entry {
            DiffEntry::Added(constraint) => visitor.visit_added_constraint(constraint),
            DiffEntry::Removed(constraint) => visitor.visit_removed_constraint(constraint),
        })?;

        for (&id, name) in &self.created_label_tokens {
            visitor.visit_created_label_token(name, id)?;
        }
        for (&id, name) in &self.created_property_key_tokens {
            visitor.visit_created_property_key_token(name, id)?;
        }
        for (&id, name) in &self.created_rel_type_tokens {
            visitor.visit_created_relationship_type_token(name, id)?;
        }

        Ok(())
    }
}
