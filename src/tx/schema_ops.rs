use crate::schema::{ConstraintDescriptor, IndexDescriptor, LabelSchemaDescriptor};
use crate::state::DiffSet;
use crate::types::{LabelId, PropId, TypeId};

use super::TxState;

impl TxState {
    pub fn label_do_create_for_name(&mut self, name: &str, id: LabelId) {
        self.created_label_tokens.insert(id, name.to_owned());
        self.changed();
    }

    pub fn property_key_do_create_for_name(&mut self, name: &str, id: PropId) {
        self.created_property_key_tokens.insert(id, name.to_owned());
        self.changed();
    }

    pub fn relationship_type_do_create_for_name(&mut self, name: &str, id: TypeId) {
        self.created_rel_type_tokens.insert(id, name.to_owned());
        self.changed();
    }

    /// Adds an index rule. If the same rule was dropped earlier in this
    /// transaction the drop is cancelled instead, leaving no net change.
    pub fn index_rule_do_add(&mut self, descriptor: IndexDescriptor) {
        if !self.index_changes.un_remove(&descriptor) {
            self.index_changes.add(descriptor);
        }
        self.changed();
    }

    pub fn index_do_drop(&mut self, descriptor: IndexDescriptor) {
        self.index_changes.remove(descriptor);
        self.changed();
    }

    /// Cancels a pending index drop; true if there was one.
    pub fn index_do_un_remove(&mut self, descriptor: &IndexDescriptor) -> bool {
        self.index_changes.un_remove(descriptor)
    }

    pub fn index_changes(&self) -> &DiffSet<IndexDescriptor> {
        &self.index_changes
    }

    /// Index rule changes whose schema targets the label.
    pub fn index_diff_sets_by_label(&self, label: LabelId) -> DiffSet<IndexDescriptor> {
        self.index_changes.filter(|d| d.label() == label)
    }

    /// Adds an index-backed constraint together with the id of the index
    /// created to enforce it.
    pub fn constraint_do_add(&mut self, constraint: ConstraintDescriptor, index_id: u64) {
        self.constraint_changes.add(constraint.clone());
        self.constraint_indexes.insert(constraint, index_id);
        self.changed();
    }

    /// Adds a constraint that needs no backing index.
    pub fn constraint_do_add_plain(&mut self, constraint: ConstraintDescriptor) {
        self.constraint_changes.add(constraint);
        self.changed();
    }

    /// Drops a constraint. Dropping a uniqueness constraint also drops the
    /// index that enforces it.
    pub fn constraint_do_drop(&mut self, constraint: ConstraintDescriptor) {
        self.constraint_changes.remove(constraint.clone());
        if let Some(index) = constraint.owned_index() {
            self.index_do_drop(index);
        }
        self.changed();
    }

    /// Cancels a pending constraint drop; true if there was one.
    pub fn constraint_do_un_remove(&mut self, constraint: &ConstraintDescriptor) -> bool {
        self.constraint_changes.un_remove(constraint)
    }

    pub fn constraints_changes(&self) -> &DiffSet<ConstraintDescriptor> {
        &self.constraint_changes
    }

    pub fn constraints_changes_for_label(&self, label: LabelId) -> DiffSet<ConstraintDescriptor> {
        self.constraint_changes.filter(|c| c.has_label(label))
    }

    pub fn constraints_changes_for_schema(
        &self,
        schema: &LabelSchemaDescriptor,
    ) -> DiffSet<ConstraintDescriptor> {
        self.constraint_changes
            .filter(|c| c.schema() == Some(schema))
    }

    pub fn constraints_changes_for_relationship_type(
        &self,
        rel_type: TypeId,
    ) -> DiffSet<ConstraintDescriptor> {
        self.constraint_changes.filter(|c| c.has_rel_type(rel_type))
    }

    /// Backing indexes of the uniqueness constraints added by this
    /// transaction.
    pub fn constraint_indexes_created_in_tx(&self) -> impl Iterator<Item = IndexDescriptor> + '_ {
        self.constraint_indexes
            .keys()
            .filter_map(ConstraintDescriptor::owned_index)
    }

    /// Id of the index created for a constraint added this transaction.
    pub fn index_created_for_constraint(&self, constraint: &ConstraintDescriptor) -> Option<u64> {
        self.constraint_indexes.get(constraint).copied()
    }
}
