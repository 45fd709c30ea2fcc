//! Schema descriptors: index schemas, index rules, and constraints.

use crate::types::{LabelId, PropId, TypeId};

/// Identifies an index schema: a label plus an ordered list of property
/// keys. Single-column schemas are the common case; multi-column schemas
/// describe composite indexes.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct LabelSchemaDescriptor {
    pub label: LabelId,
    pub props: Vec<PropId>,
}

impl LabelSchemaDescriptor {
    pub fn new(label: LabelId, props: Vec<PropId>) -> Self {
        Self { label, props }
    }

    pub fn single(label: LabelId, prop: PropId) -> Self {
        Self {
            label,
            props: vec![prop],
        }
    }

    pub fn is_composite(&self) -> bool {
        self.props.len() > 1
    }
}

/// Whether an index enforces uniqueness (a constraint's backing index) or
/// is a plain lookup index.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum IndexType {
    General,
    Unique,
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct IndexDescriptor {
    pub schema: LabelSchemaDescriptor,
    pub index_type: IndexType,
}

impl IndexDescriptor {
    pub fn for_schema(schema: LabelSchemaDescriptor) -> Self {
        Self {
            schema,
            index_type: IndexType::General,
        }
    }

    pub fn unique_for_schema(schema: LabelSchemaDescriptor) -> Self {
        Self {
            schema,
            index_type: IndexType::Unique,
        }
    }

    pub fn label(&self) -> LabelId {
        self.schema.label
    }
}

/// A schema constraint. Uniqueness constraints are index-backed: the
/// constraint owns the unique index that enforces it, and dropping the
/// constraint drops that index with it.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum ConstraintDescriptor {
    /// Property values under the schema must be unique per node.
    Unique(LabelSchemaDescriptor),
    /// Nodes with the label must have all of the schema's properties.
    NodePropertyExists(LabelSchemaDescriptor),
    /// Relationships of the type must have the property.
    RelPropertyExists { rel_type: TypeId, prop: PropId },
}

impl ConstraintDescriptor {
    pub fn enforces_uniqueness(&self) -> bool {
        matches!(self, ConstraintDescriptor::Unique(_))
    }

    /// The backing index of an index-backed constraint.
    pub fn owned_index(&self) -> Option<IndexDescriptor> {
        match self {
            ConstraintDescriptor::Unique(schema) => {
                Some(IndexDescriptor::unique_for_schema(schema.clone()))
            }
            _ => None,
        }
    }

    pub fn has_label(&self, label: LabelId) -> bool {
        match self {
            ConstraintDescriptor::Unique(schema)
            | ConstraintDescriptor::NodePropertyExists(schema) => schema.label == label,
            ConstraintDescriptor::RelPropertyExists { .. } => false,
        }
    }

    pub fn has_rel_type(&self, rel_type: TypeId) -> bool {
        match self {
            ConstraintDescriptor::RelPropertyExists { rel_type: t, .. } => *t == rel_type,
            _ => false,
        }
    }

    pub fn schema(&self) -> Option<&LabelSchemaDescriptor> {
        match self {
            ConstraintDescriptor::Unique(schema)
            | ConstraintDescriptor::NodePropertyExists(schema) => Some(schema),
            ConstraintDescriptor::RelPropertyExists { .. } => None,
        }
    }
}
