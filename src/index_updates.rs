//! Per-schema, per-value index entry deltas.
//!
//! Every `(schema, value tuple)` pair owns a [`DiffSet`] of node ids. The
//! sets live in an arena and are addressed by handle, so node states can
//! keep back-links to the sets that mention them without forming a cyclic
//! object graph; deleting a node walks its handles and excises the id.
//!
//! The per-schema map starts out hashed. The first value-ordered query
//! (range or prefix) promotes it in place to an ordered map; every later
//! write for that schema lands in the ordered form.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::schema::LabelSchemaDescriptor;
use crate::state::DiffSet;
use crate::types::NodeId;
use crate::value::ValueTuple;

/// Arena address of one per-value [`DiffSet`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DiffHandle(u32);

#[derive(Debug)]
enum ValueMap {
    Hashed(FxHashMap<ValueTuple, DiffHandle>),
    Sorted(BTreeMap<ValueTuple, DiffHandle>),
}

impl ValueMap {
    fn get(&self, values: &ValueTuple) -> Option<DiffHandle> {
        match self {
            ValueMap::Hashed(map) => map.get(values).copied(),
            ValueMap::Sorted(map) => map.get(values).copied(),
        }
    }

    fn insert(&mut self, values: ValueTuple, handle: DiffHandle) {
        match self {
            ValueMap::Hashed(map) => {
                map.insert(values, handle);
            }
            ValueMap::Sorted(map) => {
                map.insert(values, handle);
            }
        }
    }

    fn handles(&self) -> impl Iterator<Item = DiffHandle> + '_ {
        let hashed = match self {
            ValueMap::Hashed(map) => Some(map.values()),
            ValueMap::Sorted(_) => None,
        };
        let sorted = match self {
            ValueMap::Hashed(_) => None,
            ValueMap::Sorted(map) => Some(map.values()),
        };
        hashed
            .into_iter()
            .flatten()
            .chain(sorted.into_iter().flatten())
            .copied()
    }
}

#[derive(Debug, Default)]
pub(crate) struct IndexUpdates {
    by_schema: FxHashMap<LabelSchemaDescriptor, ValueMap>,
    arena: Vec<DiffSet<NodeId>>,
}

impl IndexUpdates {
    pub fn diff(&self, handle: DiffHandle) -> &DiffSet<NodeId> {
        &self.arena[handle.0 as usize]
    }

    pub fn diff_mut(&mut self, handle: DiffHandle) -> &mut DiffSet<NodeId> {
        &mut self.arena[handle.0 as usize]
    }

    /// Handle of the delta at `(schema, values)`, allocating the schema
    /// map, the slot, and the arena entry as needed.
    pub fn handle_for(&mut self, schema: &LabelSchemaDescriptor, values: ValueTuple) -> DiffHandle {
        let arena = &mut self.arena;
        let map = self
            .by_schema
            .entry(schema.clone())
            .or_insert_with(|| ValueMap::Hashed(FxHashMap::default()));
        match map.get(&values) {
            Some(handle) => handle,
            None => {
                let handle = DiffHandle(arena.len() as u32);
                arena.push(DiffSet::new());
                map.insert(values, handle);
                handle
            }
        }
    }

    /// Delta stored at exactly `(schema, values)`, if any.
    pub fn seek(
        &self,
        schema: &LabelSchemaDescriptor,
        values: &ValueTuple,
    ) -> Option<&DiffSet<NodeId>> {
        let handle = self.by_schema.get(schema)?.get(values)?;
        Some(self.diff(handle))
    }

    /// Union of every per-value delta recorded for `schema`.
    pub fn scan(&self, schema: &LabelSchemaDescriptor) -> DiffSet<NodeId> {
        let mut merged = DiffSet::new();
        if let Some(map) = self.by_schema.get(schema) {
            for handle in map.handles() {
                self.merge_into(&mut merged, handle);
            }
        }
        merged
    }

    /// The schema's map in ordered form, promoting the hashed form on
    /// first use.
    pub fn sorted(
        &mut self,
        schema: &LabelSchemaDescriptor,
    ) -> Option<&BTreeMap<ValueTuple, DiffHandle>> {
        let map = self.by_schema.get_mut(schema)?;
        if let ValueMap::Hashed(hashed) = map {
            trace!(entries = hashed.len(), "promoting index updates to ordered form");
            let sorted: BTreeMap<ValueTuple, DiffHandle> = std::mem::take(hashed).into_iter().collect();
            *map = ValueMap::Sorted(sorted);
        }
        match map {
            ValueMap::Sorted(sorted) => Some(sorted),
            ValueMap::Hashed(_) => unreachable!("promoted above"),
        }
    }

    pub fn merge_into(&self, target: &mut DiffSet<NodeId>, handle: DiffHandle) {
        let diff = self.diff(handle);
        target.add_all(diff.added().iter().copied());
        target.remove_all(diff.removed().iter().copied());
    }

    /// Erases a deleted node from every delta that mentions it, so stale
    /// entries cannot surface through later scans. Pending additions are
    /// dropped and pending removals cancelled.
    pub fn purge_node(&mut self, node: NodeId, handles: &[DiffHandle]) {
        for &handle in handles {
            let diff = self.diff_mut(handle);
            if diff.is_added(&node) {
                diff.remove(node);
            } else if diff.is_removed(&node) {
                diff.add(node);
            }
        }
    }
}
