use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::index_updates::DiffHandle;
use crate::types::{Direction, LabelId, RelId, TypeId};

use super::diffset::DiffSet;
use super::property::PropertyState;

/// Relationship ids grouped by direction and type. One instance tracks the
/// relationships a transaction attached to a node, a second tracks the
/// committed relationships it detached.
#[derive(Debug, Default)]
struct RelChanges {
    outgoing: FxHashMap<TypeId, FxHashSet<RelId>>,
    incoming: FxHashMap<TypeId, FxHashSet<RelId>>,
    /// Self-loops; counted for both directions.
    loops: FxHashMap<TypeId, FxHashSet<RelId>>,
}

impl RelChanges {
    fn slot_mut(&mut self, direction: Direction) -> &mut FxHashMap<TypeId, FxHashSet<RelId>> {
        match direction {
            Direction::Outgoing => &mut self.outgoing,
            Direction::Incoming => &mut self.incoming,
            Direction::Both => &mut self.loops,
        }
    }

    fn add(&mut self, rel: RelId, type_id: TypeId, direction: Direction) {
        self.slot_mut(direction)
            .entry(type_id)
            .or_default()
            .insert(rel);
    }

    fn remove(&mut self, rel: RelId, type_id: TypeId, direction: Direction) -> bool {
        let slot = self.slot_mut(direction);
        let Some(set) = slot.get_mut(&type_id) else {
            return false;
        };
        let hit = set.remove(&rel);
        if set.is_empty() {
            slot.remove(&type_id);
        }
        hit
    }

    /// The maps a directional query must consult. Self-loops count toward
    /// every direction.
    fn maps_for(
        &self,
        direction: Direction,
    ) -> impl Iterator<Item = &FxHashMap<TypeId, FxHashSet<RelId>>> {
        let outgoing = direction.includes_out().then_some(&self.outgoing);
        let incoming = direction.includes_in().then_some(&self.incoming);
        [outgoing, incoming, Some(&self.loops)].into_iter().flatten()
    }

    fn degree(&self, direction: Direction, type_id: Option<TypeId>) -> usize {
        match type_id {
            Some(t) => self
                .maps_for(direction)
                .filter_map(|map| map.get(&t))
                .map(FxHashSet::len)
                .sum(),
            None => self
                .maps_for(direction)
                .flat_map(FxHashMap::values)
                .map(FxHashSet::len)
                .sum(),
        }
    }

    fn is_empty(&self) -> bool {
        self.outgoing.is_empty() && self.incoming.is_empty() && self.loops.is_empty()
    }
}

/// Pending changes of one node: properties, label membership, attached and
/// detached relationships, and handles to the per-value index deltas that
/// currently mention the node.
#[derive(Debug, Default)]
pub struct NodeState {
    props: PropertyState,
    labels: DiffSet<LabelId>,
    rels_added: RelChanges,
    rels_removed: RelChanges,
    index_diffs: SmallVec<[DiffHandle; 4]>,
}

impl NodeState {
    pub fn properties(&self) -> &PropertyState {
        &self.props
    }

    pub(crate) fn properties_mut(&mut self) -> &mut PropertyState {
        &mut self.props
    }

    pub fn label_diff(&self) -> &DiffSet<LabelId> {
        &self.labels
    }

    pub(crate) fn label_diff_mut(&mut self) -> &mut DiffSet<LabelId> {
        &mut self.labels
    }

    pub(crate) fn add_relationship(&mut self, rel: RelId, type_id: TypeId, direction: Direction) {
        self.rels_added.add(rel, type_id, direction);
    }

    /// Detaches a relationship. One attached by this same transaction
    /// silently disappears; otherwise the detachment is recorded so degree
    /// queries can subtract it from the committed count.
    pub(crate) fn remove_relationship(
        &mut self,
        rel: RelId,
        type_id: TypeId,
        direction: Direction,
    ) {
        if !self.rels_added.remove(rel, type_id, direction) {
            self.rels_removed.add(rel, type_id, direction);
        }
    }

    /// Committed degree corrected by this transaction's changes.
    pub fn augment_degree(
        &self,
        direction: Direction,
        committed: usize,
        type_id: Option<TypeId>,
    ) -> usize {
        (committed + self.rels_added.degree(direction, type_id))
            .saturating_sub(self.rels_removed.degree(direction, type_id))
    }

    /// Relationship ids attached by this transaction, filtered by
    /// direction and optionally by type.
    pub fn added_relationships<'a>(
        &'a self,
        direction: Direction,
        types: Option<&'a [TypeId]>,
    ) -> impl Iterator<Item = RelId> + 'a {
        self.rels_added.maps_for(direction).flat_map(move |map| {
            map.iter()
                .filter(move |(t, _)| types.is_none_or(|ts| ts.contains(*t)))
                .flat_map(|(_, rels)| rels.iter().copied())
        })
    }

    /// Types of the relationships attached by this transaction.
    pub fn relationship_types(&self) -> FxHashSet<TypeId> {
        self.rels_added
            .maps_for(Direction::Both)
            .flat_map(FxHashMap::keys)
            .copied()
            .collect()
    }

    pub fn has_relationship_changes(&self) -> bool {
        !self.rels_added.is_empty() || !self.rels_removed.is_empty()
    }

    pub(crate) fn register_index_diff(&mut self, handle: DiffHandle) {
        if !self.index_diffs.contains(&handle) {
            self.index_diffs.push(handle);
        }
    }

    pub(crate) fn deregister_index_diff(&mut self, handle: DiffHandle) {
        self.index_diffs.retain(|h| *h != handle);
    }

    pub(crate) fn index_diffs(&self) -> &[DiffHandle] {
        &self.index_diffs
    }
}
