use rustc_hash::{FxHashMap, FxHashSet};

use crate::cursor::PropRow;
use crate::types::PropId;
use crate::value::Value;

/// Pending property changes of one container (a node, a relationship, or
/// the graph itself).
///
/// A key lives in at most one of the three collections: `added` holds keys
/// absent from the committed store, `changed` holds committed keys with a
/// new value, `removed` holds committed keys that are now gone. The caller
/// is responsible for routing a mutation to the right operation; the log
/// itself does not consult the committed store.
#[derive(Debug, Default)]
pub struct PropertyState {
    added: FxHashMap<PropId, Value>,
    changed: FxHashMap<PropId, Value>,
    removed: FxHashSet<PropId>,
}

/// What this transaction did to a single property key.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PropertyChange<'a> {
    Untouched,
    Set(&'a Value),
    Removed,
}

impl PropertyState {
    /// Records a property for a key the committed store does not have.
    pub fn add_property(&mut self, key: PropId, value: Value) {
        self.added.insert(key, value);
    }

    /// Records a new value for a key. A key added in this transaction is
    /// rewritten in place; otherwise the key counts as changed, and any
    /// pending removal of it is cancelled.
    pub fn change_property(&mut self, key: PropId, value: Value) {
        if let Some(slot) = self.added.get_mut(&key) {
            *slot = value;
            return;
        }
        self.removed.remove(&key);
        self.changed.insert(key, value);
    }

    /// Records a removal. Removing a key added in this transaction cancels
    /// the addition and leaves no trace.
    pub fn remove_property(&mut self, key: PropId) {
        if self.added.remove(&key).is_some() {
            return;
        }
        self.changed.remove(&key);
        self.removed.insert(key);
    }

    pub fn has_property_changes(&self) -> bool {
        !self.added.is_empty() || !self.changed.is_empty() || !self.removed.is_empty()
    }

    pub fn added(&self) -> &FxHashMap<PropId, Value> {
        &self.added
    }

    pub fn changed(&self) -> &FxHashMap<PropId, Value> {
        &self.changed
    }

    pub fn removed(&self) -> &FxHashSet<PropId> {
        &self.removed
    }

    pub fn change_for(&self, key: PropId) -> PropertyChange<'_> {
        if let Some(value) = self.added.get(&key).or_else(|| self.changed.get(&key)) {
            return PropertyChange::Set(value);
        }
        if self.removed.contains(&key) {
            return PropertyChange::Removed;
        }
        PropertyChange::Untouched
    }

    /// Merges a committed property sequence with this log: removed keys
    /// are hidden, changed keys carry their new value, and added entries
    /// follow at the end.
    pub fn augment_properties<'a, I>(&'a self, committed: I) -> impl Iterator<Item = PropRow> + 'a
    where
        I: Iterator<Item = PropRow> + 'a,
    {
        committed
            .filter_map(move |row| {
                if self.removed.contains(&row.key) {
                    return None;
                }
                match self.changed.get(&row.key) {
                    Some(value) => Some(PropRow {
                        key: row.key,
                        value: value.clone(),
                    }),
                    None => Some(row),
                }
            })
            .chain(self.added.iter().map(|(key, value)| PropRow {
                key: *key,
                value: value.clone(),
            }))
    }
}
