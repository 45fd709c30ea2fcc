//! Augmenting cursors: streaming merges of committed-store cursors with
//! this transaction's pending changes.
//!
//! Committed cursors are plain iterators over row values; the wrappers
//! here hide rows the transaction removed, patch rows it changed, and
//! append the entities it created. Wrappers that need to buffer added ids
//! draw their buffer from a free-list owned by the façade and return it on
//! drop.

use std::cell::RefCell;
use std::collections::hash_map;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use crate::state::PropertyState;
use crate::tx::TxState;
use crate::types::{LabelId, NodeId, PropId, RelId, TypeId};
use crate::value::Value;

/// A node as exposed by the committed store: its id and label set.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NodeRow {
    pub id: NodeId,
    pub labels: Vec<LabelId>,
}

/// A relationship row: id, type and endpoints.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RelRow {
    pub id: RelId,
    pub type_id: TypeId,
    pub start: NodeId,
    pub end: NodeId,
}

/// One property entry of a container.
#[derive(Clone, Debug, PartialEq)]
pub struct PropRow {
    pub key: PropId,
    pub value: Value,
}

/// Free-list of id buffers shared between the façade and live cursors.
/// Acquiring pops a cleared buffer or allocates one; dropping the
/// [`Scratch`] guard clears the buffer and pushes it back.
#[derive(Clone, Debug, Default)]
pub(crate) struct ScratchPool {
    bufs: Rc<RefCell<Vec<Vec<u64>>>>,
}

impl ScratchPool {
    pub fn acquire(&self) -> Scratch {
        let buf = self.bufs.borrow_mut().pop().unwrap_or_default();
        Scratch {
            buf,
            pool: self.clone(),
        }
    }
}

#[derive(Debug)]
pub(crate) struct Scratch {
    buf: Vec<u64>,
    pool: ScratchPool,
}

impl Deref for Scratch {
    type Target = Vec<u64>;

    fn deref(&self) -> &Vec<u64> {
        &self.buf
    }
}

impl DerefMut for Scratch {
    fn deref_mut(&mut self) -> &mut Vec<u64> {
        &mut self.buf
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let mut buf = std::mem::take(&mut self.buf);
        buf.clear();
        self.pool.bufs.borrow_mut().push(buf);
    }
}

/// Positions on a single node: hides it if deleted, augments its labels,
/// and synthesizes the row if the node was created by this transaction.
pub struct SingleNodeCursor<'t, I> {
    tx: &'t TxState,
    committed: I,
    node: NodeId,
    done: bool,
}

impl<'t, I> SingleNodeCursor<'t, I> {
    pub(crate) fn new(tx: &'t TxState, committed: I, node: NodeId) -> Self {
        Self {
            tx,
            committed,
            node,
            done: false,
        }
    }
}

impl<I: Iterator<Item = NodeRow>> Iterator for SingleNodeCursor<'_, I> {
    type Item = NodeRow;

    fn next(&mut self) -> Option<NodeRow> {
        if self.done {
            return None;
        }
        self.done = true;
        if self.tx.node_is_deleted_in_tx(self.node) {
            return None;
        }
        if let Some(mut row) = self.committed.next() {
            self.tx.augment_labels(&mut row.labels, self.node);
            return Some(row);
        }
        if self.tx.node_is_added_in_tx(self.node) {
            let mut labels = Vec::new();
            self.tx.augment_labels(&mut labels, self.node);
            return Some(NodeRow {
                id: self.node,
                labels,
            });
        }
        None
    }
}

/// Positions on a single relationship, mirroring [`SingleNodeCursor`].
pub struct SingleRelationshipCursor<'t, I> {
    tx: &'t TxState,
    committed: I,
    rel: RelId,
    done: bool,
}

impl<'t, I> SingleRelationshipCursor<'t, I> {
    pub(crate) fn new(tx: &'t TxState, committed: I, rel: RelId) -> Self {
        Self {
            tx,
            committed,
            rel,
            done: false,
        }
    }
}

impl<I: Iterator<Item = RelRow>> Iterator for SingleRelationshipCursor<'_, I> {
    type Item = RelRow;

    fn next(&mut self) -> Option<RelRow> {
        if self.done {
            return None;
        }
        self.done = true;
        if self.tx.relationship_is_deleted_in_tx(self.rel) {
            return None;
        }
        if let Some(row) = self.committed.next() {
            return Some(row);
        }
        let data = self.tx.relationship_state(self.rel).and_then(|s| s.data())?;
        Some(RelRow {
            id: self.rel,
            type_id: data.type_id,
            start: data.start,
            end: data.end,
        })
    }
}

/// Streams a container's committed properties through its pending change
/// log, then appends the added entries. With `key` set it behaves as a
/// single-property cursor.
pub struct PropertyCursor<'a, I> {
    committed: I,
    state: Option<&'a PropertyState>,
    key: Option<PropId>,
    added: Option<hash_map::Iter<'a, PropId, Value>>,
    added_done: bool,
}

impl<'a, I> PropertyCursor<'a, I> {
    pub(crate) fn new(committed: I, state: Option<&'a PropertyState>, key: Option<PropId>) -> Self {
        Self {
            committed,
            state,
            key,
            added: None,
            added_done: false,
        }
    }

}

impl<'a, I: Iterator<Item = PropRow>> Iterator for PropertyCursor<'a, I> {
    type Item = PropRow;

    fn next(&mut self) -> Option<PropRow> {
        let key_filter = self.key;
        let wanted = move |key: PropId| key_filter.is_none_or(|k| k == key);
        let Some(state) = self.state else {
            loop {
                let row = self.committed.next()?;
                if wanted(row.key) {
                    return Some(row);
                }
            }
        };
        if !self.added_done {
            for row in self.committed.by_ref() {
                if !wanted(row.key) || state.removed().contains(&row.key) {
                    continue;
                }
                match state.changed().get(&row.key) {
                    Some(value) => {
                        return Some(PropRow {
                            key: row.key,
                            value: value.clone(),
                        })
                    }
                    None => return Some(row),
                }
            }
            self.added_done = true;
            if let Some(key) = self.key {
                return state.added().get(&key).map(|value| PropRow {
                    key,
                    value: value.clone(),
                });
            }
        }
        if self.key.is_some() {
            return None;
        }
        let iter = self.added.get_or_insert_with(|| state.added().iter());
        iter.next().map(|(key, value)| PropRow {
            key: *key,
            value: value.clone(),
        })
    }
}

/// Streams committed relationship rows minus the ones this transaction
/// deleted, then the relationships it created (resolved through their
/// recorded metadata). The added-id buffer is pooled.
pub struct RelationshipCursor<'t, I> {
    tx: &'t TxState,
    committed: I,
    added: Option<Scratch>,
    next_added: usize,
}

impl<'t, I> RelationshipCursor<'t, I> {
    pub(crate) fn new(tx: &'t TxState, committed: I, added: Option<Scratch>) -> Self {
        Self {
            tx,
            committed,
            added,
            next_added: 0,
        }
    }
}

impl<I: Iterator<Item = RelRow>> Iterator for RelationshipCursor<'_, I> {
    type Item = RelRow;

    fn next(&mut self) -> Option<RelRow> {
        for row in self.committed.by_ref() {
            if !self.tx.relationship_is_deleted_in_tx(row.id) {
                return Some(row);
            }
        }
        let buf = self.added.as_ref()?;
        while self.next_added < buf.len() {
            let id = RelId(buf[self.next_added]);
            self.next_added += 1;
            if let Some(data) = self.tx.relationship_state(id).and_then(|s| s.data()) {
                return Some(RelRow {
                    id,
                    type_id: data.type_id,
                    start: data.start,
                    end: data.end,
                });
            }
        }
        None
    }
}
