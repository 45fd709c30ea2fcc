use std::cmp::Ordering;

use crate::error::{Result, TxError};
use crate::schema::{IndexDescriptor, LabelSchemaDescriptor};
use crate::state::{DiffSet, DiffView};
use crate::types::NodeId;
use crate::value::{Value, ValueTuple};

use super::TxState;

impl TxState {
    /// Records that a node's indexed value tuple changed from `before` to
    /// `after` under `schema` (either side `None` for entry creation or
    /// removal). The touched per-value deltas are linked to the node's
    /// state while they mention it, so a later delete of the node can
    /// purge them.
    pub fn index_do_update_entry(
        &mut self,
        schema: &LabelSchemaDescriptor,
        node: NodeId,
        before: Option<ValueTuple>,
        after: Option<ValueTuple>,
    ) {
        if let Some(before) = before {
            let handle = self.index_updates.handle_for(schema, before);
            let diff = self.index_updates.diff_mut(handle);
            diff.remove(node);
            if diff.is_removed(&node) {
                self.node_state_mut(node).register_index_diff(handle);
            } else {
                self.node_state_mut(node).deregister_index_diff(handle);
            }
        }
        if let Some(after) = after {
            let handle = self.index_updates.handle_for(schema, after);
            let diff = self.index_updates.diff_mut(handle);
            diff.add(node);
            if diff.is_added(&node) {
                self.node_state_mut(node).register_index_diff(handle);
            } else {
                self.node_state_mut(node).deregister_index_diff(handle);
            }
        }
    }

    /// Union of all pending entry changes for the index.
    pub fn index_updates_for_scan(&self, descriptor: &IndexDescriptor) -> DiffSet<NodeId> {
        self.index_updates.scan(&descriptor.schema)
    }

    /// Pending entry changes at exactly `values`.
    pub fn index_updates_for_seek(
        &self,
        descriptor: &IndexDescriptor,
        values: &ValueTuple,
    ) -> DiffView<'_, NodeId> {
        DiffView::from_option(self.index_updates.seek(&descriptor.schema, values))
    }

    /// Pending entry changes whose single numeric value lies within the
    /// given bounds; a `None` bound is unbounded on that side. `Int` and
    /// `Float` entries form one numeric band.
    ///
    /// Composite indexes are refused: a multi-column tuple has no single
    /// value to range over.
    pub fn index_updates_for_range_seek_by_number(
        &mut self,
        descriptor: &IndexDescriptor,
        lower: Option<&Value>,
        include_lower: bool,
        upper: Option<&Value>,
        include_upper: bool,
    ) -> Result<DiffSet<NodeId>> {
        self.reject_composite(descriptor)?;
        self.merge_sorted_range(descriptor, |value| {
            value.is_number()
                && lower.is_none_or(|lo| {
                    in_range(value.compare_numeric(lo), include_lower, Ordering::Less)
                })
                && upper.is_none_or(|hi| {
                    in_range(value.compare_numeric(hi), include_upper, Ordering::Greater)
                })
        })
    }

    /// String analogue of
    /// [`index_updates_for_range_seek_by_number`](Self::index_updates_for_range_seek_by_number);
    /// a `None` bound is likewise unbounded within the string band.
    pub fn index_updates_for_range_seek_by_string(
        &mut self,
        descriptor: &IndexDescriptor,
        lower: Option<&str>,
        include_lower: bool,
        upper: Option<&str>,
        include_upper: bool,
    ) -> Result<DiffSet<NodeId>> {
        self.reject_composite(descriptor)?;
        self.merge_sorted_range(descriptor, |value| {
            let Some(s) = value.as_str() else {
                return false;
            };
            lower.is_none_or(|lo| in_range(Some(s.cmp(lo)), include_lower, Ordering::Less))
                && upper.is_none_or(|hi| in_range(Some(s.cmp(hi)), include_upper, Ordering::Greater))
        })
    }

    /// Pending entry changes whose string value starts with `prefix`,
    /// taken from the ordered map in one contiguous pass that stops at the
    /// first key past the prefix.
    pub fn index_updates_for_range_seek_by_prefix(
        &mut self,
        descriptor: &IndexDescriptor,
        prefix: &str,
    ) -> Result<DiffSet<NodeId>> {
        self.reject_composite(descriptor)?;
        let mut merged = DiffSet::new();
        let Some(sorted) = self.index_updates.sorted(&descriptor.schema) else {
            return Ok(merged);
        };
        let handles: Vec<_> = sorted
            .range(ValueTuple::single(Value::Str(prefix.to_owned()))..)
            .take_while(|(key, _)| {
                key.only_value()
                    .and_then(Value::as_str)
                    .is_some_and(|s| s.starts_with(prefix))
            })
            .map(|(_, handle)| *handle)
            .collect();
        for handle in handles {
            self.index_updates.merge_into(&mut merged, handle);
        }
        Ok(merged)
    }

    fn reject_composite(&self, descriptor: &IndexDescriptor) -> Result<()> {
        if descriptor.schema.is_composite() {
            return Err(TxError::UnsupportedFeature("composite index range scan"));
        }
        Ok(())
    }

    /// Promotes the descriptor's update map to ordered form and merges
    /// every per-value delta whose single value satisfies `pred`.
    fn merge_sorted_range(
        &mut self,
        descriptor: &IndexDescriptor,
        pred: impl Fn(&Value) -> bool,
    ) -> Result<DiffSet<NodeId>> {
        let mut merged = DiffSet::new();
        let Some(sorted) = self.index_updates.sorted(&descriptor.schema) else {
            return Ok(merged);
        };
        let handles: Vec<_> = sorted
            .iter()
            .filter(|(key, _)| key.only_value().is_some_and(&pred))
            .map(|(_, handle)| *handle)
            .collect();
        for handle in handles {
            self.index_updates.merge_into(&mut merged, handle);
        }
        Ok(merged)
    }
}

/// Whether a comparison against one range bound keeps the value in range.
/// `None` marks incomparable kinds, `Equal` needs inclusivity, and
/// `out_of_range` is the ordering that lies outside (`Less` for lower
/// bounds, `Greater` for upper bounds).
fn in_range(cmp: Option<Ordering>, inclusive: bool, out_of_range: Ordering) -> bool {
    match cmp {
        None => false,
        Some(Ordering::Equal) => inclusive,
        Some(ord) => ord != out_of_range,
    }
}
