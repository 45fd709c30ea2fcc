#![cfg(test)]

use super::*;
use crate::cursor::PropRow;
use crate::types::{Direction, LabelId, NodeId, PropId, RelId, TypeId};
use crate::value::Value;

fn sorted<T: Ord + Copy>(iter: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut out: Vec<T> = iter.into_iter().collect();
    out.sort();
    out
}

mod diffset {
    use super::*;
    use crate::state::diffset::DiffEntry;

    #[test]
    fn add_and_remove_stay_disjoint() {
        let mut diff = DiffSet::new();
        diff.add(1u64);
        diff.remove(2);
        diff.add(2);
        diff.remove(1);
        assert!(diff
            .added()
            .intersection(diff.removed())
            .next()
            .is_none());
    }

    #[test]
    fn remove_cancels_pending_add() {
        let mut diff = DiffSet::new();
        diff.add(7u64);
        assert!(diff.remove(7));
        assert!(diff.is_empty());
    }

    #[test]
    fn add_after_remove_restores_original_state() {
        let mut diff = DiffSet::new();
        diff.add(1u64);
        let before = diff.clone();
        diff.remove(9);
        diff.add(9);
        assert_eq!(diff, before);
    }

    #[test]
    fn un_remove_reports_whether_removal_existed() {
        let mut diff = DiffSet::new();
        diff.remove(4u64);
        assert!(diff.un_remove(&4));
        assert!(!diff.un_remove(&4));
        assert!(diff.is_empty());
    }

    #[test]
    fn augment_hides_removed_and_appends_added() {
        let mut diff = DiffSet::new();
        diff.add(10u64);
        diff.add(11);
        diff.remove(2);
        let committed = vec![1u64, 2, 3];
        let augmented = sorted(diff.augment(committed.into_iter()));
        assert_eq!(augmented, vec![1, 3, 10, 11]);
    }

    #[test]
    fn augment_preserves_committed_order() {
        let mut diff = DiffSet::new();
        diff.remove(5u64);
        let augmented: Vec<u64> = diff.augment(vec![9u64, 5, 1, 3].into_iter()).collect();
        assert_eq!(augmented, vec![9, 1, 3]);
    }

    #[test]
    fn accept_emits_added_then_removed() {
        let mut diff = DiffSet::new();
        diff.add(1u64);
        diff.remove(2);
        let mut events = Vec::new();
        let walked: Result<(), ()> = diff.accept(|entry| {
            match entry {
                DiffEntry::Added(e) => events.push((true, *e)),
                DiffEntry::Removed(e) => events.push((false, *e)),
            }
            Ok(())
        });
        walked.unwrap();
        assert_eq!(events, vec![(true, 1), (false, 2)]);
    }

    #[test]
    fn discard_erases_both_sides() {
        let mut diff = DiffSet::new();
        diff.add(1u64);
        diff.remove(2);
        diff.discard(&1);
        diff.discard(&2);
        assert!(diff.is_empty());
    }

    #[test]
    fn view_over_missing_delta_passes_committed_through() {
        let view: DiffView<'_, u64> = DiffView::Empty;
        let committed = vec![4u64, 5];
        let out: Vec<u64> = view.augment(committed.iter().copied()).collect();
        assert_eq!(out, committed);
        assert!(view.is_empty());
    }
}

mod property {
    use super::*;

    const KEY: PropId = PropId(1);

    #[test]
    fn change_of_added_key_rewrites_in_place() {
        let mut props = PropertyState::default();
        props.add_property(KEY, Value::Int(1));
        props.change_property(KEY, Value::Int(2));
        assert_eq!(props.added().get(&KEY), Some(&Value::Int(2)));
        assert!(props.changed().is_empty());
    }

    #[test]
    fn remove_of_added_key_leaves_no_trace() {
        let mut props = PropertyState::default();
        props.add_property(KEY, Value::Int(1));
        props.remove_property(KEY);
        assert!(!props.has_property_changes());
    }

    #[test]
    fn remove_of_changed_key_becomes_removal() {
        let mut props = PropertyState::default();
        props.change_property(KEY, Value::Int(2));
        props.remove_property(KEY);
        assert!(props.changed().is_empty());
        assert!(props.removed().contains(&KEY));
    }

    #[test]
    fn change_cancels_pending_removal() {
        let mut props = PropertyState::default();
        props.remove_property(KEY);
        props.change_property(KEY, Value::Int(3));
        assert!(props.removed().is_empty());
        assert_eq!(props.changed().get(&KEY), Some(&Value::Int(3)));
    }

    #[test]
    fn change_for_reports_each_disposition() {
        let mut props = PropertyState::default();
        props.add_property(PropId(1), Value::Int(1));
        props.change_property(PropId(2), Value::Int(2));
        props.remove_property(PropId(3));
        assert_eq!(
            props.change_for(PropId(1)),
            PropertyChange::Set(&Value::Int(1))
        );
        assert_eq!(
            props.change_for(PropId(2)),
            PropertyChange::Set(&Value::Int(2))
        );
        assert_eq!(props.change_for(PropId(3)), PropertyChange::Removed);
        assert_eq!(props.change_for(PropId(4)), PropertyChange::Untouched);
    }

    #[test]
    fn augment_overrides_changed_and_appends_added() {
        let mut props = PropertyState::default();
        props.change_property(PropId(1), Value::Int(10));
        props.remove_property(PropId(2));
        props.add_property(PropId(3), Value::Int(30));
        let committed = vec![
            PropRow {
                key: PropId(1),
                value: Value::Int(1),
            },
            PropRow {
                key: PropId(2),
                value: Value::Int(2),
            },
        ];
        let mut rows: Vec<PropRow> = props.augment_properties(committed.into_iter()).collect();
        rows.sort_by_key(|row| row.key);
        assert_eq!(
            rows,
            vec![
                PropRow {
                    key: PropId(1),
                    value: Value::Int(10),
                },
                PropRow {
                    key: PropId(3),
                    value: Value::Int(30),
                },
            ]
        );
    }
}

mod node {
    use super::*;

    const TYPE_A: TypeId = TypeId(1);
    const TYPE_B: TypeId = TypeId(2);

    #[test]
    fn remove_of_relationship_added_in_tx_disappears() {
        let mut state = NodeState::default();
        state.add_relationship(RelId(5), TYPE_A, Direction::Outgoing);
        state.remove_relationship(RelId(5), TYPE_A, Direction::Outgoing);
        assert!(!state.has_relationship_changes());
        assert_eq!(state.augment_degree(Direction::Outgoing, 3, None), 3);
    }

    #[test]
    fn degree_counts_loops_for_both_directions() {
        let mut state = NodeState::default();
        state.add_relationship(RelId(1), TYPE_A, Direction::Both);
        state.add_relationship(RelId(2), TYPE_A, Direction::Outgoing);
        assert_eq!(state.augment_degree(Direction::Outgoing, 0, None), 2);
        assert_eq!(state.augment_degree(Direction::Incoming, 0, None), 1);
        assert_eq!(state.augment_degree(Direction::Both, 0, None), 2);
    }

    #[test]
    fn degree_subtracts_detached_committed_relationships() {
        let mut state = NodeState::default();
        state.remove_relationship(RelId(9), TYPE_A, Direction::Incoming);
        assert_eq!(state.augment_degree(Direction::Incoming, 4, None), 3);
        assert_eq!(state.augment_degree(Direction::Incoming, 4, Some(TYPE_A)), 3);
        assert_eq!(state.augment_degree(Direction::Incoming, 4, Some(TYPE_B)), 4);
    }

    #[test]
    fn added_relationships_honor_direction_and_type_filter() {
        let mut state = NodeState::default();
        state.add_relationship(RelId(1), TYPE_A, Direction::Outgoing);
        state.add_relationship(RelId(2), TYPE_B, Direction::Outgoing);
        state.add_relationship(RelId(3), TYPE_A, Direction::Incoming);
        state.add_relationship(RelId(4), TYPE_A, Direction::Both);

        let out = sorted(state.added_relationships(Direction::Outgoing, None));
        assert_eq!(out, vec![RelId(1), RelId(2), RelId(4)]);

        let out_a = sorted(state.added_relationships(Direction::Outgoing, Some(&[TYPE_A])));
        assert_eq!(out_a, vec![RelId(1), RelId(4)]);

        let both = sorted(state.added_relationships(Direction::Both, None));
        assert_eq!(both, vec![RelId(1), RelId(2), RelId(3), RelId(4)]);
    }

    #[test]
    fn relationship_types_reflect_added_relationships() {
        let mut state = NodeState::default();
        state.add_relationship(RelId(1), TYPE_A, Direction::Outgoing);
        state.add_relationship(RelId(2), TYPE_B, Direction::Both);
        assert_eq!(sorted(state.relationship_types()), vec![TYPE_A, TYPE_B]);
    }

    #[test]
    fn label_diff_roundtrip() {
        let mut state = NodeState::default();
        state.label_diff_mut().add(LabelId(1));
        state.label_diff_mut().remove(LabelId(2));
        assert!(state.label_diff().is_added(&LabelId(1)));
        assert!(state.label_diff().is_removed(&LabelId(2)));
    }
}

mod label {
    use super::*;

    #[test]
    fn label_state_tracks_node_membership() {
        let mut state = LabelState::default();
        state.node_diff_mut().add(NodeId(1));
        state.node_diff_mut().remove(NodeId(2));
        assert!(state.node_diff().is_added(&NodeId(1)));
        assert!(state.node_diff().is_removed(&NodeId(2)));
    }
}
