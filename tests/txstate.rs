use umbra::{
    Direction, IndexDescriptor, LabelId, LabelSchemaDescriptor, NodeId, NodeRow, PropId, PropRow,
    RelId, RelRow, Result, TxState, TxVisitor, TypeId, Value, ValueTuple,
};

/// Counts every event category, standing in for the storage layer that
/// turns the stream into physical writes.
#[derive(Default)]
struct CountingVisitor {
    created_nodes: usize,
    deleted_nodes: usize,
    created_rels: usize,
    deleted_rels: usize,
    label_changes: usize,
    node_props: usize,
    rel_props: usize,
    graph_props: usize,
    schema_changes: usize,
    tokens: usize,
}

impl TxVisitor for CountingVisitor {
    fn visit_created_node(&mut self, _node: NodeId) -> Result<()> {
        self.created_nodes += 1;
        Ok(())
    }

    fn visit_deleted_node(&mut self, _node: NodeId) -> Result<()> {
        self.deleted_nodes += 1;
        Ok(())
    }

    fn visit_created_relationship(
        &mut self,
        _rel: RelId,
        _type_id: TypeId,
        _start: NodeId,
        _end: NodeId,
    ) -> Result<()> {
        self.created_rels += 1;
        Ok(())
    }

    fn visit_deleted_relationship(&mut self, _rel: RelId) -> Result<()> {
        self.deleted_rels += 1;
        Ok(())
    }

    fn visit_node_label_changes(
        &mut self,
        _node: NodeId,
        _added: &rustc_hash::FxHashSet<LabelId>,
        _removed: &rustc_hash::FxHashSet<LabelId>,
    ) -> Result<()> {
        self.label_changes += 1;
        Ok(())
    }

    fn visit_node_property_changes(
        &mut self,
        _node: NodeId,
        _added: &rustc_hash::FxHashMap<PropId, Value>,
        _changed: &rustc_hash::FxHashMap<PropId, Value>,
        _removed: &rustc_hash::FxHashSet<PropId>,
    ) -> Result<()> {
        self.node_props += 1;
        Ok(())
    }

    fn visit_rel_property_changes(
        &mut self,
        _rel: RelId,
        _added: &rustc_hash::FxHashMap<PropId, Value>,
        _changed: &rustc_hash::FxHashMap<PropId, Value>,
        _removed: &rustc_hash::FxHashSet<PropId>,
    ) -> Result<()> {
        self.rel_props += 1;
        Ok(())
    }

    fn visit_graph_property_changes(
        &mut self,
        _added: &rustc_hash::FxHashMap<PropId, Value>,
        _changed: &rustc_hash::FxHashMap<PropId, Value>,
        _removed: &rustc_hash::FxHashSet<PropId>,
    ) -> Result<()> {
        self.graph_props += 1;
        Ok(())
    }

    fn visit_added_index(&mut self, _index: &umbra::IndexDescriptor) -> Result<()> {
        self.schema_changes += 1;
        Ok(())
    }

    fn visit_added_constraint(&mut self, _constraint: &umbra::ConstraintDescriptor) -> Result<()> {
        self.schema_changes += 1;
        Ok(())
    }

    fn visit_created_label_token(&mut self, _name: &str, _id: LabelId) -> Result<()> {
        self.tokens += 1;
        Ok(())
    }

    fn visit_created_property_key_token(&mut self, _name: &str, _id: PropId) -> Result<()> {
        self.tokens += 1;
        Ok(())
    }

    fn visit_created_relationship_type_token(&mut self, _name: &str, _id: TypeId) -> Result<()> {
        self.tokens += 1;
        Ok(())
    }
}

#[test]
fn statement_flow_builds_reads_and_commits() -> Result<()> {
    let mut tx = TxState::new();

    // Token creation as the parser resolves new names.
    tx.label_do_create_for_name("Person", LabelId(1));
    tx.property_key_do_create_for_name("name", PropId(1));
    tx.relationship_type_do_create_for_name("KNOWS", TypeId(1));

    // CREATE (a:Person {name: "ada"})-[:KNOWS]->(b:Person)
    tx.node_do_create(NodeId(100));
    tx.node_do_create(NodeId(101));
    tx.node_do_add_label(LabelId(1), NodeId(100));
    tx.node_do_add_label(LabelId(1), NodeId(101));
    tx.node_do_add_property(NodeId(100), PropId(1), Value::from("ada"));
    tx.relationship_do_create(RelId(500), TypeId(1), NodeId(100), NodeId(101));

    // In-transaction reads see committed plus pending.
    let committed_nodes = vec![NodeId(1), NodeId(2)];
    let mut visible: Vec<NodeId> = tx
        .augment_nodes_get_all(committed_nodes.into_iter())
        .collect();
    visible.sort();
    assert_eq!(
        visible,
        vec![NodeId(1), NodeId(2), NodeId(100), NodeId(101)]
    );

    assert_eq!(
        tx.augment_node_degree(NodeId(100), 0, Direction::Outgoing, None),
        1
    );
    assert!(tx.node_modified_in_tx(NodeId(100)));
    assert!(tx.has_data_changes());

    let mut counts = CountingVisitor::default();
    tx.accept(&mut counts)?;
    assert_eq!(counts.created_nodes, 2);
    assert_eq!(counts.created_rels, 1);
    assert_eq!(counts.deleted_nodes, 0);
    assert_eq!(counts.deleted_rels, 0);
    assert_eq!(counts.label_changes, 2);
    assert_eq!(counts.node_props, 1);
    assert_eq!(counts.rel_props, 0);
    assert_eq!(counts.graph_props, 0);
    assert_eq!(counts.schema_changes, 0);
    assert_eq!(counts.tokens, 3);
    Ok(())
}

#[test]
fn delete_flow_hides_committed_entities_from_reads() -> Result<()> {
    let mut tx = TxState::new();

    // MATCH (n) WHERE id(n) = 2 DETACH DELETE n
    tx.relationship_do_delete(RelId(20), TypeId(1), NodeId(2), NodeId(3));
    tx.node_do_delete(NodeId(2));

    let committed_nodes = vec![NodeId(1), NodeId(2), NodeId(3)];
    let visible: Vec<NodeId> = tx
        .augment_nodes_get_all(committed_nodes.into_iter())
        .collect();
    assert_eq!(visible, vec![NodeId(1), NodeId(3)]);

    let committed_rel = RelRow {
        id: RelId(20),
        type_id: TypeId(1),
        start: NodeId(2),
        end: NodeId(3),
    };
    let visible_rels: Vec<RelRow> = tx
        .augment_relationships_get_all_cursor([committed_rel].into_iter())
        .collect();
    assert!(visible_rels.is_empty());

    let gone: Vec<NodeRow> = tx
        .augment_single_node_cursor(
            [NodeRow {
                id: NodeId(2),
                labels: vec![],
            }]
            .into_iter(),
            NodeId(2),
        )
        .collect();
    assert!(gone.is_empty());

    let mut counts = CountingVisitor::default();
    tx.accept(&mut counts)?;
    assert_eq!(counts.deleted_nodes, 1);
    assert_eq!(counts.deleted_rels, 1);
    Ok(())
}

#[test]
fn property_rewrite_flow_round_trips_through_cursors() -> Result<()> {
    let mut tx = TxState::new();

    // SET n.a = 10, n.c = 30 REMOVE n.b  (a, b committed; c new)
    tx.node_do_change_property(NodeId(7), PropId(1), Value::Int(10));
    tx.node_do_remove_property(NodeId(7), PropId(2));
    tx.node_do_add_property(NodeId(7), PropId(3), Value::Int(30));

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
    let state = tx.node_state(NodeId(7)).map(|s| s.properties());
    let mut rows: Vec<PropRow> = tx
        .augment_property_cursor(committed.into_iter(), state)
        .collect();
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

    let mut counts = CountingVisitor::default();
    tx.accept(&mut counts)?;
    assert_eq!(counts.node_props, 1);
    Ok(())
}

#[test]
fn index_maintenance_flow_supports_range_reads() -> Result<()> {
    let mut tx = TxState::new();
    let schema = LabelSchemaDescriptor::single(LabelId(1), PropId(1));
    let descriptor = IndexDescriptor::for_schema(schema.clone());

    // Property writes feed the index-update table as entries move.
    tx.node_do_create(NodeId(1));
    tx.node_do_add_property(NodeId(1), PropId(1), Value::from("aardvark"));
    tx.index_do_update_entry(&schema, NodeId(1), None, Some(ValueTuple::single("aardvark")));

    tx.node_do_change_property(NodeId(2), PropId(1), Value::from("beaver"));
    tx.index_do_update_entry(
        &schema,
        NodeId(2),
        Some(ValueTuple::single("antelope")),
        Some(ValueTuple::single("beaver")),
    );

    let in_a = tx.index_updates_for_range_seek_by_prefix(&descriptor, "a")?;
    assert!(in_a.is_added(&NodeId(1)));
    assert!(in_a.is_removed(&NodeId(2)));

    // Over the whole band the move cancels out: node 2 stays visible
    // through the committed entry it still owns at its new value.
    let all = tx.index_updates_for_range_seek_by_string(&descriptor, None, true, None, true)?;
    assert!(all.is_added(&NodeId(1)));
    assert!(!all.is_removed(&NodeId(2)));
    Ok(())
}

#[test]
fn rollback_is_plain_disposal() {
    let mut tx = TxState::new();
    tx.node_do_create(NodeId(1));
    tx.relationship_do_create(RelId(1), TypeId(1), NodeId(1), NodeId(1));
    // No visitor runs on rollback; the buffer is simply dropped.
    drop(tx);
}
