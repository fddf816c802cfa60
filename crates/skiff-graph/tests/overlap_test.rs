use skiff_graph::{Edge, Error, Graph, Node};

fn graph(nodes: &[&str], edges: &[(&str, &str, &str)]) -> Graph {
    let mut g = Graph::new();
    g.add_nodes(nodes.iter().map(|id| Node::new(*id)).collect());
    g.add_edges(
        edges
            .iter()
            .map(|(id, s, t)| Edge::new(*id, *s, *t))
            .collect(),
    )
    .unwrap();
    g
}

#[test]
fn multi_edge_pair_splits_by_direction() {
    let g = graph(
        &["a", "b"],
        &[("e1", "a", "b"), ("e2", "a", "b"), ("e3", "b", "a")],
    );

    let groups = g.overlapped_edges(&["a", "b"]).unwrap();
    assert_eq!(groups.len(), 1);

    let group = &groups[0];
    assert_eq!(group.source, "a");
    assert_eq!(group.target, "b");
    assert_eq!(group.outgoing.len(), 2);
    assert_eq!(group.incoming.len(), 1);
    assert_eq!(group.edge_count(), 3);
    assert_eq!(group.incoming[0].id(), "e3");
}

#[test]
fn query_order_does_not_change_the_result() {
    let g = graph(
        &["a", "b"],
        &[("e1", "a", "b"), ("e2", "a", "b"), ("e3", "b", "a")],
    );

    let forward = g.overlapped_edges(&["a", "b"]).unwrap();
    let backward = g.overlapped_edges(&["b", "a"]).unwrap();
    assert_eq!(*forward, *backward);
}

#[test]
fn each_edge_is_attributed_to_exactly_one_group() {
    let g = graph(&["a", "b", "c"], &[("e1", "a", "b"), ("e2", "b", "c")]);

    // Both endpoints of e1 are queried; it must still show up once.
    let groups = g.overlapped_edges(&["a", "b", "c"]).unwrap();
    let mut seen: Vec<&str> = Vec::new();
    for group in groups.iter() {
        for e in group.outgoing.iter().chain(group.incoming.iter()) {
            assert!(!seen.contains(&e.id()), "edge {} duplicated", e.id());
            seen.push(e.id());
        }
    }
    seen.sort_unstable();
    assert_eq!(seen, vec!["e1", "e2"]);
}

#[test]
fn one_group_per_adjacent_pair() {
    let g = graph(
        &["a", "b", "c"],
        &[("e1", "a", "b"), ("e2", "a", "c"), ("e3", "c", "a")],
    );

    let groups = g.overlapped_edges(&["a"]).unwrap();
    assert_eq!(groups.len(), 2);
    assert!(groups.iter().all(|g| g.source == "a"));

    let ac = groups.iter().find(|g| g.target == "c").unwrap();
    assert_eq!(ac.outgoing.len(), 1);
    assert_eq!(ac.incoming.len(), 1);
}

#[test]
fn self_loop_forms_its_own_group() {
    let g = graph(&["a"], &[("e1", "a", "a")]);

    let groups = g.overlapped_edges(&["a"]).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].source, "a");
    assert_eq!(groups[0].target, "a");
    assert_eq!(groups[0].outgoing.len(), 1);
    assert!(groups[0].incoming.is_empty());
}

#[test]
fn edge_mutation_refreshes_cached_results() {
    let mut g = graph(&["a", "b"], &[("e1", "a", "b")]);

    let before = g.overlapped_edges(&["a", "b"]).unwrap();
    assert_eq!(before[0].edge_count(), 1);

    g.add_edges(vec![Edge::new("e2", "b", "a")]).unwrap();
    let grown = g.overlapped_edges(&["a", "b"]).unwrap();
    assert_eq!(grown[0].edge_count(), 2);

    g.remove_edges(&["e1"]);
    let shrunk = g.overlapped_edges(&["a", "b"]).unwrap();
    assert_eq!(shrunk[0].edge_count(), 1);
    assert_eq!(shrunk[0].outgoing.len() + shrunk[0].incoming.len(), 1);
}

#[test]
fn node_removal_refreshes_cached_results() {
    let mut g = graph(&["a", "b", "c"], &[("e1", "a", "b"), ("e2", "a", "c")]);

    assert_eq!(g.overlapped_edges(&["a"]).unwrap().len(), 2);
    g.remove_nodes(&["c"]);
    assert_eq!(g.overlapped_edges(&["a"]).unwrap().len(), 1);
}

#[test]
fn unknown_node_in_query_is_an_error() {
    let g = graph(&["a"], &[]);
    assert!(matches!(
        g.overlapped_edges(&["a", "ghost"]),
        Err(Error::UnknownNode { id }) if id == "ghost"
    ));
}

#[test]
fn repeated_queries_share_the_cached_allocation() {
    let g = graph(&["a", "b"], &[("e1", "a", "b")]);

    let first = g.overlapped_edges(&["a", "b"]).unwrap();
    let second = g.overlapped_edges(&["b", "a"]).unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));
}
