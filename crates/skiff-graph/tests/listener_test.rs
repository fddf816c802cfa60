use std::cell::RefCell;
use std::rc::Rc;

use skiff_graph::{Edge, Graph, GraphEvent, GraphListener, Node};

#[derive(Debug, Clone, PartialEq)]
enum Seen {
    Added {
        tag: Option<String>,
        nodes: Vec<String>,
        edges: Vec<String>,
    },
    Removed {
        tag: Option<String>,
        nodes: Vec<String>,
        edges: Vec<String>,
    },
}

struct Recorder {
    name: &'static str,
    log: Rc<RefCell<Vec<(&'static str, Seen)>>>,
}

impl Recorder {
    fn snapshot(event: &GraphEvent) -> (Option<String>, Vec<String>, Vec<String>) {
        (
            event.originator.clone(),
            event.nodes.iter().map(|n| n.id().to_string()).collect(),
            event.edges.iter().map(|e| e.id().to_string()).collect(),
        )
    }
}

impl GraphListener for Recorder {
    fn elements_added(&mut self, event: &GraphEvent) {
        let (tag, nodes, edges) = Self::snapshot(event);
        self.log
            .borrow_mut()
            .push((self.name, Seen::Added { tag, nodes, edges }));
    }

    fn elements_removed(&mut self, event: &GraphEvent) {
        let (tag, nodes, edges) = Self::snapshot(event);
        self.log
            .borrow_mut()
            .push((self.name, Seen::Removed { tag, nodes, edges }));
    }
}

#[test]
fn notifications_carry_the_exact_mutated_sets() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut g = Graph::new();
    g.add_listener(Box::new(Recorder {
        name: "l",
        log: log.clone(),
    }));

    // "a" is a duplicate and must not appear in the event.
    g.add_nodes(vec![Node::new("a"), Node::new("b")]);
    g.add_nodes(vec![Node::new("a"), Node::new("c")]);
    g.add_edges(vec![Edge::new("e1", "a", "b")]).unwrap();
    g.remove_nodes(&["a", "ghost"]);

    let log = log.borrow();
    assert_eq!(log.len(), 4);
    assert_eq!(
        log[1].1,
        Seen::Added {
            tag: None,
            nodes: vec!["c".into()],
            edges: vec![],
        }
    );
    assert_eq!(
        log[3].1,
        Seen::Removed {
            tag: None,
            nodes: vec!["a".into()],
            edges: vec!["e1".into()],
        }
    );
}

#[test]
fn empty_batches_fire_no_notification() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut g = Graph::new();
    g.add_nodes(vec![Node::new("a")]);
    g.add_listener(Box::new(Recorder {
        name: "l",
        log: log.clone(),
    }));

    g.add_nodes(vec![Node::new("a")]);
    g.add_nodes(vec![]);
    g.remove_nodes(&["ghost"]);
    g.remove_edges(&["ghost"]);

    assert!(log.borrow().is_empty());
}

#[test]
fn listeners_run_in_registration_order_until_removed() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut g = Graph::new();
    let first = g.add_listener(Box::new(Recorder {
        name: "first",
        log: log.clone(),
    }));
    g.add_listener(Box::new(Recorder {
        name: "second",
        log: log.clone(),
    }));

    g.add_nodes(vec![Node::new("a")]);
    {
        let log = log.borrow();
        assert_eq!(log[0].0, "first");
        assert_eq!(log[1].0, "second");
    }

    assert!(g.remove_listener(first));
    assert!(!g.remove_listener(first));
    g.add_nodes(vec![Node::new("b")]);

    let log = log.borrow();
    assert_eq!(log.len(), 3);
    assert_eq!(log[2].0, "second");
}

#[test]
fn originator_tag_is_passed_through() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut g = Graph::new();
    g.add_listener(Box::new(Recorder {
        name: "l",
        log: log.clone(),
    }));

    g.add_nodes_tagged(Some("importer"), vec![Node::new("a")]);

    match &log.borrow()[0].1 {
        Seen::Added { tag, .. } => assert_eq!(tag.as_deref(), Some("importer")),
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn combined_element_batches_fire_one_notification() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut g = Graph::new();
    g.add_listener(Box::new(Recorder {
        name: "l",
        log: log.clone(),
    }));

    // Edges may reference nodes introduced by the same batch.
    g.add_elements(
        vec![Node::new("a"), Node::new("b")],
        vec![Edge::new("e1", "a", "b")],
    )
    .unwrap();
    g.remove_elements(&["a"], &[]);

    let log = log.borrow();
    assert_eq!(log.len(), 2);
    assert_eq!(
        log[0].1,
        Seen::Added {
            tag: None,
            nodes: vec!["a".into(), "b".into()],
            edges: vec!["e1".into()],
        }
    );
    assert_eq!(
        log[1].1,
        Seen::Removed {
            tag: None,
            nodes: vec!["a".into()],
            edges: vec!["e1".into()],
        }
    );
}
