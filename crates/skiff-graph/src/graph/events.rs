//! Change notification plumbing for [`Graph`](super::Graph).

use crate::edge::Edge;
use crate::node::Node;

/// Opaque handle returned by listener registration, used for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(in crate::graph) u64);

/// A batch of elements that entered or left the model.
///
/// Carries exactly the set that was actually added or removed: elements
/// skipped by an operation (duplicate ids on add, absent ids on remove) never
/// appear here.
#[derive(Debug, Clone)]
pub struct GraphEvent {
    pub originator: Option<String>,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// Observer of model mutations.
///
/// Notifications are synchronous, delivered in registration order, and only
/// fired for non-empty batches. Mutating the graph from within a callback is
/// unsupported; dispatch holds the graph borrowed.
pub trait GraphListener {
    fn elements_added(&mut self, event: &GraphEvent) {
        let _ = event;
    }

    fn elements_removed(&mut self, event: &GraphEvent) {
        let _ = event;
    }
}
