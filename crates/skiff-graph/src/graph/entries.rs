//! Internal storage entries for [`Graph`](super::Graph).

use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;

use crate::node::Node;

pub(in crate::graph) type EdgeIdSet = IndexSet<String, FxBuildHasher>;

/// A node plus its incident-edge indexes. The incoming/outgoing sets hold
/// edge ids in insertion order so traversals stay deterministic.
#[derive(Debug, Clone)]
pub(in crate::graph) struct NodeEntry {
    pub(in crate::graph) node: Node,
    pub(in crate::graph) incoming: EdgeIdSet,
    pub(in crate::graph) outgoing: EdgeIdSet,
}

impl NodeEntry {
    pub(in crate::graph) fn new(node: Node) -> Self {
        Self {
            node,
            incoming: EdgeIdSet::default(),
            outgoing: EdgeIdSet::default(),
        }
    }
}
