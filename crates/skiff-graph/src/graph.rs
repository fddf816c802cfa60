//! The mutable, observable graph container.
//!
//! Nodes and edges live in insertion-ordered vectors with id→index maps on
//! the side, so iteration order is deterministic and id lookups stay O(1).
//! Per-node incoming/outgoing edge-id sets are maintained on every mutation;
//! degree counters on [`Node`] always mirror those sets.

mod entries;
mod events;
mod overlap;

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::edge::Edge;
use crate::error::{Error, Result};
use crate::geom::Rect;
use crate::layout::Layout;
use crate::node::Node;
use entries::NodeEntry;
use overlap::{OVERLAP_CACHE_CAPACITY, OverlapCache};

pub use events::{GraphEvent, GraphListener, ListenerId};
pub use overlap::OverlappedEdges;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;
type HashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

/// Owns the node/edge collections, their adjacency indexes, the registered
/// change listeners and the memoized overlapped-edge view.
///
/// Single-writer: mutation is not internally synchronized. Read-only queries
/// may run concurrently with each other; only the overlap cache is guarded so
/// racing readers at worst recompute a group.
pub struct Graph {
    nodes: Vec<NodeEntry>,
    node_index: HashMap<String, usize>,

    edges: Vec<Edge>,
    edge_index: HashMap<String, usize>,

    listeners: Vec<(ListenerId, Box<dyn GraphListener>)>,
    next_listener_id: u64,

    overlap_cache: OverlapCache,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            node_index: HashMap::default(),
            edges: Vec::new(),
            edge_index: HashMap::default(),
            listeners: Vec::new(),
            next_listener_id: 0,
            overlap_cache: OverlapCache::new(OVERLAP_CACHE_CAPACITY),
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn has_edge(&self, id: &str) -> bool {
        self.edge_index.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_index.get(id).map(|&ix| &self.nodes[ix].node)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.node_index
            .get(id)
            .copied()
            .map(move |ix| &mut self.nodes[ix].node)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edge_index.get(id).map(|&ix| &self.edges[ix])
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().map(|e| &e.node)
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.iter().map(|e| e.node.id().to_string()).collect()
    }

    // ---- mutation ----------------------------------------------------

    pub fn add_node(&mut self, node: Node) {
        self.add_nodes(vec![node]);
    }

    pub fn add_nodes(&mut self, nodes: Vec<Node>) {
        self.add_nodes_tagged(None, nodes);
    }

    /// Inserts the given nodes, skipping ids already present. Fires
    /// "elements added" with the exact set actually inserted.
    pub fn add_nodes_tagged(&mut self, originator: Option<&str>, nodes: Vec<Node>) {
        let added = self.insert_nodes(nodes);
        self.notify_added(originator, added, Vec::new());
    }

    pub fn add_edge(&mut self, edge: Edge) -> Result<()> {
        self.add_edges(vec![edge])
    }

    pub fn add_edges(&mut self, edges: Vec<Edge>) -> Result<()> {
        self.add_edges_tagged(None, edges)
    }

    /// Inserts the given edges, indexing them at both endpoints and bumping
    /// degree counters. The whole batch is validated first: an edge naming an
    /// unknown node id fails with [`Error::UnknownNode`] before anything is
    /// inserted. Duplicate edge ids are skipped.
    pub fn add_edges_tagged(&mut self, originator: Option<&str>, edges: Vec<Edge>) -> Result<()> {
        self.check_endpoints(&edges, &HashSet::default())?;
        let added = self.insert_edges(edges);
        self.overlap_cache.clear();
        self.notify_added(originator, Vec::new(), added);
        Ok(())
    }

    /// Combined node+edge batch with a single notification. Edges may
    /// reference nodes from the same batch.
    pub fn add_elements(&mut self, nodes: Vec<Node>, edges: Vec<Edge>) -> Result<()> {
        self.add_elements_tagged(None, nodes, edges)
    }

    pub fn add_elements_tagged(
        &mut self,
        originator: Option<&str>,
        nodes: Vec<Node>,
        edges: Vec<Edge>,
    ) -> Result<()> {
        {
            let pending: HashSet<&str> = nodes.iter().map(Node::id).collect();
            self.check_endpoints(&edges, &pending)?;
        }

        let added_nodes = self.insert_nodes(nodes);
        let added_edges = self.insert_edges(edges);
        self.overlap_cache.clear();
        self.notify_added(originator, added_nodes, added_edges);
        Ok(())
    }

    pub fn remove_node(&mut self, id: &str) {
        self.remove_nodes(&[id]);
    }

    /// Removes the named nodes, cascading to every incident edge first.
    /// Absent ids are no-ops. Fires "elements removed" with the exact
    /// removed node and edge sets.
    pub fn remove_nodes(&mut self, ids: &[&str]) {
        self.remove_nodes_tagged(None, ids);
    }

    pub fn remove_nodes_tagged(&mut self, originator: Option<&str>, ids: &[&str]) {
        let (removed_nodes, removed_edges) = self.extract_nodes(ids);
        self.overlap_cache.clear();
        self.notify_removed(originator, removed_nodes, removed_edges);
    }

    pub fn remove_edge(&mut self, id: &str) {
        self.remove_edges(&[id]);
    }

    /// Removes the named edges, breaking adjacency links and decrementing
    /// degree counters. Absent ids are no-ops.
    pub fn remove_edges(&mut self, ids: &[&str]) {
        self.remove_edges_tagged(None, ids);
    }

    pub fn remove_edges_tagged(&mut self, originator: Option<&str>, ids: &[&str]) {
        let mut removed = Vec::new();
        for &id in ids {
            if let Some(edge) = self.detach_edge(id) {
                removed.push(edge);
            }
        }
        self.overlap_cache.clear();
        self.notify_removed(originator, Vec::new(), removed);
    }

    /// Combined removal: the named edges plus the named nodes (with their
    /// incident-edge cascade), one notification for the whole batch.
    pub fn remove_elements(&mut self, node_ids: &[&str], edge_ids: &[&str]) {
        self.remove_elements_tagged(None, node_ids, edge_ids);
    }

    pub fn remove_elements_tagged(
        &mut self,
        originator: Option<&str>,
        node_ids: &[&str],
        edge_ids: &[&str],
    ) {
        let mut removed_edges = Vec::new();
        for &id in edge_ids {
            if let Some(edge) = self.detach_edge(id) {
                removed_edges.push(edge);
            }
        }
        let (removed_nodes, cascaded) = self.extract_nodes(node_ids);
        removed_edges.extend(cascaded);
        self.overlap_cache.clear();
        self.notify_removed(originator, removed_nodes, removed_edges);
    }

    // ---- queries -----------------------------------------------------

    /// All edges incident to `id`, outgoing first, in insertion order.
    pub fn node_edges(&self, id: &str) -> Result<Vec<&Edge>> {
        let entry = self.entry(id)?;
        let mut out: Vec<&Edge> = Vec::with_capacity(entry.outgoing.len() + entry.incoming.len());
        for eid in entry.outgoing.iter().chain(entry.incoming.iter()) {
            if let Some(edge) = self.edge(eid) {
                // A self-loop sits in both sets; report it once.
                if !out.iter().any(|e| e.id() == eid.as_str()) {
                    out.push(edge);
                }
            }
        }
        Ok(out)
    }

    pub fn incoming_edges(&self, id: &str) -> Result<Vec<&Edge>> {
        let entry = self.entry(id)?;
        Ok(entry.incoming.iter().filter_map(|eid| self.edge(eid)).collect())
    }

    pub fn outgoing_edges(&self, id: &str) -> Result<Vec<&Edge>> {
        let entry = self.entry(id)?;
        Ok(entry.outgoing.iter().filter_map(|eid| self.edge(eid)).collect())
    }

    /// Union of the incident edges of every queried node, deduplicated.
    pub fn incident_edges(&self, ids: &[&str]) -> Result<Vec<&Edge>> {
        let mut out: Vec<&Edge> = Vec::new();
        for &id in ids {
            for edge in self.node_edges(id)? {
                if !out.iter().any(|e| e.id() == edge.id()) {
                    out.push(edge);
                }
            }
        }
        Ok(out)
    }

    /// Every node sharing an edge with `id`, in either direction, excluding
    /// `id` itself.
    pub fn neighbours(&self, id: &str) -> Result<Vec<&Node>> {
        let edges = self.node_edges(id)?;
        Ok(self.neighbour_nodes(id, &edges))
    }

    /// Nodes reached by edges directed out of `id`, excluding `id` itself.
    pub fn outgoing_neighbours(&self, id: &str) -> Result<Vec<&Node>> {
        let edges = self.outgoing_edges(id)?;
        Ok(self.neighbour_nodes(id, &edges))
    }

    fn neighbour_nodes<'a>(&'a self, id: &str, edges: &[&'a Edge]) -> Vec<&'a Node> {
        let mut out: Vec<&Node> = Vec::new();
        for edge in edges {
            for endpoint in [edge.source(), edge.target()] {
                if endpoint == id || out.iter().any(|n| n.id() == endpoint) {
                    continue;
                }
                if let Some(node) = self.node(endpoint) {
                    out.push(node);
                }
            }
        }
        out
    }

    /// For every unordered adjacent pair touched by the query set, the split
    /// of edges into outgoing/incoming relative to the first-seen node of the
    /// pair. Each edge is attributed to exactly one group even when both of
    /// its endpoints are queried.
    ///
    /// Results are memoized per distinct id set (order-insensitive) in a
    /// bounded LRU store that is cleared on any edge mutation.
    pub fn overlapped_edges(&self, ids: &[&str]) -> Result<Arc<Vec<OverlappedEdges>>> {
        for &id in ids {
            if !self.has_node(id) {
                return Err(Error::UnknownNode { id: id.to_string() });
            }
        }

        let key = OverlapCache::key(ids);
        if let Some(hit) = self.overlap_cache.get(&key) {
            return Ok(hit);
        }

        let mut result: Vec<OverlappedEdges> = Vec::new();
        let mut attributed: HashSet<&str> = HashSet::default();
        for &node_id in ids {
            let Some(&ix) = self.node_index.get(node_id) else {
                continue;
            };
            let entry = &self.nodes[ix];
            let mut groups: IndexMap<&str, OverlappedEdges, FxBuildHasher> = IndexMap::default();
            for eid in entry.outgoing.iter().chain(entry.incoming.iter()) {
                let Some(edge) = self.edge(eid) else {
                    continue;
                };
                if !attributed.insert(edge.id()) {
                    continue;
                }
                let pair = edge.opposite(node_id);
                let group = groups
                    .entry(pair)
                    .or_insert_with(|| OverlappedEdges::new(node_id, pair));
                if edge.source() == group.source {
                    group.outgoing.push(edge.clone());
                } else {
                    group.incoming.push(edge.clone());
                }
            }
            result.extend(groups.into_values());
        }

        let result = Arc::new(result);
        self.overlap_cache.insert(key, result.clone());
        Ok(result)
    }

    /// Union of all node bounding boxes, or `None` for an empty graph.
    pub fn bounding_box(&self) -> Option<Rect> {
        let mut iter = self.nodes.iter();
        let first = iter.next()?;
        let mut rect = first.node.bounding_box();
        for entry in iter {
            rect = rect.union(&entry.node.bounding_box());
        }
        Some(rect)
    }

    /// Builds an independent graph from the named node subset: fresh node
    /// copies (degree counters recomputed) plus every edge with both
    /// endpoints in the subset. No mutable state is shared with `self`.
    pub fn subgraph<'a, I>(&self, ids: I) -> Result<Graph>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let wanted: HashSet<&str> = ids.into_iter().collect();
        for &id in &wanted {
            if !self.node_index.contains_key(id) {
                return Err(Error::UnknownNode { id: id.to_string() });
            }
        }

        let mut sub = Graph::new();
        let nodes: Vec<Node> = self
            .nodes
            .iter()
            .filter(|e| wanted.contains(e.node.id()))
            .map(|e| e.node.clone())
            .collect();
        sub.add_nodes(nodes);

        let edges: Vec<Edge> = self
            .edges
            .iter()
            .filter(|e| wanted.contains(e.source()) && wanted.contains(e.target()))
            .cloned()
            .collect();
        sub.add_edges(edges)?;
        Ok(sub)
    }

    /// Invokes a pluggable layout strategy over this graph.
    pub fn apply_layout(&mut self, layout: &dyn Layout) -> Result<()> {
        layout.run(self)
    }

    // ---- listeners ---------------------------------------------------

    pub fn add_listener(&mut self, listener: Box<dyn GraphListener>) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn notify_added(&mut self, originator: Option<&str>, nodes: Vec<Node>, edges: Vec<Edge>) {
        if nodes.is_empty() && edges.is_empty() {
            return;
        }
        tracing::trace!(nodes = nodes.len(), edges = edges.len(), "elements added");
        let event = GraphEvent {
            originator: originator.map(str::to_string),
            nodes,
            edges,
        };
        for (_, listener) in &mut self.listeners {
            listener.elements_added(&event);
        }
    }

    fn notify_removed(&mut self, originator: Option<&str>, nodes: Vec<Node>, edges: Vec<Edge>) {
        if nodes.is_empty() && edges.is_empty() {
            return;
        }
        tracing::trace!(nodes = nodes.len(), edges = edges.len(), "elements removed");
        let event = GraphEvent {
            originator: originator.map(str::to_string),
            nodes,
            edges,
        };
        for (_, listener) in &mut self.listeners {
            listener.elements_removed(&event);
        }
    }

    // ---- internals ---------------------------------------------------

    fn entry(&self, id: &str) -> Result<&NodeEntry> {
        self.node_index
            .get(id)
            .map(|&ix| &self.nodes[ix])
            .ok_or_else(|| Error::UnknownNode { id: id.to_string() })
    }

    fn check_endpoints(&self, edges: &[Edge], pending: &HashSet<&str>) -> Result<()> {
        for edge in edges {
            for endpoint in [edge.source(), edge.target()] {
                if !self.node_index.contains_key(endpoint) && !pending.contains(endpoint) {
                    return Err(Error::UnknownNode {
                        id: endpoint.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    fn insert_nodes(&mut self, nodes: Vec<Node>) -> Vec<Node> {
        let mut added = Vec::new();
        for mut node in nodes {
            if self.node_index.contains_key(node.id()) {
                continue;
            }
            // Degree counters mirror the edge sets, and a newly registered
            // node starts with empty adjacency.
            node.incoming_degree = 0;
            node.outgoing_degree = 0;
            added.push(node.clone());

            let ix = self.nodes.len();
            self.node_index.insert(node.id().to_string(), ix);
            self.nodes.push(NodeEntry::new(node));
        }
        added
    }

    fn insert_edges(&mut self, edges: Vec<Edge>) -> Vec<Edge> {
        let mut added = Vec::new();
        for edge in edges {
            if self.edge_index.contains_key(edge.id()) {
                continue;
            }
            self.attach_edge(edge.clone());
            added.push(edge);
        }
        added
    }

    fn attach_edge(&mut self, edge: Edge) {
        let Some(&src_ix) = self.node_index.get(edge.source()) else {
            debug_assert!(false, "attach_edge: unknown source {}", edge.source());
            return;
        };
        let Some(&dst_ix) = self.node_index.get(edge.target()) else {
            debug_assert!(false, "attach_edge: unknown target {}", edge.target());
            return;
        };

        let id = edge.id().to_string();
        {
            let src = &mut self.nodes[src_ix];
            src.outgoing.insert(id.clone());
            src.node.outgoing_degree += 1;
        }
        {
            let dst = &mut self.nodes[dst_ix];
            dst.incoming.insert(id.clone());
            dst.node.incoming_degree += 1;
        }

        let ix = self.edges.len();
        self.edges.push(edge);
        self.edge_index.insert(id, ix);
    }

    fn detach_edge(&mut self, id: &str) -> Option<Edge> {
        let ix = self.edge_index.remove(id)?;
        let edge = self.edges.remove(ix);
        for i in ix..self.edges.len() {
            let edge_id = self.edges[i].id();
            if let Some(slot) = self.edge_index.get_mut(edge_id) {
                *slot = i;
            }
        }

        if let Some(&src_ix) = self.node_index.get(edge.source()) {
            let src = &mut self.nodes[src_ix];
            if src.outgoing.shift_remove(id) {
                src.node.outgoing_degree -= 1;
            }
        }
        if let Some(&dst_ix) = self.node_index.get(edge.target()) {
            let dst = &mut self.nodes[dst_ix];
            if dst.incoming.shift_remove(id) {
                dst.node.incoming_degree -= 1;
            }
        }
        Some(edge)
    }

    fn detach_node(&mut self, id: &str) -> Option<Node> {
        let ix = self.node_index.remove(id)?;
        let entry = self.nodes.remove(ix);
        for i in ix..self.nodes.len() {
            let node_id = self.nodes[i].node.id();
            if let Some(slot) = self.node_index.get_mut(node_id) {
                *slot = i;
            }
        }
        Some(entry.node)
    }

    fn extract_nodes(&mut self, ids: &[&str]) -> (Vec<Node>, Vec<Edge>) {
        let mut removed_nodes = Vec::new();
        let mut removed_edges = Vec::new();
        for &id in ids {
            let Some(&ix) = self.node_index.get(id) else {
                continue;
            };
            let incident: Vec<String> = {
                let entry = &self.nodes[ix];
                entry
                    .outgoing
                    .iter()
                    .chain(entry.incoming.iter())
                    .cloned()
                    .collect()
            };
            for eid in incident {
                if let Some(edge) = self.detach_edge(&eid) {
                    removed_edges.push(edge);
                }
            }
            if let Some(node) = self.detach_node(id) {
                removed_nodes.push(node);
            }
        }
        (removed_nodes, removed_edges)
    }
}
