//! Connected-component partitioning.

use rustc_hash::FxBuildHasher;
use skiff_graph::{Graph, Result};

type HashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

/// Splits `graph` into independent subgraphs, one per maximal set of nodes
/// mutually reachable when edge direction is ignored.
///
/// Traversal uses an explicit stack, so component depth is not bounded by
/// the call stack. An empty graph yields an empty list, never a single empty
/// component. The set of components is deterministic; start nodes follow
/// node insertion order.
pub fn connected_components(graph: &Graph) -> Result<Vec<Graph>> {
    let mut seen: HashSet<String> = HashSet::default();
    let mut components: Vec<Graph> = Vec::new();

    for start in graph.node_ids() {
        if seen.contains(start.as_str()) {
            continue;
        }
        seen.insert(start.clone());

        let mut members: Vec<String> = Vec::new();
        let mut stack: Vec<String> = vec![start];
        while let Some(id) = stack.pop() {
            for neighbour in graph.neighbours(&id)? {
                if seen.insert(neighbour.id().to_string()) {
                    stack.push(neighbour.id().to_string());
                }
            }
            members.push(id);
        }

        components.push(graph.subgraph(members.iter().map(String::as_str))?);
    }

    Ok(components)
}
