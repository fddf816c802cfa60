//! Hierarchical layout.
//!
//! Each connected component is arranged as leveled rows by traversal depth
//! from its minimum-in-degree roots; components are packed left to right,
//! largest first.

use std::collections::VecDeque;

use rustc_hash::FxBuildHasher;
use skiff_graph::{Error, Graph, Layout, Rect, Result};

use crate::components::connected_components;

type HashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

pub const DEFAULT_NODE_GAP: f64 = 5.0;
pub const DEFAULT_LEVEL_GAP: f64 = 5.0;
pub const DEFAULT_COMPONENT_GAP: f64 = 30.0;

/// Deterministic hierarchical layout strategy.
///
/// Node and level gaps are fractions of node size (a node advances the
/// cursor by `size * (1 + gap)`), keeping spacing proportional to node size.
/// The component gap is a fixed amount added between component bounding
/// boxes.
#[derive(Debug, Clone, Copy)]
pub struct HierarchicalLayout {
    pub node_gap: f64,
    pub level_gap: f64,
    pub component_gap: f64,
}

impl Default for HierarchicalLayout {
    fn default() -> Self {
        Self {
            node_gap: DEFAULT_NODE_GAP,
            level_gap: DEFAULT_LEVEL_GAP,
            component_gap: DEFAULT_COMPONENT_GAP,
        }
    }
}

impl HierarchicalLayout {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Layout for HierarchicalLayout {
    fn run(&self, graph: &mut Graph) -> Result<()> {
        let Some(bounds) = graph.bounding_box() else {
            return Ok(());
        };

        let mut components = connected_components(graph)?;
        // Larger components first; ties keep discovery order (stable sort).
        components.sort_by(|a, b| b.node_count().cmp(&a.node_count()));
        tracing::debug!(components = components.len(), "hierarchical layout pass");

        let mut left = bounds.min_x();
        let middle = bounds.min_y() + bounds.height / 2.0;
        for component in &components {
            let placed = self.layout_component(component, graph, left, middle)?;
            left = placed.max_x() + self.component_gap;
        }
        Ok(())
    }
}

impl HierarchicalLayout {
    fn layout_component(
        &self,
        component: &Graph,
        graph: &mut Graph,
        left: f64,
        middle: f64,
    ) -> Result<Rect> {
        let roots = lowest_in_degree(component);
        let levels = self.build_levels(component, roots)?;

        let assigned: usize = levels.iter().map(|l| l.nodes.len()).sum();
        if assigned != component.node_count() {
            debug_assert!(
                false,
                "level traversal assigned {assigned} of {} nodes",
                component.node_count()
            );
            return Err(Error::InternalConsistency {
                message: format!(
                    "level traversal assigned {assigned} of {} component nodes",
                    component.node_count()
                ),
            });
        }

        let (total_width, total_height) = self.total_dimension(component, &levels);
        let top = middle - total_height / 2.0;

        let mut level_top = top;
        for level in &levels {
            let (width, height) = level.dimension(component, self.node_gap);
            let mut level_left = left + total_width / 2.0 - width / 2.0;
            for id in &level.nodes {
                let size = component.node(id).map(|n| n.size).unwrap_or_default();
                if let Some(node) = graph.node_mut(id) {
                    node.x = level_left;
                    node.y = level_top;
                }
                level_left += size * (1.0 + self.node_gap);
            }
            level_top += height * (1.0 + self.level_gap);
        }

        Ok(Rect {
            x: left,
            y: top,
            width: total_width,
            height: total_height,
        })
    }

    /// Breadth-first expansion of outgoing neighbours with first-seen-wins
    /// depth assignment: each node lands in exactly one level, whichever is
    /// reached first. The explicit queue keeps depth unbounded by the call
    /// stack.
    fn build_levels(&self, component: &Graph, roots: Vec<String>) -> Result<Vec<Level>> {
        let mut assigned: HashSet<String> = roots.iter().cloned().collect();
        let mut queue: VecDeque<(String, usize)> =
            roots.iter().map(|id| (id.clone(), 0)).collect();
        let mut levels: Vec<Level> = vec![Level { nodes: roots }];

        while let Some((id, depth)) = queue.pop_front() {
            for neighbour in component.outgoing_neighbours(&id)? {
                if !assigned.insert(neighbour.id().to_string()) {
                    continue;
                }
                if levels.len() <= depth + 1 {
                    levels.push(Level::default());
                }
                levels[depth + 1].nodes.push(neighbour.id().to_string());
                queue.push_back((neighbour.id().to_string(), depth + 1));
            }
        }

        Ok(levels)
    }

    fn total_dimension(&self, component: &Graph, levels: &[Level]) -> (f64, f64) {
        let mut width: f64 = 0.0;
        let mut height: f64 = 0.0;
        for (ix, level) in levels.iter().enumerate() {
            let (level_width, level_height) = level.dimension(component, self.node_gap);
            width = width.max(level_width);
            if ix + 1 < levels.len() {
                height += level_height * (1.0 + self.level_gap);
            } else {
                height += level_height;
            }
        }
        (width, height)
    }
}

/// An ordered row of nodes sharing one traversal depth.
#[derive(Debug, Default)]
struct Level {
    nodes: Vec<String>,
}

impl Level {
    /// Row width (node sizes plus gaps, trailing gap dropped) and height
    /// (largest node size in the row).
    fn dimension(&self, graph: &Graph, gap: f64) -> (f64, f64) {
        let mut width: f64 = 0.0;
        let mut height: f64 = 0.0;
        for (ix, id) in self.nodes.iter().enumerate() {
            let size = graph.node(id).map(|n| n.size).unwrap_or_default();
            height = height.max(size);
            if ix + 1 < self.nodes.len() {
                width += size * (1.0 + gap);
            } else {
                width += size;
            }
        }
        (width, height)
    }
}

/// All nodes whose incoming degree equals the component-wide minimum. Ties
/// keep every minimal node, supporting multiple simultaneous roots.
fn lowest_in_degree(component: &Graph) -> Vec<String> {
    let mut roots: Vec<String> = Vec::new();
    let mut lowest = usize::MAX;
    for node in component.nodes() {
        let degree = node.incoming_degree();
        if degree == lowest {
            roots.push(node.id().to_string());
        } else if degree < lowest {
            roots.clear();
            roots.push(node.id().to_string());
            lowest = degree;
        }
    }
    roots
}
