//! Graph vertices.

use crate::geom::Rect;

pub const DEFAULT_NODE_SIZE: f64 = 20.0;

/// A positioned, sized vertex with identity and directional degree counters.
///
/// Identity is fixed at construction; geometry and tags are freely mutable.
/// Degree counters are maintained by [`Graph`](crate::Graph) as edges come and
/// go and are read-only outside this crate.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: String,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub node_type: String,
    pub label: String,
    pub(crate) incoming_degree: usize,
    pub(crate) outgoing_degree: usize,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            x: 0.0,
            y: 0.0,
            size: DEFAULT_NODE_SIZE,
            node_type: String::from("default"),
            label: String::new(),
            incoming_degree: 0,
            outgoing_degree: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn incoming_degree(&self) -> usize {
        self.incoming_degree
    }

    pub fn outgoing_degree(&self) -> usize {
        self.outgoing_degree
    }

    /// Axis-aligned box centered on the node position, `size` wide and tall.
    pub fn bounding_box(&self) -> Rect {
        Rect {
            x: self.x - self.size / 2.0,
            y: self.y - self.size / 2.0,
            width: self.size,
            height: self.size,
        }
    }
}
