//! Deterministic layout engines for `skiff-graph` models.
//!
//! [`HierarchicalLayout`] implements the [`skiff_graph::Layout`] strategy:
//! it partitions the graph into connected components and arranges each as
//! leveled rows by traversal distance from its lowest-in-degree roots.

mod components;
mod hierarchical;

pub use components::connected_components;
pub use hierarchical::{
    DEFAULT_COMPONENT_GAP, DEFAULT_LEVEL_GAP, DEFAULT_NODE_GAP, HierarchicalLayout,
};
