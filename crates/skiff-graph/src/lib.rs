//! Mutable, observable graph model backing interactive graph views.
//!
//! The container owns node/edge collections with per-node incoming/outgoing
//! indexes, fires synchronous change notifications, and memoizes the
//! "overlapped parallel edges" view renderers use to fan out multiple edges
//! between the same node pair. Layout engines plug in through the [`Layout`]
//! trait; see the `skiff-layout` crate for the hierarchical implementation.

mod edge;
pub mod error;
mod geom;
pub mod graph;
mod layout;
mod node;

pub use edge::Edge;
pub use error::{Error, Result};
pub use geom::Rect;
pub use graph::{Graph, GraphEvent, GraphListener, ListenerId, OverlappedEdges};
pub use layout::Layout;
pub use node::{DEFAULT_NODE_SIZE, Node};
