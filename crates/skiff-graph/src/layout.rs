//! Layout strategy seam.

use crate::error::Result;
use crate::graph::Graph;

/// A pluggable layout capability: given a graph, read its structure and
/// write node `x`/`y` in place. Invoked through
/// [`Graph::apply_layout`](crate::Graph::apply_layout) so engines can be
/// substituted without touching the model.
pub trait Layout {
    fn run(&self, graph: &mut Graph) -> Result<()>;
}
