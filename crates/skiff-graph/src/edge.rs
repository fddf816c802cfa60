//! Directed edges.

/// A directed, identified connection between two node ids.
///
/// Endpoint references are non-owning: the edge stores ids, not nodes. The
/// source→target direction determines incoming/outgoing classification at
/// each endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    id: String,
    source: String,
    target: String,
    pub edge_type: String,
}

impl Edge {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            edge_type: String::from("default"),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// The endpoint opposite `node_id`, or the same id for a self-loop.
    pub fn opposite(&self, node_id: &str) -> &str {
        if self.source == node_id {
            &self.target
        } else {
            &self.source
        }
    }
}
