/*!
# Graph Representation

The adjacency-list [`Graph`] together with the per-vertex state that the search algorithms
write into it.

Traversal marks ([`Mark`]) are unrelated to the colours of a
[`RedBlackTree`](crate::tree::RedBlackTree) and deliberately use a separate type.
*/

use crate::{
    edge::Weight,
    node::{Time, VertexId},
};

mod graph;

pub use graph::*;

/// Orientation of all edges of a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Directed,
    Undirected,
}

/// Progress of a vertex during a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mark {
    /// Not discovered yet
    #[default]
    White,
    /// Discovered, still on the frontier
    Gray,
    /// Fully processed
    Black,
}

/// Transient search state of a single vertex.
///
/// Every top-level search resets the state of all vertices before it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexState<W> {
    pub mark: Mark,
    /// Tentative or final distance from the source; `W::infinity()` if unreached
    pub distance: W,
    /// Vertex this one was discovered from
    pub parent: Option<VertexId>,
    /// Discovery stamp of a depth-first search, `0` if not stamped
    pub discovery: Time,
    /// Finish stamp of a depth-first search, `0` if not stamped
    pub finish: Time,
}

impl<W: Weight> Default for VertexState<W> {
    fn default() -> Self {
        Self {
            mark: Mark::White,
            distance: W::infinity(),
            parent: None,
            discovery: 0,
            finish: 0,
        }
    }
}
