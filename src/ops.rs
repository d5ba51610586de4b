/*!
# Graph Operations

Small access traits that the algorithms in [`algo`](crate::algo) are written against.
[`Graph`](crate::repr::Graph) implements all of them; the algorithm traits are blanket-implemented
for every type that provides the required access.
*/

use std::ops::Range;

use crate::{
    edge::{Edge, Neighbor, NumEdges, Weight},
    node::{NumVertices, VertexId},
    repr::{Direction, VertexState},
};

/// Provides getters pertaining to the size of a graph
pub trait GraphOrder {
    /// Returns the number of vertices of the graph
    fn number_of_vertices(&self) -> NumVertices;

    /// Returns the number of edges of the graph.
    /// An undirected edge is counted once although it is stored at both endpoints.
    fn number_of_edges(&self) -> NumEdges;

    /// Return the number of vertices as usize
    fn len(&self) -> usize {
        self.number_of_vertices() as usize
    }

    /// Returns *true* if the graph has no vertices (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the range of all vertex ids.
    /// In contrast to an iterator borrowing `self`, the range may be used while `self` is mutated.
    fn vertices_range(&self) -> Range<VertexId> {
        0..self.number_of_vertices()
    }
}

/// Provides the edge type of a graph
pub trait GraphType {
    /// Type of the optional edge weights
    type Weight: Weight;

    /// Returns whether edges are directed
    fn direction(&self) -> Direction;

    /// Returns *true* if the graph is directed
    fn is_directed(&self) -> bool {
        self.direction() == Direction::Directed
    }
}

/// Traits pertaining getters for neighborhoods & edges
pub trait AdjacencyList: GraphOrder + GraphType + Sized {
    /// Returns an iterator over the (outgoing) adjacency entries of `u` in insertion order.
    /// ** Panics if `u >= n` **
    fn neighbors_of(&self, u: VertexId) -> impl Iterator<Item = Neighbor<Self::Weight>> + '_;

    /// Returns the number of (outgoing) adjacency entries of `u`
    /// ** Panics if `u >= n` **
    fn degree_of(&self, u: VertexId) -> NumVertices;

    /// Returns the `i`-th adjacency entry of `u`.
    /// ** Panics if `u >= n || i >= degree_of(u)` **
    fn ith_neighbor(&self, u: VertexId, i: NumVertices) -> Neighbor<Self::Weight>;

    /// Returns an iterator over all outgoing edges of `u`
    /// ** Panics if `u >= n` **
    fn edges_of(&self, u: VertexId) -> impl Iterator<Item = Edge> + '_ {
        self.neighbors_of(u).map(move |nb| Edge(u, nb.vertex))
    }

    /// Returns every stored adjacency entry as `(source, entry)`.
    /// For undirected graphs each edge appears once per endpoint.
    fn arcs(&self) -> impl Iterator<Item = (VertexId, Neighbor<Self::Weight>)> + '_ {
        self.vertices_range()
            .flat_map(move |u| self.neighbors_of(u).map(move |nb| (u, nb)))
    }
}

/// Access to the transient per-vertex state written by the search algorithms
pub trait SearchState: GraphOrder + GraphType {
    /// Returns the search state of `u`
    /// ** Panics if `u >= n` **
    fn state(&self, u: VertexId) -> &VertexState<Self::Weight>;

    /// Returns the mutable search state of `u`
    /// ** Panics if `u >= n` **
    fn state_mut(&mut self, u: VertexId) -> &mut VertexState<Self::Weight>;

    /// Marks every vertex white, with infinite distance and neither parent nor timestamps
    fn reset_search_state(&mut self) {
        for u in self.vertices_range() {
            *self.state_mut(u) = VertexState::default();
        }
    }
}

/// Provides a copy of the graph with every edge reversed
pub trait GraphTranspose: Sized {
    /// Returns the transpose. Vertex ids (and values) are preserved, search state is not.
    fn transposed(&self) -> Self;
}
