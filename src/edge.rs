use std::fmt::{Debug, Display};

use num::{PrimInt, Signed};

use crate::VertexId;

/// Edge weights are signed primitive integers. `W::max_value()` is reserved as the
/// "infinity" distance of unreached vertices.
pub trait Weight: PrimInt + Signed + Debug + Display {
    /// Distance of a vertex that was not reached (yet)
    fn infinity() -> Self {
        Self::max_value()
    }

    /// Returns *true* if `self` is the infinity sentinel
    fn is_infinite(&self) -> bool {
        *self == Self::infinity()
    }
}

impl<W> Weight for W where W: PrimInt + Signed + Debug + Display {}

/// An edge is defined by two vertices/endpoints.
/// For undirected graphs, `Edge(u, v)` and `Edge(v, u)` describe the same edge.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(pub VertexId, pub VertexId);

/// We limit the number of edges to `2^32 - 1`.
pub type NumEdges = u32;

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

impl Debug for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl Edge {
    /// Normalizes the edge such that the endpoint with smaller value comes first
    pub fn normalized(&self) -> Self {
        Edge(self.0.min(self.1), self.0.max(self.1))
    }

    /// Returns true if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.0 == self.1
    }

    /// Reverses the edge by switching the endpoints
    pub fn reverse(&self) -> Self {
        Edge(self.1, self.0)
    }
}

/// Entry of an adjacency list: the vertex an edge leads to and its optional weight.
///
/// `weight == None` marks an unweighted edge. Shortest-path algorithms treat it as weight `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Neighbor<W> {
    pub vertex: VertexId,
    pub weight: Option<W>,
}

impl<W: Weight> Neighbor<W> {
    /// Creates an adjacency entry
    pub fn new(vertex: VertexId, weight: Option<W>) -> Self {
        Self { vertex, weight }
    }

    /// Returns the weight, counting unweighted edges as `1`
    pub fn weight_or_unit(&self) -> W {
        self.weight.unwrap_or_else(W::one)
    }
}
