/*!
# Vertex Representation

We choose `VertexId = u32` as almost all use-cases involve less than `2^32` vertices.
Vertices are numbered `0..n` in the order in which they were added to a [`Graph`](crate::repr::Graph),
so a `VertexId` doubles as the index into every per-vertex buffer of the graph.
*/

/// Handle of a vertex inside a graph: `0` to `VertexId::MAX - 1`
pub type VertexId = u32;

/// Vertex-Value that is considered invalid
pub const INVALID_VERTEX: VertexId = VertexId::MAX;

/// There can be at most `2^32 - 1` vertices in a graph!
pub type NumVertices = VertexId;

/// Logical clock value used for discovery and finish stamps of a depth-first search.
/// `0` means "not stamped yet".
pub type Time = u32;

/// Logical clock threaded through a depth-first search.
///
/// Every discovery and every finish advances the clock by one, so in a search over `n`
/// vertices all stamps lie in `1..=2n`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DfsClock {
    time: Time,
}

impl DfsClock {
    /// Creates a clock that has not ticked yet
    pub const fn new() -> Self {
        Self { time: 0 }
    }

    /// Advances the clock and returns the new time
    pub fn tick(&mut self) -> Time {
        self.time += 1;
        self.time
    }
}
