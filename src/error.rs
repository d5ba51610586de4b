/*!
# Errors

Failures that callers are expected to handle. Lookups that simply miss (searching a tree,
deleting an absent value, asking for an unknown vertex value) are not errors and are reported
as `Option`/`bool` instead.
*/

use thiserror::Error;

use crate::{VertexId, tree::NodeId};

/// Errors reported by [`Graph`](crate::repr::Graph) construction and the graph algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A vertex with the same value already exists
    #[error("the graph doesn't allow duplicate vertex values")]
    DuplicateVertex,

    /// Edge `(u, u)` in an undirected graph
    #[error("an undirected graph doesn't allow self-loops (vertex {0})")]
    SelfLoop(VertexId),

    /// No vertex carries the requested value
    #[error("no vertex with the requested value")]
    UnknownVertex,

    /// The algorithm is only defined on directed graphs
    #[error("{algorithm} requires a directed graph")]
    NotDirected { algorithm: &'static str },

    /// A back edge into vertex `.0` was found, so no topological order exists
    #[error("the graph contains a cycle through vertex {0}")]
    Cycle(VertexId),

    /// An edge could still be relaxed after `|V| - 1` passes
    #[error("the graph contains a negative-weight cycle reachable from vertex {origin}")]
    NegativeCycle { origin: VertexId },

    #[error(transparent)]
    Queue(#[from] QueueError),
}

/// Errors reported by [`IndexedPriorityQueue`](crate::utils::IndexedPriorityQueue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("the indexed priority queue is empty")]
    Empty,

    #[error("the key doesn't exist")]
    UnknownKey,
}

/// A broken structural invariant found by
/// [`SearchTree::check_invariants`](crate::tree::SearchTree::check_invariants).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("in-order traversal decreases at node {0}")]
    OutOfOrder(NodeId),

    #[error("node {child} does not link back to its parent {parent}")]
    BrokenParentLink { parent: NodeId, child: NodeId },

    #[error("the root {0} has a parent")]
    RootHasParent(NodeId),

    #[error("{reachable} nodes are reachable from the root, but the tree stores {stored}")]
    SizeMismatch { reachable: usize, stored: usize },

    #[error("node {node} stores height {stored}, but its subtrees imply {expected}")]
    StaleHeight {
        node: NodeId,
        stored: i32,
        expected: i32,
    },

    #[error("subtree heights of node {0} differ by more than one")]
    Unbalanced(NodeId),

    #[error("the root {0} is red")]
    RedRoot(NodeId),

    #[error("the sentinel is not black")]
    RedSentinel,

    #[error("red node {0} has a red child")]
    RedRed(NodeId),

    #[error("paths below node {0} contain different numbers of black nodes")]
    BlackHeight(NodeId),
}
