/*!
`forestgraph` is a library of classical search trees and graph algorithms:
- **search trees**: an unbalanced binary search tree, an AVL tree and a red-black tree sharing
  one arena-based node model,
- **graphs**: a directed or undirected adjacency-list graph over arbitrary vertex values with
  optional integer edge weights,
- **algorithms**: BFS, DFS with discovery/finish stamps, topological sort, strongly connected
  components (Kosaraju), Dijkstra and Bellman-Ford.

# Representation

Tree nodes live in a [`NodeArena`](crate::tree::NodeArena) and are addressed by `u32`
[`NodeId`](crate::tree::NodeId)s; parent and child links are ids, and an absent child is the
sentinel [`NIL`](crate::tree::NIL).

Graph vertices are numbered `0` to `n - 1` in insertion order ([`VertexId`] is a `u32`).
Vertex values are mapped to ids with a hash map, and every per-vertex buffer is indexed by id.
For **edges**, we use a simple tuple-struct `Edge(VertexId, VertexId)`; adjacency lists store
[`Neighbor`](crate::edge::Neighbor)s carrying the target and an optional weight.

# Design

Trees implement the common [`SearchTree`](crate::tree::SearchTree) trait. Graph algorithms are
traits implemented on the graph itself (see [`algo`]), so they can be called as
`graph.dijkstra(source)` once `forestgraph::algo::*` is imported. Searches store their results
in the graph's per-vertex search state.

Lookups that miss return `Option`/`bool`; recoverable failures return the error types of
[`error`]; invalid handles panic.

# Usage

In most use-cases, `use forestgraph::{prelude::*, algo::*};` suffices for your needs.

```
use forestgraph::{algo::*, prelude::*};

let mut graph: Graph<&str> = Graph::directed();
let s = graph.add_vertex("s").unwrap();
let t = graph.add_vertex("t").unwrap();
graph.add_weighted_edge(s, t, 4).unwrap();

graph.dijkstra(s).unwrap();
assert_eq!(graph.distance(t), Some(4));
assert_eq!(graph.path_to(t), Some(vec![s, t]));
```
*/

pub mod algo;
pub mod edge;
pub mod error;
pub mod node;
pub mod ops;
pub mod repr;
pub(crate) mod testing;
pub mod tree;
pub mod utils;

pub use node::{NumVertices, VertexId};

/// `forestgraph::prelude` includes definitions for vertices and edges, all basic graph operation
/// traits, the graph representation, the search trees and the error types.
pub mod prelude {
    pub use super::{edge::*, error::*, node::*, ops::*, repr::*, tree::*};
}
