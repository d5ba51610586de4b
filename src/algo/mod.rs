/*!
# Graph Algorithms

This module provides the **graph algorithms** built on top of [`Graph`](crate::repr::Graph).
All algorithms are traits blanket-implemented for every graph offering the access traits of
[`ops`](crate::ops), and they are re-exported at the top level of this module, so you can simply do:
```rust
use forestgraph::{algo::*, prelude::*};
```
and call `graph.bfs(source)`, `graph.topological_sort()`, `graph.dijkstra(source)`, ...

Results are written into the per-vertex search state of the graph (mark, distance, parent,
timestamps), which every top-level call resets before it starts.
*/

mod connectivity;
mod shortest_path;
mod traversal;

use crate::{prelude::*, utils::*};

pub use connectivity::*;
pub use shortest_path::*;
pub use traversal::*;
