/*!
Graph traversals that record their results in the graph's search state.

This module provides:
- breadth-first search from a source, computing hop distances and a BFS tree,
- depth-first search over all vertices, stamping discovery/finish times and building
  a depth-first forest,
- topological ordering of directed acyclic graphs.

Every traversal starts by resetting the state of all vertices. The depth-first searches run on
an explicit stack of `(vertex, next neighbor index)` frames, so deep graphs (e.g. long paths)
cannot overflow the call stack, and the logical clock is threaded through as a [`DfsClock`].
*/

use std::collections::VecDeque;

use log::{debug, warn};
use num::{CheckedAdd, One, Zero};

use super::*;

/// Runs a depth-first visit from the white vertex `root`.
///
/// Vertices are stamped with `clock`, their parents are set, and each vertex is appended to
/// `finished` once all its neighbors are done. Returns the target of the first back edge
/// (an edge into a gray vertex), if any. The visit continues after a back edge.
pub(crate) fn depth_first_visit<G>(
    graph: &mut G,
    root: VertexId,
    clock: &mut DfsClock,
    finished: &mut Vec<VertexId>,
) -> Option<VertexId>
where
    G: AdjacencyList + SearchState,
{
    debug_assert_eq!(graph.state(root).mark, Mark::White);

    let mut back_edge = None;
    let mut stack: Vec<(VertexId, NumVertices)> = vec![(root, 0)];
    {
        let state = graph.state_mut(root);
        state.mark = Mark::Gray;
        state.discovery = clock.tick();
    }

    while let Some(frame) = stack.last_mut() {
        let u = frame.0;
        if frame.1 < graph.degree_of(u) {
            let v = graph.ith_neighbor(u, frame.1).vertex;
            frame.1 += 1;

            match graph.state(v).mark {
                Mark::White => {
                    let state = graph.state_mut(v);
                    state.mark = Mark::Gray;
                    state.parent = Some(u);
                    state.discovery = clock.tick();
                    stack.push((v, 0));
                }
                Mark::Gray if back_edge.is_none() => back_edge = Some(v),
                _ => {}
            }
        } else {
            stack.pop();
            let state = graph.state_mut(u);
            state.mark = Mark::Black;
            state.finish = clock.tick();
            finished.push(u);
        }
    }

    back_edge
}

/// Runs a depth-first search over all vertices in id order and returns them by increasing
/// finish time. Returns the first back edge found, if any.
fn depth_first_forest<G>(graph: &mut G, finished: &mut Vec<VertexId>) -> Option<VertexId>
where
    G: AdjacencyList + SearchState,
{
    graph.reset_search_state();
    finished.clear();
    finished.reserve(graph.len());

    let mut clock = DfsClock::new();
    let mut back_edge = None;
    for u in graph.vertices_range() {
        if graph.state(u).mark == Mark::White {
            let found = depth_first_visit(graph, u, &mut clock, finished);
            back_edge = back_edge.or(found);
        }
    }
    back_edge
}

/// Traversal algorithms writing into the search state of a graph
pub trait Traversal: AdjacencyList + SearchState {
    /// Runs a breadth-first search from `source` and returns the vertices in visiting order.
    ///
    /// Afterwards, every reached vertex `v` has `distance(v)` equal to the minimum number of
    /// edges on a path from `source` and `parent(v)` set to the vertex it was discovered from.
    /// Unreached vertices keep an infinite distance. So do reached vertices whose hop count does
    /// not fit below `W::infinity()`; they are still visited and receive a parent.
    /// ** Panics if `source >= n` **
    ///
    /// # Examples
    /// ```
    /// use forestgraph::{prelude::*, algo::*};
    ///
    /// let mut graph: Graph<u32> = Graph::undirected();
    /// for x in 0..3 {
    ///     graph.add_vertex(x).unwrap();
    /// }
    /// graph.add_edge(0, 1).unwrap();
    /// graph.add_edge(1, 2).unwrap();
    ///
    /// assert_eq!(graph.bfs(0), vec![0, 1, 2]);
    /// assert_eq!(graph.distance(2), Some(2));
    /// ```
    fn bfs(&mut self, source: VertexId) -> Vec<VertexId> {
        assert!(source < self.number_of_vertices());
        self.reset_search_state();

        {
            let state = self.state_mut(source);
            state.mark = Mark::Gray;
            state.distance = Self::Weight::zero();
        }

        let mut order = Vec::new();
        let mut overflowed = false;
        let mut queue = VecDeque::from([source]);
        while let Some(u) = queue.pop_front() {
            order.push(u);
            let next_distance = self
                .state(u)
                .distance
                .checked_add(&Self::Weight::one())
                .filter(|d| !d.is_infinite());
            if next_distance.is_none() && !overflowed {
                warn!("bfs from {source}: hop count exceeds the weight type below vertex {u}");
                overflowed = true;
            }

            for i in 0..self.degree_of(u) {
                let v = self.ith_neighbor(u, i).vertex;
                if self.state(v).mark != Mark::White {
                    continue;
                }

                let state = self.state_mut(v);
                state.mark = Mark::Gray;
                if let Some(distance) = next_distance {
                    state.distance = distance;
                }
                state.parent = Some(u);
                queue.push_back(v);
            }

            self.state_mut(u).mark = Mark::Black;
        }

        debug!("bfs from {source}: reached {} of {} vertices", order.len(), self.len());
        order
    }

    /// Runs a depth-first search over all vertices (in id order) and returns them by
    /// increasing finish time.
    ///
    /// Every vertex receives a discovery and a finish stamp in `1..=2n`, and `parent`
    /// describes the resulting depth-first forest.
    fn dfs(&mut self) -> Vec<VertexId> {
        let mut finished = Vec::new();
        depth_first_forest(self, &mut finished);
        debug!("dfs: visited {} vertices", finished.len());
        finished
    }

    /// Returns the vertices ordered such that every edge `(u, v)` has `u` before `v`.
    ///
    /// Fails with [`GraphError::NotDirected`] on undirected graphs and with
    /// [`GraphError::Cycle`] if the graph has a cycle (reporting a vertex on it).
    fn topological_sort(&mut self) -> Result<Vec<VertexId>, GraphError> {
        if !self.is_directed() {
            return Err(GraphError::NotDirected {
                algorithm: "topological sort",
            });
        }

        let mut order = Vec::new();
        if let Some(v) = depth_first_forest(self, &mut order) {
            warn!("topological sort: back edge into vertex {v}, graph is cyclic");
            return Err(GraphError::Cycle(v));
        }

        order.reverse();
        Ok(order)
    }
}

impl<G> Traversal for G where G: AdjacencyList + SearchState {}
