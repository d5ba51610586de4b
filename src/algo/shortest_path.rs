/*!
Single-source shortest paths on directed graphs.

- [`ShortestPaths::dijkstra`] settles vertices in order of their distance using an
  [`IndexedPriorityQueue`]; it requires non-negative weights, which is not checked.
- [`ShortestPaths::bellman_ford`] relaxes all edges up to `|V| - 1` times and detects
  negative-weight cycles reachable from the source.

Both algorithms count unweighted edges as weight `1`, write `distance` and `parent` into the
search state, and never relax out of a vertex that has not been reached.
*/

use log::{debug, warn};
use num::{CheckedAdd, Zero};

use super::*;

/// Shortest-path algorithms writing into the search state of a graph
pub trait ShortestPaths: AdjacencyList + SearchState {
    /// Computes shortest distances from `source` with Dijkstra's algorithm.
    ///
    /// Every vertex is settled (marked black) at most once; a settled distance is final.
    /// Fails with [`GraphError::NotDirected`] on undirected graphs.
    /// ** Panics if `source >= n` **
    fn dijkstra(&mut self, source: VertexId) -> Result<(), GraphError> {
        if !self.is_directed() {
            return Err(GraphError::NotDirected {
                algorithm: "dijkstra",
            });
        }
        assert!(source < self.number_of_vertices());

        self.reset_search_state();
        {
            let state = self.state_mut(source);
            state.mark = Mark::Gray;
            state.distance = Self::Weight::zero();
        }

        let mut queue: IndexedPriorityQueue<VertexId, Self::Weight> =
            IndexedPriorityQueue::with_capacity(self.len());
        queue.insert(source, Self::Weight::zero());

        let mut settled = 0;
        while let Ok((u, distance)) = queue.pop() {
            self.state_mut(u).mark = Mark::Black;
            settled += 1;

            for i in 0..self.degree_of(u) {
                let nb = self.ith_neighbor(u, i);
                if self.state(nb.vertex).mark == Mark::Black {
                    continue;
                }
                let Some(candidate) = distance.checked_add(&nb.weight_or_unit()) else {
                    continue;
                };
                if candidate >= self.state(nb.vertex).distance {
                    continue;
                }

                let state = self.state_mut(nb.vertex);
                state.distance = candidate;
                state.parent = Some(u);
                if state.mark == Mark::White {
                    state.mark = Mark::Gray;
                    queue.insert(nb.vertex, candidate);
                } else {
                    queue.update(&nb.vertex, candidate)?;
                }
            }
        }

        debug!("dijkstra from {source}: settled {settled} of {} vertices", self.len());
        Ok(())
    }

    /// Computes shortest distances from `source` with the Bellman-Ford algorithm.
    ///
    /// Performs up to `|V| - 1` passes over all edges and stops early once a pass changes
    /// nothing. If an edge can still be relaxed afterwards, a negative-weight cycle is reachable
    /// from `source`: the search state is reset (so no stale distances remain) and
    /// [`GraphError::NegativeCycle`] is returned.
    /// Fails with [`GraphError::NotDirected`] on undirected graphs.
    /// ** Panics if `source >= n` **
    fn bellman_ford(&mut self, source: VertexId) -> Result<(), GraphError> {
        if !self.is_directed() {
            return Err(GraphError::NotDirected {
                algorithm: "bellman-ford",
            });
        }
        assert!(source < self.number_of_vertices());

        self.reset_search_state();
        self.state_mut(source).distance = Self::Weight::zero();

        let mut passes = 0;
        for _ in 1..self.len() {
            passes += 1;
            if !relax_all_edges(self) {
                break;
            }
        }

        if relax_all_edges(self) {
            warn!("bellman-ford from {source}: negative-weight cycle detected");
            self.reset_search_state();
            return Err(GraphError::NegativeCycle { origin: source });
        }

        for u in self.vertices_range() {
            if !self.state(u).distance.is_infinite() {
                self.state_mut(u).mark = Mark::Black;
            }
        }

        debug!("bellman-ford from {source}: converged after {passes} passes");
        Ok(())
    }

    /// Returns the path from the source of the last search to `target`, following
    /// `parent` links, or `None` if `target` was not reached.
    /// ** Panics if `target >= n` **
    fn path_to(&self, target: VertexId) -> Option<Vec<VertexId>> {
        if self.state(target).distance.is_infinite() {
            return None;
        }

        let mut path = vec![target];
        let mut cur = target;
        while let Some(parent) = self.state(cur).parent {
            path.push(parent);
            cur = parent;
        }
        path.reverse();
        Some(path)
    }
}

impl<G> ShortestPaths for G where G: AdjacencyList + SearchState {}

/// Relaxes every edge leaving a reached vertex once. Returns *true* if any distance changed.
fn relax_all_edges<G>(graph: &mut G) -> bool
where
    G: AdjacencyList + SearchState,
{
    let mut changed = false;
    for u in graph.vertices_range() {
        let distance = graph.state(u).distance;
        if distance.is_infinite() {
            continue;
        }

        for i in 0..graph.degree_of(u) {
            let nb = graph.ith_neighbor(u, i);
            let Some(candidate) = distance.checked_add(&nb.weight_or_unit()) else {
                continue;
            };

            let state = graph.state_mut(nb.vertex);
            if candidate < state.distance {
                state.distance = candidate;
                state.parent = Some(u);
                changed = true;
            }
        }
    }
    changed
}
