/*!
Strongly connected components via Kosaraju's algorithm.

1. A depth-first search over the graph yields all vertices by increasing finish time.
2. The transpose of the graph is searched once per still-white vertex, taken in decreasing
   finish time. Every depth-first tree of this second pass is exactly one component.

The root of each depth-first tree in the transpose serves as the component's representative.
*/

use log::debug;

use super::*;

/// Strongly connected components of directed graphs
pub trait Connectivity: Traversal + GraphTranspose {
    /// Returns all strongly connected components.
    ///
    /// Components are listed in the order they are found; the first vertex of each component is
    /// its representative. Fails with [`GraphError::NotDirected`] on undirected graphs.
    fn strongly_connected_components(&mut self) -> Result<Vec<Vec<VertexId>>, GraphError> {
        if !self.is_directed() {
            return Err(GraphError::NotDirected {
                algorithm: "strongly connected components",
            });
        }

        let finished = self.dfs();
        let mut transpose = self.transposed();
        transpose.reset_search_state();

        let mut clock = DfsClock::new();
        let mut components = Vec::new();
        for &u in finished.iter().rev() {
            if transpose.state(u).mark != Mark::White {
                continue;
            }

            let mut members = Vec::new();
            depth_first_visit(&mut transpose, u, &mut clock, &mut members);
            // the root finishes last
            members.reverse();
            components.push(members);
        }

        debug!(
            "scc: {} components over {} vertices",
            components.len(),
            self.len()
        );
        Ok(components)
    }

    /// Returns one representative per strongly connected component
    /// (see [`Connectivity::strongly_connected_components`]).
    fn find_strongly_connected_components(&mut self) -> Result<Vec<VertexId>, GraphError> {
        Ok(self
            .strongly_connected_components()?
            .into_iter()
            .map(|component| component[0])
            .collect())
    }
}

impl<G> Connectivity for G where G: Traversal + GraphTranspose {}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    use super::*;

    fn letters_graph() -> Graph<char> {
        let mut graph = Graph::directed();
        for c in 'a'..='h' {
            graph.add_vertex(c).unwrap();
        }
        for (u, v) in [
            ('a', 'b'),
            ('b', 'c'),
            ('b', 'e'),
            ('b', 'f'),
            ('c', 'd'),
            ('c', 'g'),
            ('d', 'c'),
            ('d', 'h'),
            ('e', 'a'),
            ('e', 'f'),
            ('f', 'g'),
            ('g', 'f'),
            ('g', 'h'),
        ] {
            graph.add_edge_by_value(&u, &v, None).unwrap();
        }
        graph
    }

    #[test]
    fn kosaraju_components() {
        let mut graph = letters_graph();

        let components = graph
            .strongly_connected_components()
            .unwrap()
            .into_iter()
            .map(|c| c.into_iter().map(|u| *graph.value_of(u)).collect::<String>())
            .collect_vec();
        assert_eq!(components, vec!["aeb", "cd", "gf", "h"]);

        let roots = graph
            .find_strongly_connected_components()
            .unwrap()
            .into_iter()
            .map(|u| *graph.value_of(u))
            .collect_vec();
        assert_eq!(roots, vec!['a', 'c', 'g', 'h']);
    }

    #[test]
    fn undirected_graphs_are_rejected() {
        let mut graph: Graph<u8> = Graph::undirected();
        graph.add_vertex(0).unwrap();
        assert_eq!(
            graph.find_strongly_connected_components(),
            Err(GraphError::NotDirected {
                algorithm: "strongly connected components"
            })
        );
    }

    /// Checks mutual reachability with one BFS per vertex
    #[test]
    fn components_match_mutual_reachability() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for n in [5u32, 20, 60] {
            for _ in 0..10 {
                let mut graph: Graph<u32> = Graph::directed();
                for x in 0..n {
                    graph.add_vertex(x).unwrap();
                }
                for _ in 0..(3 * n / 2) {
                    graph
                        .add_edge(rng.random_range(0..n), rng.random_range(0..n))
                        .unwrap();
                }

                let reach = (0..n)
                    .map(|u| {
                        let mut reached = vec![false; n as usize];
                        for v in graph.bfs(u) {
                            reached[v as usize] = true;
                        }
                        reached
                    })
                    .collect_vec();

                let mut component_of = vec![usize::MAX; n as usize];
                for (i, component) in graph
                    .strongly_connected_components()
                    .unwrap()
                    .into_iter()
                    .enumerate()
                {
                    for u in component {
                        assert_eq!(component_of[u as usize], usize::MAX);
                        component_of[u as usize] = i;
                    }
                }

                for u in 0..n as usize {
                    for v in 0..n as usize {
                        let mutual = reach[u][v] && reach[v][u];
                        assert_eq!(mutual, component_of[u] == component_of[v]);
                    }
                }
            }
        }
    }
}
