/*!
# Adjacency-List Graph

[`Graph`] stores arbitrary hashable vertex values. Each value is assigned a dense [`VertexId`]
in insertion order, and all per-vertex data (value, adjacency list, search state) is kept in
vectors indexed by that id. A hash map resolves values back to ids.

Adjacency lists keep edge-insertion order, so every traversal is reproducible. Most vertices of
sparse graphs have few neighbors, hence lists are `SmallVec`s with inline storage.
*/

use std::{fmt::Display, hash::Hash};

use fxhash::FxHashMap;
use log::warn;
use smallvec::SmallVec;

use super::*;
use crate::{edge::*, error::GraphError, node::*, ops::*};

type Adjacency<W> = SmallVec<[Neighbor<W>; 4]>;

/// Adjacency-list graph over vertex values `V` with optional edge weights `W`.
///
/// - Vertex values are unique; adding a duplicate is rejected.
/// - Undirected edges are stored at both endpoints and self-loops are rejected.
/// - Parallel edges are allowed.
/// - There are no removal operations.
#[derive(Debug, Clone)]
pub struct Graph<V, W = i64> {
    direction: Direction,
    values: Vec<V>,
    index: FxHashMap<V, VertexId>,
    adjacency: Vec<Adjacency<W>>,
    states: Vec<VertexState<W>>,
    num_edges: NumEdges,
}

impl<V, W> Graph<V, W>
where
    V: Eq + Hash + Clone,
    W: Weight,
{
    /// Creates an empty graph
    pub fn new(direction: Direction) -> Self {
        Self::with_capacity(direction, 0)
    }

    /// Creates an empty graph with space for `n` vertices
    pub fn with_capacity(direction: Direction, n: usize) -> Self {
        Self {
            direction,
            values: Vec::with_capacity(n),
            index: FxHashMap::with_capacity_and_hasher(n, Default::default()),
            adjacency: Vec::with_capacity(n),
            states: Vec::with_capacity(n),
            num_edges: 0,
        }
    }

    /// Creates an empty directed graph
    pub fn directed() -> Self {
        Self::new(Direction::Directed)
    }

    /// Creates an empty undirected graph
    pub fn undirected() -> Self {
        Self::new(Direction::Undirected)
    }

    /// Adds a vertex carrying `value` and returns its id.
    /// Fails with [`GraphError::DuplicateVertex`] if a vertex with this value exists.
    pub fn add_vertex(&mut self, value: V) -> Result<VertexId, GraphError> {
        if self.index.contains_key(&value) {
            warn!("rejected vertex: duplicate value");
            return Err(GraphError::DuplicateVertex);
        }

        let u = self.values.len() as VertexId;
        assert!(u != INVALID_VERTEX, "vertex ids are exhausted");
        self.index.insert(value.clone(), u);
        self.values.push(value);
        self.adjacency.push(SmallVec::new());
        self.states.push(VertexState::default());
        Ok(u)
    }

    /// Returns the id of the vertex carrying `value`
    pub fn get_vertex(&self, value: &V) -> Option<VertexId> {
        self.index.get(value).copied()
    }

    /// Returns the value of a vertex.
    /// ** Panics if `u >= n` **
    pub fn value_of(&self, u: VertexId) -> &V {
        &self.values[u as usize]
    }

    /// Returns an iterator over all `(id, value)` pairs in insertion order
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &V)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(u, value)| (u as VertexId, value))
    }

    /// Adds an unweighted edge `(u, v)`.
    /// ** Panics if `u >= n || v >= n` **
    pub fn add_edge(&mut self, u: VertexId, v: VertexId) -> Result<(), GraphError> {
        self.insert_edge(u, v, None)
    }

    /// Adds an edge `(u, v)` with weight `weight`.
    /// ** Panics if `u >= n || v >= n` **
    pub fn add_weighted_edge(
        &mut self,
        u: VertexId,
        v: VertexId,
        weight: W,
    ) -> Result<(), GraphError> {
        self.insert_edge(u, v, Some(weight))
    }

    /// Adds an edge between the vertices carrying `u` and `v`.
    /// Fails with [`GraphError::UnknownVertex`] if either value is absent.
    pub fn add_edge_by_value(
        &mut self,
        u: &V,
        v: &V,
        weight: Option<W>,
    ) -> Result<(), GraphError> {
        let (Some(u), Some(v)) = (self.get_vertex(u), self.get_vertex(v)) else {
            warn!("rejected edge: unknown endpoint");
            return Err(GraphError::UnknownVertex);
        };
        self.insert_edge(u, v, weight)
    }

    fn insert_edge(
        &mut self,
        u: VertexId,
        v: VertexId,
        weight: Option<W>,
    ) -> Result<(), GraphError> {
        assert!(u < self.number_of_vertices() && v < self.number_of_vertices());

        let edge = Edge(u, v);
        if self.direction == Direction::Undirected {
            if edge.is_loop() {
                warn!("rejected edge {edge}: self-loop in an undirected graph");
                return Err(GraphError::SelfLoop(u));
            }
            self.adjacency[v as usize].push(Neighbor::new(u, weight));
        }
        self.adjacency[u as usize].push(Neighbor::new(v, weight));
        self.num_edges += 1;
        Ok(())
    }

    /// Returns *true* if there is an edge `(u, v)`
    /// ** Panics if `u >= n` **
    pub fn has_edge(&self, u: VertexId, v: VertexId) -> bool {
        self.adjacency[u as usize].iter().any(|nb| nb.vertex == v)
    }

    /// Returns the weight of the first edge `(u, v)`, counting an unweighted edge as `1`,
    /// or `None` if there is no such edge.
    /// ** Panics if `u >= n` **
    pub fn weight_of(&self, u: VertexId, v: VertexId) -> Option<W> {
        self.adjacency[u as usize]
            .iter()
            .find(|nb| nb.vertex == v)
            .map(Neighbor::weight_or_unit)
    }

    /// Returns an iterator over all edges in insertion order.
    /// Undirected edges are reported once, as stored at their smaller endpoint.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        let directed = self.is_directed();
        self.vertices_range()
            .flat_map(move |u| self.edges_of(u))
            .filter(move |e| directed || *e == e.normalized())
    }

    /// Returns the search mark of `u`
    /// ** Panics if `u >= n` **
    pub fn mark(&self, u: VertexId) -> Mark {
        self.states[u as usize].mark
    }

    /// Returns the distance found by the last search, or `None` if `u` was not reached
    /// ** Panics if `u >= n` **
    pub fn distance(&self, u: VertexId) -> Option<W> {
        let distance = self.states[u as usize].distance;
        (!distance.is_infinite()).then_some(distance)
    }

    /// Returns the vertex `u` was discovered from in the last search
    /// ** Panics if `u >= n` **
    pub fn parent(&self, u: VertexId) -> Option<VertexId> {
        self.states[u as usize].parent
    }

    /// Returns the discovery stamp of the last depth-first search
    /// ** Panics if `u >= n` **
    pub fn discovery_time(&self, u: VertexId) -> Option<Time> {
        let time = self.states[u as usize].discovery;
        (time > 0).then_some(time)
    }

    /// Returns the finish stamp of the last depth-first search
    /// ** Panics if `u >= n` **
    pub fn finish_time(&self, u: VertexId) -> Option<Time> {
        let time = self.states[u as usize].finish;
        (time > 0).then_some(time)
    }
}

impl<V, W: Weight> GraphOrder for Graph<V, W> {
    fn number_of_vertices(&self) -> NumVertices {
        self.adjacency.len() as NumVertices
    }

    fn number_of_edges(&self) -> NumEdges {
        self.num_edges
    }
}

impl<V, W: Weight> GraphType for Graph<V, W> {
    type Weight = W;

    fn direction(&self) -> Direction {
        self.direction
    }
}

impl<V, W: Weight> AdjacencyList for Graph<V, W> {
    fn neighbors_of(&self, u: VertexId) -> impl Iterator<Item = Neighbor<W>> + '_ {
        self.adjacency[u as usize].iter().copied()
    }

    fn degree_of(&self, u: VertexId) -> NumVertices {
        self.adjacency[u as usize].len() as NumVertices
    }

    fn ith_neighbor(&self, u: VertexId, i: NumVertices) -> Neighbor<W> {
        self.adjacency[u as usize][i as usize]
    }
}

impl<V, W: Weight> SearchState for Graph<V, W> {
    fn state(&self, u: VertexId) -> &VertexState<W> {
        &self.states[u as usize]
    }

    fn state_mut(&mut self, u: VertexId) -> &mut VertexState<W> {
        &mut self.states[u as usize]
    }
}

impl<V, W> GraphTranspose for Graph<V, W>
where
    V: Eq + Hash + Clone,
    W: Weight,
{
    fn transposed(&self) -> Self {
        let mut transpose = Self {
            direction: self.direction,
            values: self.values.clone(),
            index: self.index.clone(),
            adjacency: vec![SmallVec::new(); self.len()],
            states: vec![VertexState::default(); self.len()],
            num_edges: self.num_edges,
        };

        if self.is_directed() {
            for (u, nb) in self.arcs() {
                let Edge(x, y) = Edge(u, nb.vertex).reverse();
                transpose.adjacency[x as usize].push(Neighbor::new(y, nb.weight));
            }
        } else {
            transpose.adjacency = self.adjacency.clone();
        }
        transpose
    }
}

impl<V, W> Display for Graph<V, W>
where
    V: Display,
    W: Weight,
{
    /// Writes one line per vertex: its value followed by its neighbors' values,
    /// weighted neighbors as `value(weight)`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (u, value) in self.values.iter().enumerate() {
            write!(f, "{value}:")?;
            for nb in &self.adjacency[u] {
                write!(f, " {}", self.values[nb.vertex as usize])?;
                if let Some(w) = nb.weight {
                    write!(f, "({w})")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    fn vertices<V: Eq + Hash + Clone>(graph: &mut Graph<V>, values: impl IntoIterator<Item = V>) {
        for value in values {
            graph.add_vertex(value).unwrap();
        }
    }

    #[test]
    fn duplicate_vertices_are_rejected() {
        let mut graph: Graph<&str> = Graph::directed();
        assert_eq!(graph.add_vertex("a"), Ok(0));
        assert_eq!(graph.add_vertex("b"), Ok(1));
        assert_eq!(graph.add_vertex("a"), Err(GraphError::DuplicateVertex));

        assert_eq!(graph.number_of_vertices(), 2);
        assert_eq!(graph.get_vertex(&"b"), Some(1));
        assert_eq!(graph.get_vertex(&"c"), None);
        assert_eq!(*graph.value_of(1), "b");
        assert_eq!(graph.vertices().collect_vec(), vec![(0, &"a"), (1, &"b")]);
    }

    #[test]
    fn undirected_edges_are_symmetric() {
        let mut graph: Graph<u32> = Graph::undirected();
        vertices(&mut graph, 1..=3);

        graph.add_edge(0, 1).unwrap();
        graph.add_weighted_edge(1, 2, 5).unwrap();
        assert_eq!(graph.add_edge(2, 2), Err(GraphError::SelfLoop(2)));

        assert_eq!(graph.number_of_edges(), 2);
        assert_eq!(graph.degree_of(1), 2);
        assert!(graph.has_edge(1, 0) && graph.has_edge(0, 1));
        assert_eq!(graph.weight_of(2, 1), Some(5));
        assert_eq!(graph.weight_of(0, 1), Some(1));
        assert_eq!(graph.weight_of(0, 2), None);
        assert_eq!(graph.edges().collect_vec(), vec![Edge(0, 1), Edge(1, 2)]);
    }

    #[test]
    fn directed_edges_keep_insertion_order() {
        let mut graph: Graph<char> = Graph::directed();
        vertices(&mut graph, ['a', 'b', 'c']);

        graph.add_edge_by_value(&'a', &'c', None).unwrap();
        graph.add_edge_by_value(&'a', &'b', Some(-2)).unwrap();
        graph.add_edge(2, 2).unwrap();
        assert_eq!(
            graph.add_edge_by_value(&'a', &'z', None),
            Err(GraphError::UnknownVertex)
        );

        assert_eq!(graph.number_of_edges(), 3);
        assert_eq!(
            graph.neighbors_of(0).map(|nb| nb.vertex).collect_vec(),
            vec![2, 1]
        );
        assert_eq!(graph.ith_neighbor(0, 1), Neighbor::new(1, Some(-2)));
        assert!(!graph.has_edge(1, 0));
        assert_eq!(format!("{graph}"), "a: c b(-2)\nb:\nc: c\n");
    }

    #[test]
    fn transpose_reverses_arcs() {
        let mut graph: Graph<u32> = Graph::directed();
        vertices(&mut graph, 0..4);
        for (u, v) in [(0, 1), (0, 2), (1, 2), (3, 0)] {
            graph.add_weighted_edge(u, v, (u + v) as i64).unwrap();
        }

        let transpose = graph.transposed();
        assert_eq!(transpose.number_of_edges(), 4);
        assert_eq!(
            transpose.edges().sorted().collect_vec(),
            vec![Edge(0, 3), Edge(1, 0), Edge(2, 0), Edge(2, 1)]
        );
        assert_eq!(transpose.weight_of(2, 1), Some(3));
        assert_eq!(transpose.get_vertex(&3), Some(3));
    }

    #[test]
    fn fresh_state_is_unreached() {
        let mut graph: Graph<u32> = Graph::with_capacity(Direction::Directed, 2);
        vertices(&mut graph, [7, 8]);
        assert_eq!(graph.mark(0), Mark::White);
        assert_eq!(graph.distance(0), None);
        assert_eq!(graph.parent(1), None);
        assert_eq!(graph.discovery_time(1), None);
        assert_eq!(graph.finish_time(1), None);
    }
}
