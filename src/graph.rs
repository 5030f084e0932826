//! Undirected weighted graphs, shortest paths, and spanning trees
//!
//! The graph surface is a trait ([`WeightedGraph`]) so the algorithms can
//! run over any representation; the crate ships one concrete
//! representation, an adjacency list over dense 1-based vertex ids
//! ([`AdjacencyList`]).
//!
//! Two algorithms are provided:
//!
//! - [`shortest_paths`]: single-source Dijkstra over the whole graph,
//!   returning a [`ShortestPaths`] table of distances and predecessors.
//!   The frontier scan is a linear pass over the vertices, so the run time
//!   is O(V^2). For the dense teaching graphs this module targets that is
//!   the honest bound anyway.
//! - [`minimum_spanning_tree`]: Kruskal's algorithm, pairing a
//!   [`MinHeap`](crate::arrayed_heap::MinHeap) of edges with a
//!   [`UnionFind`](crate::union_find::UnionFind) cycle check.
//!
//! # Example
//!
//! ```rust
//! use cursor_collections::graph::{shortest_paths, AdjacencyList, WeightedGraph};
//!
//! let mut g = AdjacencyList::new(4);
//! g.add_edge(1, 2, 1u32)?;
//! g.add_edge(2, 3, 2)?;
//! g.add_edge(1, 3, 9)?;
//! g.add_edge(3, 4, 1)?;
//!
//! let paths = shortest_paths(&g, 1)?;
//! assert_eq!(paths.distance_to(4), Some(4));
//! assert_eq!(paths.path_to(4), Some(vec![1, 2, 3, 4]));
//! # Ok::<(), cursor_collections::ContainerError>(())
//! ```

use std::cmp::Ordering;
use std::ops::Add;

use crate::arrayed_heap::MinHeap;
use crate::traits::{Container, ContainerError};
use crate::union_find::UnionFind;

/// Dense vertex id; valid ids run 1..=vertex_count
pub type VertexId = usize;

/// Trait for types usable as edge weights
///
/// Weights must be orderable, copyable, and addable, with a zero value for
/// path accumulation. Floating-point weights need an ordered wrapper.
pub trait EdgeWeight: Copy + Ord + Default + Add<Output = Self> {}

impl<T> EdgeWeight for T where T: Copy + Ord + Default + Add<Output = Self> {}

/// An undirected graph with weighted edges
///
/// Implementations own the representation; the algorithms in this module
/// only see vertices, neighbours, and weights.
pub trait WeightedGraph {
    /// The edge weight type
    type Weight: EdgeWeight;

    /// Number of vertices; ids run 1..=vertex_count
    fn vertex_count(&self) -> usize;

    /// Number of undirected edges
    fn edge_count(&self) -> usize;

    /// Returns each neighbour of `v` with the weight of the joining edge
    fn neighbors(&self, v: VertexId) -> Vec<(VertexId, Self::Weight)>;

    /// Returns the weight of the edge between `u` and `v`, if present
    fn edge_weight(&self, u: VertexId, v: VertexId) -> Option<Self::Weight>;

    /// True when an edge joins `u` and `v`
    fn is_adjacent(&self, u: VertexId, v: VertexId) -> bool {
        self.edge_weight(u, v).is_some()
    }
}

/// Adjacency-list graph over the vertices 1..=n
///
/// Vertices are fixed at construction; edges are added one at a time. Each
/// undirected edge is stored in both endpoint lists.
#[derive(Debug, Clone)]
pub struct AdjacencyList<W> {
    /// adjacency[v] lists (neighbour, weight); slot 0 is unused
    adjacency: Vec<Vec<(VertexId, W)>>,
    edges: usize,
}

impl<W: EdgeWeight> AdjacencyList<W> {
    /// Creates a graph with `vertex_count` vertices and no edges
    pub fn new(vertex_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); vertex_count + 1],
            edges: 0,
        }
    }

    /// Adds an undirected edge between `u` and `v`
    ///
    /// # Errors
    /// [`ContainerError::InvalidArgument`] when an endpoint is out of
    /// range, the edge is a self loop, or the weight is negative;
    /// [`ContainerError::DuplicateKey`] when the edge already exists.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId, weight: W) -> Result<(), ContainerError> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        if u == v {
            return Err(ContainerError::InvalidArgument(
                "self loops are not allowed",
            ));
        }
        if weight < W::default() {
            return Err(ContainerError::InvalidArgument(
                "edge weights must be non-negative",
            ));
        }
        if self.is_adjacent(u, v) {
            return Err(ContainerError::DuplicateKey);
        }
        self.adjacency[u].push((v, weight));
        self.adjacency[v].push((u, weight));
        self.edges += 1;
        Ok(())
    }

    /// Replaces the weight of an existing edge
    ///
    /// # Errors
    /// [`ContainerError::InvalidArgument`] when an endpoint is out of
    /// range, the weight is negative, or no such edge exists.
    pub fn set_edge_weight(
        &mut self,
        u: VertexId,
        v: VertexId,
        weight: W,
    ) -> Result<(), ContainerError> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        if weight < W::default() {
            return Err(ContainerError::InvalidArgument(
                "edge weights must be non-negative",
            ));
        }
        if !self.is_adjacent(u, v) {
            return Err(ContainerError::InvalidArgument(
                "no such edge to reweight",
            ));
        }
        for (to, w) in &mut self.adjacency[u] {
            if *to == v {
                *w = weight;
            }
        }
        for (to, w) in &mut self.adjacency[v] {
            if *to == u {
                *w = weight;
            }
        }
        Ok(())
    }

    fn check_vertex(&self, v: VertexId) -> Result<(), ContainerError> {
        if v == 0 || v >= self.adjacency.len() {
            return Err(ContainerError::InvalidArgument("vertex id out of range"));
        }
        Ok(())
    }
}

impl<W: EdgeWeight> WeightedGraph for AdjacencyList<W> {
    type Weight = W;

    fn vertex_count(&self) -> usize {
        self.adjacency.len() - 1
    }

    fn edge_count(&self) -> usize {
        self.edges
    }

    fn neighbors(&self, v: VertexId) -> Vec<(VertexId, W)> {
        self.adjacency.get(v).cloned().unwrap_or_default()
    }

    fn edge_weight(&self, u: VertexId, v: VertexId) -> Option<W> {
        self.adjacency
            .get(u)?
            .iter()
            .find(|(to, _)| *to == v)
            .map(|(_, w)| *w)
    }
}

/// Single-source shortest-path table produced by [`shortest_paths`]
#[derive(Debug, Clone)]
pub struct ShortestPaths<W> {
    start: VertexId,
    distance: Vec<Option<W>>,
    predecessor: Vec<Option<VertexId>>,
}

impl<W: EdgeWeight> ShortestPaths<W> {
    /// The source vertex the table was built from
    pub fn start(&self) -> VertexId {
        self.start
    }

    /// Distance from the source to `dest`; `None` when unreachable
    pub fn distance_to(&self, dest: VertexId) -> Option<W> {
        self.distance.get(dest).copied().flatten()
    }

    /// The vertex sequence of a shortest path from the source to `dest`
    ///
    /// The path starts at the source and ends at `dest`. `None` when
    /// `dest` is unreachable.
    pub fn path_to(&self, dest: VertexId) -> Option<Vec<VertexId>> {
        self.distance.get(dest).copied().flatten()?;
        let mut path = vec![dest];
        let mut cur = dest;
        while let Some(prev) = self.predecessor[cur] {
            path.push(prev);
            cur = prev;
        }
        path.reverse();
        Some(path)
    }
}

/// Runs Dijkstra's algorithm from `start` over the whole graph
///
/// Distances settle for every reachable vertex; unreachable vertices stay
/// at `None`. The next vertex to settle is found by a linear scan, giving
/// O(V^2) overall.
///
/// # Errors
/// [`ContainerError::InvalidArgument`] when `start` is out of range.
pub fn shortest_paths<G: WeightedGraph>(
    graph: &G,
    start: VertexId,
) -> Result<ShortestPaths<G::Weight>, ContainerError> {
    let n = graph.vertex_count();
    if start == 0 || start > n {
        return Err(ContainerError::InvalidArgument(
            "start vertex out of range",
        ));
    }
    let mut distance: Vec<Option<G::Weight>> = vec![None; n + 1];
    let mut predecessor: Vec<Option<VertexId>> = vec![None; n + 1];
    let mut visited = vec![false; n + 1];
    distance[start] = Some(G::Weight::default());

    loop {
        // Closest unvisited vertex with a tentative distance.
        let mut best: Option<(VertexId, G::Weight)> = None;
        for v in 1..=n {
            if visited[v] {
                continue;
            }
            if let Some(d) = distance[v] {
                if best.map_or(true, |(_, bd)| d < bd) {
                    best = Some((v, d));
                }
            }
        }
        let Some((v, d)) = best else {
            break;
        };
        visited[v] = true;
        for (u, w) in graph.neighbors(v) {
            if visited[u] {
                continue;
            }
            let candidate = d + w;
            if distance[u].map_or(true, |cur| candidate < cur) {
                distance[u] = Some(candidate);
                predecessor[u] = Some(v);
            }
        }
    }

    Ok(ShortestPaths {
        start,
        distance,
        predecessor,
    })
}

/// An undirected edge with its weight, ordered by weight
///
/// Ties break on the endpoint pair so the ordering is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedEdge<W> {
    pub u: VertexId,
    pub v: VertexId,
    pub weight: W,
}

impl<W: Ord> PartialOrd for WeightedEdge<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: Ord> Ord for WeightedEdge<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then_with(|| (self.u, self.v).cmp(&(other.u, other.v)))
    }
}

/// Builds a minimum spanning tree of `graph` with Kruskal's algorithm
///
/// Edges come out of a min-heap in ascending weight order; a union-find
/// over the vertices rejects the ones that would close a cycle. The result
/// is returned as a new adjacency-list graph over the same vertex ids.
/// When the input is disconnected the result is a minimum spanning forest.
///
/// # Errors
/// [`ContainerError::Full`] only if the graph lies about its edge count.
pub fn minimum_spanning_tree<G: WeightedGraph>(
    graph: &G,
) -> Result<AdjacencyList<G::Weight>, ContainerError> {
    let n = graph.vertex_count();
    let mut tree = AdjacencyList::new(n);
    if n == 0 {
        return Ok(tree);
    }

    let mut edges = MinHeap::with_capacity(graph.edge_count());
    for u in 1..=n {
        for (v, w) in graph.neighbors(u) {
            // Each undirected edge appears in both endpoint lists; keep one.
            if v > u {
                edges.insert(WeightedEdge { u, v, weight: w })?;
            }
        }
    }

    let mut components = UnionFind::new(n);
    let mut accepted = 0;
    while !edges.is_empty() && accepted + 1 < n {
        let edge = edges.delete_at(1)?;
        if components.connected(edge.u, edge.v)? {
            continue;
        }
        components.union(edge.u, edge.v)?;
        tree.add_edge(edge.u, edge.v, edge.weight)?;
        accepted += 1;
    }
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> AdjacencyList<u32> {
        // 1 --1-- 2
        // |       |
        // 9       2
        // |       |
        // 3 --1-- 4
        let mut g = AdjacencyList::new(4);
        g.add_edge(1, 2, 1).unwrap();
        g.add_edge(1, 3, 9).unwrap();
        g.add_edge(2, 4, 2).unwrap();
        g.add_edge(3, 4, 1).unwrap();
        g
    }

    #[test]
    fn test_adjacency_basics() {
        let g = diamond();
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.edge_count(), 4);
        assert!(g.is_adjacent(1, 2));
        assert!(g.is_adjacent(2, 1));
        assert!(!g.is_adjacent(1, 4));
        assert_eq!(g.edge_weight(3, 4), Some(1));
        assert_eq!(g.edge_weight(1, 4), None);
        let mut from_two: Vec<_> = g.neighbors(2).into_iter().collect();
        from_two.sort_unstable();
        assert_eq!(from_two, vec![(1, 1), (4, 2)]);
    }

    #[test]
    fn test_add_edge_rejections() {
        let mut g = diamond();
        assert!(matches!(
            g.add_edge(0, 1, 1),
            Err(ContainerError::InvalidArgument(_))
        ));
        assert!(matches!(
            g.add_edge(1, 5, 1),
            Err(ContainerError::InvalidArgument(_))
        ));
        assert!(matches!(
            g.add_edge(2, 2, 1),
            Err(ContainerError::InvalidArgument(_))
        ));
        assert_eq!(g.add_edge(2, 1, 7), Err(ContainerError::DuplicateKey));
        assert_eq!(g.edge_count(), 4);

        let mut signed = AdjacencyList::new(2);
        assert!(matches!(
            signed.add_edge(1, 2, -3i32),
            Err(ContainerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_set_edge_weight_updates_both_directions() {
        let mut g = diamond();
        g.set_edge_weight(1, 3, 2).unwrap();
        assert_eq!(g.edge_weight(1, 3), Some(2));
        assert_eq!(g.edge_weight(3, 1), Some(2));
        assert!(matches!(
            g.set_edge_weight(1, 4, 2),
            Err(ContainerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_shortest_paths_diamond() {
        let g = diamond();
        let paths = shortest_paths(&g, 1).unwrap();
        assert_eq!(paths.start(), 1);
        assert_eq!(paths.distance_to(1), Some(0));
        assert_eq!(paths.distance_to(2), Some(1));
        assert_eq!(paths.distance_to(4), Some(3));
        // 1 -> 3 direct costs 9; through 2 and 4 costs 4.
        assert_eq!(paths.distance_to(3), Some(4));
        assert_eq!(paths.path_to(3), Some(vec![1, 2, 4, 3]));
        assert_eq!(paths.path_to(1), Some(vec![1]));
    }

    #[test]
    fn test_shortest_paths_unreachable() {
        let mut g: AdjacencyList<u32> = AdjacencyList::new(3);
        g.add_edge(1, 2, 5).unwrap();
        let paths = shortest_paths(&g, 1).unwrap();
        assert_eq!(paths.distance_to(3), None);
        assert_eq!(paths.path_to(3), None);
        assert_eq!(paths.distance_to(9), None);
    }

    #[test]
    fn test_shortest_paths_bad_start() {
        let g = diamond();
        assert!(matches!(
            shortest_paths(&g, 0),
            Err(ContainerError::InvalidArgument(_))
        ));
        assert!(matches!(
            shortest_paths(&g, 5),
            Err(ContainerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_mst_picks_cheapest_edges() {
        let g = diamond();
        let mst = minimum_spanning_tree(&g).unwrap();
        assert_eq!(mst.edge_count(), 3);
        // The weight-9 edge is the one the tree leaves out.
        assert!(!mst.is_adjacent(1, 3));
        let total: u32 = [(1, 2), (2, 4), (3, 4)]
            .iter()
            .map(|&(u, v)| mst.edge_weight(u, v).unwrap())
            .sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn test_mst_of_disconnected_graph_is_forest() {
        let mut g: AdjacencyList<u32> = AdjacencyList::new(5);
        g.add_edge(1, 2, 1).unwrap();
        g.add_edge(2, 3, 8).unwrap();
        g.add_edge(1, 3, 2).unwrap();
        g.add_edge(4, 5, 4).unwrap();
        let forest = minimum_spanning_tree(&g).unwrap();
        assert_eq!(forest.edge_count(), 3);
        assert!(forest.is_adjacent(1, 2));
        assert!(forest.is_adjacent(1, 3));
        assert!(!forest.is_adjacent(2, 3));
        assert!(forest.is_adjacent(4, 5));
    }

    #[test]
    fn test_mst_empty_and_single_vertex() {
        let empty: AdjacencyList<u32> = AdjacencyList::new(0);
        assert_eq!(minimum_spanning_tree(&empty).unwrap().edge_count(), 0);
        let lone: AdjacencyList<u32> = AdjacencyList::new(1);
        let mst = minimum_spanning_tree(&lone).unwrap();
        assert_eq!(mst.vertex_count(), 1);
        assert_eq!(mst.edge_count(), 0);
    }
}
