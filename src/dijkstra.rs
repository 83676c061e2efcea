//! A plain single-source shortest-path routine over a sparse, non-negative-
//! weight directed graph, sharing [`crate::heap::IndexedKHeap`] with the
//! matching solver. Not used by the matching solver itself — this exists as
//! a second, simpler consumer of the heap, built from a [`crate::io::dimacs`]
//! graph.

use crate::error::HeapError;
use crate::heap::{HeapEntry, IndexedKHeap};
use crate::io::dimacs::DimacsGraph;

const ARITY: usize = 4;

#[derive(Debug, Clone, Copy)]
struct Node {
    dist: i64,
    position: usize,
}

impl HeapEntry for Node {
    type Key = i64;

    fn key(&self) -> i64 {
        self.dist
    }

    fn position(&self) -> usize {
        self.position
    }

    fn set_position(&mut self, position: usize) {
        self.position = position;
    }
}

/// Computes shortest-path distances from `source` to every vertex in
/// `graph`, returning `None` for vertices `source` cannot reach.
///
/// # Panics
/// Panics if any edge weight is negative, since this routine is a plain
/// Dijkstra sweep with no potential reweighting.
pub fn shortest_paths(graph: &DimacsGraph, source: usize) -> Result<Vec<Option<i64>>, HeapError> {
    assert!(
        graph.edges.iter().all(|&(_, _, w)| w >= 0),
        "shortest_paths requires non-negative edge weights"
    );
    assert!(source < graph.vertex_count, "source vertex out of range");

    let mut adjacency: Vec<Vec<(usize, i64)>> = vec![Vec::new(); graph.vertex_count];
    for &(u, v, w) in &graph.edges {
        adjacency[u].push((v, w));
    }

    let mut nodes: Vec<Node> = (0..graph.vertex_count)
        .map(|_| Node {
            dist: i64::MAX,
            position: 0,
        })
        .collect();
    nodes[source].dist = 0;

    let mut heap = IndexedKHeap::build(ARITY, &mut nodes, vec![source]);
    let mut settled = vec![false; graph.vertex_count];

    while !heap.is_empty() {
        let u = heap.pop_min(&mut nodes)?;
        if settled[u] {
            continue;
        }
        settled[u] = true;

        for &(v, w) in &adjacency[u] {
            if settled[v] {
                continue;
            }
            let candidate = nodes[u].dist.saturating_add(w);
            if candidate >= nodes[v].dist {
                continue;
            }
            let first_reach = nodes[v].dist == i64::MAX;
            nodes[v].dist = candidate;
            if first_reach {
                heap.insert(&mut nodes, v);
            } else {
                heap.update(&mut nodes, v)?;
            }
        }
    }

    Ok(nodes
        .iter()
        .map(|n| if n.dist == i64::MAX { None } else { Some(n.dist) })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_shortest_distances_on_a_small_graph() {
        let graph = DimacsGraph {
            vertex_count: 4,
            edges: vec![(0, 1, 1), (1, 2, 2), (0, 2, 10), (2, 3, 1)],
        };
        let dist = shortest_paths(&graph, 0).unwrap();
        assert_eq!(dist, vec![Some(0), Some(1), Some(3), Some(4)]);
    }

    #[test]
    fn unreachable_vertices_are_none() {
        let graph = DimacsGraph {
            vertex_count: 3,
            edges: vec![(0, 1, 1)],
        };
        let dist = shortest_paths(&graph, 0).unwrap();
        assert_eq!(dist, vec![Some(0), Some(1), None]);
    }

    #[test]
    #[should_panic(expected = "non-negative")]
    fn panics_on_negative_weights() {
        let graph = DimacsGraph {
            vertex_count: 2,
            edges: vec![(0, 1, -5)],
        };
        let _ = shortest_paths(&graph, 0);
    }
}
