//! Dijkstra's shortest path algorithm.

use std::collections::BinaryHeap;

use hashbrown::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::graph::{Graph, Mode};
use crate::scored::MinScored;

/// Distance sentinel for unreachable vertices.
pub const INFINITY: i64 = i64::MAX;

/// Output of [`dijkstra`]: one entry per vertex in `dist` (unreachable
/// vertices stay at [`INFINITY`]), and the shortest-path tree in `parent`.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    pub dist: HashMap<String, i64>,
    pub parent: HashMap<String, String>,
    start: String,
}

impl ShortestPaths {
    /// The shortest known distance to `id`, [`INFINITY`] when unreachable.
    pub fn distance(&self, id: &str) -> Option<i64> {
        self.dist.get(id).copied()
    }

    /// Reconstruct the shortest path from the start to `dest`, or `None`
    /// when `dest` is unknown or unreachable.
    pub fn path_to(&self, dest: &str) -> Option<Vec<String>> {
        if self.dist.get(dest).copied().unwrap_or(INFINITY) == INFINITY {
            return None;
        }
        let mut path = vec![dest.to_owned()];
        let mut cursor = dest;
        while cursor != self.start {
            let prev = self.parent.get(cursor)?;
            path.push(prev.clone());
            cursor = prev;
        }
        path.reverse();
        Some(path)
    }
}

/// Compute the cost of the cheapest path from `start` to every reachable
/// vertex.
///
/// Requires a weighted graph. Edge weights must be non-negative for the
/// result to be meaningful; negative weights are not detected.
///
/// # Returns
/// * [`ShortestPaths`]: a distance per vertex (unreachable ones stay at
///   [`INFINITY`]) and the shortest-path tree.
///
/// # Complexity
/// * Time: **O((|V| + |E|) log |V|)**.
/// * Auxiliary space: **O(|V| + |E|)** beyond the entry snapshot.
///
/// # Example
/// ```
/// use graphwerk::algo::dijkstra;
/// use graphwerk::graph::{Graph, Mode};
///
/// let g = Graph::new(Mode::DIRECTED | Mode::WEIGHTED);
/// g.add_edge("A", "B", 4).unwrap();
/// g.add_edge("A", "C", 2).unwrap();
/// g.add_edge("C", "B", 1).unwrap();
///
/// let paths = dijkstra(&g, "A").unwrap();
/// assert_eq!(paths.distance("B"), Some(3));
/// assert_eq!(paths.path_to("B").unwrap(), vec!["A", "C", "B"]);
/// ```
pub fn dijkstra(graph: &Graph, start: &str) -> Result<ShortestPaths> {
    if !graph.mode().contains(Mode::WEIGHTED) {
        return Err(Error::ModeIncompatible(
            "dijkstra requires a weighted graph; use bfs for unweighted shortest paths",
        ));
    }
    let snapshot = graph.snapshot();
    if !snapshot.contains(start) {
        return Err(Error::UnknownVertex(start.to_owned()));
    }

    let mut dist: HashMap<String, i64> = snapshot
        .vertices
        .keys()
        .map(|v| (v.clone(), INFINITY))
        .collect();
    let mut parent: HashMap<String, String> = HashMap::new();
    let mut visited: HashSet<String> = HashSet::new();
    let mut visit_next = BinaryHeap::new();

    dist.insert(start.to_owned(), 0);
    visit_next.push(MinScored(0, start.to_owned()));

    while let Some(MinScored(node_score, node)) = visit_next.pop() {
        if visited.contains(&node) {
            continue;
        }
        for (edge, next) in snapshot.outgoing(&node)? {
            if visited.contains(next) {
                continue;
            }
            let next_score = node_score + edge.weight;
            if next_score < dist[next] {
                dist.insert(next.to_owned(), next_score);
                parent.insert(next.to_owned(), node.clone());
                visit_next.push(MinScored(next_score, next.to_owned()));
            }
        }
        visited.insert(node);
    }

    Ok(ShortestPaths {
        dist,
        parent,
        start: start.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn unweighted_graph_is_rejected() {
        let g = Graph::new(Mode::empty());
        g.add_edge("A", "B", 0).unwrap();
        assert_eq!(
            dijkstra(&g, "A").unwrap_err().kind(),
            ErrorKind::ModeIncompatible
        );
    }

    #[test]
    fn unknown_start_is_rejected() {
        let g = Graph::new(Mode::WEIGHTED);
        g.add_edge("A", "B", 1).unwrap();
        assert_eq!(
            dijkstra(&g, "Z").unwrap_err().kind(),
            ErrorKind::UnknownVertex
        );
    }

    #[test]
    fn relaxation_prefers_the_cheaper_route() {
        let g = Graph::new(Mode::DIRECTED | Mode::WEIGHTED);
        g.add_edge("A", "B", 4).unwrap();
        g.add_edge("A", "C", 2).unwrap();
        g.add_edge("C", "B", 1).unwrap();
        g.add_edge("B", "D", 5).unwrap();

        let paths = dijkstra(&g, "A").unwrap();
        assert_eq!(paths.distance("A"), Some(0));
        assert_eq!(paths.distance("B"), Some(3));
        assert_eq!(paths.distance("C"), Some(2));
        assert_eq!(paths.distance("D"), Some(8));
        assert_eq!(paths.parent["B"], "C");
        assert_eq!(paths.parent["C"], "A");
        assert_eq!(paths.parent["D"], "B");
    }

    #[test]
    fn unreachable_vertices_stay_at_the_sentinel() {
        let g = Graph::new(Mode::DIRECTED | Mode::WEIGHTED);
        g.add_edge("A", "B", 1).unwrap();
        g.add_vertex("island").unwrap();
        let paths = dijkstra(&g, "A").unwrap();
        assert_eq!(paths.distance("island"), Some(INFINITY));
        assert!(paths.path_to("island").is_none());
    }

    #[test]
    fn undirected_edges_relax_both_ways() {
        let g = Graph::new(Mode::WEIGHTED);
        g.add_edge("A", "B", 7).unwrap();
        g.add_edge("B", "C", 2).unwrap();
        let paths = dijkstra(&g, "C").unwrap();
        assert_eq!(paths.distance("A"), Some(9));
        assert_eq!(paths.path_to("A").unwrap(), vec!["C", "B", "A"]);
    }

    #[test]
    fn parallel_edges_use_the_lightest() {
        let g = Graph::new(Mode::WEIGHTED | Mode::MULTI);
        g.add_edge("A", "B", 9).unwrap();
        g.add_edge("A", "B", 3).unwrap();
        let paths = dijkstra(&g, "A").unwrap();
        assert_eq!(paths.distance("B"), Some(3));
    }
}
