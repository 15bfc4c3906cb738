//! Minimum spanning tree algorithms: Prim and Kruskal.

use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use hashbrown::HashMap;

use crate::error::{Error, Result};
use crate::graph::{Edge, Graph, Mode, Snapshot};
use crate::scored::MinScored;
use crate::unionfind::UnionFind;

/// A spanning tree: the chosen edges (ascending edge id) and their summed
/// weight.
#[derive(Debug, Clone)]
pub struct SpanningTree {
    pub edges: Vec<Edge>,
    total: i64,
}

impl SpanningTree {
    pub fn total_weight(&self) -> i64 {
        self.total
    }
}

fn mst_preconditions(graph: &Graph, snapshot: &Snapshot) -> Result<()> {
    if !graph.mode().contains(Mode::WEIGHTED) {
        return Err(Error::ModeIncompatible(
            "minimum spanning tree requires a weighted graph",
        ));
    }
    if graph.mode().contains(Mode::DIRECTED) {
        return Err(Error::ModeIncompatible(
            "minimum spanning tree requires an undirected graph",
        ));
    }
    if snapshot.edges.values().any(|e| e.directed) {
        return Err(Error::ModeIncompatible(
            "minimum spanning tree cannot mix directed edges",
        ));
    }
    Ok(())
}

/// Dense index over the lexicographically sorted vertex set, for the bitset
/// visit maps and the union-find.
fn dense_index(snapshot: &Snapshot) -> HashMap<&str, usize> {
    snapshot
        .vertices
        .keys()
        .enumerate()
        .map(|(i, v)| (v.as_str(), i))
        .collect()
}

/// Compute a minimum spanning tree with Prim's algorithm, growing from
/// `root`.
///
/// Starts with the root in the tree and repeatedly adopts the lightest edge
/// leaving it (ties break on the lower edge id, so parallel edges resolve to
/// the first-inserted of equal weight). If the heap drains before |V|−1
/// edges are adopted the graph does not span and [`Error::Disconnected`] is
/// returned.
///
/// # Complexity
/// * Time: **O(|E| log |E|)**.
/// * Auxiliary space: **O(|V| + |E|)** beyond the entry snapshot.
///
/// # Example
/// ```
/// use graphwerk::algo::prim;
/// use graphwerk::graph::{Graph, Mode};
///
/// let g = Graph::new(Mode::WEIGHTED);
/// g.add_edge("A", "B", 1).unwrap();
/// g.add_edge("B", "C", 2).unwrap();
/// g.add_edge("A", "C", 3).unwrap();
///
/// let tree = prim(&g, "A").unwrap();
/// assert_eq!(tree.total_weight(), 3);
/// ```
pub fn prim(graph: &Graph, root: &str) -> Result<SpanningTree> {
    let snapshot = graph.snapshot();
    mst_preconditions(graph, &snapshot)?;
    if snapshot.vertices.is_empty() {
        return Err(Error::Disconnected);
    }
    if !snapshot.contains(root) {
        return Err(Error::UnknownVertex(root.to_owned()));
    }

    let index = dense_index(&snapshot);
    let total_vertices = snapshot.vertices.len();
    let mut taken = FixedBitSet::with_capacity(total_vertices);
    let mut heap = BinaryHeap::new();
    let mut edges: Vec<Edge> = Vec::with_capacity(total_vertices.saturating_sub(1));
    let mut total: i64 = 0;

    taken.insert(index[root]);
    for &edge_id in snapshot.incident(root)? {
        let edge = &snapshot.edges[&edge_id];
        if !edge.is_loop() {
            heap.push(MinScored((edge.weight, edge.id), edge.id));
        }
    }

    while edges.len() + 1 < total_vertices {
        let Some(MinScored(_, edge_id)) = heap.pop() else {
            return Err(Error::Disconnected);
        };
        let edge = &snapshot.edges[&edge_id];
        let far = if taken.contains(index[edge.from.as_str()]) {
            &edge.to
        } else {
            &edge.from
        };
        let far_index = index[far.as_str()];
        if taken.contains(far_index) {
            continue;
        }
        taken.insert(far_index);
        total += edge.weight;
        edges.push(edge.clone());

        for &next_id in snapshot.incident(far)? {
            let next = &snapshot.edges[&next_id];
            if next.is_loop() {
                continue;
            }
            if !taken.contains(index[next.other(far)]) {
                heap.push(MinScored((next.weight, next.id), next.id));
            }
        }
    }

    edges.sort_by_key(|e| e.id);
    Ok(SpanningTree { edges, total })
}

/// Compute a minimum spanning tree with Kruskal's algorithm.
///
/// Self-loops are dropped, the remaining edges are stable-sorted by
/// ascending weight (insertion order breaks ties), and a union-find admits
/// each edge that links two separate components. Fewer than |V|−1 admitted
/// edges means the graph does not span.
///
/// # Complexity
/// * Time: **O(|E| log |E|)**.
/// * Auxiliary space: **O(|V| + |E|)** beyond the entry snapshot.
///
/// # Example
/// ```
/// use graphwerk::algo::kruskal;
/// use graphwerk::graph::{Graph, Mode};
///
/// let g = Graph::new(Mode::WEIGHTED);
/// g.add_edge("A", "B", 1).unwrap();
/// g.add_edge("B", "C", 2).unwrap();
/// g.add_edge("A", "C", 3).unwrap();
///
/// let tree = kruskal(&g).unwrap();
/// assert_eq!(tree.total_weight(), 3);
/// assert_eq!(tree.edges.len(), 2);
/// ```
pub fn kruskal(graph: &Graph) -> Result<SpanningTree> {
    let snapshot = graph.snapshot();
    mst_preconditions(graph, &snapshot)?;
    if snapshot.vertices.is_empty() {
        return Err(Error::Disconnected);
    }

    let index = dense_index(&snapshot);
    let total_vertices = snapshot.vertices.len();

    let mut candidates: Vec<&Edge> = snapshot.edges.values().filter(|e| !e.is_loop()).collect();
    candidates.sort_by_key(|e| (e.weight, e.id));

    let mut subgraphs = UnionFind::new(total_vertices);
    let mut edges: Vec<Edge> = Vec::with_capacity(total_vertices.saturating_sub(1));
    let mut total: i64 = 0;

    for edge in candidates {
        if edges.len() + 1 == total_vertices {
            break;
        }
        if subgraphs.union(index[edge.from.as_str()], index[edge.to.as_str()]) {
            total += edge.weight;
            edges.push(edge.clone());
        }
    }

    if edges.len() + 1 < total_vertices {
        return Err(Error::Disconnected);
    }
    edges.sort_by_key(|e| e.id);
    Ok(SpanningTree { edges, total })
}
