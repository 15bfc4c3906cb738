use std::collections::VecDeque;

use super::{CancelToken, NeighbourFilter, ObserveHook, Traversal, VisitHook};
use crate::error::{Error, Result};
use crate::graph::{Graph, Mode};

/// Options for [`bfs`]. All fields default to off.
///
/// ```
/// use graphwerk::graph::{Graph, Mode};
/// use graphwerk::traverse::{bfs, BfsOptions};
///
/// let g = Graph::new(Mode::empty());
/// g.add_edge("A", "B", 0).unwrap();
/// g.add_edge("B", "C", 0).unwrap();
///
/// let t = bfs(&g, "A", BfsOptions::new().max_depth(1)).unwrap();
/// assert_eq!(t.order, vec!["A", "B"]);
/// ```
#[derive(Default)]
pub struct BfsOptions<'a> {
    cancel: Option<CancelToken>,
    max_depth: Option<usize>,
    on_enqueue: Option<ObserveHook<'a>>,
    on_dequeue: Option<ObserveHook<'a>>,
    on_visit: Option<VisitHook<'a>>,
    filter: Option<NeighbourFilter<'a>>,
}

impl<'a> BfsOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe this token before every dequeue and inside enqueue loops.
    pub fn cancel_token(mut self, token: &CancelToken) -> Self {
        self.cancel = Some(token.clone());
        self
    }

    /// Bound the traversal depth. Zero visits only the start vertex.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Called when a vertex enters the queue (including the start).
    pub fn on_enqueue(mut self, hook: impl FnMut(&str, usize) + 'a) -> Self {
        self.on_enqueue = Some(Box::new(hook));
        self
    }

    /// Called when a vertex leaves the queue, before the visit hook.
    pub fn on_dequeue(mut self, hook: impl FnMut(&str, usize) + 'a) -> Self {
        self.on_dequeue = Some(Box::new(hook));
        self
    }

    /// Called for every visited vertex; returning `Err` aborts the
    /// traversal.
    pub fn on_visit(
        mut self,
        hook: impl FnMut(&str, usize) -> core::result::Result<(), String> + 'a,
    ) -> Self {
        self.on_visit = Some(Box::new(hook));
        self
    }

    /// Skip neighbours for which the predicate returns `false`.
    pub fn filter_neighbour(mut self, filter: impl FnMut(&str, &str) -> bool + 'a) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }
}

/// Breadth-first traversal from `start`, yielding unweighted shortest-path
/// depths.
///
/// Weighted graphs are rejected: BFS depth equals shortest-path edge count
/// only when every edge costs the same, so a weighted graph calls for
/// [`dijkstra`](crate::algo::dijkstra) instead.
///
/// # Arguments
/// * `graph`: an unweighted graph.
/// * `start`: the vertex the wave expands from.
/// * `opts`: hooks, cancellation, depth bound, neighbour filter.
///
/// # Returns
/// * [`Traversal`]: discovery order, depth map, parent map, visited set.
///
/// # Complexity
/// * Time: **O(|V| + |E|)**.
/// * Auxiliary space: **O(|V|)** beyond the entry snapshot.
///
/// # Example
/// ```
/// use graphwerk::graph::{Graph, Mode};
/// use graphwerk::traverse::{bfs, BfsOptions};
///
/// let g = Graph::new(Mode::empty());
/// g.add_edge("hub", "a", 0).unwrap();
/// g.add_edge("hub", "b", 0).unwrap();
/// g.add_edge("a", "c", 0).unwrap();
///
/// let t = bfs(&g, "hub", BfsOptions::new()).unwrap();
/// assert_eq!(t.depth["c"], 2);
/// assert_eq!(t.path_to("c").unwrap(), vec!["hub", "a", "c"]);
/// ```
pub fn bfs(graph: &Graph, start: &str, opts: BfsOptions<'_>) -> Result<Traversal> {
    if graph.mode().contains(Mode::WEIGHTED) {
        return Err(Error::ModeIncompatible(
            "bfs requires an unweighted graph; use dijkstra for weighted shortest paths",
        ));
    }
    let snapshot = graph.snapshot();
    if !snapshot.contains(start) {
        return Err(Error::UnknownVertex(start.to_owned()));
    }

    let BfsOptions {
        cancel,
        max_depth,
        mut on_enqueue,
        mut on_dequeue,
        mut on_visit,
        mut filter,
    } = opts;

    let mut out = Traversal::new(start);
    let mut queue: VecDeque<(String, usize)> = VecDeque::new();

    out.visited.insert(start.to_owned());
    out.depth.insert(start.to_owned(), 0);
    if let Some(hook) = on_enqueue.as_mut() {
        hook(start, 0);
    }
    queue.push_back((start.to_owned(), 0));

    while let Some((node, depth)) = queue.pop_front() {
        if cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            return Err(Error::Cancelled {
                partial: Box::new(out),
            });
        }
        if let Some(hook) = on_dequeue.as_mut() {
            hook(&node, depth);
        }
        out.order.push(node.clone());
        if let Some(hook) = on_visit.as_mut() {
            hook(&node, depth).map_err(|reason| Error::HookFailure {
                vertex: node.clone(),
                reason,
            })?;
        }

        let neighbours = snapshot
            .outgoing(&node)
            .map_err(|source| Error::NeighbourFetch {
                vertex: node.clone(),
                source: Box::new(source),
            })?;
        for (_, next) in neighbours {
            if let Some(f) = filter.as_mut() {
                if !f(&node, next) {
                    continue;
                }
            }
            if out.visited.contains(next) {
                continue;
            }
            if max_depth.is_some_and(|bound| depth + 1 > bound) {
                continue;
            }
            out.visited.insert(next.to_owned());
            out.depth.insert(next.to_owned(), depth + 1);
            out.parent.insert(next.to_owned(), node.clone());
            if let Some(hook) = on_enqueue.as_mut() {
                hook(next, depth + 1);
            }
            queue.push_back((next.to_owned(), depth + 1));
        }
    }

    Ok(out)
}
