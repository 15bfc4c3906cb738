use super::{CancelToken, NeighbourFilter, Traversal, VisitHook};
use crate::error::{Error, Result};
use crate::graph::{Graph, Mode};

/// Options for [`dfs`]. All fields default to off.
#[derive(Default)]
pub struct DfsOptions<'a> {
    cancel: Option<CancelToken>,
    max_depth: Option<usize>,
    on_visit: Option<VisitHook<'a>>,
    on_exit: Option<VisitHook<'a>>,
    filter: Option<NeighbourFilter<'a>>,
    full_traversal: bool,
}

impl<'a> DfsOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe this token before every recursion step.
    pub fn cancel_token(mut self, token: &CancelToken) -> Self {
        self.cancel = Some(token.clone());
        self
    }

    /// Bound the traversal depth. Zero visits only the start vertex.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Called when a vertex is first entered; returning `Err` aborts the
    /// traversal and discards the order collected so far.
    pub fn on_visit(
        mut self,
        hook: impl FnMut(&str, usize) -> core::result::Result<(), String> + 'a,
    ) -> Self {
        self.on_visit = Some(Box::new(hook));
        self
    }

    /// Called when a vertex's subtree is exhausted, just before it is
    /// appended to the post-order.
    pub fn on_exit(
        mut self,
        hook: impl FnMut(&str, usize) -> core::result::Result<(), String> + 'a,
    ) -> Self {
        self.on_exit = Some(Box::new(hook));
        self
    }

    /// Skip neighbours for which the predicate returns `false`. Skips are
    /// counted in [`Traversal::filtered`].
    pub fn filter_neighbour(mut self, filter: impl FnMut(&str, &str) -> bool + 'a) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Traverse the whole forest: after the reachable component is
    /// exhausted, restart from every still-unvisited vertex in lexicographic
    /// order.
    pub fn full_traversal(mut self) -> Self {
        self.full_traversal = true;
        self
    }
}

enum Frame {
    Enter {
        vertex: String,
        depth: usize,
        parent: Option<String>,
        via: Option<u64>,
    },
    Exit {
        vertex: String,
        depth: usize,
    },
}

/// Depth-first traversal from `start`, yielding vertices in post-order.
///
/// The walker is iterative (explicit stack), so recursion depth is bounded
/// by heap memory rather than the call stack. Undirected edges are not
/// walked straight back to the vertex they were entered through, and
/// directed edges under mixed mode are followed in their native direction
/// only.
///
/// # Arguments
/// * `graph`: any graph.
/// * `start`: the root of the traversal (validated even under
///   [`DfsOptions::full_traversal`]).
/// * `opts`: hooks, cancellation, depth bound, neighbour filter, forest
///   mode.
///
/// # Returns
/// * [`Traversal`]: post-order, depth map, parent map, visited set.
///
/// # Complexity
/// * Time: **O(|V| + |E|)**.
/// * Auxiliary space: **O(|V|)** beyond the entry snapshot.
///
/// # Example
/// ```
/// use graphwerk::graph::{Graph, Mode};
/// use graphwerk::traverse::{dfs, DfsOptions};
///
/// let g = Graph::new(Mode::empty());
/// g.add_edge("A", "B", 0).unwrap();
/// g.add_edge("B", "C", 0).unwrap();
///
/// let t = dfs(&g, "A", DfsOptions::new()).unwrap();
/// assert_eq!(t.order, vec!["C", "B", "A"]);
/// ```
pub fn dfs(graph: &Graph, start: &str, opts: DfsOptions<'_>) -> Result<Traversal> {
    let snapshot = graph.snapshot();
    if !snapshot.contains(start) {
        return Err(Error::UnknownVertex(start.to_owned()));
    }

    let DfsOptions {
        cancel,
        max_depth,
        mut on_visit,
        mut on_exit,
        mut filter,
        full_traversal,
    } = opts;

    let roots: Vec<String> = if full_traversal {
        snapshot.vertices.keys().cloned().collect()
    } else {
        vec![start.to_owned()]
    };
    let allow_loops = snapshot.mode.contains(Mode::LOOPED);

    let mut out = Traversal::new(start);
    let mut stack: Vec<Frame> = Vec::new();

    for root in roots {
        if out.visited.contains(&root) {
            continue;
        }
        stack.push(Frame::Enter {
            vertex: root,
            depth: 0,
            parent: None,
            via: None,
        });

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter {
                    vertex,
                    depth,
                    parent,
                    via,
                } => {
                    if cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                        return Err(Error::Cancelled {
                            partial: Box::new(out),
                        });
                    }
                    if out.visited.contains(&vertex) {
                        continue;
                    }
                    if max_depth.is_some_and(|bound| depth > bound) {
                        continue;
                    }

                    out.visited.insert(vertex.clone());
                    out.depth.insert(vertex.clone(), depth);
                    if let Some(p) = parent {
                        out.parent.insert(vertex.clone(), p);
                    }
                    if let Some(hook) = on_visit.as_mut() {
                        if let Err(reason) = hook(&vertex, depth) {
                            out.order.clear();
                            return Err(Error::HookFailure { vertex, reason });
                        }
                    }

                    let neighbours =
                        snapshot
                            .outgoing(&vertex)
                            .map_err(|source| Error::NeighbourFetch {
                                vertex: vertex.clone(),
                                source: Box::new(source),
                            })?;
                    let mut pushes = Vec::new();
                    for (edge, next) in neighbours {
                        // no trivial backtrack over the edge we arrived through
                        if !edge.directed && via == Some(edge.id) {
                            continue;
                        }
                        if edge.is_loop() && !allow_loops {
                            continue;
                        }
                        if let Some(f) = filter.as_mut() {
                            if !f(&vertex, next) {
                                out.filtered += 1;
                                continue;
                            }
                        }
                        if out.visited.contains(next) {
                            continue;
                        }
                        pushes.push(Frame::Enter {
                            vertex: next.to_owned(),
                            depth: depth + 1,
                            parent: Some(vertex.clone()),
                            via: Some(edge.id),
                        });
                    }
                    stack.push(Frame::Exit {
                        vertex,
                        depth,
                    });
                    // reversed so the lowest edge id is explored first
                    stack.extend(pushes.into_iter().rev());
                }
                Frame::Exit { vertex, depth } => {
                    if let Some(hook) = on_exit.as_mut() {
                        if let Err(reason) = hook(&vertex, depth) {
                            return Err(Error::HookFailure { vertex, reason });
                        }
                    }
                    out.order.push(vertex);
                }
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn chain() -> Graph {
        let g = Graph::new(Mode::empty());
        g.add_edge("A", "B", 0).unwrap();
        g.add_edge("B", "C", 0).unwrap();
        g.add_edge("C", "D", 0).unwrap();
        g
    }

    #[test]
    fn post_order_on_a_chain() {
        let t = dfs(&chain(), "A", DfsOptions::new()).unwrap();
        assert_eq!(t.order, vec!["D", "C", "B", "A"]);
        assert_eq!(t.depth["D"], 3);
        assert_eq!(t.parent["C"], "B");
    }

    #[test]
    fn children_explored_in_edge_id_order() {
        let g = Graph::new(Mode::empty());
        g.add_edge("A", "C", 0).unwrap();
        g.add_edge("A", "B", 0).unwrap();
        let t = dfs(&g, "A", DfsOptions::new()).unwrap();
        // edge to C was inserted first, so C's subtree finishes first
        assert_eq!(t.order, vec!["C", "B", "A"]);
    }

    #[test]
    fn unknown_start_is_rejected() {
        assert_eq!(
            dfs(&chain(), "Z", DfsOptions::new()).unwrap_err().kind(),
            ErrorKind::UnknownVertex
        );
    }

    #[test]
    fn depth_bound_prunes_deeper_vertices() {
        let t = dfs(&chain(), "A", DfsOptions::new().max_depth(1)).unwrap();
        assert_eq!(t.order, vec!["B", "A"]);
        assert!(!t.reached("C"));
    }

    #[test]
    fn full_traversal_covers_every_component() {
        let g = Graph::new(Mode::empty());
        g.add_edge("A", "B", 0).unwrap();
        g.add_edge("X", "Y", 0).unwrap();
        let t = dfs(&g, "A", DfsOptions::new().full_traversal()).unwrap();
        assert_eq!(t.order, vec!["B", "A", "Y", "X"]);
        assert_eq!(t.depth["X"], 0);
        assert!(t.parent.get("X").is_none());
    }

    #[test]
    fn filtered_neighbours_are_counted() {
        let t = dfs(
            &chain(),
            "A",
            DfsOptions::new().filter_neighbour(|_, next| next != "C"),
        )
        .unwrap();
        assert_eq!(t.order, vec!["B", "A"]);
        assert_eq!(t.filtered, 1);
    }

    #[test]
    fn visit_hook_failure_aborts() {
        let err = dfs(
            &chain(),
            "A",
            DfsOptions::new().on_visit(|v, _| {
                if v == "B" {
                    Err("no thanks".into())
                } else {
                    Ok(())
                }
            }),
        )
        .unwrap_err();
        match err {
            Error::HookFailure { vertex, .. } => assert_eq!(vertex, "B"),
            other => panic!("expected hook failure, got {other:?}"),
        }
    }

    #[test]
    fn exit_hook_sees_post_order() {
        let mut exits = Vec::new();
        dfs(
            &chain(),
            "A",
            DfsOptions::new().on_exit(|v, _| {
                exits.push(v.to_owned());
                Ok(())
            }),
        )
        .unwrap();
        assert_eq!(exits, vec!["D", "C", "B", "A"]);
    }

    #[test]
    fn cancellation_returns_partial_result() {
        let token = CancelToken::new();
        let trigger = token.clone();
        let err = dfs(
            &chain(),
            "A",
            DfsOptions::new().cancel_token(&token).on_visit(move |v, _| {
                if v == "B" {
                    trigger.cancel();
                }
                Ok(())
            }),
        )
        .unwrap_err();
        match err {
            Error::Cancelled { partial } => {
                assert!(partial.visited.contains("B"));
                assert!(!partial.visited.contains("C"));
            }
            other => panic!("expected cancellation, got {other:?}"),
        }
    }

    #[test]
    fn directed_edges_are_not_walked_backwards() {
        let g = Graph::new(Mode::DIRECTED);
        g.add_edge("A", "B", 0).unwrap();
        g.add_edge("C", "B", 0).unwrap();
        let t = dfs(&g, "A", DfsOptions::new()).unwrap();
        assert!(!t.reached("C"));
    }
}
