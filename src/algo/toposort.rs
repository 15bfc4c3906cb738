//! Topological sort of a directed graph.

use hashbrown::HashMap;

use crate::error::{Error, Result};
use crate::graph::{Graph, Mode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Unvisited,
    InProgress,
    Finished,
}

enum Frame {
    Enter(String),
    Exit(String),
}

/// Order the vertices of a directed graph so that every edge points from an
/// earlier vertex to a later one.
///
/// Runs a depth-first search over all vertices in lexicographic order,
/// appending each vertex on its `Finished` transition and reversing the
/// post-order at the end; the result therefore contains every vertex. A
/// neighbour still `InProgress` is a back edge and aborts with
/// [`Error::CycleDetected`]. Undirected graphs are rejected.
///
/// # Complexity
/// * Time: **O(|V| + |E|)**.
/// * Auxiliary space: **O(|V|)** beyond the entry snapshot.
///
/// # Example
/// ```
/// use graphwerk::algo::toposort;
/// use graphwerk::graph::{Graph, Mode};
///
/// let g = Graph::new(Mode::DIRECTED);
/// g.add_edge("shirt", "jacket", 0).unwrap();
/// g.add_edge("trousers", "shoes", 0).unwrap();
/// g.add_edge("trousers", "jacket", 0).unwrap();
///
/// let order = toposort(&g).unwrap();
/// let pos = |v: &str| order.iter().position(|x| x == v).unwrap();
/// assert!(pos("shirt") < pos("jacket"));
/// assert!(pos("trousers") < pos("shoes"));
/// ```
pub fn toposort(graph: &Graph) -> Result<Vec<String>> {
    if !graph.mode().contains(Mode::DIRECTED) {
        return Err(Error::ModeIncompatible(
            "topological sort requires a directed graph",
        ));
    }
    let snapshot = graph.snapshot();

    let mut state: HashMap<String, State> = snapshot
        .vertices
        .keys()
        .map(|v| (v.clone(), State::Unvisited))
        .collect();
    let mut post_order: Vec<String> = Vec::with_capacity(snapshot.vertices.len());
    let mut stack: Vec<Frame> = Vec::new();

    for root in snapshot.vertices.keys() {
        if state[root.as_str()] != State::Unvisited {
            continue;
        }
        stack.push(Frame::Enter(root.clone()));

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(vertex) => {
                    if state[vertex.as_str()] != State::Unvisited {
                        continue;
                    }
                    state.insert(vertex.clone(), State::InProgress);

                    let mut pushes = Vec::new();
                    for (edge, next) in snapshot.outgoing(&vertex)? {
                        if edge.is_loop() {
                            // a self-loop is its own back edge
                            return Err(Error::CycleDetected(vertex));
                        }
                        match state[next] {
                            State::InProgress => {
                                return Err(Error::CycleDetected(next.to_owned()));
                            }
                            State::Unvisited => pushes.push(Frame::Enter(next.to_owned())),
                            State::Finished => {}
                        }
                    }
                    stack.push(Frame::Exit(vertex));
                    stack.extend(pushes.into_iter().rev());
                }
                Frame::Exit(vertex) => {
                    state.insert(vertex.clone(), State::Finished);
                    post_order.push(vertex);
                }
            }
        }
    }

    post_order.reverse();
    Ok(post_order)
}
