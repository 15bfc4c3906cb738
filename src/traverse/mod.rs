//! Graph traversal: breadth-first and depth-first walkers with pluggable
//! observation hooks, cooperative cancellation, depth limits, and neighbour
//! filtering.
//!
//! Both walkers take a read snapshot of the graph at entry and never mutate
//! it, so any number of traversals may run concurrently against the same
//! graph.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use hashbrown::HashMap;
use indexmap::IndexSet;

use crate::error::{Error, Result};

mod bfs;
mod dfs;

pub use bfs::{bfs, BfsOptions};
pub use dfs::{dfs, DfsOptions};

/// A cooperative cancellation signal.
///
/// Cloning is cheap; all clones observe the same flag. Traversals check the
/// token before every dequeue (BFS) or recursion step (DFS) and surface
/// [`Error::Cancelled`] carrying the partial result.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the signal. Irrevocable.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Hook invoked when a vertex is enqueued or dequeued (BFS only).
pub type ObserveHook<'a> = Box<dyn FnMut(&str, usize) + 'a>;

/// Fallible hook invoked on visit or exit. A returned `Err` aborts the
/// traversal, surfaced as [`Error::HookFailure`] wrapped with the vertex
/// identifier.
pub type VisitHook<'a> = Box<dyn FnMut(&str, usize) -> core::result::Result<(), String> + 'a>;

/// Neighbour predicate: `(current, neighbour)` pairs for which it returns
/// `false` are skipped. Invoked exactly once per pair seen by the traversal.
pub type NeighbourFilter<'a> = Box<dyn FnMut(&str, &str) -> bool + 'a>;

/// The outcome of a traversal.
///
/// `order` is discovery order for BFS and post-order for DFS. `depth` and
/// `parent` describe the traversal tree; the start vertex has depth zero and
/// no parent. `visited` preserves discovery order.
#[derive(Debug, Clone, Default)]
pub struct Traversal {
    start: String,
    pub order: Vec<String>,
    pub depth: HashMap<String, usize>,
    pub parent: HashMap<String, String>,
    pub visited: IndexSet<String>,
    /// Neighbours suppressed by the filter (DFS diagnostics).
    pub filtered: usize,
}

impl Traversal {
    pub(crate) fn new(start: &str) -> Self {
        Traversal {
            start: start.to_owned(),
            ..Default::default()
        }
    }

    /// The start vertex this traversal ran from.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// True if the traversal reached `id`.
    pub fn reached(&self, id: &str) -> bool {
        self.visited.contains(id)
    }

    /// Reconstruct the vertex sequence from the start to `dest` by walking
    /// the parent map backwards. Fails with `UnknownVertex` if `dest` was
    /// never reached.
    pub fn path_to(&self, dest: &str) -> Result<Vec<String>> {
        if !self.visited.contains(dest) {
            return Err(Error::UnknownVertex(dest.to_owned()));
        }
        let mut path = vec![dest.to_owned()];
        let mut cursor = dest;
        while cursor != self.start {
            let Some(prev) = self.parent.get(cursor) else {
                // parent chain broken: dest sits in another traversal tree
                return Err(Error::UnknownVertex(dest.to_owned()));
            };
            path.push(prev.clone());
            cursor = prev;
        }
        path.reverse();
        Ok(path)
    }
}
