//! `graphwerk` is a graph toolbox built around a concurrency-safe in-memory
//! store.
//!
//! The [`graph`] module provides a mode-flagged multigraph keyed by string
//! identifiers, safe to mutate from any thread and deterministic to iterate.
//! On top of it sit the [`traverse`] walkers (BFS and DFS with hooks,
//! cancellation, depth limits, and neighbour filtering) and the [`algo`]
//! routines: cycle enumeration with canonical deduplication, topological
//! sort, Dijkstra shortest paths, and Prim/Kruskal minimum spanning trees.
//!
//! Two further subsystems round the crate out: [`dtw`] aligns numeric
//! sequences by dynamic time warping under three memory regimes, and
//! [`matrix`] offers a dense row-major matrix with LU, QR, and inversion.
//! The [`build`] module composes deterministic synthetic graphs (topologies,
//! platonic solids, glyph skeletons) and sequences (pulses, chirps, OHLC
//! walks) from seeded configurations.
//!
//! # Example
//!
//! ```
//! use graphwerk::algo::{dijkstra, kruskal};
//! use graphwerk::build::{compose, BuildOptions, Constructor};
//! use graphwerk::graph::Mode;
//!
//! let g = compose(
//!     Mode::WEIGHTED,
//!     BuildOptions::new().seed(42),
//!     &[Constructor::Wheel(8)],
//! )
//! .unwrap();
//!
//! let tree = kruskal(&g).unwrap();
//! assert_eq!(tree.edges.len(), g.vertex_count() - 1);
//!
//! let paths = dijkstra(&g, "Center").unwrap();
//! assert!(paths.distance("v3").is_some());
//! ```
//!
//! # Errors and determinism
//!
//! Every fallible entry point returns the crate-wide [`Error`]; callers
//! branch on [`Error::kind`], never on message text. Determinism is a
//! contract throughout: vertices iterate lexicographically, edges in
//! insertion order, and seeded builder compositions reproduce byte-identical
//! emission.

pub mod algo;
pub mod build;
pub mod dtw;
pub mod error;
pub mod graph;
pub mod matrix;
pub mod traverse;

mod scored;
mod unionfind;

pub use error::{Error, ErrorKind, Result};

/// Commonly used items, re-exported for glob import.
pub mod prelude {
    pub use crate::algo::{detect_cycles, dijkstra, kruskal, prim, toposort};
    pub use crate::build::{compose, BuildOptions, Constructor};
    pub use crate::dtw::{dtw, DtwOptions, MemoryMode};
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::graph::{Edge, Graph, Mode};
    pub use crate::matrix::Matrix;
    pub use crate::traverse::{bfs, dfs, BfsOptions, CancelToken, DfsOptions, Traversal};
}
