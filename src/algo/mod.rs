//! Graph algorithms: cycle enumeration, topological sort, Dijkstra shortest
//! paths, and minimum spanning trees.
//!
//! Every algorithm takes a read snapshot of the graph at entry and never
//! mutates it; running several concurrently against one graph is safe.

mod cycles;
mod dijkstra;
mod mst;
mod toposort;

pub use cycles::detect_cycles;
pub use dijkstra::{dijkstra, ShortestPaths, INFINITY};
pub use mst::{kruskal, prim, SpanningTree};
pub use toposort::toposort;
