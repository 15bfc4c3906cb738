//! The concurrency-safe graph store.
//!
//! [`Graph`] is a labelled multigraph whose vertices are keyed by opaque
//! string identifiers. Behaviour is controlled by immutable [`Mode`] flags
//! fixed at construction: edge direction, weight observation, self-loops,
//! parallel edges, and per-edge direction overrides.
//!
//! All tables live behind a single readers–writers lock. Queries take the
//! read lock, mutations the write lock, and every iteration API returns an
//! independent snapshot so callers never iterate while holding the lock.
//!
//! Determinism contract: [`Graph::vertices`] yields identifiers in ascending
//! lexicographic order, [`Graph::edges`] and [`Graph::neighbours`] yield
//! edges in ascending edge-identifier order, and edge identifiers are
//! assigned in insertion order and never reused.

use std::collections::BTreeMap;

use bitflags::bitflags;
use parking_lot::RwLock;

use crate::error::{Error, Result};

bitflags! {
    /// Per-graph settings, immutable after construction.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Mode: u8 {
        /// Edges are ordered pairs.
        const DIRECTED = 0b0000_0001;
        /// Edge weights are observed; without this flag every stored weight
        /// is normalised to zero.
        const WEIGHTED = 0b0000_0010;
        /// Self-loops are permitted.
        const LOOPED = 0b0000_0100;
        /// Parallel edges between the same pair are permitted.
        const MULTI = 0b0000_1000;
        /// Individual edges may override the graph-level direction flag.
        const MIXED = 0b0001_0000;
    }
}

/// A single edge record.
///
/// The identifier is unique within the owning graph, assigned in insertion
/// order, and never reused. The `directed` flag mirrors the graph mode
/// except under [`Mode::MIXED`], where it may be overridden per edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub id: u64,
    pub from: String,
    pub to: String,
    pub weight: i64,
    pub directed: bool,
}

impl Edge {
    /// True if both endpoints are the same vertex.
    pub fn is_loop(&self) -> bool {
        self.from == self.to
    }

    /// The endpoint opposite `v`. For a self-loop this is `v` itself.
    pub fn other<'e>(&'e self, v: &str) -> &'e str {
        if self.from == v {
            &self.to
        } else {
            &self.from
        }
    }

    /// True if `v` is one of the endpoints.
    pub fn touches(&self, v: &str) -> bool {
        self.from == v || self.to == v
    }

    /// True if this edge connects `from` to `to`, honouring the edge's own
    /// direction flag: ordered match when directed, unordered otherwise.
    pub fn connects(&self, from: &str, to: &str) -> bool {
        if self.directed {
            self.from == from && self.to == to
        } else {
            (self.from == from && self.to == to) || (self.from == to && self.to == from)
        }
    }
}

#[derive(Debug, Clone, Default)]
struct VertexRecord {
    attrs: BTreeMap<String, String>,
    /// Incident edge identifiers, ascending. Insertion naturally appends in
    /// id order; removal preserves it.
    incident: Vec<u64>,
}

#[derive(Debug, Default)]
struct Tables {
    vertices: BTreeMap<String, VertexRecord>,
    edges: BTreeMap<u64, Edge>,
    next_edge_id: u64,
}

impl Tables {
    fn unlink(&mut self, edge_id: u64) {
        if let Some(edge) = self.edges.remove(&edge_id) {
            for endpoint in [&edge.from, &edge.to] {
                if let Some(rec) = self.vertices.get_mut(endpoint.as_str()) {
                    rec.incident.retain(|&id| id != edge_id);
                }
            }
        }
    }
}

/// A consistent copy of the graph tables, taken under the read lock once at
/// algorithm entry. Concurrent mutations after snapshot time are not
/// reflected.
#[derive(Debug, Clone)]
pub(crate) struct Snapshot {
    pub mode: Mode,
    pub vertices: BTreeMap<String, Vec<u64>>,
    pub edges: BTreeMap<u64, Edge>,
}

impl Snapshot {
    pub fn contains(&self, v: &str) -> bool {
        self.vertices.contains_key(v)
    }

    /// Incident edge ids of `v` in ascending order, or an `UnknownVertex`
    /// error.
    pub fn incident<'s>(&'s self, v: &str) -> Result<&'s [u64]> {
        self.vertices
            .get(v)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::UnknownVertex(v.to_owned()))
    }

    /// Edges leaving `v` in ascending edge-id order, paired with the far
    /// endpoint. Directed edges (graph-level or per-edge under mixed mode)
    /// are yielded in their native direction only; undirected edges are
    /// yielded from either endpoint. A self-loop yields `v` itself.
    pub fn outgoing<'s>(&'s self, v: &str) -> Result<Vec<(&'s Edge, &'s str)>> {
        let ids = self.incident(v)?;
        let mut out = Vec::with_capacity(ids.len());
        for id in ids {
            let edge = &self.edges[id];
            if edge.directed {
                if edge.from == v {
                    out.push((edge, edge.to.as_str()));
                }
            } else {
                out.push((edge, edge.other(v)));
            }
        }
        Ok(out)
    }
}

/// A mode-flagged multigraph with string vertex identifiers, safe to share
/// across threads.
///
/// ```
/// use graphwerk::graph::{Graph, Mode};
///
/// let g = Graph::new(Mode::WEIGHTED);
/// g.add_edge("A", "B", 4).unwrap();
/// g.add_edge("B", "C", 2).unwrap();
/// assert!(g.has_edge("B", "A")); // undirected: either direction
/// assert_eq!(g.vertices(), vec!["A", "B", "C"]);
/// ```
#[derive(Debug)]
pub struct Graph {
    mode: Mode,
    tables: RwLock<Tables>,
}

impl Graph {
    /// Create a fresh empty graph with the given mode flags.
    pub fn new(mode: Mode) -> Self {
        Graph {
            mode,
            tables: RwLock::new(Tables::default()),
        }
    }

    /// The mode flags fixed at construction.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_directed(&self) -> bool {
        self.mode.contains(Mode::DIRECTED)
    }

    pub fn is_weighted(&self) -> bool {
        self.mode.contains(Mode::WEIGHTED)
    }

    /// Insert a vertex. Succeeds whether the identifier is new or already
    /// present; an empty identifier is rejected.
    pub fn add_vertex(&self, id: &str) -> Result<()> {
        if id.is_empty() {
            return Err(Error::OptionViolation(
                "vertex identifier must be non-empty".into(),
            ));
        }
        let mut tables = self.tables.write();
        tables.vertices.entry(id.to_owned()).or_default();
        Ok(())
    }

    /// Insert a vertex carrying metadata. If the vertex already exists its
    /// metadata is replaced.
    pub fn add_vertex_with_attrs(&self, id: &str, attrs: BTreeMap<String, String>) -> Result<()> {
        if id.is_empty() {
            return Err(Error::OptionViolation(
                "vertex identifier must be non-empty".into(),
            ));
        }
        let mut tables = self.tables.write();
        tables.vertices.entry(id.to_owned()).or_default().attrs = attrs;
        Ok(())
    }

    /// Metadata attached to a vertex.
    pub fn vertex_attrs(&self, id: &str) -> Result<BTreeMap<String, String>> {
        let tables = self.tables.read();
        tables
            .vertices
            .get(id)
            .map(|rec| rec.attrs.clone())
            .ok_or_else(|| Error::UnknownVertex(id.to_owned()))
    }

    /// Remove a vertex and every incident edge. Removing an absent vertex is
    /// a no-op.
    pub fn remove_vertex(&self, id: &str) {
        let mut tables = self.tables.write();
        let Some(rec) = tables.vertices.remove(id) else {
            return;
        };
        for edge_id in rec.incident {
            tables.unlink(edge_id);
        }
    }

    pub fn has_vertex(&self, id: &str) -> bool {
        self.tables.read().vertices.contains_key(id)
    }

    /// Insert an edge, auto-inserting missing endpoints, and return its
    /// identifier.
    ///
    /// On an unweighted graph a non-zero weight is silently normalised to
    /// zero. Self-loops require [`Mode::LOOPED`]; a second edge between the
    /// same pair requires [`Mode::MULTI`].
    pub fn add_edge(&self, from: &str, to: &str, weight: i64) -> Result<u64> {
        self.add_edge_inner(from, to, weight, None)
    }

    /// Insert an edge whose direction overrides the graph-level flag.
    /// Requires [`Mode::MIXED`].
    pub fn add_edge_directed(
        &self,
        from: &str,
        to: &str,
        weight: i64,
        directed: bool,
    ) -> Result<u64> {
        self.add_edge_inner(from, to, weight, Some(directed))
    }

    fn add_edge_inner(
        &self,
        from: &str,
        to: &str,
        weight: i64,
        directed_override: Option<bool>,
    ) -> Result<u64> {
        if from.is_empty() || to.is_empty() {
            return Err(Error::OptionViolation(
                "vertex identifier must be non-empty".into(),
            ));
        }
        if directed_override.is_some() && !self.mode.contains(Mode::MIXED) {
            return Err(Error::ModeIncompatible(
                "per-edge direction override requires mixed-edges mode",
            ));
        }
        if from == to && !self.mode.contains(Mode::LOOPED) {
            return Err(Error::ModeIncompatible(
                "self-loops require the looped mode flag",
            ));
        }

        let directed = directed_override.unwrap_or(self.mode.contains(Mode::DIRECTED));
        let weight = if self.mode.contains(Mode::WEIGHTED) {
            weight
        } else {
            0
        };

        let mut tables = self.tables.write();
        if !self.mode.contains(Mode::MULTI) {
            let duplicate = tables
                .vertices
                .get(from)
                .map(|rec| {
                    rec.incident.iter().any(|id| {
                        let e = &tables.edges[id];
                        e.connects(from, to) || (!directed && e.connects(to, from))
                    })
                })
                .unwrap_or(false);
            if duplicate {
                return Err(Error::ModeIncompatible(
                    "parallel edges require the multigraph mode flag",
                ));
            }
        }

        let id = tables.next_edge_id;
        tables.next_edge_id += 1;
        tables.vertices.entry(from.to_owned()).or_default();
        tables.vertices.entry(to.to_owned()).or_default();
        tables.edges.insert(
            id,
            Edge {
                id,
                from: from.to_owned(),
                to: to.to_owned(),
                weight,
                directed,
            },
        );
        if let Some(rec) = tables.vertices.get_mut(from) {
            rec.incident.push(id);
        }
        if from != to {
            if let Some(rec) = tables.vertices.get_mut(to) {
                rec.incident.push(id);
            }
        }
        Ok(id)
    }

    /// Remove every edge between the pair. Directed edges match the ordered
    /// pair only; undirected edges match either orientation. Idempotent.
    pub fn remove_edge(&self, from: &str, to: &str) {
        let mut tables = self.tables.write();
        let doomed: Vec<u64> = tables
            .vertices
            .get(from)
            .map(|rec| {
                rec.incident
                    .iter()
                    .copied()
                    .filter(|id| tables.edges[id].connects(from, to))
                    .collect()
            })
            .unwrap_or_default();
        for id in doomed {
            tables.unlink(id);
        }
    }

    /// True if any edge connects `from` to `to`. For undirected edges either
    /// orientation matches.
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        let tables = self.tables.read();
        tables
            .vertices
            .get(from)
            .map(|rec| {
                rec.incident
                    .iter()
                    .any(|id| tables.edges[id].connects(from, to))
            })
            .unwrap_or(false)
    }

    /// Incident edges of a vertex in ascending edge-id order, as an
    /// independent snapshot.
    pub fn neighbours(&self, id: &str) -> Result<Vec<Edge>> {
        let tables = self.tables.read();
        let rec = tables
            .vertices
            .get(id)
            .ok_or_else(|| Error::UnknownVertex(id.to_owned()))?;
        Ok(rec
            .incident
            .iter()
            .map(|eid| tables.edges[eid].clone())
            .collect())
    }

    /// Number of incident edges (a self-loop counts once).
    pub fn degree(&self, id: &str) -> Result<usize> {
        let tables = self.tables.read();
        tables
            .vertices
            .get(id)
            .map(|rec| rec.incident.len())
            .ok_or_else(|| Error::UnknownVertex(id.to_owned()))
    }

    /// All vertex identifiers in ascending lexicographic order.
    pub fn vertices(&self) -> Vec<String> {
        self.tables.read().vertices.keys().cloned().collect()
    }

    /// All edges in ascending edge-id order.
    pub fn edges(&self) -> Vec<Edge> {
        self.tables.read().edges.values().cloned().collect()
    }

    pub fn vertex_count(&self) -> usize {
        self.tables.read().vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.tables.read().edges.len()
    }

    /// Drop every edge, keeping vertices and their metadata.
    pub fn clear_edges(&self) {
        let mut tables = self.tables.write();
        tables.edges.clear();
        for rec in tables.vertices.values_mut() {
            rec.incident.clear();
        }
    }

    /// Consistent copy of the tables for lock-free iteration inside
    /// algorithms.
    pub(crate) fn snapshot(&self) -> Snapshot {
        let tables = self.tables.read();
        Snapshot {
            mode: self.mode,
            vertices: tables
                .vertices
                .iter()
                .map(|(id, rec)| (id.clone(), rec.incident.clone()))
                .collect(),
            edges: tables.edges.clone(),
        }
    }
}

impl Clone for Graph {
    /// Deep copy: the clone owns disjoint tables and mutates independently.
    fn clone(&self) -> Self {
        let tables = self.tables.read();
        Graph {
            mode: self.mode,
            tables: RwLock::new(Tables {
                vertices: tables.vertices.clone(),
                edges: tables.edges.clone(),
                next_edge_id: tables.next_edge_id,
            }),
        }
    }
}
