//! Topology emitters. Each emits vertices first, then edges, in a fixed
//! order, so that a seeded composition is byte-identical across runs.

use hashbrown::HashSet;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

use super::{connect, Config, HexagramBase, PlatonicSolid, CENTER};
use crate::error::{Error, Result};
use crate::graph::{Graph, Mode};

fn option_violation<T>(message: impl Into<String>) -> Result<T> {
    Err(Error::OptionViolation(message.into()))
}

/// Ring `v0 — v1 — … — v(n-1) — v0`.
pub(super) fn cycle(graph: &Graph, cfg: &mut Config, n: usize) -> Result<()> {
    if n < 3 {
        return option_violation(format!("cycle size must be at least 3, got {n}"));
    }
    let names: Vec<String> = (0..n).map(|i| cfg.name(i)).collect();
    for name in &names {
        graph.add_vertex(name)?;
    }
    for i in 0..n {
        connect(graph, cfg, &names[i], &names[(i + 1) % n])?;
    }
    Ok(())
}

/// Chain `v0 — v1 — … — v(n-1)`.
pub(super) fn path(graph: &Graph, cfg: &mut Config, n: usize) -> Result<()> {
    if n < 2 {
        return option_violation(format!("path size must be at least 2, got {n}"));
    }
    let names: Vec<String> = (0..n).map(|i| cfg.name(i)).collect();
    for name in &names {
        graph.add_vertex(name)?;
    }
    for pair in names.windows(2) {
        connect(graph, cfg, &pair[0], &pair[1])?;
    }
    Ok(())
}

/// Hub plus `n - 1` leaves.
pub(super) fn star(graph: &Graph, cfg: &mut Config, n: usize) -> Result<()> {
    if n < 2 {
        return option_violation(format!("star size must be at least 2, got {n}"));
    }
    graph.add_vertex(CENTER)?;
    let leaves: Vec<String> = (0..n - 1).map(|i| cfg.name(i)).collect();
    for leaf in &leaves {
        graph.add_vertex(leaf)?;
    }
    for leaf in &leaves {
        connect(graph, cfg, CENTER, leaf)?;
    }
    Ok(())
}

/// Ring of `n - 1` vertices plus a hub spoked to each of them.
pub(super) fn wheel(graph: &Graph, cfg: &mut Config, n: usize) -> Result<()> {
    if n < 4 {
        return option_violation(format!("wheel size must be at least 4, got {n}"));
    }
    cycle(graph, cfg, n - 1)?;
    graph.add_vertex(CENTER)?;
    for i in 0..n - 1 {
        let rim = cfg.name(i);
        connect(graph, cfg, CENTER, &rim)?;
    }
    Ok(())
}

/// Clique over `n` vertices; edges in ascending `(i, j)` order.
pub(super) fn complete(graph: &Graph, cfg: &mut Config, n: usize) -> Result<()> {
    if n < 1 {
        return option_violation("complete graph needs at least 1 vertex".to_owned());
    }
    let names: Vec<String> = (0..n).map(|i| cfg.name(i)).collect();
    for name in &names {
        graph.add_vertex(name)?;
    }
    for i in 0..n {
        for j in i + 1..n {
            connect(graph, cfg, &names[i], &names[j])?;
        }
    }
    Ok(())
}

/// Every left-side vertex connected to every right-side vertex. Sides are
/// identified by the configured prefixes.
pub(super) fn bipartite(graph: &Graph, cfg: &mut Config, n1: usize, n2: usize) -> Result<()> {
    if n1 < 1 || n2 < 1 {
        return option_violation(format!(
            "bipartite sides must both be non-empty, got {n1} and {n2}"
        ));
    }
    let left: Vec<String> = (0..n1).map(|i| format!("{}{i}", cfg.left_prefix)).collect();
    let right: Vec<String> = (0..n2).map(|i| format!("{}{i}", cfg.right_prefix)).collect();
    for name in left.iter().chain(&right) {
        graph.add_vertex(name)?;
    }
    for l in &left {
        for r in &right {
            connect(graph, cfg, l, r)?;
        }
    }
    Ok(())
}

/// `rows × cols` lattice, identifiers `"r,c"`, 4-neighbourhood. Per cell,
/// the rightward edge is emitted before the downward one.
pub(super) fn grid(graph: &Graph, cfg: &mut Config, rows: usize, cols: usize) -> Result<()> {
    if rows < 1 || cols < 1 {
        return option_violation(format!(
            "grid dimensions must be positive, got {rows}x{cols}"
        ));
    }
    for r in 0..rows {
        for c in 0..cols {
            graph.add_vertex(&format!("{r},{c}"))?;
        }
    }
    for r in 0..rows {
        for c in 0..cols {
            let here = format!("{r},{c}");
            if c + 1 < cols {
                connect(graph, cfg, &here, &format!("{r},{}", c + 1))?;
            }
            if r + 1 < rows {
                connect(graph, cfg, &here, &format!("{},{c}", r + 1))?;
            }
        }
    }
    Ok(())
}

/// Independent Bernoulli trial over every unordered pair `(i, j)`, `i < j`.
pub(super) fn random_sparse(graph: &Graph, cfg: &mut Config, n: usize, p: f64) -> Result<()> {
    if n < 1 {
        return option_violation(format!("sparse graph needs at least 1 vertex, got {n}"));
    }
    if !(0.0..=1.0).contains(&p) {
        return option_violation(format!("edge probability must lie in [0, 1], got {p}"));
    }
    let interior = p > 0.0 && p < 1.0;
    if interior && cfg.rng.is_none() {
        return option_violation(
            "an interior edge probability requires a seeded random source".to_owned(),
        );
    }

    let names: Vec<String> = (0..n).map(|i| cfg.name(i)).collect();
    for name in &names {
        graph.add_vertex(name)?;
    }
    for i in 0..n {
        for j in i + 1..n {
            let emit = if interior {
                cfg.rng.as_mut().map(|rng| rng.gen_bool(p)).unwrap_or(false)
            } else {
                p == 1.0
            };
            if emit {
                connect(graph, cfg, &names[i], &names[j])?;
            }
        }
    }
    Ok(())
}

const STUB_RETRIES: usize = 100;

/// `d`-regular graph by stub matching: list every vertex `d` times, shuffle,
/// pair the list off, and retry on self-pairs or duplicate pairs.
pub(super) fn random_regular(graph: &Graph, cfg: &mut Config, n: usize, d: usize) -> Result<()> {
    if graph.mode().contains(Mode::DIRECTED) {
        return Err(Error::ModeIncompatible(
            "regular graphs are generated for undirected graphs only",
        ));
    }
    if n < 1 {
        return option_violation(format!("regular graph needs at least 1 vertex, got {n}"));
    }
    if d >= n {
        return option_violation(format!("degree {d} is infeasible over {n} vertices"));
    }
    if (n * d) % 2 != 0 {
        return option_violation(format!("n*d must be even, got n={n} d={d}"));
    }

    let names: Vec<String> = (0..n).map(|i| cfg.name(i)).collect();
    for name in &names {
        graph.add_vertex(name)?;
    }
    if d == 0 {
        return Ok(());
    }
    if cfg.rng.is_none() {
        return option_violation("stub matching requires a seeded random source".to_owned());
    }

    'attempt: for attempt in 0..STUB_RETRIES {
        let mut stubs: Vec<usize> = (0..n).flat_map(|v| std::iter::repeat(v).take(d)).collect();
        if let Some(rng) = cfg.rng.as_mut() {
            stubs.shuffle(rng);
        }

        let mut seen: HashSet<(usize, usize)> = HashSet::with_capacity(n * d / 2);
        let mut pairs: Vec<(usize, usize)> = Vec::with_capacity(n * d / 2);
        for chunk in stubs.chunks(2) {
            let (a, b) = (chunk[0], chunk[1]);
            if a == b {
                trace!(attempt, "stub matching drew a self-pair, retrying");
                continue 'attempt;
            }
            let key = (a.min(b), a.max(b));
            if !seen.insert(key) {
                trace!(attempt, "stub matching drew a duplicate pair, retrying");
                continue 'attempt;
            }
            pairs.push(key);
        }

        for (a, b) in pairs {
            connect(graph, cfg, &names[a], &names[b])?;
        }
        return Ok(());
    }
    option_violation(format!(
        "stub matching failed to produce a {d}-regular pairing within {STUB_RETRIES} attempts"
    ))
}

/// Canonical edge list of a platonic solid over the indices `0..n`.
fn solid_edges(solid: PlatonicSolid) -> (usize, Vec<(usize, usize)>) {
    match solid {
        PlatonicSolid::Tetrahedron => {
            (4, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)])
        }
        // vertices as binary corner coordinates; edges differ in one bit
        PlatonicSolid::Cube => (
            8,
            vec![
                (0, 1),
                (0, 2),
                (0, 4),
                (1, 3),
                (1, 5),
                (2, 3),
                (2, 6),
                (3, 7),
                (4, 5),
                (4, 6),
                (5, 7),
                (6, 7),
            ],
        ),
        // every pair except the three antipodal ones
        PlatonicSolid::Octahedron => (
            6,
            vec![
                (0, 1),
                (0, 2),
                (0, 3),
                (0, 4),
                (1, 2),
                (1, 3),
                (1, 5),
                (2, 4),
                (2, 5),
                (3, 4),
                (3, 5),
                (4, 5),
            ],
        ),
        // generalized Petersen graph GP(10, 2)
        PlatonicSolid::Dodecahedron => {
            let mut edges = Vec::with_capacity(30);
            for i in 0..10 {
                edges.push((i, (i + 1) % 10));
            }
            for i in 0..10 {
                edges.push((i, i + 10));
            }
            for i in 0..10 {
                edges.push((i + 10, (i + 2) % 10 + 10));
            }
            (20, edges)
        }
        // apex 0, upper ring 1..=5, lower ring 6..=10, apex 11
        PlatonicSolid::Icosahedron => {
            let mut edges = Vec::with_capacity(30);
            for i in 1..=5 {
                edges.push((0, i));
            }
            for i in 1..=5 {
                edges.push((i, i % 5 + 1));
            }
            for i in 1..=5 {
                edges.push((i, i + 5));
                edges.push((i, i % 5 + 6));
            }
            for i in 6..=10 {
                edges.push((i, (i - 5) % 5 + 6));
            }
            for i in 6..=10 {
                edges.push((i, 11));
            }
            (12, edges)
        }
    }
}

pub(super) fn platonic(
    graph: &Graph,
    cfg: &mut Config,
    solid: PlatonicSolid,
    with_centre: bool,
) -> Result<()> {
    let (count, edges) = solid_edges(solid);
    let names: Vec<String> = (0..count).map(|i| cfg.name(i)).collect();
    for name in &names {
        graph.add_vertex(name)?;
    }
    for (a, b) in edges {
        connect(graph, cfg, &names[a], &names[b])?;
    }
    if with_centre {
        graph.add_vertex(CENTER)?;
        for name in &names {
            connect(graph, cfg, CENTER, name)?;
        }
    }
    Ok(())
}

/// Two overlaid triangles (`0-2-4` and `1-3-5`) over the chosen base.
pub(super) fn hexagram(graph: &Graph, cfg: &mut Config, base: HexagramBase) -> Result<()> {
    match base {
        HexagramBase::Cycle => cycle(graph, cfg, 6)?,
        HexagramBase::Wheel => wheel(graph, cfg, 7)?,
    }
    for start in [0, 1] {
        for k in 0..3 {
            let a = cfg.name(start + 2 * k);
            let b = cfg.name(start + 2 * ((k + 1) % 3));
            connect(graph, cfg, &a, &b)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{compose, BuildOptions, Constructor};
    use crate::error::ErrorKind;

    fn build(ctor: Constructor) -> Graph {
        compose(Mode::empty(), BuildOptions::new().seed(1), &[ctor]).unwrap()
    }

    #[test]
    fn cycle_counts() {
        let g = build(Constructor::Cycle(5));
        assert_eq!(g.vertex_count(), 5);
        assert_eq!(g.edge_count(), 5);
        assert!(g.has_edge("v4", "v0"));
    }

    #[test]
    fn too_small_topologies_are_rejected() {
        for ctor in [
            Constructor::Cycle(2),
            Constructor::Path(1),
            Constructor::Star(1),
            Constructor::Wheel(3),
            Constructor::Complete(0),
            Constructor::CompleteBipartite(0, 2),
            Constructor::Grid { rows: 0, cols: 3 },
        ] {
            let err = compose(Mode::empty(), BuildOptions::new(), &[ctor]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::OptionViolation);
        }
    }

    #[test]
    fn star_has_a_center_hub() {
        let g = build(Constructor::Star(5));
        assert_eq!(g.vertex_count(), 5);
        assert_eq!(g.degree("Center").unwrap(), 4);
    }

    #[test]
    fn wheel_is_a_hubbed_cycle() {
        let g = build(Constructor::Wheel(6));
        assert_eq!(g.vertex_count(), 6);
        assert_eq!(g.edge_count(), 10);
        assert_eq!(g.degree("Center").unwrap(), 5);
        assert!(g.has_edge("v0", "v4"));
    }

    #[test]
    fn complete_has_all_pairs() {
        let g = build(Constructor::Complete(6));
        assert_eq!(g.edge_count(), 15);
    }

    #[test]
    fn bipartite_uses_the_configured_prefixes() {
        let g = compose(
            Mode::empty(),
            BuildOptions::new().bipartite_prefixes("Client", "Server"),
            &[Constructor::CompleteBipartite(2, 3)],
        )
        .unwrap();
        assert_eq!(g.vertex_count(), 5);
        assert_eq!(g.edge_count(), 6);
        assert!(g.has_edge("Client0", "Server2"));
        assert!(!g.has_edge("Client0", "Client1"));
    }

    #[test]
    fn grid_ids_and_neighbourhood() {
        let g = build(Constructor::Grid { rows: 2, cols: 3 });
        assert_eq!(g.vertex_count(), 6);
        assert_eq!(g.edge_count(), 7);
        assert!(g.has_edge("0,0", "0,1"));
        assert!(g.has_edge("0,0", "1,0"));
        assert!(!g.has_edge("0,0", "1,1"));
    }

    #[test]
    fn sparse_extremes_need_no_rng() {
        let none = compose(
            Mode::empty(),
            BuildOptions::new(),
            &[Constructor::RandomSparse { n: 5, p: 0.0 }],
        )
        .unwrap();
        assert_eq!(none.edge_count(), 0);
        let all = compose(
            Mode::empty(),
            BuildOptions::new(),
            &[Constructor::RandomSparse { n: 5, p: 1.0 }],
        )
        .unwrap();
        assert_eq!(all.edge_count(), 10);
    }

    #[test]
    fn sparse_interior_probability_requires_a_seed() {
        let err = compose(
            Mode::empty(),
            BuildOptions::new(),
            &[Constructor::RandomSparse { n: 5, p: 0.5 }],
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OptionViolation);
    }

    #[test]
    fn sparse_probability_is_validated() {
        let err = compose(
            Mode::empty(),
            BuildOptions::new().seed(1),
            &[Constructor::RandomSparse { n: 5, p: 1.5 }],
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OptionViolation);
    }

    #[test]
    fn regular_graph_has_uniform_degree() {
        let g = compose(
            Mode::empty(),
            BuildOptions::new().seed(42),
            &[Constructor::RandomRegular { n: 6, d: 2 }],
        )
        .unwrap();
        assert_eq!(g.edge_count(), 6);
        for v in g.vertices() {
            assert_eq!(g.degree(&v).unwrap(), 2);
        }
    }

    #[test]
    fn regular_graph_is_seed_deterministic() {
        let build = || {
            compose(
                Mode::empty(),
                BuildOptions::new().seed(42),
                &[Constructor::RandomRegular { n: 6, d: 2 }],
            )
            .unwrap()
        };
        let pairs = |g: &Graph| {
            g.edges()
                .into_iter()
                .map(|e| (e.from, e.to))
                .collect::<Vec<_>>()
        };
        assert_eq!(pairs(&build()), pairs(&build()));
    }

    #[test]
    fn regular_graph_validates_feasibility() {
        for (n, d) in [(4, 4), (5, 3)] {
            let err = compose(
                Mode::empty(),
                BuildOptions::new().seed(1),
                &[Constructor::RandomRegular { n, d }],
            )
            .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::OptionViolation);
        }
        let err = compose(
            Mode::DIRECTED,
            BuildOptions::new().seed(1),
            &[Constructor::RandomRegular { n: 6, d: 2 }],
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ModeIncompatible);
    }

    #[test]
    fn platonic_solids_have_canonical_sizes() {
        let expect = [
            (PlatonicSolid::Tetrahedron, 4, 6),
            (PlatonicSolid::Cube, 8, 12),
            (PlatonicSolid::Octahedron, 6, 12),
            (PlatonicSolid::Dodecahedron, 20, 30),
            (PlatonicSolid::Icosahedron, 12, 30),
        ];
        for (solid, vertices, edges) in expect {
            let g = build(Constructor::Platonic {
                solid,
                with_centre: false,
            });
            assert_eq!(g.vertex_count(), vertices, "{solid:?}");
            assert_eq!(g.edge_count(), edges, "{solid:?}");
        }
    }

    #[test]
    fn platonic_solids_are_regular() {
        let degrees = [
            (PlatonicSolid::Tetrahedron, 3),
            (PlatonicSolid::Cube, 3),
            (PlatonicSolid::Octahedron, 4),
            (PlatonicSolid::Dodecahedron, 3),
            (PlatonicSolid::Icosahedron, 5),
        ];
        for (solid, degree) in degrees {
            let g = build(Constructor::Platonic {
                solid,
                with_centre: false,
            });
            for v in g.vertices() {
                assert_eq!(g.degree(&v).unwrap(), degree, "{solid:?} vertex {v}");
            }
        }
    }

    #[test]
    fn centred_solid_gains_a_hub() {
        let g = build(Constructor::Platonic {
            solid: PlatonicSolid::Tetrahedron,
            with_centre: true,
        });
        assert_eq!(g.vertex_count(), 5);
        assert_eq!(g.edge_count(), 10);
        assert_eq!(g.degree(CENTER).unwrap(), 4);
    }

    #[test]
    fn hexagram_overlays_two_triangles() {
        let g = build(Constructor::Hexagram(HexagramBase::Cycle));
        assert_eq!(g.vertex_count(), 6);
        assert_eq!(g.edge_count(), 12);
        assert!(g.has_edge("v0", "v2"));
        assert!(g.has_edge("v1", "v5"));

        let g = build(Constructor::Hexagram(HexagramBase::Wheel));
        assert_eq!(g.vertex_count(), 7);
        assert_eq!(g.edge_count(), 18);
    }
}
