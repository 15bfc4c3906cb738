use graphwerk::algo::{kruskal, prim};
use graphwerk::dtw::{dtw, DtwOptions};
use graphwerk::graph::{Graph, Mode};
use graphwerk::traverse::{bfs, BfsOptions};
use proptest::prelude::*;

const N: usize = 6;

fn vertex_name(i: usize) -> String {
    format!("v{i}")
}

/// Arbitrary undirected multigraph over `N` vertices as an edge list.
fn edge_list() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0..N, 0..N).prop_filter("no loops", |(a, b)| a != b), 0..20)
}

proptest! {
    #[test]
    fn bfs_depths_step_by_one(edges in edge_list()) {
        let g = Graph::new(Mode::MULTI);
        for i in 0..N {
            g.add_vertex(&vertex_name(i)).unwrap();
        }
        for (a, b) in edges {
            g.add_edge(&vertex_name(a), &vertex_name(b), 0).unwrap();
        }

        let t = bfs(&g, "v0", BfsOptions::new()).unwrap();
        for v in t.visited.iter() {
            if v == t.start() {
                prop_assert_eq!(t.depth[v.as_str()], 0);
            } else {
                let p = &t.parent[v.as_str()];
                prop_assert!(g.has_edge(p, v));
                prop_assert_eq!(t.depth[v.as_str()], t.depth[p.as_str()] + 1);
            }
        }
    }

    #[test]
    fn prim_and_kruskal_totals_agree(
        extra in edge_list(),
        weights in prop::collection::vec(1i64..50, 30),
    ) {
        // spanning chain first so the graph is connected, then extras
        let g = Graph::new(Mode::WEIGHTED | Mode::MULTI);
        let mut draw = weights.into_iter().cycle();
        for i in 0..N - 1 {
            g.add_edge(&vertex_name(i), &vertex_name(i + 1), draw.next().unwrap())
                .unwrap();
        }
        for (a, b) in extra {
            g.add_edge(&vertex_name(a), &vertex_name(b), draw.next().unwrap())
                .unwrap();
        }

        let k = kruskal(&g).unwrap();
        let p = prim(&g, "v0").unwrap();
        prop_assert_eq!(k.total_weight(), p.total_weight());
        prop_assert_eq!(k.edges.len(), N - 1);
        prop_assert_eq!(p.edges.len(), N - 1);
    }

    #[test]
    fn dtw_is_symmetric_under_symmetric_options(
        a in prop::collection::vec(-10.0f64..10.0, 1..12),
        b in prop::collection::vec(-10.0f64..10.0, 1..12),
        penalty in 0.0f64..2.0,
    ) {
        let opts = DtwOptions::new().slope_penalty(penalty);
        let ab = dtw(&a, &b, &opts).unwrap().distance;
        let ba = dtw(&b, &a, &opts).unwrap().distance;
        prop_assert!((ab - ba).abs() <= 1e-9);
    }

    #[test]
    fn dtw_self_alignment_is_free(
        a in prop::collection::vec(-10.0f64..10.0, 1..12),
    ) {
        let out = dtw(&a, &a, &DtwOptions::new()).unwrap();
        prop_assert!(out.distance.abs() <= 1e-12);
    }

    #[test]
    fn neighbours_always_touch_their_vertex(edges in edge_list()) {
        let g = Graph::new(Mode::MULTI);
        for i in 0..N {
            g.add_vertex(&vertex_name(i)).unwrap();
        }
        for (a, b) in edges {
            g.add_edge(&vertex_name(a), &vertex_name(b), 0).unwrap();
        }
        for v in g.vertices() {
            for edge in g.neighbours(&v).unwrap() {
                prop_assert!(edge.touches(&v));
            }
        }
    }
}
