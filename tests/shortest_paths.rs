use graphwerk::algo::{dijkstra, INFINITY};
use graphwerk::build::{compose, BuildOptions, Constructor};
use graphwerk::graph::{Graph, Mode};

#[test]
fn directed_weighted_seed_graph() {
    let g = Graph::new(Mode::DIRECTED | Mode::WEIGHTED);
    g.add_edge("A", "B", 4).unwrap();
    g.add_edge("A", "C", 2).unwrap();
    g.add_edge("C", "B", 1).unwrap();
    g.add_edge("B", "D", 5).unwrap();

    let paths = dijkstra(&g, "A").unwrap();
    assert_eq!(paths.distance("A"), Some(0));
    assert_eq!(paths.distance("B"), Some(3));
    assert_eq!(paths.distance("C"), Some(2));
    assert_eq!(paths.distance("D"), Some(8));
    assert_eq!(paths.parent["B"], "C");
    assert_eq!(paths.parent["C"], "A");
    assert_eq!(paths.parent["D"], "B");
}

#[test]
fn tree_distances_decompose_along_parents() {
    let g = compose(
        Mode::WEIGHTED,
        BuildOptions::new().seed(2024),
        &[Constructor::Complete(7)],
    )
    .unwrap();
    let paths = dijkstra(&g, "v0").unwrap();
    for (v, &d) in &paths.dist {
        if d == INFINITY || v == "v0" {
            continue;
        }
        let p = &paths.parent[v.as_str()];
        let step = g
            .neighbours(v)
            .unwrap()
            .into_iter()
            .filter(|e| e.touches(p))
            .map(|e| e.weight)
            .min()
            .unwrap();
        assert_eq!(d, paths.dist[p.as_str()] + step);
    }
}

#[test]
fn grid_corner_to_corner_on_unit_weights() {
    let g = compose(
        Mode::WEIGHTED,
        BuildOptions::new().seed(9).weight_generator(|_| 1),
        &[Constructor::Grid { rows: 3, cols: 4 }],
    )
    .unwrap();
    let paths = dijkstra(&g, "0,0").unwrap();
    // manhattan distance on a unit grid
    assert_eq!(paths.distance("2,3"), Some(5));
    let walk = paths.path_to("2,3").unwrap();
    assert_eq!(walk.len(), 6);
    assert_eq!(walk.first().map(String::as_str), Some("0,0"));
    assert_eq!(walk.last().map(String::as_str), Some("2,3"));
}
