//! Property tests for the structural guarantees of built graphs.

use proptest::prelude::*;

use simgraph::build::neighbors;
use simgraph::{build, BuilderConfig, Mode, NodeId, PointCloud, SymmetrizePolicy};

// ============================================================================
// Strategies
// ============================================================================

fn arb_cloud() -> impl Strategy<Value = PointCloud> {
    (1usize..=3)
        .prop_flat_map(|dim| {
            prop::collection::vec(
                prop::collection::vec(-10.0f64..10.0, dim..=dim),
                2..10,
            )
        })
        .prop_map(|points| PointCloud::new(points).expect("strategy emits valid clouds"))
}

fn arb_cloud_and_k() -> impl Strategy<Value = (PointCloud, usize)> {
    arb_cloud().prop_flat_map(|cloud| {
        let n = cloud.len();
        (Just(cloud), 1..n)
    })
}

fn arb_policy() -> impl Strategy<Value = SymmetrizePolicy> {
    prop::sample::select(vec![
        SymmetrizePolicy::Maximum,
        SymmetrizePolicy::Average,
        SymmetrizePolicy::None,
    ])
}

// ============================================================================
// Invariants
// ============================================================================

proptest! {
    #[test]
    fn prop_diagonal_is_always_zero(
        (cloud, k) in arb_cloud_and_k(),
        policy in arb_policy(),
    ) {
        let config = BuilderConfig::knn(k).with_symmetrize(policy);
        let graph = build(&cloud, &config).unwrap();
        for i in 0..graph.node_count() {
            prop_assert_eq!(graph.weight(NodeId(i), NodeId(i)), 0.0);
        }
    }

    #[test]
    fn prop_symmetrized_graphs_are_symmetric(
        (cloud, k) in arb_cloud_and_k(),
        policy in prop::sample::select(vec![
            SymmetrizePolicy::Maximum,
            SymmetrizePolicy::Average,
        ]),
    ) {
        let config = BuilderConfig::knn(k).with_symmetrize(policy);
        let graph = build(&cloud, &config).unwrap();
        let n = graph.node_count();
        for i in 0..n {
            for j in 0..n {
                prop_assert_eq!(
                    graph.weight(NodeId(i), NodeId(j)),
                    graph.weight(NodeId(j), NodeId(i)),
                );
            }
        }
    }

    #[test]
    fn prop_stored_weights_lie_in_unit_interval(
        (cloud, k) in arb_cloud_and_k(),
        policy in arb_policy(),
        sigma in 0.1f64..10.0,
    ) {
        let config = BuilderConfig::knn(k).with_sigma(sigma).with_symmetrize(policy);
        let graph = build(&cloud, &config).unwrap();
        for (_, _, w) in graph.edge_list().iter() {
            prop_assert!(w.is_finite());
            prop_assert!(w > 0.0);
            prop_assert!(w <= 1.0);
        }
    }

    #[test]
    fn prop_build_is_deterministic(
        (cloud, k) in arb_cloud_and_k(),
        policy in arb_policy(),
        rescale in any::<bool>(),
    ) {
        let config = BuilderConfig::knn(k)
            .with_symmetrize(policy)
            .with_rescale(rescale);
        let a = build(&cloud, &config).unwrap();
        let b = build(&cloud, &config).unwrap();
        prop_assert_eq!(&a, &b);

        let list_a = a.edge_list();
        let list_b = b.edge_list();
        prop_assert_eq!(list_a.sources, list_b.sources);
        prop_assert_eq!(list_a.targets, list_b.targets);
        prop_assert_eq!(list_a.weights, list_b.weights);
    }

    #[test]
    fn prop_knn_candidate_out_degree_is_k((cloud, k) in arb_cloud_and_k()) {
        let rows = neighbors::candidates(&cloud, Mode::Knn { k });
        for row in &rows {
            prop_assert_eq!(row.len(), k);
        }
    }

    #[test]
    fn prop_radius_candidate_out_degree_counts_points_in_range(
        cloud in arb_cloud(),
        epsilon in 0.0f64..40.0,
    ) {
        let rows = neighbors::candidates(&cloud, Mode::Radius { epsilon });
        for (i, row) in rows.iter().enumerate() {
            let expected = (0..cloud.len())
                .filter(|&j| j != i && cloud.distance(i, j) <= epsilon)
                .count();
            prop_assert_eq!(row.len(), expected);
        }
    }

    #[test]
    fn prop_undirected_edge_list_has_each_pair_once(
        (cloud, k) in arb_cloud_and_k(),
    ) {
        let graph = build(&cloud, &BuilderConfig::knn(k)).unwrap();
        let list = graph.edge_list();
        let mut seen = std::collections::HashSet::new();
        for (s, t, _) in list.iter() {
            prop_assert!(s < t, "undirected edges are emitted with src < dst");
            prop_assert!(seen.insert((s, t)), "pair emitted twice");
        }
        prop_assert_eq!(list.len(), graph.edge_count());
    }
}
