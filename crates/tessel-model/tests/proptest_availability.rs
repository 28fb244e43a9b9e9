//! Property-based tests for topology and availability resolution.

use proptest::prelude::*;
use tessel_model::availability::{resolve, AvailabilityPolicy};
use tessel_model::{QubitLabel, Topology};

fn labels(n: usize) -> Vec<QubitLabel> {
    (0..n as u32).map(QubitLabel::Index).collect()
}

proptest! {
    /// Named geometries keep every edge endpoint inside the label set.
    #[test]
    fn geometry_edges_stay_in_label_set(
        n in 1_usize..=8,
        name_idx in 0_usize..4,
    ) {
        let name = ["line", "ring", "full", "star"][name_idx];
        let topo = Topology::common_graph(n, name, None).unwrap();
        prop_assert_eq!(topo.labels().len(), n);
        for (a, b) in topo.edges(true) {
            prop_assert!(topo.labels().contains(&a));
            prop_assert!(topo.labels().contains(&b));
        }
    }

    /// Placement counts match the combinatorial formulas.
    #[test]
    fn placement_counts(n in 2_usize..=7) {
        let labels = labels(n);
        let topo = Topology::common_graph(n, "line", None).unwrap();

        let singles = resolve("G1", 1, &AvailabilityPolicy::AllEdges, &labels, &topo).unwrap();
        prop_assert_eq!(singles.len(), n);

        let edges = resolve("G2", 2, &AvailabilityPolicy::AllEdges, &labels, &topo).unwrap();
        prop_assert_eq!(edges.len(), 2 * (n - 1));

        let combos =
            resolve("G2", 2, &AvailabilityPolicy::AllCombinations, &labels, &topo).unwrap();
        prop_assert_eq!(combos.len(), n * (n - 1) / 2);

        let perms =
            resolve("G2", 2, &AvailabilityPolicy::AllPermutations, &labels, &topo).unwrap();
        prop_assert_eq!(perms.len(), n * (n - 1));
    }

    /// Every resolved placement holds distinct, known labels.
    #[test]
    fn placements_are_distinct_and_known(n in 2_usize..=6) {
        let labels = labels(n);
        let topo = Topology::common_graph(n, "ring", None).unwrap();
        for policy in [
            AvailabilityPolicy::AllEdges,
            AvailabilityPolicy::AllCombinations,
            AvailabilityPolicy::AllPermutations,
        ] {
            let placements = resolve("G2", 2, &policy, &labels, &topo).unwrap();
            for t in placements {
                prop_assert_eq!(t.len(), 2);
                prop_assert!(t.labels()[0] != t.labels()[1]);
                prop_assert!(labels.contains(&t.labels()[0]));
                prop_assert!(labels.contains(&t.labels()[1]));
            }
        }
    }
}
