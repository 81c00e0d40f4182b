use proptest::prelude::*;
use remdkit::core::coordinates::{IncrementMode, ReplicaCoordinateSpace};
use remdkit::core::dimensions::dimension::Dimension;
use remdkit::core::dimensions::kind::DimensionKind;
use remdkit::core::dimensions::set::DimensionSet;
use remdkit::engine::groups::ExchangeGroupBuilder;
use remdkit::engine::resolver::{BaseParameters, ParameterResolver};
use std::collections::HashSet;
use std::path::PathBuf;

// --- STRATEGIES ---

// Up to four dimensions of distinct kinds, each with 1..=5 rungs.
prop_compose! {
    fn arb_sizes()(sizes in proptest::collection::vec(1usize..=5, 0..=4)) -> Vec<usize> {
        sizes
    }
}

fn build_set(sizes: &[usize]) -> DimensionSet {
    let kinds = [
        DimensionKind::Topology,
        DimensionKind::Temperature,
        DimensionKind::Ph,
        DimensionKind::AmdDihedral,
    ];
    let dimensions = sizes.iter().zip(kinds).map(|(&n, kind)| match kind {
        DimensionKind::Topology => Dimension::topology(
            (0..n).map(|i| PathBuf::from(format!("top{}.parm7", i))).collect(),
            None,
        ),
        DimensionKind::Temperature => {
            Dimension::temperature((0..n).map(|i| 300.0 + 5.0 * i as f64).collect())
        }
        DimensionKind::Ph => Dimension::ph((0..n).map(|i| 4.0 + 0.5 * i as f64).collect()),
        _ => Dimension::amd_dihedral(
            (0..n).map(|i| 10.0 * (i + 1) as f64).collect(),
            (0..n).map(|i| 1000.0 + i as f64).collect(),
        ),
    });
    DimensionSet::from_dimensions(dimensions.map(|d| d.unwrap())).unwrap()
}

proptest! {
    #[test]
    fn total_replicas_is_product_of_sizes(sizes in arb_sizes()) {
        let set = build_set(&sizes);
        prop_assert_eq!(set.total_replicas(), sizes.iter().product::<usize>());
    }

    #[test]
    fn odometer_numbering_is_a_bijection(sizes in arb_sizes()) {
        let set = build_set(&sizes);
        let space = ReplicaCoordinateSpace::new(&set, IncrementMode::Normal);
        let replicas = space.clone().enumerate();

        let distinct: HashSet<_> = replicas.iter().map(|r| r.coordinate.clone()).collect();
        prop_assert_eq!(distinct.len(), set.total_replicas());

        for replica in &replicas {
            let decoded = space.decode(replica.number).unwrap();
            prop_assert_eq!(&decoded, &replica.coordinate);
            prop_assert_eq!(space.encode(&decoded).unwrap(), replica.number);
        }
    }

    #[test]
    fn normal_mode_wraps_after_total_increments(sizes in arb_sizes()) {
        let set = build_set(&sizes);
        let mut space = ReplicaCoordinateSpace::new(&set, IncrementMode::Normal);
        let start = space.current().clone();
        for _ in 0..set.total_replicas() {
            space.increment();
        }
        prop_assert_eq!(space.current(), &start);
    }

    #[test]
    fn every_dimension_partitions_all_replicas(sizes in arb_sizes()) {
        let set = build_set(&sizes);
        let replicas = ReplicaCoordinateSpace::new(&set, IncrementMode::Normal).enumerate();
        let total = set.total_replicas();

        for table in ExchangeGroupBuilder::new(&set).build(&replicas) {
            let size = set.get(table.dimension).unwrap().size();
            prop_assert_eq!(table.groups.len(), total / size);

            let mut seen = HashSet::new();
            for group in &table.groups {
                for &member in &group.members {
                    prop_assert!(seen.insert(member), "replica {} grouped twice", member);
                }
            }
            prop_assert_eq!(seen, (1..=total).collect::<HashSet<_>>());
        }
    }

    #[test]
    fn group_members_share_their_reduced_key(sizes in arb_sizes()) {
        let set = build_set(&sizes);
        let replicas = ReplicaCoordinateSpace::new(&set, IncrementMode::Normal).enumerate();
        for table in ExchangeGroupBuilder::new(&set).build(&replicas) {
            for group in &table.groups {
                for &member in &group.members {
                    let coordinate = &replicas[member - 1].coordinate;
                    prop_assert_eq!(coordinate.reduced(table.dimension), group.key.clone());
                }
            }
        }
    }

    #[test]
    fn topology_index_determines_resolved_path(sizes in arb_sizes().prop_filter("needs a topology dimension", |s| !s.is_empty())) {
        let set = build_set(&sizes);
        let base = BaseParameters::default();
        let resolver = ParameterResolver::new(&set, &base);
        for replica in ReplicaCoordinateSpace::new(&set, IncrementMode::Normal).enumerate() {
            let record = resolver.resolve(&replica).unwrap().record;
            let expected = format!("top{}.parm7", replica.coordinate.index(0).unwrap());
            prop_assert_eq!(record.topology, PathBuf::from(expected));
        }
    }
}
