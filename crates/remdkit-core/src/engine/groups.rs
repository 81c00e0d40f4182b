use crate::core::coordinates::Replica;
use crate::core::dimensions::kind::{DimensionKind, ExchangeProtocol};
use crate::core::dimensions::set::DimensionSet;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Replicas that differ only along one dimension and may attempt exchanges with
/// each other along it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExchangeGroup {
    /// Position of the exchange dimension in the `DimensionSet`.
    pub dimension: usize,
    /// The shared coordinate with the exchange dimension's index removed.
    pub key: Vec<usize>,
    /// 1-based replica numbers, in enumeration order.
    pub members: Vec<usize>,
}

/// The complete group table of one dimension, ready for serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionGroups {
    pub dimension: usize,
    pub kind: DimensionKind,
    pub protocol: ExchangeProtocol,
    pub description: String,
    pub groups: Vec<ExchangeGroup>,
}

impl DimensionGroups {
    pub fn member_count(&self) -> usize {
        self.groups.iter().map(|g| g.members.len()).sum()
    }
}

/// Partitions a full replica assignment into exchange groups, per dimension.
///
/// Groups are keyed by the reduced coordinate and emitted in lexicographic
/// order of that key (position 0 most significant). Consumers number groups by
/// their position in this order, so it must stay stable across runs.
pub struct ExchangeGroupBuilder<'a> {
    set: &'a DimensionSet,
}

impl<'a> ExchangeGroupBuilder<'a> {
    pub fn new(set: &'a DimensionSet) -> Self {
        Self { set }
    }

    /// Builds the group table for every dimension, in dimension order.
    ///
    /// `replicas` must be the complete assignment; every coordinate must have
    /// one index per dimension of the set.
    #[instrument(skip_all, name = "exchange_group_builder", fields(replicas = replicas.len()))]
    pub fn build(&self, replicas: &[Replica]) -> Vec<DimensionGroups> {
        (0..self.set.len())
            .map(|position| self.build_dimension(position, replicas))
            .collect()
    }

    pub fn build_dimension(&self, position: usize, replicas: &[Replica]) -> DimensionGroups {
        let dimension = self
            .set
            .get(position)
            .unwrap_or_else(|| panic!("dimension position {} is outside the set", position));

        let mut table: BTreeMap<Vec<usize>, Vec<usize>> = BTreeMap::new();
        for replica in replicas {
            assert_eq!(
                replica.coordinate.len(),
                self.set.len(),
                "replica {} has coordinate {} but the set has {} dimensions",
                replica.number,
                replica.coordinate,
                self.set.len()
            );
            table
                .entry(replica.coordinate.reduced(position))
                .or_default()
                .push(replica.number);
        }

        let groups: Vec<ExchangeGroup> = table
            .into_iter()
            .map(|(key, members)| ExchangeGroup {
                dimension: position,
                key,
                members,
            })
            .collect();

        debug!(
            "Dimension {} ({}): {} group(s) over {} replica(s).",
            position,
            dimension.kind(),
            groups.len(),
            replicas.len()
        );

        DimensionGroups {
            dimension: position,
            kind: dimension.kind(),
            protocol: dimension.exchange_protocol(),
            description: dimension.description().to_string(),
            groups,
        }
    }
}
