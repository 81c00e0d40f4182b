use super::dimensions::set::DimensionSet;
use super::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A replica's position in the exchange space: one ladder index per dimension,
/// in `DimensionSet` order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ReplicaCoordinate(Vec<usize>);

impl ReplicaCoordinate {
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    pub fn zeros(dimensions: usize) -> Self {
        Self(vec![0; dimensions])
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn index(&self, position: usize) -> Option<usize> {
        self.0.get(position).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The coordinate with the index at `position` removed.
    ///
    /// Replicas sharing a reduced key along a dimension differ only in that
    /// dimension and therefore form one exchange group.
    pub fn reduced(&self, position: usize) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter(|&(d, _)| d != position)
            .map(|(_, &i)| i)
            .collect()
    }
}

impl From<Vec<usize>> for ReplicaCoordinate {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for ReplicaCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", index)?;
        }
        write!(f, ")")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replica {
    pub number: usize, // 1-based replica number
    pub coordinate: ReplicaCoordinate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncrementMode {
    /// Mixed-radix counting, dimension 0 fastest; visits every coordinate once.
    #[default]
    Normal,
    /// Every index advances together modulo its own size, without carries.
    Diagonal,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid increment mode '{0}'. Expected 'normal' or 'diagonal'.")]
pub struct ParseIncrementModeError(pub String);

impl FromStr for IncrementMode {
    type Err = ParseIncrementModeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" | "odometer" => Ok(Self::Normal),
            "diagonal" => Ok(Self::Diagonal),
            _ => Err(ParseIncrementModeError(s.to_string())),
        }
    }
}

impl fmt::Display for IncrementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Normal => "normal",
            Self::Diagonal => "diagonal",
        })
    }
}

/// The odometer over a replica space.
///
/// Holds one mutable coordinate, starting at all zeros, that [`increment`]
/// advances in place. The space does not bound the number of increments; a
/// full pass assigns replica 1 to the zero coordinate and then increments
/// exactly `total() - 1` times (see [`enumerate`]). Because the coordinate is
/// mutated in place, one space serves exactly one sequential consumer.
///
/// [`increment`]: ReplicaCoordinateSpace::increment
/// [`enumerate`]: ReplicaCoordinateSpace::enumerate
#[derive(Debug, Clone)]
pub struct ReplicaCoordinateSpace {
    sizes: Vec<usize>,
    total: usize,
    current: ReplicaCoordinate,
    mode: IncrementMode,
}

impl ReplicaCoordinateSpace {
    pub fn new(set: &DimensionSet, mode: IncrementMode) -> Self {
        Self::with_total(set.sizes(), set.total_replicas(), mode)
    }

    /// Builds a space directly from ladder sizes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::ReplicaSpaceOverflow`] if the product of
    /// `sizes` does not fit in a `usize`.
    pub fn from_sizes(sizes: Vec<usize>, mode: IncrementMode) -> Result<Self, ConfigurationError> {
        let total = sizes
            .iter()
            .try_fold(1usize, |acc, &s| acc.checked_mul(s))
            .ok_or_else(|| ConfigurationError::ReplicaSpaceOverflow {
                sizes: sizes.clone(),
            })?;
        Ok(Self::with_total(sizes, total, mode))
    }

    fn with_total(sizes: Vec<usize>, total: usize, mode: IncrementMode) -> Self {
        debug_assert!(sizes.iter().all(|&s| s > 0), "dimension sizes must be positive");
        let current = ReplicaCoordinate::zeros(sizes.len());
        Self {
            sizes,
            total,
            current,
            mode,
        }
    }

    pub fn mode(&self) -> IncrementMode {
        self.mode
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn current(&self) -> &ReplicaCoordinate {
        &self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn reset(&mut self) {
        self.current = ReplicaCoordinate::zeros(self.sizes.len());
    }

    pub fn increment(&mut self) -> &ReplicaCoordinate {
        match self.mode {
            IncrementMode::Normal => self.increment_normal(),
            IncrementMode::Diagonal => self.increment_diagonal(),
        }
        &self.current
    }

    fn increment_normal(&mut self) {
        let n = self.sizes.len();
        if n == 0 {
            return;
        }
        let indices = &mut self.current.0;
        indices[0] += 1;
        // Ascending scan: a carry into d + 1 is caught on the next iteration.
        for d in 0..n - 1 {
            if indices[d] == self.sizes[d] {
                indices[d] = 0;
                indices[d + 1] += 1;
            }
        }
        if indices[n - 1] == self.sizes[n - 1] {
            indices[n - 1] = 0;
        }
    }

    fn increment_diagonal(&mut self) {
        for (index, &size) in self.current.0.iter_mut().zip(&self.sizes) {
            *index = (*index + 1) % size;
        }
    }

    /// Runs one full enumeration pass from the zero coordinate.
    ///
    /// Replica 1 receives the zero coordinate and each following replica the
    /// coordinate produced by one more increment, for `total()` replicas. In
    /// normal mode this visits every coordinate exactly once; in diagonal mode
    /// coordinates repeat with the period of the ladder sizes.
    pub fn enumerate(mut self) -> Vec<Replica> {
        self.reset();
        let total = self.total();
        let mut replicas = Vec::with_capacity(total);
        replicas.push(Replica {
            number: 1,
            coordinate: self.current.clone(),
        });
        for number in 2..=total {
            let coordinate = self.increment().clone();
            replicas.push(Replica { number, coordinate });
        }
        replicas
    }

    /// The replica number of `coordinate` under normal (odometer) ordering.
    pub fn encode(&self, coordinate: &ReplicaCoordinate) -> Result<usize, ConfigurationError> {
        if coordinate.len() != self.sizes.len()
            || coordinate
                .indices()
                .iter()
                .zip(&self.sizes)
                .any(|(&i, &s)| i >= s)
        {
            return Err(ConfigurationError::CoordinateOutOfRange {
                coordinate: coordinate.to_string(),
                sizes: self.sizes.clone(),
            });
        }
        // Every in-range coordinate encodes below `total`, so no step overflows.
        let mut number = 0usize;
        let mut stride = 1usize;
        for (&index, &size) in coordinate.indices().iter().zip(&self.sizes) {
            number += index * stride;
            stride *= size;
        }
        Ok(number + 1)
    }

    /// The coordinate of replica `number` under normal (odometer) ordering.
    pub fn decode(&self, number: usize) -> Result<ReplicaCoordinate, ConfigurationError> {
        let total = self.total();
        if number == 0 || number > total {
            return Err(ConfigurationError::ReplicaOutOfRange { number, total });
        }
        let mut remainder = number - 1;
        let indices = self
            .sizes
            .iter()
            .map(|&size| {
                let index = remainder % size;
                remainder /= size;
                index
            })
            .collect();
        Ok(ReplicaCoordinate(indices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(indices: &[usize]) -> ReplicaCoordinate {
        ReplicaCoordinate::new(indices.to_vec())
    }

    #[test]
    fn normal_mode_counts_with_dimension_zero_fastest() {
        let mut space = ReplicaCoordinateSpace::from_sizes(vec![2, 3], IncrementMode::Normal).unwrap();
        let expected = [[1, 0], [0, 1], [1, 1], [0, 2], [1, 2], [0, 0]];
        for e in expected {
            assert_eq!(space.increment(), &coord(&e));
        }
    }

    #[test]
    fn normal_mode_cascades_multi_level_carries_in_one_call() {
        let mut space = ReplicaCoordinateSpace::from_sizes(vec![2, 2, 2], IncrementMode::Normal).unwrap();
        for _ in 0..3 {
            space.increment();
        }
        assert_eq!(space.current(), &coord(&[1, 1, 0]));
        assert_eq!(space.increment(), &coord(&[0, 0, 1]));
    }

    #[test]
    fn diagonal_mode_advances_all_indices_without_carry() {
        let mut space = ReplicaCoordinateSpace::from_sizes(vec![3, 3], IncrementMode::Diagonal).unwrap();
        assert_eq!(space.increment(), &coord(&[1, 1]));
        assert_eq!(space.increment(), &coord(&[2, 2]));
        assert_eq!(space.increment(), &coord(&[0, 0]));
        assert_eq!(space.increment(), &coord(&[1, 1]));
    }

    #[test]
    fn diagonal_mode_wraps_each_dimension_independently() {
        let mut space = ReplicaCoordinateSpace::from_sizes(vec![2, 3], IncrementMode::Diagonal).unwrap();
        assert_eq!(space.increment(), &coord(&[1, 1]));
        assert_eq!(space.increment(), &coord(&[0, 2]));
        assert_eq!(space.increment(), &coord(&[1, 0]));
    }

    #[test]
    fn empty_space_has_one_replica_with_empty_coordinate() {
        let space = ReplicaCoordinateSpace::from_sizes(vec![], IncrementMode::Normal).unwrap();
        let replicas = space.enumerate();
        assert_eq!(replicas.len(), 1);
        assert_eq!(replicas[0].number, 1);
        assert!(replicas[0].coordinate.is_empty());
    }

    #[test]
    fn enumerate_assigns_sequential_numbers() {
        let space = ReplicaCoordinateSpace::from_sizes(vec![2, 3], IncrementMode::Normal).unwrap();
        let replicas = space.enumerate();
        assert_eq!(replicas.len(), 6);
        assert_eq!(replicas[0].coordinate, coord(&[0, 0]));
        assert_eq!(replicas[3].number, 4);
        assert_eq!(replicas[3].coordinate, coord(&[1, 1]));
        assert_eq!(replicas[5].coordinate, coord(&[1, 2]));
    }

    #[test]
    fn encode_and_decode_follow_enumeration_order() {
        let space = ReplicaCoordinateSpace::from_sizes(vec![3, 2, 4], IncrementMode::Normal).unwrap();
        for replica in space.clone().enumerate() {
            assert_eq!(space.decode(replica.number).unwrap(), replica.coordinate);
            assert_eq!(space.encode(&replica.coordinate).unwrap(), replica.number);
        }
    }

    #[test]
    fn decode_rejects_out_of_range_numbers() {
        let space = ReplicaCoordinateSpace::from_sizes(vec![2, 3], IncrementMode::Normal).unwrap();
        assert_eq!(
            space.decode(0),
            Err(ConfigurationError::ReplicaOutOfRange { number: 0, total: 6 })
        );
        assert!(space.decode(7).is_err());
    }

    #[test]
    fn encode_rejects_malformed_coordinates() {
        let space = ReplicaCoordinateSpace::from_sizes(vec![2, 3], IncrementMode::Normal).unwrap();
        assert!(space.encode(&coord(&[2, 0])).is_err());
        assert!(space.encode(&coord(&[0])).is_err());
    }

    #[test]
    fn from_sizes_rejects_unnumberable_spaces() {
        let sizes = vec![usize::MAX, 2];
        assert_eq!(
            ReplicaCoordinateSpace::from_sizes(sizes.clone(), IncrementMode::Normal).unwrap_err(),
            ConfigurationError::ReplicaSpaceOverflow { sizes }
        );
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn encode_reaches_the_last_replica_of_a_large_space() {
        let space =
            ReplicaCoordinateSpace::from_sizes(vec![1 << 20, 1 << 20, 1 << 20], IncrementMode::Normal)
                .unwrap();
        let last = coord(&[(1 << 20) - 1, (1 << 20) - 1, (1 << 20) - 1]);
        assert_eq!(space.encode(&last).unwrap(), 1 << 60);
        assert_eq!(space.decode(1 << 60).unwrap(), last);
    }

    #[test]
    fn reduced_removes_one_position() {
        let c = coord(&[4, 5, 6]);
        assert_eq!(c.reduced(0), vec![5, 6]);
        assert_eq!(c.reduced(1), vec![4, 6]);
        assert_eq!(c.reduced(2), vec![4, 5]);
    }

    #[test]
    fn coordinate_display_is_compact() {
        assert_eq!(coord(&[1, 0, 2]).to_string(), "(1,0,2)");
        assert_eq!(coord(&[]).to_string(), "()");
    }

    #[test]
    fn increment_mode_parses_names() {
        assert_eq!("Normal".parse::<IncrementMode>().unwrap(), IncrementMode::Normal);
        assert_eq!("odometer".parse::<IncrementMode>().unwrap(), IncrementMode::Normal);
        assert_eq!("diagonal".parse::<IncrementMode>().unwrap(), IncrementMode::Diagonal);
        assert!("spiral".parse::<IncrementMode>().is_err());
        assert_eq!(IncrementMode::default(), IncrementMode::Normal);
    }
}
