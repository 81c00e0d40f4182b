use super::dimension::Dimension;
use super::kind::DimensionKind;
use crate::core::error::ConfigurationError;
use std::collections::HashMap;

/// An ordered collection of exchange dimensions, at most one per kind.
///
/// Order is significant: the dimension at position 0 is the fastest-varying
/// index of every replica coordinate. The product of all sizes always fits in
/// a `usize`; a dimension that would overflow it is rejected on insertion.
///
/// The set owns its dimensions by value, so cloning it yields an independent
/// copy that can be branched (for example into analysis or archive variants of
/// a run) without affecting the original.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DimensionSet {
    dimensions: Vec<Dimension>,
    positions: HashMap<DimensionKind, usize>,
}

impl DimensionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_dimensions(
        dimensions: impl IntoIterator<Item = Dimension>,
    ) -> Result<Self, ConfigurationError> {
        let mut set = Self::new();
        for dimension in dimensions {
            set.add_dimension(dimension)?;
        }
        Ok(set)
    }

    /// Appends a dimension at the next position.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::DuplicateDimensionKind`] if a dimension of the
    ///   same kind is already present.
    /// - [`ConfigurationError::ReplicaSpaceOverflow`] if the replica count would
    ///   no longer fit in a `usize`.
    ///
    /// On error the set is left unchanged.
    pub fn add_dimension(&mut self, dimension: Dimension) -> Result<usize, ConfigurationError> {
        let kind = dimension.kind();
        if self.positions.contains_key(&kind) {
            return Err(ConfigurationError::DuplicateDimensionKind { kind });
        }
        if self.total_replicas().checked_mul(dimension.size()).is_none() {
            let mut sizes = self.sizes();
            sizes.push(dimension.size());
            return Err(ConfigurationError::ReplicaSpaceOverflow { sizes });
        }
        let position = self.dimensions.len();
        self.dimensions.push(dimension);
        self.positions.insert(kind, position);
        Ok(position)
    }

    /// Product of all dimension sizes; 1 for an empty set (a plain MD run).
    pub fn total_replicas(&self) -> usize {
        self.dimensions.iter().map(Dimension::size).product()
    }

    pub fn has_kind(&self, kind: DimensionKind) -> bool {
        self.positions.contains_key(&kind)
    }

    pub fn position_of(&self, kind: DimensionKind) -> Option<usize> {
        self.positions.get(&kind).copied()
    }

    pub fn dimension(&self, kind: DimensionKind) -> Result<&Dimension, ConfigurationError> {
        self.position_of(kind)
            .map(|p| &self.dimensions[p])
            .ok_or(ConfigurationError::DimensionNotPresent { kind })
    }

    pub fn get(&self, position: usize) -> Option<&Dimension> {
        self.dimensions.get(position)
    }

    pub fn len(&self) -> usize {
        self.dimensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dimension> {
        self.dimensions.iter()
    }

    pub fn sizes(&self) -> Vec<usize> {
        self.dimensions.iter().map(Dimension::size).collect()
    }
}

impl<'a> IntoIterator for &'a DimensionSet {
    type Item = &'a Dimension;
    type IntoIter = std::slice::Iter<'a, Dimension>;

    fn into_iter(self) -> Self::IntoIter {
        self.dimensions.iter()
    }
}
