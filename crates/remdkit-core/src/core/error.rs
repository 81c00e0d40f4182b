use super::dimensions::kind::DimensionKind;
use thiserror::Error;

/// Fatal problems with a run layout.
///
/// Every variant aborts generation before any output is written. Variants carry
/// enough context (dimension kind, replica number, coordinate) to be reported
/// by the caller without further lookups.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("A {kind} dimension is already present; each kind may appear at most once")]
    DuplicateDimensionKind { kind: DimensionKind },

    #[error("No {kind} dimension is present in the dimension set")]
    DimensionNotPresent { kind: DimensionKind },

    #[error("Replica {replica} at coordinate {coordinate} has no topology")]
    MissingTopology { replica: usize, coordinate: String },

    #[error(
        "Value table size mismatch in {kind} dimension: column '{column}' has {found} entries, expected {expected}"
    )]
    TableSizeMismatch {
        kind: DimensionKind,
        column: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("The {kind} dimension has an empty value table")]
    EmptyDimension { kind: DimensionKind },

    #[error("Column '{column}' is not valid for a {kind} dimension")]
    UnexpectedColumn {
        kind: DimensionKind,
        column: &'static str,
    },

    #[error("Unknown dimension kind tag '{0}'")]
    UnknownDimensionKind(String),

    #[error("Invalid value at index {index} of {kind} dimension: {reason}")]
    InvalidValue {
        kind: DimensionKind,
        index: usize,
        reason: String,
    },

    #[error("Replica number {number} is outside the replica space 1..={total}")]
    ReplicaOutOfRange { number: usize, total: usize },

    #[error("Coordinate {coordinate} does not fit dimension sizes {sizes:?}")]
    CoordinateOutOfRange {
        coordinate: String,
        sizes: Vec<usize>,
    },

    #[error("Dimension sizes {sizes:?} span more replicas than can be numbered")]
    ReplicaSpaceOverflow { sizes: Vec<usize> },

    #[error("Run would create {total} replicas, exceeding the limit of {limit}")]
    TooManyReplicas { total: usize, limit: usize },
}
