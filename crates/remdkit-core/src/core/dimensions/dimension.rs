use super::kind::{DimensionKind, ExchangeProtocol};
use crate::core::error::ConfigurationError;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// One rung of a Hamiltonian (topology) ladder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopologyEntry {
    pub path: PathBuf,
    /// Optional thermostat temperature paired with this topology.
    pub temperature: Option<f64>,
}

/// Accelerated MD dihedral boost parameters for one rung.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmdBoost {
    pub alpha: f64,
    pub threshold: f64,
}

/// The value ladder of a dimension, one variant per dimension kind.
#[derive(Debug, Clone, PartialEq)]
pub enum DimensionTable {
    Temperature(Vec<f64>),
    Topology(Vec<TopologyEntry>),
    Ph(Vec<f64>),
    AmdDihedral(Vec<AmdBoost>),
    Sgld(Vec<f64>),
}

/// The parameter contributed by a dimension at one index of its ladder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DimensionValue<'a> {
    Temperature(f64),
    Topology(&'a TopologyEntry),
    Ph(f64),
    AmdDihedral(AmdBoost),
    Sgld(f64),
}

impl DimensionTable {
    pub fn kind(&self) -> DimensionKind {
        match self {
            Self::Temperature(_) => DimensionKind::Temperature,
            Self::Topology(_) => DimensionKind::Topology,
            Self::Ph(_) => DimensionKind::Ph,
            Self::AmdDihedral(_) => DimensionKind::AmdDihedral,
            Self::Sgld(_) => DimensionKind::Sgld,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Temperature(v) | Self::Ph(v) | Self::Sgld(v) => v.len(),
            Self::Topology(v) => v.len(),
            Self::AmdDihedral(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn value_at(&self, index: usize) -> Option<DimensionValue<'_>> {
        match self {
            Self::Temperature(v) => v.get(index).copied().map(DimensionValue::Temperature),
            Self::Topology(v) => v.get(index).map(DimensionValue::Topology),
            Self::Ph(v) => v.get(index).copied().map(DimensionValue::Ph),
            Self::AmdDihedral(v) => v.get(index).copied().map(DimensionValue::AmdDihedral),
            Self::Sgld(v) => v.get(index).copied().map(DimensionValue::Sgld),
        }
    }
}

/// A single exchange dimension: a validated, immutable value ladder of one kind.
///
/// Dimensions are built through the kind-specific constructors, which reject
/// empty ladders and malformed values. Once built, the ladder never changes;
/// the only mutable attribute is the human-readable description, set at
/// construction via [`Dimension::with_description`].
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    table: DimensionTable,
    description: String,
}

impl Dimension {
    pub fn temperature(temperatures: Vec<f64>) -> Result<Self, ConfigurationError> {
        let kind = DimensionKind::Temperature;
        ensure_non_empty(kind, temperatures.len())?;
        ensure_positive(kind, &temperatures)?;
        warn_if_not_ascending(kind, &temperatures);
        Ok(Self::from_table(DimensionTable::Temperature(temperatures)))
    }

    /// Builds a Hamiltonian ladder from topology paths and, optionally, one
    /// temperature per topology.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::TableSizeMismatch`] when `temperatures` is
    /// present but its length differs from the number of paths.
    pub fn topology(
        paths: Vec<PathBuf>,
        temperatures: Option<Vec<f64>>,
    ) -> Result<Self, ConfigurationError> {
        let kind = DimensionKind::Topology;
        ensure_non_empty(kind, paths.len())?;
        if let Some((index, _)) = paths
            .iter()
            .enumerate()
            .find(|(_, p)| p.as_os_str().is_empty())
        {
            return Err(ConfigurationError::InvalidValue {
                kind,
                index,
                reason: "topology path is empty".to_string(),
            });
        }

        let entries = match temperatures {
            Some(temps) => {
                if temps.len() != paths.len() {
                    return Err(ConfigurationError::TableSizeMismatch {
                        kind,
                        column: "temperatures",
                        expected: paths.len(),
                        found: temps.len(),
                    });
                }
                ensure_positive(kind, &temps)?;
                paths
                    .into_iter()
                    .zip(temps)
                    .map(|(path, t)| TopologyEntry {
                        path,
                        temperature: Some(t),
                    })
                    .collect()
            }
            None => paths
                .into_iter()
                .map(|path| TopologyEntry {
                    path,
                    temperature: None,
                })
                .collect(),
        };
        Ok(Self::from_table(DimensionTable::Topology(entries)))
    }

    pub fn ph(values: Vec<f64>) -> Result<Self, ConfigurationError> {
        let kind = DimensionKind::Ph;
        ensure_non_empty(kind, values.len())?;
        ensure_finite(kind, &values)?;
        Ok(Self::from_table(DimensionTable::Ph(values)))
    }

    pub fn amd_dihedral(alphas: Vec<f64>, thresholds: Vec<f64>) -> Result<Self, ConfigurationError> {
        let kind = DimensionKind::AmdDihedral;
        ensure_non_empty(kind, alphas.len())?;
        if thresholds.len() != alphas.len() {
            return Err(ConfigurationError::TableSizeMismatch {
                kind,
                column: "thresholds",
                expected: alphas.len(),
                found: thresholds.len(),
            });
        }
        ensure_finite(kind, &alphas)?;
        ensure_finite(kind, &thresholds)?;
        let boosts = alphas
            .into_iter()
            .zip(thresholds)
            .map(|(alpha, threshold)| AmdBoost { alpha, threshold })
            .collect();
        Ok(Self::from_table(DimensionTable::AmdDihedral(boosts)))
    }

    pub fn sgld(target_temperatures: Vec<f64>) -> Result<Self, ConfigurationError> {
        let kind = DimensionKind::Sgld;
        ensure_non_empty(kind, target_temperatures.len())?;
        ensure_positive(kind, &target_temperatures)?;
        Ok(Self::from_table(DimensionTable::Sgld(target_temperatures)))
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    fn from_table(table: DimensionTable) -> Self {
        let description = default_description(&table);
        Self { table, description }
    }

    pub fn kind(&self) -> DimensionKind {
        self.table.kind()
    }

    pub fn exchange_protocol(&self) -> ExchangeProtocol {
        self.kind().exchange_protocol()
    }

    pub fn size(&self) -> usize {
        self.table.len()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn table(&self) -> &DimensionTable {
        &self.table
    }

    pub fn value_at(&self, index: usize) -> Option<DimensionValue<'_>> {
        self.table.value_at(index)
    }

    pub fn topology_path(&self, index: usize) -> Option<&Path> {
        match self.value_at(index)? {
            DimensionValue::Topology(entry) => Some(entry.path.as_path()),
            _ => None,
        }
    }

    /// Whether a topology ladder also carries per-rung temperatures.
    pub fn carries_temperatures(&self) -> bool {
        matches!(&self.table, DimensionTable::Topology(entries) if entries.iter().any(|e| e.temperature.is_some()))
    }
}

fn default_description(table: &DimensionTable) -> String {
    let n = table.len();
    let span = |v: &[f64], unit: &str| match (v.first(), v.last()) {
        (Some(first), Some(last)) => format!("{:.2}{} -> {:.2}{}", first, unit, last, unit),
        _ => String::new(),
    };
    match table {
        DimensionTable::Temperature(v) => format!("Temperature {} ({} replicas)", span(v.as_slice(), " K"), n),
        DimensionTable::Topology(_) => format!("Hamiltonian ladder ({} topologies)", n),
        DimensionTable::Ph(v) => format!("pH {} ({} replicas)", span(v.as_slice(), ""), n),
        DimensionTable::AmdDihedral(_) => format!("aMD dihedral boost ({} levels)", n),
        DimensionTable::Sgld(v) => format!("SGLD target temperature {} ({} replicas)", span(v.as_slice(), " K"), n),
    }
}

fn ensure_non_empty(kind: DimensionKind, len: usize) -> Result<(), ConfigurationError> {
    if len == 0 {
        return Err(ConfigurationError::EmptyDimension { kind });
    }
    Ok(())
}

fn ensure_finite(kind: DimensionKind, values: &[f64]) -> Result<(), ConfigurationError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(ConfigurationError::InvalidValue {
            kind,
            index,
            reason: format!("value {} is not finite", values[index]),
        }),
        None => Ok(()),
    }
}

fn ensure_positive(kind: DimensionKind, values: &[f64]) -> Result<(), ConfigurationError> {
    ensure_finite(kind, values)?;
    match values.iter().position(|&v| v <= 0.0) {
        Some(index) => Err(ConfigurationError::InvalidValue {
            kind,
            index,
            reason: format!("temperature {} must be positive", values[index]),
        }),
        None => Ok(()),
    }
}

fn warn_if_not_ascending(kind: DimensionKind, values: &[f64]) {
    if let Some(i) = values.windows(2).position(|w| w[1] <= w[0]) {
        warn!(
            "{} ladder is not strictly ascending at index {} ({} -> {}). Neighbor exchanges may have poor acceptance.",
            kind,
            i + 1,
            values[i],
            values[i + 1]
        );
    }
}
