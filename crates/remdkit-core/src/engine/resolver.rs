use crate::core::coordinates::Replica;
use crate::core::dimensions::dimension::{AmdBoost, DimensionValue};
use crate::core::dimensions::set::DimensionSet;
use crate::core::error::ConfigurationError;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

pub const DEFAULT_TEMPERATURE: f64 = 300.0; // K
pub const DEFAULT_PH: f64 = 7.0;
pub const SGLD_AVERAGING_TIME_PS: f64 = 0.2;

/// Run-wide parameters that apply to every replica unless a dimension overrides them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaseParameters {
    pub temperature: Option<f64>,
    pub topology: Option<PathBuf>,
    pub ph: Option<f64>,
    /// Whether replicas run constant-pH dynamics and therefore need a solvent pH.
    pub constant_ph: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SgldParameters {
    pub target_temperature: f64,
    pub averaging_time: f64, // ps
}

/// The concrete simulation parameters of one replica.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedParameterRecord {
    pub temperature: f64,
    pub topology: PathBuf,
    pub ph: Option<f64>,
    pub amd: Option<AmdBoost>,
    pub sgld: Option<SgldParameters>,
}

impl ResolvedParameterRecord {
    pub fn is_boosted(&self) -> bool {
        self.amd.is_some()
    }

    pub fn is_sgld(&self) -> bool {
        self.sgld.is_some()
    }
}

/// A documented fallback taken during resolution. Never fatal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolutionWarning {
    MissingTemperature { fallback: f64 },
    MissingPh { fallback: f64 },
}

impl fmt::Display for ResolutionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTemperature { fallback } => write!(
                f,
                "No temperature dimension and no default temperature; using {:.2} K",
                fallback
            ),
            Self::MissingPh { fallback } => write!(
                f,
                "Constant pH requested but no pH dimension or default pH; using pH {:.2}",
                fallback
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub record: ResolvedParameterRecord,
    pub warnings: Vec<ResolutionWarning>,
}

/// Resolves per-replica parameters from the dimensions of a set.
///
/// Each dimension contributes the value at the replica's index along it.
/// Temperature precedence: a TEMPERATURE dimension wins over temperatures
/// carried by a TOPOLOGY dimension, which win over the base temperature. SGLD
/// target temperatures never replace the thermostat temperature.
///
/// The resolver holds only shared references and keeps no state between calls,
/// so replicas may be resolved in any order.
pub struct ParameterResolver<'a> {
    set: &'a DimensionSet,
    base: &'a BaseParameters,
}

impl<'a> ParameterResolver<'a> {
    pub fn new(set: &'a DimensionSet, base: &'a BaseParameters) -> Self {
        Self { set, base }
    }

    /// Resolves the parameter record of one replica.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::MissingTopology`] if neither a TOPOLOGY dimension
    ///   nor the base parameters supply a topology.
    /// - [`ConfigurationError::CoordinateOutOfRange`] if the coordinate does not
    ///   fit the set.
    pub fn resolve(&self, replica: &Replica) -> Result<Resolution, ConfigurationError> {
        let coordinate = &replica.coordinate;
        let out_of_range = || ConfigurationError::CoordinateOutOfRange {
            coordinate: coordinate.to_string(),
            sizes: self.set.sizes(),
        };
        if coordinate.len() != self.set.len() {
            return Err(out_of_range());
        }

        let mut temperature = None;
        let mut topology_temperature = None;
        let mut topology = None;
        let mut ph = None;
        let mut amd = None;
        let mut sgld = None;

        for (position, dimension) in self.set.iter().enumerate() {
            let index = coordinate.index(position).ok_or_else(out_of_range)?;
            match dimension.value_at(index).ok_or_else(out_of_range)? {
                DimensionValue::Temperature(t) => temperature = Some(t),
                DimensionValue::Topology(entry) => {
                    topology = Some(entry.path.clone());
                    topology_temperature = entry.temperature;
                }
                DimensionValue::Ph(value) => ph = Some(value),
                DimensionValue::AmdDihedral(boost) => amd = Some(boost),
                DimensionValue::Sgld(target) => {
                    sgld = Some(SgldParameters {
                        target_temperature: target,
                        averaging_time: SGLD_AVERAGING_TIME_PS,
                    })
                }
            }
        }

        let mut warnings = Vec::new();

        let temperature = match temperature
            .or(topology_temperature)
            .or(self.base.temperature)
        {
            Some(t) => t,
            None => {
                warnings.push(ResolutionWarning::MissingTemperature {
                    fallback: DEFAULT_TEMPERATURE,
                });
                DEFAULT_TEMPERATURE
            }
        };

        let topology = topology
            .or_else(|| self.base.topology.clone())
            .ok_or_else(|| ConfigurationError::MissingTopology {
                replica: replica.number,
                coordinate: coordinate.to_string(),
            })?;

        let mut ph = ph.or(self.base.ph);
        if ph.is_none() && self.base.constant_ph {
            warnings.push(ResolutionWarning::MissingPh {
                fallback: DEFAULT_PH,
            });
            ph = Some(DEFAULT_PH);
        }

        for warning in &warnings {
            debug!("Replica {}: {}", replica.number, warning);
        }

        Ok(Resolution {
            record: ResolvedParameterRecord {
                temperature,
                topology,
                ph,
                amd,
                sgld,
            },
            warnings,
        })
    }
}
