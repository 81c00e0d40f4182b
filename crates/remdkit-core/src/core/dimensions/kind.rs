use super::registry;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DimensionKind {
    Temperature, // Thermostat temperature ladder
    Topology,    // Hamiltonian ladder of topology files
    Ph,          // Solvent pH ladder (constant-pH REMD)
    AmdDihedral, // Accelerated MD dihedral boost ladder
    Sgld,        // Self-guided Langevin target temperature ladder
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExchangeProtocol {
    TemperatureExchange,
    HamiltonianExchange,
    PhExchange,
}

impl DimensionKind {
    pub const ALL: [DimensionKind; 5] = [
        Self::Temperature,
        Self::Topology,
        Self::Ph,
        Self::AmdDihedral,
        Self::Sgld,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Self::Temperature => "TEMPERATURE",
            Self::Topology => "TOPOLOGY",
            Self::Ph => "PH",
            Self::AmdDihedral => "AMD_DIHEDRAL",
            Self::Sgld => "SGLD",
        }
    }

    /// The exchange move replicas attempt along a dimension of this kind.
    ///
    /// SGLD target temperatures are swapped like thermostat temperatures, while
    /// aMD boosts change the potential and therefore exchange Hamiltonians.
    pub fn exchange_protocol(self) -> ExchangeProtocol {
        match self {
            Self::Temperature | Self::Sgld => ExchangeProtocol::TemperatureExchange,
            Self::Topology | Self::AmdDihedral => ExchangeProtocol::HamiltonianExchange,
            Self::Ph => ExchangeProtocol::PhExchange,
        }
    }
}

impl fmt::Display for DimensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown dimension kind '{0}'")]
pub struct ParseDimensionKindError(pub String);

impl FromStr for DimensionKind {
    type Err = ParseDimensionKindError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        registry::lookup_kind(s).ok_or_else(|| ParseDimensionKindError(s.to_string()))
    }
}

impl ExchangeProtocol {
    pub fn tag(self) -> &'static str {
        match self {
            Self::TemperatureExchange => "TEMPERATURE_EXCHANGE",
            Self::HamiltonianExchange => "HAMILTONIAN_EXCHANGE",
            Self::PhExchange => "PH_EXCHANGE",
        }
    }
}

impl fmt::Display for ExchangeProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
