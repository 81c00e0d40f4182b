use super::resolver::BaseParameters;
use crate::core::coordinates::IncrementMode;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub increment_mode: IncrementMode,
    pub base_parameters: BaseParameters,
    /// Upper bound on the replica count; `None` disables the check.
    pub max_replicas: Option<usize>,
}

#[derive(Default)]
pub struct GenerationConfigBuilder {
    increment_mode: Option<IncrementMode>,
    base_parameters: Option<BaseParameters>,
    max_replicas: Option<usize>,
}

impl GenerationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_mode(mut self, mode: IncrementMode) -> Self {
        self.increment_mode = Some(mode);
        self
    }
    pub fn base_parameters(mut self, base: BaseParameters) -> Self {
        self.base_parameters = Some(base);
        self
    }
    pub fn max_replicas(mut self, limit: usize) -> Self {
        self.max_replicas = Some(limit);
        self
    }

    pub fn build(self) -> Result<GenerationConfig, ConfigError> {
        if self.max_replicas == Some(0) {
            return Err(ConfigError::InvalidParameter {
                parameter: "max_replicas",
                reason: "must be at least 1".to_string(),
            });
        }
        let base_parameters = self.base_parameters.unwrap_or_default();
        if let Some(t) = base_parameters.temperature {
            if !(t.is_finite() && t > 0.0) {
                return Err(ConfigError::InvalidParameter {
                    parameter: "temperature",
                    reason: format!("{} is not a positive temperature", t),
                });
            }
        }
        Ok(GenerationConfig {
            increment_mode: self
                .increment_mode
                .ok_or(ConfigError::MissingParameter("increment_mode"))?,
            base_parameters,
            max_replicas: self.max_replicas,
        })
    }
}
