mod defaults;

use crate::cli::GenerateArgs;
use crate::dimension_files::{DimensionEntry, RunDimensions};
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use remdkit::core::coordinates::IncrementMode;
use remdkit::engine::config::{GenerationConfig, GenerationConfigBuilder};
use remdkit::engine::resolver::BaseParameters;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialRunSection {
    mode: Option<IncrementMode>,
    #[serde(rename = "max-replicas")]
    max_replicas: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialDefaultsSection {
    temperature: Option<f64>,
    topology: Option<PathBuf>,
    ph: Option<f64>,
    #[serde(rename = "constant-ph")]
    constant_ph: Option<bool>,
}

/// A run file as written by the user; every section is optional.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialRunConfig {
    run: Option<PartialRunSection>,
    defaults: Option<PartialDefaultsSection>,
    #[serde(default)]
    dimension: Vec<DimensionEntry>,
}

/// The merged configuration of one `generate` invocation.
#[derive(Debug)]
pub struct RunConfig {
    pub dimensions: RunDimensions,
    pub generation: GenerationConfig,
}

impl PartialRunConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading run configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Dimension entries only, for commands that never resolve parameters.
    pub fn into_dimensions(self, base_dir: &Path) -> RunDimensions {
        RunDimensions::new(self.dimension, base_dir)
    }

    pub fn merge_with_cli(mut self, args: &GenerateArgs, base_dir: &Path) -> Result<RunConfig> {
        self.apply_set_values(&args.set_values)?;

        let defaults = DefaultsConfig::default();
        let run = self.run.take().unwrap_or_default();
        let file_defaults = self.defaults.take().unwrap_or_default();

        let base_parameters = BaseParameters {
            temperature: args.temperature.or(file_defaults.temperature),
            topology: args.topology.clone().or(file_defaults.topology),
            ph: file_defaults.ph,
            constant_ph: file_defaults.constant_ph.unwrap_or(defaults.constant_ph),
        };

        let generation = GenerationConfigBuilder::new()
            .increment_mode(
                args.mode
                    .or(run.mode)
                    .unwrap_or(defaults.increment_mode),
            )
            .base_parameters(base_parameters)
            .max_replicas(
                args.max_replicas
                    .or(run.max_replicas)
                    .unwrap_or(defaults.max_replicas),
            )
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        Ok(RunConfig {
            dimensions: RunDimensions::new(self.dimension, base_dir),
            generation,
        })
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value_str) = kv_pair.split_once('=').ok_or_else(|| {
                CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                ))
            })?;

            let invalid = |expected: &str| {
                CliError::Config(format!(
                    "Invalid {} value for {}: {}",
                    expected, key, value_str
                ))
            };

            match key {
                "run.mode" => {
                    self.run.get_or_insert_with(Default::default).mode =
                        Some(value_str.parse().map_err(|_| invalid("mode"))?);
                }
                "run.max-replicas" => {
                    self.run.get_or_insert_with(Default::default).max_replicas =
                        Some(value_str.parse().map_err(|_| invalid("integer"))?);
                }
                "defaults.temperature" => {
                    self.defaults
                        .get_or_insert_with(Default::default)
                        .temperature = Some(value_str.parse().map_err(|_| invalid("float"))?);
                }
                "defaults.topology" => {
                    self.defaults.get_or_insert_with(Default::default).topology =
                        Some(PathBuf::from(value_str));
                }
                "defaults.ph" => {
                    self.defaults.get_or_insert_with(Default::default).ph =
                        Some(value_str.parse().map_err(|_| invalid("float"))?);
                }
                "defaults.constant-ph" => {
                    self.defaults
                        .get_or_insert_with(Default::default)
                        .constant_ph = Some(value_str.parse().map_err(|_| invalid("boolean"))?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}
