use remdkit::core::dimensions::registry::DimensionDeclaration;
use remdkit::core::io::traits::DimensionSource;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// One `[[dimension]]` entry of a run file: either a reference to a dimension
/// file or an inline declaration.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum DimensionEntry {
    File { file: PathBuf },
    Inline(DimensionDeclaration),
}

/// Dimension declarations of a run, in the order they appear in the run file.
///
/// Relative dimension-file paths are resolved against `base_dir`, the
/// directory of the run file.
#[derive(Debug, Clone, PartialEq)]
pub struct RunDimensions {
    entries: Vec<DimensionEntry>,
    base_dir: PathBuf,
}

#[derive(Debug, Error)]
pub enum DimensionFileError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

impl RunDimensions {
    pub fn new(entries: Vec<DimensionEntry>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            entries,
            base_dir: base_dir.into(),
        }
    }

    fn read_file(&self, file: &Path) -> Result<DimensionDeclaration, DimensionFileError> {
        let path = if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.base_dir.join(file)
        };
        debug!("Reading dimension file {:?}", path);
        let content = std::fs::read_to_string(&path).map_err(|e| DimensionFileError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| DimensionFileError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }
}

impl DimensionSource for RunDimensions {
    type Error = DimensionFileError;

    fn load(&self) -> Result<Vec<DimensionDeclaration>, Self::Error> {
        self.entries
            .iter()
            .map(|entry| match entry {
                DimensionEntry::File { file } => self.read_file(file),
                DimensionEntry::Inline(declaration) => Ok(declaration.clone()),
            })
            .collect()
    }
}
