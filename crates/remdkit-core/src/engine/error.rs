use crate::core::error::ConfigurationError;
use thiserror::Error;

type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Invalid run configuration: {source}")]
    Configuration {
        #[from]
        source: ConfigurationError,
    },

    #[error("Failed to load dimension declarations: {source}")]
    Source { source: BoxedError },

    #[error("Writer for {stage} failed: {source}")]
    Writer {
        stage: &'static str,
        source: BoxedError,
    },
}

impl GenerationError {
    pub(crate) fn source_failed(e: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Source {
            source: Box::new(e),
        }
    }

    pub(crate) fn writer_failed(
        stage: &'static str,
        e: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Writer {
            stage,
            source: Box::new(e),
        }
    }
}
