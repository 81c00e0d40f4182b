pub mod generate;
pub mod info;

use std::path::{Path, PathBuf};

/// Directory that relative dimension-file paths of a run file resolve against.
pub(crate) fn config_dir(config: &Path) -> PathBuf {
    config
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
