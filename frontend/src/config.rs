//! Frontend configuration loaded via OrthoConfig.

use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Directory used for persisted state when nothing else is configured.
pub const DEFAULT_STORAGE_DIR: &str = ".marketplace";

/// Settings shared by every `marketplace` command.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MARKETPLACE")]
pub struct FrontendSettings {
    /// Directory holding one file per storage key.
    pub storage_dir: Option<PathBuf>,
    /// Emit logs as JSON lines instead of human-readable text.
    #[ortho_config(default = false)]
    pub log_json: bool,
}

impl FrontendSettings {
    /// Resolve the storage directory.
    ///
    /// An explicit `override_dir` (the `--storage-dir` flag) wins over the
    /// configured value, which wins over [`DEFAULT_STORAGE_DIR`].
    #[must_use]
    pub fn storage_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        override_dir
            .or(self.storage_dir.as_deref())
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR), Path::to_path_buf)
    }
}
