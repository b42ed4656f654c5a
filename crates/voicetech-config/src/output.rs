use std::path::PathBuf;

use serde::Deserialize;

/// Storage for synthesized audio artifacts
///
/// Files are never cleaned up by the service; the directory grows until an
/// operator prunes it.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory receiving WAV files, created on first write
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from("outputs")
}
