use std::path::PathBuf;

use clock_core::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scenario JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid clock configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("scenario '{0}' has no phases")]
    Empty(String),
}
