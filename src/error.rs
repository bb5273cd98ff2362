use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced to the caller of the data layer.
///
/// Internals use `anyhow` with context; the chain is flattened into `reason`
/// at the boundary so the GUI and CLI can show it in one line.
#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("data unavailable from {}: {reason}", .path.display())]
    DataUnavailable { path: PathBuf, reason: String },

    #[error("export to {} failed: {reason}", .path.display())]
    Export { path: PathBuf, reason: String },
}

impl ExplorerError {
    pub fn data_unavailable(path: impl Into<PathBuf>, err: &anyhow::Error) -> Self {
        ExplorerError::DataUnavailable {
            path: path.into(),
            reason: format!("{err:#}"),
        }
    }

    pub fn export(path: impl Into<PathBuf>, err: &anyhow::Error) -> Self {
        ExplorerError::Export {
            path: path.into(),
            reason: format!("{err:#}"),
        }
    }
}
