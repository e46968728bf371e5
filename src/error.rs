use std::path::{Path, PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

/// Failures that prevent a dashboard from being produced.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The ranking table is missing, unreadable or has a broken schema.
    #[error("failed to load ranking table {}: {}", .path.display(), .reason)]
    DataLoad { path: PathBuf, reason: String },

    /// The table parsed but holds no rows, so mean/max are undefined.
    #[error("ranking table has no rows")]
    EmptyDataset,
}

impl DashboardError {
    pub fn data_load(path: &Path, reason: impl Into<String>) -> Self {
        Self::DataLoad {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}
