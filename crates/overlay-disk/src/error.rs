use std::path::PathBuf;

use crate::command::CommandError;

pub type Result<T> = std::result::Result<T, ProvisionError>;

#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error("volume name not usable as a path segment: {0:?}")]
    InvalidVolumeName(String),

    #[error("overlay creation failed: {0}")]
    ImageCreate(#[from] CommandError),

    #[error("failed to set ownership of {}: {}", .path.display(), .detail)]
    Ownership { path: PathBuf, detail: String },

    #[error("missing prerequisite: {0}")]
    Prerequisite(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
