//! Error types for the run controller.

use crate::engine::EngineError;
use crate::ingest::FrameError;
use rgbd_data::ManifestError;
use std::path::PathBuf;
use thiserror::Error;

/// Every way a run can fail. All of them end the process with status 1.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Invalid invocation: {0}")]
    InvalidInvocation(String),

    #[error("Invalid run type: {0}")]
    InvalidMode(String),

    #[error("Failed to read association file {}: {source}", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: ManifestError,
    },

    #[error("No images found in provided path.")]
    EmptyDataset,

    #[error("{0}")]
    ImageLoad(#[from] FrameError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Interrupt handling failed: {0}")]
    Interrupt(String),

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

impl RunError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// Whether the usage text should accompany this error.
    pub fn wants_usage(&self) -> bool {
        matches!(self, RunError::InvalidInvocation(_) | RunError::InvalidMode(_))
    }
}
