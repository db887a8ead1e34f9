use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcquireError {
    #[error("failed to run {program}: {message}")]
    Spawn { program: String, message: String },
    #[error("{program} exited with status {code:?}: {stderr}")]
    ExitStatus {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
    #[error("failed to read saved report {}: {message}", path.display())]
    SavedReport { path: PathBuf, message: String },
}
