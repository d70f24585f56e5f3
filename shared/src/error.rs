use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a run. All of these are fatal.
#[derive(Debug, Error)]
pub enum LifeError {
    #[error("usage: {usage}")]
    Usage { usage: String },

    #[error("{name} must be a positive integer, got `{value}`")]
    Validation { name: &'static str, value: String },

    #[error("unable to allocate memory for a grid of size {size}")]
    Allocation { size: usize },

    #[error("unable to start worker thread {worker}")]
    Spawn {
        worker: usize,
        #[source]
        source: io::Error,
    },

    #[error("unable to write output file {}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed grid on line {line}: {reason}")]
    Parse { line: usize, reason: String },
}
