use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents the ways the [`Launchpad`](crate::Launchpad) may fail to boot an
/// application.
#[derive(Error, Debug)]
pub enum LifelineError {
    /// The [`LifelineConfig`](crate::LifelineConfig) could not be assembled
    /// from its sources.
    #[error("failed to assemble the lifeline configuration: {0}")]
    Config(#[from] config::ConfigError),

    /// The asynchronous runtime could not be built.
    #[error("failed to build the asynchronous runtime")]
    Runtime(#[source] io::Error),

    /// The PID file could not be written.
    #[error("failed to write the PID file at '{}'", .path.display())]
    PidFile {
        /// The path of the PID file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}
