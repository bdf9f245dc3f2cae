use crate::LifelineError;
use lifeline_core::{Lifecycle, TerminationOption};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, warn};

/// The label of the termination action that removes the PID file.
const REMOVAL_LABEL: &str = "pid-file";

/// A file that holds the ID of the current process while it runs.
///
/// Once [written](Self::write), the file is removed by a termination action on
/// either termination path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PidFile {
    path: PathBuf,
}

impl PidFile {
    /// Creates a PID file handle for the given location. Nothing is written
    /// yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reports the location of this PID file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PidFile {
    /// Writes the current process ID, followed by a newline, and registers the
    /// removal of the file with the given lifecycle.
    ///
    /// If the lifecycle is already terminating, the file is removed right away.
    pub fn write(&self, lifecycle: &Lifecycle) -> Result<(), LifelineError> {
        fs::write(&self.path, format!("{}\n", process::id())).map_err(|source| {
            LifelineError::PidFile {
                path: self.path.clone(),
                source,
            }
        })?;

        debug!(path = %self.path.display(), "Wrote the PID file");

        let path = self.path.clone();
        let registration = lifecycle.register_termination_with(
            move || remove(&path),
            [TerminationOption::Label(REMOVAL_LABEL.to_string())],
        );

        if registration.is_err() {
            remove(&self.path);
        }

        Ok(())
    }
}

fn remove(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => debug!(path = %path.display(), "Removed the PID file"),
        Err(error) => warn!(
            path = %path.display(),
            error = %error,
            "Failed to remove the PID file",
        ),
    }
}
