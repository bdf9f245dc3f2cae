use lifeline_core::{Exit, Lifecycle, TerminationRequest};
use parking_lot::Mutex;
use std::sync::Arc;

/// What a [`RecordingExit`] observed instead of terminating the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedExit {
    /// The exit code that would have been used.
    pub code: i32,
    /// The message that would have been written to the standard error stream.
    pub message: Option<String>,
}

/// An [`Exit`] that records every exit instead of performing it, so that the
/// test process survives the termination sequence.
#[derive(Debug, Clone, Default)]
pub struct RecordingExit {
    exits: Arc<Mutex<Vec<RecordedExit>>>,
}

impl RecordingExit {
    /// Creates a lifecycle wired to a fresh recording exit.
    pub fn lifecycle() -> (Lifecycle, Self) {
        let exit = Self::default();
        let lifecycle = Lifecycle::with_exit(exit.clone());

        (lifecycle, exit)
    }

    /// Returns every exit recorded so far.
    pub fn exits(&self) -> Vec<RecordedExit> {
        self.exits.lock().clone()
    }
}

impl Exit for RecordingExit {
    fn exit(&self, request: &TerminationRequest) {
        self.exits.lock().push(RecordedExit {
            code: request.exit_code(),
            message: request.message().map(str::to_string),
        });
    }
}
