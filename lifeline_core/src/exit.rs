use crate::TerminationRequest;

/// The final step of every termination sequence.
///
/// The default [`ProcessExit`] ends the process. Alternative implementations
/// may return from [`exit`](Exit::exit) instead (e.g., to observe termination
/// in tests), in which case the [`Lifecycle`](crate::Lifecycle) reports the
/// finished sequence back to the caller.
pub trait Exit: Send + Sync + 'static {
    /// Terminates according to the winning `request`: writes its message (if
    /// any) to the diagnostic stream and exits with its exit code.
    fn exit(&self, request: &TerminationRequest);
}

/// Writes the abort message to the standard error stream and
/// [exits](std::process::exit) the process with the requested code.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessExit;

impl Exit for ProcessExit {
    fn exit(&self, request: &TerminationRequest) {
        if let Some(message) = request.message() {
            eprintln!("{message}");
        }

        std::process::exit(request.exit_code());
    }
}
