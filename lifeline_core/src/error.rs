use crate::TerminationSignal;
use thiserror::Error;

/// Reported when an action is offered to the [`Lifecycle`](crate::Lifecycle)
/// too late for it to ever run. The action is dropped; the caller is free to
/// carry on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A termination action was registered after the termination sequence
    /// had already begun.
    #[error("cannot register a termination action after termination has begun")]
    Finalized,

    /// A startup action was registered after the startup actions had already
    /// been run.
    #[error("cannot register a startup action after startup actions have run")]
    StartupCompleted,
}

/// Reported when the platform refuses to deliver a requested signal.
#[derive(Debug, Error)]
#[error("failed to listen for {signal}: {source}")]
pub struct BridgeError {
    signal: TerminationSignal,
    #[source]
    source: std::io::Error,
}

impl BridgeError {
    pub(crate) fn new(signal: TerminationSignal, source: std::io::Error) -> Self {
        Self { signal, source }
    }

    /// Reports the signal that could not be bridged.
    pub fn signal(&self) -> TerminationSignal {
        self.signal
    }
}
