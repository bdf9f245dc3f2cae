use std::fmt::{Display, Formatter};
use std::time::Duration;

pub(crate) mod budget;
pub(crate) mod orchestrator;
pub(crate) mod race;

/// The way the process is being terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationMode {
    /// Graceful termination, exiting with code `0`.
    Shutdown,

    /// Abnormal termination, exiting with code `1`.
    Abort,
}

impl TerminationMode {
    /// Reports the process exit code associated with this mode.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Shutdown => 0,
            Self::Abort => 1,
        }
    }
}

impl Display for TerminationMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shutdown => f.write_str("shutdown"),
            Self::Abort => f.write_str("abort"),
        }
    }
}

/// A single request to terminate the process.
///
/// Any number of requests may be made, but only the first one to reach the
/// [`Lifecycle`](crate::Lifecycle) ever runs termination actions and exits
/// the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminationRequest {
    mode: TerminationMode,
    message: Option<String>,
}

impl TerminationRequest {
    /// Requests a graceful shutdown.
    pub fn shutdown() -> Self {
        Self {
            mode: TerminationMode::Shutdown,
            message: None,
        }
    }

    /// Requests an abort. A non-empty `message` is written to the standard
    /// error stream right before the process exits.
    pub fn abort(message: impl Into<String>) -> Self {
        let message = message.into();

        Self {
            mode: TerminationMode::Abort,
            message: (!message.is_empty()).then_some(message),
        }
    }

    /// Reports the [mode](TerminationMode) of this request.
    pub fn mode(&self) -> TerminationMode {
        self.mode
    }

    /// Reports the abort message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Reports the process exit code for this request.
    pub fn exit_code(&self) -> i32 {
        self.mode.exit_code()
    }
}

/// The observable phase of a [`Lifecycle`](crate::Lifecycle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    /// No termination has been requested yet; registrations are accepted.
    Idle,

    /// A termination request won the gate and its actions are being run.
    Finalizing,

    /// The termination sequence is over and the process is exiting.
    Terminated,
}

/// What became of a termination request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination {
    /// Another request already won the gate; nothing was run.
    AlreadyFinalizing,

    /// This request ran the termination sequence.
    ///
    /// Only observable when the installed [`Exit`](crate::Exit) returns
    /// instead of terminating the process.
    Completed(TerminationReport),
}

/// Summary of a completed termination sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminationReport {
    mode: TerminationMode,
    applicable: usize,
    budget: Duration,
    outcome: RaceOutcome,
}

impl TerminationReport {
    pub(crate) fn new(
        mode: TerminationMode,
        applicable: usize,
        budget: Duration,
        outcome: RaceOutcome,
    ) -> Self {
        Self {
            mode,
            applicable,
            budget,
            outcome,
        }
    }

    /// Reports the mode of the termination.
    pub fn mode(&self) -> TerminationMode {
        self.mode
    }

    /// Reports how many registered actions applied to the mode.
    pub fn applicable(&self) -> usize {
        self.applicable
    }

    /// Reports the total time budget granted to the applicable actions.
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Reports how the wait for the applicable actions ended.
    pub fn outcome(&self) -> RaceOutcome {
        self.outcome
    }
}

/// How the wait for termination actions ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RaceOutcome {
    /// Every applicable action returned within the budget.
    Finished,

    /// The budget elapsed first; remaining actions were abandoned.
    TimedOut,

    /// An action panicked, ending the walk before the remaining actions ran.
    Interrupted,
}
