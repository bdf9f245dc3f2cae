#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![cfg_attr(test, deny(warnings))]

/// Termination actions & their registration options.
mod action;
pub use self::action::{TerminationOption, DEFAULT_ALLOWANCE};

/// Error types.
mod error;
pub use self::error::{BridgeError, RegistrationError};

/// The final step of the termination sequence.
mod exit;
pub use self::exit::{Exit, ProcessExit};

/// The [`Lifecycle`] handle.
mod lifecycle;
pub use self::lifecycle::Lifecycle;

/// Append-only action storage with the one-shot gates.
mod registry;

/// Bridging of OS signals to shutdown requests.
mod signal;
pub use self::signal::TerminationSignal;

/// Running of startup actions.
mod startup;

/// Termination requests, budgeting & the bounded race.
mod termination;
pub use self::termination::{
    Phase, RaceOutcome, Termination, TerminationMode, TerminationReport, TerminationRequest,
};
