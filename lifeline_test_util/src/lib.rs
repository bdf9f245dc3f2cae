#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![cfg_attr(test, deny(warnings))]

/// Implements the [`RecordingExit`].
mod exit;
pub use self::exit::{RecordedExit, RecordingExit};

/// Implements the [`Journal`].
mod journal;
pub use self::journal::Journal;
