#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![cfg_attr(test, deny(warnings))]

/// Implements the startup banner.
mod banner;

/// Implements the [`LifelineConfig`] & its assembly.
mod config;
pub use self::config::LifelineConfig;

/// Implements the custom [`LifelineError`] type.
mod error;
pub use self::error::LifelineError;

/// Implements the [`AppLifecycle`] facade.
mod facade;
pub use self::facade::AppLifecycle;

/// Implements the [`PidFile`] utility.
mod pid_file;
pub use self::pid_file::PidFile;

/// Implements the [`Launchpad`] utility for booting an application.
mod launchpad;
pub use self::launchpad::Launchpad;

/// Re-exports the public API of `lifeline-core` in the root of this crate for
/// convenience.
pub use lifeline_core::*;

/// Re-exports the logging configuration types of `lifeline-tracing` for
/// convenience.
pub use lifeline_tracing::{FormatFlavor, TracingConfig, Verbosity};

/// Re-exports the public API of `tokio` for convenience.
pub use tokio;
