use serde::Deserialize;
use tracing_core::LevelFilter as TracingLevelFilter;

/// A deserializable stand-in for the `tracing` crate’s
/// [`LevelFilter`](TracingLevelFilter).
///
/// A verbosity level is “higher” if it is more verbose: [`Trace`](Self::Trace)
/// is higher than [`Error`](Self::Error).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Log **nothing**.
    #[serde(alias = "no", alias = "none")]
    Off,

    /// Log at level [`ERROR`](tracing_core::metadata::Level::ERROR) only.
    #[serde(alias = "err")]
    Error,

    /// Log at level [`WARN`](tracing_core::metadata::Level::WARN) and lower.
    #[serde(alias = "warning")]
    Warn,

    /// Log at level [`INFO`](tracing_core::metadata::Level::INFO) and lower.
    #[default]
    Info,

    /// Log at level [`DEBUG`](tracing_core::metadata::Level::DEBUG) and lower.
    Debug,

    /// Log **everything**.
    Trace,
}

impl Verbosity {
    /// Translates this [`Verbosity`] to the `tracing` crate’s
    /// [`LevelFilter`](TracingLevelFilter).
    pub fn to_tracing_level_filter(&self) -> TracingLevelFilter {
        match self {
            Self::Off => TracingLevelFilter::OFF,
            Self::Error => TracingLevelFilter::ERROR,
            Self::Warn => TracingLevelFilter::WARN,
            Self::Info => TracingLevelFilter::INFO,
            Self::Debug => TracingLevelFilter::DEBUG,
            Self::Trace => TracingLevelFilter::TRACE,
        }
    }
}

impl From<Verbosity> for TracingLevelFilter {
    fn from(value: Verbosity) -> Self {
        value.to_tracing_level_filter()
    }
}

impl From<&Verbosity> for TracingLevelFilter {
    fn from(value: &Verbosity) -> Self {
        value.to_tracing_level_filter()
    }
}
