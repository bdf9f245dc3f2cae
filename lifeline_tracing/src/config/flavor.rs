use serde::Deserialize;

/// A preset for the [event formatter](tracing_subscriber::fmt::format::Format)
/// of the `tracing_subscriber` crate.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatFlavor {
    /// The default [`Full`](tracing_subscriber::fmt::format::Full) event
    /// formatting.
    #[default]
    Full,

    /// The [`Compact`](tracing_subscriber::fmt::format::Compact) event
    /// formatting.
    Compact,

    /// The multi-line [`Pretty`](tracing_subscriber::fmt::format::Pretty) event
    /// formatting.
    Pretty,

    /// The [`Json`](tracing_subscriber::fmt::format::Json) event formatting.
    #[cfg(feature = "json")]
    Json,
}
