use crate::{FormatFlavor, Verbosity};
use serde::Deserialize;
use std::collections::BTreeMap;

pub mod flavor;
pub mod verbosity;

/// The logging section of the application configuration: everything needed to
/// pre-configure the [formatted layer](tracing_subscriber::fmt::Layer) of the
/// `tracing_subscriber` crate.
///
/// Every key is optional; missing keys fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TracingConfig {
    #[serde(alias = "level")]
    verbosity: Verbosity,
    #[serde(alias = "flavour")]
    flavor: FormatFlavor,
    #[serde(alias = "colour", alias = "show_color", alias = "with_color")]
    color: bool,
    #[serde(alias = "with_timestamp")]
    show_timestamp: bool,
    #[serde(alias = "with_target")]
    show_target: bool,
    #[serde(alias = "with_file")]
    show_file: bool,
    #[serde(alias = "show_line", alias = "with_line_number")]
    show_line_number: bool,
    #[serde(alias = "with_level")]
    show_level: bool,
    #[serde(alias = "with_thread_id")]
    show_thread_id: bool,
    #[serde(alias = "with_thread_name")]
    show_thread_name: bool,
    #[cfg(feature = "json")]
    #[serde(alias = "flat_json")]
    flatten_json: bool,
    #[serde(alias = "target_verbosity")]
    targets: BTreeMap<String, Verbosity>,
}

impl TracingConfig {
    /// Replaces the root [`Verbosity`] of this config.
    pub fn with_verbosity(self, verbosity: impl Into<Verbosity>) -> Self {
        Self {
            verbosity: verbosity.into(),
            ..self
        }
    }

    /// Replaces the [`FormatFlavor`] of this config.
    pub fn with_flavor(self, flavor: FormatFlavor) -> Self {
        Self { flavor, ..self }
    }

    /// Enables or disables colored output.
    pub fn with_color(self, color: bool) -> Self {
        Self { color, ..self }
    }

    /// Shows or hides the timestamp of each event.
    pub fn with_timestamp(self, show_timestamp: bool) -> Self {
        Self {
            show_timestamp,
            ..self
        }
    }

    /// Merges an extra per-target [`Verbosity`] level into this config.
    pub fn with_target(
        mut self,
        target: impl Into<String>,
        verbosity: impl Into<Verbosity>,
    ) -> Self {
        self.targets.insert(target.into(), verbosity.into());

        self
    }

    /// Merges extra per-target [`Verbosity`] levels into this config.
    pub fn with_targets<T, L>(mut self, targets: impl IntoIterator<Item = (T, L)>) -> Self
    where
        T: Into<String>,
        L: Into<Verbosity>,
    {
        self.targets.extend(
            targets
                .into_iter()
                .map(|(target, verbosity)| (target.into(), verbosity.into())),
        );

        self
    }
}

impl TracingConfig {
    /// Reports the root [verbosity level](Verbosity).
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Reports the [formatting flavor](FormatFlavor).
    pub fn flavor(&self) -> FormatFlavor {
        self.flavor
    }

    /// Reports whether the output is
    /// [colored](tracing_subscriber::fmt::Layer::with_ansi).
    pub fn color(&self) -> bool {
        self.color
    }

    /// Reports whether the output includes the
    /// [timestamp](tracing_subscriber::fmt::Layer::without_time).
    pub fn show_timestamp(&self) -> bool {
        self.show_timestamp
    }

    /// Reports whether the output includes the
    /// [target](tracing_subscriber::fmt::Layer::with_target).
    pub fn show_target(&self) -> bool {
        self.show_target
    }

    /// Reports whether the output includes the
    /// [file](tracing_subscriber::fmt::Layer::with_file).
    pub fn show_file(&self) -> bool {
        self.show_file
    }

    /// Reports whether the output includes the
    /// [line number](tracing_subscriber::fmt::Layer::with_line_number).
    pub fn show_line_number(&self) -> bool {
        self.show_line_number
    }

    /// Reports whether the output includes the
    /// [level](tracing_subscriber::fmt::Layer::with_level).
    pub fn show_level(&self) -> bool {
        self.show_level
    }

    /// Reports whether the output includes the
    /// [thread ID](tracing_subscriber::fmt::Layer::with_thread_ids).
    pub fn show_thread_id(&self) -> bool {
        self.show_thread_id
    }

    /// Reports whether the output includes the
    /// [thread name](tracing_subscriber::fmt::Layer::with_thread_names).
    pub fn show_thread_name(&self) -> bool {
        self.show_thread_name
    }

    /// Reports whether JSON output flattens event fields into the top level.
    #[cfg(feature = "json")]
    pub fn flatten_json(&self) -> bool {
        self.flatten_json
    }

    /// Reports the per-target verbosity overrides.
    pub fn targets(&self) -> &BTreeMap<String, Verbosity> {
        &self.targets
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::default(),
            flavor: FormatFlavor::default(),
            color: true,
            show_timestamp: true,
            show_target: true,
            show_file: false,
            show_line_number: false,
            show_level: true,
            // The termination executor runs on its own thread
            show_thread_id: true,
            show_thread_name: true,
            #[cfg(feature = "json")]
            flatten_json: true,
            targets: BTreeMap::new(),
        }
    }
}

impl AsRef<TracingConfig> for TracingConfig {
    fn as_ref(&self) -> &TracingConfig {
        self
    }
}
