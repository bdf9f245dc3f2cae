use crate::LifelineError;
use config::{Config, Environment, File};
use lifeline_tracing::TracingConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The default base name of the configuration file, without extension.
const DEFAULT_FILE_NAME: &str = "lifeline";

/// The default prefix of the overriding environment variables.
const DEFAULT_ENV_PREFIX: &str = "LIFELINE";

/// Represents the configuration consumed by the [`Launchpad`](crate::Launchpad).
///
/// Every key is optional; missing keys fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LifelineConfig {
    #[serde(alias = "signals")]
    standard_signals: bool,
    #[serde(alias = "pidfile")]
    pid_file: Option<PathBuf>,
    #[serde(alias = "silent")]
    quiet: bool,
    #[serde(alias = "banner")]
    log_spam: bool,
    #[serde(alias = "logging")]
    tracing: TracingConfig,
}

impl LifelineConfig {
    /// Reports whether the standard termination signals should be bridged to
    /// a shutdown.
    pub fn standard_signals(&self) -> bool {
        self.standard_signals
    }

    /// Reports the location of the PID file, if one should be written.
    pub fn pid_file(&self) -> Option<&Path> {
        self.pid_file.as_deref()
    }

    /// Reports whether logging should be left uninstalled.
    pub fn quiet(&self) -> bool {
        self.quiet
    }

    /// Reports whether the startup banner (start time, process ID, working
    /// directory, user and command line) should be logged. Always `false` in
    /// the quiet mode.
    pub fn log_spam(&self) -> bool {
        self.log_spam && !self.quiet
    }

    /// Reports the logging configuration.
    pub fn tracing(&self) -> &TracingConfig {
        &self.tracing
    }
}

impl LifelineConfig {
    /// Enables or disables the bridging of standard termination signals.
    pub fn with_standard_signals(self, standard_signals: bool) -> Self {
        Self {
            standard_signals,
            ..self
        }
    }

    /// Sets the location of the PID file.
    pub fn with_pid_file(self, pid_file: impl Into<PathBuf>) -> Self {
        Self {
            pid_file: Some(pid_file.into()),
            ..self
        }
    }

    /// Enables or disables the quiet mode.
    pub fn with_quiet(self, quiet: bool) -> Self {
        Self { quiet, ..self }
    }

    /// Enables or disables the startup banner.
    pub fn with_log_spam(self, log_spam: bool) -> Self {
        Self { log_spam, ..self }
    }

    /// Replaces the logging configuration.
    pub fn with_tracing(self, tracing: TracingConfig) -> Self {
        Self { tracing, ..self }
    }
}

impl Default for LifelineConfig {
    fn default() -> Self {
        Self {
            standard_signals: false,
            pid_file: None,
            quiet: false,
            log_spam: true,
            tracing: TracingConfig::default(),
        }
    }
}

/// Chooses the sources a [`LifelineConfig`] is assembled from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ConfigChoices {
    /// An explicit configuration file, which then must exist. Without it, an
    /// optional `lifeline.*` file in the working directory is used.
    pub(crate) file: Option<PathBuf>,
    /// The prefix of the overriding environment variables, or `None` to ignore
    /// the environment.
    pub(crate) env_prefix: Option<String>,
}

impl Default for ConfigChoices {
    fn default() -> Self {
        Self {
            file: None,
            env_prefix: Some(DEFAULT_ENV_PREFIX.to_string()),
        }
    }
}

impl ConfigChoices {
    /// Assembles the [`LifelineConfig`] from the chosen sources. Environment
    /// variables take precedence over the file.
    pub(crate) fn assemble(&self) -> Result<LifelineConfig, LifelineError> {
        let mut builder = Config::builder();

        builder = match self.file.as_deref() {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_FILE_NAME).required(false)),
        };

        if let Some(prefix) = self.env_prefix.as_deref() {
            builder = builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );
        }

        let config = builder.build()?.try_deserialize()?;

        Ok(config)
    }
}
