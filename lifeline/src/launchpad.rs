use crate::banner;
use crate::config::ConfigChoices;
use crate::{AppLifecycle, LifelineConfig, LifelineError, PidFile};
use lifeline_core::{Lifecycle, Termination, TerminationSignal};
use lifeline_tracing::{make_layer, Registry, SubscriberExt, SubscriberInitExt};
use std::path::PathBuf;
use tokio::runtime::Builder as RuntimeBuilder;
use tokio::select;
use tracing::{debug, error, info};

/// Configures and boots an application around its main future.
///
/// ## Boot sequence
///
/// 1. Assembles the [`LifelineConfig`] and applies the overrides given to the
///    builder methods.
/// 2. Installs logging and logs the startup banner, unless
///    [quiet](Self::quiet).
/// 3. Builds a multi-thread `tokio` runtime.
/// 4. Bridges the [standard signals](TerminationSignal::standard) (if
///    enabled), writes the [`PidFile`] (if configured), and runs the startup
///    actions once.
/// 5. Drives the main future until it completes, or until termination begins.
/// 6. Requests a shutdown, which is a no-op if some other termination request
///    got there first, and waits for the termination sequence to finish.
///
/// Unless a lifecycle is given [explicitly](Self::with_lifecycle), the
/// process-global [`AppLifecycle`] is used.
pub struct Launchpad<Main>
where
    Main: Future<Output = ()>,
{
    async_main: Main,
    lifecycle: Option<Lifecycle>,
    config_choices: ConfigChoices,
    standard_signals: Option<bool>,
    pid_file: Option<PathBuf>,
    quiet: Option<bool>,
    log_spam: Option<bool>,
}

impl<Main> Launchpad<Main>
where
    Main: Future<Output = ()>,
{
    /// Creates a `Launchpad` around the application’s main future.
    pub fn new(async_main: Main) -> Self {
        Self {
            async_main,
            lifecycle: None,
            config_choices: ConfigChoices::default(),
            standard_signals: None,
            pid_file: None,
            quiet: None,
            log_spam: None,
        }
    }
}

impl<Main> Launchpad<Main>
where
    Main: Future<Output = ()>,
{
    /// Uses the given lifecycle instead of the process-global one.
    pub fn with_lifecycle(self, lifecycle: Lifecycle) -> Self {
        Self {
            lifecycle: Some(lifecycle),
            ..self
        }
    }

    /// Reads the configuration from the given file, which then must exist.
    ///
    /// Defaults to an optional `lifeline.toml` (or `lifeline.yaml`) in the
    /// working directory.
    pub fn with_config_file(self, path: impl Into<PathBuf>) -> Self {
        Self {
            config_choices: ConfigChoices {
                file: Some(path.into()),
                ..self.config_choices
            },
            ..self
        }
    }

    /// Specifies the prefix of the environment variables that override the
    /// configuration file.
    ///
    /// Defaults to `"LIFELINE"`.
    pub fn with_env_prefix(self, prefix: impl Into<String>) -> Self {
        Self {
            config_choices: ConfigChoices {
                env_prefix: Some(prefix.into()),
                ..self.config_choices
            },
            ..self
        }
    }

    /// Ignores the environment variables when assembling the configuration.
    pub fn without_env(self) -> Self {
        Self {
            config_choices: ConfigChoices {
                env_prefix: None,
                ..self.config_choices
            },
            ..self
        }
    }

    /// Enables or disables the bridging of the standard termination signals,
    /// regardless of the configuration.
    pub fn with_standard_signals(self, enabled: bool) -> Self {
        Self {
            standard_signals: Some(enabled),
            ..self
        }
    }

    /// Writes a PID file at the given location, regardless of the
    /// configuration.
    pub fn with_pid_file(self, path: impl Into<PathBuf>) -> Self {
        Self {
            pid_file: Some(path.into()),
            ..self
        }
    }

    /// Leaves logging uninstalled (or not), regardless of the configuration.
    /// The quiet mode also suppresses the startup banner.
    pub fn quiet(self, quiet: bool) -> Self {
        Self {
            quiet: Some(quiet),
            ..self
        }
    }

    /// Enables or disables the startup banner, regardless of the
    /// configuration.
    pub fn with_log_spam(self, enabled: bool) -> Self {
        Self {
            log_spam: Some(enabled),
            ..self
        }
    }
}

impl<Main> Launchpad<Main>
where
    Main: Future<Output = ()>,
{
    /// Runs the boot sequence.
    ///
    /// ## Panics
    ///
    /// Panics if the boot sequence [fails](Self::try_boot).
    pub fn boot(self) {
        if let Err(error) = self.try_boot() {
            panic!("failed to boot the application: {}", error);
        }
    }

    /// Runs the boot sequence, reporting a failure to assemble the
    /// configuration or to build the runtime.
    pub fn try_boot(self) -> Result<(), LifelineError> {
        let config = self.resolve_config()?;

        if !config.quiet() {
            install_logging(&config);
        }

        if config.log_spam() {
            banner::announce();
        }

        let runtime = RuntimeBuilder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(LifelineError::Runtime)?;

        let lifecycle = self.lifecycle.unwrap_or_else(AppLifecycle::handle);

        runtime.block_on(run(lifecycle, config, self.async_main));

        Ok(())
    }

    fn resolve_config(&self) -> Result<LifelineConfig, LifelineError> {
        let mut config = self.config_choices.assemble()?;

        if let Some(standard_signals) = self.standard_signals {
            config = config.with_standard_signals(standard_signals);
        }

        if let Some(pid_file) = self.pid_file.as_ref() {
            config = config.with_pid_file(pid_file);
        }

        if let Some(quiet) = self.quiet {
            config = config.with_quiet(quiet);
        }

        if let Some(log_spam) = self.log_spam {
            config = config.with_log_spam(log_spam);
        }

        Ok(config)
    }
}

/// Installs the formatted logging layer as the global default, unless some
/// other subscriber was installed first.
fn install_logging(config: &LifelineConfig) {
    let installed = Registry::default()
        .with(make_layer(config.tracing()))
        .try_init();

    if installed.is_err() {
        debug!("A global subscriber is already installed; keeping it");
    }
}

async fn run<Main>(lifecycle: Lifecycle, config: LifelineConfig, async_main: Main)
where
    Main: Future<Output = ()>,
{
    if config.standard_signals() {
        if let Err(error) = lifecycle
            .bridge_signals(TerminationSignal::standard())
            .await
        {
            error!(
                signal = %error.signal(),
                error = %error,
                "Failed to bridge the standard termination signals",
            );
        }
    }

    if let Some(path) = config.pid_file() {
        if let Err(error) = PidFile::new(path).write(&lifecycle) {
            error!(error = %error, "Proceeding without a PID file");
        }
    }

    lifecycle.run_startup_once();

    info!("Started");

    // Run the main logic, keeping an eye on the lifecycle
    select! {
        biased;
        _ = lifecycle.finalizing() => {},
        _ = async_main => {},
    }

    // Whoever began the termination first, stay until it is done
    if let Termination::AlreadyFinalizing = lifecycle.shutdown().await {
        lifecycle.terminated().await;
    }
}
