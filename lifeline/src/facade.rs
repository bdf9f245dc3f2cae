use lifeline_core::{
    BridgeError, Lifecycle, Phase, RegistrationError, Termination, TerminationOption,
    TerminationRequest, TerminationSignal,
};
use std::sync::OnceLock;

/// The lifecycle shared by the whole process.
static LIFECYCLE: OnceLock<Lifecycle> = OnceLock::new();

/// A process-global facade over a single [`Lifecycle`].
///
/// Library code may register startup & termination work here without holding
/// a handle. The underlying lifecycle is created on first use, unless one was
/// [installed](Self::install) beforehand.
///
/// ```
/// use lifeline::AppLifecycle;
///
/// AppLifecycle::register_termination(|| println!("flushing")).unwrap();
///
/// assert!(AppLifecycle::is_alive());
/// ```
pub struct AppLifecycle;

impl AppLifecycle {
    /// Installs the given lifecycle as the process-global one. Returns `false`
    /// (and drops the given lifecycle) if the global lifecycle is already in
    /// place, either installed or lazily created.
    pub fn install(lifecycle: Lifecycle) -> bool {
        LIFECYCLE.set(lifecycle).is_ok()
    }

    /// Returns a clone of the process-global lifecycle handle.
    pub fn handle() -> Lifecycle {
        Self::get().clone()
    }

    fn get() -> &'static Lifecycle {
        LIFECYCLE.get_or_init(Lifecycle::new)
    }
}

impl AppLifecycle {
    /// Delegates to [`Lifecycle::register_startup`].
    pub fn register_startup<F>(action: F) -> Result<(), RegistrationError>
    where
        F: FnOnce() + Send + 'static,
    {
        Self::get().register_startup(action)
    }

    /// Delegates to [`Lifecycle::register_termination`].
    pub fn register_termination<F>(action: F) -> Result<(), RegistrationError>
    where
        F: FnOnce() + Send + 'static,
    {
        Self::get().register_termination(action)
    }

    /// Delegates to [`Lifecycle::register_termination_with`].
    pub fn register_termination_with<F, O>(action: F, options: O) -> Result<(), RegistrationError>
    where
        F: FnOnce() + Send + 'static,
        O: IntoIterator<Item = TerminationOption>,
    {
        Self::get().register_termination_with(action, options)
    }

    /// Delegates to [`Lifecycle::run_startup_once`].
    #[track_caller]
    pub fn run_startup_once() {
        Self::get().run_startup_once()
    }
}

impl AppLifecycle {
    /// Delegates to [`Lifecycle::shutdown`].
    pub async fn shutdown() -> Termination {
        Self::get().shutdown().await
    }

    /// Delegates to [`Lifecycle::abort`].
    pub async fn abort(message: impl Into<String>) -> Termination {
        Self::get().abort(message).await
    }

    /// Delegates to [`Lifecycle::terminate`].
    pub async fn terminate(request: TerminationRequest) -> Termination {
        Self::get().terminate(request).await
    }

    /// Delegates to [`Lifecycle::shutdown_blocking`].
    pub fn shutdown_blocking() -> Termination {
        Self::get().shutdown_blocking()
    }

    /// Delegates to [`Lifecycle::abort_blocking`].
    pub fn abort_blocking(message: impl Into<String>) -> Termination {
        Self::get().abort_blocking(message)
    }

    /// Delegates to [`Lifecycle::bridge_signals`].
    pub async fn bridge_signals(
        signals: impl IntoIterator<Item = TerminationSignal>,
    ) -> Result<(), BridgeError> {
        Self::get().bridge_signals(signals).await
    }
}

impl AppLifecycle {
    /// Delegates to [`Lifecycle::phase`].
    pub fn phase() -> Phase {
        Self::get().phase()
    }

    /// Delegates to [`Lifecycle::is_alive`].
    pub fn is_alive() -> bool {
        Self::get().is_alive()
    }

    /// Delegates to [`Lifecycle::is_finalizing`].
    pub fn is_finalizing() -> bool {
        Self::get().is_finalizing()
    }

    /// Delegates to [`Lifecycle::finalizing`].
    pub async fn finalizing() {
        Self::get().finalizing().await
    }

    /// Delegates to [`Lifecycle::terminated`].
    pub async fn terminated() {
        Self::get().terminated().await
    }
}
