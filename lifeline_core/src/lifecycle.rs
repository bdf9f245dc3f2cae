use crate::action::TerminationActionBuilder;
use crate::registry::Registry;
use crate::termination::orchestrator::Orchestrator;
use crate::{
    signal, startup, BridgeError, Exit, Phase, ProcessExit, RegistrationError, Termination,
    TerminationOption, TerminationRequest, TerminationSignal,
};
use std::sync::Arc;

/// Coordinates the startup and termination work of every subsystem in the
/// process.
///
/// A `Lifecycle` is a cheaply cloneable handle: all clones share the same
/// registry and the same one-shot termination gate. Create one per process
/// and hand clones to whoever needs to register work.
///
/// ## Termination
///
/// The first call to [`shutdown`](Self::shutdown) or [`abort`](Self::abort)
/// (or the first [bridged](Self::bridge_signals) signal) wins. It takes every
/// registered termination action that applies to its mode, grants them the sum
/// of their allowances plus 20%, and runs them on a dedicated thread in
/// reverse registration order. Once all of them return, or the budget
/// elapses, the process exits. Every other termination request returns
/// immediately without running anything.
///
/// Termination actions are not cancelled when the budget elapses; they are
/// simply not waited for any longer. A termination action that panics ends
/// the sequence early, and the process exits anyway.
///
/// ## Example
///
/// ```
/// use lifeline_core::{Lifecycle, TerminationOption};
/// use std::time::Duration;
///
/// let lifecycle = Lifecycle::new();
///
/// lifecycle
///     .register_startup(|| println!("connecting"))
///     .unwrap();
///
/// lifecycle
///     .register_termination_with(
///         || println!("disconnecting"),
///         [TerminationOption::Allowance(Duration::from_millis(250))],
///     )
///     .unwrap();
///
/// lifecycle.run_startup_once();
/// ```
#[derive(Clone)]
pub struct Lifecycle {
    inner: Arc<LifecycleInner>,
}

struct LifecycleInner {
    registry: Registry,
    orchestrator: Orchestrator,
}

impl Lifecycle {
    /// Creates a lifecycle that ends the process through [`ProcessExit`].
    pub fn new() -> Self {
        Self::with_exit(ProcessExit)
    }

    /// Creates a lifecycle that finishes every termination sequence with the
    /// given [`Exit`].
    pub fn with_exit(exit: impl Exit) -> Self {
        Self {
            inner: Arc::new(LifecycleInner {
                registry: Registry::new(),
                orchestrator: Orchestrator::new(Box::new(exit)),
            }),
        }
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    /// Registers an action to run when [`run_startup_once`] is called.
    /// Startup actions run in registration order.
    ///
    /// Once startup actions have run, the action is dropped and
    /// [`RegistrationError::StartupCompleted`] is returned.
    ///
    /// [`run_startup_once`]: Self::run_startup_once
    pub fn register_startup<F>(&self, action: F) -> Result<(), RegistrationError>
    where
        F: FnOnce() + Send + 'static,
    {
        self.inner.registry.register_startup(Box::new(action))
    }

    /// Registers an action to run on every termination path, with the
    /// [default allowance](crate::DEFAULT_ALLOWANCE).
    ///
    /// Once termination has begun, the action is dropped (never to be invoked)
    /// and [`RegistrationError::Finalized`] is returned.
    pub fn register_termination<F>(&self, action: F) -> Result<(), RegistrationError>
    where
        F: FnOnce() + Send + 'static,
    {
        self.register_termination_with(action, [] as [TerminationOption; 0])
    }

    /// Registers an action to run on termination, adjusted by the given
    /// [options](TerminationOption).
    ///
    /// Once termination has begun, the action is dropped (never to be invoked)
    /// and [`RegistrationError::Finalized`] is returned.
    pub fn register_termination_with<F, O>(
        &self,
        action: F,
        options: O,
    ) -> Result<(), RegistrationError>
    where
        F: FnOnce() + Send + 'static,
        O: IntoIterator<Item = TerminationOption>,
    {
        let action = TerminationActionBuilder::new(Box::new(action))
            .apply_all(options)
            .build();

        self.inner.registry.register_termination(action)
    }

    /// Runs every registered startup action, in registration order, on the
    /// current thread.
    ///
    /// ## Panics
    ///
    /// Panics if called more than once for the same lifecycle. Also lets
    /// through any panic of a startup action.
    #[track_caller]
    pub fn run_startup_once(&self) {
        let Some(actions) = self.inner.registry.take_startup() else {
            panic!("startup actions may only be run once per lifecycle");
        };

        startup::run(actions);
    }
}

impl Lifecycle {
    /// Requests a graceful termination with exit code `0`.
    ///
    /// Must be awaited within a `tokio` runtime with the time driver enabled.
    /// Outside of any runtime, use [`shutdown_blocking`](Self::shutdown_blocking).
    pub async fn shutdown(&self) -> Termination {
        self.terminate(TerminationRequest::shutdown()).await
    }

    /// Requests an abnormal termination with exit code `1`. A non-empty
    /// `message` is written to the standard error stream right before exit.
    pub async fn abort(&self, message: impl Into<String>) -> Termination {
        self.terminate(TerminationRequest::abort(message)).await
    }

    /// Runs the termination sequence for the given request, unless another
    /// request got there first.
    ///
    /// With the default [`ProcessExit`], a winning request never returns.
    pub async fn terminate(&self, request: TerminationRequest) -> Termination {
        let inner = &self.inner;

        inner.orchestrator.terminate(&inner.registry, request).await
    }

    /// Blocking counterpart of [`shutdown`](Self::shutdown).
    ///
    /// ## Panics
    ///
    /// Panics if called from within an asynchronous runtime.
    pub fn shutdown_blocking(&self) -> Termination {
        self.terminate_blocking(TerminationRequest::shutdown())
    }

    /// Blocking counterpart of [`abort`](Self::abort), callable from
    /// synchronous code that hits an unrecoverable condition.
    ///
    /// ## Panics
    ///
    /// Panics if called from within an asynchronous runtime.
    pub fn abort_blocking(&self, message: impl Into<String>) -> Termination {
        self.terminate_blocking(TerminationRequest::abort(message))
    }

    /// Blocking counterpart of [`terminate`](Self::terminate). Runs the
    /// termination sequence on a private current-thread runtime.
    ///
    /// ## Panics
    ///
    /// Panics if called from within an asynchronous runtime.
    pub fn terminate_blocking(&self, request: TerminationRequest) -> Termination {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .expect("it should be possible to build a temporary tokio runtime");

        runtime.block_on(self.terminate(request))
    }

    /// Turns the delivery of any of the given signals into a
    /// [shutdown](Self::shutdown) request. Deliveries after termination has
    /// begun are ignored.
    ///
    /// Listening has already started by the time the returned future
    /// completes.
    pub async fn bridge_signals(
        &self,
        signals: impl IntoIterator<Item = TerminationSignal>,
    ) -> Result<(), BridgeError> {
        signal::bridge(self.clone(), signals)?;

        // Give the listener task a chance to start polling
        tokio::task::yield_now().await;

        Ok(())
    }
}

impl Lifecycle {
    /// Reports the current [`Phase`].
    pub fn phase(&self) -> Phase {
        let inner = &self.inner;

        inner.orchestrator.phase(&inner.registry)
    }

    /// Reports whether no termination has been requested as of this moment.
    pub fn is_alive(&self) -> bool {
        self.phase() == Phase::Idle
    }

    /// Reports whether a termination request has passed the gate as of this
    /// moment.
    pub fn is_finalizing(&self) -> bool {
        self.phase() != Phase::Idle
    }

    /// Resolves once a termination request has passed the gate. Resolves
    /// immediately if that has already happened.
    pub async fn finalizing(&self) {
        self.inner.orchestrator.finalizing().await;
    }

    /// Resolves once the termination sequence has run its course and handed
    /// over to the [`Exit`]. With the default [`ProcessExit`] this never
    /// resolves in practice, as the process ends first.
    pub async fn terminated(&self) {
        self.inner.orchestrator.terminated().await;
    }
}
