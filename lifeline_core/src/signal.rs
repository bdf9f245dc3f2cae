use crate::{BridgeError, Lifecycle};
use futures::stream::{self, Stream, StreamExt};
use std::fmt::{Display, Formatter};
use tracing::{debug, info};

/// An OS signal that may be bridged to a graceful
/// [shutdown](Lifecycle::shutdown).
///
/// On non-Unix platforms, every variant stands for the `ctrl_c` action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationSignal {
    /// `SIGHUP`.
    Hangup,

    /// `SIGINT`.
    Interrupt,

    /// `SIGTERM`.
    Terminate,

    /// `SIGQUIT`.
    Quit,

    /// `SIGUSR1`.
    User1,

    /// `SIGUSR2`.
    User2,

    /// Any other signal, by its raw platform number.
    Raw(i32),
}

impl TerminationSignal {
    /// The signals that conventionally ask a process to go away: `SIGHUP`,
    /// `SIGINT` and `SIGTERM`.
    pub fn standard() -> [Self; 3] {
        [Self::Hangup, Self::Interrupt, Self::Terminate]
    }

    /// Translates this signal into its `tokio` counterpart.
    #[cfg(unix)]
    fn kind(self) -> tokio::signal::unix::SignalKind {
        use tokio::signal::unix::SignalKind;

        match self {
            Self::Hangup => SignalKind::hangup(),
            Self::Interrupt => SignalKind::interrupt(),
            Self::Terminate => SignalKind::terminate(),
            Self::Quit => SignalKind::quit(),
            Self::User1 => SignalKind::user_defined1(),
            Self::User2 => SignalKind::user_defined2(),
            Self::Raw(number) => SignalKind::from_raw(number),
        }
    }
}

impl Display for TerminationSignal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hangup => f.write_str("SIGHUP"),
            Self::Interrupt => f.write_str("SIGINT"),
            Self::Terminate => f.write_str("SIGTERM"),
            Self::Quit => f.write_str("SIGQUIT"),
            Self::User1 => f.write_str("SIGUSR1"),
            Self::User2 => f.write_str("SIGUSR2"),
            Self::Raw(number) => write!(f, "signal {number}"),
        }
    }
}

/// Installs listeners for the given signals and spawns a task that turns
/// every delivery into a shutdown request.
///
/// Listeners are installed before this function returns, so that a signal
/// delivered right afterwards is already observed. Installing a listener
/// replaces the default disposition of that signal for the whole process.
#[cfg(unix)]
pub(crate) fn bridge(
    lifecycle: Lifecycle,
    signals: impl IntoIterator<Item = TerminationSignal>,
) -> Result<(), BridgeError> {
    use tokio::signal::unix::signal;

    let mut listeners = Vec::new();

    for termination_signal in signals {
        let listener = signal(termination_signal.kind())
            .map_err(|error| BridgeError::new(termination_signal, error))?;

        listeners.push(Box::pin(stream::unfold(listener, move |mut listener| async move {
            listener
                .recv()
                .await
                .map(|()| (termination_signal, listener))
        })));
    }

    if listeners.is_empty() {
        return Ok(());
    }

    tokio::spawn(relay(lifecycle, stream::select_all(listeners)));

    Ok(())
}

/// Spawns a task that turns every `ctrl_c` action into a shutdown request.
#[cfg(not(unix))]
pub(crate) fn bridge(
    lifecycle: Lifecycle,
    signals: impl IntoIterator<Item = TerminationSignal>,
) -> Result<(), BridgeError> {
    let Some(first) = signals.into_iter().next() else {
        return Ok(());
    };

    let deliveries = stream::unfold((), move |()| async move {
        tokio::signal::ctrl_c().await.ok().map(|()| (first, ()))
    });

    tokio::spawn(relay(lifecycle, Box::pin(deliveries)));

    Ok(())
}

/// Forwards every delivered signal until all listeners are closed.
async fn relay(lifecycle: Lifecycle, mut deliveries: impl Stream<Item = TerminationSignal> + Unpin) {
    while let Some(delivered) = deliveries.next().await {
        forward(&lifecycle, delivered);
    }

    debug!("Signal listeners closed; no longer bridging signals");
}

/// Requests a shutdown on behalf of the delivered signal, in its own task so
/// that the listener keeps draining deliveries while the termination sequence
/// runs.
fn forward(lifecycle: &Lifecycle, delivered: TerminationSignal) {
    if lifecycle.is_finalizing() {
        debug!(signal = %delivered, "Termination signal ignored; already terminating");
        return;
    }

    info!(signal = %delivered, "Termination signal intercepted");

    let lifecycle = lifecycle.clone();
    tokio::spawn(async move {
        lifecycle.shutdown().await;
    });
}
