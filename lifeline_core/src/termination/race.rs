use crate::action::TerminationAction;
use crate::RaceOutcome;
use scopeguard::guard_on_unwind;
use std::thread;
use std::time::Duration;
use tokio::select;
use tokio::sync::oneshot;
use tracing::{debug, error, warn};

/// Name given to the thread that walks the termination actions.
const EXECUTOR_THREAD_NAME: &str = "lifeline-termination";

/// Runs the given actions in reverse order on a dedicated thread and waits
/// until either all of them return or the `budget` elapses, whichever comes
/// first.
///
/// Elapsing the budget does not stop the executor thread: it only stops the
/// wait. Any action still running at that point is abandoned to whatever
/// happens to the process next.
pub(crate) async fn race(actions: Vec<TerminationAction>, budget: Duration) -> RaceOutcome {
    if actions.is_empty() {
        return RaceOutcome::Finished;
    }

    let (done_in, done_out) = oneshot::channel();

    if let Err(error) = spawn_executor(actions, done_in) {
        error!(
            alert = true,
            error = %error,
            "Failed to spawn the termination executor; skipping termination actions",
        );
        return RaceOutcome::Interrupted;
    }

    select! {
        biased;
        completion = done_out => match completion {
            Ok(()) => {
                debug!("All termination actions completed");
                RaceOutcome::Finished
            }
            Err(_) => {
                error!("Termination actions were interrupted by a failing action");
                RaceOutcome::Interrupted
            }
        },
        _ = tokio::time::sleep(budget) => {
            warn!(
                budget_ms = budget.as_millis() as u64,
                "Termination actions did not complete within the budget",
            );
            RaceOutcome::TimedOut
        }
    }
}

/// Spawns the detached executor thread. The `done` sender is consumed when
/// the walk completes; if an action panics, the sender is dropped instead.
fn spawn_executor(
    actions: Vec<TerminationAction>,
    done: oneshot::Sender<()>,
) -> std::io::Result<()> {
    thread::Builder::new()
        .name(EXECUTOR_THREAD_NAME.to_string())
        .spawn(move || {
            for action in actions.into_iter().rev() {
                let label = action.label().clone();

                let _unwind = guard_on_unwind((), |_| {
                    error!(action = label.as_ref(), "Termination action panicked");
                });

                debug!(action = label.as_ref(), "Invoking termination action");
                action.invoke();
            }

            // The waiting side may have given up already
            let _ = done.send(());
        })?;

    Ok(())
}
