use crate::registry::Registry;
use crate::termination::budget::total_budget;
use crate::termination::race::race;
use crate::{Exit, Phase, Termination, TerminationReport, TerminationRequest};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Drives a single termination sequence: gates entry, budgets and runs the
/// applicable actions, then hands over to the [`Exit`].
pub(crate) struct Orchestrator {
    exit: Box<dyn Exit>,
    finalizing: CancellationToken,
    terminated: CancellationToken,
}

impl Orchestrator {
    /// Internal constructor.
    pub(crate) fn new(exit: Box<dyn Exit>) -> Self {
        Self {
            exit,
            finalizing: CancellationToken::new(),
            terminated: CancellationToken::new(),
        }
    }

    /// Runs the termination sequence for the given `request`, unless another
    /// request has already passed the gate, in which case this returns
    /// immediately.
    pub(crate) async fn terminate(
        &self,
        registry: &Registry,
        request: TerminationRequest,
    ) -> Termination {
        let mode = request.mode();

        // First caller wins; everybody else walks away
        let Some(actions) = registry.finalize(mode) else {
            debug!(%mode, "Termination already in progress; ignoring request");
            return Termination::AlreadyFinalizing;
        };

        self.finalizing.cancel();

        let applicable = actions.len();
        let budget = total_budget(&actions);

        info!(
            %mode,
            applicable,
            budget_ms = budget.as_millis() as u64,
            "Termination initiated",
        );

        let outcome = race(actions, budget).await;

        info!(%mode, ?outcome, exit_code = request.exit_code(), "Exiting");

        self.terminated.cancel();
        self.exit.exit(&request);

        Termination::Completed(TerminationReport::new(mode, applicable, budget, outcome))
    }

    /// Reports the current phase, judging by the given registry.
    pub(crate) fn phase(&self, registry: &Registry) -> Phase {
        if self.terminated.is_cancelled() {
            Phase::Terminated
        } else if self.finalizing.is_cancelled() || registry.is_finalized() {
            Phase::Finalizing
        } else {
            Phase::Idle
        }
    }

    /// Resolves once a termination request has passed the gate.
    pub(crate) async fn finalizing(&self) {
        self.finalizing.cancelled().await;
    }

    /// Resolves once the termination sequence has handed over to the
    /// [`Exit`].
    pub(crate) async fn terminated(&self) {
        self.terminated.cancelled().await;
    }
}
