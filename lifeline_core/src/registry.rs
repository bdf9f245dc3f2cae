use crate::action::TerminationAction;
use crate::startup::StartupAction;
use crate::{RegistrationError, TerminationMode};
use parking_lot::Mutex;
use tracing::error;

/// Thread-safe, append-only storage for startup and termination actions.
///
/// A single lock guards both action lists together with the `started` and
/// `finalized` flags, so that appending an action and flipping a flag are
/// atomic with respect to each other. The lock is never held while actions
/// run.
pub(crate) struct Registry {
    state: Mutex<RegistryState>,
}

#[derive(Default)]
struct RegistryState {
    startup: Vec<StartupAction>,
    termination: Vec<TerminationAction>,
    started: bool,
    finalized: bool,
}

impl Registry {
    /// Internal constructor.
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(RegistryState::default()),
        }
    }

    /// Appends a startup action, unless startup actions have already been
    /// taken for running.
    pub(crate) fn register_startup(&self, action: StartupAction) -> Result<(), RegistrationError> {
        let mut state = self.state.lock();

        if state.started {
            error!("Refusing to register a startup action after startup has run");
            return Err(RegistrationError::StartupCompleted);
        }

        state.startup.push(action);

        Ok(())
    }

    /// Appends a termination action, unless the termination sequence has
    /// already begun.
    pub(crate) fn register_termination(
        &self,
        action: TerminationAction,
    ) -> Result<(), RegistrationError> {
        let mut state = self.state.lock();

        if state.finalized {
            error!(
                action = action.label().as_ref(),
                "Refusing to register a termination action after termination has begun",
            );
            return Err(RegistrationError::Finalized);
        }

        state.termination.push(action);

        Ok(())
    }

    /// Takes the registered startup actions, in registration order, and
    /// closes startup registration. Returns [`None`] if the actions have
    /// already been taken before.
    pub(crate) fn take_startup(&self) -> Option<Vec<StartupAction>> {
        let mut state = self.state.lock();

        if std::mem::replace(&mut state.started, true) {
            return None;
        }

        Some(std::mem::take(&mut state.startup))
    }

    /// Flips the one-shot `finalized` flag and takes the termination actions
    /// applicable to the given `mode`, in registration order.
    ///
    /// Only the first caller ever receives [`Some`]; every later (or
    /// concurrent) caller receives [`None`] without waiting for anything but
    /// the lock.
    ///
    /// Inapplicable actions are dropped after the lock is released, as their
    /// captured state may call back into the lifecycle when dropped.
    pub(crate) fn finalize(&self, mode: TerminationMode) -> Option<Vec<TerminationAction>> {
        let registered = {
            let mut state = self.state.lock();

            if std::mem::replace(&mut state.finalized, true) {
                return None;
            }

            std::mem::take(&mut state.termination)
        };

        let (applicable, inapplicable): (Vec<_>, Vec<_>) = registered
            .into_iter()
            .partition(|action| action.applies_to(mode));

        drop(inapplicable);

        Some(applicable)
    }

    /// Reports whether the termination sequence has begun.
    pub(crate) fn is_finalized(&self) -> bool {
        self.state.lock().finalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::TerminationActionBuilder;
    use crate::TerminationOption;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn action(label: &str, options: Vec<TerminationOption>) -> TerminationAction {
        TerminationActionBuilder::new(Box::new(|| {}))
            .apply(TerminationOption::Label(label.to_string()))
            .apply_all(options)
            .build()
    }

    fn labels(actions: &[TerminationAction]) -> Vec<&str> {
        actions.iter().map(|action| action.label().as_ref()).collect()
    }

    #[test]
    fn finalize_selects_applicable_in_registration_order() {
        // Given
        let registry = Registry::new();
        registry
            .register_termination(action("c", vec![TerminationOption::ShutdownOnly]))
            .unwrap();
        registry.register_termination(action("a", vec![])).unwrap();
        registry
            .register_termination(action("b", vec![TerminationOption::AbortOnly]))
            .unwrap();

        // When
        let actions = registry.finalize(TerminationMode::Shutdown).unwrap();

        // Then
        assert_eq!(labels(&actions), vec!["c", "a"]);
    }

    #[test]
    fn finalize_only_once() {
        // Given
        let registry = Registry::new();
        registry.register_termination(action("a", vec![])).unwrap();

        // When
        let first = registry.finalize(TerminationMode::Abort);
        let second = registry.finalize(TerminationMode::Shutdown);

        // Then
        assert_eq!(first.map(|actions| actions.len()), Some(1));
        assert!(second.is_none());
        assert!(registry.is_finalized());
    }

    #[test]
    fn inapplicable_actions_dropped_outside_the_lock() {
        // Given
        struct Sentinel(Arc<Registry>, Arc<AtomicBool>);

        impl Drop for Sentinel {
            fn drop(&mut self) {
                // Would deadlock if the lock were still held
                self.1.store(self.0.is_finalized(), Ordering::SeqCst);
            }
        }

        let registry = Arc::new(Registry::new());
        let observed = Arc::new(AtomicBool::new(false));
        let captured = Sentinel(Arc::clone(&registry), Arc::clone(&observed));
        registry
            .register_termination(
                TerminationActionBuilder::new(Box::new(move || drop(captured)))
                    .apply(TerminationOption::AbortOnly)
                    .build(),
            )
            .unwrap();

        // When
        let actions = registry.finalize(TerminationMode::Shutdown).unwrap();

        // Then
        assert!(actions.is_empty());
        assert!(observed.load(Ordering::SeqCst));
    }

    #[test]
    fn late_termination_registration() {
        // Given
        let registry = Registry::new();
        registry.finalize(TerminationMode::Shutdown).unwrap();

        // When
        let result = registry.register_termination(action("late", vec![]));

        // Then
        assert_eq!(result, Err(RegistrationError::Finalized));
    }

    #[test]
    fn late_startup_registration() {
        // Given
        let registry = Registry::new();
        registry.register_startup(Box::new(|| {})).unwrap();

        // When
        let taken = registry.take_startup().map(|actions| actions.len());
        let retaken = registry.take_startup().map(|actions| actions.len());
        let result = registry.register_startup(Box::new(|| {}));

        // Then
        assert_eq!(taken, Some(1));
        assert_eq!(retaken, None);
        assert_eq!(result, Err(RegistrationError::StartupCompleted));
    }
}
