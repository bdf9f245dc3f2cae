#[cfg(test)]
mod tests {
    use lifeline_core::{Phase, Termination, TerminationOption};
    use lifeline_test_util::{Journal, RecordedExit, RecordingExit};
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[test]
    fn abort_outside_of_any_runtime() {
        // Given
        let (lifecycle, exit) = RecordingExit::lifecycle();
        let journal = Journal::default();
        lifecycle.register_termination(journal.recorder("a")).unwrap();
        lifecycle
            .register_termination_with(journal.recorder("b"), [TerminationOption::AbortOnly])
            .unwrap();

        // When
        let termination = lifecycle.abort_blocking("corrupted state");

        // Then
        assert!(matches!(termination, Termination::Completed(_)));
        assert_eq!(journal.entries(), vec!["b", "a"]);
        assert_eq!(lifecycle.phase(), Phase::Terminated);
        assert_eq!(
            exit.exits(),
            vec![RecordedExit {
                code: 1,
                message: Some("corrupted state".to_string()),
            }],
        );
    }

    #[test]
    fn blocking_shutdown_honors_the_gate() {
        // Given
        let (lifecycle, exit) = RecordingExit::lifecycle();
        lifecycle
            .register_termination_with(
                || std::thread::sleep(Duration::from_secs(3600)),
                [TerminationOption::Allowance(Duration::from_millis(10))],
            )
            .unwrap();

        // When
        let first = lifecycle.shutdown_blocking();
        let second = lifecycle.abort_blocking("too late");

        // Then
        assert!(matches!(first, Termination::Completed(_)));
        assert_eq!(second, Termination::AlreadyFinalizing);
        assert_eq!(exit.exits().len(), 1);
    }
}
