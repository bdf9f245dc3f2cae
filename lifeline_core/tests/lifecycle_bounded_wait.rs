#[cfg(test)]
mod tests {
    use lifeline_test_util::{Journal, RecordedExit, RecordingExit};
    use lifeline_core::{RaceOutcome, Termination, TerminationOption};
    use pretty_assertions::assert_eq;
    use std::sync::mpsc;
    use std::time::Duration;
    use tokio::time::Instant;

    #[tokio::test]
    async fn stalled_action_is_abandoned() {
        // Given
        let (lifecycle, exit) = RecordingExit::lifecycle();
        let (_never_sent, never_received) = mpsc::channel::<()>();
        lifecycle
            .register_termination_with(
                move || {
                    let _ = never_received.recv();
                },
                [TerminationOption::Allowance(Duration::from_millis(10))],
            )
            .unwrap();
        let start = Instant::now();

        // When
        let termination = lifecycle.shutdown().await;
        let elapsed = start.elapsed();

        // Then
        let Termination::Completed(report) = termination else {
            panic!("expected the termination sequence to run");
        };
        assert_eq!(report.budget(), Duration::from_millis(12));
        assert_eq!(report.outcome(), RaceOutcome::TimedOut);
        assert!(
            elapsed >= Duration::from_millis(12),
            "shutdown() should wait for the whole budget when an action stalls",
        );
        assert!(
            elapsed < Duration::from_millis(500),
            "shutdown() should not wait past the budget",
        );
        assert_eq!(
            exit.exits(),
            vec![RecordedExit {
                code: 0,
                message: None,
            }],
        );
    }

    #[tokio::test]
    async fn actions_after_a_stalled_one_are_abandoned() {
        // Given
        let (lifecycle, _exit) = RecordingExit::lifecycle();
        let journal = Journal::default();
        lifecycle.register_termination(journal.recorder("first")).unwrap();
        lifecycle
            .register_termination_with(
                || std::thread::sleep(Duration::from_secs(3600)),
                [TerminationOption::Allowance(Duration::from_millis(20))],
            )
            .unwrap();

        // When
        let termination = lifecycle.shutdown().await;

        // Then
        assert!(matches!(
            termination,
            Termination::Completed(ref report) if report.outcome() == RaceOutcome::TimedOut
        ));
        assert_eq!(journal.entries(), Vec::<&str>::new());
    }

    #[tokio::test]
    async fn panicking_action_still_exits() {
        // Given
        let (lifecycle, exit) = RecordingExit::lifecycle();
        let journal = Journal::default();
        lifecycle.register_termination(journal.recorder("never")).unwrap();
        lifecycle
            .register_termination(|| panic!("cleanup failed"))
            .unwrap();
        lifecycle.register_termination(journal.recorder("first")).unwrap();

        // When
        let termination = lifecycle.abort("giving up").await;

        // Then
        assert!(matches!(
            termination,
            Termination::Completed(ref report) if report.outcome() == RaceOutcome::Interrupted
        ));
        assert_eq!(journal.entries(), vec!["first"]);
        assert_eq!(exit.exits().len(), 1);
    }

    #[tokio::test]
    async fn huge_allowances_saturate_the_budget() {
        // Given
        let (lifecycle, exit) = RecordingExit::lifecycle();
        let journal = Journal::default();
        for name in ["a", "b"] {
            lifecycle
                .register_termination_with(
                    journal.recorder(name),
                    [TerminationOption::Allowance(Duration::MAX)],
                )
                .unwrap();
        }

        // When
        let termination = lifecycle.shutdown().await;

        // Then
        let Termination::Completed(report) = termination else {
            panic!("expected the termination sequence to run");
        };
        assert_eq!(report.budget(), Duration::MAX);
        assert_eq!(report.outcome(), RaceOutcome::Finished);
        assert_eq!(journal.entries(), vec!["b", "a"]);
        assert_eq!(exit.exits().len(), 1);
    }
}
