#[cfg(test)]
mod tests {
    use lifeline_test_util::{Journal, RecordedExit, RecordingExit};
    use lifeline::{AppLifecycle, Lifecycle, Phase, RegistrationError, TerminationOption};
    use pretty_assertions::assert_eq;

    // The global lifecycle is shared by the whole test binary, so the full
    // round trip lives in a single test.
    #[tokio::test]
    async fn global_round_trip() {
        // Given
        let (lifecycle, exit) = RecordingExit::lifecycle();
        let journal = Journal::default();

        // When
        let installed = AppLifecycle::install(lifecycle);
        let reinstalled = AppLifecycle::install(Lifecycle::new());

        // Then
        assert!(installed);
        assert!(!reinstalled);

        // When
        AppLifecycle::register_startup(journal.recorder("start")).unwrap();
        AppLifecycle::register_termination(journal.recorder("a")).unwrap();
        AppLifecycle::register_termination_with(
            journal.recorder("abort-only"),
            [TerminationOption::AbortOnly],
        )
        .unwrap();
        AppLifecycle::handle()
            .register_termination(journal.recorder("b"))
            .unwrap();
        AppLifecycle::run_startup_once();

        // Then
        assert!(AppLifecycle::is_alive());
        assert_eq!(AppLifecycle::phase(), Phase::Idle);

        // When
        AppLifecycle::shutdown().await;
        let late = AppLifecycle::register_termination(journal.recorder("late"));

        // Then
        assert_eq!(journal.entries(), vec!["start", "b", "a"]);
        assert_eq!(late, Err(RegistrationError::Finalized));
        assert!(AppLifecycle::is_finalizing());
        AppLifecycle::terminated().await;
        assert_eq!(
            exit.exits(),
            vec![RecordedExit {
                code: 0,
                message: None,
            }],
        );
    }
}
