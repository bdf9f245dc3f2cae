#[cfg(test)]
mod tests {
    use lifeline_test_util::{Journal, RecordedExit, RecordingExit};
    use lifeline::{Launchpad, LifelineError, Phase};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn boots_and_shuts_down() {
        // Given
        let (lifecycle, exit) = RecordingExit::lifecycle();
        let journal = Journal::default();
        lifecycle.register_startup(journal.recorder("start")).unwrap();
        lifecycle.register_termination(journal.recorder("stop")).unwrap();
        let main_journal = journal.clone();
        let async_main = async move { (main_journal.recorder("main"))() };

        // When
        Launchpad::new(async_main)
            .with_lifecycle(lifecycle.clone())
            .without_env()
            .quiet(true)
            .try_boot()
            .unwrap();

        // Then
        assert_eq!(journal.entries(), vec!["start", "main", "stop"]);
        assert_eq!(lifecycle.phase(), Phase::Terminated);
        assert_eq!(
            exit.exits(),
            vec![RecordedExit {
                code: 0,
                message: None,
            }],
        );
    }

    #[test]
    fn main_requests_abort() {
        // Given
        let (lifecycle, exit) = RecordingExit::lifecycle();
        let main_lifecycle = lifecycle.clone();
        let async_main = async move {
            main_lifecycle.abort("unrecoverable").await;
        };

        // When
        Launchpad::new(async_main)
            .with_lifecycle(lifecycle)
            .without_env()
            .quiet(true)
            .try_boot()
            .unwrap();

        // Then
        assert_eq!(
            exit.exits(),
            vec![RecordedExit {
                code: 1,
                message: Some("unrecoverable".to_string()),
            }],
        );
    }

    #[test]
    fn termination_cuts_main_short() {
        // Given
        let (lifecycle, exit) = RecordingExit::lifecycle();
        let finished = Arc::new(AtomicBool::new(false));
        let main_lifecycle = lifecycle.clone();
        let main_finished = Arc::clone(&finished);
        let async_main = async move {
            let terminator = main_lifecycle.clone();
            tokio::spawn(async move { terminator.shutdown().await });
            tokio::time::sleep(std::time::Duration::from_secs(30)).await;
            main_finished.store(true, Ordering::SeqCst);
        };

        // When
        Launchpad::new(async_main)
            .with_lifecycle(lifecycle)
            .without_env()
            .quiet(true)
            .try_boot()
            .unwrap();

        // Then
        assert!(!finished.load(Ordering::SeqCst));
        assert_eq!(exit.exits().len(), 1);
    }

    #[test]
    fn pid_file_lives_while_main_runs() {
        // Given
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("service.pid");
        let (lifecycle, _exit) = RecordingExit::lifecycle();
        let main_path = path.clone();
        let async_main = async move {
            let contents = std::fs::read_to_string(&main_path).unwrap();
            assert_eq!(contents, format!("{}\n", std::process::id()));
        };

        // When
        Launchpad::new(async_main)
            .with_lifecycle(lifecycle)
            .without_env()
            .with_pid_file(&path)
            .quiet(true)
            .try_boot()
            .unwrap();

        // Then
        assert!(!path.exists());
    }

    #[test]
    fn config_file_is_applied() {
        // Given
        let dir = tempfile::tempdir().unwrap();
        let pid_path = dir.path().join("from-config.pid");
        let config_path = dir.path().join("lifeline.toml");
        std::fs::write(
            &config_path,
            format!("quiet = true\npid_file = {:?}\n", pid_path.display().to_string()),
        )
        .unwrap();
        let (lifecycle, _exit) = RecordingExit::lifecycle();
        let main_path = pid_path.clone();
        let async_main = async move {
            assert!(main_path.exists());
        };

        // When
        Launchpad::new(async_main)
            .with_lifecycle(lifecycle)
            .without_env()
            .with_config_file(&config_path)
            .try_boot()
            .unwrap();

        // Then
        assert!(!pid_path.exists());
    }

    #[test]
    fn missing_config_file() {
        // Given
        let (lifecycle, exit) = RecordingExit::lifecycle();

        // When
        let result = Launchpad::new(async {})
            .with_lifecycle(lifecycle)
            .without_env()
            .with_config_file("/definitely/not/here/lifeline.toml")
            .try_boot();

        // Then
        assert!(matches!(result, Err(LifelineError::Config(_))));
        assert_eq!(exit.exits(), Vec::<RecordedExit>::new());
    }
}
