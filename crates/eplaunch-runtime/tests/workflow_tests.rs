#[cfg(test)]
mod tests {
    use std::ffi::{OsStr, OsString};
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    use eplaunch_config::LaunchConfig;
    use eplaunch_core::{BatchId, LaunchError, OperatorList, RunOutcome, WorkflowState};
    use eplaunch_runtime::menu::{ABORTED, INVALID_SELECTION};
    use eplaunch_runtime::testing::{FixedClock, RecordingRunner, ScriptedPrompt};
    use eplaunch_runtime::workflow::COMPLETED;
    use eplaunch_runtime::{BatchPolicy, LaunchWorkflow, WorkflowSettings};

    const STAMP: &str = "1718000000123456789";

    fn write_catalog(dir: &Path) -> PathBuf {
        let path = dir.join("scene_tasks.yaml");
        std::fs::write(
            &path,
            "Rs_int:\n  activity: picking_up_trash\nPomaria_1_int:\n  activity: clean_house\n",
        )
        .unwrap();
        path
    }

    fn settings(dir: &Path, operators: &[&str]) -> WorkflowSettings {
        WorkflowSettings {
            catalog_path: write_catalog(dir),
            operators: OperatorList::new(operators.iter().copied()),
            select_task: false,
            placeholder_task: String::new(),
            batch: BatchPolicy::Fixed(BatchId::new("1")),
            save_folder: dir.join("tmp_data"),
            per_operator_folder: false,
            recorder_program: "python".into(),
            recorder_args: vec!["record_episode.py".into()],
            working_dir: None,
        }
    }

    fn workflow(
        settings: WorkflowSettings,
        runner: &RecordingRunner,
    ) -> (LaunchWorkflow, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(STAMP, "rig-01"));
        let wf = LaunchWorkflow::new(settings, clock.clone(), Arc::new(runner.clone()));
        (wf, clock)
    }

    // ── End to end ─────────────────────────────────────────────

    #[tokio::test]
    async fn test_select_confirm_record() {
        let dir = tempfile::tempdir().unwrap();
        let runner = RecordingRunner::new();
        let (wf, clock) = workflow(settings(dir.path(), &["Deyu", "Shine"]), &runner);
        let mut prompt = ScriptedPrompt::new(["2", "y"]);

        let report = wf.run(&mut prompt).await.unwrap();

        let save = dir.path().join("tmp_data");
        let meta_path = save.join(format!("batch_1__{STAMP}__episode.json"));
        let body = std::fs::read_to_string(&meta_path).unwrap();
        assert_eq!(
            body,
            format!(
                "{{\"operator\": \"Shine\", \"batch_id\": \"1\", \"timestamp\": \"{STAMP}\", \"task_name\": \"\", \"host_name\": \"rig-01\"}}\n"
            )
        );

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        let recording = save.join(format!("batch_1__{STAMP}.hdf5"));
        assert_eq!(calls[0].program, "python");
        assert_eq!(
            calls[0].args,
            vec![
                OsString::from("record_episode.py"),
                "--batch_id".into(),
                "1".into(),
                "--recording_path".into(),
                recording.clone().into_os_string(),
            ]
        );
        assert!(!recording.exists(), "the recorder owns the data file");

        assert_eq!(clock.reads(), 1);
        assert_eq!(prompt.count_shown(COMPLETED), 1);
        assert_eq!(report.outcome.exit_code(), 0);
        assert_eq!(
            report.states,
            vec![
                WorkflowState::Start,
                WorkflowState::CatalogLoaded,
                WorkflowState::OperatorSelected,
                WorkflowState::Confirmed,
                WorkflowState::MetadataWritten,
                WorkflowState::RecordingLaunched,
                WorkflowState::Done,
            ]
        );
        match report.outcome {
            RunOutcome::Completed { metadata, paths } => {
                assert_eq!(metadata.operator, "Shine");
                assert_eq!(paths.metadata, meta_path);
                assert_eq!(paths.recording, recording);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_summary_shows_task_and_operator() {
        let dir = tempfile::tempdir().unwrap();
        let runner = RecordingRunner::new();
        let (wf, _) = workflow(settings(dir.path(), &["Deyu", "Shine"]), &runner);
        let mut prompt = ScriptedPrompt::new(["1", "n"]);
        wf.run(&mut prompt).await.unwrap();
        assert!(prompt
            .shown()
            .iter()
            .any(|s| s == "Selected task: \nSelected operator: Deyu"));
    }

    #[tokio::test]
    async fn test_invalid_choices_reprompt() {
        let dir = tempfile::tempdir().unwrap();
        let runner = RecordingRunner::new();
        let ops = ["A", "B", "C", "D", "E", "F"];
        let (wf, _) = workflow(settings(dir.path(), &ops), &runner);
        let mut prompt = ScriptedPrompt::new(["abc", "99", "2", "Y"]);

        let report = wf.run(&mut prompt).await.unwrap();
        assert_eq!(prompt.count_shown(INVALID_SELECTION), 2);
        match report.outcome {
            RunOutcome::Completed { metadata, .. } => assert_eq!(metadata.operator, "B"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    // ── Abort ──────────────────────────────────────────────────

    #[tokio::test]
    async fn test_decline_has_no_side_effects() {
        for answer in ["", "n", "yes", "N"] {
            let dir = tempfile::tempdir().unwrap();
            let runner = RecordingRunner::new();
            let (wf, _) = workflow(settings(dir.path(), &["Deyu", "Shine"]), &runner);
            let mut prompt = ScriptedPrompt::new(["1", answer]);

            let report = wf.run(&mut prompt).await.unwrap();

            assert_eq!(report.outcome, RunOutcome::Aborted);
            assert_eq!(report.outcome.exit_code(), 0);
            assert_eq!(report.final_state(), Some(WorkflowState::Aborted));
            assert_eq!(prompt.count_shown(ABORTED), 1);
            assert_eq!(prompt.count_shown(COMPLETED), 0);
            assert!(runner.calls().is_empty());
            assert!(!dir.path().join("tmp_data").exists(), "answer {answer:?}");
        }
    }

    // ── Config errors ──────────────────────────────────────────

    #[tokio::test]
    async fn test_missing_catalog_fails_before_prompting() {
        let dir = tempfile::tempdir().unwrap();
        let runner = RecordingRunner::new();
        let mut s = settings(dir.path(), &["Deyu"]);
        s.catalog_path = dir.path().join("missing.yaml");
        let (wf, _) = workflow(s, &runner);
        let mut prompt = ScriptedPrompt::new(["1", "y"]);

        let err = wf.run(&mut prompt).await.unwrap_err();
        assert!(err.is_config());
        assert!(prompt.shown().is_empty());
        assert_eq!(prompt.remaining(), 2);
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_catalog_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let runner = RecordingRunner::new();
        let mut s = settings(dir.path(), &["Deyu"]);
        std::fs::write(&s.catalog_path, "- just\n- a list\n").unwrap();
        s.select_task = true;
        let (wf, _) = workflow(s, &runner);
        let err = wf.run(&mut ScriptedPrompt::new(["1"])).await.unwrap_err();
        assert!(matches!(err, LaunchError::Catalog { .. }));
    }

    #[tokio::test]
    async fn test_empty_operator_list_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let runner = RecordingRunner::new();
        let (wf, _) = workflow(settings(dir.path(), &[]), &runner);
        let err = wf.run(&mut ScriptedPrompt::new(["1"])).await.unwrap_err();
        assert!(err.is_config());
    }

    #[tokio::test]
    async fn test_closed_input_is_interrupted() {
        let dir = tempfile::tempdir().unwrap();
        let runner = RecordingRunner::new();
        let (wf, _) = workflow(settings(dir.path(), &["Deyu"]), &runner);
        let err = wf.run(&mut ScriptedPrompt::new(["1"])).await.unwrap_err();
        assert!(matches!(err, LaunchError::Interrupted(_)));
        assert!(runner.calls().is_empty());
    }

    // ── Recorder status ────────────────────────────────────────

    #[tokio::test]
    async fn test_recorder_failure_propagates_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let runner = RecordingRunner::new().with_exit_code(2);
        let (wf, _) = workflow(settings(dir.path(), &["Kris"]), &runner);
        let mut prompt = ScriptedPrompt::new(["1", "y"]);

        let report = wf.run(&mut prompt).await.unwrap();
        assert_eq!(report.outcome.exit_code(), 2);
        assert_eq!(report.final_state(), Some(WorkflowState::RecorderFailed));
        assert_eq!(prompt.count_shown(COMPLETED), 0);
        // Metadata is written before the recorder starts.
        assert!(dir
            .path()
            .join(format!("tmp_data/batch_1__{STAMP}__episode.json"))
            .exists());
    }

    #[tokio::test]
    async fn test_recorder_killed_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let runner = RecordingRunner::new().killed();
        let (wf, _) = workflow(settings(dir.path(), &["Kris"]), &runner);
        let report = wf.run(&mut ScriptedPrompt::new(["1", "y"])).await.unwrap();
        assert_eq!(report.outcome.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_recorder_spawn_failure_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let runner = RecordingRunner::new().failing_to_spawn();
        let (wf, _) = workflow(settings(dir.path(), &["Kris"]), &runner);
        let err = wf
            .run(&mut ScriptedPrompt::new(["1", "y"]))
            .await
            .unwrap_err();
        assert!(matches!(err, LaunchError::Recorder { .. }));
    }

    // ── Options ────────────────────────────────────────────────

    #[tokio::test]
    async fn test_task_selection_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let runner = RecordingRunner::new();
        let mut s = settings(dir.path(), &["Deyu", "Shine"]);
        s.select_task = true;
        let (wf, _) = workflow(s, &runner);
        let mut prompt = ScriptedPrompt::new(["1", "2", "y"]);

        let report = wf.run(&mut prompt).await.unwrap();
        assert!(report.states.contains(&WorkflowState::TaskSelected));
        assert!(prompt
            .shown()
            .iter()
            .any(|s| s == "Selected task: Pomaria_1_int\nSelected operator: Deyu"));
        match report.outcome {
            RunOutcome::Completed { metadata, .. } => {
                assert_eq!(metadata.task_name, "Pomaria_1_int");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_placeholder_task_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let runner = RecordingRunner::new();
        let mut s = settings(dir.path(), &["Deyu"]);
        s.placeholder_task = "pilot".into();
        let (wf, _) = workflow(s, &runner);
        let report = wf.run(&mut ScriptedPrompt::new(["1", "y"])).await.unwrap();
        match report.outcome {
            RunOutcome::Completed { metadata, .. } => assert_eq!(metadata.task_name, "pilot"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_next_batch_and_operator_folder() {
        let dir = tempfile::tempdir().unwrap();
        let runner = RecordingRunner::new();
        let mut s = settings(dir.path(), &["Deyu", "Shine"]);
        s.batch = BatchPolicy::Next;
        s.per_operator_folder = true;
        let shine = dir.path().join("tmp_data/Shine");
        std::fs::create_dir_all(&shine).unwrap();
        std::fs::write(shine.join("batch_4__1__episode.json"), "{}").unwrap();
        let (wf, _) = workflow(s, &runner);

        wf.run(&mut ScriptedPrompt::new(["2", "y"])).await.unwrap();

        assert!(shine.join(format!("batch_5__{STAMP}__episode.json")).exists());
        let call = &runner.calls()[0];
        assert_eq!(call.flag_value("--batch_id"), Some(OsStr::new("5")));
        let expected = shine.join(format!("batch_5__{STAMP}.hdf5"));
        assert_eq!(call.flag_value("--recording_path"), Some(expected.as_os_str()));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_recording_path_keeps_non_utf8_folder() {
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let runner = RecordingRunner::new();
        let mut s = settings(dir.path(), &["Kris"]);
        s.save_folder = dir.path().join(OsStr::from_bytes(b"rig_\xff"));
        let save = s.save_folder.clone();
        let (wf, _) = workflow(s, &runner);

        wf.run(&mut ScriptedPrompt::new(["1", "y"])).await.unwrap();

        assert!(save.join(format!("batch_1__{STAMP}__episode.json")).exists());
        let expected = save.join(format!("batch_1__{STAMP}.hdf5"));
        assert_eq!(
            runner.calls()[0].flag_value("--recording_path"),
            Some(expected.as_os_str())
        );
    }

    #[test]
    fn test_settings_from_config() {
        let mut config = LaunchConfig::default();
        config.recording.save_folder = "/data/episodes".into();
        config.recording.working_dir = Some(PathBuf::from("/opt/recorder"));
        let s = WorkflowSettings::from_config(&config);
        assert_eq!(s.save_folder, PathBuf::from("/data/episodes"));
        assert_eq!(s.operators.names(), ["Deyu", "Shine", "Kris"]);
        assert_eq!(s.batch, BatchPolicy::Fixed(BatchId::new("1")));
        assert_eq!(s.working_dir, Some(PathBuf::from("/opt/recorder")));
        assert_eq!(s.folder_for("Kris"), PathBuf::from("/data/episodes"));
    }
}
