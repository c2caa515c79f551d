use solidforge_communication::{EditorBridge, StopOutcome, MODEL_FILE_NAME, SCRIPT_FILE_NAME};
use solidforge_settings::{EditorSettings, LaunchCandidate};

fn quick_settings(candidates: Vec<LaunchCandidate>) -> EditorSettings {
    EditorSettings {
        candidates,
        startup_grace_ms: 150,
        shutdown_timeout_ms: 2000,
        ..EditorSettings::default()
    }
}

#[test]
fn test_push_then_pull_round_trips_text() {
    let temp = tempfile::tempdir().unwrap();
    let bridge = EditorBridge::new(temp.path(), EditorSettings::default()).unwrap();

    let script = "import cadquery as cq\nresult = cq.Workplane('XY').box(1, 2, 3)\n";
    let path = bridge.push_script(script).unwrap();
    assert_eq!(path, temp.path().join(SCRIPT_FILE_NAME));
    assert_eq!(bridge.pull_script().unwrap(), script);
}

#[test]
fn test_pull_sees_external_edits() {
    let temp = tempfile::tempdir().unwrap();
    let bridge = EditorBridge::new(temp.path(), EditorSettings::default()).unwrap();

    std::fs::write(bridge.script_file(), "result = 1").unwrap();
    assert_eq!(bridge.pull_script().unwrap(), "result = 1");
}

#[test]
fn test_pull_after_script_removed_is_io_error() {
    let temp = tempfile::tempdir().unwrap();
    let bridge = EditorBridge::new(temp.path(), EditorSettings::default()).unwrap();

    std::fs::remove_file(bridge.script_file()).unwrap();
    let err = bridge.pull_script().unwrap_err();
    assert_eq!(err.kind_name(), "IOError");
}

#[test]
fn test_stop_without_start() {
    let temp = tempfile::tempdir().unwrap();
    let mut bridge = EditorBridge::new(temp.path(), EditorSettings::default()).unwrap();

    assert!(!bridge.is_running());
    assert_eq!(bridge.stop().unwrap(), StopOutcome::NotRunning);
}

#[test]
fn test_diagnose_reports_candidates_and_files() {
    let temp = tempfile::tempdir().unwrap();
    let settings = quick_settings(vec![
        LaunchCandidate::new("solidforge-no-such-editor", &["{script}"]),
        LaunchCandidate::new("sh", &["-c", "true"]),
    ]);
    let mut bridge = EditorBridge::new(temp.path(), settings).unwrap();

    let report = bridge.diagnose();
    assert!(!report.running);
    assert!(report.pid.is_none());
    assert_eq!(report.candidates.len(), 2);
    assert_eq!(report.candidates[0].command, "solidforge-no-such-editor {script}");
    assert!(report.candidates[0].resolved.is_none());
    assert_eq!(report.model_file, temp.path().join(MODEL_FILE_NAME));
}

#[cfg(unix)]
#[test]
fn test_start_is_idempotent_and_stop_terminates() {
    let temp = tempfile::tempdir().unwrap();
    let settings = quick_settings(vec![LaunchCandidate::new("sleep", &["30"])]);
    let mut bridge = EditorBridge::new(temp.path(), settings).unwrap();

    bridge.start().unwrap();
    let pid = bridge.diagnose().pid.unwrap();
    bridge.start().unwrap();
    assert_eq!(bridge.diagnose().pid, Some(pid));
    assert!(bridge.diagnose().candidates[0].resolved.is_some());

    assert_eq!(bridge.stop().unwrap(), StopOutcome::Terminated);
    assert!(!bridge.is_running());
}

#[cfg(unix)]
#[test]
fn test_start_fails_when_no_candidate_survives() {
    let temp = tempfile::tempdir().unwrap();
    let settings = quick_settings(vec![LaunchCandidate::new("false", &[])]);
    let mut bridge = EditorBridge::new(temp.path(), settings).unwrap();

    let err = bridge.start().unwrap_err();
    assert_eq!(err.kind_name(), "ProcessError");
    assert!(!bridge.is_running());
}
