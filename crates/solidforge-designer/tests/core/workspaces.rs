use solidforge_designer::{ArtifactStore, FakeEngine, Session};
use tempfile::TempDir;

fn session() -> (TempDir, Session) {
    let temp = tempfile::tempdir().unwrap();
    let artifacts = ArtifactStore::at(temp.path()).unwrap();
    (temp, Session::new(Box::new(FakeEngine::new()), artifacts))
}

#[test]
fn test_new_workspace_is_empty_and_active() {
    let (temp, mut session) = session();
    session.create_box(1.0, 1.0, 1.0, true, None).unwrap();

    assert_eq!(session.create_workspace("bracket").unwrap(), "bracket");
    let report = session.workspace_report();
    assert_eq!(report.info.workspace_id, "bracket");
    assert_eq!(report.info.object_count, 0);
    assert!(report.info.current_object.is_none());
    assert_eq!(report.temp_directory, temp.path());
}

#[test]
fn test_workspaces_do_not_share_objects() {
    let (_temp, mut session) = session();
    session.create_box(1.0, 1.0, 1.0, true, Some("a")).unwrap();
    session.create_workspace("other").unwrap();

    // Operands must come from the active workspace
    session.create_box(1.0, 1.0, 1.0, true, Some("b")).unwrap();
    let err = session.boolean_operation("union", "a", "b", None).unwrap_err();
    assert!(err.is_not_found());

    session.switch_workspace("default").unwrap();
    assert_eq!(session.workspace().object_names(), vec!["a"]);
}

#[test]
fn test_switch_to_unknown_keeps_active() {
    let (_temp, mut session) = session();
    session.create_workspace("w1").unwrap();

    let err = session.switch_workspace("nope").unwrap_err();
    assert_eq!(err.kind_name(), "NotFound");
    assert_eq!(session.registry().active_name(), "w1");
}

#[test]
fn test_duplicate_workspace_fails() {
    let (_temp, mut session) = session();
    let err = session.create_workspace("default").unwrap_err();
    assert_eq!(err.kind_name(), "AlreadyExists");
}

#[test]
fn test_list_workspaces() {
    let (_temp, mut session) = session();
    session.create_workspace("zeta").unwrap();
    session.create_workspace("alpha").unwrap();

    let list = session.list_workspaces();
    assert_eq!(list.workspaces, vec!["alpha", "default", "zeta"]);
    assert_eq!(list.active, "alpha");
}

#[test]
fn test_report_serializes_flat() {
    let (_temp, mut session) = session();
    session.create_box(1.0, 1.0, 1.0, true, None).unwrap();

    let value = serde_json::to_value(session.workspace_report()).unwrap();
    assert_eq!(value["workspace_id"], "default");
    assert_eq!(value["object_count"], 1);
    assert_eq!(value["objects"][0], "box_0");
    assert_eq!(value["current_object"], "box_0");
    assert!(value["temp_directory"].is_string());
}
