use proptest::prelude::*;
use solidforge_core::ObjectKind;
use solidforge_designer::{ArtifactStore, Dimensions, FakeEngine, Session};
use tempfile::TempDir;

fn session() -> (TempDir, Session) {
    let temp = tempfile::tempdir().unwrap();
    let artifacts = ArtifactStore::at(temp.path()).unwrap();
    (temp, Session::new(Box::new(FakeEngine::new()), artifacts))
}

#[test]
fn test_default_box_names_follow_creation_order() {
    let (_temp, mut session) = session();
    let names: Vec<String> = (0..3)
        .map(|_| session.create_box(1.0, 1.0, 1.0, true, None).unwrap().object_id)
        .collect();

    assert_eq!(names, vec!["box_0", "box_1", "box_2"]);
    assert_eq!(session.workspace().current_name(), Some("box_2"));
}

#[test]
fn test_default_name_counts_all_kinds() {
    let (_temp, mut session) = session();
    session.create_box(1.0, 1.0, 1.0, true, None).unwrap();
    let cyl = session.create_cylinder(1.0, 2.0, true, None).unwrap();
    assert_eq!(cyl.object_id, "cylinder_1");

    let combined = session
        .boolean_operation("union", "box_0", "cylinder_1", None)
        .unwrap();
    assert_eq!(combined.object_id, "boolean_2");
}

#[test]
fn test_create_box_reports_dimensions_and_preview() {
    let (temp, mut session) = session();
    let report = session
        .create_box(2.0, 3.0, 4.0, true, Some("b1"))
        .unwrap();

    assert_eq!(report.object_id, "b1");
    assert_eq!(
        report.dimensions,
        Some(Dimensions::Box {
            width: 2.0,
            length: 3.0,
            height: 4.0
        })
    );
    let stl = report.file("stl").unwrap();
    assert_eq!(stl, &temp.path().join("b1.stl"));
    assert!(std::fs::metadata(stl).unwrap().len() > 84);
}

#[test]
fn test_create_cylinder_dimensions_serialize_flat() {
    let (_temp, mut session) = session();
    let report = session.create_cylinder(1.0, 5.0, true, Some("c1")).unwrap();
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["object_id"], "c1");
    assert_eq!(value["dimensions"]["radius"], 1.0);
    assert_eq!(value["dimensions"]["height"], 5.0);
    assert!(value["files"]["stl"].is_string());
}

#[test]
fn test_invalid_dimensions_register_nothing() {
    let (_temp, mut session) = session();
    let err = session.create_box(0.0, 1.0, 1.0, true, Some("flat")).unwrap_err();

    assert_eq!(err.kind_name(), "GeometryError");
    assert!(session.workspace().is_empty());
    assert!(session.workspace().current().is_none());
}

#[test]
fn test_union_records_operand_names() {
    let (_temp, mut session) = session();
    session.create_box(2.0, 2.0, 2.0, true, Some("a")).unwrap();
    session.create_cylinder(1.0, 3.0, true, Some("b")).unwrap();

    let report = session.boolean_operation("union", "a", "b", Some("u")).unwrap();
    assert_eq!(report.object_id, "u");

    let object = session.workspace().lookup("u").unwrap();
    match object.kind() {
        ObjectKind::Boolean { target, tool, .. } => {
            assert_eq!(target, "a");
            assert_eq!(tool, "b");
        }
        other => panic!("unexpected kind {:?}", other),
    }
    assert_eq!(session.workspace().current_name(), Some("u"));
}

#[test]
fn test_missing_operands_register_nothing() {
    let (_temp, mut session) = session();
    session.create_box(1.0, 1.0, 1.0, true, Some("a")).unwrap();

    let err = session
        .boolean_operation("union", "ghost", "a", None)
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Target object 'ghost' not found");

    let err = session
        .boolean_operation("subtract", "a", "ghost", None)
        .unwrap_err();
    assert_eq!(err.to_string(), "Tool object 'ghost' not found");

    assert_eq!(session.workspace().len(), 1);
    assert_eq!(session.workspace().current_name(), Some("a"));
}

#[test]
fn test_invalid_operation_is_unsupported() {
    let (_temp, mut session) = session();
    session.create_box(1.0, 1.0, 1.0, true, Some("a")).unwrap();
    session.create_box(1.0, 1.0, 1.0, true, Some("b")).unwrap();

    let err = session
        .boolean_operation("invalid", "a", "b", None)
        .unwrap_err();
    assert_eq!(err.kind_name(), "UnsupportedOperation");
    assert_eq!(session.workspace().len(), 2);
}

#[test]
fn test_explicit_name_overwrites_default_slot() {
    let (_temp, mut session) = session();
    session.create_box(1.0, 1.0, 1.0, true, None).unwrap();
    // The next default would be box_1; an explicit box_0 replaces the first
    session.create_box(2.0, 2.0, 2.0, true, Some("box_0")).unwrap();

    assert_eq!(session.workspace().len(), 1);
    match session.workspace().lookup("box_0").unwrap().kind() {
        ObjectKind::Box(params) => assert_eq!(params.width, 2.0),
        other => panic!("unexpected kind {:?}", other),
    }
}

#[test]
fn test_execute_script_stores_source() {
    let (_temp, mut session) = session();
    let source = "result = box(1, 2, 3)";
    let report = session.execute_script(source, None).unwrap();

    assert_eq!(report.object_id, "script_0");
    assert!(report.file("stl").is_some());
    match session.workspace().lookup("script_0").unwrap().kind() {
        ObjectKind::Script { script } => assert_eq!(script, source),
        other => panic!("unexpected kind {:?}", other),
    }
}

#[test]
fn test_script_failures_register_nothing() {
    let (_temp, mut session) = session();

    let err = session.execute_script("x = box(1, 1, 1)", None).unwrap_err();
    assert_eq!(err.kind_name(), "MissingResult");

    let err = session.execute_script("result = sphere(1)", None).unwrap_err();
    assert_eq!(err.kind_name(), "ScriptError");
    assert!(err.to_string().contains("sphere"));

    assert!(session.workspace().is_empty());
}

proptest! {
    #[test]
    fn prop_positive_box_registers_one_current_object(
        width in 0.001f64..1000.0,
        length in 0.001f64..1000.0,
        height in 0.001f64..1000.0,
        centered in any::<bool>(),
    ) {
        let (_temp, mut session) = session();
        let report = session.create_box(width, length, height, centered, None).unwrap();

        prop_assert_eq!(session.workspace().len(), 1);
        prop_assert_eq!(session.workspace().current_name(), Some(report.object_id.as_str()));
        let stl = report.file("stl").unwrap();
        prop_assert!(std::fs::metadata(stl).unwrap().len() > 0);
    }
}
