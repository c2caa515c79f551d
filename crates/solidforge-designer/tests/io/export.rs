use solidforge_designer::{validate_step_file, ArtifactStore, FakeEngine, Session};
use tempfile::TempDir;

fn session() -> (TempDir, Session) {
    let temp = tempfile::tempdir().unwrap();
    let artifacts = ArtifactStore::at(temp.path()).unwrap();
    (temp, Session::new(Box::new(FakeEngine::new()), artifacts))
}

fn subtract_scenario(session: &mut Session) {
    session.create_box(2.0, 3.0, 4.0, true, Some("b1")).unwrap();
    session.create_cylinder(1.0, 5.0, true, Some("c1")).unwrap();
    session
        .boolean_operation("subtract", "b1", "c1", Some("result1"))
        .unwrap();
}

#[test]
fn test_subtract_then_step_export() {
    let (temp, mut session) = session();
    subtract_scenario(&mut session);

    let report = session.export_object("result1", "step", true).unwrap();
    let step = report.file("step").unwrap();
    assert_eq!(step, &temp.path().join("result1.step"));
    assert!(report.file("stl").is_some());

    let text = std::fs::read_to_string(step).unwrap();
    assert!(text.starts_with("ISO-10303-21;"));
    assert!(text.contains("CLOSED_SHELL"));

    let err = session.export_object("result1", "xyz", true).unwrap_err();
    assert_eq!(err.kind_name(), "UnsupportedFormat");
}

#[test]
fn test_format_is_case_insensitive_and_stp_is_step() {
    let (temp, mut session) = session();
    session.create_box(1.0, 1.0, 1.0, true, Some("a")).unwrap();

    let report = session.export_object("a", "STP", true).unwrap();
    assert_eq!(report.file("stp").unwrap(), &temp.path().join("a.stp"));
    assert!(validate_step_file(report.file("stp").unwrap()).is_ok());
}

#[test]
fn test_stl_export_is_byte_identical() {
    let (_temp, mut session) = session();
    session.create_box(2.0, 3.0, 4.0, false, Some("a")).unwrap();

    let first = session.export_object("a", "stl", true).unwrap();
    let first_bytes = std::fs::read(first.file("stl").unwrap()).unwrap();
    let second = session.export_object("a", "stl", true).unwrap();
    let second_bytes = std::fs::read(second.file("stl").unwrap()).unwrap();

    assert!(!first_bytes.is_empty());
    assert_eq!(first_bytes, second_bytes);
    assert_eq!(first.files.len(), 1);
}

#[test]
fn test_tampered_step_fails_validation() {
    let (_temp, mut session) = session();
    session.create_box(1.0, 1.0, 1.0, true, Some("a")).unwrap();
    let report = session.export_object("a", "step", true).unwrap();
    let step = report.file("step").unwrap();

    let text = std::fs::read_to_string(step).unwrap();
    let tampered = text.replacen("ISO-10303-21;", "", 1);
    std::fs::write(step, tampered).unwrap();

    let err = validate_step_file(step).unwrap_err();
    assert_eq!(err.kind_name(), "ValidationError");
}

#[test]
fn test_export_unknown_object() {
    let (_temp, session) = session();
    let err = session.export_object("ghost", "stl", true).unwrap_err();
    assert_eq!(err.to_string(), "Object 'ghost' not found");
}

#[test]
fn test_step_with_explicit_path_gets_extension() {
    let (temp, mut session) = session();
    session.create_box(1.0, 1.0, 1.0, true, Some("a")).unwrap();

    let target = temp.path().join("nested_out");
    let report = session
        .export_step_with_path("a", Some(target.to_str().unwrap()))
        .unwrap();

    let step = report.file("step").unwrap();
    assert_eq!(step, &temp.path().join("nested_out.step"));
    assert!(step.exists());
    // Preview stays in the artifact directory
    assert_eq!(report.file("stl").unwrap(), &temp.path().join("a.stl"));
}

#[test]
fn test_step_with_path_keeps_stp_suffix() {
    let (temp, mut session) = session();
    session.create_box(1.0, 1.0, 1.0, true, Some("a")).unwrap();

    let target = temp.path().join("part.STP");
    let report = session
        .export_step_with_path("a", Some(target.to_str().unwrap()))
        .unwrap();
    assert_eq!(report.file("step").unwrap(), &target);
}

#[test]
fn test_step_without_path_uses_artifact_dir() {
    let (temp, mut session) = session();
    session.create_box(1.0, 1.0, 1.0, true, Some("a")).unwrap();

    let report = session.export_step_with_path("a", None).unwrap();
    assert_eq!(report.file("step").unwrap(), &temp.path().join("a.step"));
}

#[test]
fn test_step_export_of_sub_tolerance_box() {
    let (_temp, mut session) = session();
    session
        .create_box(0.0004, 0.0004, 0.0004, true, Some("tiny"))
        .unwrap();

    let report = session.export_object("tiny", "step", true).unwrap();
    let text = std::fs::read_to_string(report.file("step").unwrap()).unwrap();
    assert!(text.starts_with("ISO-10303"));
    assert_eq!(text.matches("CARTESIAN_POINT").count(), 8);
}
