use solidforge_core::GeometryEngine;
use solidforge_designer::script::evaluate;
use solidforge_designer::{ArtifactStore, CsgEngine, Session};
use std::fs::File;

fn csg_session(temp: &tempfile::TempDir) -> Session {
    let artifacts = ArtifactStore::at(temp.path()).unwrap();
    Session::new(Box::new(CsgEngine::new(32)), artifacts)
}

#[test]
fn test_subtract_scenario_with_real_geometry() {
    let temp = tempfile::tempdir().unwrap();
    let mut session = csg_session(&temp);

    session.create_box(2.0, 3.0, 4.0, true, Some("b1")).unwrap();
    session.create_cylinder(1.0, 5.0, true, Some("c1")).unwrap();
    session
        .boolean_operation("subtract", "b1", "c1", Some("result1"))
        .unwrap();

    let report = session.export_object("result1", "step", true).unwrap();
    let step = std::fs::read_to_string(report.file("step").unwrap()).unwrap();
    assert!(step.starts_with("ISO-10303-21;"));

    let mut stl = File::open(report.file("stl").unwrap()).unwrap();
    let mesh = stl_io::read_stl(&mut stl).unwrap();
    // A box with a bore has far more facets than a plain box
    assert!(mesh.faces.len() > 12);
}

#[test]
fn test_stl_preview_of_box_has_twelve_facets() {
    let temp = tempfile::tempdir().unwrap();
    let mut session = csg_session(&temp);
    let report = session.create_box(1.0, 1.0, 1.0, false, None).unwrap();

    let mut stl = File::open(report.file("stl").unwrap()).unwrap();
    let mesh = stl_io::read_stl(&mut stl).unwrap();
    assert_eq!(mesh.faces.len(), 12);
}

#[test]
fn test_script_runs_against_csg() {
    let engine = CsgEngine::new(24);
    let source = "
        let plate = box(40, 30, 5)
        let hole = cylinder(4, 10)
        result = difference(plate, translate(hole, 10, 0, 0))
    ";
    let handle = evaluate(source, &engine).unwrap();
    let mesh = engine.tessellate(&handle).unwrap();

    assert!((mesh.extents().x - 40.0).abs() < 1e-6);
    assert!((mesh.extents().z - 5.0).abs() < 1e-6);
}

#[test]
fn test_sub_tolerance_box_exports_as_step() {
    let temp = tempfile::tempdir().unwrap();
    let mut session = csg_session(&temp);
    session
        .create_box(0.0004, 0.0004, 0.0004, true, Some("tiny"))
        .unwrap();

    let report = session.export_object("tiny", "step", true).unwrap();
    let step = std::fs::read_to_string(report.file("step").unwrap()).unwrap();
    assert!(step.starts_with("ISO-10303-21;"));
    assert!(step.contains("CLOSED_SHELL"));
}
