use solidforge_designer::{ArtifactStore, FakeEngine, Session};
use solidforge_settings::RenderSettings;

#[test]
fn test_render_current_object() {
    let temp = tempfile::tempdir().unwrap();
    let artifacts = ArtifactStore::at(temp.path()).unwrap();
    let mut session = Session::new(Box::new(FakeEngine::new()), artifacts)
        .with_render_settings(RenderSettings {
            width: 120,
            height: 90,
        });

    session.create_box(1.0, 2.0, 3.0, true, Some("a")).unwrap();
    let report = session.render_current().unwrap();

    assert_eq!(report.object_id, "a");
    let png = report.file("png").unwrap();
    assert_eq!(png, &temp.path().join("a.png"));
    let bytes = std::fs::read(png).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn test_render_without_current_object() {
    let temp = tempfile::tempdir().unwrap();
    let artifacts = ArtifactStore::at(temp.path()).unwrap();
    let session = Session::new(Box::new(FakeEngine::new()), artifacts);

    let err = session.render_current().unwrap_err();
    assert_eq!(err.kind_name(), "NoCurrentObject");
    assert_eq!(err.to_string(), "No current object selected");
}
