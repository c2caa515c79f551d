use solidforge_core::{
    BooleanOp, BoxParams, GeometryHandle, ModelingObject, ObjectKind, Workspace,
};

fn handle() -> GeometryHandle {
    GeometryHandle::new("test", ())
}

fn unit_box(name: &str) -> ModelingObject {
    ModelingObject::new(
        name,
        ObjectKind::Box(BoxParams {
            width: 1.0,
            length: 1.0,
            height: 1.0,
            centered: true,
        }),
        handle(),
    )
}

#[test]
fn test_default_names_follow_object_count() {
    let mut ws = Workspace::new("w", handle());
    for expected in ["box_0", "box_1", "box_2"] {
        let name = ws.next_default_name("box");
        assert_eq!(name, expected);
        ws.register(unit_box(&name));
    }
    assert_eq!(ws.object_names(), vec!["box_0", "box_1", "box_2"]);
}

#[test]
fn test_derived_object_keeps_operand_names_only() {
    let mut ws = Workspace::new("w", handle());
    ws.register(unit_box("a"));
    ws.register(unit_box("b"));
    ws.register(ModelingObject::new(
        "u",
        ObjectKind::Boolean {
            operation: BooleanOp::Union,
            target: "a".to_string(),
            tool: "b".to_string(),
        },
        handle(),
    ));

    // Overwriting an operand leaves the derived record untouched
    ws.register(unit_box("a"));
    let derived = ws.lookup("u").unwrap();
    assert_eq!(derived.kind().operands(), vec!["a", "b"]);
    assert_eq!(ws.current_name(), Some("a"));
}

#[test]
fn test_current_always_names_stored_object() {
    let mut ws = Workspace::new("w", handle());
    assert!(ws.current().is_none());
    ws.register(unit_box("x"));
    let current = ws.current().unwrap();
    assert_eq!(current.name(), "x");
    assert!(ws.contains(current.name()));
}
