use proptest::prelude::*;
use solidforge_core::{GeometryHandle, WorkspaceRegistry, DEFAULT_WORKSPACE};

fn assembly() -> GeometryHandle {
    GeometryHandle::new("test", ())
}

#[test]
fn test_created_workspace_is_empty_and_active() {
    let mut registry = WorkspaceRegistry::new(assembly());
    registry.create("bracket", assembly()).unwrap();

    let info = registry.active().info();
    assert_eq!(info.workspace_id, "bracket");
    assert_eq!(info.object_count, 0);
    assert!(info.objects.is_empty());
    assert!(info.current_object.is_none());
}

#[test]
fn test_workspaces_are_isolated() {
    let mut registry = WorkspaceRegistry::new(assembly());
    registry.create("a", assembly()).unwrap();
    registry.create("b", assembly()).unwrap();

    registry.switch("a").unwrap();
    assert_eq!(registry.active().name(), "a");
    registry.switch(DEFAULT_WORKSPACE).unwrap();
    assert_eq!(registry.active().name(), DEFAULT_WORKSPACE);
    assert_eq!(registry.len(), 3);
}

proptest! {
    #[test]
    fn prop_switch_to_unregistered_fails(name in "[a-z]{1,12}") {
        prop_assume!(name != DEFAULT_WORKSPACE);
        let mut registry = WorkspaceRegistry::new(assembly());

        let err = registry.switch(&name).unwrap_err();
        prop_assert_eq!(err.kind_name(), "NotFound");
        prop_assert_eq!(registry.active_name(), DEFAULT_WORKSPACE);
    }

    #[test]
    fn prop_create_then_info_is_empty(name in "[a-z][a-z0-9_]{0,15}") {
        prop_assume!(name != DEFAULT_WORKSPACE);
        let mut registry = WorkspaceRegistry::new(assembly());

        registry.create(&name, assembly()).unwrap();
        let info = registry.active().info();
        prop_assert_eq!(info.workspace_id, name);
        prop_assert_eq!(info.object_count, 0);
        prop_assert!(info.current_object.is_none());
    }
}
