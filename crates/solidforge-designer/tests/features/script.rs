use solidforge_core::{GeometryEngine, ModelingError};
use solidforge_designer::script::evaluate;
use solidforge_designer::script::parser::MAX_DEPTH;
use solidforge_designer::FakeEngine;

fn extents(source: &str) -> [f64; 3] {
    let engine = FakeEngine::new();
    let handle = evaluate(source, &engine).unwrap();
    let mesh = engine.tessellate(&handle).unwrap();
    let e = mesh.extents();
    [e.x, e.y, e.z]
}

fn script_error(source: &str) -> String {
    match evaluate(source, &FakeEngine::new()) {
        Err(ModelingError::Script { reason }) => reason,
        other => panic!("expected script error, got {:?}", other),
    }
}

#[test]
fn test_simple_box() {
    assert_eq!(extents("result = box(2, 3, 4)"), [2.0, 3.0, 4.0]);
}

#[test]
fn test_let_bindings_and_arithmetic() {
    let source = "
        # plate with a pin
        let w = 10 * 2
        let h = (3 + 1) / 2
        let plate = box(w, w / 2, h)
        result = plate
    ";
    assert_eq!(extents(source), [20.0, 10.0, 2.0]);
}

#[test]
fn test_keyword_arguments_and_centering() {
    let engine = FakeEngine::new();
    let handle = evaluate("result = box(2, 2, 2, centered = false)", &engine).unwrap();
    let mesh = engine.tessellate(&handle).unwrap();
    assert_eq!(mesh.bounds_min.z, 0.0);

    let handle = evaluate("result = cylinder(height = 4, radius = 1)", &engine).unwrap();
    let mesh = engine.tessellate(&handle).unwrap();
    assert_eq!(mesh.bounds_min.z, -2.0);
}

#[test]
fn test_variadic_union_and_translate() {
    let source = "a = box(1, 1, 1); b = translate(a, 2, 0, 0); c = translate(a, 0, 0, -3)
result = union(a, b, c)";
    assert_eq!(extents(source), [3.0, 1.0, 4.0]);
}

#[test]
fn test_aliases() {
    let source = "a = box(4, 4, 4)\nb = box(2, 2, 8)\nresult = cut(a, b)";
    assert_eq!(extents(source), [4.0, 4.0, 4.0]);

    let source = "a = box(4, 4, 4)\nb = box(2, 2, 8)\nresult = intersect(a, b)";
    assert_eq!(extents(source), [2.0, 2.0, 4.0]);
}

#[test]
fn test_pi_constant() {
    let [x, _, _] = extents("result = box(pi, 1, 1)");
    assert!((x - std::f64::consts::PI).abs() < 1e-12);
}

#[test]
fn test_missing_result() {
    let err = evaluate("a = box(1, 1, 1)", &FakeEngine::new()).unwrap_err();
    assert!(matches!(err, ModelingError::MissingResult));
}

#[test]
fn test_result_must_be_shape() {
    let reason = script_error("result = 42");
    assert!(reason.contains("must be a shape"));
}

#[test]
fn test_errors_are_located() {
    assert!(script_error("result = box(1, 1)").starts_with("1:10:"));
    assert!(script_error("a = 1\nresult = b").starts_with("2:10:"));
    assert!(script_error("result = box(1, 1, 1, depth = 2)").contains("no parameter 'depth'"));
    assert!(script_error("result = union(box(1, 1, 1))").contains("at least two shapes"));
    assert!(script_error("result = box(1, 1, true)").contains("expected a number"));
    assert!(script_error("result = box(1, 1, 1 / 0)").contains("division by zero"));
}

#[test]
fn test_engine_failures_become_script_errors() {
    let reason = script_error("result = box(-1, 1, 1)");
    assert!(reason.contains("width"));

    let reason = script_error("a = box(1, 1, 1)\nresult = intersection(a, translate(a, 5, 0, 0))");
    assert!(reason.contains("empty"));
}

#[test]
fn test_deep_nesting_is_a_script_error() {
    let nested = |n: usize| format!("result = box({}1{}, 1, 1)", "(".repeat(n), ")".repeat(n));
    assert_eq!(extents(&nested(MAX_DEPTH / 2)), [1.0, 1.0, 1.0]);

    for n in [2_000, 30_000] {
        let reason = script_error(&nested(n));
        assert!(reason.contains("nested deeper"), "{}", reason);
    }
}

#[test]
fn test_overflowing_offsets_are_rejected() {
    let huge = format!("1{}", "0".repeat(308));
    let source = format!("a = box(1, 1, 1)\nresult = translate(a, {} * 10, 0, 0)", huge);
    let reason = script_error(&source);
    assert!(reason.contains("finite"), "{}", reason);
}
