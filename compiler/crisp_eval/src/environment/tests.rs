use super::*;
use crate::EvalErrorKind;
use crisp_ir::StringInterner;
use pretty_assertions::assert_eq;

#[test]
fn test_single_frame_lookup() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let y = interner.intern("y");

    let mut env = Environment::new();
    env.push_frame();
    env.bind(x, Value::int(1));
    env.bind(y, Value::bool(true));

    assert_eq!(env.lookup(x), Some(Value::int(1)));
    assert_eq!(env.lookup(y), Some(Value::bool(true)));
}

#[test]
fn test_last_bind_in_frame_wins() {
    let interner = StringInterner::new();
    let x = interner.intern("x");

    let mut env = Environment::new();
    env.push_frame();
    env.bind(x, Value::int(1));
    env.bind(x, Value::int(2));

    assert_eq!(env.lookup(x), Some(Value::int(2)));
    assert_eq!(env.innermost().map(Scope::len), Some(1));
}

#[test]
fn test_inner_frame_shadows_outer() {
    let interner = StringInterner::new();
    let x = interner.intern("x");

    let mut env = Environment::new();
    env.push_frame();
    env.bind(x, Value::int(1));
    env.push_frame();
    env.bind(x, Value::int(2));
    assert_eq!(env.lookup(x), Some(Value::int(2)));

    let popped = env.pop_frame().unwrap();
    assert_eq!(popped.get(x), Some(&Value::int(2)));
    assert_eq!(env.lookup(x), Some(Value::int(1)));
}

#[test]
fn test_lookup_falls_through_to_outer_frames() {
    let interner = StringInterner::new();
    let (a, b, c) = (interner.intern("a"), interner.intern("b"), interner.intern("c"));

    let mut env = Environment::new();
    env.push_frame();
    env.bind(a, Value::int(1));
    env.push_frame();
    env.bind(b, Value::int(2));
    env.push_frame();
    env.bind(c, Value::int(3));

    assert_eq!(env.lookup(a), Some(Value::int(1)));
    assert_eq!(env.lookup(b), Some(Value::int(2)));
    assert_eq!(env.lookup(c), Some(Value::int(3)));
}

#[test]
fn test_single_and_multi_frame_lookups_agree() {
    let interner = StringInterner::new();
    let names: Vec<Name> = ["a", "b", "c", "d"].iter().map(|s| interner.intern(s)).collect();

    let mut flat = Environment::new();
    let mut nested = Environment::new();
    for (i, &name) in (0i64..).zip(&names) {
        flat.bind(name, Value::int(i));
        nested.push_frame();
        nested.bind(name, Value::int(i));
    }

    for &name in &names {
        assert_eq!(flat.lookup(name), nested.lookup(name));
    }
}

#[test]
fn test_unbound_variable() {
    let interner = StringInterner::new();
    let missing = interner.intern("missing");

    let mut env = Environment::new();
    assert_eq!(env.lookup(missing), None);

    env.push_frame();
    let err = env.resolve(missing, &interner).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::UnboundVariable {
            name: "missing".to_string()
        }
    );
}

#[test]
fn test_pop_empty_environment() {
    let mut env = Environment::new();
    let err = env.pop_frame().unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::EmptyEnvironment);
}

#[test]
fn test_bind_without_frames_creates_one() {
    let interner = StringInterner::new();
    let x = interner.intern("x");

    let mut env = Environment::new();
    assert!(env.is_empty());
    env.bind(x, Value::char('q'));
    assert_eq!(env.depth(), 1);
    assert_eq!(env.lookup(x), Some(Value::char('q')));
}

#[test]
fn test_push_pop_depth() {
    let mut env = Environment::with_global(Scope::new());
    assert_eq!(env.depth(), 1);
    env.push_frame();
    env.push_frame();
    assert_eq!(env.depth(), 3);
    env.pop_frame().unwrap();
    env.pop_frame().unwrap();
    env.pop_frame().unwrap();
    assert_eq!(env.depth(), 0);
    assert!(env.pop_frame().is_err());
}

#[test]
fn test_scope_zip() {
    let interner = StringInterner::new();
    let params = [interner.intern("p"), interner.intern("q")];

    let scope = Scope::zip(&params, vec![Value::int(1), Value::Nil]).unwrap();
    assert_eq!(scope.get(params[0]), Some(&Value::int(1)));
    assert_eq!(scope.get(params[1]), Some(&Value::Nil));

    let err = Scope::zip(&params, vec![Value::int(1)]).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::ArityMismatch {
            expected: 2,
            got: 1
        }
    );
}

#[test]
fn test_extend_outer_is_shadowed_by_existing_frames() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let g = interner.intern("g");

    let mut env = Environment::new();
    env.bind(x, Value::int(10));

    let prelude: Scope = [(x, Value::int(0)), (g, Value::bool(false))]
        .into_iter()
        .collect();
    env.extend_outer([prelude]);

    assert_eq!(env.depth(), 2);
    assert_eq!(env.lookup(x), Some(Value::int(10)));
    assert_eq!(env.lookup(g), Some(Value::bool(false)));

    env.pop_frame().unwrap();
    assert_eq!(env.lookup(x), Some(Value::int(0)));
}

#[test]
fn test_push_frame_with() {
    let interner = StringInterner::new();
    let x = interner.intern("x");

    let mut env = Environment::new();
    env.push_frame_with(std::iter::once((x, Value::int(5))).collect());
    assert!(env.innermost().is_some_and(|frame| frame.contains(x)));
    assert_eq!(env.resolve(x, &interner), Ok(Value::int(5)));
}
