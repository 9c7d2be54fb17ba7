use contract_guard_core::*;
use serde_json::{Value, json};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn types(list: &[TypeDescriptor]) -> TypeSpec {
    TypeSpec::new(list.iter().copied()).unwrap()
}

fn funky() -> ValidatedFunction<impl Callable<Output = Value>> {
    let schema = ArgumentSchema::new([
        ArgumentSpec::new("type", types(&[TypeDescriptor::STRING])),
        ArgumentSpec::new("ret", types(&[TypeDescriptor::OBJECT, TypeDescriptor::STRING])),
        ArgumentSpec::new("obj", types(&[TypeDescriptor::OBJECT])),
    ])
    .unwrap();
    wrap(curry(3, |_| json!({"good": "job"})), schema, "funky").unwrap()
}

fn record(value: Value) -> ScopeRecord {
    match value {
        Value::Object(map) => map,
        other => panic!("not a record: {other}"),
    }
}

fn scope() -> ScopeRecord {
    record(json!({"user": 1, "project": 2}))
}

// ---------------------------------------------------------------------------
// Argument validation
// ---------------------------------------------------------------------------

#[test]
fn test_argument_validator_successful() {
    let func = funky();
    let partial = func
        .call([json!("FOO"), json!({"foo": "foo", "bar": "bar"})])
        .unwrap()
        .into_partial()
        .unwrap();

    let result = partial
        .call([json!({"foo": "foo", "bar": "bar", "zar": "zar"})])
        .unwrap()
        .into_complete();
    assert_eq!(result, Some(json!({"good": "job"})));
}

#[test]
fn test_argument_validator_failing() {
    let err = funky()
        .call([json!(null), json!(1), json!(null)])
        .unwrap_err();
    assert_eq!(
        err.messages(),
        [
            "Function funky, Requires type as one of String, but got null",
            "Function funky, Requires ret as one of Object, String, but got 1",
            "Function funky, Requires obj as one of Object, but got null",
        ]
    );
    assert_eq!(
        err.to_string(),
        "Function funky, Requires type as one of String, but got null\n\
         Function funky, Requires ret as one of Object, String, but got 1\n\
         Function funky, Requires obj as one of Object, but got null"
    );
}

#[test]
fn test_argument_validator_reports_only_failing_positions() {
    let err = funky()
        .call([json!("FOO"), json!(true), json!({})])
        .unwrap_err();
    assert_eq!(
        err.messages(),
        ["Function funky, Requires ret as one of Object, String, but got true"]
    );
}

#[test]
fn test_argument_validator_is_idempotent() {
    let func = funky();
    let args = [json!("FOO"), json!("bar"), json!([1, 2])];
    let first = func.call(args.clone()).unwrap().into_complete();
    let second = func.call(args).unwrap().into_complete();
    assert_eq!(first, second);

    let bad = [json!(1), json!(1), json!(1)];
    assert_eq!(
        func.call(bad.clone()).unwrap_err(),
        func.call(bad).unwrap_err()
    );
}

#[test]
fn test_validated_function_is_shareable_across_threads() {
    let func = funky();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let func = func.clone();
            std::thread::spawn(move || {
                func.call([json!("FOO"), json!({}), json!({})])
                    .unwrap()
                    .into_complete()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), Some(json!({"good": "job"})));
    }
}

// ---------------------------------------------------------------------------
// Scope merging
// ---------------------------------------------------------------------------

#[test]
fn test_scope_validator_successful() {
    let merged = merge_scope(&scope(), &record(json!({"aardvark": 9, "user": 1}))).unwrap();
    assert_eq!(merged, record(json!({"aardvark": 9, "user": 1, "project": 2})));
}

#[test]
fn test_scope_validator_with_objects_successful() {
    let actual = record(json!({"aardvark": {"id": 9}, "user": {"id": 1}}));
    let merged = merge_scope(&scope(), &actual).unwrap();
    assert_eq!(
        merged,
        record(json!({"aardvark": {"id": 9}, "user": 1, "project": 2}))
    );
}

#[test]
fn test_scope_validator_failing() {
    let actual = record(json!({"aardvark": 9, "user": 5, "project": 7}));
    let rendered = pretty_record(&actual);
    assert_eq!(
        rendered,
        "Object {\n  \"aardvark\": 9,\n  \"project\": 7,\n  \"user\": 5,\n}"
    );

    let err = merge_scope(&scope(), &actual).unwrap_err();
    assert_eq!(
        err.messages(),
        [
            format!("{rendered}, Requires user to equal 1, but got 5"),
            format!("{rendered}, Requires project to equal 2, but got 7"),
        ]
    );
}

#[test]
fn test_scope_validator_with_objects_failing() {
    let actual = record(json!({"aardvark": {"id": 9}, "user": {"id": 5}, "project": {"id": 7}}));
    let rendered = pretty_record(&actual);

    let err = merge_scope(&scope(), &actual).unwrap_err();
    assert_eq!(
        err.messages(),
        [
            format!("{rendered}, Requires user to equal 1, but got 5"),
            format!("{rendered}, Requires project to equal 2, but got 7"),
        ]
    );
}

#[test]
fn test_scope_merge_is_idempotent() {
    let actual = record(json!({"aardvark": 9, "user": 1}));
    assert_eq!(
        merge_scope(&scope(), &actual),
        merge_scope(&scope(), &actual)
    );
}
