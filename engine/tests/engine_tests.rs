use recfilter::{Engine, FieldSelector, FilterExpr, FilterSet, Record};

fn records(json: &str) -> Vec<Record> {
    serde_json::from_str(json).unwrap()
}

fn record(json: &str) -> Record {
    serde_json::from_str(json).unwrap()
}

fn no_exprs() -> std::iter::Empty<&'static str> {
    std::iter::empty()
}

#[test]
fn include_by_equality() {
    let engine = Engine::from_args(["type=jenkins"], no_exprs(), None, None).unwrap();
    let input = records(r#"[{"type":"jenkins","name":"A"},{"type":"gerrit","name":"B"}]"#);

    let (result, diagnostics) = engine.apply(input);
    assert_eq!(result, records(r#"[{"type":"jenkins","name":"A"}]"#));
    assert_eq!(diagnostics.input_count, 2);
    assert_eq!(diagnostics.matched_count, 1);
}

#[test]
fn exclude_by_substring() {
    let engine = Engine::from_args(no_exprs(), ["name~=test"], None, None).unwrap();
    let input = records(r#"[{"name":"test-server"},{"name":"prod-server"}]"#);

    let (result, _) = engine.apply(input);
    assert_eq!(result, records(r#"[{"name":"prod-server"}]"#));
}

#[test]
fn numeric_comparison() {
    let engine = Engine::from_args(["count>5"], no_exprs(), None, None).unwrap();
    let input = records(r#"[{"count":12},{"count":3}]"#);

    let (result, _) = engine.apply(input);
    assert_eq!(result, records(r#"[{"count":12}]"#));
}

#[test]
fn emptiness_operators() {
    let subject = record(r#"{"description":""}"#);

    let empty = Engine::from_args(["description:empty"], no_exprs(), None, None).unwrap();
    assert!(empty.matches(&subject));

    let not_empty =
        Engine::from_args(["description:not-empty"], no_exprs(), None, None).unwrap();
    assert!(!not_empty.matches(&subject));
}

#[test]
fn nested_numeric_string_coercion() {
    let engine = Engine::from_args(["metadata.version>=2.0"], no_exprs(), None, None).unwrap();
    assert!(engine.matches(&record(r#"{"metadata":{"version":"2.1"}}"#)));
    assert!(!engine.matches(&record(r#"{"metadata":{"version":"1.9"}}"#)));
}

#[test]
fn field_projection() {
    let engine = Engine::from_args(no_exprs(), no_exprs(), Some("name,url"), None).unwrap();
    let input = records(r#"[{"name":"A","url":"u","extra":1}]"#);

    let (result, _) = engine.apply(input);
    assert_eq!(result, records(r#"[{"name":"A","url":"u"}]"#));
}

#[test]
fn empty_filter_set_matches_everything() {
    let engine = Engine::from_args(no_exprs(), no_exprs(), None, None).unwrap();
    assert!(engine.matches(&record(r#"{"anything":1}"#)));
    assert!(engine.matches(&record("{}")));
}

#[test]
fn exclude_only_is_pure_negation() {
    let subjects = [
        record(r#"{"name":"test-server"}"#),
        record(r#"{"name":"prod"}"#),
        record("{}"),
    ];

    let expr = FilterExpr::parse("name~=test").unwrap();

    let mut excluded = FilterSet::new();
    excluded.add_exclude(expr.clone());
    let excluded = Engine::new(excluded, FieldSelector::new());

    let mut included = FilterSet::new();
    included.add_include(expr);
    let included = Engine::new(included, FieldSelector::new());

    for subject in &subjects {
        assert_eq!(excluded.matches(subject), !included.matches(subject));
    }
}

#[test]
fn equality_operators_are_complements() {
    let subjects = [
        record(r#"{"type":"jenkins"}"#),
        record(r#"{"type":"gerrit"}"#),
        record(r#"{"type":null}"#),
        record("{}"),
    ];

    let eq = Engine::from_args(["type=jenkins"], no_exprs(), None, None).unwrap();
    let ne = Engine::from_args(["type!=jenkins"], no_exprs(), None, None).unwrap();

    for subject in &subjects {
        assert_ne!(eq.matches(subject), ne.matches(subject));
    }
}

#[test]
fn projection_is_idempotent() {
    let selector =
        FieldSelector::parse(Some("name,metadata.version"), Some("metadata.internal")).unwrap();
    let subject = record(
        r#"{"name":"A","type":"x","metadata":{"version":"2.1","internal":true}}"#,
    );

    let once = selector.project(&subject);
    let twice = selector.project(&once);
    assert_eq!(once, twice);
}

#[test]
fn projection_follows_selector_order() {
    let selector = FieldSelector::parse(Some("b,a"), None).unwrap();
    let projected = selector.project(&record(r#"{"a":1,"b":2}"#));
    assert_eq!(serde_json::to_string(&projected).unwrap(), r#"{"b":2,"a":1}"#);
}

#[test]
fn allow_then_deny_same_field_is_empty() {
    let selector = FieldSelector::parse(Some("x"), Some("x")).unwrap();
    let projected = selector.project(&record(r#"{"x":1,"y":2}"#));
    assert!(projected.is_empty());
}

#[test]
fn deny_prunes_inside_allowed_subtree() {
    // fields=["a"] keeps the whole subtree, exclude_fields=["a.b"] then
    // prunes inside it
    let selector = FieldSelector::parse(Some("a"), Some("a.b")).unwrap();
    let projected = selector.project(&record(r#"{"a":{"b":1,"c":2},"z":3}"#));
    assert_eq!(projected, record(r#"{"a":{"c":2}}"#));
}

#[test]
fn parse_errors_surface_before_evaluation() {
    assert!(Engine::from_args(["bogus"], no_exprs(), None, None).is_err());
    assert!(Engine::from_args(["name@=[unclosed"], no_exprs(), None, None).is_err());
    assert!(Engine::from_args(["count>not-a-number"], no_exprs(), None, None).is_err());
    assert!(Engine::from_args([r#"name="unterminated"#], no_exprs(), None, None).is_err());
    assert!(Engine::from_args(["name:empty trailing"], no_exprs(), None, None).is_err());
    assert!(Engine::from_args(no_exprs(), no_exprs(), Some("ok,"), None).is_ok());
    assert!(Engine::from_args(no_exprs(), no_exprs(), Some("not ok"), None).is_err());
}

#[test]
fn malformed_records_never_abort_the_run() {
    // numeric filter against mixed-type data: non-numeric rows just don't
    // match
    let engine = Engine::from_args(["port>100"], no_exprs(), None, None).unwrap();
    let input = records(
        r#"[{"port":443},{"port":"not-a-number"},{"port":null},{"name":"no-port"},{"port":"8080"}]"#,
    );

    let (result, diagnostics) = engine.apply(input);
    assert_eq!(result, records(r#"[{"port":443},{"port":"8080"}]"#));
    assert_eq!(diagnostics.input_count, 5);
    assert_eq!(diagnostics.matched_count, 2);
}

#[test]
fn wildcard_and_regex_filtering() {
    let input = records(
        r#"[{"name":"jenkins-sandbox"},{"name":"jenkins-prod"},{"name":"gerrit-01"}]"#,
    );

    let glob = Engine::from_args(["name*=jenkins-*"], no_exprs(), None, None).unwrap();
    let (result, _) = glob.apply(input.clone());
    assert_eq!(
        result,
        records(r#"[{"name":"jenkins-sandbox"},{"name":"jenkins-prod"}]"#)
    );

    let regex = Engine::from_args([r"name@=-\d+$"], no_exprs(), None, None).unwrap();
    let (result, _) = regex.apply(input);
    assert_eq!(result, records(r#"[{"name":"gerrit-01"}]"#));
}

#[test]
fn engine_does_not_mutate_input_semantics() {
    // projection returns reduced copies; reusing the engine on the same
    // data gives the same answer
    let engine =
        Engine::from_args(["type=jenkins"], no_exprs(), Some("name"), None).unwrap();
    let input = records(r#"[{"type":"jenkins","name":"A","port":1}]"#);

    let (first, _) = engine.apply(input.clone());
    let (second, _) = engine.apply(input);
    assert_eq!(first, second);
    assert_eq!(first, records(r#"[{"name":"A"}]"#));
}
