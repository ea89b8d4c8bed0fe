use super::*;
use crate::convert::{RouteParameter, TypeTag};

fn decl<T: RouteParameter>(name: &str) -> ParameterDecl {
    ParameterDecl::new(name, T::parameter_kind())
}

#[test]
fn test_root_template() {
    let (re, params) = compile_pattern("/", &[], "root").unwrap();
    assert!(re.is_match("/"));
    assert!(!re.is_match(""));
    assert!(!re.is_match("/a"));
    assert!(params.is_empty());
}

#[test]
fn test_static_template_is_anchored() {
    let (re, _) = compile_pattern("/zoo/animals", &[], "animals").unwrap();
    assert!(re.is_match("/zoo/animals"));
    assert!(!re.is_match("/zoo/animals/1"));
    assert!(!re.is_match("/api/zoo/animals"));
}

#[test]
fn test_parameterized_template() {
    let params = [decl::<i64>("venueID"), decl::<String>("style")];
    let (re, specs) = compile_pattern("/venue/:venueID/:style", &params, "test").unwrap();
    assert_eq!(
        re.as_str(),
        "^/venue/(?P<parameter0>[^/]+)/(?P<parameter1>[^/]+)$"
    );
    let caps = re.captures("/venue/2/gold").unwrap();
    assert_eq!(&caps["parameter0"], "2");
    assert_eq!(&caps["parameter1"], "gold");
    assert_eq!(specs.len(), 2);
    assert_eq!(specs[0].binding.as_ref(), "venueID");
    assert_eq!(specs[0].declared_type, TypeTag::of::<i64>());
    assert!(!re.is_match("/venue/2/"));
    assert!(!re.is_match("/venue//gold"));
}

#[test]
fn test_capture_count_equals_parameter_count() {
    let params = [
        decl::<String>("a"),
        decl::<String>("b"),
        decl::<String>("c"),
    ];
    let (re, specs) = compile_pattern("/x/:c/y/:a/:b", &params, "h").unwrap();
    let names: Vec<&str> = re.capture_names().flatten().collect();
    assert_eq!(names.len(), 3);
    for spec in &specs {
        assert!(names.contains(&spec.capture_label.as_str()));
    }
}

#[test]
fn test_specs_keep_handler_order_not_template_order() {
    let params = [decl::<String>("style"), decl::<i64>("venueID")];
    let (re, specs) = compile_pattern("/venue/:venueID/:style", &params, "test").unwrap();
    assert_eq!(specs[0].binding.as_ref(), "style");
    assert_eq!(specs[0].capture_label, "parameter0");
    assert_eq!(specs[1].binding.as_ref(), "venueID");
    let caps = re.captures("/venue/2/gold").unwrap();
    assert_eq!(&caps["parameter0"], "gold");
    assert_eq!(&caps["parameter1"], "2");
}

#[test]
fn test_emoji_parameter_name() {
    let params = [decl::<i64>("😀")];
    let (re, specs) = compile_pattern("/emoji-is-popular/:😀", &params, "emoji").unwrap();
    assert!(re.is_match("/emoji-is-popular/2"));
    assert_eq!(specs[0].capture_label, "parameter0");
    assert_eq!(specs[0].name.as_deref(), Some("😀"));
}

#[test]
fn test_unlabeled_parameter_binds_without_label() {
    let params = [ParameterDecl::new(
        ParameterName::unlabeled("style"),
        String::parameter_kind(),
    )];
    let (_, specs) = compile_pattern("/style/:style", &params, "h").unwrap();
    assert_eq!(specs[0].name, None);
    assert_eq!(specs[0].binding.as_ref(), "style");
}

#[test]
fn test_missing_handler_parameter() {
    let params = [decl::<i64>("venueID")];
    let err = compile_pattern("/venue/:venueID/:style", &params, "test").unwrap_err();
    match err {
        CompileError::ParameterMismatch { names, message, .. } => {
            assert_eq!(names, vec!["style".to_string()]);
            assert_eq!(message, "Handler test does not define parameter: style");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_unconsumed_handler_parameter() {
    let params = [decl::<i64>("venueID"), decl::<String>("style")];
    let err = compile_pattern("/venue/:venueID", &params, "test").unwrap_err();
    match err {
        CompileError::ParameterMismatch { names, message, .. } => {
            assert_eq!(names, vec!["style".to_string()]);
            assert_eq!(message, "Route missing parameter found in handler: style");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_unconsumed_handler_parameters_plural() {
    let params = [
        decl::<i64>("a"),
        decl::<i64>("venueID"),
        decl::<String>("b"),
    ];
    let err = compile_pattern("/venue/:venueID", &params, "test").unwrap_err();
    match err {
        CompileError::ParameterMismatch { names, message, .. } => {
            assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
            assert_eq!(message, "Route missing parameters found in handler: a, b");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_parameter_used_twice() {
    let params = [decl::<i64>("id")];
    let err = compile_pattern("/a/:id/b/:id", &params, "h").unwrap_err();
    assert!(matches!(err, CompileError::ParameterMismatch { .. }));
    assert!(err.to_string().contains("more than once"));
}

#[test]
fn test_duplicate_handler_binding() {
    let params = [decl::<i64>("id"), decl::<String>("id")];
    let err = compile_pattern("/a/:id", &params, "h").unwrap_err();
    assert!(matches!(err, CompileError::ParameterMismatch { .. }));
}

#[test]
fn test_literal_segments_are_escaped() {
    let (re, _) = compile_pattern("/v1.0/items+", &[], "h").unwrap();
    assert!(re.is_match("/v1.0/items+"));
    assert!(!re.is_match("/v1x0/items+"));
    assert!(!re.is_match("/v1.0/itemsss"));
}

#[test]
fn test_colon_without_identifier_is_literal() {
    let (re, _) = compile_pattern("/a/:b-c", &[], "h").unwrap();
    assert!(re.is_match("/a/:b-c"));
    assert!(!re.is_match("/a/x"));
}

#[test]
fn test_empty_segments_are_skipped() {
    let params = [decl::<i64>("id")];
    let (re, _) = compile_pattern("/a//:id/", &params, "h").unwrap();
    assert_eq!(re.as_str(), "^/a/(?P<parameter0>[^/]+)$");
}

#[test]
fn test_template_syntax_errors() {
    for template in ["", "venue/:id", "/a?b=1", "/a#frag", "/a b"] {
        let err = compile_pattern(template, &[], "h").unwrap_err();
        assert!(
            matches!(err, CompileError::TemplateSyntax { .. }),
            "{template:?} should be a syntax error, got {err:?}"
        );
        assert_eq!(err.template(), template);
    }
}
