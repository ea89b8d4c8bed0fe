use super::{Router, NO_PARAMETERS};
use crate::convert::{ParameterKind, TypeTag};
use crate::handler::handler;
use crate::template::{CompileError, ParameterDecl, ParameterName, RouteDefinition};

#[test]
fn test_empty_router() {
    let router = Router::builder().build().unwrap();
    assert!(router.table().is_empty());
    assert_eq!(router.table().len(), 0);
    assert!(router.table().group(TypeTag::of::<i64>()).is_none());
}

#[test]
fn test_routes_grouped_by_result_type() {
    let router = Router::builder()
        .route("/a/:x", ["x"], |x: i64| x)
        .route("/b", NO_PARAMETERS, || "b".to_string())
        .route("/c/:y", ["y"], |y: i64| y + 1)
        .route("/d", NO_PARAMETERS, || ())
        .build()
        .unwrap();

    let table = router.table();
    assert_eq!(table.len(), 4);
    assert_eq!(
        table.result_types(),
        &[
            TypeTag::of::<i64>(),
            TypeTag::of::<String>(),
            TypeTag::unit()
        ]
    );

    let ints = table.group(TypeTag::of::<i64>()).unwrap();
    assert_eq!(ints.len(), 2);
    let templates: Vec<&str> = ints.routes().iter().map(|r| &*r.template).collect();
    assert_eq!(templates, vec!["/a/:x", "/c/:y"]);
}

#[test]
fn test_declaration_order_preserved_across_groups() {
    let router = Router::builder()
        .route("/one", NO_PARAMETERS, || 1_u8)
        .route("/two", NO_PARAMETERS, || ())
        .route("/three", NO_PARAMETERS, || 3_u8)
        .build()
        .unwrap();

    let all: Vec<&str> = router.routes().map(|r| &*r.template).collect();
    assert_eq!(all, vec!["/one", "/three", "/two"]);
}

#[test]
fn test_route_flags() {
    let router = Router::builder()
        .route("/sync", NO_PARAMETERS, || 1_i32)
        .try_route("/try", NO_PARAMETERS, || -> anyhow::Result<i32> { Ok(2) })
        .async_route("/async", NO_PARAMETERS, || async { 3_i32 })
        .try_async_route("/try-async", NO_PARAMETERS, || async {
            Ok::<_, anyhow::Error>(4_i32)
        })
        .build()
        .unwrap();

    let flags: Vec<(bool, bool)> = router
        .table()
        .routes()
        .map(|r| (r.is_async, r.is_fallible))
        .collect();
    assert_eq!(
        flags,
        vec![(false, false), (false, true), (true, false), (true, true)]
    );
}

#[test]
fn test_build_reports_every_failure_in_order() {
    let err = Router::builder()
        .route("/ok/:id", ["id"], |id: i64| id)
        .route("/missing", ["id"], |id: i64| id)
        .route("/extra/:id/:other", ["id"], |id: i64| id)
        .route("/arity/:a/:b", ["a", "b"], |a: i64| a)
        .build()
        .unwrap_err();

    let templates: Vec<&str> = err.failures().iter().map(CompileError::template).collect();
    assert_eq!(templates, vec!["/missing", "/extra/:id/:other", "/arity/:a/:b"]);
    assert!(err.to_string().starts_with("3 routes failed to compile"));
}

#[test]
fn test_single_failure_message() {
    let err = Router::builder()
        .route("/venue/:venueID", ["venue"], |venue: i64| venue)
        .build()
        .unwrap_err();
    assert_eq!(err.failures().len(), 1);
    let text = err.to_string();
    assert!(text.starts_with("1 route failed to compile"));
    assert!(text.contains("does not define parameter: venueID"));
}

#[test]
fn test_unlabeled_parameter_binds_by_name() {
    let router = Router::builder()
        .route(
            "/venue/:venueID",
            [ParameterName::unlabeled("venueID")],
            |venue: i64| venue,
        )
        .build()
        .unwrap();

    let route = &router.table().group(TypeTag::of::<i64>()).unwrap().routes()[0];
    assert_eq!(route.parameters[0].name, None);
    assert_eq!(&*route.parameters[0].binding, "venueID");
}

#[test]
fn test_from_definitions() {
    let definition = RouteDefinition {
        template: "/schedule/:scheduleID".to_string(),
        handler_name: "schedule".to_string(),
        parameters: vec![ParameterDecl::new(
            "scheduleID",
            ParameterKind::required::<i64>(),
        )],
        result_type: TypeTag::of::<i64>(),
        is_async: false,
        is_fallible: false,
        handler: handler(|id: i64| id),
    };

    let router = Router::from_definitions(vec![definition]).unwrap();
    let route = router.table().routes().next().unwrap();
    assert_eq!(&*route.handler_name, "schedule");
    assert!(route.is_match("/schedule/12"));
    assert!(!route.is_match("/schedule/12/extra"));
}

#[test]
fn test_clones_share_table() {
    let router = Router::builder()
        .route("/x", NO_PARAMETERS, || ())
        .build()
        .unwrap();
    let clone = router.clone();
    assert!(std::ptr::eq(router.table(), clone.table()));
}

fn double(id: i64) -> i64 {
    id * 2
}

#[test]
fn test_handler_names() {
    let router = Router::builder()
        .route("/double/:id", ["id"], double)
        .route("/triple/:id", ["id"], |id: i64| id * 3)
        .build()
        .unwrap();

    let names: Vec<&str> = router.routes().map(|r| &*r.handler_name).collect();
    assert!(names[0].ends_with("::double"));
    assert_eq!(names[1], "/triple/:id");
}

#[test]
fn test_closure_errors_name_the_template() {
    let err = Router::builder()
        .route("/pair/:id/:id", ["id"], |id: i64| id)
        .build()
        .unwrap_err();
    let text = err.failures()[0].to_string();
    assert!(!text.contains("{{closure}}"));
    assert!(text.contains("Handler /pair/:id/:id parameter used more than once"));
}
