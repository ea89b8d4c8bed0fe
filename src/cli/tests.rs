//! Unit tests for CLI commands

use crate::cli::{execute, Cli, Commands};
use clap::Parser;
use std::io::Write;

const MANIFEST: &str = r#"
routes:
  - path: /venue/:venueID/:style
    handler: venue
    parameters:
      - { name: venueID, type: Int }
      - { name: style, type: String }
  - path: /page/:n
    handler: page
    parameters:
      - { name: n, type: Int, optional: true }
"#;

fn manifest_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

async fn run(command: Commands) -> (anyhow::Result<()>, String) {
    let mut out = Vec::new();
    let result = execute(&command, &mut out).await;
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn test_check_command_parses() {
    let cli = Cli::try_parse_from(["typeroute", "check", "--manifest", "routes.yaml"]).unwrap();
    assert!(!cli.verbose);
    match cli.command {
        Commands::Check { manifest } => assert_eq!(manifest.to_string_lossy(), "routes.yaml"),
        other => panic!("Expected Check command, got {:?}", other),
    }
}

#[test]
fn test_match_command_parses_paths_and_verbose() {
    let cli = Cli::try_parse_from([
        "typeroute",
        "match",
        "-m",
        "routes.yaml",
        "/venue/2/gold",
        "/monkey",
        "--verbose",
    ])
    .unwrap();
    assert!(cli.verbose);
    match cli.command {
        Commands::Match { paths, .. } => assert_eq!(paths, vec!["/venue/2/gold", "/monkey"]),
        other => panic!("Expected Match command, got {:?}", other),
    }
}

#[test]
fn test_match_requires_a_path() {
    assert!(Cli::try_parse_from(["typeroute", "match", "--manifest", "routes.yaml"]).is_err());
}

#[tokio::test]
async fn test_check_lists_routes() {
    let file = manifest_file(MANIFEST);
    let (result, out) = run(Commands::Check {
        manifest: file.path().to_path_buf(),
    })
    .await;
    result.unwrap();
    assert!(out.contains("2 route(s) compiled"));
    assert!(out.contains("/venue/:venueID/:style -> venue (venueID: i64, style: "));
    assert!(out.contains("/page/:n -> page (n: Option<i64>)"));
}

#[tokio::test]
async fn test_check_reports_failures() {
    let file = manifest_file(
        r#"
routes:
  - path: /a/:x
    handler: a
    parameters: []
  - path: /b/:y
    handler: b
    parameters:
      - { name: y, type: Widget }
"#,
    );
    let (result, _) = run(Commands::Check {
        manifest: file.path().to_path_buf(),
    })
    .await;
    let err = result.unwrap_err();
    let text = format!("{:#}", err);
    assert!(text.contains("2 routes failed to compile"));
    assert!(text.contains("does not define parameter: x"));
    assert!(text.contains("'Widget'"));
}

#[tokio::test]
async fn test_routes_groups_by_result_type() {
    let file = manifest_file(MANIFEST);
    let (result, out) = run(Commands::Routes {
        manifest: file.path().to_path_buf(),
    })
    .await;
    result.unwrap();
    assert!(out.contains("EchoResponse (2 route(s))"));
    assert!(out.contains("  [0] /venue/:venueID/:style"));
    assert!(out.contains("  [1] /page/:n"));
}

#[tokio::test]
async fn test_match_echoes_and_reports_unmatched() {
    let file = manifest_file(MANIFEST);
    let (result, out) = run(Commands::Match {
        manifest: file.path().to_path_buf(),
        paths: vec!["/venue/2/gold".to_string(), "/monkey".to_string()],
    })
    .await;

    let mut lines = out.lines();
    let echo: serde_json::Value = serde_json::from_str(lines.next().unwrap()).unwrap();
    assert_eq!(echo["handler"], "venue");
    assert_eq!(echo["params"][0]["name"], "venueID");
    assert_eq!(echo["params"][0]["value"], "2");
    assert_eq!(echo["params"][1]["value"], "gold");
    assert_eq!(lines.next().unwrap(), "❌ No matching route for path: /monkey");

    assert_eq!(result.unwrap_err().to_string(), "1 of 2 path(s) unmatched");
}

#[tokio::test]
async fn test_match_optional_failure_is_null() {
    let file = manifest_file(MANIFEST);
    let (result, out) = run(Commands::Match {
        manifest: file.path().to_path_buf(),
        paths: vec!["/page/next".to_string()],
    })
    .await;
    result.unwrap();
    let echo: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
    assert!(echo["params"][0]["value"].is_null());
}
