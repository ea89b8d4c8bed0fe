#![allow(dead_code)]

pub mod temp_files {
    use std::io::Write;

    /// Write `content` to a temporary file with the given extension.
    ///
    /// The file is removed when the returned handle is dropped.
    pub fn create_temp_manifest(content: &str, ext: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("typeroute_test_")
            .suffix(&format!(".{}", ext))
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }
}

pub mod manifests {
    /// The venue/schedule manifest used across integration tests.
    pub const VENUE_YAML: &str = r#"
routes:
  - path: /venue/:venueID/:style
    handler: venue
    parameters:
      - { name: venueID, type: Int }
      - { name: style, type: String }
  - path: /schedule/:scheduleID
    handler: schedule
    parameters:
      - { name: scheduleID, type: Int }
  - path: /page/:n
    handler: page
    parameters:
      - { name: n, type: UInt, optional: true }
"#;

    pub const VENUE_JSON: &str = r#"{
  "routes": [
    {
      "path": "/venue/:venueID/:style",
      "handler": "venue",
      "parameters": [
        { "name": "venueID", "type": "Int" },
        { "name": "style", "type": "String", "unlabeled": true }
      ]
    }
  ]
}"#;
}
