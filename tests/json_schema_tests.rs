//! Integration tests that verify `--json` output matches the schema printed
//! by the `schema` command.

use jsonschema::Validator;
use serde_json::Value;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn sql_erd_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_sql-erd"))
}

fn create_temp_sql(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

fn load_schema(name: &str) -> Validator {
    let output = sql_erd_bin()
        .args(["schema", name])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());

    let schema: Value = serde_json::from_slice(&output.stdout).expect("Invalid schema JSON");
    Validator::new(&schema).expect("Failed to compile schema")
}

fn validate_json_output(output: &std::process::Output, schema_name: &str) {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "Command failed with stderr: {}",
        stderr
    );

    let json: Value = serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("Invalid JSON output: {}\nOutput: {}", e, stdout));

    let schema = load_schema(schema_name);
    if let Err(error) = schema.validate(&json) {
        panic!(
            "JSON output doesn't match {} schema:\n  - {}: {}\n\nOutput was:\n{}",
            schema_name,
            error.instance_path(),
            error,
            serde_json::to_string_pretty(&json).unwrap()
        );
    }
}

#[test]
fn test_generate_json_matches_schema() {
    let sql = r#"
CREATE TABLE users (
  id INT PRIMARY KEY,
  email VARCHAR(255) UNIQUE NOT NULL,
  status TINYINT(1) DEFAULT 0 COMMENT 'Active/Inactive'
);
INSERT INTO users VALUES (1, 'a@example.com', 1);
CREATE TABLE orders (id INT PRIMARY KEY, user_id INT);
"#;
    let file = create_temp_sql(sql);

    let output = sql_erd_bin()
        .args(["generate", file.path().to_str().unwrap(), "--json"])
        .output()
        .expect("Failed to execute command");

    validate_json_output(&output, "generate");
}

#[test]
fn test_generate_empty_file_matches_schema() {
    let file = create_temp_sql("");

    let output = sql_erd_bin()
        .args(["generate", file.path().to_str().unwrap(), "--json"])
        .output()
        .expect("Failed to execute command");

    validate_json_output(&output, "generate");
}

#[test]
fn test_schema_list() {
    let output = sql_erd_bin()
        .args(["schema", "--list"])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "generate\n");
}

#[test]
fn test_unknown_schema_fails() {
    let output = sql_erd_bin()
        .args(["schema", "split"])
        .output()
        .expect("Failed to execute command");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no schema for 'split'"));
}
