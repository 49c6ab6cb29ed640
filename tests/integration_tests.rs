//! Integration tests for the modelgen CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const PEOPLE: &str = r#"id: people
description: People we work with
attributes:
  method: POST
elements:
  - id: id
    type: uuid
    is_object_id: true
    generator: uuid
  - id: name
    type: text
    attributes:
      required: true
  - id: email
    type: email
  - id: orcid
    type: orcid
"#;

/// A modelgen command isolated from the user's config and environment
fn modelgen(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("modelgen").unwrap();
    cmd.current_dir(tmp.path())
        .env("HOME", tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join(".config"))
        .env_remove("MODELGEN_RENDERER")
        .env_remove("MODELGEN_EXTENDED_TYPES")
        .env_remove("MODELGEN_AUTHOR")
        .env_remove("MODELGEN_LOG")
        .env_remove("RUST_LOG");
    cmd
}

/// Temp dir holding people.yaml
fn setup_people() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("people.yaml");
    fs::write(&path, PEOPLE).unwrap();
    (tmp, path)
}

fn write(tmp: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = tmp.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    let tmp = TempDir::new().unwrap();
    modelgen(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("form and data model"));
}

#[test]
fn test_version_displays() {
    let tmp = TempDir::new().unwrap();
    modelgen(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("modelgen"));
}

#[test]
fn test_unknown_command_fails() {
    let tmp = TempDir::new().unwrap();
    modelgen(&tmp)
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

// ============================================================================
// Render Command Tests
// ============================================================================

#[test]
fn test_render_html_defaults() {
    let (tmp, path) = setup_people();
    modelgen(&tmp)
        .args(["render", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "<!-- people: People we work with -->\n<form id=\"people\" method=\"POST\">\n",
        ))
        .stdout(predicate::str::contains(
            "<input class=\"people-orcid\" type=\"text\" id=\"orcid\"",
        ))
        .stdout(predicate::str::contains("type=\"reset\" value=\"cancel\""));
}

#[test]
fn test_render_sqlite_from_stdin() {
    let tmp = TempDir::new().unwrap();
    modelgen(&tmp)
        .args(["render", "-f", "sqlite"])
        .write_stdin(PEOPLE)
        .assert()
        .success()
        .stdout(predicate::str::contains("-- People we work with\n"))
        .stdout(predicate::str::contains("create table if not exists people (\n  id text primary key,"));
}

#[test]
fn test_render_to_file_with_prefix() {
    let (tmp, path) = setup_people();
    let out = tmp.path().join("people.html");
    modelgen(&tmp)
        .args(["render", path.to_str().unwrap(), "--css-prefix", "staff", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Rendered"));

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("<div class=\"staff-name\">"));
}

#[test]
fn test_render_code_templates() {
    let (tmp, path) = setup_people();
    modelgen(&tmp)
        .args(["render", "-f", "typescript", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("interface PeopleInterface"));
    modelgen(&tmp)
        .args(["render", "-f", "python", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("class People"));
}

#[test]
fn test_render_default_from_config() {
    let (tmp, path) = setup_people();
    write(&tmp, ".modelgen.yaml", "default_renderer: yaml\n");
    modelgen(&tmp)
        .args(["render", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("id: people\n"));

    modelgen(&tmp)
        .env("MODELGEN_RENDERER", "sqlite")
        .args(["render", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("create table if not exists people"));
}

#[test]
fn test_render_unknown_renderer_fails() {
    let (tmp, path) = setup_people();
    modelgen(&tmp)
        .args(["render", "-f", "pdf", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pdf is not a registered rendering function"));
}

#[test]
fn test_render_refuses_invalid_model() {
    let tmp = TempDir::new().unwrap();
    let path = write(&tmp, "m.yaml", "id: m\nelements:\n  - id: a\n");
    modelgen(&tmp)
        .args(["render", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required object identifier for model m"));

    modelgen(&tmp)
        .args(["render", path.to_str().unwrap(), "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<form id=\"m\">"));
}

#[test]
fn test_render_yaml_syntax_error() {
    let tmp = TempDir::new().unwrap();
    let path = write(&tmp, "bad.yaml", "id: m\nelements: [\n");
    modelgen(&tmp)
        .args(["render", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad.yaml"));
}

// ============================================================================
// Check Command Tests
// ============================================================================

#[test]
fn test_check_directory_passes() {
    let (tmp, _) = setup_people();
    modelgen(&tmp)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Files checked:  1"))
        .stdout(predicate::str::contains("All models passed"));
}

#[test]
fn test_check_reports_problems() {
    let (tmp, _) = setup_people();
    write(&tmp, "broken.yaml", "id: broken\ncolour: red\n");
    modelgen(&tmp)
        .args(["check", "--keep-going"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Missing required field: elements"))
        .stdout(predicate::str::contains("Files failed:   1"))
        .stderr(predicate::str::contains("Check failed: 1 file has errors"));
}

#[test]
fn test_check_summary_hides_details() {
    let tmp = TempDir::new().unwrap();
    write(&tmp, "m.yaml", "id: m\nelements:\n  - id: a\n  - id: a\n    is_object_id: true\n");
    modelgen(&tmp)
        .args(["check", "--summary", "."])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Duplicate element id").not());
}

// ============================================================================
// Validate Command Tests
// ============================================================================

#[test]
fn test_validate_good_data() {
    let (tmp, path) = setup_people();
    let data = write(
        &tmp,
        "jane.yaml",
        "id: 9b2f0c8e-5a8f-4f7b-9d3e-1c2b3a4d5e6f\nname: Jane\nemail: jane@example.edu\norcid: 0000-0003-0900-6903\n",
    );
    modelgen(&tmp)
        .args(["validate", path.to_str().unwrap(), data.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("is valid for model people"));
}

#[test]
fn test_validate_json_data_with_bad_email() {
    let (tmp, path) = setup_people();
    let data = write(
        &tmp,
        "jane.json",
        r#"{"id": "9b2f0c8e-5a8f-4f7b-9d3e-1c2b3a4d5e6f", "name": "Jane", "email": "not an email", "orcid": ""}"#,
    );
    modelgen(&tmp)
        .args(["validate", path.to_str().unwrap(), data.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to validate elem.Id email, value not an email"));
}

#[test]
fn test_validate_field_count_mismatch() {
    let (tmp, path) = setup_people();
    let data = write(&tmp, "short.yaml", "name: Jane\n");
    modelgen(&tmp)
        .args(["validate", path.to_str().unwrap(), data.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Expected len(ids) 4, got len(data) 1"));
}

#[test]
fn test_validate_fill_generated() {
    let (tmp, path) = setup_people();
    let data = write(&tmp, "jane.yaml", "name: Jane\nemail: jane@example.edu\norcid: ''\n");
    modelgen(&tmp)
        .args([
            "validate",
            path.to_str().unwrap(),
            data.to_str().unwrap(),
            "--fill-generated",
            "--print",
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"(?m)^id: [0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-").unwrap())
        .stdout(predicate::str::contains("name: Jane"));
}

// ============================================================================
// Inspect / Types Command Tests
// ============================================================================

#[test]
fn test_inspect_shows_elements() {
    let (tmp, path) = setup_people();
    modelgen(&tmp)
        .args(["inspect", "--markdown", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("| id *"))
        .stdout(predicate::str::contains("Primary id:  id"))
        .stdout(predicate::str::contains("Generated:   id (uuid)"));
}

#[test]
fn test_types_lists_defaults() {
    let tmp = TempDir::new().unwrap();
    modelgen(&tmp)
        .args(["types", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("orcid\n"))
        .stdout(predicate::str::contains("week").not());

    modelgen(&tmp)
        .args(["types", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("week"))
        .stdout(predicate::str::contains("extended"));
}

// ============================================================================
// Model Command Tests
// ============================================================================

#[test]
fn test_model_no_edit_creates_valid_file() {
    let tmp = TempDir::new().unwrap();
    modelgen(&tmp)
        .env("MODELGEN_AUTHOR", "Jane Doe")
        .args(["model", "guest-book.yaml", "--no-edit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved"));

    let text = fs::read_to_string(tmp.path().join("guest-book.yaml")).unwrap();
    assert!(text.starts_with("# Created by Jane Doe on "));
    assert!(text.contains("id: guest_book"));

    modelgen(&tmp).args(["check", "guest-book.yaml"]).assert().success();

    modelgen(&tmp)
        .args(["model", "guest-book.yaml", "--no-edit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes"));
}

#[test]
fn test_model_rejects_bad_id() {
    let tmp = TempDir::new().unwrap();
    modelgen(&tmp)
        .args(["model", "x.yaml", "--id", "not valid", "--no-edit"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("can't be used as a model id"));
    assert!(!tmp.path().join("x.yaml").exists());
}

// ============================================================================
// Config / Completions Command Tests
// ============================================================================

#[test]
fn test_config_set_show_unset() {
    let tmp = TempDir::new().unwrap();
    modelgen(&tmp)
        .args(["config", "set", "css_prefix", "app"])
        .assert()
        .success();
    assert!(tmp.path().join(".modelgen.yaml").exists());

    modelgen(&tmp)
        .args(["config", "show", "css_prefix"])
        .assert()
        .success()
        .stdout("app\n");

    modelgen(&tmp)
        .args(["config", "unset", "css_prefix"])
        .assert()
        .success();
    modelgen(&tmp)
        .args(["config", "show", "css_prefix"])
        .assert()
        .failure();
}

#[test]
fn test_config_rejects_unknown_key() {
    let tmp = TempDir::new().unwrap();
    modelgen(&tmp)
        .args(["config", "set", "colour", "red"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();
    modelgen(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("modelgen"));
}
