//! The `modelgen` binary.

use predicates::prelude::*;

use modelgen::models::TemplateInput;
use modelgen::test_utils::template;

use crate::common::{TestProject, blog_request};

/// Test printing generated files as JSON
#[test]
fn test_generate_prints_json() {
    let project = TestProject::new().unwrap();
    project.write_request("request.json", &blog_request()).unwrap();

    let output = project
        .modelgen_command()
        .args(["generate", "--input", "request.json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let results: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let results = results.as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["path"], "src/models/user_profile.rs");
    assert_eq!(results[2]["path"], "src/models/mod.rs");
    assert!(results[1]["content"].as_str().unwrap().contains("pub struct BlogPost"));
}

/// Test writing generated files to an output directory from a YAML request
#[test]
fn test_generate_writes_output_directory() {
    let project = TestProject::new().unwrap();
    project.write_request("request.yaml", &blog_request()).unwrap();

    project
        .modelgen_command()
        .args(["generate", "--input", "request.yaml", "--output", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 3 file(s)"));

    let user = project.read_file("out/src/models/user_profile.rs").unwrap();
    assert!(user.contains("pub struct UserProfile {"));
    let index = project.read_file("out/src/models/mod.rs").unwrap();
    assert_eq!(index, "pub mod user_profile;\npub mod blog_post;\n");
}

/// Test that --id overrides the ids of the request
#[test]
fn test_generate_id_flag_overrides_request() {
    let project = TestProject::new().unwrap();
    let mut request = blog_request();
    request.ids = Some(vec!["u1".to_string()]);
    project.write_request("request.json", &request).unwrap();

    let output = project
        .modelgen_command()
        .args(["generate", "--input", "request.json", "--id", "p1"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let results: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let paths: Vec<&str> =
        results.as_array().unwrap().iter().map(|r| r["path"].as_str().unwrap()).collect();
    assert_eq!(paths, vec!["src/models/blog_post.rs", "src/models/mod.rs"]);
}

/// Test that an unknown engine fails with its code and a suggestion
#[test]
fn test_generate_unknown_engine() {
    let project = TestProject::new().unwrap();
    let mut request = blog_request();
    request.templates[1].engine = "terra".to_string();
    project.write_request("request.json", &request).unwrap();

    project
        .modelgen_command()
        .args(["generate", "--input", "request.json"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("[2002]: Unknown engine: terra"))
        .stderr(predicate::str::contains("Did you mean 'tera'?"));
}

/// Test that a request without accesses is rejected before generation
#[test]
fn test_generate_invalid_request() {
    let project = TestProject::new().unwrap();
    project
        .write_file(
            "request.json",
            r#"{"templates": [], "models": [{"id": "x", "name": "X", "fields": []}]}"#,
        )
        .unwrap();

    project
        .modelgen_command()
        .args(["generate", "--input", "request.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("[2003]"))
        .stderr(predicate::str::contains("accesses"));
}

/// Test that a missing request file is reported
#[test]
fn test_generate_missing_input() {
    let project = TestProject::new().unwrap();

    project
        .modelgen_command()
        .args(["generate", "--input", "absent.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("[2001]"))
        .stderr(predicate::str::contains("Failed to read generation request"));
}

/// Test that template errors name the template path
#[test]
fn test_generate_evaluation_error() {
    let project = TestProject::new().unwrap();
    let mut request = blog_request();
    request.templates.push(template("broken/{kebab}.rs", TemplateInput::One, "{{ nope }}"));
    project.write_request("request.json", &request).unwrap();

    project
        .modelgen_command()
        .args(["generate", "--input", "request.json", "--output", "out"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("[2004]"))
        .stderr(predicate::str::contains("File: broken/{kebab}.rs"));

    assert!(!project.path().join("out").exists());
}

/// Test that generated paths cannot escape the output directory
#[test]
fn test_generate_rejects_escaping_paths() {
    let project = TestProject::new().unwrap();
    let mut request = blog_request();
    request.templates[1].path = "../../escape.rs".to_string();
    project.write_request("request.json", &request).unwrap();

    project
        .modelgen_command()
        .args(["generate", "--input", "request.json", "--output", "out"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("escapes the output directory"));

    assert!(!project.path().join("out/src/models/user_profile.rs").exists());
}

/// Test the time budget from the config file and from the environment
#[test]
fn test_generate_timeout() {
    let project = TestProject::new().unwrap();
    let mut request = blog_request();
    request.templates = vec![template(
        "slow.rs",
        TemplateInput::All,
        "{% for i in range(end=100000) %}{% for j in range(end=100000) %}{% endfor %}{% endfor %}",
    )];
    project.write_request("request.json", &request).unwrap();
    project.write_file("config.toml", "timeout_ms = 30\n").unwrap();

    project
        .modelgen_command()
        .args(["generate", "--input", "request.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Template processing timed out (30ms)"));

    project
        .modelgen_command()
        .env("MODELGEN_TIMEOUT_MS", "40")
        .args(["generate", "--input", "request.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("[2005]: Template processing timed out (40ms)"));
}

/// Test expanding a path template
#[test]
fn test_path_command() {
    let project = TestProject::new().unwrap();

    project
        .modelgen_command()
        .args(["path", "/x/{kebab}/y", "--name", "User Profile"])
        .assert()
        .success()
        .stdout("/x/user-profile/y\n");

    project
        .modelgen_command()
        .args(["path", "/x/y"])
        .assert()
        .success()
        .stdout("/x/y\n");
}

/// Test dumping one explicit model
#[test]
fn test_dump_one_model() {
    let project = TestProject::new().unwrap();
    project.write_request("request.json", &blog_request()).unwrap();

    let output = project
        .modelgen_command()
        .args(["dump", "--input", "request.json", "--id", "p1"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let model: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(model["id"], "p1");
    assert_eq!(model["dependencies"]["self"], true);
    assert_eq!(model["dependencies"]["list"][0]["id"], "u1");
    assert_eq!(model["properties"]["isGeolocated"], true);
    assert_eq!(model["fields"]["references"].as_array().unwrap().len(), 2);
}

/// Test dumping every explicit model and an unknown id
#[test]
fn test_dump_all_and_unknown_id() {
    let project = TestProject::new().unwrap();
    project.write_request("request.json", &blog_request()).unwrap();

    let output = project
        .modelgen_command()
        .args(["dump", "--input", "request.json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let models: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(models.as_array().unwrap().len(), 2);

    project
        .modelgen_command()
        .args(["dump", "--input", "request.json", "--id", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("[2003]"))
        .stderr(predicate::str::contains("No model with id 'nope'"));
}

/// Test that an invalid config file is reported
#[test]
fn test_invalid_config_file() {
    let project = TestProject::new().unwrap();
    project.write_request("request.json", &blog_request()).unwrap();
    project.write_file("config.toml", "timeout_ms = \"soon\"\n").unwrap();

    project
        .modelgen_command()
        .args(["generate", "--input", "request.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}
