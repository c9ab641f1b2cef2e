//! Integration tests for `vxc session`: persistence of open notebooks.

mod common;

use common::{TestEnv, parse_json, write_file};
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

fn notebook_dir(env: &TestEnv, name: &str) -> PathBuf {
    let dir = env.home_path().join("notebooks").join(name);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn add(env: &TestEnv, root: &PathBuf, notebook_type: &str) -> serde_json::Value {
    let output = env
        .vxc()
        .args(["session", "add"])
        .arg(root)
        .args(["--type", notebook_type])
        .output()
        .unwrap();
    assert!(output.status.success(), "add failed: {:?}", output);
    parse_json(&output.stdout)
}

#[test]
fn test_session_list_empty() {
    let env = TestEnv::new();

    let output = env.vxc().args(["session", "list"]).output().unwrap();
    assert!(output.status.success());

    let json = parse_json(&output.stdout);
    assert_eq!(json["count"], 0);
    assert_eq!(json["notebooks"], serde_json::json!([]));
}

#[test]
fn test_session_add_list_remove_round_trip() {
    let env = TestEnv::new();
    let work = notebook_dir(&env, "work");
    let journal = notebook_dir(&env, "journal");

    let first = add(&env, &work, "bundled");
    let second = add(&env, &journal, "raw");
    assert_eq!(first["added"], true);
    assert_eq!(second["notebook"]["type"], "raw");

    let first_id = first["notebook"]["id"].as_str().unwrap().to_string();
    assert!(first_id.starts_with("nb-"));

    let output = env.vxc().args(["session", "list"]).output().unwrap();
    let json = parse_json(&output.stdout);
    assert_eq!(json["count"], 2);
    // Order of insertion is preserved
    assert_eq!(json["notebooks"][0]["id"], first["notebook"]["id"]);
    assert_eq!(json["notebooks"][1]["id"], second["notebook"]["id"]);

    env.vxc()
        .args(["session", "remove", &first_id])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""removed":true"#));

    let output = env.vxc().args(["session", "list"]).output().unwrap();
    let json = parse_json(&output.stdout);
    assert_eq!(json["count"], 1);
    assert_eq!(json["notebooks"][0]["id"], second["notebook"]["id"]);
}

#[test]
fn test_session_add_same_root_twice() {
    let env = TestEnv::new();
    let work = notebook_dir(&env, "work");

    add(&env, &work, "bundled");
    let again = add(&env, &work, "raw");

    assert_eq!(again["added"], false);
    assert_eq!(again["notebook"]["type"], "bundled");
}

#[test]
fn test_session_add_missing_root() {
    let env = TestEnv::new();

    let output = env
        .vxc()
        .args(["session", "add"])
        .arg(env.home_path().join("missing"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert_eq!(parse_json(&output.stderr)["kind"], "invalid_input");
}

#[test]
fn test_session_remove_unknown_id() {
    let env = TestEnv::new();

    let output = env
        .vxc()
        .args(["session", "remove", "nb-000000000000"])
        .output()
        .unwrap();
    assert!(!output.status.success());

    let json = parse_json(&output.stderr);
    assert_eq!(json["kind"], "invalid_input");
    assert!(json["error"].as_str().unwrap().contains("nb-000000000000"));
}

#[test]
fn test_session_remove_unknown_id_human_error() {
    let env = TestEnv::new();

    env.vxc()
        .args(["-H", "session", "remove", "nb-000000000000"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error: Invalid input"));
}

#[test]
#[cfg(all(unix, not(target_os = "macos")))]
fn test_session_file_is_pretty_json() {
    let env = TestEnv::new();
    let work = notebook_dir(&env, "work");
    add(&env, &work, "raw");

    let contents = fs::read_to_string(env.session_path()).unwrap();
    assert!(contents.ends_with("}\n"));
    assert!(contents.contains("\n  \"notebooks\": ["));

    let doc: serde_json::Value = serde_json::from_str(&contents).unwrap();
    let root = work.canonicalize().unwrap();
    assert_eq!(
        doc["notebooks"][0]["rootFolder"],
        root.to_string_lossy().as_ref()
    );
    assert_eq!(doc["notebooks"][0]["type"], "raw");
}

#[test]
#[cfg(all(unix, not(target_os = "macos")))]
fn test_session_list_keeps_mistyped_fields() {
    let env = TestEnv::new();
    write_file(
        &env.session_path(),
        r#"{"notebooks": [{"id": "nb-a", "rootFolder": "/a", "type": 7}, {"id": "nb-b", "rootFolder": "/b", "type": "raw"}]}"#,
    );

    let output = env.vxc().args(["session", "list"]).output().unwrap();
    assert!(output.status.success());

    let json = parse_json(&output.stdout);
    assert_eq!(json["count"], 2);
    assert_eq!(json["notebooks"][0]["type"], 7);
    assert_eq!(json["notebooks"][1]["type"], "raw");
}

#[test]
#[cfg(all(unix, not(target_os = "macos")))]
fn test_session_add_keeps_foreign_records() {
    let env = TestEnv::new();
    write_file(
        &env.session_path(),
        r#"{"notebooks": [{"id": "nb-keep", "rootFolder": "/a", "type": "bundled", "name": "Work", "lastOpened": 42}, "opaque-string"]}"#,
    );
    let work = notebook_dir(&env, "work");

    add(&env, &work, "raw");

    let contents = fs::read_to_string(env.session_path()).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(doc["notebooks"].as_array().unwrap().len(), 3);
    assert_eq!(
        doc["notebooks"][0],
        serde_json::json!({"id": "nb-keep", "rootFolder": "/a", "type": "bundled", "name": "Work", "lastOpened": 42})
    );
    assert_eq!(doc["notebooks"][1], "opaque-string");
    assert_eq!(doc["notebooks"][2]["type"], "raw");
}

#[test]
#[cfg(all(unix, not(target_os = "macos")))]
fn test_session_malformed_file_fails() {
    let env = TestEnv::new();
    write_file(&env.session_path(), "");

    let output = env.vxc().args(["session", "list"]).output().unwrap();
    assert!(!output.status.success());
    assert_eq!(parse_json(&output.stderr)["kind"], "json_parse");
}
